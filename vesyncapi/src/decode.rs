//! Strict decoding of api responses.
//!
//! A response body must be `application/json`, at most [`MAX_BODY_SIZE`]
//! bytes, and contain exactly one JSON value matching the destination type.
//! Destination types reject unknown fields with `#[serde(deny_unknown_fields)]`.
//! Failures are sorted into [`DecodeError`] variants that carry a readable
//! message and an HTTP-like status.

use std::io::Read;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::error::Category;

pub const MAX_BODY_SIZE: u64 = 1024 * 1024;

#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("Content-Type header is not application/json (got `{content_type}`)")]
    UnsupportedMediaType { content_type: String },

    #[error("body contains badly-formed JSON (at position {offset})")]
    Syntax { offset: usize },

    #[error("body contains badly-formed JSON")]
    Truncated,

    #[error("body contains an invalid value for the {field:?} field (at position {offset})")]
    TypeMismatch { field: String, offset: usize },

    #[error("body contains unknown field {field:?}")]
    UnknownField { field: String },

    #[error("body must not be empty")]
    Empty,

    #[error("body must not be larger than 1MB")]
    TooLarge,

    #[error("body must only contain a single JSON object")]
    MultipleValues,

    #[error("cannot read body: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(serde_json::Error),
}

impl DecodeError {
    pub fn status(&self) -> StatusCode {
        match self {
            DecodeError::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            DecodeError::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            DecodeError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

fn is_json_whitespace(b: &u8) -> bool {
    matches!(b, b' ' | b'\n' | b'\r' | b'\t')
}

/// Parameters such as `; charset=utf-8` are ignored.
fn check_media_type(content_type: &str) -> Result<(), DecodeError> {
    let media_type = content_type.split(';').next().unwrap_or_default().trim();
    if media_type.eq_ignore_ascii_case("application/json") {
        Ok(())
    } else {
        Err(DecodeError::UnsupportedMediaType {
            content_type: content_type.to_string(),
        })
    }
}

/// serde_json reports 1-based lines and columns, callers get a byte offset.
fn byte_offset(bytes: &[u8], line: usize, column: usize) -> usize {
    let line_start: usize = bytes
        .split(|b| *b == b'\n')
        .take(line.saturating_sub(1))
        .map(|l| l.len() + 1)
        .sum();
    (line_start + column).min(bytes.len())
}

fn unknown_field(msg: &str) -> Option<String> {
    let rest = msg.strip_prefix("unknown field `")?;
    rest.split('`').next().map(str::to_string)
}

fn classify(err: serde_path_to_error::Error<serde_json::Error>, bytes: &[u8]) -> DecodeError {
    let field = err.path().to_string();
    let err = err.into_inner();
    let offset = byte_offset(bytes, err.line(), err.column());
    match err.classify() {
        Category::Eof => DecodeError::Truncated,
        Category::Syntax => DecodeError::Syntax { offset },
        Category::Data => {
            let msg = err.to_string();
            if let Some(field) = unknown_field(&msg) {
                DecodeError::UnknownField { field }
            } else if msg.starts_with("invalid type") || msg.starts_with("invalid value") {
                DecodeError::TypeMismatch { field, offset }
            } else {
                DecodeError::Json(err)
            }
        }
        Category::Io => DecodeError::Json(err),
    }
}

/// Decodes a complete body held in memory.
pub fn decode_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    if bytes.iter().all(is_json_whitespace) {
        return Err(DecodeError::Empty);
    }
    let mut de = serde_json::Deserializer::from_slice(bytes);
    let value = serde_path_to_error::deserialize(&mut de).map_err(|err| classify(err, bytes))?;
    de.end().map_err(|_| DecodeError::MultipleValues)?;
    Ok(value)
}

/// Checks `content_type` (if the response had one), then reads and decodes
/// `body`.
pub fn decode<T: DeserializeOwned>(
    content_type: Option<&str>,
    body: impl Read,
) -> Result<T, DecodeError> {
    if let Some(content_type) = content_type.filter(|ct| !ct.is_empty()) {
        check_media_type(content_type)?;
    }
    let mut bytes = Vec::new();
    body.take(MAX_BODY_SIZE + 1).read_to_end(&mut bytes)?;
    if bytes.len() as u64 > MAX_BODY_SIZE {
        return Err(DecodeError::TooLarge);
    }
    decode_slice(&bytes)
}

// -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-
