use std::time::Duration;

use crate::decode::DecodeError;

#[derive(thiserror::Error, Debug)]
pub enum VeSyncError {
    #[error("username invalid")]
    InvalidUsername,

    #[error("password invalid")]
    InvalidPassword,

    #[error("unsupported api method: `{0}`")]
    UnsupportedMethod(String),

    #[error("invalid http verb: `{0}`")]
    InvalidVerb(String),

    #[error("invalid header `{name}`")]
    InvalidHeader { name: String },

    #[error("unknown device model: `{0}`")]
    UnknownDevice(String),

    #[error("parser error: `{0}`")]
    ParserError(String),

    #[error("cannot build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("cannot serialize request body: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The request never produced a usable response (DNS, connection refused,
    /// timeout). `status` is 0 unless the transport knew one.
    #[error("transport error: {source}")]
    Transport {
        status: u16,
        #[source]
        source: reqwest::Error,
    },

    #[error("request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("cannot read response body: {0}")]
    BodyRead(#[source] std::io::Error),

    #[error("unable to fetch {url}")]
    UnableToFetch { status: u16, url: String },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The server answered with a well-formed envelope whose `code` was not 0.
    #[error("login rejected by server (code {code}): {}", msg.as_deref().unwrap_or("no message"))]
    LoginRejected { code: i64, msg: Option<String> },

    #[error("vesync login error: `{0}`")]
    LoginError(String),
}

impl VeSyncError {
    /// The HTTP status code associated with this error, 0 if there is none.
    pub fn status_code(&self) -> u16 {
        match self {
            VeSyncError::Transport { status, .. } | VeSyncError::UnableToFetch { status, .. } => {
                *status
            }
            VeSyncError::Decode(_) | VeSyncError::LoginRejected { .. } | VeSyncError::LoginError(_) => {
                200
            }
            _ => 0,
        }
    }

    /// `true` if the exchange with the server did not complete: it could not
    /// be reached, timed out, or the body could not be received.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            VeSyncError::Transport { .. } | VeSyncError::Timeout { .. } | VeSyncError::BodyRead(_)
        )
    }

    pub(crate) fn transport(source: reqwest::Error) -> Self {
        let status = source.status().map(|s| s.as_u16()).unwrap_or_default();
        VeSyncError::Transport { status, source }
    }
}

pub type Result<T> = std::result::Result<T, VeSyncError>;
