use std::collections::HashMap;
use std::io::Cursor;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::RequestBody;
use crate::config::ClientConfig;
use crate::decode::decode;
use crate::error::{Result, VeSyncError};
use crate::http::{HttpRequest, ReqwestTransport, Transport};
use crate::session::Session;

/// A decoded HTTP 200 response.
#[derive(Debug)]
pub struct ApiResponse<R> {
    pub status: u16,
    pub body: R,
}

/// The main interface to the VeSync cloud api.
pub struct VeSyncClient<T = ReqwestTransport> {
    config: ClientConfig,
    transport: T,
}

impl VeSyncClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(VeSyncClient { config, transport })
    }
}

impl<T: Transport> VeSyncClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        VeSyncClient { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Creates an anonymous session whose timezone falls back to the
    /// configured default.
    pub fn session(&self, username: impl ToString, password: impl ToString, timezone: &str) -> Session {
        Session::with_default_timezone(username, password, timezone, &self.config.default_timezone)
    }

    /// Sends one request to `path` below the base url and decodes an HTTP 200
    /// response into `R`. Any other status is an [`VeSyncError::UnableToFetch`]
    /// and its body is not looked at.
    pub fn call<R: DeserializeOwned>(
        &self,
        path: &str,
        verb: &str,
        headers: Option<&HashMap<String, String>>,
        body: Option<&RequestBody>,
    ) -> Result<ApiResponse<R>> {
        let verb = verb.to_uppercase();
        let method =
            Method::from_bytes(verb.as_bytes()).map_err(|_| VeSyncError::InvalidVerb(verb.clone()))?;

        let mut header_map = HeaderMap::new();
        header_map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in headers.into_iter().flatten() {
            let invalid = || VeSyncError::InvalidHeader { name: name.clone() };
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
            let value = HeaderValue::from_str(value).map_err(|_| invalid())?;
            header_map.append(name, value);
        }

        let body = match body {
            Some(body) if !body.is_empty() => serde_json::to_vec(body)?,
            _ => Vec::new(),
        };

        let url = self.config.url(path);
        debug!(method = %verb, api = path, "[{}] calling '{}' api", verb, path);

        let response = self
            .transport
            .execute(HttpRequest {
                method,
                url: url.clone(),
                headers: header_map,
                body,
            })?;

        if response.status != 200 {
            debug!("unable to fetch {}", url);
            return Err(VeSyncError::UnableToFetch {
                status: response.status,
                url,
            });
        }

        let body = decode(response.content_type.as_deref(), Cursor::new(response.body))?;
        Ok(ApiResponse { status: 200, body })
    }
}

// -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::decode::DecodeError;
    use crate::http::stub::StubTransport;
    use crate::responses::ApiEnvelope;

    fn client(transport: StubTransport) -> VeSyncClient<StubTransport> {
        VeSyncClient::with_transport(
            ClientConfig::default().with_base_url("http://vesync.test"),
            transport,
        )
    }

    #[test]
    fn builds_request() {
        let client = client(StubTransport::json(200, r#"{"code":0}"#));
        let mut headers = HashMap::new();
        headers.insert("tk".to_string(), "token".to_string());
        let mut body = RequestBody::new();
        body.insert("method".to_string(), Value::from("devices"));

        let response: ApiResponse<ApiEnvelope<Value>> = client
            .call("/cloud/v1/deviceManaged/devices", "post", Some(&headers), Some(&body))
            .unwrap();
        assert_eq!(response.status, 200);
        assert!(response.body.is_success());

        let requests = client.transport.requests.borrow();
        let request = &requests[0];
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url, "http://vesync.test/cloud/v1/deviceManaged/devices");
        assert_eq!(request.headers[CONTENT_TYPE], "application/json");
        assert_eq!(request.headers["tk"], "token");
        assert_eq!(request.body, br#"{"method":"devices"}"#);
    }

    #[test]
    fn empty_body_is_not_serialized() {
        let client = client(StubTransport::json(200, r#"{"code":0}"#));
        let _: ApiResponse<ApiEnvelope<Value>> =
            client.call("/x", "get", None, Some(&RequestBody::new())).unwrap();
        let _: ApiResponse<ApiEnvelope<Value>> = client.call("/x", "Get", None, None).unwrap();
        let requests = client.transport.requests.borrow();
        assert!(requests.iter().all(|r| r.body.is_empty() && r.method == Method::GET));
    }

    #[test]
    fn non_200_is_not_decoded() {
        let client = client(StubTransport::json(503, "not json at all"));
        let err = client
            .call::<ApiEnvelope<Value>>("/cloud/v1/user/login", "post", None, None)
            .unwrap_err();
        match err {
            VeSyncError::UnableToFetch { status, ref url } => {
                assert_eq!(status, 503);
                assert_eq!(url, "http://vesync.test/cloud/v1/user/login");
            }
            err => panic!("unexpected {err:?}"),
        }
        assert_eq!(err.status_code(), 503);
    }

    #[test]
    fn decode_errors_are_passed_on() {
        let client = client(StubTransport::json(200, r#"{"code":0}"#).with_content_type("text/plain"));
        let err = client.call::<ApiEnvelope<Value>>("/x", "post", None, None).unwrap_err();
        assert!(matches!(
            err,
            VeSyncError::Decode(DecodeError::UnsupportedMediaType { .. })
        ));
        assert_eq!(err.status_code(), 200);
    }

    #[test]
    fn invalid_verb_and_header_do_not_send() {
        let client = client(StubTransport::json(200, r#"{"code":0}"#));
        let err = client.call::<ApiEnvelope<Value>>("/x", "po st", None, None).unwrap_err();
        assert!(matches!(err, VeSyncError::InvalidVerb(ref verb) if verb == "PO ST"));

        let mut headers = HashMap::new();
        headers.insert("bad header".to_string(), "x".to_string());
        let err = client
            .call::<ApiEnvelope<Value>>("/x", "post", Some(&headers), None)
            .unwrap_err();
        assert!(matches!(err, VeSyncError::InvalidHeader { ref name } if name == "bad header"));

        assert_eq!(client.transport.calls(), 0);
    }
}
