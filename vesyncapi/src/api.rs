use serde_json::{Map, Value};

use crate::config::ClientConfig;
use crate::error::{Result, VeSyncError};
use crate::session::Session;

/// Flat JSON object sent as the body of an api call.
pub type RequestBody = Map<String, Value>;

pub const LOGIN_PATH: &str = "/cloud/v1/user/login";

/// The api methods a request body can be built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Login,
}

impl Method {
    pub fn name(&self) -> &'static str {
        match self {
            Method::Login => "login",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Method {
    type Err = VeSyncError;

    fn from_str(input: &str) -> Result<Self> {
        match input {
            "login" => Ok(Method::Login),
            _ => Err(VeSyncError::UnsupportedMethod(input.to_string())),
        }
    }
}

/// The cloud never sees the password itself, only its md5 hex digest.
fn hash_password(password: &str) -> String {
    format!("{:x}", md5::compute(password.as_bytes()))
}

fn insert(body: &mut RequestBody, key: &str, value: impl Into<String>) {
    body.insert(key.to_string(), Value::String(value.into()));
}

/// Fields every request carries: locale and the app/phone fingerprint.
fn base_body(session: &Session, config: &ClientConfig, trace_ts: i64) -> RequestBody {
    let mut body = RequestBody::new();
    insert(&mut body, "timeZone", session.timezone());
    insert(&mut body, "acceptLanguage", config.accept_language.as_str());
    insert(&mut body, "appVersion", config.app_version.as_str());
    insert(&mut body, "phoneBrand", config.phone_brand.as_str());
    insert(&mut body, "phoneOS", config.phone_os.as_str());
    insert(&mut body, "traceId", trace_ts.to_string());
    body
}

/// Builds the body for `method` with the trace id taken from the current time.
pub fn request_body(session: &Session, config: &ClientConfig, method: Method) -> RequestBody {
    request_body_at(session, config, method, chrono::Utc::now().timestamp())
}

/// Builds the body for `method` with `trace_ts` (unix seconds) as trace id.
pub fn request_body_at(
    session: &Session,
    config: &ClientConfig,
    method: Method,
    trace_ts: i64,
) -> RequestBody {
    let mut body = base_body(session, config, trace_ts);
    match method {
        Method::Login => {
            insert(&mut body, "email", session.username());
            insert(&mut body, "password", hash_password(session.password()));
            insert(&mut body, "devToken", "");
            insert(&mut body, "userType", config.user_type.as_str());
            insert(&mut body, "method", method.name());
        }
    }
    body
}

// -=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-=-

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new("user@example.com", "hunter2", "America/Chicago")
    }

    #[test]
    fn hash_password() {
        assert_eq!(
            super::hash_password("hunter2"),
            "2ab96390c7dbe3439de74d0c9b0b1767"
        );
        assert_eq!(super::hash_password(""), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn login_body() {
        let body = request_body_at(&session(), &ClientConfig::default(), Method::Login, 1_600_000_000);
        let expected = serde_json::json!({
            "timeZone": "America/Chicago",
            "acceptLanguage": "en",
            "appVersion": "2.5.1",
            "phoneBrand": "SM N9005",
            "phoneOS": "Android",
            "traceId": "1600000000",
            "email": "user@example.com",
            "password": "2ab96390c7dbe3439de74d0c9b0b1767",
            "devToken": "",
            "userType": "1",
            "method": "login",
        });
        assert_eq!(Value::Object(body), expected);
    }

    #[test]
    fn frozen_clock_gives_identical_bytes() {
        let config = ClientConfig::default();
        let a = serde_json::to_vec(&request_body_at(&session(), &config, Method::Login, 42)).unwrap();
        let b = serde_json::to_vec(&request_body_at(&session(), &config, Method::Login, 42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn only_trace_id_depends_on_clock() {
        let config = ClientConfig::default();
        let mut a = request_body_at(&session(), &config, Method::Login, 1);
        let mut b = request_body_at(&session(), &config, Method::Login, 2);
        assert_ne!(a.remove("traceId"), b.remove("traceId"));
        assert_eq!(a, b);
    }

    #[test]
    fn current_clock_trace_id() {
        let before = chrono::Utc::now().timestamp();
        let body = request_body(&session(), &ClientConfig::default(), Method::Login);
        let trace: i64 = body["traceId"].as_str().unwrap().parse().unwrap();
        assert!(trace >= before);
    }

    #[test]
    fn parse_method() {
        assert_eq!("login".parse::<Method>().unwrap(), Method::Login);
        assert!(matches!(
            "getDevices".parse::<Method>(),
            Err(VeSyncError::UnsupportedMethod(name)) if name == "getDevices"
        ));
        assert!("LOGIN".parse::<Method>().is_err());
    }
}
