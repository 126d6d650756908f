use lazy_static::lazy_static;
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::config::DEFAULT_TIMEZONE;

/// Credentials handed out by a successful login. Token and account id only
/// ever exist together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub token: String,
    pub account_id: String,
}

/// Account identity and login state for one connection to the VeSync cloud.
#[derive(Debug)]
pub struct Session {
    username: String,
    password: SecretString,
    timezone: String,
    auth: Option<AuthToken>,
}

/// Returns `timezone` if it only consists of `[a-zA-Z/_]`, `default` otherwise.
fn valid_timezone(timezone: &str, default: &str) -> String {
    lazy_static! {
        static ref INVALID: Regex = Regex::new(r"[^a-zA-Z/_]").unwrap();
    }
    if timezone.is_empty() {
        debug!("time zone is empty, using {}", default);
        return default.to_string();
    }
    if INVALID.is_match(timezone) {
        debug!("invalid characters in time zone {:?}, using {}", timezone, default);
        return default.to_string();
    }
    timezone.to_string()
}

impl Session {
    pub fn new(username: impl ToString, password: impl ToString, timezone: &str) -> Self {
        Session::with_default_timezone(username, password, timezone, DEFAULT_TIMEZONE)
    }

    /// Like [`Session::new`] but falls back to `default_timezone` instead of
    /// `America/New_York`.
    pub fn with_default_timezone(
        username: impl ToString,
        password: impl ToString,
        timezone: &str,
        default_timezone: &str,
    ) -> Self {
        Session {
            username: username.to_string(),
            password: SecretString::from(password.to_string()),
            timezone: valid_timezone(timezone, default_timezone),
            auth: None,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        self.password.expose_secret()
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    pub fn auth(&self) -> Option<&AuthToken> {
        self.auth.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.auth.as_ref().map(|auth| auth.token.as_str())
    }

    pub fn account_id(&self) -> Option<&str> {
        self.auth.as_ref().map(|auth| auth.account_id.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    pub(crate) fn authenticate(&mut self, auth: AuthToken) {
        self.auth = Some(auth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_valid_timezone() {
        let session = Session::new("user@example.com", "secret", "America/Chicago");
        assert_eq!(session.timezone(), "America/Chicago");
        let session = Session::new("user@example.com", "secret", "America/Port_of_Spain");
        assert_eq!(session.timezone(), "America/Port_of_Spain");
    }

    #[test]
    fn invalid_timezone_falls_back_to_default() {
        for tz in ["", "America/New York", "UTC+1", "Etc/GMT-5", "Europe/Berlin;", "Zürich"] {
            let session = Session::new("user@example.com", "secret", tz);
            assert_eq!(session.timezone(), DEFAULT_TIMEZONE, "timezone {:?}", tz);
        }
    }

    #[test]
    fn custom_default_timezone() {
        let session = Session::with_default_timezone("u", "p", "bad tz", "Europe/Berlin");
        assert_eq!(session.timezone(), "Europe/Berlin");
    }

    #[test]
    fn new_session_is_anonymous() {
        let session = Session::new("user@example.com", "secret", "America/Chicago");
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
        assert_eq!(session.account_id(), None);
    }

    #[test]
    fn debug_output_hides_password() {
        let session = Session::new("user@example.com", "hunter2", "America/Chicago");
        let debug = format!("{:?}", session);
        assert!(debug.contains("user@example.com"));
        assert!(!debug.contains("hunter2"));
    }
}
