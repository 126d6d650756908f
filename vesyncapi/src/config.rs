use std::time::Duration;

use serde::Deserialize;

pub const BASE_URL: &str = "https://smartapi.vesync.com";
pub const DEFAULT_TIMEZONE: &str = "America/New_York";
pub const API_TIMEOUT: Duration = Duration::from_secs(5);

/// Static settings of the client: where to send requests, how long to wait,
/// and the app/phone fingerprint the cloud expects in every request body.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    #[serde(deserialize_with = "seconds::deserialize")]
    pub timeout: Duration,
    pub app_version: String,
    pub phone_brand: String,
    pub phone_os: String,
    pub user_type: String,
    pub accept_language: String,
    pub default_timezone: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: BASE_URL.to_string(),
            timeout: API_TIMEOUT,
            app_version: "2.5.1".to_string(),
            phone_brand: "SM N9005".to_string(),
            phone_os: "Android".to_string(),
            user_type: "1".to_string(),
            accept_language: "en".to_string(),
            default_timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl ToString) -> Self {
        self.base_url = base_url.to_string().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL for an api path such as `/cloud/v1/user/login`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

mod seconds {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(d: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(d).map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ClientConfig::default().with_base_url("http://127.0.0.1:8080/");
        assert_eq!(
            config.url("/cloud/v1/user/login"),
            "http://127.0.0.1:8080/cloud/v1/user/login"
        );
    }

    #[test]
    fn deserialize_partial_config() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"timeout": 12, "app_version": "2.9.0"}"#).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(12));
        assert_eq!(config.app_version, "2.9.0");
        assert_eq!(config.base_url, BASE_URL);
        assert_eq!(config.default_timezone, DEFAULT_TIMEZONE);
    }
}
