//! Endpoint configuration from TOML (`[endpoint]` section)

use chatwire_domain::{ConfigIssue, ConfigIssueCode};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where the chat service listens when nothing else is configured.
pub const DEFAULT_ENDPOINT_URL: &str = "http://127.0.0.1:5000/chat";

/// Raw endpoint configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEndpointConfig {
    /// Full URL the query is POSTed to
    pub url: String,
    /// Request timeout in seconds; unset waits forever
    pub timeout_secs: Option<u64>,
}

impl Default for FileEndpointConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ENDPOINT_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl FileEndpointConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.url.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "endpoint.url".to_string(),
                },
                "endpoint.url must not be empty",
            ));
        } else {
            let supported = Url::parse(&self.url)
                .map(|url| matches!(url.scheme(), "http" | "https"))
                .unwrap_or(false);
            if !supported {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::InvalidUrl {
                        field: "endpoint.url".to_string(),
                        value: self.url.clone(),
                    },
                    format!("endpoint.url: '{}' is not an http(s) URL", self.url),
                ));
            }
        }

        if self.timeout_secs == Some(0) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "endpoint.timeout_secs".to_string(),
                    value: "0".to_string(),
                },
                "endpoint.timeout_secs must be at least 1 (omit it to disable the timeout)",
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(FileEndpointConfig::default().validate().is_empty());
    }

    #[test]
    fn test_rejects_non_http_and_garbage_urls() {
        for url in ["ftp://host/chat", "not a url", "/chat"] {
            let config = FileEndpointConfig {
                url: url.to_string(),
                timeout_secs: None,
            };
            let issues = config.validate();
            assert_eq!(issues.len(), 1, "{url}");
            assert!(matches!(issues[0].code, ConfigIssueCode::InvalidUrl { .. }));
        }
    }

    #[test]
    fn test_rejects_empty_url_and_zero_timeout() {
        let config = FileEndpointConfig {
            url: " ".to_string(),
            timeout_secs: Some(0),
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(ConfigIssue::is_error));
    }

    #[test]
    fn test_timeout_conversion() {
        let config = FileEndpointConfig {
            timeout_secs: Some(15),
            ..Default::default()
        };
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(FileEndpointConfig::default().timeout(), None);
    }
}
