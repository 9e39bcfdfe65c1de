//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;

use crate::repository::ApiCredential;
use crate::table::{DEFAULT_PAGE_SIZE_OPTIONS, PageSizeOptions};

/// Cookie keys are derived from the secret and need at least this many bytes.
pub const MIN_SECRET_LEN: usize = 64;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,
    pub secret: String,
    pub api_base_url: String,
    pub platform_key: String,
    /// Explicit credential for the storefront API. Blank means anonymous.
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<usize>,
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_templates_dir() -> String {
    "templates/**/*".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_page_size_options() -> Vec<usize> {
    DEFAULT_PAGE_SIZE_OPTIONS.to_vec()
}

impl ServerConfig {
    pub fn page_size_options(&self) -> PageSizeOptions {
        PageSizeOptions::new(self.page_size_options.iter().copied())
    }

    pub fn credential(&self) -> Option<ApiCredential> {
        self.api_token.as_deref().and_then(ApiCredential::new)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn has_valid_secret(&self) -> bool {
        self.secret.len() >= MIN_SECRET_LEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> ServerConfig {
        config::Config::builder()
            .add_source(config::File::from_str(yaml, config::FileFormat::Yaml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn optional_fields_fall_back_to_defaults() {
        let config = parse(
            "secret: abc\napi_base_url: https://api.example.com\nplatform_key: web\n",
        );

        assert_eq!(config.address, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.page_size_options(), PageSizeOptions::default());
        assert!(config.credential().is_none());
        assert!(!config.has_valid_secret());
    }

    #[test]
    fn blank_token_means_anonymous_and_sizes_are_sanitized() {
        let config = parse(
            "secret: abc\napi_base_url: x\nplatform_key: web\napi_token: '  '\npage_size_options: [25, 0, 25, 5]\n",
        );

        assert!(config.credential().is_none());
        assert_eq!(config.page_size_options().default_size(), 25);
        assert!(config.page_size_options().contains(5));
        assert!(!config.page_size_options().contains(0));
    }
}
