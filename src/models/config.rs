//! Configuration model loaded from external sources.

use serde::Deserialize;
use validator::Validate;

fn default_timeout_secs() -> u64 {
    10
}

fn default_category_path() -> String {
    "/api/category".to_string()
}

fn default_product_path() -> String {
    "/api/product".to_string()
}

#[derive(Clone, Debug, Deserialize, Validate)]
/// Location and credentials of the remote catalog REST API.
pub struct ApiConfig {
    #[validate(url)]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    #[validate(range(min = 1))]
    pub timeout_secs: u64,
    /// Bearer token attached to every request, if any.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_category_path")]
    pub category_path: String,
    #[serde(default = "default_product_path")]
    pub product_path: String,
}

#[derive(Clone, Debug, Deserialize, Validate)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    #[validate(nested)]
    pub api: ApiConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_defaults_are_applied() {
        let config: ApiConfig =
            serde_json::from_str(r#"{"base_url":"http://localhost:3412"}"#).unwrap();

        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.category_path, "/api/category");
        assert_eq!(config.product_path, "/api/product");
        assert!(config.token.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_malformed_base_url() {
        let config: ApiConfig = serde_json::from_str(r#"{"base_url":"not a url"}"#).unwrap();
        assert!(config.validate().is_err());
    }
}
