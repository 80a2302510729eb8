#![allow(dead_code)]

use std::path::Path;

use courtside::client::ApiClient;
use courtside::config::{AppConfig, HttpConfig, MonitoringConfig, RateLimitConfig, StorageConfig};
use courtside::credentials::Credentials;

pub fn test_config(data_dir: &Path) -> AppConfig {
    AppConfig {
        http: HttpConfig {
            timeout_seconds: 5,
            user_agent: "courtside-tests".to_string(),
        },
        rate_limit: RateLimitConfig {
            requests_per_second: 100,
            burst_size: 100,
        },
        storage: StorageConfig {
            data_dir: data_dir.to_path_buf(),
            credentials_file: data_dir.join("api_creds.json"),
            tennis_abstract_dir: data_dir.join("tennis_abstract"),
        },
        monitoring: MonitoringConfig {
            log_level: "debug".to_string(),
            json_logs: false,
        },
    }
}

pub fn test_client(base_url: &str, data_dir: &Path) -> ApiClient {
    let credentials =
        Credentials::from_json(r#"{"rapidapi": {"x-rapidapi-key": "test-key"}}"#).unwrap();
    ApiClient::new(&test_config(data_dir), credentials)
        .unwrap()
        .with_base_url(base_url)
}
