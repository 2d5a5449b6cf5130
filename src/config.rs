use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub search: SearchConfig,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    pub pages_per_query: usize,
    pub page_delay_ms: u64,
    pub query_delay_ms: u64,
    pub request_timeout_seconds: u64,
    pub captcha_retries: u8,
    pub captcha_backoff_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub directory: String,
    pub snapshot_filename: String,
    pub write_run_report: bool,
    pub pretty_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search: SearchConfig {
                pages_per_query: 5,
                page_delay_ms: 2000,
                query_delay_ms: 5000,
                request_timeout_seconds: 30,
                captcha_retries: 3,
                captcha_backoff_ms: 5000,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            output: OutputConfig {
                directory: "out".to_string(),
                snapshot_filename: "leads_contactos.csv".to_string(),
                write_run_report: true,
                pretty_json: true,
            },
        }
    }
}

pub async fn load_config(
    path: &str,
) -> std::result::Result<Config, Box<dyn std::error::Error + Send + Sync>> {
    let content = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&content)?;
    Ok(config)
}
