use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use url::Url;
use wellness_domain::shared::DomainError;

use super::TimeoutConfig;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TEMPERATURE: f32 = 0.4;
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Absent when plan generation is not configured.
    pub api_key: Option<String>,
    pub base_url: Url,
    pub model: String,
    pub temperature: f32,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub llm: LlmConfig,
    pub timeouts: TimeoutConfig,
}

impl AppConfig {
    /// Load `.env` (if any) and read configuration from the process
    /// environment.
    pub fn from_env() -> Result<Self, DomainError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let data_dir = default_data_dir();

        let db_path = var("WELLNESS_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("wellness.db"));
        let log_dir = var("WELLNESS_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("logs"));

        let base_url = var("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = parse_base_url(&base_url)?;

        let temperature = match var("OPENAI_TEMPERATURE") {
            Some(raw) => parse_var::<f32>("OPENAI_TEMPERATURE", &raw)?,
            None => DEFAULT_TEMPERATURE,
        };
        if !(0.0..=2.0).contains(&temperature) {
            return Err(DomainError::Validation(
                "OPENAI_TEMPERATURE must be between 0 and 2".to_string(),
            ));
        }

        let timeout_secs = match var("WELLNESS_LLM_TIMEOUT_SECS") {
            Some(raw) => parse_var::<u64>("WELLNESS_LLM_TIMEOUT_SECS", &raw)?,
            None => DEFAULT_LLM_TIMEOUT_SECS,
        };
        let connect_secs = match var("WELLNESS_CONNECT_TIMEOUT_SECS") {
            Some(raw) => parse_var::<u64>("WELLNESS_CONNECT_TIMEOUT_SECS", &raw)?,
            None => DEFAULT_CONNECT_TIMEOUT_SECS,
        };

        Ok(Self {
            db_path,
            log_dir,
            llm: LlmConfig {
                api_key: var("OPENAI_API_KEY"),
                base_url,
                model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                temperature,
            },
            timeouts: TimeoutConfig::new()
                .with_llm_request(Duration::from_secs(timeout_secs))
                .with_connect(Duration::from_secs(connect_secs)),
        })
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wellness")
}

fn parse_var<T: FromStr>(key: &str, raw: &str) -> Result<T, DomainError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| DomainError::Validation(format!("{} has an invalid value: {}", key, raw)))
}

/// Parse the API base URL, ensuring a trailing slash so relative joins keep
/// the path prefix (e.g. `/v1/`).
fn parse_base_url(raw: &str) -> Result<Url, DomainError> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    let url = Url::parse(&normalized)
        .map_err(|e| DomainError::Validation(format!("OPENAI_BASE_URL is invalid: {}", e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(DomainError::Validation(format!(
            "OPENAI_BASE_URL must use http or https, got {}",
            other
        ))),
    }
}
