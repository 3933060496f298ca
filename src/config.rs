//! Runtime configuration from environment variables

use std::str::FromStr;
use std::time::Duration;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 300;
const DEFAULT_MAX_UPLOAD_MB: usize = 25;
const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

/// Service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub llm: LlmConfig,
    pub max_upload_bytes: usize,
    pub session_ttl: Duration,
}

/// Model provider configuration
#[derive(Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    /// Gateway base URL replacing the public Gemini endpoint
    pub gateway: Option<String>,
    pub timeout: Duration,
    pub max_output_tokens: Option<u32>,
}

// Keep the key out of logs
impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("model", &self.model)
            .field("gateway", &self.gateway)
            .field("timeout", &self.timeout)
            .field("max_output_tokens", &self.max_output_tokens)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparsable values fall back to defaults.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            port: parse(&get, "PORT").unwrap_or(DEFAULT_PORT),
            llm: LlmConfig {
                api_key: get("GEMINI_API_KEY").unwrap_or_default(),
                model: get("GEMINI_MODEL")
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                gateway: get("LLM_GATEWAY").filter(|g| !g.trim().is_empty()),
                timeout: Duration::from_secs(
                    parse(&get, "LLM_TIMEOUT_SECS").unwrap_or(DEFAULT_LLM_TIMEOUT_SECS),
                ),
                max_output_tokens: parse(&get, "LLM_MAX_OUTPUT_TOKENS"),
            },
            max_upload_bytes: parse(&get, "MAX_UPLOAD_MB")
                .unwrap_or(DEFAULT_MAX_UPLOAD_MB)
                .saturating_mul(1024 * 1024),
            session_ttl: Duration::from_secs(
                parse(&get, "SESSION_TTL_SECS").unwrap_or(DEFAULT_SESSION_TTL_SECS),
            ),
        }
    }
}

fn parse<T: FromStr>(get: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    get(key).and_then(|v| v.trim().parse().ok())
}
