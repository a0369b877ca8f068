use std::env;

use tracing::warn;

pub const DEFAULT_GITHUB_API: &str = "https://api.github.com";
pub const DEFAULT_RANDOMUSER_API: &str = "https://randomuser.me/api";
pub const DEFAULT_RANDOMUSER_RESULTS: u32 = 50;

/// Runtime settings, read from the environment (and `.env` if present).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub github_token: Option<String>,
    pub github_api: String,
    pub randomuser_api: String,
    pub randomuser_results: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            github_api: DEFAULT_GITHUB_API.to_string(),
            randomuser_api: DEFAULT_RANDOMUSER_API.to_string(),
            randomuser_results: DEFAULT_RANDOMUSER_RESULTS,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let randomuser_results = match non_empty("RANDOMUSER_RESULTS") {
            None => DEFAULT_RANDOMUSER_RESULTS,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    warn!(value = %raw, "ignoring invalid RANDOMUSER_RESULTS");
                    DEFAULT_RANDOMUSER_RESULTS
                }
            },
        };

        Self {
            github_token: non_empty("GITHUB_TOKEN"),
            github_api: non_empty("GITHUB_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_GITHUB_API.to_string()),
            randomuser_api: non_empty("RANDOMUSER_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_RANDOMUSER_API.to_string()),
            randomuser_results,
        }
    }
}
