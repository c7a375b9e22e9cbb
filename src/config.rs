use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Base URL of the nutrition backend everything is forwarded to,
    /// e.g. `http://localhost:5000`.
    pub upstream_base_url: String,
    /// Timeout applied to every upstream call, in seconds.
    pub request_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let upstream_base_url = std::env::var("UPSTREAM_BASE_URL")?;
        let request_timeout_secs = std::env::var("UPSTREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);
        Ok(Self {
            upstream_base_url,
            request_timeout_secs,
        })
    }
}
