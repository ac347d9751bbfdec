use std::net::IpAddr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_webhook_url: Option<String>,
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub rate_limit: usize,
    pub rate_limit_window: Duration,
    pub webhook_timeout: Duration,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            discord_webhook_url: None,
            host: IpAddr::from([0, 0, 0, 0]),
            port: 3000,
            max_body_size: 65_536,
            rate_limit: 3,
            rate_limit_window: Duration::from_secs(120),
            webhook_timeout: Duration::from_secs(10),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let discord_webhook_url = env_optional("DISCORD_WEBHOOK_URL");

        let host: IpAddr = env_or("RELAY_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid RELAY_HOST: {e}"))?;

        let port: u16 = env_or("RELAY_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid RELAY_PORT: {e}"))?;

        let max_body_size: usize = env_or("RELAY_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid RELAY_MAX_BODY_SIZE: {e}"))?;

        let rate_limit: usize = env_or("RELAY_RATE_LIMIT", "3")
            .parse()
            .map_err(|e| format!("Invalid RELAY_RATE_LIMIT: {e}"))?;

        let window_secs: u64 = env_or("RELAY_RATE_LIMIT_WINDOW_SECS", "120")
            .parse()
            .map_err(|e| format!("Invalid RELAY_RATE_LIMIT_WINDOW_SECS: {e}"))?;
        if window_secs == 0 {
            return Err("RELAY_RATE_LIMIT_WINDOW_SECS must be greater than zero".to_string());
        }

        let timeout_secs: u64 = env_or("RELAY_WEBHOOK_TIMEOUT_SECS", "10")
            .parse()
            .map_err(|e| format!("Invalid RELAY_WEBHOOK_TIMEOUT_SECS: {e}"))?;

        let log_level = env_or("RELAY_LOG_LEVEL", "info");

        Ok(Config {
            discord_webhook_url,
            host,
            port,
            max_body_size,
            rate_limit,
            rate_limit_window: Duration::from_secs(window_secs),
            webhook_timeout: Duration::from_secs(timeout_secs),
            log_level,
        })
    }
}

fn env_optional(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
