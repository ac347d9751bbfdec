use std::sync::Arc;

use crate::config::Config;
use crate::notifier::discord::DiscordNotifier;
use crate::notifier::{Notifier, NotifyError};
use crate::rate_limit::SubmissionRateLimiter;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub notifier: Option<Arc<dyn Notifier>>,
    pub submission_limiter: SubmissionRateLimiter,
}

impl AppState {
    pub fn new(
        config: Config,
        notifier: Option<Arc<dyn Notifier>>,
        submission_limiter: SubmissionRateLimiter,
    ) -> Self {
        Self {
            config,
            notifier,
            submission_limiter,
        }
    }

    /// Wire the Discord notifier (when a webhook URL is configured) and an in-memory limiter.
    pub fn from_config(config: Config) -> Result<Self, NotifyError> {
        let notifier: Option<Arc<dyn Notifier>> = match config.discord_webhook_url.as_deref() {
            Some(url) => {
                let discord = DiscordNotifier::new(url, config.webhook_timeout)?;
                Some(Arc::new(discord) as Arc<dyn Notifier>)
            }
            None => {
                tracing::warn!("DISCORD_WEBHOOK_URL not configured, notifications disabled");
                None
            }
        };

        let limiter =
            SubmissionRateLimiter::in_memory(config.rate_limit, config.rate_limit_window);

        Ok(Self::new(config, notifier, limiter))
    }
}
