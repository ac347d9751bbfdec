pub mod discord;

use async_trait::async_trait;

use crate::models::SanitizedSubmission;

#[derive(Debug)]
pub enum NotifyError {
    /// The HTTP client could not be built.
    Client(String),
    /// Transport failure or a non-2xx answer from the webhook.
    Delivery { status: Option<u16>, detail: String },
}

impl std::fmt::Display for NotifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotifyError::Client(msg) => write!(f, "Failed to build notification client: {msg}"),
            NotifyError::Delivery { .. } => write!(f, "Failed to deliver notification"),
        }
    }
}

impl std::error::Error for NotifyError {}

/// Pushes an accepted report to an external channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    fn id(&self) -> &str;
    async fn send(&self, report: &SanitizedSubmission) -> Result<(), NotifyError>;
}

/// Outcome of a notification attempt. Failure never fails the submission itself.
#[derive(Debug)]
pub enum Delivery {
    Delivered,
    /// No notifier is configured.
    Skipped,
    Failed(NotifyError),
}

pub async fn deliver(notifier: Option<&dyn Notifier>, report: &SanitizedSubmission) -> Delivery {
    let Some(notifier) = notifier else {
        return Delivery::Skipped;
    };

    match notifier.send(report).await {
        Ok(()) => Delivery::Delivered,
        Err(e) => Delivery::Failed(e),
    }
}
