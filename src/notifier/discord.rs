use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::models::SanitizedSubmission;

use super::{Notifier, NotifyError};

pub const EMBED_COLOR: u32 = 15_158_332;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const USERNAME: &str = "FIB Resignation System";
const TITLE: &str = "📄 NEW RESIGNATION REPORT";
const FOOTER: &str = "Federal Investigation Bureau • Resignation System";
const LOGO_URL: &str = "https://i.imgur.com/7VEXVT1.png";

/// Characters of the user agent shown in the technical info block.
const USER_AGENT_PREVIEW: usize = 50;

/// Posts reports to a Discord channel webhook as a rich embed.
pub struct DiscordNotifier {
    client: reqwest::Client,
    webhook_url: String,
}

impl DiscordNotifier {
    pub fn new(webhook_url: impl Into<String>, timeout: Duration) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::Client(e.to_string()))?;

        Ok(Self {
            client,
            webhook_url: webhook_url.into(),
        })
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    fn id(&self) -> &str {
        "discord"
    }

    async fn send(&self, report: &SanitizedSubmission) -> Result<(), NotifyError> {
        let resp = self
            .client
            .post(&self.webhook_url)
            .json(&build_payload(report))
            .send()
            .await
            .map_err(|e| NotifyError::Delivery {
                status: None,
                detail: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(1024)
                .collect::<String>();
            return Err(NotifyError::Delivery {
                status: Some(status.as_u16()),
                detail: body,
            });
        }

        tracing::debug!(status = status.as_u16(), "Discord webhook accepted notification");
        Ok(())
    }
}

/// Webhook body: mention plus a single embed describing the report.
pub fn build_payload(report: &SanitizedSubmission) -> Value {
    let user_agent: String = report.user_agent.chars().take(USER_AGENT_PREVIEW).collect();

    let embed = json!({
        "title": TITLE,
        "color": EMBED_COLOR,
        "timestamp": report.timestamp,
        "footer": { "text": FOOTER, "icon_url": LOGO_URL },
        "thumbnail": { "url": LOGO_URL },
        "fields": [
            field("👤 EMPLOYEE", code_block(&report.name_static), true),
            field("🎯 DEPARTMENT", code_block(&report.department), true),
            field("⭐ RANK", code_block(&report.rank), true),
            field("🆔 DISCORD ID", code_block(&report.discord_id), false),
            field("📝 REASON FOR RESIGNATION", code_block(&report.reason), false),
            field(
                "🔗 SCREENSHOT LINKS",
                format!(
                    "**Tablet:** {}\n**Inventory:** {}",
                    report.tablet_screenshot, report.inventory_screenshot
                ),
                false,
            ),
            field(
                "🌐 TECHNICAL INFO",
                format!(
                    "**IP:** ||{}||\n**Fill time:** {}ms\n**User Agent:** {user_agent}...",
                    report.client_ip, report.fill_time
                ),
                false,
            ),
        ],
    });

    json!({
        "embeds": [embed],
        "username": USERNAME,
        "avatar_url": LOGO_URL,
        "content": format!("@here New resignation report from **{}**!", report.name_static),
    })
}

fn field(name: &str, value: String, inline: bool) -> Value {
    json!({ "name": name, "value": value, "inline": inline })
}

fn code_block(value: &str) -> String {
    format!("```{value}```")
}
