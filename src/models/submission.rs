use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A resignation report exactly as the client sent it.
///
/// Every field is kept as a raw JSON value: the form is untrusted and any field may be
/// missing or carry the wrong type. Text accessors return `None` for anything that is not
/// a JSON string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubmissionInput {
    pub discord_id: Value,
    pub name_static: Value,
    pub rank: Value,
    pub department: Value,
    pub tablet_screenshot: Value,
    pub inventory_screenshot: Value,
    pub reason: Value,
    /// Milliseconds the visitor spent filling the form, measured client-side.
    pub fill_time: Value,
    /// Honeypot. Hidden from humans, so it should always arrive empty.
    pub website: Value,
}

impl SubmissionInput {
    pub fn discord_id(&self) -> Option<&str> {
        self.discord_id.as_str()
    }

    pub fn name_static(&self) -> Option<&str> {
        self.name_static.as_str()
    }

    pub fn rank(&self) -> Option<&str> {
        self.rank.as_str()
    }

    pub fn department(&self) -> Option<&str> {
        self.department.as_str()
    }

    pub fn tablet_screenshot(&self) -> Option<&str> {
        self.tablet_screenshot.as_str()
    }

    pub fn inventory_screenshot(&self) -> Option<&str> {
        self.inventory_screenshot.as_str()
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_str()
    }

    /// Fill time in milliseconds. Accepts JSON numbers and numeric strings (form posts).
    pub fn fill_time_ms(&self) -> Option<f64> {
        match &self.fill_time {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|ms| ms.is_finite()),
            _ => None,
        }
    }
}

/// A report that passed screening, with every text field escaped and capped.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedSubmission {
    pub discord_id: String,
    pub name_static: String,
    pub rank: String,
    pub department: String,
    pub tablet_screenshot: String,
    pub inventory_screenshot: String,
    pub reason: String,
    pub client_ip: String,
    pub user_agent: String,
    /// RFC 3339 time the report was accepted.
    pub timestamp: String,
    pub fill_time: u64,
}
