use std::sync::LazyLock;

use regex::Regex;
use url::{Host, Url};

use crate::models::{FieldError, SubmissionInput};

use super::honeypot;

static DISCORD_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{17,20}$").unwrap());

/// `Name Surname | 289877`, Latin or Cyrillic letters.
static NAME_STATIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-zА-Яа-яёЁ\s]+\s\|\s[0-9]+$").unwrap());

static NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?([0-9]*[.])?[0-9]+$").unwrap());

pub const DEPARTMENTS: [&str; 9] = ["DEA", "CID", "IB", "AF", "NSB", "HRT", "FA", "GS", "HRB"];

pub const MIN_RANK: i64 = 1;
pub const MAX_RANK: i64 = 100;
pub const MIN_REASON_LENGTH: usize = 5;

/// Longest URL accepted for a screenshot link.
const MAX_URL_LENGTH: usize = 2083;

pub mod messages {
    pub const DISCORD_ID: &str = "Discord ID must contain 17-20 digits";
    pub const NAME_STATIC: &str = "Format: First Last | Number (e.g. Rick Valenkov | 289877)";
    pub const RANK_NOT_NUMERIC: &str = "Rank must be a number";
    pub const RANK_OUT_OF_RANGE: &str = "Rank must be between 1 and 100";
    pub const DEPARTMENT: &str = "Select a department from the list";
    pub const TABLET_SCREENSHOT: &str = "Enter a valid tablet screenshot URL";
    pub const INVENTORY_SCREENSHOT: &str = "Enter a valid inventory screenshot URL";
    pub const REASON: &str = "Resignation reason must be at least 5 characters";
    pub const SUSPICIOUS: &str = "Suspicious activity detected";
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: Vec<FieldError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_error_for(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    fn push(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError::new(field, message));
    }
}

/// Check every field of a report. Rules are independent, so all failures are reported at once.
pub fn validate(input: &SubmissionInput) -> ValidationResult {
    let mut result = ValidationResult::default();

    if !input.discord_id().is_some_and(|id| DISCORD_ID_RE.is_match(id)) {
        result.push("discordId", messages::DISCORD_ID);
    }

    if !input.name_static().is_some_and(|name| NAME_STATIC_RE.is_match(name)) {
        result.push("nameStatic", messages::NAME_STATIC);
    }

    match input.rank().filter(|rank| NUMERIC_RE.is_match(rank)) {
        None => result.push("rank", messages::RANK_NOT_NUMERIC),
        Some(rank) => {
            if !rank_value(rank).is_some_and(|n| (MIN_RANK..=MAX_RANK).contains(&n)) {
                result.push("rank", messages::RANK_OUT_OF_RANGE);
            }
        }
    }

    if !input.department().is_some_and(|d| DEPARTMENTS.contains(&d)) {
        result.push("department", messages::DEPARTMENT);
    }

    if !input.tablet_screenshot().is_some_and(is_valid_url) {
        result.push("tabletScreenshot", messages::TABLET_SCREENSHOT);
    }

    if !input.inventory_screenshot().is_some_and(is_valid_url) {
        result.push("inventoryScreenshot", messages::INVENTORY_SCREENSHOT);
    }

    if !input
        .reason()
        .is_some_and(|reason| reason.chars().count() >= MIN_REASON_LENGTH)
    {
        result.push("reason", messages::REASON);
    }

    if honeypot::is_filled(&input.website) {
        result.push("general", messages::SUSPICIOUS);
    }

    result
}

/// Integer part of an already numeric string, e.g. `"+7.9"` -> 7. `None` when there are no
/// integer digits (`".5"`) or the value does not fit.
fn rank_value(rank: &str) -> Option<i64> {
    let int_part = rank.split('.').next()?;
    let negative = int_part.starts_with('-');
    let digits = int_part.trim_start_matches(['+', '-']);
    if digits.is_empty() {
        return None;
    }
    let n: i64 = digits.parse().ok()?;
    Some(if negative { -n } else { n })
}

/// An absolute http(s) URL with an explicit scheme, a real host and no embedded credentials.
pub fn is_valid_url(raw: &str) -> bool {
    if raw.is_empty() || raw.len() > MAX_URL_LENGTH || raw.chars().any(char::is_whitespace) {
        return false;
    }

    let lower = raw.to_ascii_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return false;
    }

    let Ok(url) = Url::parse(raw) else {
        return false;
    };

    if !url.username().is_empty() || url.password().is_some() {
        return false;
    }

    match url.host() {
        Some(Host::Domain(domain)) => has_tld(domain),
        Some(Host::Ipv4(_)) => is_dotted_quad(raw_host(raw)),
        Some(Host::Ipv6(_)) => true,
        None => false,
    }
}

/// Host as written, before the parser normalises shorthand forms like `12345` or `0x7f.1`.
fn raw_host(raw: &str) -> &str {
    let rest = raw.split_once("://").map_or(raw, |(_, rest)| rest);
    let authority = rest.split(['/', '\\', '?', '#']).next().unwrap_or(rest);
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    host_port.rsplit_once(':').map_or(host_port, |(host, _)| host)
}

/// Four decimal octets, 0-255, without leading zeros.
fn is_dotted_quad(host: &str) -> bool {
    let octets: Vec<&str> = host.split('.').collect();
    octets.len() == 4
        && octets.iter().all(|octet| {
            !octet.is_empty()
                && octet.len() <= 3
                && octet.bytes().all(|b| b.is_ascii_digit())
                && (*octet == "0" || !octet.starts_with('0'))
                && octet.parse::<u16>().is_ok_and(|n| n <= 255)
        })
}

fn has_tld(domain: &str) -> bool {
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    let Some((name, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    if name.is_empty() || !domain.split('.').all(is_valid_label) {
        return false;
    }
    tld.starts_with("xn--") || (tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty() && !label.contains('_') && !label.starts_with('-') && !label.ends_with('-')
}
