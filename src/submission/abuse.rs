//! Heuristics for automated or hostile submissions.
//!
//! Each rule is a separate predicate so it can be checked on its own; [`is_suspicious`] is
//! their logical OR. This is a coarse screen in front of the validator, not a security
//! boundary: false positives and false negatives are expected.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::SubmissionInput;

/// Anything faster than this is assumed to be scripted.
pub const MIN_FILL_TIME_MS: f64 = 10_000.0;
pub const MIN_USER_AGENT_LENGTH: usize = 20;
pub const MAX_REASON_LENGTH: usize = 1000;
pub const MAX_NAME_LENGTH: usize = 100;

/// Word boundaries are ASCII-only: a keyword glued to Cyrillic text still counts as a word.
static SQL_KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^A-Za-z0-9_])(?i:SELECT|INSERT|UPDATE|DELETE|DROP|UNION|EXEC)(?:[^A-Za-z0-9_]|$)")
        .unwrap()
});

pub fn is_suspicious(input: &SubmissionInput, user_agent: Option<&str>) -> bool {
    filled_too_fast(input.fill_time_ms())
        || suspicious_user_agent(user_agent)
        || reason_too_long(input.reason())
        || name_too_long(input.name_static())
        || contains_sql_keyword(input.reason())
        || contains_sql_keyword(input.name_static())
}

/// A fill time of zero means the client did not measure it and is not checked.
pub fn filled_too_fast(fill_time_ms: Option<f64>) -> bool {
    fill_time_ms.is_some_and(|ms| ms != 0.0 && ms < MIN_FILL_TIME_MS)
}

pub fn suspicious_user_agent(user_agent: Option<&str>) -> bool {
    let Some(ua) = user_agent else {
        return true;
    };
    let lower = ua.to_lowercase();
    ua.chars().count() < MIN_USER_AGENT_LENGTH || lower.contains("bot") || lower.contains("crawler")
}

pub fn reason_too_long(reason: Option<&str>) -> bool {
    reason.is_some_and(|r| r.chars().count() > MAX_REASON_LENGTH)
}

pub fn name_too_long(name: Option<&str>) -> bool {
    name.is_some_and(|n| n.chars().count() > MAX_NAME_LENGTH)
}

pub fn contains_sql_keyword(text: Option<&str>) -> bool {
    text.is_some_and(|t| SQL_KEYWORD_RE.is_match(t))
}
