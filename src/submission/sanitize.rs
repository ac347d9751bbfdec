use serde_json::Value;

/// Upper bound, in characters, for any text field that leaves the service.
pub const MAX_FIELD_LENGTH: usize = 1000;

/// Trim, HTML-escape and cap a raw form value. Anything that is not a string becomes empty.
pub fn sanitize(input: &Value) -> String {
    match input.as_str() {
        Some(text) => sanitize_str(text),
        None => String::new(),
    }
}

pub fn sanitize_str(input: &str) -> String {
    escape_html(input.trim())
        .chars()
        .take(MAX_FIELD_LENGTH)
        .collect()
}

/// Replace characters that could open markup or break out of an attribute.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}
