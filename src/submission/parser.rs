use serde_json::{Map, Value};

use crate::models::SubmissionInput;

/// Parse a request body based on Content-Type header.
///
/// JSON is assumed when the header is missing or unknown. The top level must be an object.
pub fn parse_body(content_type: Option<&str>, body: &[u8]) -> Result<SubmissionInput, String> {
    let ct = content_type.unwrap_or("application/json");

    let value = if ct.contains("application/x-www-form-urlencoded") {
        parse_form_urlencoded(body)?
    } else {
        serde_json::from_slice(body).map_err(|e| format!("Invalid JSON: {e}"))?
    };

    if !value.is_object() {
        return Err("Body must be a JSON object".to_string());
    }

    serde_json::from_value(value).map_err(|e| format!("Invalid submission: {e}"))
}

fn parse_form_urlencoded(body: &[u8]) -> Result<Value, String> {
    let body_str = std::str::from_utf8(body).map_err(|e| format!("Invalid UTF-8: {e}"))?;

    let mut map = Map::new();
    for (k, v) in form_urlencoded::parse(body_str.as_bytes()) {
        map.insert(k.into_owned(), Value::String(v.into_owned()));
    }
    Ok(Value::Object(map))
}
