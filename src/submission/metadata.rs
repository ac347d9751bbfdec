use axum::http::HeaderMap;

/// Client identifier used when no address header is present.
pub const UNKNOWN_IP: &str = "unknown";

/// Resolve the client address from proxy headers.
///
/// Checked in order: `client-ip`, the first entry of `x-forwarded-for`, then the
/// platform's `x-nf-client-connection-ip`. These headers are client-controlled unless a
/// proxy overwrites them, so the result is only good enough for rate limiting.
pub fn client_ip(headers: &HeaderMap) -> String {
    header_str(headers, "client-ip")
        .or_else(|| {
            header_str(headers, "x-forwarded-for")
                .and_then(|xff| xff.split(',').next())
                .map(str::trim)
                .filter(|ip| !ip.is_empty())
        })
        .or_else(|| header_str(headers, "x-nf-client-connection-ip"))
        .unwrap_or(UNKNOWN_IP)
        .to_string()
}

pub fn user_agent(headers: &HeaderMap) -> Option<&str> {
    header_str(headers, "user-agent")
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
