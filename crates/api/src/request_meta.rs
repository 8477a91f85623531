//! Coarse requester attributes recorded alongside downloads and events.

use axum::http::HeaderMap;

/// User agent, first-hop IP, and referrer as received. Attribution data
/// only; nothing here feeds an authorization decision.
#[derive(Debug, Clone, Default)]
pub struct RequestMeta {
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub referer: Option<String>,
}

/// Extract requester attributes from request headers.
///
/// `x-forwarded-for` may carry a comma-separated chain; only the first hop
/// is kept. Falls back to `x-real-ip`.
pub fn request_meta(headers: &HeaderMap) -> RequestMeta {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let ip_address = header("x-forwarded-for")
        .map(|chain| {
            chain
                .split(',')
                .next()
                .unwrap_or_default()
                .trim()
                .to_string()
        })
        .filter(|ip| !ip.is_empty())
        .or_else(|| header("x-real-ip"));

    RequestMeta {
        user_agent: header("user-agent"),
        ip_address,
        referer: header("referer"),
    }
}
