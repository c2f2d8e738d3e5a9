//! Submitter IP resolution from proxy headers.
//!
//! Precedence: `CF-Connecting-IP`, then the first hop of `X-Forwarded-For`,
//! then `X-Real-IP`. If none carries a value the submitter is unknown.

use axum::http::HeaderMap;
use guestbook_types::Submitter;

pub const CF_CONNECTING_IP: &str = "cf-connecting-ip";
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";
pub const X_REAL_IP: &str = "x-real-ip";

pub fn resolve_ip(headers: &HeaderMap) -> Option<String> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    header(CF_CONNECTING_IP)
        .or_else(|| {
            header(X_FORWARDED_FOR)
                .and_then(|list| list.split(',').next())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        })
        .or_else(|| header(X_REAL_IP))
        .map(str::to_owned)
}

pub fn submitter(headers: &HeaderMap) -> Submitter {
    Submitter {
        ip: resolve_ip(headers),
    }
}
