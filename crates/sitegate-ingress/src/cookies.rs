//! Minimal `Cookie` header handling
//!
//! Only cookie presence and cookie names are needed: the admin gate checks
//! that the session cookie is set, and a failed gate expires every cookie the
//! browser sent.

use axum::http::{HeaderMap, HeaderValue, header};

/// `(name, value)` pairs of every `Cookie` header, in order
fn cookie_pairs(headers: &HeaderMap) -> impl Iterator<Item = (&str, &str)> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            let name = name.trim();
            (!name.is_empty()).then(|| (name, value.trim().trim_matches('"')))
        })
}

/// Whether the request carries a non-empty cookie called `name`
pub fn has_cookie(headers: &HeaderMap, name: &str) -> bool {
    cookie_pairs(headers).any(|(n, v)| n == name && !v.is_empty())
}

/// Distinct cookie names of the request
pub fn cookie_names(headers: &HeaderMap) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for (name, _) in cookie_pairs(headers) {
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// `Set-Cookie` values that expire every cookie of the request
pub fn expire_all(headers: &HeaderMap) -> Vec<HeaderValue> {
    cookie_names(headers)
        .into_iter()
        .filter_map(|name| HeaderValue::from_str(&format!("{}=; Path=/; Max-Age=0", name)).ok())
        .collect()
}
