//! Scheme normalization for website cells.

const HTTP: &str = "http://";
const HTTPS: &str = "https://";

/// True if `raw` starts with `http://` or `https://`, ignoring ASCII case.
pub fn has_http_scheme(raw: &str) -> bool {
    starts_with_ignore_case(raw, HTTP) || starts_with_ignore_case(raw, HTTPS)
}

/// Prefixes `http://` unless the value already carries an http(s) scheme.
///
/// Idempotent: `normalize_url(&normalize_url(x)) == normalize_url(x)`.
///
/// # Examples
///
/// - `normalize_url("example.com")` → `"http://example.com"`
/// - `normalize_url("HTTPS://Example.com")` → `"HTTPS://Example.com"`
pub fn normalize_url(raw: &str) -> String {
    if has_http_scheme(raw) {
        raw.to_string()
    } else {
        format!("{HTTP}{raw}")
    }
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len()
        && s.is_char_boundary(prefix.len())
        && s[..prefix.len()].eq_ignore_ascii_case(prefix)
}
