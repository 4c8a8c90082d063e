//! Classify fetch failures; only certificate verification earns a retry.

use super::FetchError;

/// Coarse kind of a fetch failure, used for the TLS fallback and for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Server certificate chain or hostname did not verify.
    TlsVerification,
    /// Any other TLS handshake problem.
    Tls,
    /// Operation exceeded the fetch timeout.
    Timeout,
    /// Host name could not be resolved.
    Resolve,
    /// Connection refused, reset, or dropped mid-transfer.
    Connection,
    /// Non-2xx HTTP status.
    Http(u32),
    /// Anything else (malformed URL, too many redirects, ...).
    Other,
}

/// Classify a curl error.
pub fn classify_curl_error(e: &curl::Error) -> FetchErrorKind {
    if e.is_peer_failed_verification() || e.is_ssl_cacert() {
        return FetchErrorKind::TlsVerification;
    }
    if e.is_ssl_connect_error() || e.is_ssl_certproblem() || e.is_ssl_cipher() {
        return FetchErrorKind::Tls;
    }
    if e.is_operation_timedout() {
        return FetchErrorKind::Timeout;
    }
    if e.is_couldnt_resolve_host() || e.is_couldnt_resolve_proxy() {
        return FetchErrorKind::Resolve;
    }
    if e.is_couldnt_connect()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return FetchErrorKind::Connection;
    }
    FetchErrorKind::Other
}

/// Classify a fetch error (curl or HTTP) into a FetchErrorKind.
pub fn classify(e: &FetchError) -> FetchErrorKind {
    match e {
        FetchError::Curl(ce) => classify_curl_error(ce),
        FetchError::Http(code) => FetchErrorKind::Http(*code),
    }
}

/// True only for certificate verification failures.
pub fn is_tls_verification_failure(e: &FetchError) -> bool {
    classify(e) == FetchErrorKind::TlsVerification
}
