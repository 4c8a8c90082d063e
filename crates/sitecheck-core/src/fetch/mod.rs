//! Site fetching over HTTP(S).
//!
//! One GET per site with a fixed browser user agent and a 10 s budget. A TLS
//! certificate verification failure earns exactly one more attempt with peer
//! and host checks disabled; every other failure is returned as-is.

mod classify;
mod decode;
mod error;
mod transport;

pub use classify::{classify, classify_curl_error, is_tls_verification_failure, FetchErrorKind};
pub use decode::decode_utf8_dropping_invalid;
pub use error::FetchError;
pub use transport::{CurlTransport, TlsMode, Transport, FETCH_TIMEOUT, USER_AGENT};

use std::sync::Arc;

/// Fetches page bodies as text, applying the single TLS fallback.
#[derive(Clone)]
pub struct SiteFetcher {
    transport: Arc<dyn Transport>,
}

impl SiteFetcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetcher backed by libcurl with the default timeout and user agent.
    pub fn curl() -> Self {
        Self::new(Arc::new(CurlTransport::default()))
    }

    /// GETs `url` and returns the body decoded as UTF-8 (invalid bytes dropped).
    ///
    /// Runs in the current thread; call from `spawn_blocking` if used from async code.
    pub fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let body = match self.transport.get(url, TlsMode::Verify) {
            Ok(body) => body,
            Err(e) if is_tls_verification_failure(&e) => {
                tracing::debug!(
                    %url,
                    "certificate verification failed ({e}); retrying without verification"
                );
                self.transport.get(url, TlsMode::Insecure)?
            }
            Err(e) => return Err(e),
        };
        Ok(decode_utf8_dropping_invalid(&body))
    }
}

impl Default for SiteFetcher {
    fn default() -> Self {
        Self::curl()
    }
}
