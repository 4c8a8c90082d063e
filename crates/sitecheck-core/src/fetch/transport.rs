//! Raw GET transport. The trait is the seam between fetch policy and libcurl.

use super::FetchError;
use std::time::Duration;

/// Generic browser user agent sent with every site fetch.
pub const USER_AGENT: &str = "Mozilla/5.0";

/// Budget for one fetch attempt (connect + transfer).
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

const MAX_REDIRECTS: u32 = 10;

/// Whether certificate verification is enforced for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    Verify,
    /// Peer chain and host name checks both disabled.
    Insecure,
}

/// A blocking HTTP GET returning the raw body of a 2xx response.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str, tls: TlsMode) -> Result<Vec<u8>, FetchError>;
}

/// libcurl-backed transport (one Easy handle per request).
#[derive(Debug, Clone)]
pub struct CurlTransport {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self {
            timeout: FETCH_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl Transport for CurlTransport {
    fn get(&self, url: &str, tls: TlsMode) -> Result<Vec<u8>, FetchError> {
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.useragent(&self.user_agent)?;
        easy.follow_location(true)?;
        easy.max_redirections(MAX_REDIRECTS)?;
        easy.timeout(self.timeout)?;
        if tls == TlsMode::Insecure {
            easy.ssl_verify_peer(false)?;
            easy.ssl_verify_host(false)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(FetchError::Http(code));
        }
        Ok(body)
    }
}
