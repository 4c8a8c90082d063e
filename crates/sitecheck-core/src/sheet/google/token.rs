//! OAuth2 JWT-bearer grant for service accounts, with an in-process token cache.

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use super::api;
use super::credentials::ServiceAccountKey;
use crate::sheet::SheetError;

/// Scopes for reading/writing sheets and finding spreadsheets by name.
pub(crate) const SCOPES: &str =
    "https://www.googleapis.com/auth/spreadsheets https://www.googleapis.com/auth/drive";

const ASSERTION_LIFETIME_SECS: u64 = 3600;
/// Refresh this long before the provider's stated expiry.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    ASSERTION_LIFETIME_SECS
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// Hands out bearer tokens, exchanging a fresh signed assertion when needed.
pub(crate) struct TokenSource {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenSource {
    /// Fails early if the private key is not a usable RSA PEM.
    pub(crate) fn new(key: ServiceAccountKey) -> Result<Self, SheetError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| SheetError::Credentials(format!("private_key: {e}")))?;
        Ok(Self {
            key,
            encoding_key,
            cached: Mutex::new(None),
        })
    }

    pub(crate) fn client_email(&self) -> &str {
        &self.key.client_email
    }

    /// Current access token; exchanges a new one if none is cached or it is near expiry.
    pub(crate) fn access_token(&self) -> Result<String, SheetError> {
        let mut cached = self
            .cached
            .lock()
            .map_err(|_| SheetError::Auth("token cache lock poisoned".to_string()))?;
        if let Some(t) = cached.as_ref() {
            if Instant::now() + EXPIRY_MARGIN < t.expires_at {
                return Ok(t.value.clone());
            }
        }

        let assertion = self.sign_assertion(unix_now())?;
        let form = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", JWT_BEARER_GRANT)
            .append_pair("assertion", &assertion)
            .finish();
        let json = api::send_form(&self.key.token_uri, &form).map_err(|e| match e {
            SheetError::Api { status, message } => {
                SheetError::Auth(format!("token endpoint returned HTTP {status}: {message}"))
            }
            other => other,
        })?;
        let resp: TokenResponse = serde_json::from_value(json)
            .map_err(|e| SheetError::Auth(format!("token response: {e}")))?;

        tracing::debug!(
            client = %self.key.client_email,
            expires_in = resp.expires_in,
            "obtained access token"
        );
        let value = resp.access_token.clone();
        *cached = Some(CachedToken {
            value: resp.access_token,
            expires_at: Instant::now() + Duration::from_secs(resp.expires_in),
        });
        Ok(value)
    }

    fn sign_assertion(&self, now: u64) -> Result<String, SheetError> {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();
        let claims = Claims {
            iss: &self.key.client_email,
            scope: SCOPES,
            aud: &self.key.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };
        jsonwebtoken::encode(&header, &claims, &self.encoding_key)
            .map_err(|e| SheetError::Credentials(format!("sign assertion: {e}")))
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
