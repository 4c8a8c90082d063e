//! Service-account key loaded from process configuration.

use serde::Deserialize;
use std::fmt;

use crate::sheet::SheetError;

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// The subset of a Google service-account JSON key needed for the JWT grant.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl ServiceAccountKey {
    /// Parses the JSON blob. Literal `\n` sequences in `private_key` (common when
    /// the key went through a single-line environment variable) become newlines.
    pub fn from_json(blob: &str) -> Result<Self, SheetError> {
        let mut key: ServiceAccountKey = serde_json::from_str(blob)
            .map_err(|e| SheetError::Credentials(format!("invalid service-account JSON: {e}")))?;
        key.private_key = key.private_key.replace("\\n", "\n");
        if key.client_email.trim().is_empty() {
            return Err(SheetError::Credentials("client_email is empty".to_string()));
        }
        if !key.private_key.contains("PRIVATE KEY") {
            return Err(SheetError::Credentials(
                "private_key is not a PEM block".to_string(),
            ));
        }
        Ok(key)
    }

    /// Reads and parses the blob from environment variable `var`.
    pub fn from_env(var: &str) -> Result<Self, SheetError> {
        let blob = std::env::var(var).map_err(|_| {
            SheetError::Credentials(format!("environment variable {var} is not set"))
        })?;
        Self::from_json(&blob)
    }
}
