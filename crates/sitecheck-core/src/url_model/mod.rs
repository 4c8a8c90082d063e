//! URL modeling for sheet input.
//!
//! Sheet cells hold whatever the user typed ("example.com", "HTTPS://x.io/").
//! Nothing is rejected here; malformed input is left to fail at fetch time.

mod normalize;

pub use normalize::{has_http_scheme, normalize_url};
