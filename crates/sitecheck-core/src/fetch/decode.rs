//! Body decoding.

/// Decodes `bytes` as UTF-8, silently dropping invalid sequences.
///
/// Unlike `String::from_utf8_lossy` nothing is substituted, so broken bytes
/// do not inflate the visible text length.
pub fn decode_utf8_dropping_invalid(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut rest = bytes;
    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                out.push_str(valid);
                return out;
            }
            Err(e) => {
                let (valid, after) = rest.split_at(e.valid_up_to());
                out.push_str(std::str::from_utf8(valid).unwrap_or_default());
                match e.error_len() {
                    Some(n) => rest = &after[n..],
                    None => return out,
                }
            }
        }
    }
}
