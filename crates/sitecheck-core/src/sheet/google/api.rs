//! Blocking JSON-over-HTTPS calls to Google APIs via curl.

use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::sheet::SheetError;

const API_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_ERROR_BODY: usize = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Method {
    Get,
    Post,
    Put,
}

/// Sends `body` as JSON with a bearer token and parses the JSON response.
pub(crate) fn send_json(
    method: Method,
    url: &Url,
    token: &str,
    body: Option<&Value>,
) -> Result<Value, SheetError> {
    let mut headers = vec![format!("Authorization: Bearer {token}")];
    let payload = match body {
        Some(v) => {
            headers.push("Content-Type: application/json".to_string());
            Some(serde_json::to_vec(v).map_err(|e| SheetError::Malformed(e.to_string()))?)
        }
        None => None,
    };
    let (code, bytes) = perform(method, url.as_str(), &headers, payload.as_deref())?;
    into_json(code, &bytes)
}

/// POSTs an `application/x-www-form-urlencoded` body (token endpoint).
pub(crate) fn send_form(url: &str, form: &str) -> Result<Value, SheetError> {
    let headers = ["Content-Type: application/x-www-form-urlencoded".to_string()];
    let (code, bytes) = perform(Method::Post, url, &headers, Some(form.as_bytes()))?;
    into_json(code, &bytes)
}

fn perform(
    method: Method,
    url: &str,
    headers: &[String],
    body: Option<&[u8]>,
) -> Result<(u32, Vec<u8>), SheetError> {
    let mut response: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.timeout(API_TIMEOUT)?;
    easy.useragent(concat!("sitecheck/", env!("CARGO_PKG_VERSION")))?;

    let mut list = curl::easy::List::new();
    for h in headers {
        list.append(h)?;
    }
    easy.http_headers(list)?;

    match method {
        Method::Get => easy.get(true)?,
        Method::Post => {
            easy.post(true)?;
            easy.post_fields_copy(body.unwrap_or(b"{}"))?;
        }
        Method::Put => {
            easy.custom_request("PUT")?;
            easy.post_fields_copy(body.unwrap_or(b"{}"))?;
        }
    }

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            response.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    Ok((code, response))
}

fn into_json(code: u32, bytes: &[u8]) -> Result<Value, SheetError> {
    if !(200..300).contains(&code) {
        return Err(SheetError::Api {
            status: code,
            message: error_message(bytes),
        });
    }
    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).map_err(|e| SheetError::Malformed(format!("response JSON: {e}")))
}

/// Best human-readable message from an error response body.
pub(crate) fn error_message(bytes: &[u8]) -> String {
    if let Ok(v) = serde_json::from_slice::<Value>(bytes) {
        // APIs nest it under error.message; the OAuth endpoint uses error_description.
        if let Some(m) = v.pointer("/error/message").and_then(Value::as_str) {
            return m.to_string();
        }
        if let Some(m) = v.get("error_description").and_then(Value::as_str) {
            return m.to_string();
        }
        if let Some(m) = v.get("error").and_then(Value::as_str) {
            return m.to_string();
        }
    }
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim();
    match text.char_indices().nth(MAX_ERROR_BODY) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
