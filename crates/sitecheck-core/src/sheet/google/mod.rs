//! Google Sheets implementation of [`SheetStore`].
//!
//! The spreadsheet is located by title through the Drive API, the tab by its
//! position. Every call is a blocking curl request; run from `spawn_blocking`
//! when used in async code.

mod api;
mod credentials;
mod token;
mod values;

pub use credentials::ServiceAccountKey;

use serde_json::json;
use std::sync::Mutex;
use url::Url;

use self::api::Method;
use self::token::TokenSource;
use super::{SheetError, SheetStore, Table};
use crate::config::SitecheckConfig;

const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
const SHEETS_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Base URLs of the two APIs used. Defaults to Google's public endpoints;
/// override for a private endpoint or a local stand-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Drive v3 `files` collection.
    pub drive_files: String,
    /// Sheets v4 `spreadsheets` collection.
    pub sheets: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            drive_files: DRIVE_FILES_URL.to_string(),
            sheets: SHEETS_URL.to_string(),
        }
    }
}
const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";

/// A resolved tab: spreadsheet id plus the tab title used in A1 ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Worksheet {
    spreadsheet_id: String,
    title: String,
}

/// Handle to one tab of one spreadsheet, authenticated as a service account.
pub struct GoogleSheets {
    tokens: TokenSource,
    spreadsheet_name: String,
    worksheet_index: u32,
    endpoints: Endpoints,
    resolved: Mutex<Option<Worksheet>>,
}

impl GoogleSheets {
    pub fn new(
        key: ServiceAccountKey,
        spreadsheet_name: impl Into<String>,
        worksheet_index: u32,
    ) -> Result<Self, SheetError> {
        Ok(Self {
            tokens: TokenSource::new(key)?,
            spreadsheet_name: spreadsheet_name.into(),
            worksheet_index,
            endpoints: Endpoints::default(),
            resolved: Mutex::new(None),
        })
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Reads credentials from the configured environment variable.
    pub fn from_config(cfg: &SitecheckConfig) -> Result<Self, SheetError> {
        let key = ServiceAccountKey::from_env(&cfg.credentials_env)?;
        Self::new(key, cfg.spreadsheet_name.clone(), cfg.worksheet_index)
    }

    /// Explicit initialization: obtains a token and locates the tab, so bad
    /// credentials or a missing spreadsheet surface at startup.
    pub fn connect(&self) -> Result<(), SheetError> {
        let ws = self.locate()?;
        tracing::info!(
            client = %self.tokens.client_email(),
            spreadsheet = %self.spreadsheet_name,
            tab = %ws.title,
            "connected to spreadsheet"
        );
        Ok(())
    }

    pub fn spreadsheet_name(&self) -> &str {
        &self.spreadsheet_name
    }

    /// Looks the tab up again and remembers it for subsequent clear/write calls.
    fn locate(&self) -> Result<Worksheet, SheetError> {
        let token = self.tokens.access_token()?;
        let spreadsheet_id = self.find_spreadsheet_id(&token)?;
        let title = self.find_tab_title(&token, &spreadsheet_id)?;
        let ws = Worksheet {
            spreadsheet_id,
            title,
        };
        if let Ok(mut slot) = self.resolved.lock() {
            *slot = Some(ws.clone());
        }
        Ok(ws)
    }

    fn worksheet(&self) -> Result<Worksheet, SheetError> {
        let cached = self.resolved.lock().ok().and_then(|slot| slot.clone());
        match cached {
            Some(ws) => Ok(ws),
            None => self.locate(),
        }
    }

    fn find_spreadsheet_id(&self, token: &str) -> Result<String, SheetError> {
        let url = drive_search_url(&self.endpoints.drive_files, &self.spreadsheet_name)?;
        let json = api::send_json(Method::Get, &url, token, None)?;
        values::first_file_id(&json).ok_or_else(|| SheetError::NotFound {
            name: self.spreadsheet_name.clone(),
        })
    }

    fn find_tab_title(&self, token: &str, spreadsheet_id: &str) -> Result<String, SheetError> {
        let mut url = sheets_url(&self.endpoints.sheets, &[spreadsheet_id])?;
        url.query_pairs_mut()
            .append_pair("fields", "sheets.properties(sheetId,title,index)");
        let json = api::send_json(Method::Get, &url, token, None)?;
        values::tab_title_at(&json, self.worksheet_index).ok_or_else(|| {
            SheetError::Malformed(format!(
                "spreadsheet '{}' has no tab at index {}",
                self.spreadsheet_name, self.worksheet_index
            ))
        })
    }

    fn values_url(&self, ws: &Worksheet, range: &str) -> Result<Url, SheetError> {
        sheets_url(
            &self.endpoints.sheets,
            &[ws.spreadsheet_id.as_str(), "values", range],
        )
    }
}

impl SheetStore for GoogleSheets {
    fn read_table(&self) -> Result<Table, SheetError> {
        // Re-resolve on every read so renamed/recreated spreadsheets are picked up per run.
        let ws = self.locate()?;
        let token = self.tokens.access_token()?;
        let range = values::quote_tab(&ws.title);
        let mut url = self.values_url(&ws, &range)?;
        url.query_pairs_mut()
            .append_pair("majorDimension", "ROWS")
            .append_pair("valueRenderOption", "FORMATTED_VALUE");
        let json = api::send_json(Method::Get, &url, &token, None)?;
        Table::from_values(values::parse_value_range(&json)?)
    }

    fn clear(&self) -> Result<(), SheetError> {
        let ws = self.worksheet()?;
        let token = self.tokens.access_token()?;
        let target = format!("{}:clear", values::quote_tab(&ws.title));
        let url = self.values_url(&ws, &target)?;
        api::send_json(Method::Post, &url, &token, Some(&json!({})))?;
        Ok(())
    }

    fn write_table(&self, table: &Table) -> Result<(), SheetError> {
        let ws = self.worksheet()?;
        let token = self.tokens.access_token()?;
        let range = format!("{}!A1", values::quote_tab(&ws.title));
        let mut url = self.values_url(&ws, &range)?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");
        let body = json!({
            "range": range,
            "majorDimension": "ROWS",
            "values": values::rows_to_json(&table.to_values()),
        });
        api::send_json(Method::Put, &url, &token, Some(&body))?;
        Ok(())
    }
}

fn drive_search_url(base: &str, spreadsheet_name: &str) -> Result<Url, SheetError> {
    let q = format!(
        "name = '{}' and mimeType = '{}' and trashed = false",
        values::escape_query_literal(spreadsheet_name),
        SPREADSHEET_MIME
    );
    Url::parse_with_params(
        base,
        &[
            ("q", q.as_str()),
            ("fields", "files(id,name)"),
            ("pageSize", "1"),
            ("supportsAllDrives", "true"),
            ("includeItemsFromAllDrives", "true"),
        ],
    )
    .map_err(|e| SheetError::Malformed(format!("drive URL: {e}")))
}

/// `base` with each entry appended as one percent-encoded path segment.
fn sheets_url(base: &str, segments: &[&str]) -> Result<Url, SheetError> {
    let mut url =
        Url::parse(base).map_err(|e| SheetError::Malformed(format!("sheets URL: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| SheetError::Malformed("sheets URL cannot be a base".to_string()))?
        .extend(segments);
    Ok(url)
}
