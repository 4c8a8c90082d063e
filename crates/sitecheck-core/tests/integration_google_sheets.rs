//! Integration test: Google Sheets store against a local stand-in for the
//! token, Drive and Sheets endpoints.

mod common;

use std::sync::Arc;

use common::page_server::{self, Page, PageServer, Recorded};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use serde_json::{json, Value};
use sitecheck_core::fetch::SiteFetcher;
use sitecheck_core::sheet::{
    Cell, Endpoints, GoogleSheets, ServiceAccountKey, SheetError, SheetStore,
};
use sitecheck_core::sync::SheetSynchronizer;

const PRIVATE_KEY: &str = include_str!("fixtures/service_account_key.pem");
const PUBLIC_KEY: &str = include_str!("fixtures/service_account_key.pub.pem");
const CLIENT_EMAIL: &str = "checker@sites-proj.iam.gserviceaccount.com";
const SHEET_ID: &str = "sheet-1";
const VALUES_PATH: &str = "/v4/spreadsheets/sheet-1/values/'Sites'";

#[derive(Debug, Deserialize)]
struct AssertionClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: u64,
    exp: u64,
}

fn token_page(expires_in: u64) -> Page {
    Page::json(
        200,
        &json!({"access_token": "tok-1", "expires_in": expires_in, "token_type": "Bearer"}),
    )
}

fn api_pages(token: Page, rows: Value) -> Vec<(&'static str, Page)> {
    vec![
        ("/token", token),
        (
            "/drive/v3/files",
            Page::json(
                200,
                &json!({"files": [{"id": SHEET_ID, "name": "Website Status Check"}]}),
            ),
        ),
        (
            "/v4/spreadsheets/sheet-1",
            Page::json(
                200,
                &json!({"sheets": [
                    {"properties": {"sheetId": 0, "title": "Sites", "index": 0}},
                    {"properties": {"sheetId": 9, "title": "Archive", "index": 1}}
                ]}),
            ),
        ),
        (
            VALUES_PATH,
            Page::json(
                200,
                &json!({"range": "Sites!A1:C3", "majorDimension": "ROWS", "values": rows}),
            ),
        ),
        (
            "/v4/spreadsheets/sheet-1/values/'Sites':clear",
            Page::json(
                200,
                &json!({"spreadsheetId": SHEET_ID, "clearedRange": "Sites!A1:Z1000"}),
            ),
        ),
        (
            "/v4/spreadsheets/sheet-1/values/'Sites'!A1",
            Page::json(200, &json!({"spreadsheetId": SHEET_ID, "updatedRows": 2})),
        ),
    ]
}

fn sheets_for(server: &PageServer) -> GoogleSheets {
    let blob = json!({
        "type": "service_account",
        "client_email": CLIENT_EMAIL,
        "private_key_id": "key-7",
        "private_key": PRIVATE_KEY,
        "token_uri": server.url("/token"),
    })
    .to_string();
    let key = ServiceAccountKey::from_json(&blob).unwrap();
    GoogleSheets::new(key, "Website Status Check", 0)
        .unwrap()
        .with_endpoints(Endpoints {
            drive_files: server.url("/drive/v3/files"),
            sheets: server.url("/v4/spreadsheets"),
        })
}

fn requests_to(server: &PageServer, path: &str) -> Vec<Recorded> {
    server
        .requests()
        .into_iter()
        .filter(|r| r.path() == path)
        .collect()
}

#[test]
fn read_clear_write_follow_the_api_contract() {
    let server = page_server::start(api_pages(
        token_page(3600),
        json!([["Company", "Website", "Employees"], ["Acme", "acme.test", "12"]]),
    ));
    let sheets = sheets_for(&server);

    let table = sheets.read_table().unwrap();
    assert_eq!(table.header(), ["Company", "Website", "Employees"]);
    assert_eq!(table.rows()[0][1], "acme.test");
    assert_eq!(table.rows()[0][2], Cell::from(12));

    sheets.clear().unwrap();
    sheets.write_table(&table).unwrap();

    // Token exchange: one jwt-bearer grant, reused for every later call.
    let grants = requests_to(&server, "/token");
    assert_eq!(grants.len(), 1);
    let grant = &grants[0];
    assert_eq!(grant.method, "POST");
    assert_eq!(
        grant.form("grant_type").as_deref(),
        Some("urn:ietf:params:oauth:grant-type:jwt-bearer")
    );
    let assertion = grant.form("assertion").unwrap();
    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[server.url("/token")]);
    let decoded = jsonwebtoken::decode::<AssertionClaims>(
        &assertion,
        &DecodingKey::from_rsa_pem(PUBLIC_KEY.as_bytes()).unwrap(),
        &validation,
    )
    .unwrap();
    assert_eq!(decoded.header.kid.as_deref(), Some("key-7"));
    assert_eq!(decoded.claims.iss, CLIENT_EMAIL);
    assert_eq!(decoded.claims.aud, server.url("/token"));
    assert_eq!(decoded.claims.exp - decoded.claims.iat, 3600);
    assert!(decoded.claims.scope.contains("auth/spreadsheets"));
    assert!(decoded.claims.scope.contains("auth/drive"));

    // Drive lookup by exact spreadsheet name.
    let drive = &requests_to(&server, "/drive/v3/files")[0];
    assert_eq!(drive.method, "GET");
    assert_eq!(drive.header("authorization"), Some("Bearer tok-1"));
    let q = drive.query("q").unwrap();
    assert!(q.contains("name = 'Website Status Check'"), "{q}");
    assert!(q.contains("mimeType = 'application/vnd.google-apps.spreadsheet'"), "{q}");
    assert!(q.contains("trashed = false"), "{q}");

    // Tab metadata, then the value read.
    let meta = &requests_to(&server, "/v4/spreadsheets/sheet-1")[0];
    assert!(meta.query("fields").unwrap().contains("sheets.properties"));
    let read = &requests_to(&server, VALUES_PATH)[0];
    assert_eq!(read.method, "GET");
    assert_eq!(read.query("majorDimension").as_deref(), Some("ROWS"));

    // Clear reuses the located tab without another lookup.
    let clear = &requests_to(&server, "/v4/spreadsheets/sheet-1/values/'Sites':clear")[0];
    assert_eq!(clear.method, "POST");
    assert_eq!(clear.header("authorization"), Some("Bearer tok-1"));
    assert_eq!(requests_to(&server, "/drive/v3/files").len(), 1);

    // Write: values.update at A1 with RAW input; numbers stay numbers.
    let write = &requests_to(&server, "/v4/spreadsheets/sheet-1/values/'Sites'!A1")[0];
    assert_eq!(write.method, "PUT");
    assert_eq!(write.query("valueInputOption").as_deref(), Some("RAW"));
    assert_eq!(write.header("content-type"), Some("application/json"));
    let body: Value = serde_json::from_str(&write.body).unwrap();
    assert_eq!(body["majorDimension"], "ROWS");
    assert_eq!(
        body["values"],
        json!([["Company", "Website", "Employees"], ["Acme", "acme.test", 12]])
    );
}

#[test]
fn token_near_expiry_is_exchanged_again() {
    let server = page_server::start(api_pages(token_page(30), json!([["Website"]])));
    let sheets = sheets_for(&server);

    sheets.connect().unwrap();
    sheets.clear().unwrap();
    assert_eq!(requests_to(&server, "/token").len(), 2);
}

#[test]
fn rejected_grant_is_an_auth_error() {
    let server = page_server::start(api_pages(
        Page::json(
            400,
            &json!({"error": "invalid_grant", "error_description": "Invalid JWT Signature."}),
        ),
        json!([]),
    ));
    match sheets_for(&server).read_table() {
        Err(SheetError::Auth(msg)) => {
            assert!(msg.contains("HTTP 400"), "{msg}");
            assert!(msg.contains("Invalid JWT Signature."), "{msg}");
        }
        other => panic!("expected auth error, got {other:?}"),
    }
    assert!(requests_to(&server, "/drive/v3/files").is_empty());
}

#[test]
fn unknown_spreadsheet_is_not_found() {
    let mut pages = api_pages(token_page(3600), json!([]));
    pages[1] = ("/drive/v3/files", Page::json(200, &json!({"files": []})));
    let server = page_server::start(pages);

    match sheets_for(&server).read_table() {
        Err(SheetError::NotFound { name }) => assert_eq!(name, "Website Status Check"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn full_run_writes_verdicts_through_the_api() {
    let site_server = page_server::start(vec![(
        "/parked",
        Page::html("<html><title>Domain For Sale</title></html>"),
    )]);
    let site = format!("{}/parked", site_server.authority);
    let server = page_server::start(api_pages(
        token_page(3600),
        json!([["Website", "Employees"], [site.clone(), "40"]]),
    ));

    let sheets = Arc::new(sheets_for(&server));
    let report = SheetSynchronizer::new(sheets, SiteFetcher::curl())
        .run()
        .await
        .unwrap();
    assert_eq!(report.rows, 1);
    assert_eq!(report.no, 1);

    let clears = requests_to(&server, "/v4/spreadsheets/sheet-1/values/'Sites':clear");
    assert_eq!(clears.len(), 1);
    let write = &requests_to(&server, "/v4/spreadsheets/sheet-1/values/'Sites'!A1")[0];
    let body: Value = serde_json::from_str(&write.body).unwrap();
    assert_eq!(
        body["values"],
        json!([
            ["Website", "Yes/No", "Explanation", "Employees"],
            [format!("http://{site}"), "no", "placeholder / junk content", 40]
        ])
    );
}
