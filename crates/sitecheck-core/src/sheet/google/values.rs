//! Shapes of Drive / Sheets API responses, and A1 notation helpers.

use serde_json::{Number, Value};

use crate::sheet::{Cell, SheetError};

/// `'Tab name'` with embedded quotes doubled, as A1 notation requires.
pub(crate) fn quote_tab(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// Escape a string literal for a Drive `q` expression.
pub(crate) fn escape_query_literal(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Id of the first file in a Drive `files.list` response.
pub(crate) fn first_file_id(json: &Value) -> Option<String> {
    json.get("files")?
        .as_array()?
        .first()?
        .get("id")?
        .as_str()
        .map(str::to_string)
}

/// Title of the tab whose `index` property equals `index`.
pub(crate) fn tab_title_at(json: &Value, index: u32) -> Option<String> {
    json.get("sheets")?
        .as_array()?
        .iter()
        .filter_map(|s| s.get("properties"))
        .find(|p| p.get("index").and_then(Value::as_u64).unwrap_or(0) == u64::from(index))
        .and_then(|p| p.get("title"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Rows of a `ValueRange`. A missing `values` key means the tab is blank.
pub(crate) fn parse_value_range(json: &Value) -> Result<Vec<Vec<Cell>>, SheetError> {
    let rows = match json.get("values") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(rows)) => rows,
        Some(_) => return Err(SheetError::Malformed("values is not an array".to_string())),
    };
    rows.iter()
        .enumerate()
        .map(|(i, row)| match row {
            Value::Array(cells) => Ok(cells.iter().map(cell_from_json).collect()),
            _ => Err(SheetError::Malformed(format!("row {} is not an array", i + 1))),
        })
        .collect()
}

/// `values` payload for a `RAW` update: numbers and booleans stay typed.
pub(crate) fn rows_to_json(rows: &[Vec<Cell>]) -> Value {
    Value::Array(
        rows.iter()
            .map(|row| Value::Array(row.iter().map(Cell::to_json).collect()))
            .collect(),
    )
}

fn cell_from_json(v: &Value) -> Cell {
    match v {
        Value::String(s) => numericise(s),
        Value::Null => Cell::default(),
        Value::Bool(b) => Cell::Bool(*b),
        Value::Number(n) => Cell::Number(n.clone()),
        other => Cell::Text(other.to_string()),
    }
}

/// Formatted cell text that reads as an integer or a finite float becomes a
/// number. Grouped digits ("1,234") and underscores stay text.
fn numericise(s: &str) -> Cell {
    let t = s.trim();
    if t.is_empty() || t.contains('_') {
        return Cell::text(s);
    }
    if let Ok(i) = t.parse::<i64>() {
        return Cell::Number(i.into());
    }
    match t.parse::<f64>().ok().and_then(Number::from_f64) {
        Some(n) => Cell::Number(n),
        None => Cell::text(s),
    }
}
