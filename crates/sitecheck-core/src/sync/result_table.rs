//! Splice verdict columns into the input table.

use crate::classifier::Verdict;
use crate::error::InputError;
use crate::sheet::{Cell, SheetError, Table};
use crate::url_model::normalize_url;

pub const WEBSITE_COLUMN: &str = "Website";
pub const VERDICT_COLUMN: &str = "Yes/No";
pub const EXPLANATION_COLUMN: &str = "Explanation";

/// Input table with a previous run's verdict columns removed, plus the normalized URLs.
#[derive(Debug, Clone)]
pub struct PreparedInput {
    pub table: Table,
    pub website_idx: usize,
    pub urls: Vec<String>,
}

/// Validates the `Website` column and normalizes its values.
///
/// A `Yes/No`, `Explanation` pair sitting directly after `Website` is what an
/// earlier run wrote; it is dropped so a re-run replaces it. A column with
/// either name anywhere else belongs to the user: the run is refused rather
/// than overwriting it or writing a duplicate header.
pub fn prepare(mut table: Table) -> Result<PreparedInput, InputError> {
    let website_idx = table
        .column_index(WEBSITE_COLUMN)
        .ok_or_else(|| InputError::MissingColumn {
            column: WEBSITE_COLUMN.to_string(),
        })?;
    if has_previous_verdicts(table.header(), website_idx) {
        table.drop_columns(website_idx + 1..website_idx + 3);
    }
    for column in [VERDICT_COLUMN, EXPLANATION_COLUMN] {
        if table.column_index(column).is_some() {
            return Err(InputError::ReservedColumn {
                column: column.to_string(),
            });
        }
    }
    let urls = table
        .rows()
        .iter()
        .map(|row| normalize_url(&row[website_idx].to_string()))
        .collect();
    Ok(PreparedInput {
        table,
        website_idx,
        urls,
    })
}

fn has_previous_verdicts(header: &[String], website_idx: usize) -> bool {
    header.get(website_idx + 1).map(String::as_str) == Some(VERDICT_COLUMN)
        && header.get(website_idx + 2).map(String::as_str) == Some(EXPLANATION_COLUMN)
}

/// Builds the table written back: `Website` holds the normalized URL and is
/// immediately followed by `Yes/No` and `Explanation`.
///
/// Rows without a matching verdict are left out; callers check the counts.
pub fn build_result_table(
    input: &PreparedInput,
    verdicts: &[Verdict],
) -> Result<Table, SheetError> {
    let at = input.website_idx + 1;

    let mut header = input.table.header().to_vec();
    header.splice(
        at..at,
        [VERDICT_COLUMN.to_string(), EXPLANATION_COLUMN.to_string()],
    );

    let rows = input
        .table
        .rows()
        .iter()
        .zip(&input.urls)
        .zip(verdicts)
        .map(|((row, url), verdict)| {
            let mut out = row.clone();
            out[input.website_idx] = Cell::text(url.as_str());
            out.splice(
                at..at,
                [
                    Cell::text(verdict.label.as_str()),
                    Cell::text(verdict.explanation.as_str()),
                ],
            );
            out
        })
        .collect();

    Table::new(header, rows)
}
