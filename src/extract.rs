use crate::error::{EtlError, Result};
use crate::types::BankRecord;
use scraper::{ElementRef, Html, Selector};
use tracing::info;

/// Heading anchor that marks the "By market capitalization" section.
const ANCHOR_ID: &str = "By_market_capitalization";
const TABLE_CLASS: &str = "wikitable";
const NAME_HEADER: &str = "Bank name";
const CAP_HEADER: &str = "Market cap";

/// Fetches the source page and extracts the ranked banks table. One fetch
/// per run, no retries.
pub fn extract(client: &reqwest::blocking::Client, url: &str) -> Result<Vec<BankRecord>> {
    info!("Fetching largest banks page");
    let body = client.get(url).send()?.error_for_status()?.text()?;
    let records = parse_page(&body)?;
    info!("Extracted {} bank records", records.len());
    Ok(records)
}

/// Parses the page body: locates the market-capitalization anchor, takes
/// the first wikitable that follows it in document order, and converts it
/// into records.
pub fn parse_page(html: &str) -> Result<Vec<BankRecord>> {
    let document = Html::parse_document(html);
    let table = find_market_cap_table(&document)?;
    parse_table(table)
}

fn find_market_cap_table(document: &Html) -> Result<ElementRef<'_>> {
    let mut seen_anchor = false;
    for node in document.tree.root().descendants() {
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };
        if element.value().id() == Some(ANCHOR_ID) {
            seen_anchor = true;
        } else if seen_anchor
            && element.value().name() == "table"
            && element.value().classes().any(|c| c == TABLE_CLASS)
        {
            return Ok(element);
        }
    }
    if seen_anchor {
        Err(EtlError::Extract(format!(
            "no {} follows the '#{}' anchor",
            TABLE_CLASS, ANCHOR_ID
        )))
    } else {
        Err(EtlError::Extract(format!(
            "anchor '#{}' not found in page",
            ANCHOR_ID
        )))
    }
}

fn parse_table(table: ElementRef<'_>) -> Result<Vec<BankRecord>> {
    let row_selector = Selector::parse("tr").unwrap();
    let cell_selector = Selector::parse("th, td").unwrap();

    let mut rows = table.select(&row_selector);
    let header = rows
        .next()
        .ok_or_else(|| EtlError::Extract("banks table has no header row".to_string()))?;
    let headers: Vec<String> = header.select(&cell_selector).map(cell_text).collect();

    // Columns are identified by header text. If the source renames a
    // column the lookup fails here instead of mis-mapping positionally.
    let name_idx = column_index(&headers, NAME_HEADER)?;
    let cap_idx = column_index(&headers, CAP_HEADER)?;
    let min_cells = name_idx.max(cap_idx) + 1;

    let mut records = Vec::new();
    for (i, row) in rows.enumerate() {
        let rank = (i + 1) as u32;
        let cells: Vec<String> = row.select(&cell_selector).map(cell_text).collect();
        if cells.len() < min_cells {
            return Err(EtlError::Extract(format!(
                "row {} has {} cells, expected at least {}",
                rank,
                cells.len(),
                min_cells
            )));
        }
        records.push(BankRecord {
            rank,
            name: cells[name_idx].clone(),
            mc_usd_billion: parse_market_cap(&cells[cap_idx], rank)?,
        });
    }

    if records.is_empty() {
        return Err(EtlError::Extract("banks table has no data rows".to_string()));
    }
    Ok(records)
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

fn column_index(headers: &[String], label: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.contains(label))
        .ok_or_else(|| {
            EtlError::Extract(format!(
                "table header has no '{}' column (found: {:?})",
                label, headers
            ))
        })
}

/// A capitalization cell is `<number><unit suffix>`; the final character
/// is dropped and the remainder must parse to a finite non-negative float.
fn parse_market_cap(cell: &str, rank: u32) -> Result<f64> {
    let mut chars = cell.trim().chars();
    chars.next_back();
    let number = chars.as_str().trim();

    let value: f64 = number.parse().map_err(|_| {
        EtlError::Extract(format!(
            "market cap value '{}' in row {} does not parse as a number",
            cell, rank
        ))
    })?;
    if !value.is_finite() || value < 0.0 {
        return Err(EtlError::Extract(format!(
            "market cap value '{}' in row {} is not a finite non-negative number",
            cell, rank
        )));
    }
    Ok(value)
}
