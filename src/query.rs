use crate::audit;
use crate::error::Result;
use rusqlite::types::ValueRef;
use rusqlite::Connection;
use std::path::Path;
use tracing::warn;

/// Logged in place of output when a query fails.
const NO_RESULT: &str = "<no result>";

/// Executes one read-only query, prints the rendered result, and appends
/// the query text plus rendering to the audit trail. A failing query is
/// reported and logged with a placeholder; it never aborts the run.
pub fn run_query(conn: &Connection, sql: &str, audit_path: &Path) -> Result<()> {
    println!("Executing Query: {}", sql);
    let output = match render_query(conn, sql) {
        Ok(rendered) => {
            println!("Query Output:");
            println!("{}", rendered);
            rendered
        }
        Err(e) => {
            warn!("Query failed: {}", e);
            println!("Error: {}", e);
            NO_RESULT.to_string()
        }
    };
    audit::log_progress(
        &format!("Executed Query: {}\nOutput: {}", sql, output),
        audit_path,
    )?;
    Ok(())
}

/// Renders the full result set as text: header line, then one line per
/// row, columns joined with " | ". No truncation.
fn render_query(conn: &Connection, sql: &str) -> rusqlite::Result<String> {
    let mut stmt = conn.prepare(sql)?;
    let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();

    let mut lines = vec![columns.join(" | ")];
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let mut cells = Vec::with_capacity(columns.len());
        for i in 0..columns.len() {
            cells.push(render_value(row.get_ref(i)?));
        }
        lines.push(cells.join(" | "));
    }
    Ok(lines.join("\n"))
}

fn render_value(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => "NULL".to_string(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Blob(b) => format!("<{} byte blob>", b.len()),
    }
}
