//! Destination schema reconciliation.
//!
//! The store's schema is externally managed; this module only creates the
//! two tables as a backup when migrations have not produced them yet, and
//! defensively adds missing expected columns. Columns are never removed or
//! renamed, so legacy columns survive even once nothing populates them.

use std::collections::HashSet;

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::{info, warn};

pub fn configure_connection(connection: &Connection) -> Result<()> {
    connection
        .pragma_update(None, "journal_mode", "WAL")
        .context("failed to set journal_mode=WAL")?;
    connection
        .pragma_update(None, "synchronous", "NORMAL")
        .context("failed to set synchronous=NORMAL")?;
    Ok(())
}

pub fn ensure_base_tables(connection: &Connection) -> Result<()> {
    connection
        .execute_batch(
            "
            CREATE TABLE IF NOT EXISTS shortform (
              id TEXT PRIMARY KEY,
              symbol TEXT,
              code TEXT,
              name TEXT,
              category TEXT,
              description TEXT,
              createdAt DATETIME DEFAULT CURRENT_TIMESTAMP,
              updatedAt DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE TABLE IF NOT EXISTS composition (
              id TEXT PRIMARY KEY,
              material TEXT,
              percentage TEXT,
              code TEXT,
              category TEXT,
              properties TEXT,
              notes TEXT,
              createdAt DATETIME DEFAULT CURRENT_TIMESTAMP,
              updatedAt DATETIME DEFAULT CURRENT_TIMESTAMP
            );
            ",
        )
        .context("failed to create base tables")?;

    Ok(())
}

/// Adds every expected column missing from `table` as a plain TEXT column.
///
/// A column that already exists (either found via PRAGMA inspection or
/// reported back as a duplicate by the ALTER) is a no-op. Any other failure
/// for one column is logged and reconciliation moves on to the next, so a
/// single bad column cannot block the rest. Returns the number of columns
/// actually added; a second run over the same destination returns zero.
pub fn ensure_columns(connection: &Connection, table: &str, expected: &[&str]) -> Result<usize> {
    let existing = table_columns(connection, table)?;

    let mut added = 0;
    for column in expected {
        if existing.contains(*column) {
            continue;
        }

        let alter_sql = format!("ALTER TABLE {table} ADD COLUMN {column} TEXT");
        match connection.execute(&alter_sql, []) {
            Ok(_) => {
                info!(table, column, "added destination column");
                added += 1;
            }
            Err(err) if is_duplicate_column(&err) => {
                warn!(table, column, "column already exists");
            }
            Err(err) => {
                warn!(table, column, error = %err, "failed to add column");
            }
        }
    }

    Ok(added)
}

pub fn table_columns(connection: &Connection, table: &str) -> Result<HashSet<String>> {
    let pragma_sql = format!("PRAGMA table_info({table})");
    let mut statement = connection
        .prepare(&pragma_sql)
        .with_context(|| format!("failed to inspect schema for table {table}"))?;

    let mut columns = HashSet::new();
    let mut rows = statement.query([])?;
    while let Some(row) = rows.next()? {
        columns.insert(row.get::<_, String>(1)?);
    }

    Ok(columns)
}

fn is_duplicate_column(err: &rusqlite::Error) -> bool {
    err.to_string().contains("duplicate column name")
}
