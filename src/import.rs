//! Bulk replace import: clear a destination table, then insert every source
//! row with a fresh identifier and import-time timestamps.

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::{debug, warn};

use crate::ids::generate_id;
use crate::model::TableSchedule;
use crate::normalize::normalize_row;
use crate::util::now_utc_string;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableOutcome {
    pub rows_read: usize,
    pub inserted: usize,
    pub skipped: usize,
}

/// Replaces the full contents of `schedule.table` with `rows`.
///
/// Runs as one transaction: delete everything, insert row by row, commit once
/// after the loop. A row whose insert fails is logged and counted as skipped;
/// it never aborts the batch. A failure of the transaction itself (open or
/// commit) aborts the table but leaves previously committed tables standing.
///
/// Full replace means exactly that: records absent from the new source are
/// gone afterwards, and unchanged records still receive a new identifier and
/// new timestamps.
pub fn import_table(
    connection: &mut Connection,
    schedule: &TableSchedule,
    rows: &[Vec<Option<String>>],
) -> Result<TableOutcome> {
    let tx = connection
        .transaction()
        .with_context(|| format!("failed to begin transaction for {}", schedule.table))?;

    tx.execute(&format!("DELETE FROM {}", schedule.table), [])
        .with_context(|| format!("failed to clear {}", schedule.table))?;

    let import_time = now_utc_string();
    let mut outcome = TableOutcome {
        rows_read: rows.len(),
        ..TableOutcome::default()
    };

    {
        let sql = insert_sql(schedule);
        let mut statement = tx
            .prepare(&sql)
            .with_context(|| format!("failed to prepare insert for {}", schedule.table))?;

        for (index, raw) in rows.iter().enumerate() {
            let row = normalize_row(raw, schedule.columns);

            let mut values = Vec::with_capacity(schedule.columns.len() + 4);
            values.push(generate_id());
            values.push(row.identity);
            values.extend(row.values);
            values.push(import_time.clone());
            values.push(import_time.clone());

            match statement.execute(rusqlite::params_from_iter(values.iter())) {
                Ok(_) => {
                    outcome.inserted += 1;
                    if outcome.inserted <= 3 {
                        debug!(table = schedule.table, identity = %values[1], "imported record");
                    }
                }
                Err(err) => {
                    warn!(
                        table = schedule.table,
                        row = index,
                        error = %err,
                        "skipping row"
                    );
                    outcome.skipped += 1;
                }
            }
        }
    }

    tx.commit()
        .with_context(|| format!("failed to commit import of {}", schedule.table))?;

    Ok(outcome)
}

fn insert_sql(schedule: &TableSchedule) -> String {
    let mut columns = Vec::with_capacity(schedule.columns.len() + 4);
    columns.push("id");
    columns.push(schedule.identity_column);
    columns.extend_from_slice(schedule.columns);
    columns.push("createdAt");
    columns.push("updatedAt");

    let placeholders = vec!["?"; columns.len()].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        schedule.table,
        columns.join(", "),
        placeholders
    )
}
