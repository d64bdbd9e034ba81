//! End-to-end import run: source workbook in, destination tables replaced,
//! run manifest written, summary logged.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use rusqlite::Connection;
use tracing::info;

use crate::cli::Cli;
use crate::import::import_table;
use crate::model::{
    COMPOSITION_LEGACY_COLUMNS, ImportCounts, ImportRunManifest, LANGUAGES, composition_schedule,
    shortform_schedule,
};
use crate::schema::{configure_connection, ensure_base_tables, ensure_columns};
use crate::source::read_workbook;
use crate::util::{now_utc_string, sha256_file, utc_compact_string, write_json_pretty};

/// Shared location of the reference workbook; overridable by the one
/// positional CLI argument.
const DEFAULT_SOURCE_PATH: &str = "data/database.xlsx";

/// The destination store is created and migrated by the downstream
/// application's tooling, never by this importer.
const DB_PATH: &str = "prisma/dev.db";

const MANIFEST_DIR: &str = "manifests";

pub fn run(cli: Cli) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("run-{}", utc_compact_string(started_ts));

    let source_path = cli
        .source
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE_PATH));
    let db_path = PathBuf::from(DB_PATH);

    info!(run_id = %run_id, source = %source_path.display(), "starting import");

    // Source problems must surface before the destination is touched.
    let workbook = read_workbook(&source_path)?;
    let source_sha256 = sha256_file(&source_path)?;

    let mut connection = open_destination(&db_path)?;
    ensure_base_tables(&connection)?;

    let composition = composition_schedule();
    let shortform = shortform_schedule();

    // Required columns for composition: the legacy set is preserved for
    // older consumers, the language set carries the translations.
    let mut required: Vec<&str> =
        Vec::with_capacity(COMPOSITION_LEGACY_COLUMNS.len() + LANGUAGES.len());
    required.extend_from_slice(COMPOSITION_LEGACY_COLUMNS);
    required.extend_from_slice(LANGUAGES);
    let columns_added = ensure_columns(&connection, composition.table, &required)?;

    let shortform_outcome = import_table(&mut connection, &shortform, &workbook.shortform)?;
    info!(
        table = shortform.table,
        inserted = shortform_outcome.inserted,
        skipped = shortform_outcome.skipped,
        "imported table"
    );

    let composition_outcome =
        import_table(&mut connection, &composition, &workbook.composition)?;
    info!(
        table = composition.table,
        inserted = composition_outcome.inserted,
        skipped = composition_outcome.skipped,
        "imported table"
    );

    let shortform_total = count_rows(&connection, shortform.table)?;
    let composition_total = count_rows(&connection, composition.table)?;
    let updated_at = now_utc_string();

    let manifest = ImportRunManifest {
        manifest_version: 1,
        run_id: run_id.clone(),
        status: "completed".to_string(),
        started_at,
        updated_at,
        source_path: source_path.display().to_string(),
        source_sha256,
        db_path: db_path.display().to_string(),
        counts: ImportCounts {
            shortform_rows_read: shortform_outcome.rows_read,
            shortform_inserted: shortform_outcome.inserted,
            shortform_skipped: shortform_outcome.skipped,
            composition_rows_read: composition_outcome.rows_read,
            composition_inserted: composition_outcome.inserted,
            composition_skipped: composition_outcome.skipped,
            shortform_total,
            composition_total,
            columns_added,
        },
    };

    let manifest_path = Path::new(MANIFEST_DIR).join(format!(
        "import_run_{}.json",
        utc_compact_string(started_ts)
    ));
    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote import run manifest");

    info!(shortform_total, composition_total, "import completed");

    Ok(())
}

fn open_destination(db_path: &Path) -> Result<Connection> {
    if !db_path.exists() {
        bail!(
            "database not found at {}; run the application's migrations first",
            db_path.display()
        );
    }

    let connection = Connection::open(db_path)
        .with_context(|| format!("failed to open {}", db_path.display()))?;
    configure_connection(&connection)?;

    Ok(connection)
}

fn count_rows(connection: &Connection, table: &str) -> Result<i64> {
    connection
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
            row.get(0)
        })
        .with_context(|| format!("failed to count rows in {table}"))
}
