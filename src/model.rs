use serde::Serialize;

/// The eighteen translation languages carried by the composition sheet, in
/// source-column order. Language `i` maps to source column `i + 1`; column 0
/// is the material name. Position is authoritative, header text is not.
pub const LANGUAGES: &[&str] = &[
    "spanish",
    "french",
    "english",
    "portuguese",
    "dutch",
    "italian",
    "greek",
    "japanese",
    "german",
    "danish",
    "slovenian",
    "chinese",
    "korean",
    "indonesian",
    "arabic",
    "galician",
    "catalan",
    "basque",
];

/// Columns the composition table carried before the language rework. They
/// are no longer populated but must never be dropped.
pub const COMPOSITION_LEGACY_COLUMNS: &[&str] =
    &["percentage", "code", "category", "properties", "notes"];

/// Positional destination mapping for one imported table: an identity column
/// fed from source column 0 and an ordered set of scheduled columns fed from
/// the columns after it.
#[derive(Debug, Clone, Copy)]
pub struct TableSchedule {
    pub table: &'static str,
    pub identity_column: &'static str,
    pub columns: &'static [&'static str],
}

pub fn composition_schedule() -> TableSchedule {
    TableSchedule {
        table: "composition",
        identity_column: "material",
        columns: LANGUAGES,
    }
}

pub fn shortform_schedule() -> TableSchedule {
    TableSchedule {
        table: "shortform",
        identity_column: "symbol",
        columns: &["code", "name", "category", "description"],
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportCounts {
    pub shortform_rows_read: usize,
    pub shortform_inserted: usize,
    pub shortform_skipped: usize,
    pub composition_rows_read: usize,
    pub composition_inserted: usize,
    pub composition_skipped: usize,
    pub shortform_total: i64,
    pub composition_total: i64,
    pub columns_added: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub status: String,
    pub started_at: String,
    pub updated_at: String,
    pub source_path: String,
    pub source_sha256: String,
    pub db_path: String,
    pub counts: ImportCounts,
}
