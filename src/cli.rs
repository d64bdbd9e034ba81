use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "washcare-import",
    version,
    about = "Excel to SQLite import for the wash-care reference dataset"
)]
pub struct Cli {
    /// Path to the source workbook. Defaults to the shared reference
    /// workbook location when omitted.
    pub source: Option<PathBuf>,
}
