//! Source Reader: exposes the workbook's two named sheets as positional rows.
//!
//! Header text in the observed workbooks is inconsistently padded and
//! capitalized, so sheets are consumed purely positionally. The header row is
//! logged for diagnostics and never drives column mapping.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, Xlsx, open_workbook};
use tracing::{debug, info};

pub const SHORTFORM_SHEET: &str = "shortform";
pub const COMPOSITION_SHEET: &str = "composition";

/// Both sheets with headers dropped and every cell already collapsed to the
/// canonical `Option<String>` boundary representation.
#[derive(Debug, Clone)]
pub struct SourceWorkbook {
    pub shortform: Vec<Vec<Option<String>>>,
    pub composition: Vec<Vec<Option<String>>>,
}

pub fn read_workbook(path: &Path) -> Result<SourceWorkbook> {
    if !path.exists() {
        bail!("source workbook not found: {}", path.display());
    }

    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("failed to open source workbook: {}", path.display()))?;

    let shortform = read_sheet(&mut workbook, SHORTFORM_SHEET)?;
    let composition = read_sheet(&mut workbook, COMPOSITION_SHEET)?;

    info!(
        path = %path.display(),
        shortform_rows = shortform.len(),
        composition_rows = composition.len(),
        "read source workbook"
    );

    Ok(SourceWorkbook {
        shortform,
        composition,
    })
}

fn read_sheet(
    workbook: &mut Xlsx<BufReader<File>>,
    name: &str,
) -> Result<Vec<Vec<Option<String>>>> {
    let range = workbook
        .worksheet_range(name)
        .with_context(|| format!("missing required sheet: {name}"))?;

    let mut rows = range.rows();

    // First row is the header. Position wins over name, so it is recorded
    // and otherwise ignored.
    if let Some(header_cells) = rows.next() {
        let header: Vec<String> = header_cells
            .iter()
            .map(|cell| cell_text(cell).unwrap_or_default())
            .collect();
        debug!(sheet = name, header = ?header, "sheet header (ignored for mapping)");
    }

    Ok(rows
        .map(|cells| cells.iter().map(cell_text).collect())
        .collect())
}

/// Collapses every "missing" cell representation into `None` before any
/// business logic runs: empty cells, error cells, NaN floats and
/// blank/whitespace-only strings all count as absent. Everything else is
/// rendered as trimmed text; integral floats render without a trailing `.0`
/// to match how the workbook displays them.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) if f.is_nan() => None,
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            Some((*f as i64).to_string())
        }
        Data::Float(f) => Some(f.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(dt.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use calamine::CellErrorType;

    use super::*;

    #[test]
    fn empty_and_error_cells_are_absent() {
        assert_eq!(cell_text(&Data::Empty), None);
        assert_eq!(cell_text(&Data::Error(CellErrorType::NA)), None);
    }

    #[test]
    fn blank_and_padded_strings_are_normalized() {
        assert_eq!(cell_text(&Data::String("   ".to_string())), None);
        assert_eq!(
            cell_text(&Data::String("  COTTON ".to_string())),
            Some("COTTON".to_string())
        );
    }

    #[test]
    fn integral_floats_render_without_fraction() {
        assert_eq!(cell_text(&Data::Float(30.0)), Some("30".to_string()));
        assert_eq!(cell_text(&Data::Float(0.5)), Some("0.5".to_string()));
        assert_eq!(cell_text(&Data::Int(95)), Some("95".to_string()));
    }

    #[test]
    fn nan_floats_are_absent_not_marker_text() {
        assert_eq!(cell_text(&Data::Float(f64::NAN)), None);
    }
}
