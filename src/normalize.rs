//! Row normalization: raw positional cells in, fixed-arity records out.

/// Textual form of a missing numeric cell as rendered by the workbook's
/// previous custodian tooling. Rows round-tripped through it carry the
/// literal string where a value never existed.
pub const EMPTY_MARKER: &str = "nan";

/// One normalized row: the identity value from source column 0 plus exactly
/// one value per scheduled column, in schedule order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRow {
    pub identity: String,
    pub values: Vec<String>,
}

/// Converts a raw source row into a fixed-arity record.
///
/// The output always has `columns.len()` values regardless of the input row
/// width: missing trailing cells become empty strings, cells beyond the
/// schedule are ignored. Cells equal to [`EMPTY_MARKER`] normalize to the
/// empty string, never to the literal marker text.
pub fn normalize_row(raw: &[Option<String>], columns: &[&str]) -> NormalizedRow {
    let identity = clean_cell(raw.first());
    let values = (0..columns.len())
        .map(|idx| clean_cell(raw.get(idx + 1)))
        .collect();

    NormalizedRow { identity, values }
}

fn clean_cell(cell: Option<&Option<String>>) -> String {
    match cell {
        Some(Some(text)) if text.as_str() != EMPTY_MARKER => text.clone(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LANGUAGES, shortform_schedule};

    fn cells(values: &[&str]) -> Vec<Option<String>> {
        values.iter().map(|v| Some(v.to_string())).collect()
    }

    fn language_index(name: &str) -> usize {
        LANGUAGES.iter().position(|l| *l == name).unwrap()
    }

    #[test]
    fn arity_is_fixed_regardless_of_row_width() {
        for width in [0, 1, 5, 19, 40] {
            let raw: Vec<Option<String>> = vec![Some("x".to_string()); width];
            let row = normalize_row(&raw, LANGUAGES);
            assert_eq!(row.values.len(), LANGUAGES.len());
        }
    }

    #[test]
    fn empty_marker_becomes_empty_string() {
        let raw = cells(&["nan", "nan", "lino"]);
        let row = normalize_row(&raw, LANGUAGES);
        assert_eq!(row.identity, "");
        assert_eq!(row.values[0], "");
        assert_eq!(row.values[1], "lino");
        assert!(!row.values.iter().any(|v| v.as_str() == EMPTY_MARKER));
    }

    #[test]
    fn absent_cells_become_empty_not_errors() {
        let raw = vec![Some("LINEN".to_string()), None, Some("lin".to_string())];
        let row = normalize_row(&raw, LANGUAGES);
        assert_eq!(row.identity, "LINEN");
        assert_eq!(row.values[0], "");
        assert_eq!(row.values[1], "lin");
        assert_eq!(row.values[2], "");
    }

    #[test]
    fn composition_row_maps_languages_by_position() {
        let mut raw = vec!["BAMBOO", "bambú", "bambou", "bamboo"];
        raw.extend(std::iter::repeat_n("x", 15));
        let row = normalize_row(&cells(&raw), LANGUAGES);

        assert_eq!(row.identity, "BAMBOO");
        assert_eq!(row.values[language_index("spanish")], "bambú");
        assert_eq!(row.values[language_index("french")], "bambou");
        assert_eq!(row.values[language_index("english")], "bamboo");
    }

    #[test]
    fn material_only_row_yields_all_empty_translations() {
        let row = normalize_row(&cells(&["SPANDEX"]), LANGUAGES);
        assert_eq!(row.identity, "SPANDEX");
        assert_eq!(row.values.len(), LANGUAGES.len());
        assert!(row.values.iter().all(String::is_empty));
    }

    #[test]
    fn shortform_row_with_three_of_five_columns() {
        let schedule = shortform_schedule();
        let row = normalize_row(&cells(&["W", "30", "Machine wash"]), schedule.columns);

        // Schedule order: code, name, category, description.
        assert_eq!(row.identity, "W");
        assert_eq!(row.values, vec!["30", "Machine wash", "", ""]);
    }
}
