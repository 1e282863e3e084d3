use crate::config::OrdinalConfig;
use crate::table::Table;

/// Index of the first column whose header is a known ordinal alias.
pub fn find_ordinal_column(table: &Table, ordinal: &OrdinalConfig) -> Option<usize> {
    table.headers.iter().position(|h| ordinal.is_alias(h))
}

/// Keep only the rows that look like real records.
///
/// When the table has an ordinal column, a row survives iff its ordinal
/// cell coerces to a finite number; totals and footnotes rows fail that
/// test. Without an ordinal column the table is returned as-is.
pub fn filter_data_rows(table: &Table, ordinal: &OrdinalConfig) -> Table {
    let Some(col) = find_ordinal_column(table, ordinal) else {
        log::debug!("no ordinal column among {} headers; keeping all rows", table.width());
        return table.clone();
    };

    let filtered = table.select_rows(|_, row| row.get(col).and_then(|c| c.as_number()).is_some());

    let dropped = table.len() - filtered.len();
    if dropped > 0 {
        log::debug!(
            "dropped {dropped} non-data row(s) using ordinal column '{}'",
            table.headers[col]
        );
    }
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::CellValue;

    fn roster(ordinals: Vec<CellValue>) -> Table {
        let rows = ordinals
            .into_iter()
            .enumerate()
            .map(|(i, ord)| vec![ord, CellValue::text(format!("Person {i}"))])
            .collect();
        Table::new(vec!["S/N".into(), "Full Name As Per NRIC".into()], rows)
    }

    #[test]
    fn footer_row_dropped() {
        let table = roster(vec![1.0.into(), 2.0.into(), "Total".into()]);
        let filtered = filter_data_rows(&table, &OrdinalConfig::default());
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered.rows[1][1], CellValue::text("Person 1"));
    }

    #[test]
    fn blank_ordinal_dropped_and_numeric_text_kept() {
        let table = roster(vec!["1".into(), CellValue::Empty, " 3 ".into(), "n/a".into()]);
        let filtered = filter_data_rows(&table, &OrdinalConfig::default());
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered.rows[0][0], CellValue::text("1"));
        assert_eq!(filtered.rows[1][0], CellValue::text(" 3 "));
    }

    #[test]
    fn no_ordinal_column_keeps_everything() {
        let table = Table::new(
            vec!["Full Name As Per NRIC".into()],
            vec![vec!["Alice".into()], vec!["Grand Total".into()]],
        );
        let filtered = filter_data_rows(&table, &OrdinalConfig::default());
        assert_eq!(filtered, table);
    }

    #[test]
    fn all_rows_failing_gives_empty_table() {
        let table = roster(vec!["Total".into(), CellValue::Empty]);
        let filtered = filter_data_rows(&table, &OrdinalConfig::default());
        assert!(filtered.is_empty());
        assert_eq!(filtered.headers, table.headers);
    }

    #[test]
    fn alias_detection_is_case_insensitive() {
        let table = Table::new(
            vec!["Name".into(), "serial no".into()],
            vec![vec!["A".into(), 1.0.into()], vec!["Remarks".into(), CellValue::Empty]],
        );
        assert_eq!(find_ordinal_column(&table, &OrdinalConfig::default()), Some(1));
        assert_eq!(filter_data_rows(&table, &OrdinalConfig::default()).len(), 1);
    }
}
