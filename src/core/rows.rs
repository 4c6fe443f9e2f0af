// File: src/core/rows.rs
use crate::core::types::SenseKey;
use crate::error::{CollocError, Result};
use serde::{Deserialize, Serialize};

/// A single worksheet held fully in memory. Rows may be ragged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row.
    pub fn ncols(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }
}

/// Where the two sense key columns live in the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetLayout {
    pub sensekey1_col: usize,
    pub sensekey2_col: usize,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self { sensekey1_col: 0, sensekey2_col: 1 }
    }
}

/// One authored collocation row, key order preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowPair {
    /// 1-based, as reported in diagnostics.
    pub row: usize,
    pub key1: SenseKey,
    pub key2: SenseKey,
}

impl RowPair {
    pub fn new(row: usize, key1: impl Into<SenseKey>, key2: impl Into<SenseKey>) -> Self {
        Self { row, key1: key1.into(), key2: key2.into() }
    }

    pub fn is_reflexive(&self) -> bool {
        self.key1 == self.key2
    }
}

/// Reads the two sense key columns of every row, top to bottom.
/// A row that lacks either column fails the whole read.
pub fn normalize_rows(sheet: &Sheet, layout: SheetLayout) -> Result<Vec<RowPair>> {
    (0..sheet.nrows())
        .map(|i| -> Result<RowPair> {
            let key = |col: usize| {
                sheet
                    .cell(i, col)
                    .ok_or(CollocError::MissingColumn { row: i, col })
            };
            let key1 = key(layout.sensekey1_col)?;
            let key2 = key(layout.sensekey2_col)?;
            Ok(RowPair::new(i + 1, key1, key2))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(rows: &[&[&str]]) -> Sheet {
        Sheet::new(
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn rows_are_numbered_from_one() {
        let s = sheet(&[&["a", "b"], &["c", "d"]]);
        let pairs = normalize_rows(&s, SheetLayout::default()).unwrap();
        assert_eq!(pairs, vec![RowPair::new(1, "a", "b"), RowPair::new(2, "c", "d")]);
    }

    #[test]
    fn layout_picks_columns() {
        let s = sheet(&[&["lemma", "x", "note", "y"]]);
        let layout = SheetLayout { sensekey1_col: 3, sensekey2_col: 1 };
        let pairs = normalize_rows(&s, layout).unwrap();
        assert_eq!(pairs, vec![RowPair::new(1, "y", "x")]);
        assert_eq!(s.ncols(), 4);
    }

    #[test]
    fn short_row_is_a_hard_failure() {
        let s = sheet(&[&["a", "b"], &["c"]]);
        let err = normalize_rows(&s, SheetLayout::default()).unwrap_err();
        assert!(matches!(err, CollocError::MissingColumn { row: 1, col: 1 }));
        assert_eq!(err.to_string(), "row 2 has no column 1");
    }
}
