use crate::traits::{CellData, SheetData};
use serde::Serialize;
use sheetgraph_common::LiteralValue;
use std::collections::BTreeMap;

/// A sheet viewed as a header plus ordered rows.
///
/// Built from sparse [`SheetData`]:
/// - the first row holding any value is the header row and is `rows()[0]`;
/// - header cells without text are skipped, and cells in such unnamed
///   columns are dropped from every row;
/// - rows with no value under a named column are skipped.
///
/// Because blank rows are skipped, a position in [`Sheet::data_rows`] is not
/// a source row offset; use [`Row::index`] for the 1-based source row. Node
/// indices built from `data_rows` follow the same compacted order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Sheet {
    name: String,
    header: Vec<String>,
    #[serde(skip)]
    header_cols: Vec<u32>,
    rows: Vec<Row>,
}

/// One sheet row. Cells are sparse and ordered by header position.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Row {
    index: u32,
    cells: Vec<RowCell>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RowCell {
    column: usize,
    value: LiteralValue,
}

impl RowCell {
    /// Position of the cell's column in [`Sheet::header`].
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn value(&self) -> &LiteralValue {
        &self.value
    }
}

impl Row {
    /// 1-based row number in the source sheet.
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn cells(&self) -> &[RowCell] {
        &self.cells
    }

    pub fn cell(&self, column: usize) -> Option<&LiteralValue> {
        self.cells
            .binary_search_by_key(&column, |c| c.column)
            .ok()
            .map(|i| &self.cells[i].value)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Sheet {
    /// An empty sheet with no header and no rows.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn from_sheet_data(name: impl Into<String>, data: &SheetData) -> Self {
        let mut by_row: BTreeMap<u32, Vec<(u32, &LiteralValue)>> = BTreeMap::new();
        for (&(row, col), cell) in &data.cells {
            if let Some(value) = cell.value.as_ref().filter(|v| !v.is_empty()) {
                by_row.entry(row).or_default().push((col, value));
            }
        }

        let mut sheet = Sheet::empty(name);
        let mut row_iter = by_row.into_iter();
        let Some((header_row, header_cells)) = row_iter.next() else {
            return sheet;
        };

        for (col, value) in &header_cells {
            if let Some(text) = value.to_text() {
                sheet.header.push(text);
                sheet.header_cols.push(*col);
            }
        }
        sheet.push_row(header_row, header_cells);
        for (row, cells) in row_iter {
            sheet.push_row(row, cells);
        }
        sheet
    }

    /// Build a sheet from rows of text; the first row is the header and an
    /// empty string stands for an absent cell.
    pub fn from_text_rows<R, S>(name: impl Into<String>, rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut data = SheetData::default();
        let (mut max_row, mut max_col) = (0u32, 0u32);
        for (r, row) in rows.into_iter().enumerate() {
            let r = r as u32 + 1;
            for (c, text) in row.into_iter().enumerate() {
                let c = c as u32 + 1;
                let text = text.as_ref();
                if text.is_empty() {
                    continue;
                }
                data.cells.insert((r, c), CellData::from_value(text));
                max_row = max_row.max(r);
                max_col = max_col.max(c);
            }
        }
        if max_row > 0 {
            data.dimensions = Some((max_row, max_col));
        }
        Self::from_sheet_data(name, &data)
    }

    fn push_row(&mut self, index: u32, cells: Vec<(u32, &LiteralValue)>) {
        let cells: Vec<RowCell> = cells
            .into_iter()
            .filter_map(|(col, value)| {
                self.header_cols
                    .binary_search(&col)
                    .ok()
                    .map(|column| RowCell {
                        column,
                        value: value.clone(),
                    })
            })
            .collect();
        if !cells.is_empty() {
            self.rows.push(Row { index, cells });
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column names in column order.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// All rows, header row first.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Rows after the header row.
    pub fn data_rows(&self) -> &[Row] {
        self.rows.get(1..).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the first header column named `column`.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.header.iter().position(|h| h == column)
    }

    pub fn column_name(&self, column: usize) -> Option<&str> {
        self.header.get(column).map(String::as_str)
    }

    /// Value of `row` in the first column named `column`.
    pub fn value<'a>(&self, row: &'a Row, column: &str) -> Option<&'a LiteralValue> {
        self.column_index(column).and_then(|idx| row.cell(idx))
    }

    pub fn text(&self, row: &Row, column: &str) -> Option<String> {
        self.value(row, column).and_then(LiteralValue::to_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_first_row() {
        let sheet = Sheet::from_text_rows("People", [["Name", "Age"], ["Alice", "30"]]);
        assert_eq!(sheet.header(), ["Name", "Age"]);
        assert_eq!(sheet.rows().len(), 2);
        assert_eq!(sheet.data_rows().len(), 1);

        let alice = &sheet.data_rows()[0];
        assert_eq!(sheet.text(alice, "Name").as_deref(), Some("Alice"));
        assert_eq!(sheet.text(alice, "Age").as_deref(), Some("30"));
        assert_eq!(sheet.value(alice, "Missing"), None);
    }

    #[test]
    fn sparse_rows_keep_column_positions() {
        let sheet = Sheet::from_text_rows("T", vec![vec!["A", "B", "C"], vec!["", "", "z"]]);
        let row = &sheet.data_rows()[0];
        assert_eq!(row.cells().len(), 1);
        assert_eq!(row.cells()[0].column(), 2);
        assert_eq!(sheet.value(row, "A"), None);
        assert_eq!(sheet.text(row, "C").as_deref(), Some("z"));
    }

    #[test]
    fn unnamed_columns_are_dropped() {
        let sheet = Sheet::from_text_rows(
            "T",
            vec![vec!["A", "", "C"], vec!["1", "2", "3"], vec!["", "only", ""]],
        );
        assert_eq!(sheet.header(), ["A", "C"]);
        assert_eq!(sheet.data_rows().len(), 1);
        let row = &sheet.data_rows()[0];
        assert_eq!(sheet.text(row, "C").as_deref(), Some("3"));
        assert_eq!(row.cells().len(), 2);
    }

    #[test]
    fn header_starts_at_first_non_blank_row() {
        let mut data = SheetData::default();
        data.cells.insert((3, 2), CellData::from_value("Name"));
        data.cells.insert((4, 2), CellData::from_value("Rex"));
        data.cells.insert((5, 2), CellData { value: None });
        let sheet = Sheet::from_sheet_data("Pets", &data);
        assert_eq!(sheet.header(), ["Name"]);
        assert_eq!(sheet.rows()[0].index(), 3);
        assert_eq!(sheet.data_rows().len(), 1);
        assert_eq!(sheet.data_rows()[0].index(), 4);
    }

    #[test]
    fn duplicate_header_resolves_to_first_column() {
        let sheet = Sheet::from_text_rows("T", [["Tag", "Tag"], ["a", "b"]]);
        let row = &sheet.data_rows()[0];
        assert_eq!(sheet.column_index("Tag"), Some(0));
        assert_eq!(sheet.text(row, "Tag").as_deref(), Some("a"));
    }

    #[test]
    fn blank_data_rows_are_compacted() {
        let sheet = Sheet::from_text_rows("T", [["Name"], ["A"], [""], ["B"]]);
        let rows = sheet.data_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(sheet.text(&rows[1], "Name").as_deref(), Some("B"));
        assert_eq!(rows[0].index(), 2);
        assert_eq!(rows[1].index(), 4);
    }

    #[test]
    fn empty_sheet_has_no_rows() {
        let sheet = Sheet::from_sheet_data("Blank", &SheetData::default());
        assert!(sheet.is_empty());
        assert!(sheet.header().is_empty());
        assert!(sheet.data_rows().is_empty());
    }
}
