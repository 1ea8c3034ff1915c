#![cfg(feature = "calamine")]

use crate::traits::{BackendCaps, CellData, SheetData, SpreadsheetReader};
use sheetgraph_common::LiteralValue;
use std::collections::BTreeMap;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{
    Data, Range, Reader, SheetVisible, Sheets, open_workbook_auto, open_workbook_auto_from_rs,
};

/// xlsx / xls / ods backend. Sheets are read eagerly on open, in workbook order.
pub struct CalamineAdapter {
    names: Vec<String>,
    sheets: BTreeMap<String, SheetData>,
}

impl CalamineAdapter {
    fn convert_value(data: &Data) -> LiteralValue {
        match data {
            Data::Empty => LiteralValue::Empty,
            Data::String(s) => LiteralValue::Text(s.clone()),
            Data::Float(f) => LiteralValue::Number(*f),
            Data::Int(i) => LiteralValue::Int(*i),
            Data::Bool(b) => LiteralValue::Boolean(*b),
            Data::Error(e) => LiteralValue::Error(e.to_string()),
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(ndt) if ndt.time() == chrono::NaiveTime::MIN => LiteralValue::Date(ndt.date()),
                Some(ndt) => LiteralValue::DateTime(ndt),
                None => LiteralValue::Number(dt.as_f64()),
            },
            Data::DateTimeIso(s) => LiteralValue::Text(s.clone()),
            Data::DurationIso(s) => LiteralValue::Text(s.clone()),
        }
    }

    fn range_to_cells(range: &Range<Data>) -> BTreeMap<(u32, u32), CellData> {
        let mut cells = BTreeMap::new();
        let (start_row, start_col) = range.start().unwrap_or_default();

        for (row, col, val) in range.used_cells() {
            // Calamine is 0-based relative to the range start; cells are 1-based absolute.
            let excel_row = row as u32 + start_row + 1;
            let excel_col = col as u32 + start_col + 1;
            let value = Self::convert_value(val);
            if !value.is_empty() {
                cells.insert((excel_row, excel_col), CellData { value: Some(value) });
            }
        }
        cells
    }

    fn from_sheets<RS: Read + Seek>(mut workbook: Sheets<RS>) -> Result<Self, calamine::Error> {
        let metadata = workbook.sheets_metadata().to_vec();
        let mut names = Vec::with_capacity(metadata.len());
        let mut sheets = BTreeMap::new();
        for meta in metadata {
            let range = workbook.worksheet_range(&meta.name)?;
            let cells = Self::range_to_cells(&range);
            let dimensions = range.end().map(|(r, c)| (r + 1, c + 1));
            let hidden = !matches!(meta.visible, SheetVisible::Visible);
            sheets.insert(
                meta.name.clone(),
                SheetData {
                    cells,
                    dimensions,
                    hidden,
                },
            );
            names.push(meta.name);
        }
        Ok(Self { names, sheets })
    }
}

impl SpreadsheetReader for CalamineAdapter {
    type Error = calamine::Error;

    fn capabilities(&self) -> BackendCaps {
        BackendCaps {
            read: true,
            bytes_input: true,
            multiple_sheets: true,
            typed_values: true,
            hidden_sheets: true,
        }
    }

    fn sheet_names(&self) -> Result<Vec<String>, Self::Error> {
        Ok(self.names.clone())
    }

    fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, Self::Error>
    where
        Self: Sized,
    {
        Self::from_sheets(open_workbook_auto(path)?)
    }

    fn open_reader(mut reader: Box<dyn Read + Send + Sync>) -> Result<Self, Self::Error>
    where
        Self: Sized,
    {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Self::open_bytes(buf)
    }

    fn open_bytes(data: Vec<u8>) -> Result<Self, Self::Error>
    where
        Self: Sized,
    {
        Self::from_sheets(open_workbook_auto_from_rs(Cursor::new(data))?)
    }

    fn read_sheet(&mut self, sheet: &str) -> Result<SheetData, Self::Error> {
        Ok(self.sheets.get(sheet).cloned().unwrap_or_default())
    }

    fn sheet_bounds(&self, sheet: &str) -> Option<(u32, u32)> {
        self.sheets.get(sheet).and_then(|s| s.dimensions)
    }
}
