use sheetgraph_common::LiteralValue;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CellData {
    pub value: Option<LiteralValue>,
}

impl CellData {
    pub fn from_value<V: Into<LiteralValue>>(value: V) -> Self {
        Self {
            value: Some(value.into()),
        }
    }

    /// Cell text, `None` when the cell holds nothing.
    pub fn text(&self) -> Option<String> {
        self.value.as_ref().and_then(LiteralValue::to_text)
    }
}

#[derive(Clone, Debug, Default)]
pub struct BackendCaps {
    pub read: bool,
    pub bytes_input: bool,
    pub multiple_sheets: bool,
    pub typed_values: bool,
    pub hidden_sheets: bool,
}

/// Raw sheet contents keyed by 1-based `(row, col)`. Only non-empty cells are stored.
#[derive(Clone, Debug, Default)]
pub struct SheetData {
    pub cells: BTreeMap<(u32, u32), CellData>,
    pub dimensions: Option<(u32, u32)>,
    pub hidden: bool,
}

impl SheetData {
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

pub trait SpreadsheetReader {
    type Error: std::error::Error + Send + Sync + 'static;

    fn capabilities(&self) -> BackendCaps;

    /// Sheet names in the order the spreadsheet defines them.
    fn sheet_names(&self) -> Result<Vec<String>, Self::Error>;

    fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, Self::Error>
    where
        Self: Sized;

    fn open_reader(reader: Box<dyn Read + Send + Sync>) -> Result<Self, Self::Error>
    where
        Self: Sized;

    fn open_bytes(data: Vec<u8>) -> Result<Self, Self::Error>
    where
        Self: Sized;

    fn read_sheet(&mut self, sheet: &str) -> Result<SheetData, Self::Error>;

    fn sheet_bounds(&self, sheet: &str) -> Option<(u32, u32)>;
}
