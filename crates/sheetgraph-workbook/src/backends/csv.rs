use crate::error::IoError;
use crate::traits::{BackendCaps, CellData, SheetData, SpreadsheetReader};
use sheetgraph_common::LiteralValue;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CsvTrim {
    #[default]
    None,
    All,
}

#[derive(Clone, Debug)]
pub struct CsvReadOptions {
    /// Field delimiter as a single byte. Use `b'\t'` for TSV.
    pub delimiter: u8,
    pub trim: CsvTrim,
    /// Sheet name used when the input has no file name (bytes, readers).
    pub default_sheet_name: String,
}

impl Default for CsvReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: CsvTrim::None,
            default_sheet_name: "Sheet1".to_string(),
        }
    }
}

/// Only non-empty cells are stored.
#[derive(Clone, Debug, Default)]
struct CsvSheet {
    cells: BTreeMap<(u32, u32), LiteralValue>,
    max_row: u32,
    max_col: u32,
}

impl CsvSheet {
    fn bounds(&self) -> Option<(u32, u32)> {
        if self.max_row == 0 || self.max_col == 0 {
            None
        } else {
            Some((self.max_row, self.max_col))
        }
    }

    fn set_bounds(&mut self, rows: u32, cols: u32) {
        self.max_row = self.max_row.max(rows);
        self.max_col = self.max_col.max(cols);
    }
}

/// CSV backend adapter.
///
/// Semantics:
/// - A CSV file is one sheet named after the file stem; bytes and readers
///   produce a single sheet named [`CsvReadOptions::default_sheet_name`].
/// - A directory opens every `*.csv` file in it as a sheet, ordered by file name.
/// - UTF-8 only. Every field is read as text; there is no type inference so
///   the text seen downstream is exactly what the file holds.
pub struct CsvAdapter {
    sheets: Vec<(String, CsvSheet)>,
    read_options: CsvReadOptions,
    caps: BackendCaps,
}

impl Default for CsvAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvAdapter {
    pub fn new() -> Self {
        Self::new_with_options(CsvReadOptions::default())
    }

    pub fn new_with_options(read_options: CsvReadOptions) -> Self {
        Self {
            sheets: Vec::new(),
            read_options,
            caps: BackendCaps {
                read: true,
                bytes_input: true,
                multiple_sheets: true,
                typed_values: false,
                hidden_sheets: false,
            },
        }
    }

    pub fn read_options(&self) -> &CsvReadOptions {
        &self.read_options
    }

    pub fn open_path_with_options<P: AsRef<Path>>(
        path: P,
        read_options: CsvReadOptions,
    ) -> Result<Self, IoError> {
        let path = path.as_ref();
        let mut adapter = Self::new_with_options(read_options);
        if path.is_dir() {
            let mut files: Vec<_> = std::fs::read_dir(path)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| {
                    p.is_file()
                        && p.extension()
                            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
                })
                .collect();
            files.sort();
            for file in files {
                adapter.add_file(&file)?;
            }
        } else {
            adapter.add_file(path)?;
        }
        Ok(adapter)
    }

    pub fn open_reader_with_options(
        reader: Box<dyn Read + Send + Sync>,
        read_options: CsvReadOptions,
    ) -> Result<Self, IoError> {
        let mut adapter = Self::new_with_options(read_options);
        let name = adapter.read_options.default_sheet_name.clone();
        adapter.add_sheet_reader(name, reader)?;
        Ok(adapter)
    }

    pub fn open_bytes_with_options(
        bytes: Vec<u8>,
        read_options: CsvReadOptions,
    ) -> Result<Self, IoError> {
        Self::open_reader_with_options(Box::new(std::io::Cursor::new(bytes)), read_options)
    }

    fn add_file(&mut self, path: &Path) -> Result<(), IoError> {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.read_options.default_sheet_name.clone());
        let file = File::open(path)?;
        self.add_sheet_reader(name, Box::new(BufReader::new(file)))
    }

    /// Parse `reader` as one more sheet called `name`, replacing a sheet of the same name.
    pub fn add_sheet_reader(
        &mut self,
        name: impl Into<String>,
        reader: Box<dyn Read + Send + Sync>,
    ) -> Result<(), IoError> {
        let mut rb = csv::ReaderBuilder::new();
        rb.delimiter(self.read_options.delimiter)
            .has_headers(false)
            .flexible(true);

        match self.read_options.trim {
            CsvTrim::None => rb.trim(csv::Trim::None),
            CsvTrim::All => rb.trim(csv::Trim::All),
        };

        let mut rdr = rb.from_reader(reader);
        let mut sheet = CsvSheet::default();

        for (ri, rec) in rdr.records().enumerate() {
            let rec = rec?;
            let row = ri as u32 + 1;
            sheet.set_bounds(row, rec.len() as u32);
            for (ci, field) in rec.iter().enumerate() {
                if !field.is_empty() {
                    sheet
                        .cells
                        .insert((row, ci as u32 + 1), LiteralValue::Text(field.to_string()));
                }
            }
        }

        let name = name.into();
        match self.sheets.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = sheet,
            None => self.sheets.push((name, sheet)),
        }
        Ok(())
    }

    pub fn add_sheet_bytes(&mut self, name: impl Into<String>, bytes: Vec<u8>) -> Result<(), IoError> {
        self.add_sheet_reader(name, Box::new(std::io::Cursor::new(bytes)))
    }

    fn find_sheet(&self, name: &str) -> Option<&CsvSheet> {
        self.sheets.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }
}

impl SpreadsheetReader for CsvAdapter {
    type Error = IoError;

    fn capabilities(&self) -> BackendCaps {
        self.caps.clone()
    }

    fn sheet_names(&self) -> Result<Vec<String>, Self::Error> {
        Ok(self.sheets.iter().map(|(n, _)| n.clone()).collect())
    }

    fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, Self::Error>
    where
        Self: Sized,
    {
        Self::open_path_with_options(path, CsvReadOptions::default())
    }

    fn open_reader(reader: Box<dyn Read + Send + Sync>) -> Result<Self, Self::Error>
    where
        Self: Sized,
    {
        Self::open_reader_with_options(reader, CsvReadOptions::default())
    }

    fn open_bytes(data: Vec<u8>) -> Result<Self, Self::Error>
    where
        Self: Sized,
    {
        Self::open_bytes_with_options(data, CsvReadOptions::default())
    }

    fn read_sheet(&mut self, sheet: &str) -> Result<SheetData, Self::Error> {
        let Some(csv_sheet) = self.find_sheet(sheet) else {
            return Err(IoError::MissingSheet(sheet.to_string()));
        };
        let cells = csv_sheet
            .cells
            .iter()
            .map(|(&k, v)| (k, CellData::from_value(v.clone())))
            .collect();
        Ok(SheetData {
            cells,
            dimensions: csv_sheet.bounds(),
            hidden: false,
        })
    }

    fn sheet_bounds(&self, sheet: &str) -> Option<(u32, u32)> {
        self.find_sheet(sheet).and_then(CsvSheet::bounds)
    }
}
