use crate::IoError;
use crate::traits::{BackendCaps, CellData, SheetData, SpreadsheetReader};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use sheetgraph_common::LiteralValue;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
struct JsonWorkbook {
    #[serde(default = "default_version")]
    version: u32,
    /// Sheets in workbook order.
    #[serde(default)]
    sheets: Vec<JsonSheet>,
}

fn default_version() -> u32 {
    1
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
struct JsonSheet {
    name: String,
    /// Sparse cells with 1-based coordinates.
    #[serde(default)]
    cells: Vec<JsonCell>,
    /// Dense row-major grid of scalars; `null` marks an absent cell.
    #[serde(default)]
    rows: Vec<Vec<serde_json::Value>>,
    #[serde(default)]
    dimensions: Option<(u32, u32)>,
    #[serde(default)]
    hidden: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct JsonCell {
    row: u32,
    col: u32,
    #[serde(default)]
    value: Option<JsonValue>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "type", content = "value")]
enum JsonValue {
    Int(i64),
    Number(f64),
    Text(String),
    Boolean(bool),
    Empty,
    Date(String),
    DateTime(String),
    Time(String),
    Error(String),
}

/// JSON workbook backend.
///
/// ```json
/// { "sheets": [
///     { "name": "People", "rows": [["Name", "Age"], ["Alice", 30]] },
///     { "name": "Pets", "cells": [{ "row": 1, "col": 1, "value": { "type": "Text", "value": "Name" } }] }
/// ] }
/// ```
pub struct JsonAdapter {
    data: JsonWorkbook,
    caps: BackendCaps,
}

impl Default for JsonAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonAdapter {
    pub fn new() -> Self {
        Self {
            data: JsonWorkbook::default(),
            caps: BackendCaps {
                read: true,
                bytes_input: true,
                multiple_sheets: true,
                typed_values: true,
                hidden_sheets: true,
            },
        }
    }

    fn from_workbook(data: JsonWorkbook) -> Self {
        JsonAdapter {
            data,
            ..JsonAdapter::new()
        }
    }

    pub fn version(&self) -> u32 {
        self.data.version
    }

    fn find_sheet(&self, name: &str) -> Option<&JsonSheet> {
        self.data.sheets.iter().find(|s| s.name == name)
    }

    fn to_sheet_data(js: &JsonSheet) -> Result<SheetData, IoError> {
        let mut data = SheetData {
            dimensions: js.dimensions,
            hidden: js.hidden,
            ..SheetData::default()
        };
        for (r, row) in js.rows.iter().enumerate() {
            for (c, raw) in row.iter().enumerate() {
                let (r, c) = (r as u32 + 1, c as u32 + 1);
                if let Some(value) = scalar_to_literal(raw, r, c)? {
                    data.cells.insert((r, c), CellData { value: Some(value) });
                }
            }
        }
        for cell in &js.cells {
            let value = cell
                .value
                .as_ref()
                .map(|v| json_to_literal(v, cell.row, cell.col))
                .transpose()?;
            data.cells.insert((cell.row, cell.col), CellData { value });
        }
        if data.dimensions.is_none() {
            data.dimensions = data
                .cells
                .keys()
                .fold(None, |acc: Option<(u32, u32)>, &(r, c)| match acc {
                    Some((mr, mc)) => Some((mr.max(r), mc.max(c))),
                    None => Some((r, c)),
                });
        }
        Ok(data)
    }
}

impl SpreadsheetReader for JsonAdapter {
    type Error = IoError;

    fn capabilities(&self) -> BackendCaps {
        self.caps.clone()
    }

    fn sheet_names(&self) -> Result<Vec<String>, Self::Error> {
        Ok(self.data.sheets.iter().map(|s| s.name.clone()).collect())
    }

    fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, Self::Error>
    where
        Self: Sized,
    {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        let data: JsonWorkbook = serde_json::from_reader(reader)?;
        Ok(Self::from_workbook(data))
    }

    fn open_reader(reader: Box<dyn Read + Send + Sync>) -> Result<Self, Self::Error>
    where
        Self: Sized,
    {
        let data: JsonWorkbook = serde_json::from_reader(reader)?;
        Ok(Self::from_workbook(data))
    }

    fn open_bytes(bytes: Vec<u8>) -> Result<Self, Self::Error>
    where
        Self: Sized,
    {
        let data: JsonWorkbook = serde_json::from_slice(&bytes)?;
        Ok(Self::from_workbook(data))
    }

    fn read_sheet(&mut self, sheet: &str) -> Result<SheetData, Self::Error> {
        match self.find_sheet(sheet) {
            Some(js) => Self::to_sheet_data(js),
            None => Err(IoError::MissingSheet(sheet.to_string())),
        }
    }

    fn sheet_bounds(&self, sheet: &str) -> Option<(u32, u32)> {
        self.find_sheet(sheet)
            .and_then(|s| Self::to_sheet_data(s).ok())
            .and_then(|d| d.dimensions)
    }
}

fn scalar_to_literal(
    raw: &serde_json::Value,
    row: u32,
    col: u32,
) -> Result<Option<LiteralValue>, IoError> {
    use serde_json::Value as V;
    Ok(match raw {
        V::Null => None,
        V::Bool(b) => Some(LiteralValue::Boolean(*b)),
        V::Number(n) => match n.as_i64() {
            Some(i) => Some(LiteralValue::Int(i)),
            None => n.as_f64().map(LiteralValue::Number),
        },
        V::String(s) if s.is_empty() => None,
        V::String(s) => Some(LiteralValue::Text(s.clone())),
        V::Array(_) | V::Object(_) => {
            return Err(IoError::InvalidValue {
                row,
                col,
                message: "expected a scalar".to_string(),
            });
        }
    })
}

fn json_to_literal(v: &JsonValue, row: u32, col: u32) -> Result<LiteralValue, IoError> {
    let invalid = |message: String| IoError::InvalidValue { row, col, message };
    Ok(match v {
        JsonValue::Int(i) => LiteralValue::Int(*i),
        JsonValue::Number(n) => LiteralValue::Number(*n),
        JsonValue::Text(s) => LiteralValue::Text(s.clone()),
        JsonValue::Boolean(b) => LiteralValue::Boolean(*b),
        JsonValue::Empty => LiteralValue::Empty,
        JsonValue::Date(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(LiteralValue::Date)
            .map_err(|e| invalid(format!("bad date `{s}`: {e}")))?,
        JsonValue::DateTime(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
            .map(LiteralValue::DateTime)
            .map_err(|e| invalid(format!("bad date-time `{s}`: {e}")))?,
        JsonValue::Time(s) => NaiveTime::parse_from_str(s, "%H:%M:%S")
            .map(LiteralValue::Time)
            .map_err(|e| invalid(format!("bad time `{s}`: {e}")))?,
        JsonValue::Error(s) => LiteralValue::Error(s.clone()),
    })
}
