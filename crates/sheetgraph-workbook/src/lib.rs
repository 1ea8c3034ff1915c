//! Spreadsheet accessor for sheetgraph.
//!
//! Backends implement [`SpreadsheetReader`] and hand over sparse
//! [`SheetData`]; [`SpreadsheetLoader`] turns them into a [`Spreadsheet`] of
//! [`Sheet`]s, each exposing an ordered header, ordered rows and cell lookup
//! by column name.

pub mod backends;
pub mod error;
pub mod loader;
pub mod sheet;
pub mod spreadsheet;
pub mod traits;

#[cfg(feature = "calamine")]
pub use backends::CalamineAdapter;
#[cfg(feature = "csv")]
pub use backends::CsvAdapter;
#[cfg(feature = "json")]
pub use backends::JsonAdapter;
#[cfg(feature = "csv")]
pub use backends::csv::{CsvReadOptions, CsvTrim};
pub use error::IoError;
pub use loader::{LoaderOptions, LoaderStats, SpreadsheetLoader, load_spreadsheet};
pub use sheet::{Row, RowCell, Sheet};
pub use spreadsheet::Spreadsheet;
pub use traits::{BackendCaps, CellData, SheetData, SpreadsheetReader};

// Re-export for convenience
pub use sheetgraph_common::LiteralValue;
