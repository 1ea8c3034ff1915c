//! Meta crate that re-exports the sheetgraph layers. Depend on this crate and
//! pick input backends through feature flags; the underlying crates stay
//! reachable for deeper integration.

#[cfg(feature = "common")]
pub use sheetgraph_common as common;

#[cfg(feature = "workbook")]
pub use sheetgraph_workbook as workbook;

#[cfg(feature = "model")]
pub use sheetgraph_model as model;

#[cfg(feature = "common")]
pub use sheetgraph_common::LiteralValue;

#[cfg(feature = "workbook")]
pub use sheetgraph_workbook::{
    IoError, LoaderOptions, LoaderStats, Sheet, Spreadsheet, SpreadsheetLoader, SpreadsheetReader,
    load_spreadsheet,
};

#[cfg(feature = "json")]
pub use sheetgraph_workbook::JsonAdapter;

#[cfg(feature = "csv")]
pub use sheetgraph_workbook::{CsvAdapter, CsvReadOptions};

#[cfg(feature = "calamine")]
pub use sheetgraph_workbook::CalamineAdapter;

#[cfg(feature = "model")]
pub use sheetgraph_model::{
    ConfigError, GraphConfig, Model, ModelBuilder, Node, NodeGroup, NodeProperty, NodeRefs,
    RefdNodeGroup, SheetClassification, SheetKind, build_model,
};
