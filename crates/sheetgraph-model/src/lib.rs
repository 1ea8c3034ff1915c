//! Spreadsheet-to-graph model.
//!
//! Sheets become node groups and rows become nodes; columns named
//! `Group.Property` or `Group.Property.Label` turn cell text into edges to
//! the nodes of `Group` whose `Property` value occurs in the cell.
//!
//! Sheet names decide what a sheet is:
//!
//! - `settings` is passed through untouched as [`Model::settings`];
//! - names starting with `#` are ignored;
//! - `X-Y`, where both `X` and `Y` are sheets, is a relation sheet (collected
//!   by [`classify_sheets`] but not turned into edges yet);
//! - everything else is a node group.
//!
//! ```
//! use sheetgraph_model::build_model;
//! use sheetgraph_workbook::{Sheet, Spreadsheet};
//!
//! let book = Spreadsheet::new()
//!     .with_sheet(Sheet::from_text_rows("People", [["Name", "Age"], ["Alice", "30"]]))
//!     .with_sheet(Sheet::from_text_rows("Pets", [["Name", "People.Name"], ["Rex", "Alice"]]));
//!
//! let model = build_model(&book);
//! let rex = &model.node_group("Pets").unwrap().nodes()[0];
//! assert_eq!(rex.refs_to("People"), [0]);
//! ```

mod builder;
pub mod classify;
mod config;
pub mod describe;
pub mod extract;
mod model;
pub mod reference;
pub mod resolve;

pub use builder::{ModelBuilder, build_model};
pub use classify::{SheetClassification, SheetKind, classify_sheets};
pub use config::{ConfigError, GraphConfig};
pub use model::{Model, Node, NodeGroup, NodeProperty, NodeRefs, RefdNodeGroup};
pub use reference::{ColumnRef, parse_column_ref};
