//! Pass 1: nodes and property names.

use crate::config::GraphConfig;
use crate::model::{Node, NodeGroup, NodeProperty};
use crate::reference::is_property_column;
use indexmap::IndexMap;
use sheetgraph_workbook::{Sheet, Spreadsheet};

/// Build the property-only node group for one sheet.
///
/// Postcondition: `refd_node_groups` and every node's `refs` are empty.
pub fn extract_node_group(sheet: &Sheet, config: &GraphConfig) -> NodeGroup {
    let header = sheet.header();

    let property_names = header
        .iter()
        .filter(|name| is_property_column(name, config))
        .cloned()
        .collect();

    let nodes = sheet
        .data_rows()
        .iter()
        .map(|row| {
            let properties = row
                .cells()
                .iter()
                .filter_map(|cell| {
                    let name = sheet.column_name(cell.column())?;
                    if !is_property_column(name, config) {
                        return None;
                    }
                    cell.value()
                        .to_text()
                        .map(|value| NodeProperty::new(name, value))
                })
                .collect();
            Node::new(properties)
        })
        .collect();

    NodeGroup::new(sheet.name(), header.first().cloned(), property_names, nodes)
}

/// Run [`extract_node_group`] for every named sheet, keyed and ordered by `names`.
pub fn extract_node_groups(
    spreadsheet: &Spreadsheet,
    names: &[String],
    config: &GraphConfig,
) -> IndexMap<String, NodeGroup> {
    names
        .iter()
        .filter_map(|name| {
            spreadsheet
                .sheet(name)
                .map(|sheet| (name.clone(), extract_node_group(sheet, config)))
        })
        .collect()
}
