//! Pass 3: edges from reference cells.

use crate::config::GraphConfig;
use crate::model::{NodeGroup, NodeRefs};
use crate::reference::parse_column_ref;
use indexmap::IndexMap;
use sheetgraph_workbook::Sheet;

/// Whether a reference cell's text points at a node whose property holds `needle`.
///
/// Plain case-sensitive substring test; an empty needle never matches.
pub fn cell_matches(cell_text: &str, needle: &str) -> bool {
    !needle.is_empty() && cell_text.contains(needle)
}

/// Resolve the reference cells of `sheet` into target indices.
///
/// Returns one [`NodeRefs`] per data row, aligned with the group's nodes.
/// Every target node whose referenced property matches the cell text (see
/// [`cell_matches`]) contributes its index, in target order; duplicates are kept.
///
/// Precondition: `groups` holds the pass-1 output for every node group.
pub fn resolve_references(
    sheet: &Sheet,
    groups: &IndexMap<String, NodeGroup>,
    config: &GraphConfig,
) -> Vec<NodeRefs> {
    let header = sheet.header();
    sheet
        .data_rows()
        .iter()
        .map(|row| {
            let mut refs = NodeRefs::new();
            for column in header {
                let Some(text) = sheet.text(row, column) else {
                    continue;
                };
                let Some(col_ref) = parse_column_ref(column, groups, config) else {
                    continue;
                };
                let Some(target) = groups.get(col_ref.group) else {
                    continue;
                };
                for (index, node) in target.nodes().iter().enumerate() {
                    let matched = node
                        .value(col_ref.property)
                        .is_some_and(|needle| cell_matches(&text, needle));
                    if matched {
                        refs.entry(col_ref.group.to_string())
                            .or_default()
                            .push(index);
                    }
                }
            }
            refs
        })
        .collect()
}
