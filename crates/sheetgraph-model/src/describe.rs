//! Pass 2: reference descriptors from header names.

use crate::config::GraphConfig;
use crate::model::{NodeGroup, RefdNodeGroup};
use crate::reference::parse_column_ref;
use indexmap::IndexMap;
use sheetgraph_workbook::Sheet;

/// One descriptor per reference column of `sheet`, in header order.
///
/// Precondition: `groups` holds the pass-1 output for every node group, so
/// that every target's property names are known.
pub fn describe_references(
    sheet: &Sheet,
    groups: &IndexMap<String, NodeGroup>,
    config: &GraphConfig,
) -> Vec<RefdNodeGroup> {
    sheet
        .header()
        .iter()
        .filter_map(|column| parse_column_ref(column, groups, config))
        .map(|r| RefdNodeGroup::new(r.group, r.label.map(str::to_string)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_node_groups;
    use sheetgraph_workbook::Spreadsheet;

    #[test]
    fn descriptors_follow_header_order() {
        let cfg = GraphConfig::default();
        let book = Spreadsheet::new()
            .with_sheet(Sheet::from_text_rows("People", [["Name", "Age"]]))
            .with_sheet(Sheet::from_text_rows("Cars", [["Plate"]]))
            .with_sheet(Sheet::from_text_rows(
                "Pets",
                [[
                    "Name",
                    "Owner.Name",
                    "People.Name.vet",
                    "Cars.Plate",
                    "Cars.Color",
                    "People.Name.a.b",
                ]],
            ));
        let names: Vec<String> = book.sheet_names().map(str::to_string).collect();
        let groups = extract_node_groups(&book, &names, &cfg);

        let refd = describe_references(book.sheet("Pets").unwrap(), &groups, &cfg);
        assert_eq!(
            refd,
            vec![
                RefdNodeGroup::new("People", Some("vet".to_string())),
                RefdNodeGroup::new("Cars", None),
            ]
        );
    }

    #[test]
    fn self_reference_is_allowed() {
        let cfg = GraphConfig::default();
        let book = Spreadsheet::new().with_sheet(Sheet::from_text_rows(
            "People",
            [["Name", "People.Name.parent"]],
        ));
        let names = vec!["People".to_string()];
        let groups = extract_node_groups(&book, &names, &cfg);
        let refd = describe_references(book.sheet("People").unwrap(), &groups, &cfg);
        assert_eq!(refd, vec![RefdNodeGroup::new("People", Some("parent".into()))]);
    }
}
