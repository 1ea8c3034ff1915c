use crate::classify::{SheetClassification, classify_sheets};
use crate::config::GraphConfig;
use crate::describe::describe_references;
use crate::extract::extract_node_groups;
use crate::model::Model;
use crate::resolve::resolve_references;
use sheetgraph_workbook::Spreadsheet;

/// Builds a [`Model`] from a loaded spreadsheet.
///
/// The build runs classification, then each pass over *all* node groups
/// before the next pass starts:
///
/// 1. [`extract_node_groups`] - nodes and property names;
/// 2. [`describe_references`] - needs every group's property names;
/// 3. [`resolve_references`] - needs every group's nodes.
#[derive(Clone, Debug, Default)]
pub struct ModelBuilder {
    config: GraphConfig,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GraphConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn classify(&self, spreadsheet: &Spreadsheet) -> SheetClassification {
        classify_sheets(spreadsheet.sheet_names(), &self.config)
    }

    pub fn build(&self, spreadsheet: &Spreadsheet) -> Model {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("build_model", sheets = spreadsheet.len()).entered();

        let classification = self.classify(spreadsheet);
        let mut groups =
            extract_node_groups(spreadsheet, &classification.node_group_names, &self.config);

        let descriptors: Vec<_> = groups
            .keys()
            .map(|name| {
                spreadsheet
                    .sheet(name)
                    .map(|sheet| describe_references(sheet, &groups, &self.config))
                    .unwrap_or_default()
            })
            .collect();
        for (group, refd) in groups.values_mut().zip(descriptors) {
            group.set_refd_node_groups(refd);
        }

        let resolved: Vec<_> = groups
            .keys()
            .map(|name| {
                spreadsheet
                    .sheet(name)
                    .map(|sheet| resolve_references(sheet, &groups, &self.config))
                    .unwrap_or_default()
            })
            .collect();
        for (group, rows) in groups.values_mut().zip(resolved) {
            for (node, refs) in group.nodes_mut().iter_mut().zip(rows) {
                node.set_refs(refs);
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            node_groups = groups.len(),
            nodes = groups.values().map(|g| g.len()).sum::<usize>(),
            edges = groups
                .values()
                .flat_map(|g| g.nodes())
                .map(|n| n.refs().values().map(Vec::len).sum::<usize>())
                .sum::<usize>(),
            "built model"
        );

        let settings = classification
            .settings_group_name
            .as_deref()
            .and_then(|name| spreadsheet.sheet(name))
            .cloned()
            .unwrap_or_default();

        Model::new(groups, settings)
    }
}

/// Build a model with the default naming conventions.
pub fn build_model(spreadsheet: &Spreadsheet) -> Model {
    ModelBuilder::new().build(spreadsheet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetgraph_workbook::Sheet;

    #[test]
    fn settings_sheet_is_passed_through() {
        let settings = Sheet::from_text_rows("settings", [["key", "value"], ["title", "Zoo"]]);
        let book = Spreadsheet::new()
            .with_sheet(Sheet::from_text_rows("Animals", [["Name"], ["Leo"]]))
            .with_sheet(settings.clone());
        let model = build_model(&book);
        assert!(model.has_settings());
        assert_eq!(model.settings(), &settings);
        assert!(model.node_group("settings").is_none());
    }

    #[test]
    fn missing_settings_is_an_empty_sheet() {
        let book = Spreadsheet::new().with_sheet(Sheet::from_text_rows("A", [["x"]]));
        let model = build_model(&book);
        assert!(!model.has_settings());
        assert!(model.settings().is_empty());
    }

    #[test]
    fn custom_config_changes_separators() {
        let cfg = GraphConfig {
            reference_separator: ':',
            ..GraphConfig::default()
        };
        let book = Spreadsheet::new()
            .with_sheet(Sheet::from_text_rows("People", [["Name"], ["Alice"]]))
            .with_sheet(Sheet::from_text_rows(
                "Pets",
                [["Name", "People:Name", "v1.0"], ["Rex", "Alice", "x"]],
            ));
        let model = ModelBuilder::with_config(cfg).build(&book);
        let pets = model.node_group("Pets").unwrap();
        assert_eq!(pets.property_names(), ["Name", "v1.0"]);
        assert_eq!(pets.nodes()[0].refs_to("People"), [0]);
    }

    #[test]
    fn classification_matches_builder() {
        let book: Spreadsheet = ["A", "B", "A-B", "#c"]
            .into_iter()
            .map(|n| Sheet::from_text_rows(n, [["x"]]))
            .collect();
        let builder = ModelBuilder::new();
        let c = builder.classify(&book);
        assert_eq!(c.node_group_names, ["A", "B"]);
        let model = builder.build(&book);
        assert_eq!(model.node_groups().keys().collect::<Vec<_>>(), ["A", "B"]);
    }
}
