//! Sheet classification by name.

use crate::config::GraphConfig;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SheetKind {
    /// The pass-through settings sheet.
    Settings,
    /// Ignored sheet (name starts with the comment prefix).
    Comment,
    /// `X-Y` sheet where both `X` and `Y` are sheets. Collected, not resolved.
    Relation,
    NodeGroup,
}

/// Partition of a spreadsheet's sheet names, each list in spreadsheet order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetClassification {
    pub settings_group_name: Option<String>,
    pub node_group_names: Vec<String>,
    pub ref_sheet_names: Vec<String>,
    pub ignored_sheet_names: Vec<String>,
}

impl SheetClassification {
    pub fn kind_of(&self, name: &str) -> Option<SheetKind> {
        if self.settings_group_name.as_deref() == Some(name) {
            Some(SheetKind::Settings)
        } else if self.node_group_names.iter().any(|n| n == name) {
            Some(SheetKind::NodeGroup)
        } else if self.ref_sheet_names.iter().any(|n| n == name) {
            Some(SheetKind::Relation)
        } else if self.ignored_sheet_names.iter().any(|n| n == name) {
            Some(SheetKind::Comment)
        } else {
            None
        }
    }
}

/// The two sides of a relation sheet name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RelationSheetName<'a> {
    pub source: &'a str,
    pub target: &'a str,
}

/// Split `name` on the relation separator. Only exactly two non-empty
/// segments form a relation name; whether both sides exist is up to the caller.
pub fn parse_relation_sheet_name<'a>(
    name: &'a str,
    config: &GraphConfig,
) -> Option<RelationSheetName<'a>> {
    let mut parts = name.split(config.relation_separator);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(source), Some(target), None) if !source.is_empty() && !target.is_empty() => {
            Some(RelationSheetName { source, target })
        }
        _ => None,
    }
}

/// Classify one sheet name against the full set of sheet names.
pub fn classify_sheet(name: &str, sheet_names: &HashSet<&str>, config: &GraphConfig) -> SheetKind {
    if name == config.settings_sheet {
        return SheetKind::Settings;
    }
    if name.starts_with(config.comment_prefix.as_str()) {
        return SheetKind::Comment;
    }
    match parse_relation_sheet_name(name, config) {
        Some(rel) if sheet_names.contains(rel.source) && sheet_names.contains(rel.target) => {
            SheetKind::Relation
        }
        _ => SheetKind::NodeGroup,
    }
}

/// Classify every sheet name, preserving the given order inside each list.
pub fn classify_sheets<'a, I>(names: I, config: &GraphConfig) -> SheetClassification
where
    I: IntoIterator<Item = &'a str>,
{
    let names: Vec<&str> = names.into_iter().collect();
    let all: HashSet<&str> = names.iter().copied().collect();

    let mut out = SheetClassification::default();
    for name in names {
        match classify_sheet(name, &all, config) {
            SheetKind::Settings => out.settings_group_name = Some(name.to_string()),
            SheetKind::Comment => out.ignored_sheet_names.push(name.to_string()),
            SheetKind::Relation => out.ref_sheet_names.push(name.to_string()),
            SheetKind::NodeGroup => out.node_group_names.push(name.to_string()),
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        node_groups = out.node_group_names.len(),
        relations = out.ref_sheet_names.len(),
        ignored = out.ignored_sheet_names.len(),
        settings = out.settings_group_name.is_some(),
        "classified sheets"
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(names: &[&str]) -> SheetClassification {
        classify_sheets(names.iter().copied(), &GraphConfig::default())
    }

    #[test]
    fn partitions_all_kinds() {
        let c = classify(&["People", "settings", "#notes", "Pets", "People-Pets"]);
        assert_eq!(c.settings_group_name.as_deref(), Some("settings"));
        assert_eq!(c.node_group_names, ["People", "Pets"]);
        assert_eq!(c.ref_sheet_names, ["People-Pets"]);
        assert_eq!(c.ignored_sheet_names, ["#notes"]);
    }

    #[test]
    fn dash_without_both_sides_is_a_node_group() {
        let c = classify(&["People", "People-Cars", "Half-Life-3"]);
        assert_eq!(c.node_group_names, ["People", "People-Cars", "Half-Life-3"]);
        assert!(c.ref_sheet_names.is_empty());
    }

    #[test]
    fn relation_sides_may_be_any_sheet() {
        let c = classify(&["settings", "#x", "settings-#x"]);
        assert_eq!(c.ref_sheet_names, ["settings-#x"]);
        assert!(c.node_group_names.is_empty());
    }

    #[test]
    fn comment_prefix_wins_over_relation_syntax() {
        let c = classify(&["A", "B", "#A-B"]);
        assert_eq!(c.ignored_sheet_names, ["#A-B"]);
    }

    #[test]
    fn relation_name_needs_two_non_empty_segments() {
        let cfg = GraphConfig::default();
        assert_eq!(
            parse_relation_sheet_name("A-B", &cfg),
            Some(RelationSheetName {
                source: "A",
                target: "B"
            })
        );
        assert_eq!(parse_relation_sheet_name("A-", &cfg), None);
        assert_eq!(parse_relation_sheet_name("-B", &cfg), None);
        assert_eq!(parse_relation_sheet_name("A-B-C", &cfg), None);
        assert_eq!(parse_relation_sheet_name("AB", &cfg), None);
    }

    #[test]
    fn settings_match_is_exact() {
        let c = classify(&["Settings", "settings2"]);
        assert_eq!(c.settings_group_name, None);
        assert_eq!(c.node_group_names, ["Settings", "settings2"]);
    }

    #[test]
    fn kind_of_reports_each_list() {
        let c = classify(&["People", "settings", "#notes", "Pets", "People-Pets"]);
        assert_eq!(c.kind_of("People"), Some(SheetKind::NodeGroup));
        assert_eq!(c.kind_of("settings"), Some(SheetKind::Settings));
        assert_eq!(c.kind_of("#notes"), Some(SheetKind::Comment));
        assert_eq!(c.kind_of("People-Pets"), Some(SheetKind::Relation));
        assert_eq!(c.kind_of("Nope"), None);
    }

    #[test]
    fn custom_conventions() {
        let cfg = GraphConfig {
            settings_sheet: "config".to_string(),
            comment_prefix: "//".to_string(),
            relation_separator: '~',
            ..GraphConfig::default()
        };
        let c = classify_sheets(["config", "//skip", "A", "B", "A~B", "A-B"], &cfg);
        assert_eq!(c.settings_group_name.as_deref(), Some("config"));
        assert_eq!(c.ignored_sheet_names, ["//skip"]);
        assert_eq!(c.ref_sheet_names, ["A~B"]);
        assert_eq!(c.node_group_names, ["A", "B", "A-B"]);
    }
}
