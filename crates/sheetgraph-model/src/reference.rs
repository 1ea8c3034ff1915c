//! Reference column names: `Group.Property` and `Group.Property.Label`.

use crate::config::GraphConfig;
use crate::model::NodeGroup;
use indexmap::IndexMap;

/// A header column that points into another node group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnRef<'a> {
    pub group: &'a str,
    pub property: &'a str,
    pub label: Option<&'a str>,
}

/// Parse `column` as a reference into one of `groups`.
///
/// Exactly two or three segments are accepted, the first must name a group
/// and the second one of that group's property names. Needs every group's
/// property names, so it only gives stable answers once extraction is done.
pub fn parse_column_ref<'a>(
    column: &'a str,
    groups: &IndexMap<String, NodeGroup>,
    config: &GraphConfig,
) -> Option<ColumnRef<'a>> {
    let segments: Vec<&str> = column.split(config.reference_separator).collect();
    if !(2..=3).contains(&segments.len()) {
        return None;
    }
    let target = groups.get(segments[0])?;
    if !target.has_property(segments[1]) {
        return None;
    }
    Some(ColumnRef {
        group: segments[0],
        property: segments[1],
        label: segments.get(2).copied(),
    })
}

/// Whether `column` can hold a property at all (reference syntax never does).
pub fn is_property_column(column: &str, config: &GraphConfig) -> bool {
    !column.contains(config.reference_separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeGroup;

    fn groups() -> IndexMap<String, NodeGroup> {
        let mut groups = IndexMap::new();
        groups.insert(
            "People".to_string(),
            NodeGroup::new(
                "People",
                Some("Name".into()),
                vec!["Name".into(), "Age".into()],
                Vec::new(),
            ),
        );
        groups
    }

    #[test]
    fn two_and_three_segments_parse() {
        let cfg = GraphConfig::default();
        let groups = groups();
        assert_eq!(
            parse_column_ref("People.Name", &groups, &cfg),
            Some(ColumnRef {
                group: "People",
                property: "Name",
                label: None
            })
        );
        assert_eq!(
            parse_column_ref("People.Name.owner", &groups, &cfg).and_then(|r| r.label),
            Some("owner")
        );
    }

    #[test]
    fn unknown_group_or_property_is_not_a_reference() {
        let cfg = GraphConfig::default();
        let groups = groups();
        assert_eq!(parse_column_ref("Cars.Name", &groups, &cfg), None);
        assert_eq!(parse_column_ref("People.Height", &groups, &cfg), None);
        assert_eq!(parse_column_ref("People", &groups, &cfg), None);
        assert_eq!(parse_column_ref("people.name", &groups, &cfg), None);
    }

    #[test]
    fn four_segments_are_not_a_reference() {
        let cfg = GraphConfig::default();
        assert_eq!(parse_column_ref("People.Name.owner.x", &groups(), &cfg), None);
    }

    #[test]
    fn dotted_columns_never_hold_properties() {
        let cfg = GraphConfig::default();
        assert!(is_property_column("Name", &cfg));
        assert!(!is_property_column("People.Name", &cfg));
        assert!(!is_property_column("v1.2", &cfg));
    }
}
