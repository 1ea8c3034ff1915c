use indexmap::IndexMap;
use serde::Serialize;
use sheetgraph_workbook::Sheet;

/// Target indices per referenced group, in first-match order.
pub type NodeRefs = IndexMap<String, Vec<usize>>;

/// The graph built from one spreadsheet.
///
/// Serializes with the field names `nodeGroups` and `settings`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    node_groups: IndexMap<String, NodeGroup>,
    settings: Sheet,
}

impl Model {
    pub(crate) fn new(node_groups: IndexMap<String, NodeGroup>, settings: Sheet) -> Self {
        Self {
            node_groups,
            settings,
        }
    }

    /// Node groups keyed by sheet name, in sheet order.
    pub fn node_groups(&self) -> &IndexMap<String, NodeGroup> {
        &self.node_groups
    }

    pub fn node_group(&self, name: &str) -> Option<&NodeGroup> {
        self.node_groups.get(name)
    }

    /// The raw settings sheet; an empty, unnamed sheet when there is none.
    pub fn settings(&self) -> &Sheet {
        &self.settings
    }

    pub fn has_settings(&self) -> bool {
        !self.settings.name().is_empty()
    }

    /// Nodes of `target` referenced by node `index` of `group`.
    pub fn referenced_nodes(&self, group: &str, index: usize, target: &str) -> Vec<&Node> {
        let Some(targets) = self.node_group(target) else {
            return Vec::new();
        };
        self.node_group(group)
            .and_then(|g| g.node(index))
            .map(|node| {
                node.refs_to(target)
                    .iter()
                    .filter_map(|&i| targets.node(i))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_string_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// The nodes of one sheet.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeGroup {
    name: String,
    label: Option<String>,
    property_names: Vec<String>,
    refd_node_groups: Vec<RefdNodeGroup>,
    nodes: Vec<Node>,
}

impl NodeGroup {
    pub(crate) fn new(
        name: impl Into<String>,
        label: Option<String>,
        property_names: Vec<String>,
        nodes: Vec<Node>,
    ) -> Self {
        Self {
            name: name.into(),
            label,
            property_names,
            refd_node_groups: Vec::new(),
            nodes,
        }
    }

    pub(crate) fn set_refd_node_groups(&mut self, refd: Vec<RefdNodeGroup>) {
        self.refd_node_groups = refd;
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// First header column of the sheet, used as the default display label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Non-reference column names in header order.
    pub fn property_names(&self) -> &[String] {
        &self.property_names
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.property_names.iter().any(|p| p == name)
    }

    pub fn refd_node_groups(&self) -> &[RefdNodeGroup] {
        &self.refd_node_groups
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A group referenced from a sheet's header. Present whether or not any row matched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RefdNodeGroup {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl RefdNodeGroup {
    pub fn new(name: impl Into<String>, label: Option<String>) -> Self {
        Self {
            name: name.into(),
            label,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// One data row.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Node {
    properties: Vec<NodeProperty>,
    refs: NodeRefs,
}

impl Node {
    pub(crate) fn new(properties: Vec<NodeProperty>) -> Self {
        Self {
            properties,
            refs: NodeRefs::new(),
        }
    }

    pub(crate) fn set_refs(&mut self, refs: NodeRefs) {
        self.refs = refs;
    }

    pub fn properties(&self) -> &[NodeProperty] {
        &self.properties
    }

    /// Value of the first property called `name`.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    pub fn refs(&self) -> &NodeRefs {
        &self.refs
    }

    /// Indices into `group`'s nodes; empty when nothing was referenced.
    pub fn refs_to(&self, group: &str) -> &[usize] {
        self.refs.get(group).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NodeProperty {
    name: String,
    value: String,
}

impl NodeProperty {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}
