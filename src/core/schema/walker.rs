use super::{Descriptor, Group, Leaf, ParameterSchema};
use indexmap::IndexMap;
use serde_json::Value;

/// Parameter name to metadata, for one group level.
pub type ParamTree<T> = IndexMap<String, MetadataNode<T>>;

/// Definition group name to that group's parameters.
pub type GroupedMetadata<T> = IndexMap<String, ParamTree<T>>;

/// One entry of a walked group.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataNode<T> {
    Param(T),
    Group(ParamTree<T>),
}

impl<T> MetadataNode<T> {
    pub fn as_param(&self) -> Option<&T> {
        match self {
            MetadataNode::Param(value) => Some(value),
            MetadataNode::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&ParamTree<T>> {
        match self {
            MetadataNode::Param(_) => None,
            MetadataNode::Group(tree) => Some(tree),
        }
    }
}

/// Walk every group, keeping the full leaf descriptors.
pub fn walk(schema: &ParameterSchema) -> GroupedMetadata<&Leaf> {
    walk_with(schema, |leaf| leaf)
}

/// Walk every group, projecting a single descriptor key. Missing keys yield `None`.
pub fn walk_key<'a>(schema: &'a ParameterSchema, key: &str) -> GroupedMetadata<Option<&'a Value>> {
    walk_with(schema, |leaf| leaf.get(key))
}

/// Walk every group, mapping each leaf through `project`.
///
/// Group nesting is preserved: nested groups are stored under their own
/// parameter name, definition groups under the group name.
pub fn walk_with<'a, T, F>(schema: &'a ParameterSchema, project: F) -> GroupedMetadata<T>
where
    F: Fn(&'a Leaf) -> T,
{
    schema
        .groups()
        .iter()
        .map(|(name, group)| (name.clone(), walk_group(group, &project)))
        .collect()
}

fn walk_group<'a, T, F>(group: &'a Group, project: &F) -> ParamTree<T>
where
    F: Fn(&'a Leaf) -> T,
{
    group
        .properties
        .iter()
        .map(|(name, descriptor)| {
            let node = match descriptor {
                Descriptor::Leaf(leaf) => MetadataNode::Param(project(leaf)),
                Descriptor::Group(nested) => MetadataNode::Group(walk_group(nested, project)),
            };
            (name.clone(), node)
        })
        .collect()
}
