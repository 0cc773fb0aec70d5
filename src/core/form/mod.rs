//! Schema to form rendering.
//!
//! [`render`] turns walked schema metadata into an ordered tree of
//! [`FieldDescriptor`]s. Order follows schema definition order exactly, so the
//! same schema always produces the same form. [`html`] turns that tree into
//! escaped markup.

pub mod html;

pub use html::{render_form_fragment, render_page};

use crate::core::schema::{walk, GroupedMetadata, Leaf, MetadataNode, ParamTree, ParamType, ParameterSchema};
use serde::Serialize;
use serde_json::Value;

/// One rendered form element: an input or a titled section of further fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

/// Input widget used for a field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldKind {
    Select { options: Vec<String> },
    Number,
    Text,
    Checkbox,
    Group {
        title: String,
        fields: Vec<FieldDescriptor>,
    },
}

impl FieldDescriptor {
    pub fn is_group(&self) -> bool {
        matches!(self.kind, FieldKind::Group { .. })
    }

    /// The current value as it is written into markup.
    pub fn display_value(&self) -> String {
        self.value.as_ref().map(display_value).unwrap_or_default()
    }
}

/// Render walked metadata. Definition groups without a visible parameter
/// produce no section at all.
pub fn render(grouped: &GroupedMetadata<&Leaf>) -> Vec<FieldDescriptor> {
    grouped
        .iter()
        .filter_map(|(group, tree)| section(group, tree))
        .collect()
}

/// Walk and render a schema in one step.
pub fn render_all(schema: &ParameterSchema) -> Vec<FieldDescriptor> {
    render(&walk(schema))
}

fn render_tree(tree: &ParamTree<&Leaf>) -> Vec<FieldDescriptor> {
    tree.iter()
        .filter_map(|(name, node)| match node {
            MetadataNode::Param(leaf) => construct_field(name, leaf),
            MetadataNode::Group(nested) => section(name, nested),
        })
        .collect()
}

fn section(name: &str, tree: &ParamTree<&Leaf>) -> Option<FieldDescriptor> {
    let fields = render_tree(tree);
    if fields.is_empty() {
        return None;
    }
    Some(FieldDescriptor {
        name: name.to_string(),
        label: None,
        kind: FieldKind::Group {
            title: name.to_string(),
            fields,
        },
        value: None,
        help_text: None,
    })
}

fn construct_field(name: &str, leaf: &Leaf) -> Option<FieldDescriptor> {
    if leaf.hidden {
        return None;
    }
    let kind = match &leaf.choices {
        Some(choices) => FieldKind::Select {
            options: choices.iter().map(display_value).collect(),
        },
        None => input_kind(&leaf.param_type),
    };
    Some(FieldDescriptor {
        name: name.to_string(),
        label: leaf.description.clone(),
        kind,
        value: leaf.default.clone(),
        help_text: leaf.help_text.clone(),
    })
}

fn input_kind(param_type: &ParamType) -> FieldKind {
    match param_type {
        ParamType::Boolean => FieldKind::Checkbox,
        ParamType::Integer | ParamType::Number => FieldKind::Number,
        ParamType::String | ParamType::Other(_) => FieldKind::Text,
    }
}

/// Strings are written bare, everything else in its JSON form.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
