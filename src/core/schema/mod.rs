//! Parameter schema model.
//!
//! A pipeline schema groups its parameters into named definition groups. Every
//! property of a group is parsed once, at load time, into a [`Descriptor`]:
//! either a [`Leaf`] describing one scalar parameter or a nested [`Group`].
//! Traversals then match on the variant instead of probing JSON keys.

pub mod loader;
pub mod walker;

pub use loader::{load_schema, read_schema};
pub use walker::{walk, walk_key, walk_with, GroupedMetadata, MetadataNode, ParamTree};

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::debug;

/// Root keys under which definition groups may live, in precedence order.
const LAYOUT_PRECEDENCE: [SchemaLayout; 3] = [
    SchemaLayout::Defs,
    SchemaLayout::Definitions,
    SchemaLayout::LegacyDefs,
];

/// Errors raised while parsing a schema document.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("schema is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("schema root must be a JSON object")]
    NotAnObject,
    #[error("schema has no definition groups (expected one of `$defs`, `definitions`, `defs`)")]
    MissingDefinitions,
    #[error("definition group '{group}' must be a JSON object")]
    MalformedGroup { group: String },
    #[error("`properties` of '{group}' must be a JSON object")]
    MalformedProperties { group: String },
}

/// Which root key holds the definition groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaLayout {
    /// JSON Schema 2020-12 `$defs`.
    Defs,
    /// Draft-07 `definitions`.
    Definitions,
    /// Legacy `defs`.
    LegacyDefs,
}

impl SchemaLayout {
    pub fn key(self) -> &'static str {
        match self {
            SchemaLayout::Defs => "$defs",
            SchemaLayout::Definitions => "definitions",
            SchemaLayout::LegacyDefs => "defs",
        }
    }

    /// Pick the layout of a schema root. When several keys are present the
    /// newest convention wins.
    pub fn detect(root: &Map<String, Value>) -> Option<Self> {
        LAYOUT_PRECEDENCE
            .into_iter()
            .find(|layout| root.contains_key(layout.key()))
    }
}

/// Declared type of a leaf parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    Boolean,
    Integer,
    Number,
    String,
    Other(String),
}

impl ParamType {
    fn from_name(name: &str) -> Self {
        match name {
            "boolean" => ParamType::Boolean,
            "integer" => ParamType::Integer,
            "number" => ParamType::Number,
            "string" => ParamType::String,
            other => ParamType::Other(other.to_string()),
        }
    }

    /// Parse a `type` value; arrays such as `["string", "null"]` use their
    /// first non-null entry.
    fn parse(value: &Value) -> Option<Self> {
        match value {
            Value::String(name) => Some(Self::from_name(name)),
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_str)
                .find(|name| *name != "null")
                .map(Self::from_name),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ParamType::Boolean => "boolean",
            ParamType::Integer => "integer",
            ParamType::Number => "number",
            ParamType::String => "string",
            ParamType::Other(name) => name,
        }
    }
}

/// A schema node describing a single parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    pub param_type: ParamType,
    pub default: Option<Value>,
    pub description: Option<String>,
    pub help_text: Option<String>,
    pub choices: Option<Vec<Value>>,
    pub hidden: bool,
    pub exists: bool,
    pub format: Option<String>,
    fields: Map<String, Value>,
}

impl Leaf {
    fn from_fields(param_type: ParamType, fields: &Map<String, Value>) -> Self {
        Leaf {
            param_type,
            default: fields.get("default").cloned(),
            description: string_field(fields, "description"),
            help_text: string_field(fields, "help_text"),
            choices: fields.get("enum").and_then(Value::as_array).cloned(),
            hidden: marker(fields, "hidden"),
            exists: marker(fields, "exists"),
            format: string_field(fields, "format"),
            fields: fields.clone(),
        }
    }

    /// Look up any key of the original descriptor.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Whether the resolved value must name existing, readable paths.
    pub fn requires_existing_path(&self) -> bool {
        self.exists
    }
}

/// A named cluster of parameters; also used for nested `object` parameters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    pub title: Option<String>,
    pub properties: IndexMap<String, Descriptor>,
}

impl Group {
    fn parse(name: &str, fields: &Map<String, Value>) -> Result<Self, SchemaError> {
        let mut properties = IndexMap::new();
        match fields.get("properties") {
            None => {}
            Some(Value::Object(props)) => {
                for (param, raw) in props {
                    if let Some(descriptor) = Descriptor::parse(param, raw)? {
                        properties.insert(param.clone(), descriptor);
                    }
                }
            }
            Some(_) => {
                return Err(SchemaError::MalformedProperties {
                    group: name.to_string(),
                })
            }
        }
        Ok(Group {
            title: string_field(fields, "title"),
            properties,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Either a scalar parameter or a nested group of parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Descriptor {
    Leaf(Leaf),
    Group(Group),
}

impl Descriptor {
    /// Parse one property. Descriptors that are neither typed leaves nor
    /// groups cannot be rendered or resolved and are skipped.
    fn parse(name: &str, raw: &Value) -> Result<Option<Self>, SchemaError> {
        let Value::Object(fields) = raw else {
            debug!(parameter = name, "skipping non-object parameter descriptor");
            return Ok(None);
        };
        let declared = fields.get("type");
        let is_group = match declared {
            Some(Value::String(t)) => t == "object",
            None => fields.contains_key("properties"),
            Some(_) => false,
        };
        if is_group {
            return Group::parse(name, fields).map(|group| Some(Descriptor::Group(group)));
        }
        match declared.and_then(ParamType::parse) {
            Some(param_type) => Ok(Some(Descriptor::Leaf(Leaf::from_fields(param_type, fields)))),
            None => {
                debug!(parameter = name, "skipping parameter without a usable type");
                Ok(None)
            }
        }
    }
}

/// A parsed pipeline parameter schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSchema {
    layout: Option<SchemaLayout>,
    groups: IndexMap<String, Group>,
    document: Value,
}

impl ParameterSchema {
    /// The schema used when none could be loaded: no groups, accepts anything.
    pub fn empty() -> Self {
        ParameterSchema {
            layout: None,
            groups: IndexMap::new(),
            document: Value::Object(Map::new()),
        }
    }

    pub fn parse(text: &str) -> Result<Self, SchemaError> {
        let document: Value = serde_json::from_str(text)?;
        Self::from_value(document)
    }

    pub fn from_value(document: Value) -> Result<Self, SchemaError> {
        let root = document.as_object().ok_or(SchemaError::NotAnObject)?;
        let layout = SchemaLayout::detect(root).ok_or(SchemaError::MissingDefinitions)?;
        let Some(Value::Object(raw_groups)) = root.get(layout.key()) else {
            return Err(SchemaError::MissingDefinitions);
        };

        let mut groups = IndexMap::new();
        for (name, raw) in raw_groups {
            let fields = raw.as_object().ok_or_else(|| SchemaError::MalformedGroup {
                group: name.clone(),
            })?;
            groups.insert(name.clone(), Group::parse(name, fields)?);
        }
        debug!(
            layout = layout.key(),
            groups = groups.len(),
            "parsed parameter schema"
        );

        Ok(ParameterSchema {
            layout: Some(layout),
            groups,
            document,
        })
    }

    pub fn layout(&self) -> Option<SchemaLayout> {
        self.layout
    }

    pub fn groups(&self) -> &IndexMap<String, Group> {
        &self.groups
    }

    /// The original JSON document, used for full validation.
    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn is_empty(&self) -> bool {
        self.groups.values().all(Group::is_empty)
    }
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Presence markers count unless explicitly `false` or `null`.
fn marker(fields: &Map<String, Value>, key: &str) -> bool {
    !matches!(
        fields.get(key),
        None | Some(Value::Null) | Some(Value::Bool(false))
    )
}
