#![allow(clippy::result_large_err)]
//! Turns a submitted form into a validated, typed parameter set.
//!
//! Resolution walks the schema in definition order. For every parameter the
//! submitted value is cast to the declared type, or the schema default is
//! used when nothing was submitted. Parameters marked `exists` are checked
//! against the file system. The notification address is merged in last and
//! the whole mapping is validated against the schema document.

pub mod cast;
pub mod error;
pub mod form_data;
pub mod paths;

pub use cast::cast_value;
pub use error::ResolveError;
pub use form_data::{MultiValuePolicy, SubmittedForm};
pub use paths::check_paths;

use crate::core::schema::{walk, Leaf, MetadataNode, ParamTree, ParameterSchema};
use crate::utils::serialization::{compute_sha256_hex, to_canonical_json};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

/// Key under which the notification address is stored.
pub const NOTIFICATION_KEY: &str = "EMAIL";

/// Final parameter mapping handed to the workflow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedParams(Map<String, Value>);

impl ResolvedParams {
    pub fn new(values: Map<String, Value>) -> Self {
        Self(values)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn notification_address(&self) -> Option<&str> {
        self.0.get(NOTIFICATION_KEY).and_then(Value::as_str)
    }

    /// Compact JSON with keys sorted at every level.
    pub fn to_canonical_json(&self) -> Result<String, serde_json::Error> {
        to_canonical_json(&self.0)
    }

    /// Hex digest of the canonical form; equal mappings share a digest.
    pub fn content_hash(&self) -> Result<String, serde_json::Error> {
        Ok(compute_sha256_hex(self.to_canonical_json()?.as_bytes()))
    }
}

pub struct FormResolver<'a> {
    schema: &'a ParameterSchema,
    policy: MultiValuePolicy,
    notification_address: Option<String>,
}

impl<'a> FormResolver<'a> {
    pub fn new(schema: &'a ParameterSchema) -> Self {
        Self {
            schema,
            policy: MultiValuePolicy::default(),
            notification_address: None,
        }
    }

    pub fn with_policy(mut self, policy: MultiValuePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Address stored under `EMAIL`; empty addresses are ignored.
    pub fn with_notification_address(mut self, address: Option<String>) -> Self {
        self.notification_address = address.filter(|value| !value.trim().is_empty());
        self
    }

    pub fn resolve(&self, form: &SubmittedForm) -> Result<ResolvedParams, ResolveError> {
        let mut params = Map::new();
        // Definition groups only organise the form; their members land at the top level.
        for tree in walk(self.schema).values() {
            self.resolve_tree(tree, form, &mut params)?;
        }

        if let Some(address) = &self.notification_address {
            params.insert(NOTIFICATION_KEY.to_string(), Value::String(address.clone()));
        }

        validate(self.schema.document(), &params)?;
        info!(count = params.len(), "form resolved");
        Ok(ResolvedParams::new(params))
    }

    fn resolve_tree(
        &self,
        tree: &ParamTree<&Leaf>,
        form: &SubmittedForm,
        out: &mut Map<String, Value>,
    ) -> Result<(), ResolveError> {
        for (name, node) in tree {
            match node {
                MetadataNode::Param(leaf) => {
                    if let Some(value) = self.resolve_leaf(name, leaf, form)? {
                        out.insert(name.clone(), value);
                    }
                }
                MetadataNode::Group(nested) => {
                    let mut inner = Map::new();
                    self.resolve_tree(nested, form, &mut inner)?;
                    out.insert(name.clone(), Value::Object(inner));
                }
            }
        }
        Ok(())
    }

    fn resolve_leaf(
        &self,
        name: &str,
        leaf: &Leaf,
        form: &SubmittedForm,
    ) -> Result<Option<Value>, ResolveError> {
        let submitted = match form.values(name) {
            Some(values) => self.policy.pick(name, values)?,
            None => None,
        };
        let (value, from_form) = match submitted {
            Some(raw) => (cast_value(name, &leaf.param_type, raw)?, true),
            None => match &leaf.default {
                Some(default) => (default.clone(), false),
                None => {
                    debug!(param = name, "no submitted value and no default");
                    return Ok(None);
                }
            },
        };

        if leaf.requires_existing_path() {
            // An untouched empty default means no path was given yet.
            let pattern = value.as_str().filter(|p| from_form || !p.is_empty());
            if let Some(pattern) = pattern {
                check_paths(name, pattern)?;
            }
        }
        Ok(Some(value))
    }
}

/// Validate the resolved mapping against the full schema document, reporting
/// the first violation.
fn validate(document: &Value, params: &Map<String, Value>) -> Result<(), ResolveError> {
    let validator = jsonschema::validator_for(document).map_err(|err| {
        ResolveError::InvalidSchema {
            message: err.to_string(),
        }
    })?;
    let instance = Value::Object(params.clone());
    let violation = validator
        .iter_errors(&instance)
        .next()
        .map(|err| (err.instance_path.to_string(), err.to_string()));
    match violation {
        Some((path, message)) => Err(ResolveError::SchemaViolation { path, message }),
        None => Ok(()),
    }
}
