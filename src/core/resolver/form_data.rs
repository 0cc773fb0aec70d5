use super::ResolveError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raw form submission: every field name maps to the values submitted for it,
/// in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmittedForm {
    values: IndexMap<String, Vec<String>>,
}

impl SubmittedForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, value)` pairs as they arrive in an urlencoded body.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut form = Self::new();
        for (name, value) in pairs {
            form.insert(name, value);
        }
        form
    }

    /// Append one more submitted value for `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values
            .entry(name.into())
            .or_default()
            .push(value.into());
    }

    /// Values submitted for `name`; `None` when the field was not submitted.
    pub fn values(&self, name: &str) -> Option<&[String]> {
        self.values
            .get(name)
            .map(Vec::as_slice)
            .filter(|values| !values.is_empty())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Which of several values submitted for one field is used.
///
/// Forms may legitimately submit a name more than once (a checkbox is followed
/// by a hidden `false` input), so the default takes the first value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiValuePolicy {
    #[default]
    First,
    Last,
    Reject,
}

impl MultiValuePolicy {
    pub fn pick<'a>(self, param: &str, values: &'a [String]) -> Result<Option<&'a str>, ResolveError> {
        let picked = match self {
            MultiValuePolicy::First => values.first(),
            MultiValuePolicy::Last => values.last(),
            MultiValuePolicy::Reject => {
                if values.len() > 1 {
                    return Err(ResolveError::MultipleValues {
                        param: param.to_string(),
                        count: values.len(),
                    });
                }
                values.first()
            }
        };
        Ok(picked.map(String::as_str))
    }
}

impl fmt::Display for MultiValuePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MultiValuePolicy::First => write!(f, "first"),
            MultiValuePolicy::Last => write!(f, "last"),
            MultiValuePolicy::Reject => write!(f, "reject"),
        }
    }
}

impl FromStr for MultiValuePolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "first" => Ok(MultiValuePolicy::First),
            "last" => Ok(MultiValuePolicy::Last),
            "reject" => Ok(MultiValuePolicy::Reject),
            _ => Err(format!(
                "invalid multi_value_policy '{}'; supported values are first, last, reject",
                value
            )),
        }
    }
}
