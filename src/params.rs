//! Caller-supplied parameters for one resolution call.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Record;
use crate::error::{DesError, Result};

/// A single parameter value: a string, an integer, or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Str(String),
    List(Vec<String>),
}

impl ParamValue {
    /// Integer view of the value, accepting numeric strings.
    pub fn as_int(&self, param: &str) -> Result<i64> {
        match self {
            ParamValue::Int(i) => Ok(*i),
            ParamValue::Str(s) => s.trim().parse::<i64>().map_err(|_| DesError::InvalidValue {
                param: param.to_string(),
                value: s.clone(),
                reason: "expected an integer".to_string(),
            }),
            ParamValue::List(items) => Err(DesError::InvalidValue {
                param: param.to_string(),
                value: items.join(","),
                reason: "expected an integer, got a list".to_string(),
            }),
        }
    }

    /// The value as it appears in a path when no special formatting applies.
    ///
    /// Lists render concatenated, which is only meaningful for multi-band
    /// values; callers that need a scalar check for lists first.
    pub fn render_plain(&self) -> String {
        match self {
            ParamValue::Int(i) => i.to_string(),
            ParamValue::Str(s) => s.clone(),
            ParamValue::List(items) => items.concat(),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, ParamValue::List(_))
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Str(s)
    }
}

impl From<i64> for ParamValue {
    fn from(i: i64) -> Self {
        ParamValue::Int(i)
    }
}

impl From<i32> for ParamValue {
    fn from(i: i32) -> Self {
        ParamValue::Int(i64::from(i))
    }
}

impl From<u32> for ParamValue {
    fn from(i: u32) -> Self {
        ParamValue::Int(i64::from(i))
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(items: Vec<String>) -> Self {
        ParamValue::List(items)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(items: Vec<&str>) -> Self {
        ParamValue::List(items.into_iter().map(str::to_string).collect())
    }
}

/// Named parameters for one expansion. Keys are matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, ParamValue>", into = "BTreeMap<String, ParamValue>")]
pub struct ParameterBag {
    values: BTreeMap<String, ParamValue>,
}

impl From<BTreeMap<String, ParamValue>> for ParameterBag {
    fn from(values: BTreeMap<String, ParamValue>) -> Self {
        let mut bag = ParameterBag::new();
        for (key, value) in values {
            bag.insert(&key, value);
        }
        bag
    }
}

impl From<ParameterBag> for BTreeMap<String, ParamValue> {
    fn from(bag: ParameterBag) -> Self {
        bag.values
    }
}

impl ParameterBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<ParamValue>) {
        self.values.insert(key.to_lowercase(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(&key.to_lowercase())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.values.iter()
    }

    /// Parse `key=value` pairs, as given on the command line.
    ///
    /// Values stay strings, so leading zeros survive for identifiers; padded
    /// variables parse them on use. A comma separated `band` becomes a list so
    /// multi-band names concatenate.
    pub fn from_pairs<S: AsRef<str>>(pairs: &[S]) -> Result<Self> {
        let mut bag = ParameterBag::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let Some((key, value)) = pair.split_once('=') else {
                return Err(DesError::InvalidValue {
                    param: pair.to_string(),
                    value: String::new(),
                    reason: "expected key=value".to_string(),
                });
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(DesError::InvalidValue {
                    param: pair.to_string(),
                    value: value.to_string(),
                    reason: "empty parameter name".to_string(),
                });
            }
            let value = value.trim();
            let parsed = if key.eq_ignore_ascii_case("band") && value.contains(',') {
                ParamValue::List(value.split(',').map(|b| b.trim().to_string()).collect())
            } else {
                ParamValue::Str(value.to_string())
            };
            bag.insert(key, parsed);
        }
        Ok(bag)
    }

    /// Build a bag from the columns of one query result row.
    ///
    /// Nulls are skipped so a missing column reads as an absent parameter.
    /// Floats and nested objects are not path material and are skipped too.
    pub fn from_record(record: &Record) -> Self {
        let mut bag = ParameterBag::new();
        for (column, value) in record {
            let parsed = match value {
                serde_json::Value::String(s) => ParamValue::Str(s.clone()),
                serde_json::Value::Number(n) => match n.as_i64() {
                    Some(i) => ParamValue::Int(i),
                    None => continue,
                },
                serde_json::Value::Bool(b) => ParamValue::Str(b.to_string()),
                serde_json::Value::Array(items) => ParamValue::List(
                    items
                        .iter()
                        .filter_map(|item| item.as_str().map(str::to_string))
                        .collect(),
                ),
                serde_json::Value::Null | serde_json::Value::Object(_) => continue,
            };
            bag.insert(column, parsed);
        }
        bag
    }
}
