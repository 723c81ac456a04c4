// SPDX-License-Identifier: MIT OR Apache-2.0
//! Parameter values carried by host errors.

use std::fmt;

use bpx_error_schema::ErrorSchema;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Placeholder shown for a documented parameter the host did not send.
pub const NOT_AVAILABLE: &str = "n/a";

/// Value of one documented parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// The host did not send this parameter.
    NotAvailable,
    /// Value exactly as sent by the host.
    Provided(Value),
}

impl ParamValue {
    /// Whether the host sent this parameter.
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Provided(_))
    }

    /// The value as a string slice, if the host sent a JSON string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Provided(Value::String(s)) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::Provided(Value::String(s.to_string()))
    }
}

impl From<Value> for ParamValue {
    fn from(v: Value) -> Self {
        Self::Provided(v)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAvailable => f.write_str(NOT_AVAILABLE),
            Self::Provided(v) => write_value(f, v),
        }
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
            Self::Provided(v) => v.serialize(serializer),
        }
    }
}

/// Strings render bare; everything else renders as compact JSON.
pub(crate) fn write_value(f: &mut fmt::Formatter<'_>, v: &Value) -> fmt::Result {
    match v {
        Value::String(s) => f.write_str(s),
        other => write!(f, "{other}"),
    }
}

/// Render a raw JSON value for display.
pub fn display_value(v: &Value) -> String {
    struct Shown<'a>(&'a Value);
    impl fmt::Display for Shown<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write_value(f, self.0)
        }
    }
    Shown(v).to_string()
}

/// Documented parameters of a classified error, in schema order.
///
/// Holds exactly the keys of the matched schema; it is empty when the code is
/// unknown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpectedParams {
    entries: Vec<(&'static str, ParamValue)>,
}

impl ExpectedParams {
    /// Every documented parameter seeded with [`ParamValue::NotAvailable`].
    pub fn seeded(schema: &ErrorSchema) -> Self {
        Self {
            entries: schema
                .expected_params
                .iter()
                .map(|name| (*name, ParamValue::NotAvailable))
                .collect(),
        }
    }

    /// Overwrite `name` if it is documented. Returns `false` for an
    /// undocumented name, leaving the set unchanged.
    pub(crate) fn fill(&mut self, name: &str, value: Value) -> bool {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => {
                *slot = ParamValue::Provided(value);
                true
            }
            None => false,
        }
    }

    /// Value of a documented parameter.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// Iterate `(name, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ParamValue)> {
        self.entries.iter().map(|(n, v)| (*n, v))
    }

    /// Parameter names in schema order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(n, _)| *n)
    }

    /// Number of documented parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no documented parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ExpectedParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
