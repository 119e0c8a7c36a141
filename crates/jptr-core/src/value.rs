//! Immutable JSON value tree with structural sharing.
//!
//! A [`JsonValue`] is never edited in place. Containers hold their children
//! behind an [`Arc`], so cloning any value is O(1) and a "modified" container
//! is a fresh allocation whose untouched children are the same `Arc`s as in
//! the input. The structural helpers at the bottom of this module
//! (`with_member`, `with_element_inserted`, ...) are the only way the pointer
//! engine produces new containers.
//!
//! Objects are stored as `Vec<(String, JsonValue)>` in insertion order. Keys
//! are unique within one object.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Map, Number, Value};
use std::fmt;
use std::sync::Arc;

/// Object members in insertion order.
pub type Members = Vec<(String, JsonValue)>;

/// A JSON document node.
#[derive(Debug, Clone, Default)]
pub enum JsonValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(Arc<str>),
    Array(Arc<Vec<JsonValue>>),
    /// Key-value pairs in insertion order.
    Object(Arc<Members>),
}

/// The six JSON node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        };
        f.write_str(s)
    }
}

impl JsonValue {
    /// Build an array from its elements.
    pub fn array<I>(items: I) -> Self
    where
        I: IntoIterator<Item = JsonValue>,
    {
        JsonValue::Array(Arc::new(items.into_iter().collect()))
    }

    /// Build an object from key-value pairs.
    ///
    /// A repeated key overwrites the earlier value but keeps the position
    /// where the key first appeared.
    pub fn object<I, K>(members: I) -> Self
    where
        I: IntoIterator<Item = (K, JsonValue)>,
        K: Into<String>,
    {
        let mut out: Members = Vec::new();
        for (key, value) in members {
            let key = key.into();
            match out.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => out.push((key, value)),
            }
        }
        JsonValue::Object(Arc::new(out))
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            JsonValue::Null => ValueKind::Null,
            JsonValue::Bool(_) => ValueKind::Boolean,
            JsonValue::Number(_) => ValueKind::Number,
            JsonValue::String(_) => ValueKind::String,
            JsonValue::Array(_) => ValueKind::Array,
            JsonValue::Object(_) => ValueKind::Object,
        }
    }

    /// True for arrays and objects.
    pub fn is_container(&self) -> bool {
        matches!(self, JsonValue::Array(_) | JsonValue::Object(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            JsonValue::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[(String, JsonValue)]> {
        match self {
            JsonValue::Object(members) => Some(members.as_slice()),
            _ => None,
        }
    }

    /// Look up an object member. `None` for missing keys and non-objects.
    pub fn member(&self, key: &str) -> Option<&JsonValue> {
        self.as_object().and_then(|members| lookup(members, key))
    }

    /// Look up an array element. `None` when out of bounds or not an array.
    pub fn element(&self, index: usize) -> Option<&JsonValue> {
        self.as_array().and_then(|items| items.get(index))
    }

    /// Number of children of a container; scalars have none.
    pub fn len(&self) -> usize {
        match self {
            JsonValue::Array(items) => items.len(),
            JsonValue::Object(members) => members.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Whether two values are backed by the same allocation.
///
/// Only strings and containers are heap-backed; other kinds never share.
pub fn shares_structure(a: &JsonValue, b: &JsonValue) -> bool {
    match (a, b) {
        (JsonValue::String(x), JsonValue::String(y)) => Arc::ptr_eq(x, y),
        (JsonValue::Array(x), JsonValue::Array(y)) => Arc::ptr_eq(x, y),
        (JsonValue::Object(x), JsonValue::Object(y)) => Arc::ptr_eq(x, y),
        _ => false,
    }
}

pub(crate) fn lookup<'a>(members: &'a [(String, JsonValue)], key: &str) -> Option<&'a JsonValue> {
    members.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

// ----------------------------------------------------------------------------
// Structural updates
// ----------------------------------------------------------------------------

/// New object with `key` set to `value`.
///
/// An existing key keeps its position; a new key is appended.
pub fn with_member(members: &[(String, JsonValue)], key: &str, value: JsonValue) -> JsonValue {
    let mut out = members.to_vec();
    match out.iter_mut().find(|(k, _)| k == key) {
        Some(slot) => slot.1 = value,
        None => out.push((key.to_string(), value)),
    }
    JsonValue::Object(Arc::new(out))
}

/// New object without `key`. Remaining members keep their order.
pub fn without_member(members: &[(String, JsonValue)], key: &str) -> JsonValue {
    JsonValue::Object(Arc::new(
        members.iter().filter(|(k, _)| k != key).cloned().collect(),
    ))
}

/// New array with `value` inserted before `index`.
///
/// # Panics
///
/// Panics if `index > items.len()`.
pub fn with_element_inserted(items: &[JsonValue], index: usize, value: JsonValue) -> JsonValue {
    let mut out = Vec::with_capacity(items.len() + 1);
    out.extend_from_slice(&items[..index]);
    out.push(value);
    out.extend_from_slice(&items[index..]);
    JsonValue::Array(Arc::new(out))
}

/// New array with the element at `index` overwritten.
///
/// # Panics
///
/// Panics if `index >= items.len()`.
pub fn with_element_replaced(items: &[JsonValue], index: usize, value: JsonValue) -> JsonValue {
    let mut out = items.to_vec();
    out[index] = value;
    JsonValue::Array(Arc::new(out))
}

/// New array with the element at `index` removed.
///
/// # Panics
///
/// Panics if `index >= items.len()`.
pub fn with_element_removed(items: &[JsonValue], index: usize) -> JsonValue {
    let mut out = items.to_vec();
    out.remove(index);
    JsonValue::Array(Arc::new(out))
}

// ----------------------------------------------------------------------------
// Equality
// ----------------------------------------------------------------------------

/// Arrays compare element-wise in order; objects compare as unordered maps.
impl PartialEq for JsonValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (JsonValue::Null, JsonValue::Null) => true,
            (JsonValue::Bool(a), JsonValue::Bool(b)) => a == b,
            (JsonValue::Number(a), JsonValue::Number(b)) => a == b,
            (JsonValue::String(a), JsonValue::String(b)) => a == b,
            (JsonValue::Array(a), JsonValue::Array(b)) => Arc::ptr_eq(a, b) || a == b,
            (JsonValue::Object(a), JsonValue::Object(b)) => {
                Arc::ptr_eq(a, b)
                    || (a.len() == b.len() && a.iter().all(|(k, v)| lookup(b, k) == Some(v)))
            }
            _ => false,
        }
    }
}

// ----------------------------------------------------------------------------
// Conversions
// ----------------------------------------------------------------------------

impl From<Value> for JsonValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(b),
            Value::Number(n) => JsonValue::Number(n),
            Value::String(s) => JsonValue::String(s.into()),
            Value::Array(items) => JsonValue::array(items.into_iter().map(JsonValue::from)),
            // serde_json maps already have unique keys, so skip the dedup in `object`.
            Value::Object(map) => JsonValue::Object(Arc::new(
                map.into_iter().map(|(k, v)| (k, JsonValue::from(v))).collect(),
            )),
        }
    }
}

impl From<&JsonValue> for Value {
    fn from(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(*b),
            JsonValue::Number(n) => Value::Number(n.clone()),
            JsonValue::String(s) => Value::String(s.to_string()),
            JsonValue::Array(items) => Value::Array(items.iter().map(Value::from).collect()),
            JsonValue::Object(members) => {
                let mut map = Map::with_capacity(members.len());
                for (k, v) in members.iter() {
                    map.insert(k.clone(), Value::from(v));
                }
                Value::Object(map)
            }
        }
    }
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        Value::from(&value)
    }
}

impl From<bool> for JsonValue {
    fn from(b: bool) -> Self {
        JsonValue::Bool(b)
    }
}

impl From<i64> for JsonValue {
    fn from(n: i64) -> Self {
        JsonValue::Number(n.into())
    }
}

impl From<u64> for JsonValue {
    fn from(n: u64) -> Self {
        JsonValue::Number(n.into())
    }
}

/// Non-finite floats have no JSON representation and become `null`.
impl From<f64> for JsonValue {
    fn from(f: f64) -> Self {
        Number::from_f64(f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null)
    }
}

impl From<&str> for JsonValue {
    fn from(s: &str) -> Self {
        JsonValue::String(Arc::from(s))
    }
}

impl From<String> for JsonValue {
    fn from(s: String) -> Self {
        JsonValue::String(s.into())
    }
}

impl Serialize for JsonValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            JsonValue::Null => serializer.serialize_unit(),
            JsonValue::Bool(b) => serializer.serialize_bool(*b),
            JsonValue::Number(n) => n.serialize(serializer),
            JsonValue::String(s) => serializer.serialize_str(s),
            JsonValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            JsonValue::Object(members) => {
                let mut map = serializer.serialize_map(Some(members.len()))?;
                for (k, v) in members.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for JsonValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(JsonValue::from)
    }
}

/// Compact JSON text; the alternate flag (`{:#}`) pretty-prints.
impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match f.alternate() {
            true => serde_json::to_string_pretty(self),
            false => serde_json::to_string(self),
        };
        f.write_str(&text.map_err(|_| fmt::Error)?)
    }
}
