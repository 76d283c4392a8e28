use std::collections::{
    btree_map,
    BTreeMap,
};
use std::fmt;
use std::ops::Index;
use std::slice;

use crate::optional_ref::*;

/// Object entries, kept sorted by key.
pub type JsonObject = BTreeMap<String, JsonValue>;
pub type JsonArray = Vec<JsonValue>;

static JSON_NULL: JsonValue = JsonValue::Null;
static JSON_EMPTY_OBJECT: JsonValue = JsonValue::Object(BTreeMap::new());
static JSON_EMPTY_ARRAY: JsonValue = JsonValue::Array(Vec::new());

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum JsonType {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JsonType::Object => "object",
            JsonType::Array => "array",
            JsonType::String => "string",
            JsonType::Number => "number",
            JsonType::Boolean => "boolean",
            JsonType::Null => "null",
        };
        f.write_str(name)
    }
}

/// One node of a parsed document.
///
/// Reading never fails: the `as_*` accessors return an empty [`OptionalRef`] on a type
/// mismatch, and indexing a missing key or position yields the shared null value, so
/// lookups can be chained freely:
///
/// ```
/// let result = edenjson::parse(r#"{"a": [{"b": 1}]}"#);
/// assert_eq!(*result.document["a"][0]["b"].as_number().value(), 1.0);
/// assert!(result.document["x"][3]["y"].is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum JsonValue {
    #[default]
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Object(JsonObject),
    Array(JsonArray),
}

impl JsonValue {
    /// The shared null returned by failed lookups.
    pub fn null_ref() -> &'static JsonValue {
        &JSON_NULL
    }

    pub fn empty_object_ref() -> &'static JsonValue {
        &JSON_EMPTY_OBJECT
    }

    pub fn empty_array_ref() -> &'static JsonValue {
        &JSON_EMPTY_ARRAY
    }

    pub fn json_type(&self) -> JsonType {
        match self {
            JsonValue::Null => JsonType::Null,
            JsonValue::Boolean(_) => JsonType::Boolean,
            JsonValue::Number(_) => JsonType::Number,
            JsonValue::String(_) => JsonType::String,
            JsonValue::Object(_) => JsonType::Object,
            JsonValue::Array(_) => JsonType::Array,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, JsonValue::String(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, JsonValue::Number(_))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, JsonValue::Boolean(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn as_string(&self) -> OptionalRef<'_, String> {
        match self {
            JsonValue::String(s) => OptionalRef::new(s),
            _ => OptionalRef::empty(),
        }
    }

    pub fn as_number(&self) -> OptionalRef<'_, f64> {
        match self {
            JsonValue::Number(n) => OptionalRef::new(n),
            _ => OptionalRef::empty(),
        }
    }

    pub fn as_boolean(&self) -> OptionalRef<'_, bool> {
        match self {
            JsonValue::Boolean(b) => OptionalRef::new(b),
            _ => OptionalRef::empty(),
        }
    }

    pub fn as_object(&self) -> OptionalRef<'_, JsonObject> {
        match self {
            JsonValue::Object(obj) => OptionalRef::new(obj),
            _ => OptionalRef::empty(),
        }
    }

    pub fn as_array(&self) -> OptionalRef<'_, JsonArray> {
        match self {
            JsonValue::Array(arr) => OptionalRef::new(arr),
            _ => OptionalRef::empty(),
        }
    }

    /// Looks up `key` in an object. Anything else, or a missing key, gives the shared null.
    pub fn get(&self, key: &str) -> &JsonValue {
        match self {
            JsonValue::Object(obj) => obj.get(key).unwrap_or(&JSON_NULL),
            _ => &JSON_NULL,
        }
    }

    /// Looks up `index` in an array. Anything else, or an index past the end, gives the
    /// shared null.
    pub fn at(&self, index: usize) -> &JsonValue {
        match self {
            JsonValue::Array(arr) => arr.get(index).unwrap_or(&JSON_NULL),
            _ => &JSON_NULL,
        }
    }

    /// Array elements in stored order; nothing at all for non-arrays.
    pub fn each_element(&self) -> slice::Iter<'_, JsonValue> {
        match self {
            JsonValue::Array(arr) => arr.iter(),
            _ => slice::Iter::default(),
        }
    }

    /// Object entries in key order; nothing at all for non-objects.
    pub fn each_property(&self) -> btree_map::Iter<'_, String, JsonValue> {
        match self {
            JsonValue::Object(obj) => obj.iter(),
            _ => btree_map::Iter::default(),
        }
    }
}

impl Index<&str> for JsonValue {
    type Output = JsonValue;

    fn index(&self, key: &str) -> &JsonValue {
        self.get(key)
    }
}

impl Index<usize> for JsonValue {
    type Output = JsonValue;

    fn index(&self, index: usize) -> &JsonValue {
        self.at(index)
    }
}

impl From<bool> for JsonValue {
    fn from(value: bool) -> Self {
        JsonValue::Boolean(value)
    }
}

impl From<f64> for JsonValue {
    fn from(value: f64) -> Self {
        JsonValue::Number(value)
    }
}

impl From<String> for JsonValue {
    fn from(value: String) -> Self {
        JsonValue::String(value)
    }
}

impl From<&str> for JsonValue {
    fn from(value: &str) -> Self {
        JsonValue::String(value.to_string())
    }
}

impl From<JsonObject> for JsonValue {
    fn from(value: JsonObject) -> Self {
        JsonValue::Object(value)
    }
}

impl From<JsonArray> for JsonValue {
    fn from(value: JsonArray) -> Self {
        JsonValue::Array(value)
    }
}
