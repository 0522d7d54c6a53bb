use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::rich_content::{MediaKind, RichContentPart};

/// Largest integer magnitude an f64 holds exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A dynamic form value.
///
/// Containers are reference counted: replacing a nested value rebuilds
/// only its ancestors, and untouched siblings stay shared between the old
/// and new trees (see [`InputValue::ptr_eq`]).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Arc<Vec<InputValue>>),
    Object(Arc<IndexMap<String, InputValue>>),
    RichContent(Arc<RichContentPart>),
}

impl InputValue {
    pub fn array(items: impl IntoIterator<Item = InputValue>) -> Self {
        Self::Array(Arc::new(items.into_iter().collect()))
    }

    pub fn object<K: Into<String>>(entries: impl IntoIterator<Item = (K, InputValue)>) -> Self {
        Self::Object(Arc::new(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    pub fn rich(part: RichContentPart) -> Self {
        Self::RichContent(Arc::new(part))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[InputValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The value as a generic mapping. Rich media values (including
    /// tag-bearing objects whose payload failed to parse) are not mappings.
    pub fn as_object(&self) -> Option<&IndexMap<String, InputValue>> {
        match self {
            Self::Object(map) if tagged_kind(map).is_none() => Some(map),
            _ => None,
        }
    }

    pub fn as_rich_content(&self) -> Option<&RichContentPart> {
        match self {
            Self::RichContent(part) => Some(part),
            _ => None,
        }
    }

    /// Media kind announced by the value's discriminant, if any.
    ///
    /// The tag decides: an object carrying a reserved `type` value reports
    /// that kind even when its payload is malformed.
    pub fn media_kind(&self) -> Option<MediaKind> {
        match self {
            Self::RichContent(part) => Some(part.kind()),
            Self::Object(map) => tagged_kind(map),
            _ => None,
        }
    }

    pub fn is_rich_content(&self) -> bool {
        self.media_kind().is_some()
    }

    /// Look up a property of a mapping value.
    pub fn get(&self, key: &str) -> Option<&InputValue> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// True when both values are the same shared container, or equal
    /// scalars.
    pub fn ptr_eq(&self, other: &InputValue) -> bool {
        match (self, other) {
            (Self::Array(a), Self::Array(b)) => Arc::ptr_eq(a, b),
            (Self::Object(a), Self::Object(b)) => Arc::ptr_eq(a, b),
            (Self::RichContent(a), Self::RichContent(b)) => Arc::ptr_eq(a, b),
            (a, b) => a == b,
        }
    }

    /// Short name of the value's runtime type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) if self.is_rich_content() => "media",
            Self::Object(_) => "object",
            Self::RichContent(_) => "media",
        }
    }

    /// Parse a value from JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> Value {
        Value::from(self)
    }
}

fn tagged_kind(map: &IndexMap<String, InputValue>) -> Option<MediaKind> {
    map.get("type")
        .and_then(InputValue::as_str)
        .and_then(MediaKind::from_tag)
}

impl From<Value> for InputValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::array(items.into_iter().map(Self::from)),
            Value::Object(map) => {
                let tagged = map
                    .get("type")
                    .and_then(Value::as_str)
                    .and_then(MediaKind::from_tag)
                    .is_some();
                if tagged {
                    match serde_json::from_value::<RichContentPart>(Value::Object(map.clone())) {
                        Ok(part) => return Self::rich(part),
                        Err(err) => {
                            tracing::debug!(
                                error = %err,
                                "malformed rich content part kept as tagged object"
                            );
                        }
                    }
                }
                Self::object(map.into_iter().map(|(k, v)| (k, Self::from(v))))
            }
        }
    }
}

impl From<&InputValue> for Value {
    fn from(value: &InputValue) -> Self {
        match value {
            InputValue::Null => Value::Null,
            InputValue::Bool(b) => Value::Bool(*b),
            InputValue::Number(n) => number_to_json(*n),
            InputValue::String(s) => Value::String(s.clone()),
            InputValue::Array(items) => Value::Array(items.iter().map(Value::from).collect()),
            InputValue::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Value::from(v)))
                    .collect(),
            ),
            InputValue::RichContent(part) => {
                serde_json::to_value(part.as_ref()).unwrap_or(Value::Null)
            }
        }
    }
}

/// Integral numbers in the safe range are emitted as JSON integers so that
/// `25` round-trips as `25` rather than `25.0`.
fn number_to_json(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

impl From<bool> for InputValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for InputValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for InputValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for InputValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for InputValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<RichContentPart> for InputValue {
    fn from(part: RichContentPart) -> Self {
        Self::rich(part)
    }
}

impl Serialize for InputValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Value::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for InputValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from)
    }
}
