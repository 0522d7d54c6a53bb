use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Input schema for a string value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StringInputSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Closed set of allowed values.
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_: Option<Vec<String>>,
}

/// Input schema for a floating point number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumberInputSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Inclusive lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    /// Inclusive upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
}

/// Input schema for an integer. Bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntegerInputSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BooleanInputSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Input schema shared by the image, audio, video and file leaf types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaInputSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Input schema for an object with declared properties.
///
/// Property declaration order is preserved and drives rendering order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectInputSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub properties: IndexMap<String, InputSchema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl ObjectInputSchema {
    /// Returns true if `name` is listed in `required`.
    pub fn is_required(&self, name: &str) -> bool {
        self.required
            .as_deref()
            .is_some_and(|required| required.iter().any(|r| r == name))
    }

    /// Required names that are not declared in `properties`.
    pub fn undeclared_required(&self) -> impl Iterator<Item = &str> {
        self.required
            .iter()
            .flatten()
            .map(String::as_str)
            .filter(|name| !self.properties.contains_key(*name))
    }
}

/// Input schema for a homogeneous array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayInputSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Inclusive lower bound on the number of items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    /// Inclusive upper bound on the number of items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    pub items: Box<InputSchema>,
}

/// Union of candidate schemas. Candidate 0 is the default branch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnyOfInputSchema {
    #[serde(rename = "anyOf")]
    pub any_of: Vec<InputSchema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The kind of an input schema node, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    Object,
    Array,
    String,
    Number,
    Integer,
    Boolean,
    Image,
    Audio,
    Video,
    File,
    AnyOf,
}

impl SchemaKind {
    /// Human-readable label used for union selectors.
    pub fn label(self) -> &'static str {
        match self {
            Self::Object => "Object",
            Self::Array => "Array",
            Self::String => "String",
            Self::Number => "Number",
            Self::Integer => "Integer",
            Self::Boolean => "Boolean",
            Self::Image => "Image",
            Self::Audio => "Audio",
            Self::Video => "Video",
            Self::File => "File",
            Self::AnyOf => "Union",
        }
    }
}

/// Schema describing the admissible shape of a form value.
///
/// On the wire the variant is selected by the `type` field, or by the
/// presence of `anyOf` for unions.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSchema {
    Object(ObjectInputSchema),
    Array(ArrayInputSchema),
    String(StringInputSchema),
    Number(NumberInputSchema),
    Integer(IntegerInputSchema),
    Boolean(BooleanInputSchema),
    Image(MediaInputSchema),
    Audio(MediaInputSchema),
    Video(MediaInputSchema),
    File(MediaInputSchema),
    AnyOf(AnyOfInputSchema),
}

impl InputSchema {
    pub fn kind(&self) -> SchemaKind {
        match self {
            Self::Object(_) => SchemaKind::Object,
            Self::Array(_) => SchemaKind::Array,
            Self::String(_) => SchemaKind::String,
            Self::Number(_) => SchemaKind::Number,
            Self::Integer(_) => SchemaKind::Integer,
            Self::Boolean(_) => SchemaKind::Boolean,
            Self::Image(_) => SchemaKind::Image,
            Self::Audio(_) => SchemaKind::Audio,
            Self::Video(_) => SchemaKind::Video,
            Self::File(_) => SchemaKind::File,
            Self::AnyOf(_) => SchemaKind::AnyOf,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Object(s) => s.description.as_deref(),
            Self::Array(s) => s.description.as_deref(),
            Self::String(s) => s.description.as_deref(),
            Self::Number(s) => s.description.as_deref(),
            Self::Integer(s) => s.description.as_deref(),
            Self::Boolean(s) => s.description.as_deref(),
            Self::Image(s) | Self::Audio(s) | Self::Video(s) | Self::File(s) => {
                s.description.as_deref()
            }
            Self::AnyOf(s) => s.description.as_deref(),
        }
    }

    /// Parse a schema from JSON text.
    pub fn from_json(text: &str) -> Result<Self, crate::SchemaError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Get a human-readable label for a schema's type.
pub fn schema_type_label(schema: &InputSchema) -> &'static str {
    schema.kind().label()
}

/// Label for a union candidate: its description if present, else its type
/// label.
pub fn option_label(schema: &InputSchema) -> String {
    match schema.description() {
        Some(description) if !description.is_empty() => description.to_string(),
        _ => schema_type_label(schema).to_string(),
    }
}

// ── Serde ──────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum TypedRepr {
    Object(ObjectInputSchema),
    Array(ArrayInputSchema),
    String(StringInputSchema),
    Number(NumberInputSchema),
    Integer(IntegerInputSchema),
    Boolean(BooleanInputSchema),
    Image(MediaInputSchema),
    Audio(MediaInputSchema),
    Video(MediaInputSchema),
    File(MediaInputSchema),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum TypedReprRef<'a> {
    Object(&'a ObjectInputSchema),
    Array(&'a ArrayInputSchema),
    String(&'a StringInputSchema),
    Number(&'a NumberInputSchema),
    Integer(&'a IntegerInputSchema),
    Boolean(&'a BooleanInputSchema),
    Image(&'a MediaInputSchema),
    Audio(&'a MediaInputSchema),
    Video(&'a MediaInputSchema),
    File(&'a MediaInputSchema),
}

impl From<TypedRepr> for InputSchema {
    fn from(repr: TypedRepr) -> Self {
        match repr {
            TypedRepr::Object(s) => Self::Object(s),
            TypedRepr::Array(s) => Self::Array(s),
            TypedRepr::String(s) => Self::String(s),
            TypedRepr::Number(s) => Self::Number(s),
            TypedRepr::Integer(s) => Self::Integer(s),
            TypedRepr::Boolean(s) => Self::Boolean(s),
            TypedRepr::Image(s) => Self::Image(s),
            TypedRepr::Audio(s) => Self::Audio(s),
            TypedRepr::Video(s) => Self::Video(s),
            TypedRepr::File(s) => Self::File(s),
        }
    }
}

impl Serialize for InputSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let repr = match self {
            Self::AnyOf(s) => return s.serialize(serializer),
            Self::Object(s) => TypedReprRef::Object(s),
            Self::Array(s) => TypedReprRef::Array(s),
            Self::String(s) => TypedReprRef::String(s),
            Self::Number(s) => TypedReprRef::Number(s),
            Self::Integer(s) => TypedReprRef::Integer(s),
            Self::Boolean(s) => TypedReprRef::Boolean(s),
            Self::Image(s) => TypedReprRef::Image(s),
            Self::Audio(s) => TypedReprRef::Audio(s),
            Self::Video(s) => TypedReprRef::Video(s),
            Self::File(s) => TypedReprRef::File(s),
        };
        repr.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for InputSchema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.get("anyOf").is_some() {
            serde_json::from_value::<AnyOfInputSchema>(value)
                .map(Self::AnyOf)
                .map_err(D::Error::custom)
        } else {
            serde_json::from_value::<TypedRepr>(value)
                .map(Self::from)
                .map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_nested_schema() {
        let schema: InputSchema = serde_json::from_value(json!({
            "type": "object",
            "properties": {
                "name": {"type": "string", "enum": ["a", "b"]},
                "tags": {"type": "array", "items": {"type": "string"}, "minItems": 1},
                "media": {"anyOf": [{"type": "image"}, {"type": "video"}]}
            },
            "required": ["name"]
        }))
        .unwrap();

        let InputSchema::Object(obj) = &schema else {
            panic!("expected object schema, got {schema:?}");
        };
        let keys: Vec<&str> = obj.properties.keys().map(String::as_str).collect();
        assert_eq!(keys, ["name", "tags", "media"]);
        assert!(obj.is_required("name"));
        assert!(!obj.is_required("tags"));
        assert_eq!(obj.properties["media"].kind(), SchemaKind::AnyOf);
        match &obj.properties["tags"] {
            InputSchema::Array(arr) => assert_eq!(arr.min_items, Some(1)),
            other => panic!("expected array schema, got {other:?}"),
        }
    }

    #[test]
    fn test_serialize_uses_wire_shape() {
        let schema = InputSchema::Integer(IntegerInputSchema {
            minimum: Some(0.0),
            ..Default::default()
        });
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({"type": "integer", "minimum": 0.0})
        );

        let union = InputSchema::AnyOf(AnyOfInputSchema {
            any_of: vec![InputSchema::Boolean(BooleanInputSchema::default())],
            description: None,
        });
        assert_eq!(
            serde_json::to_value(&union).unwrap(),
            json!({"anyOf": [{"type": "boolean"}]})
        );
    }

    #[test]
    fn test_null_optionals_accepted() {
        let schema: InputSchema = serde_json::from_value(json!({
            "type": "object",
            "description": null,
            "properties": {},
            "required": null
        }))
        .unwrap();
        assert_eq!(schema.description(), None);
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = serde_json::from_value::<InputSchema>(json!({"type": "date"}));
        assert!(err.is_err());
    }

    #[test]
    fn test_labels() {
        let image = InputSchema::Image(MediaInputSchema::default());
        assert_eq!(schema_type_label(&image), "Image");
        assert_eq!(option_label(&image), "Image");

        let described = InputSchema::String(StringInputSchema {
            description: Some("Free text".into()),
            ..Default::default()
        });
        assert_eq!(option_label(&described), "Free text");
    }
}
