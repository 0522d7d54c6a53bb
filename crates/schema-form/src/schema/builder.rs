//! Shorthand constructors for schema values.

use indexmap::IndexMap;

use super::schema::*;

impl InputSchema {
    pub fn string() -> Self {
        Self::String(StringInputSchema::default())
    }

    pub fn string_enum<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::String(StringInputSchema {
            enum_: Some(values.into_iter().map(Into::into).collect()),
            ..Default::default()
        })
    }

    pub fn number() -> Self {
        Self::Number(NumberInputSchema::default())
    }

    pub fn number_range(minimum: Option<f64>, maximum: Option<f64>) -> Self {
        Self::Number(NumberInputSchema {
            minimum,
            maximum,
            ..Default::default()
        })
    }

    pub fn integer() -> Self {
        Self::Integer(IntegerInputSchema::default())
    }

    pub fn integer_range(minimum: Option<f64>, maximum: Option<f64>) -> Self {
        Self::Integer(IntegerInputSchema {
            minimum,
            maximum,
            ..Default::default()
        })
    }

    pub fn boolean() -> Self {
        Self::Boolean(BooleanInputSchema::default())
    }

    pub fn image() -> Self {
        Self::Image(MediaInputSchema::default())
    }

    pub fn audio() -> Self {
        Self::Audio(MediaInputSchema::default())
    }

    pub fn video() -> Self {
        Self::Video(MediaInputSchema::default())
    }

    pub fn file() -> Self {
        Self::File(MediaInputSchema::default())
    }

    /// Object schema from `(name, schema)` pairs in declaration order.
    pub fn object<I, K>(properties: I, required: &[&str]) -> Self
    where
        I: IntoIterator<Item = (K, InputSchema)>,
        K: Into<String>,
    {
        let properties: IndexMap<String, InputSchema> = properties
            .into_iter()
            .map(|(name, schema)| (name.into(), schema))
            .collect();
        Self::Object(ObjectInputSchema {
            description: None,
            properties,
            required: if required.is_empty() {
                None
            } else {
                Some(required.iter().map(|name| name.to_string()).collect())
            },
        })
    }

    pub fn array(items: InputSchema) -> Self {
        Self::array_bounded(items, None, None)
    }

    pub fn array_bounded(
        items: InputSchema,
        min_items: Option<u64>,
        max_items: Option<u64>,
    ) -> Self {
        Self::Array(ArrayInputSchema {
            description: None,
            min_items,
            max_items,
            items: Box::new(items),
        })
    }

    pub fn any_of(candidates: Vec<InputSchema>) -> Self {
        Self::AnyOf(AnyOfInputSchema {
            any_of: candidates,
            description: None,
        })
    }

    /// Replace this node's description.
    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        let text = Some(text.into());
        match &mut self {
            Self::Object(s) => s.description = text,
            Self::Array(s) => s.description = text,
            Self::String(s) => s.description = text,
            Self::Number(s) => s.description = text,
            Self::Integer(s) => s.description = text,
            Self::Boolean(s) => s.description = text,
            Self::Image(s) | Self::Audio(s) | Self::Video(s) | Self::File(s) => {
                s.description = text
            }
            Self::AnyOf(s) => s.description = text,
        }
        self
    }
}
