use schema_form_path::PathError;

/// Schema parsing and structural lint failures.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("invalid schema JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("anyOf at {path:?} has no candidates")]
    EmptyAnyOf { path: String },
    #[error("minimum {min} exceeds maximum {max} at {path:?}")]
    InvertedBounds { path: String, min: f64, max: f64 },
    #[error("minItems {min} exceeds maxItems {max} at {path:?}")]
    InvertedItemBounds { path: String, min: u64, max: u64 },
    #[error("property name {name:?} at {path:?} cannot be written as a field path")]
    UnaddressableProperty { path: String, name: String },
    #[error("required property {name:?} is not declared at {path:?}")]
    UndeclaredRequired { path: String, name: String },
}

/// Failures reading an uploaded blob.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("failed to read {name:?}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("file {name:?} is no longer available")]
    Unavailable { name: String },
}

/// Failures routing a [`FieldEdit`](crate::fields::FieldEdit) to a field.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum EditError {
    #[error("form is disabled")]
    Disabled,
    #[error("{kind} field does not support {edit}")]
    Unsupported { kind: &'static str, edit: &'static str },
    #[error("no field at {path:?}")]
    UnknownPath { path: String },
    #[error("index {index} out of bounds for array of length {len} at {path:?}")]
    IndexOutOfBounds { path: String, index: usize, len: usize },
    #[error("branch {index} out of range for {count} candidates at {path:?}")]
    BranchOutOfRange { path: String, index: usize, count: usize },
    #[error(transparent)]
    Path(#[from] PathError),
}
