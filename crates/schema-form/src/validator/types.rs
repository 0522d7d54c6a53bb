use serde::{Deserialize, Serialize};

/// Classification of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// A required value is absent.
    Required,
    /// A value is present but has the wrong shape or primitive type.
    Type,
    /// A value has the right shape but violates a bound.
    Constraint,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Type => "type",
            Self::Constraint => "constraint",
        }
    }
}

/// One way a value fails to conform to its schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationError {
    /// Dot/bracket path of the offending value (`""` for the root).
    pub path: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: ErrorKind,
}

impl ValidationError {
    pub fn new(path: &str, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            message: message.into(),
            kind,
        }
    }
}

/// Options for validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorOptions {
    /// Treat whitespace-only strings as empty for the required check.
    pub whitespace_is_empty: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            whitespace_is_empty: true,
        }
    }
}
