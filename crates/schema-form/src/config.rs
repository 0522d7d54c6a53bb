use serde::{Deserialize, Serialize};

use crate::validator::ValidatorOptions;

/// Options for a [`SchemaForm`](crate::SchemaForm).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormOptions {
    /// Render every field read-only and reject edits.
    pub disabled: bool,
    pub validator: ValidatorOptions,
}

impl FormOptions {
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }
}
