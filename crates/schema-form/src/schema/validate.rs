//! Structural checks for schemas supplied by upstream callers.
//!
//! Forms accept any schema value; these checks let a caller reject
//! schemas whose behavior would be surprising before mounting a form.

use schema_form_path::{is_valid_key, join_index, join_key};

use super::schema::InputSchema;
use crate::SchemaError;

/// Check a schema tree for structural problems.
///
/// Reports the first problem found in depth-first order. Paths in errors
/// are value paths (the anyOf level does not add a step; array items are
/// reported at index `0`).
pub fn validate_schema(schema: &InputSchema) -> Result<(), SchemaError> {
    validate_node(schema, "")
}

fn validate_node(schema: &InputSchema, path: &str) -> Result<(), SchemaError> {
    match schema {
        InputSchema::Number(s) => check_bounds(s.minimum, s.maximum, path),
        InputSchema::Integer(s) => check_bounds(s.minimum, s.maximum, path),
        InputSchema::Array(s) => {
            if let (Some(min), Some(max)) = (s.min_items, s.max_items) {
                if min > max {
                    return Err(SchemaError::InvertedItemBounds {
                        path: path.to_string(),
                        min,
                        max,
                    });
                }
            }
            validate_node(&s.items, &join_index(path, 0))
        }
        InputSchema::Object(s) => {
            if let Some(name) = s.undeclared_required().next() {
                return Err(SchemaError::UndeclaredRequired {
                    path: path.to_string(),
                    name: name.to_string(),
                });
            }
            for (name, child) in &s.properties {
                if !is_valid_key(name) {
                    return Err(SchemaError::UnaddressableProperty {
                        path: path.to_string(),
                        name: name.clone(),
                    });
                }
                validate_node(child, &join_key(path, name))?;
            }
            Ok(())
        }
        InputSchema::AnyOf(s) => {
            if s.any_of.is_empty() {
                return Err(SchemaError::EmptyAnyOf {
                    path: path.to_string(),
                });
            }
            s.any_of
                .iter()
                .try_for_each(|candidate| validate_node(candidate, path))
        }
        InputSchema::String(_)
        | InputSchema::Boolean(_)
        | InputSchema::Image(_)
        | InputSchema::Audio(_)
        | InputSchema::Video(_)
        | InputSchema::File(_) => Ok(()),
    }
}

fn check_bounds(minimum: Option<f64>, maximum: Option<f64>, path: &str) -> Result<(), SchemaError> {
    match (minimum, maximum) {
        (Some(min), Some(max)) if min > max => Err(SchemaError::InvertedBounds {
            path: path.to_string(),
            min,
            max,
        }),
        _ => Ok(()),
    }
}
