//! Default value synthesis.
//!
//! Produces the value a form starts from before the user has entered
//! anything: every declared object property gets an editable slot, arrays
//! start empty and media fields start with nothing selected.

use crate::schema::InputSchema;
use crate::value::InputValue;

/// Synthesize the default value for a schema.
///
/// - string → `""`, number/integer → `0`, boolean → `false`
/// - image/audio/video/file → `null`
/// - object → every declared property's default
/// - array → `[]`, regardless of `minItems`
/// - anyOf → the default of the first candidate (`null` if there is none)
pub fn default_value(schema: &InputSchema) -> InputValue {
    match schema {
        InputSchema::String(_) => InputValue::String(String::new()),
        InputSchema::Number(_) | InputSchema::Integer(_) => InputValue::Number(0.0),
        InputSchema::Boolean(_) => InputValue::Bool(false),
        InputSchema::Image(_)
        | InputSchema::Audio(_)
        | InputSchema::Video(_)
        | InputSchema::File(_) => {
            InputValue::Null
        }
        InputSchema::Object(s) => InputValue::object(
            s.properties
                .iter()
                .map(|(name, child)| (name.clone(), default_value(child))),
        ),
        InputSchema::Array(_) => InputValue::array([]),
        InputSchema::AnyOf(s) => s.any_of.first().map(default_value).unwrap_or_default(),
    }
}
