//! Runtime validator: walks a schema/value pair and collects path-addressed
//! errors in depth-first property/index order.

use schema_form_path::{join_index, join_key};

use crate::matcher::is_integral;
use crate::schema::{
    ArrayInputSchema, InputSchema, IntegerInputSchema, NumberInputSchema, ObjectInputSchema,
    StringInputSchema,
};
use crate::value::{InputValue, MediaKind, RichContentPart};

use super::types::{ErrorKind, ValidationError, ValidatorOptions};

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const NO_MATCHING_TYPE_MESSAGE: &str = "Value doesn't match any allowed type";

/// Validate a value against a schema with default options.
///
/// `value` is `None` when the value is absent altogether (e.g. a missing
/// object property). Never fails: an empty result means the value is valid.
///
/// # Example
///
/// ```
/// use schema_form::{validate_value, ErrorKind, InputSchema, InputValue};
///
/// let errors = validate_value(&InputSchema::string(), Some(&InputValue::from("")), "f", true);
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors[0].kind, ErrorKind::Required);
/// assert_eq!(errors[0].path, "f");
/// ```
pub fn validate_value(
    schema: &InputSchema,
    value: Option<&InputValue>,
    path: &str,
    required: bool,
) -> Vec<ValidationError> {
    validate_value_with(schema, value, path, required, &ValidatorOptions::default())
}

/// Validate a value against a schema.
pub fn validate_value_with(
    schema: &InputSchema,
    value: Option<&InputValue>,
    path: &str,
    required: bool,
    opts: &ValidatorOptions,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    validate_inner(schema, value, path, required, opts, &mut errors);
    errors
}

fn is_empty_value(value: Option<&InputValue>, opts: &ValidatorOptions) -> bool {
    match value {
        None | Some(InputValue::Null) => true,
        Some(InputValue::String(s)) if opts.whitespace_is_empty => s.trim().is_empty(),
        Some(InputValue::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn validate_inner(
    schema: &InputSchema,
    value: Option<&InputValue>,
    path: &str,
    required: bool,
    opts: &ValidatorOptions,
    errors: &mut Vec<ValidationError>,
) {
    if required && is_empty_value(value, opts) {
        errors.push(ValidationError::new(path, ErrorKind::Required, REQUIRED_MESSAGE));
        return;
    }
    let value = match value {
        None | Some(InputValue::Null) => return,
        Some(value) => value,
    };

    match schema {
        InputSchema::String(s) => validate_string(s, value, path, errors),
        InputSchema::Number(s) => validate_number(s, value, path, errors),
        InputSchema::Integer(s) => validate_integer(s, value, path, errors),
        InputSchema::Boolean(_) => {
            if value.as_bool().is_none() {
                errors.push(type_error(path, "Expected a boolean"));
            }
        }
        InputSchema::Image(_) => validate_media(MediaKind::Image, value, path, errors),
        InputSchema::Audio(_) => validate_media(MediaKind::Audio, value, path, errors),
        InputSchema::Video(_) => validate_media(MediaKind::Video, value, path, errors),
        InputSchema::File(_) => validate_media(MediaKind::File, value, path, errors),
        InputSchema::Object(s) => validate_object(s, value, path, opts, errors),
        InputSchema::Array(s) => validate_array(s, value, path, opts, errors),
        InputSchema::AnyOf(s) => {
            let matched = s.any_of.iter().any(|candidate| {
                let mut candidate_errors = Vec::new();
                validate_inner(candidate, Some(value), path, required, opts, &mut candidate_errors);
                candidate_errors.is_empty()
            });
            if !matched {
                errors.push(type_error(path, NO_MATCHING_TYPE_MESSAGE));
            }
        }
    }
}

fn type_error(path: &str, message: &str) -> ValidationError {
    ValidationError::new(path, ErrorKind::Type, message)
}

fn validate_string(
    schema: &StringInputSchema,
    value: &InputValue,
    path: &str,
    errors: &mut Vec<ValidationError>,
) {
    let Some(s) = value.as_str() else {
        errors.push(type_error(path, "Expected a string"));
        return;
    };
    if let Some(allowed) = schema.enum_.as_deref().filter(|allowed| !allowed.is_empty()) {
        if !allowed.iter().any(|candidate| candidate == s) {
            errors.push(ValidationError::new(
                path,
                ErrorKind::Constraint,
                format!("Must be one of: {}", allowed.join(", ")),
            ));
        }
    }
}

fn validate_number(
    schema: &NumberInputSchema,
    value: &InputValue,
    path: &str,
    errors: &mut Vec<ValidationError>,
) {
    match value.as_f64().filter(|n| !n.is_nan()) {
        Some(n) => check_range(n, schema.minimum, schema.maximum, path, errors),
        None => errors.push(type_error(path, "Expected a number")),
    }
}

fn validate_integer(
    schema: &IntegerInputSchema,
    value: &InputValue,
    path: &str,
    errors: &mut Vec<ValidationError>,
) {
    match value.as_f64().filter(|n| is_integral(*n)) {
        Some(n) => check_range(n, schema.minimum, schema.maximum, path, errors),
        None => errors.push(type_error(path, "Expected an integer")),
    }
}

fn check_range(
    n: f64,
    minimum: Option<f64>,
    maximum: Option<f64>,
    path: &str,
    errors: &mut Vec<ValidationError>,
) {
    if let Some(min) = minimum {
        if n < min {
            errors.push(ValidationError::new(
                path,
                ErrorKind::Constraint,
                format!("Minimum value is {min}"),
            ));
        }
    }
    if let Some(max) = maximum {
        if n > max {
            errors.push(ValidationError::new(
                path,
                ErrorKind::Constraint,
                format!("Maximum value is {max}"),
            ));
        }
    }
}

fn validate_media(
    kind: MediaKind,
    value: &InputValue,
    path: &str,
    errors: &mut Vec<ValidationError>,
) {
    if !has_media_shape(kind, value) {
        let message = match kind {
            MediaKind::Image => "Expected an image",
            MediaKind::Audio => "Expected audio",
            MediaKind::Video => "Expected a video",
            MediaKind::File => "Expected a file",
        };
        errors.push(type_error(path, message));
    }
}

/// Tag and payload check. A parsed [`RichContentPart`] always carries its
/// payload; tag-bearing objects that failed to parse are rejected.
fn has_media_shape(kind: MediaKind, value: &InputValue) -> bool {
    match value.as_rich_content() {
        Some(RichContentPart::ImageUrl { .. }) => kind == MediaKind::Image,
        Some(RichContentPart::InputAudio { .. }) => kind == MediaKind::Audio,
        Some(RichContentPart::VideoUrl { .. } | RichContentPart::InputVideo { .. }) => {
            kind == MediaKind::Video
        }
        Some(RichContentPart::File { .. }) => kind == MediaKind::File,
        None => false,
    }
}

fn validate_object(
    schema: &ObjectInputSchema,
    value: &InputValue,
    path: &str,
    opts: &ValidatorOptions,
    errors: &mut Vec<ValidationError>,
) {
    let Some(map) = value.as_object() else {
        errors.push(type_error(path, "Expected an object"));
        return;
    };
    for (name, child) in &schema.properties {
        validate_inner(
            child,
            map.get(name),
            &join_key(path, name),
            schema.is_required(name),
            opts,
            errors,
        );
    }
    // Required names without a declared schema are presence-checked only.
    for name in schema.undeclared_required() {
        if is_empty_value(map.get(name), opts) {
            errors.push(ValidationError::new(
                &join_key(path, name),
                ErrorKind::Required,
                REQUIRED_MESSAGE,
            ));
        }
    }
}

fn validate_array(
    schema: &ArrayInputSchema,
    value: &InputValue,
    path: &str,
    opts: &ValidatorOptions,
    errors: &mut Vec<ValidationError>,
) {
    let Some(items) = value.as_array() else {
        errors.push(type_error(path, "Expected an array"));
        return;
    };
    let len = items.len() as u64;
    if let Some(min) = schema.min_items.filter(|min| len < *min) {
        errors.push(ValidationError::new(
            path,
            ErrorKind::Constraint,
            format!("Must contain at least {min} {}", plural_items(min)),
        ));
    }
    if let Some(max) = schema.max_items.filter(|max| len > *max) {
        errors.push(ValidationError::new(
            path,
            ErrorKind::Constraint,
            format!("Must contain at most {max} {}", plural_items(max)),
        ));
    }
    for (index, item) in items.iter().enumerate() {
        validate_inner(&schema.items, Some(item), &join_index(path, index), false, opts, errors);
    }
}

fn plural_items(n: u64) -> &'static str {
    if n == 1 {
        "item"
    } else {
        "items"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn v(value: serde_json::Value) -> InputValue {
        InputValue::from(value)
    }

    #[test]
    fn test_required_stops_further_checks() {
        let schema = InputSchema::integer_range(Some(1.0), None);
        let errors = validate_value(&schema, None, "n", true);
        assert_eq!(errors, vec![ValidationError::new("n", ErrorKind::Required, REQUIRED_MESSAGE)]);
    }

    #[test]
    fn test_optional_absent_is_valid() {
        assert!(validate_value(&InputSchema::string(), None, "s", false).is_empty());
        let null = InputValue::Null;
        assert!(validate_value(&InputSchema::image(), Some(&null), "i", false).is_empty());
    }

    #[test]
    fn test_whitespace_option() {
        let value = v(json!("   "));
        let strict = ValidatorOptions {
            whitespace_is_empty: false,
        };
        assert_eq!(validate_value(&InputSchema::string(), Some(&value), "", true).len(), 1);
        let errors = validate_value_with(&InputSchema::string(), Some(&value), "", true, &strict);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_enum_message_lists_values() {
        let schema = InputSchema::string_enum(["red", "green"]);
        let errors = validate_value(&schema, Some(&v(json!("blue"))), "c", false);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::Constraint);
        assert_eq!(errors[0].message, "Must be one of: red, green");
    }

    #[test]
    fn test_number_rejects_nan_and_strings() {
        let schema = InputSchema::number();
        for bad in [InputValue::Number(f64::NAN), v(json!("1"))] {
            assert_eq!(validate_value(&schema, Some(&bad), "", false)[0].kind, ErrorKind::Type);
        }
    }

    #[test]
    fn test_both_bounds_violated_report_separately() {
        let schema = InputSchema::number_range(Some(10.0), Some(5.0));
        let errors = validate_value(&schema, Some(&v(json!(7))), "", false);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].message.contains("10"));
        assert!(errors[1].message.contains('5'));
    }

    #[test]
    fn test_media_checks_tag() {
        let audio = v(json!({
            "type": "input_audio",
            "input_audio": {"data": "AA", "format": "wav"}
        }));
        assert!(validate_value(&InputSchema::audio(), Some(&audio), "", false).is_empty());
        let errors = validate_value(&InputSchema::image(), Some(&audio), "p", false);
        assert_eq!(errors, vec![ValidationError::new("p", ErrorKind::Type, "Expected an image")]);

        let missing_payload = v(json!({"type": "input_audio"}));
        let errors = validate_value(&InputSchema::audio(), Some(&missing_payload), "", false);
        assert_eq!(errors.len(), 1);
        let clip = v(json!("clip.mp4"));
        assert_eq!(
            validate_value(&InputSchema::video(), Some(&clip), "", false)[0].message,
            "Expected a video"
        );
    }

    #[test]
    fn test_object_rejects_media_value() {
        let schema = InputSchema::object([("a", InputSchema::string())], &[]);
        let file = v(json!({"type": "file", "file": {"filename": "x"}}));
        let errors = validate_value(&schema, Some(&file), "", false);
        assert_eq!(errors, vec![ValidationError::new("", ErrorKind::Type, "Expected an object")]);
    }

    #[test]
    fn test_undeclared_required_is_presence_checked() {
        let schema = InputSchema::object([("a", InputSchema::string())], &["ghost"]);
        let errors = validate_value(&schema, Some(&v(json!({"a": "x"}))), "", false);
        assert_eq!(
            errors,
            vec![ValidationError::new("ghost", ErrorKind::Required, REQUIRED_MESSAGE)]
        );
        assert!(validate_value(&schema, Some(&v(json!({"ghost": 1}))), "", false).is_empty());
    }

    #[test]
    fn test_nested_paths_depth_first() {
        let schema = InputSchema::object(
            [
                (
                    "people",
                    InputSchema::array(InputSchema::object(
                        [("name", InputSchema::string()), ("age", InputSchema::integer())],
                        &["name"],
                    )),
                ),
                ("flag", InputSchema::boolean()),
            ],
            &[],
        );
        let value = v(json!({
            "people": [{"name": "A", "age": 1.5}, {"age": 3}],
            "flag": "yes"
        }));
        let paths: Vec<String> = validate_value(&schema, Some(&value), "", false)
            .into_iter()
            .map(|e| e.path)
            .collect();
        assert_eq!(paths, ["people[0].age", "people[1].name", "flag"]);
    }

    #[test]
    fn test_any_of_nested_errors_not_concatenated() {
        let schema = InputSchema::any_of(vec![
            InputSchema::object([("a", InputSchema::string())], &["a"]),
            InputSchema::array(InputSchema::string()),
        ]);
        let errors = validate_value(&schema, Some(&v(json!({"a": 1}))), "root", false);
        assert_eq!(
            errors,
            vec![ValidationError::new("root", ErrorKind::Type, NO_MATCHING_TYPE_MESSAGE)]
        );
    }

    #[test]
    fn test_empty_any_of_matches_nothing() {
        let errors = validate_value(&InputSchema::any_of(vec![]), Some(&v(json!(1))), "", false);
        assert_eq!(errors.len(), 1);
    }
}
