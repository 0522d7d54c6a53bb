//! Shallow schema matching.
//!
//! Decides whether a value has the right overall shape for a schema. Used
//! to keep or replace an externally supplied value, and to pick the initial
//! branch of a union field. Deep correctness is the validator's job.

use crate::schema::InputSchema;
use crate::value::{InputValue, MediaKind};

/// Check whether a value structurally matches a schema.
///
/// Objects and arrays only check the container kind; their contents are
/// not inspected. Media schemas accept `null` (nothing selected) or a
/// value whose discriminant names the same media kind.
pub fn value_matches_schema(value: &InputValue, schema: &InputSchema) -> bool {
    match schema {
        InputSchema::String(_) => value.as_str().is_some(),
        InputSchema::Number(_) => value.as_f64().is_some(),
        InputSchema::Integer(_) => value.as_f64().is_some_and(is_integral),
        InputSchema::Boolean(_) => value.as_bool().is_some(),
        InputSchema::Object(_) => value.as_object().is_some(),
        InputSchema::Array(_) => value.as_array().is_some(),
        InputSchema::Image(_) => matches_media(value, MediaKind::Image),
        InputSchema::Audio(_) => matches_media(value, MediaKind::Audio),
        InputSchema::Video(_) => matches_media(value, MediaKind::Video),
        InputSchema::File(_) => matches_media(value, MediaKind::File),
        InputSchema::AnyOf(s) => s
            .any_of
            .iter()
            .any(|candidate| value_matches_schema(value, candidate)),
    }
}

fn matches_media(value: &InputValue, kind: MediaKind) -> bool {
    value.is_null() || value.media_kind() == Some(kind)
}

pub(crate) fn is_integral(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0
}

/// Pick the union candidate a value currently conforms to.
///
/// Returns the index of the first matching candidate; `0` when the value is
/// absent or null, or when nothing matches.
pub fn detect_matching_schema_index(
    candidates: &[InputSchema],
    value: Option<&InputValue>,
) -> usize {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return 0;
    };
    candidates
        .iter()
        .position(|candidate| value_matches_schema(value, candidate))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default::default_value;
    use serde_json::json;

    fn every_variant() -> Vec<InputSchema> {
        vec![
            InputSchema::string(),
            InputSchema::number(),
            InputSchema::integer(),
            InputSchema::boolean(),
            InputSchema::image(),
            InputSchema::audio(),
            InputSchema::video(),
            InputSchema::file(),
            InputSchema::object([("a", InputSchema::string())], &["a"]),
            InputSchema::array_bounded(InputSchema::string(), Some(2), None),
            InputSchema::any_of(vec![InputSchema::integer(), InputSchema::string()]),
        ]
    }

    #[test]
    fn test_defaults_match_their_schema() {
        for schema in every_variant() {
            assert!(
                value_matches_schema(&default_value(&schema), &schema),
                "default does not match {schema:?}"
            );
        }
    }

    #[test]
    fn test_integer_requires_integral() {
        let schema = InputSchema::integer();
        assert!(value_matches_schema(&InputValue::from(3i64), &schema));
        assert!(!value_matches_schema(&InputValue::from(3.5), &schema));
        assert!(!value_matches_schema(&InputValue::from(f64::NAN), &schema));
    }

    #[test]
    fn test_object_is_permissive_but_rejects_media() {
        let schema = InputSchema::object([("a", InputSchema::integer())], &["a"]);
        assert!(value_matches_schema(&InputValue::from(json!({"a": "wrong"})), &schema));
        assert!(!value_matches_schema(&InputValue::from(json!([])), &schema));
        let image = InputValue::from(json!({"type": "image_url", "image_url": {"url": "u"}}));
        assert!(!value_matches_schema(&image, &schema));
        assert!(value_matches_schema(&image, &InputSchema::image()));
        assert!(!value_matches_schema(&image, &InputSchema::file()));
    }

    #[test]
    fn test_media_accepts_null_only_for_media() {
        assert!(value_matches_schema(&InputValue::Null, &InputSchema::video()));
        assert!(!value_matches_schema(&InputValue::Null, &InputSchema::string()));
    }

    #[test]
    fn test_detect_index() {
        let candidates = vec![InputSchema::string(), InputSchema::number(), InputSchema::boolean()];
        assert_eq!(detect_matching_schema_index(&candidates, Some(&InputValue::from(true))), 2);
        assert_eq!(detect_matching_schema_index(&candidates, Some(&InputValue::from(1.5))), 1);
        assert_eq!(detect_matching_schema_index(&candidates, Some(&InputValue::Null)), 0);
        assert_eq!(detect_matching_schema_index(&candidates, None), 0);
        assert_eq!(
            detect_matching_schema_index(&candidates, Some(&InputValue::from(json!([])))),
            0
        );
    }
}
