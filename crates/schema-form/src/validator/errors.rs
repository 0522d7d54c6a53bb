//! Lookups over validation error lists.

use schema_form_path::is_within;

use super::types::ValidationError;

/// Errors at `path` itself or beneath it. The root path selects everything.
pub fn errors_for_path<'a>(errors: &'a [ValidationError], path: &str) -> Vec<&'a ValidationError> {
    errors.iter().filter(|e| is_within(path, &e.path)).collect()
}

/// Errors at exactly `path`; descendants are excluded.
pub fn errors_at<'a>(
    errors: &'a [ValidationError],
    path: &str,
) -> impl Iterator<Item = &'a ValidationError> + 'a {
    let path = path.to_string();
    errors.iter().filter(move |e| e.path == path)
}

/// Whether `path` or anything beneath it has an error.
pub fn has_errors(errors: &[ValidationError], path: &str) -> bool {
    errors.iter().any(|e| is_within(path, &e.path))
}

/// First error message at exactly `path`.
pub fn error_message<'a>(errors: &'a [ValidationError], path: &str) -> Option<&'a str> {
    errors_at(errors, path).next().map(|e| e.message.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::ErrorKind;

    fn sample() -> Vec<ValidationError> {
        vec![
            ValidationError::new("items", ErrorKind::Constraint, "Must contain at least 1 item"),
            ValidationError::new("items[0]", ErrorKind::Type, "Expected a string"),
            ValidationError::new("itemsCount", ErrorKind::Type, "Expected a number"),
        ]
    }

    #[test]
    fn test_errors_for_path_includes_descendants() {
        let errors = sample();
        let selected = errors_for_path(&errors, "items");
        assert_eq!(selected.len(), 2);
        assert_eq!(errors_for_path(&errors, "").len(), 3);
    }

    #[test]
    fn test_error_message_is_exact() {
        let errors = sample();
        assert_eq!(error_message(&errors, "items"), Some("Must contain at least 1 item"));
        assert_eq!(error_message(&errors, "items[1]"), None);
        assert!(has_errors(&errors, "items[0]"));
        assert!(!has_errors(&errors, "other"));
    }
}
