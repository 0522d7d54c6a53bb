//! Validation functions for parsed paths.

use crate::{PathError, PathStep};

/// Maximum allowed path depth.
pub const MAX_PATH_DEPTH: usize = 256;

/// Maximum number of `null` elements a write may add to pad an array up
/// to its index.
pub const MAX_ARRAY_PADDING: usize = 4096;

/// Check that writing at `index` into an array of length `len` stays within
/// [`MAX_ARRAY_PADDING`].
///
/// # Example
///
/// ```
/// use schema_form_path::{check_padding, PathError};
///
/// assert!(check_padding(3, 0).is_ok());
/// assert!(matches!(check_padding(usize::MAX, 2), Err(PathError::IndexTooLarge { .. })));
/// ```
pub fn check_padding(index: usize, len: usize) -> Result<(), PathError> {
    if index.saturating_sub(len) > MAX_ARRAY_PADDING {
        return Err(PathError::IndexTooLarge {
            index,
            len,
            max: MAX_ARRAY_PADDING,
        });
    }
    Ok(())
}

/// Check whether a key can be written in dot notation and parsed back.
///
/// Keys must be non-empty and must not contain `.`, `[` or `]`.
///
/// # Example
///
/// ```
/// use schema_form_path::is_valid_key;
///
/// assert!(is_valid_key("street"));
/// assert!(!is_valid_key(""));
/// assert!(!is_valid_key("a.b"));
/// ```
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && !key.contains(['.', '[', ']'])
}

/// Validate a path (array of path steps).
///
/// # Errors
///
/// Returns an error if:
/// - The path exceeds the maximum depth (256 steps)
/// - A key step cannot round-trip through the textual form
pub fn validate_path(path: &[PathStep]) -> Result<(), PathError> {
    if path.len() > MAX_PATH_DEPTH {
        return Err(PathError::TooDeep {
            max: MAX_PATH_DEPTH,
        });
    }
    for step in path {
        if let PathStep::Key(key) = step {
            if !is_valid_key(key) {
                return Err(PathError::InvalidKey { key: key.clone() });
            }
        }
    }
    Ok(())
}
