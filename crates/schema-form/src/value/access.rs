//! Path-addressed reads and copy-on-write writes on [`InputValue`] trees.

use std::sync::Arc;

use indexmap::IndexMap;
use schema_form_path::{check_padding, parse_path, PathError, PathStep};

use super::InputValue;

/// Read the value at a textual path.
///
/// Returns `None` when the path is malformed, a key is absent, an index is
/// out of bounds, or a step descends into a scalar or rich media value.
///
/// # Example
///
/// ```
/// use schema_form::value::{get_at_path, InputValue};
/// use serde_json::json;
///
/// let value = InputValue::from(json!({"user": {"tags": ["a", "b"]}}));
/// assert_eq!(get_at_path(&value, "user.tags[1]"), Some(&InputValue::from("b")));
/// assert_eq!(get_at_path(&value, "user.tags[5]"), None);
/// ```
pub fn get_at_path<'a>(value: &'a InputValue, path: &str) -> Option<&'a InputValue> {
    let steps = parse_path(path).ok()?;
    get_at(value, &steps)
}

/// Read the value at a parsed path.
pub fn get_at<'a>(value: &'a InputValue, path: &[PathStep]) -> Option<&'a InputValue> {
    let mut current = value;
    for step in path {
        current = match (step, current) {
            (PathStep::Key(key), InputValue::Object(map)) if !current.is_rich_content() => {
                map.get(key)?
            }
            (PathStep::Index(index), InputValue::Array(items)) => items.get(*index)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Return a new tree with `new_value` stored at the textual path.
///
/// # Errors
///
/// Returns a [`PathError`] if `path` does not parse or an index would pad
/// an array by more than [`MAX_ARRAY_PADDING`](schema_form_path::MAX_ARRAY_PADDING)
/// elements.
///
/// # Example
///
/// ```
/// use schema_form::value::{get_at_path, set_at_path, InputValue};
/// use serde_json::json;
///
/// let before = InputValue::from(json!({"a": {"b": 1}, "c": [true]}));
/// let after = set_at_path(&before, "a.b", InputValue::from(2i64)).unwrap();
/// assert_eq!(get_at_path(&after, "a.b"), Some(&InputValue::from(2i64)));
/// assert!(get_at_path(&after, "c").unwrap().ptr_eq(get_at_path(&before, "c").unwrap()));
/// ```
pub fn set_at_path(
    value: &InputValue,
    path: &str,
    new_value: InputValue,
) -> Result<InputValue, PathError> {
    let steps = parse_path(path)?;
    set_at(value, &steps, new_value)
}

/// Return a new tree with `new_value` stored at a parsed path.
///
/// Only the containers on the path are rebuilt. Missing containers are
/// created (an object for a key step, an array for an index step, padded
/// with `null` up to the index); a container of the wrong kind on the path
/// is replaced.
///
/// # Errors
///
/// Returns [`PathError::IndexTooLarge`] when an index lies too far past the
/// end of its array.
pub fn set_at(
    value: &InputValue,
    path: &[PathStep],
    new_value: InputValue,
) -> Result<InputValue, PathError> {
    let Some((step, rest)) = path.split_first() else {
        return Ok(new_value);
    };
    match step {
        PathStep::Key(key) => {
            let mut map = match value.as_object() {
                Some(map) => map.clone(),
                None => IndexMap::new(),
            };
            let updated = match map.get(key) {
                Some(child) => set_at(child, rest, new_value)?,
                None => set_at(&InputValue::Null, rest, new_value)?,
            };
            map.insert(key.clone(), updated);
            Ok(InputValue::Object(Arc::new(map)))
        }
        PathStep::Index(index) => {
            let index = *index;
            let mut items = match value.as_array() {
                Some(items) => items.to_vec(),
                None => Vec::new(),
            };
            check_padding(index, items.len())?;
            if items.len() <= index {
                items.resize(index + 1, InputValue::Null);
            }
            items[index] = set_at(&items[index], rest, new_value)?;
            Ok(InputValue::Array(Arc::new(items)))
        }
    }
}

/// Copy-on-write replacement of one property of a mapping value. A
/// non-mapping receiver is treated as an empty mapping.
pub fn with_property(value: &InputValue, key: &str, new_value: InputValue) -> InputValue {
    let mut map = value.as_object().cloned().unwrap_or_default();
    map.insert(key.to_string(), new_value);
    InputValue::Object(Arc::new(map))
}

/// Copy-on-write append to an array value. A non-array receiver is treated
/// as an empty array.
pub fn with_pushed(value: &InputValue, item: InputValue) -> InputValue {
    let mut items = value.as_array().map(<[_]>::to_vec).unwrap_or_default();
    items.push(item);
    InputValue::Array(Arc::new(items))
}

/// Copy-on-write removal of one array element. Returns `None` if `index`
/// is out of bounds or the value is not an array.
pub fn without_item(value: &InputValue, index: usize) -> Option<InputValue> {
    let items = value.as_array()?;
    if index >= items.len() {
        return None;
    }
    let mut items = items.to_vec();
    items.remove(index);
    Some(InputValue::Array(Arc::new(items)))
}
