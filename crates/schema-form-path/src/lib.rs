//! Field path utilities.
//!
//! A field path addresses a position inside a nested form value using dot
//! notation for mapping keys and bracket notation for array indices, e.g.
//! `"user.addresses[0].street"`. The empty string addresses the root.
//!
//! # Example
//!
//! ```
//! use schema_form_path::{format_path, join_path, parse_path, PathStep};
//!
//! let path = parse_path("user.addresses[0].street").unwrap();
//! assert_eq!(
//!     path,
//!     vec![
//!         PathStep::Key("user".to_string()),
//!         PathStep::Key("addresses".to_string()),
//!         PathStep::Index(0),
//!         PathStep::Key("street".to_string()),
//!     ]
//! );
//! assert_eq!(format_path(&path), "user.addresses[0].street");
//!
//! assert_eq!(join_path("items", &PathStep::Index(2)), "items[2]");
//! assert_eq!(join_path("", &PathStep::from("name")), "name");
//! ```

use thiserror::Error;

pub mod types;
pub use types::{Path, PathStep};

pub mod validate;
pub use validate::{check_padding, is_valid_key, validate_path, MAX_ARRAY_PADDING, MAX_PATH_DEPTH};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("unclosed '[' at offset {offset}")]
    UnclosedBracket { offset: usize },
    #[error("unexpected ']' at offset {offset}")]
    UnexpectedBracket { offset: usize },
    #[error("empty key segment at offset {offset}")]
    EmptySegment { offset: usize },
    #[error("missing '.' before key at offset {offset}")]
    MissingSeparator { offset: usize },
    #[error("invalid array index {index:?}")]
    InvalidIndex { index: String },
    #[error("invalid key {key:?}")]
    InvalidKey { key: String },
    #[error("path is deeper than {max} steps")]
    TooDeep { max: usize },
    #[error("index {index} would pad an array of length {len} past {max} new elements")]
    IndexTooLarge { index: usize, len: usize, max: usize },
    #[error("root path has no parent")]
    NoParent,
}

fn is_delimiter(b: u8) -> bool {
    matches!(b, b'.' | b'[' | b']')
}

/// Parse a textual path into steps.
///
/// # Errors
///
/// Returns a [`PathError`] for unbalanced brackets, non-numeric bracket
/// contents and empty key segments (`"a..b"`, `".a"`, `"a."`).
///
/// # Example
///
/// ```
/// use schema_form_path::{parse_path, PathStep};
///
/// assert_eq!(parse_path("").unwrap(), Vec::<PathStep>::new());
/// assert_eq!(parse_path("[1]").unwrap(), vec![PathStep::Index(1)]);
/// assert!(parse_path("a[x]").is_err());
/// ```
pub fn parse_path(path: &str) -> Result<Path, PathError> {
    let bytes = path.as_bytes();
    let mut steps = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'[' => {
                let close = path[pos + 1..]
                    .find(']')
                    .map(|i| pos + 1 + i)
                    .ok_or(PathError::UnclosedBracket { offset: pos })?;
                let inner = &path[pos + 1..close];
                if !is_valid_index(inner) {
                    return Err(PathError::InvalidIndex {
                        index: inner.to_string(),
                    });
                }
                let index = inner.parse().map_err(|_| PathError::InvalidIndex {
                    index: inner.to_string(),
                })?;
                steps.push(PathStep::Index(index));
                pos = close + 1;
            }
            b']' => return Err(PathError::UnexpectedBracket { offset: pos }),
            b'.' => {
                if steps.is_empty() {
                    return Err(PathError::EmptySegment { offset: pos });
                }
                let (key, end) = read_key(path, pos + 1);
                if key.is_empty() {
                    return Err(PathError::EmptySegment { offset: pos + 1 });
                }
                steps.push(PathStep::Key(key.to_string()));
                pos = end;
            }
            _ => {
                // A bare key is only allowed at the very start of the path.
                if !steps.is_empty() {
                    return Err(PathError::MissingSeparator { offset: pos });
                }
                let (key, end) = read_key(path, pos);
                steps.push(PathStep::Key(key.to_string()));
                pos = end;
            }
        }
    }

    Ok(steps)
}

fn read_key(path: &str, start: usize) -> (&str, usize) {
    let end = path.as_bytes()[start..]
        .iter()
        .position(|&b| is_delimiter(b))
        .map(|i| start + i)
        .unwrap_or(path.len());
    (&path[start..end], end)
}

/// Format path steps back into their textual form.
///
/// Returns an empty string for the root path.
///
/// # Example
///
/// ```
/// use schema_form_path::{format_path, PathStep};
///
/// assert_eq!(format_path(&[]), "");
/// assert_eq!(format_path(&[PathStep::Index(0), PathStep::from("a")]), "[0].a");
/// ```
pub fn format_path(path: &[PathStep]) -> String {
    path.iter()
        .fold(String::new(), |base, step| join_path(&base, step))
}

/// Append one step to a textual base path.
///
/// # Example
///
/// ```
/// use schema_form_path::{join_path, PathStep};
///
/// assert_eq!(join_path("user", &PathStep::from("addresses")), "user.addresses");
/// assert_eq!(join_path("items", &PathStep::Index(0)), "items[0]");
/// assert_eq!(join_path("", &PathStep::from("name")), "name");
/// assert_eq!(join_path("", &PathStep::Index(3)), "[3]");
/// ```
pub fn join_path(base: &str, step: &PathStep) -> String {
    match step {
        PathStep::Index(index) => format!("{base}[{index}]"),
        PathStep::Key(key) if base.is_empty() => key.clone(),
        PathStep::Key(key) => format!("{base}.{key}"),
    }
}

/// Shorthand for [`join_path`] with a key step.
pub fn join_key(base: &str, key: &str) -> String {
    if base.is_empty() {
        key.to_string()
    } else {
        format!("{base}.{key}")
    }
}

/// Shorthand for [`join_path`] with an index step.
pub fn join_index(base: &str, index: usize) -> String {
    format!("{base}[{index}]")
}

/// Check if a path points to the root value.
pub fn is_root(path: &[PathStep]) -> bool {
    path.is_empty()
}

/// Check if `parent` is a strict prefix of `child`.
///
/// # Example
///
/// ```
/// use schema_form_path::{is_child, parse_path};
///
/// let parent = parse_path("a").unwrap();
/// let child = parse_path("a[0].b").unwrap();
/// assert!(is_child(&parent, &child));
/// assert!(!is_child(&child, &parent));
/// ```
pub fn is_child(parent: &[PathStep], child: &[PathStep]) -> bool {
    parent.len() < child.len() && child.starts_with(parent)
}

/// Get the parent of a path.
///
/// # Errors
///
/// Returns [`PathError::NoParent`] for the root path.
pub fn parent(path: &[PathStep]) -> Result<Path, PathError> {
    match path.split_last() {
        Some((_, rest)) => Ok(rest.to_vec()),
        None => Err(PathError::NoParent),
    }
}

/// Check whether the textual path `candidate` is `base` itself or lies
/// beneath it.
///
/// Works on the textual form so callers can filter error lists without
/// reparsing; `"a.b"` is not considered to be beneath `"a.bc"`.
///
/// # Example
///
/// ```
/// use schema_form_path::is_within;
///
/// assert!(is_within("items", "items"));
/// assert!(is_within("items", "items[0].name"));
/// assert!(is_within("", "anything"));
/// assert!(!is_within("items", "itemsCount"));
/// ```
pub fn is_within(base: &str, candidate: &str) -> bool {
    if base.is_empty() || candidate == base {
        return true;
    }
    match candidate.strip_prefix(base) {
        Some(rest) => rest.starts_with('.') || rest.starts_with('['),
        None => false,
    }
}

/// Check if a string is a valid non-negative array index without leading
/// zeros.
///
/// # Example
///
/// ```
/// use schema_form_path::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index(""));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    let bytes = index.as_bytes();
    if bytes.is_empty() || (bytes.len() > 1 && bytes[0] == b'0') {
        return false;
    }
    bytes.iter().all(|b| b.is_ascii_digit())
}
