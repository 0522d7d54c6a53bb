//! `schema-form`: schema-driven dynamic forms.
//!
//! Given an [`InputSchema`] describing the admissible shape of an input, a
//! [`SchemaForm`] synthesizes a starting value, renders an editable field
//! tree, applies edits as whole-value replacements, validates after every
//! change and encodes user-selected files into rich media values.
//!
//! # Example
//!
//! ```
//! use schema_form::{FieldEdit, FormOptions, InputSchema, InputValue, SchemaForm};
//!
//! let schema = InputSchema::object(
//!     [("name", InputSchema::string()), ("age", InputSchema::integer())],
//!     &["name"],
//! );
//! let mut form = SchemaForm::new(schema, None, FormOptions::default());
//! assert_eq!(form.error_message("name"), Some("This field is required"));
//!
//! form.apply("name", FieldEdit::SetString("Ada".into())).unwrap();
//! form.apply("age", FieldEdit::SetNumber(36.0)).unwrap();
//! assert!(form.is_valid());
//! assert_eq!(form.value().to_json(), serde_json::json!({"name": "Ada", "age": 36}));
//! ```

pub mod config;
pub mod default;
pub mod error;
pub mod fields;
pub mod form;
pub mod matcher;
pub mod media;
pub mod schema;
pub mod validator;
pub mod value;

pub use schema_form_path as path;

// Re-export the most commonly used items at crate root
pub use config::FormOptions;
pub use default::default_value;
pub use error::{EditError, MediaError, SchemaError};
pub use fields::{
    behavior_for, BranchSelections, FieldBehavior, FieldEdit, FieldProps, FieldView, FieldViewKind,
};
pub use form::{FormListener, SchemaForm};
pub use matcher::{detect_matching_schema_index, value_matches_schema};
pub use media::{
    audio_format, data_url, encode_media, file_to_base64, DiskFile, FileBlob, InMemoryFile,
};
pub use schema::{option_label, schema_type_label, validate_schema, InputSchema, SchemaKind};
pub use validator::{
    error_message, errors_for_path, has_errors, validate_value, validate_value_with, ErrorKind,
    ValidationError, ValidatorOptions,
};
pub use value::{get_at_path, set_at_path, AudioFormat, InputValue, MediaKind, RichContentPart};
