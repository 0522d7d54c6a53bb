pub mod errors;
pub mod types;
#[allow(clippy::module_inception)]
pub mod validator;

pub use errors::{error_message, errors_at, errors_for_path, has_errors};
pub use types::{ErrorKind, ValidationError, ValidatorOptions};
pub use validator::{
    validate_value, validate_value_with, NO_MATCHING_TYPE_MESSAGE, REQUIRED_MESSAGE,
};
