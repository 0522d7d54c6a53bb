//! Schema type model.

pub mod builder;
#[allow(clippy::module_inception)]
pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::validate_schema;
