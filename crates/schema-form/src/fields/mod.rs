//! Field dispatch.
//!
//! Each schema variant maps to one [`FieldBehavior`]. Behaviors render a
//! [`FieldView`] and turn a [`FieldEdit`] into a full replacement of their
//! own value; composite behaviors forward edits addressed below them to the
//! child behavior and compose the child's replacement into their own.

pub mod any_of;
pub mod array;
pub mod media;
pub mod object;
pub mod primitive;
pub mod props;
pub mod view;

use schema_form_path::{join_path, PathStep};

use crate::error::EditError;
use crate::schema::{schema_type_label, InputSchema};
use crate::validator::error_message;
use crate::value::InputValue;

pub use props::{BranchSelections, FieldEdit, FieldProps};
pub use view::{FieldView, FieldViewKind, MediaPreview, PropertyView};

use any_of::AnyOfField;
use array::ArrayField;
use media::MediaField;
use object::ObjectField;
use primitive::{BooleanField, NumberField, StringField};

pub trait FieldBehavior: Sync {
    fn render(&self, props: &FieldProps<'_>, branches: &mut BranchSelections) -> FieldView;

    /// Apply `edit` to the field at `target` relative to this field and
    /// report this field's replacement value through `on_change`.
    fn edit(
        &self,
        props: &FieldProps<'_>,
        branches: &mut BranchSelections,
        target: &[PathStep],
        edit: FieldEdit,
        on_change: &mut dyn FnMut(InputValue),
    ) -> Result<(), EditError>;
}

/// Select the behavior for a schema variant.
pub fn behavior_for(schema: &InputSchema) -> &'static dyn FieldBehavior {
    match schema {
        InputSchema::String(_) => &StringField,
        InputSchema::Number(_) | InputSchema::Integer(_) => &NumberField,
        InputSchema::Boolean(_) => &BooleanField,
        InputSchema::Image(_)
        | InputSchema::Audio(_)
        | InputSchema::Video(_)
        | InputSchema::File(_) => {
            &MediaField
        }
        InputSchema::Object(_) => &ObjectField,
        InputSchema::Array(_) => &ArrayField,
        InputSchema::AnyOf(_) => &AnyOfField,
    }
}

pub fn render_field(props: &FieldProps<'_>, branches: &mut BranchSelections) -> FieldView {
    behavior_for(props.schema).render(props, branches)
}

/// Route an edit to the field at `target`.
///
/// # Errors
///
/// Fails when the form is disabled, when `target` does not name a field
/// beneath `props`, or when the addressed field does not support the edit.
pub fn edit_field(
    props: &FieldProps<'_>,
    branches: &mut BranchSelections,
    target: &[PathStep],
    edit: FieldEdit,
    on_change: &mut dyn FnMut(InputValue),
) -> Result<(), EditError> {
    if props.disabled {
        return Err(EditError::Disabled);
    }
    if target.is_empty() {
        if let FieldEdit::Replace(value) = edit {
            branches.forget_within(props.path);
            on_change(value);
            return Ok(());
        }
    }
    behavior_for(props.schema).edit(props, branches, target, edit, on_change)
}

/// View shell shared by every behavior.
pub(crate) fn field_view(props: &FieldProps<'_>, kind: FieldViewKind) -> FieldView {
    FieldView {
        path: props.path.to_string(),
        description: props.schema.description().map(str::to_string),
        error: error_message(props.errors, props.path).map(str::to_string),
        disabled: props.disabled,
        kind,
    }
}

pub(crate) fn unsupported(props: &FieldProps<'_>, edit: &FieldEdit) -> EditError {
    EditError::Unsupported {
        kind: schema_type_label(props.schema),
        edit: edit.name(),
    }
}

pub(crate) fn unknown_path(props: &FieldProps<'_>, target: &[PathStep]) -> EditError {
    EditError::UnknownPath {
        path: target
            .iter()
            .fold(props.path.to_string(), |base, step| join_path(&base, step)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::{ErrorKind, ValidationError};

    #[test]
    fn test_disabled_rejects_every_edit() {
        let schema = InputSchema::string();
        let value = InputValue::from("x");
        let props = FieldProps {
            schema: &schema,
            value: &value,
            path: "",
            errors: &[],
            disabled: true,
            union_depth: 0,
        };
        let mut branches = BranchSelections::new();
        let edit = FieldEdit::SetString("y".into());
        let result = edit_field(&props, &mut branches, &[], edit, &mut |_| {
            panic!("no change expected")
        });
        assert_eq!(result, Err(EditError::Disabled));
    }

    #[test]
    fn test_view_uses_exact_path_error() {
        let schema = InputSchema::object([("a", InputSchema::string())], &["a"]);
        let value = InputValue::object([("a", InputValue::from(""))]);
        let errors = vec![ValidationError::new("a", ErrorKind::Required, "This field is required")];
        let props = FieldProps {
            schema: &schema,
            value: &value,
            path: "",
            errors: &errors,
            disabled: false,
            union_depth: 0,
        };
        let view = render_field(&props, &mut BranchSelections::new());
        assert_eq!(view.error, None);
        assert_eq!(view.find("a").and_then(|v| v.error.as_deref()), Some("This field is required"));
    }

    #[test]
    fn test_replace_works_on_any_field() {
        let schema = InputSchema::boolean();
        let value = InputValue::from(false);
        let props = FieldProps {
            schema: &schema,
            value: &value,
            path: "flag",
            errors: &[],
            disabled: false,
            union_depth: 0,
        };
        let mut changed = None;
        edit_field(
            &props,
            &mut BranchSelections::new(),
            &[],
            FieldEdit::Replace(InputValue::from(true)),
            &mut |v| changed = Some(v),
        )
        .unwrap();
        assert_eq!(changed, Some(InputValue::from(true)));
    }
}
