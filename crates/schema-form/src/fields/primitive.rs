use schema_form_path::PathStep;

use crate::error::EditError;
use crate::schema::InputSchema;
use crate::value::InputValue;

use super::{
    field_view, unknown_path, unsupported, BranchSelections, FieldBehavior, FieldEdit, FieldProps,
    FieldView, FieldViewKind,
};

pub struct StringField;

impl FieldBehavior for StringField {
    fn render(&self, props: &FieldProps<'_>, _branches: &mut BranchSelections) -> FieldView {
        let options = match props.schema {
            InputSchema::String(s) => s.enum_.clone(),
            _ => None,
        };
        field_view(
            props,
            FieldViewKind::Text {
                value: props.value.as_str().unwrap_or_default().to_string(),
                options,
            },
        )
    }

    fn edit(
        &self,
        props: &FieldProps<'_>,
        _branches: &mut BranchSelections,
        target: &[PathStep],
        edit: FieldEdit,
        on_change: &mut dyn FnMut(InputValue),
    ) -> Result<(), EditError> {
        if !target.is_empty() {
            return Err(unknown_path(props, target));
        }
        match edit {
            FieldEdit::SetString(text) => on_change(InputValue::String(text)),
            edit => return Err(unsupported(props, &edit)),
        }
        Ok(())
    }
}

/// Number and integer fields.
pub struct NumberField;

impl FieldBehavior for NumberField {
    fn render(&self, props: &FieldProps<'_>, _branches: &mut BranchSelections) -> FieldView {
        let (integer, minimum, maximum) = match props.schema {
            InputSchema::Number(s) => (false, s.minimum, s.maximum),
            InputSchema::Integer(s) => (true, s.minimum, s.maximum),
            _ => (false, None, None),
        };
        field_view(
            props,
            FieldViewKind::Number {
                value: props.value.as_f64(),
                integer,
                minimum,
                maximum,
            },
        )
    }

    fn edit(
        &self,
        props: &FieldProps<'_>,
        _branches: &mut BranchSelections,
        target: &[PathStep],
        edit: FieldEdit,
        on_change: &mut dyn FnMut(InputValue),
    ) -> Result<(), EditError> {
        if !target.is_empty() {
            return Err(unknown_path(props, target));
        }
        match edit {
            FieldEdit::SetNumber(n) if matches!(props.schema, InputSchema::Integer(_)) => {
                on_change(InputValue::Number(n.trunc()))
            }
            FieldEdit::SetNumber(n) => on_change(InputValue::Number(n)),
            edit => return Err(unsupported(props, &edit)),
        }
        Ok(())
    }
}

pub struct BooleanField;

impl FieldBehavior for BooleanField {
    fn render(&self, props: &FieldProps<'_>, _branches: &mut BranchSelections) -> FieldView {
        field_view(
            props,
            FieldViewKind::Toggle {
                value: props.value.as_bool().unwrap_or(false),
            },
        )
    }

    fn edit(
        &self,
        props: &FieldProps<'_>,
        _branches: &mut BranchSelections,
        target: &[PathStep],
        edit: FieldEdit,
        on_change: &mut dyn FnMut(InputValue),
    ) -> Result<(), EditError> {
        if !target.is_empty() {
            return Err(unknown_path(props, target));
        }
        match edit {
            FieldEdit::SetBoolean(b) => on_change(InputValue::Bool(b)),
            edit => return Err(unsupported(props, &edit)),
        }
        Ok(())
    }
}
