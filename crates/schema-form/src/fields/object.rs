use schema_form_path::{join_key, PathStep};

use crate::default::default_value;
use crate::error::EditError;
use crate::schema::InputSchema;
use crate::value::{with_property, InputValue};

use super::{
    edit_field, field_view, render_field, unknown_path, unsupported, BranchSelections,
    FieldBehavior, FieldEdit,
    FieldProps, FieldView, FieldViewKind, PropertyView,
};

pub struct ObjectField;

impl FieldBehavior for ObjectField {
    fn render(&self, props: &FieldProps<'_>, branches: &mut BranchSelections) -> FieldView {
        let InputSchema::Object(schema) = props.schema else {
            return field_view(props, FieldViewKind::Object { properties: Vec::new() });
        };
        let map = props.value.as_object();
        let mut properties = Vec::with_capacity(schema.properties.len());
        for (name, child_schema) in &schema.properties {
            let fallback;
            let value = match map.and_then(|map| map.get(name)) {
                Some(value) => value,
                None => {
                    fallback = default_value(child_schema);
                    &fallback
                }
            };
            let path = join_key(props.path, name);
            let field = render_field(&props.child(child_schema, value, &path), branches);
            properties.push(PropertyView {
                name: name.clone(),
                required: schema.is_required(name),
                field,
            });
        }
        field_view(props, FieldViewKind::Object { properties })
    }

    fn edit(
        &self,
        props: &FieldProps<'_>,
        branches: &mut BranchSelections,
        target: &[PathStep],
        edit: FieldEdit,
        on_change: &mut dyn FnMut(InputValue),
    ) -> Result<(), EditError> {
        let InputSchema::Object(schema) = props.schema else {
            return Err(unsupported(props, &edit));
        };
        let Some((step, rest)) = target.split_first() else {
            return Err(unsupported(props, &edit));
        };
        let Some((name, child_schema)) = step
            .as_key()
            .and_then(|key| schema.properties.get_key_value(key))
        else {
            return Err(unknown_path(props, target));
        };

        let fallback;
        let value = match props.value.as_object().and_then(|map| map.get(name)) {
            Some(value) => value,
            None => {
                fallback = default_value(child_schema);
                &fallback
            }
        };
        let path = join_key(props.path, name);
        let mut replaced = None;
        edit_field(&props.child(child_schema, value, &path), branches, rest, edit, &mut |new| {
            replaced = Some(new)
        })?;
        if let Some(new) = replaced {
            on_change(with_property(props.value, name, new));
        }
        Ok(())
    }
}
