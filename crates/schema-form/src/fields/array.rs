use schema_form_path::{join_index, PathStep};

use crate::default::default_value;
use crate::error::EditError;
use crate::schema::InputSchema;
use crate::value::{set_at, with_pushed, without_item, InputValue};

use super::{
    edit_field, field_view, render_field, unknown_path, unsupported, BranchSelections,
    FieldBehavior, FieldEdit,
    FieldProps, FieldView, FieldViewKind,
};

pub struct ArrayField;

impl FieldBehavior for ArrayField {
    fn render(&self, props: &FieldProps<'_>, branches: &mut BranchSelections) -> FieldView {
        let InputSchema::Array(schema) = props.schema else {
            return field_view(
                props,
                FieldViewKind::Array {
                    items: Vec::new(),
                    can_add: false,
                    can_remove: false,
                    min_items: None,
                    max_items: None,
                },
            );
        };
        let values = props.value.as_array().unwrap_or_default();
        let items = values
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let path = join_index(props.path, index);
                render_field(&props.child(&schema.items, item, &path), branches)
            })
            .collect();
        let len = values.len() as u64;
        field_view(
            props,
            FieldViewKind::Array {
                items,
                can_add: schema.max_items.map_or(true, |max| len < max),
                can_remove: len > schema.min_items.unwrap_or(0),
                min_items: schema.min_items,
                max_items: schema.max_items,
            },
        )
    }

    fn edit(
        &self,
        props: &FieldProps<'_>,
        branches: &mut BranchSelections,
        target: &[PathStep],
        edit: FieldEdit,
        on_change: &mut dyn FnMut(InputValue),
    ) -> Result<(), EditError> {
        let InputSchema::Array(schema) = props.schema else {
            return Err(unsupported(props, &edit));
        };
        let values = props.value.as_array().unwrap_or_default();

        let Some((step, rest)) = target.split_first() else {
            match edit {
                FieldEdit::AppendItem => {
                    on_change(with_pushed(props.value, default_value(&schema.items)))
                }
                FieldEdit::RemoveItem(index) => {
                    let remaining =
                        without_item(props.value, index).ok_or_else(|| EditError::IndexOutOfBounds {
                            path: props.path.to_string(),
                            index,
                            len: values.len(),
                        })?;
                    // Later elements shift down, so their selections no longer line up.
                    branches.forget_descendants(props.path, props.union_depth);
                    on_change(remaining);
                }
                edit => return Err(unsupported(props, &edit)),
            }
            return Ok(());
        };

        let Some(index) = step.as_index() else {
            return Err(unknown_path(props, target));
        };
        let item = values.get(index).ok_or_else(|| EditError::IndexOutOfBounds {
            path: props.path.to_string(),
            index,
            len: values.len(),
        })?;
        let path = join_index(props.path, index);
        let mut replaced = None;
        edit_field(&props.child(&schema.items, item, &path), branches, rest, edit, &mut |new| {
            replaced = Some(new)
        })?;
        if let Some(new) = replaced {
            on_change(set_at(props.value, &[PathStep::Index(index)], new)?);
        }
        Ok(())
    }
}
