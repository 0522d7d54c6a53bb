use schema_form_path::PathStep;
use tracing::debug;

use crate::default::default_value;
use crate::error::EditError;
use crate::matcher::detect_matching_schema_index;
use crate::schema::{option_label, InputSchema};
use crate::value::InputValue;

use super::{
    edit_field, field_view, render_field, unsupported, BranchSelections, FieldBehavior, FieldEdit,
    FieldProps, FieldView, FieldViewKind,
};

/// Union fields. The active candidate is detected once per path and union
/// depth, and then only changes through a branch switch.
pub struct AnyOfField;

fn active_branch(
    props: &FieldProps<'_>,
    candidates: &[InputSchema],
    branches: &mut BranchSelections,
) -> usize {
    branches.get_or_insert_with(props.path, props.union_depth, || {
        detect_matching_schema_index(candidates, Some(props.value))
    })
}

fn is_union(schema: Option<&InputSchema>) -> bool {
    matches!(schema, Some(InputSchema::AnyOf(_)))
}

fn candidates<'a>(props: &FieldProps<'a>) -> &'a [InputSchema] {
    match props.schema {
        InputSchema::AnyOf(s) => &s.any_of,
        _ => &[],
    }
}

impl FieldBehavior for AnyOfField {
    fn render(&self, props: &FieldProps<'_>, branches: &mut BranchSelections) -> FieldView {
        let candidates = candidates(props);
        let selected = active_branch(props, candidates, branches);
        let active = candidates
            .get(selected)
            .map(|candidate| Box::new(render_field(&props.branch(candidate), branches)));
        field_view(
            props,
            FieldViewKind::AnyOf {
                options: candidates.iter().map(option_label).collect(),
                selected,
                depth: props.union_depth,
                active,
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
        if !matches!(props.schema, InputSchema::AnyOf(_)) {
            return Err(unsupported(props, &edit));
        }
        let candidates = candidates(props);
        let selected = active_branch(props, candidates, branches);
        let active = candidates.get(selected);

        if target.is_empty() {
            // A plain switch belongs to the innermost union at this path.
            let switch = match &edit {
                FieldEdit::SelectBranch(index) if !is_union(active) => Some(*index),
                FieldEdit::SelectBranchAt { depth, index } if *depth == props.union_depth => {
                    Some(*index)
                }
                _ => None,
            };
            if let Some(index) = switch {
                let candidate = candidates.get(index).ok_or_else(|| EditError::BranchOutOfRange {
                    path: props.path.to_string(),
                    index,
                    count: candidates.len(),
                })?;
                debug!(
                    path = props.path,
                    depth = props.union_depth,
                    branch = index,
                    "switching union branch"
                );
                branches.set(props.path, props.union_depth, index);
                branches.forget_descendants(props.path, props.union_depth);
                on_change(default_value(candidate));
                return Ok(());
            }
        }

        let candidate = active.ok_or_else(|| EditError::BranchOutOfRange {
            path: props.path.to_string(),
            index: selected,
            count: candidates.len(),
        })?;
        edit_field(&props.branch(candidate), branches, target, edit, on_change)
    }
}
