use std::collections::HashMap;

use crate::schema::InputSchema;
use crate::validator::ValidationError;
use crate::value::{InputValue, RichContentPart};

/// Everything a field behavior needs to render or edit one field.
#[derive(Debug, Clone, Copy)]
pub struct FieldProps<'a> {
    pub schema: &'a InputSchema,
    pub value: &'a InputValue,
    /// Textual path of this field from the form root.
    pub path: &'a str,
    /// The whole form's error list. Behaviors pick out their own path.
    pub errors: &'a [ValidationError],
    pub disabled: bool,
    /// Number of unions enclosing this field at the same path.
    pub union_depth: usize,
}

impl<'a> FieldProps<'a> {
    /// Props for a nested field sharing this field's errors and disabled
    /// flag.
    pub fn child<'b>(
        &self,
        schema: &'b InputSchema,
        value: &'b InputValue,
        path: &'b str,
    ) -> FieldProps<'b>
    where
        'a: 'b,
    {
        FieldProps {
            schema,
            value,
            path,
            errors: self.errors,
            disabled: self.disabled,
            union_depth: 0,
        }
    }

    /// Props for a union candidate, which shares this field's value and
    /// path one union level deeper.
    pub fn branch(&self, schema: &'a InputSchema) -> FieldProps<'a> {
        FieldProps {
            schema,
            union_depth: self.union_depth + 1,
            ..*self
        }
    }
}

/// Active anyOf candidate per field.
///
/// A union is identified by its path and its union depth, so a union
/// nested directly in another union keeps its own selection. Entries are
/// created the first time a union field is rendered or edited and are only
/// changed by an explicit branch switch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchSelections {
    selected: HashMap<(String, usize), usize>,
}

impl BranchSelections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str, depth: usize) -> Option<usize> {
        self.selected.get(&(path.to_string(), depth)).copied()
    }

    pub fn set(&mut self, path: &str, depth: usize, index: usize) {
        self.selected.insert((path.to_string(), depth), index);
    }

    /// The selection of the union at `path` and `depth`, initialising it
    /// with `detect` on first use.
    pub fn get_or_insert_with(
        &mut self,
        path: &str,
        depth: usize,
        detect: impl FnOnce() -> usize,
    ) -> usize {
        *self.selected.entry((path.to_string(), depth)).or_insert_with(detect)
    }

    /// Drop selections beneath `path` and those of unions nested deeper
    /// than `depth` at `path` itself.
    pub fn forget_descendants(&mut self, path: &str, depth: usize) {
        self.selected.retain(|(selected, at), _| {
            if selected == path {
                *at <= depth
            } else {
                !schema_form_path::is_within(path, selected)
            }
        });
    }

    /// Drop every selection at `path` and beneath it.
    pub fn forget_within(&mut self, path: &str) {
        self.selected
            .retain(|(selected, _), _| !schema_form_path::is_within(path, selected));
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

/// A user edit addressed to one field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    SetString(String),
    /// Integer fields truncate toward zero.
    SetNumber(f64),
    SetBoolean(bool),
    SetMedia(RichContentPart),
    ClearMedia,
    AppendItem,
    RemoveItem(usize),
    /// Switch the innermost union at the addressed path.
    SelectBranch(usize),
    /// Switch the union at a given nesting depth of the addressed path,
    /// `0` being the outermost.
    SelectBranchAt { depth: usize, index: usize },
    /// Replace the field's value wholesale.
    Replace(InputValue),
}

impl FieldEdit {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetString(_) => "SetString",
            Self::SetNumber(_) => "SetNumber",
            Self::SetBoolean(_) => "SetBoolean",
            Self::SetMedia(_) => "SetMedia",
            Self::ClearMedia => "ClearMedia",
            Self::AppendItem => "AppendItem",
            Self::RemoveItem(_) => "RemoveItem",
            Self::SelectBranch(_) => "SelectBranch",
            Self::SelectBranchAt { .. } => "SelectBranchAt",
            Self::Replace(_) => "Replace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forget_descendants_keeps_self() {
        let mut branches = BranchSelections::new();
        branches.set("a", 0, 1);
        branches.set("a", 1, 0);
        branches.set("a.b", 0, 0);
        branches.set("a[2]", 0, 1);
        branches.set("ab", 0, 1);
        branches.forget_descendants("a", 0);
        assert_eq!(branches.get("a", 0), Some(1));
        assert_eq!(branches.get("a", 1), None);
        assert_eq!(branches.get("a.b", 0), None);
        assert_eq!(branches.get("a[2]", 0), None);
        assert_eq!(branches.get("ab", 0), Some(1));
        branches.forget_within("a");
        assert_eq!(branches.get("a", 0), None);
        assert_eq!(branches.len(), 1);
    }

    #[test]
    fn test_depths_are_separate_slots() {
        let mut branches = BranchSelections::new();
        assert_eq!(branches.get_or_insert_with("u", 0, || 2), 2);
        assert_eq!(branches.get_or_insert_with("u", 0, || 0), 2);
        assert_eq!(branches.get_or_insert_with("u", 1, || 0), 0);
        assert_eq!(branches.len(), 2);
    }
}
