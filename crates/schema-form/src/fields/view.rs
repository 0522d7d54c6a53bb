//! Presentation-neutral view tree produced by rendering a form.

use serde::Serialize;

use crate::value::MediaKind;

/// One rendered field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldView {
    pub path: String,
    pub description: Option<String>,
    /// First error recorded at exactly this field's path.
    pub error: Option<String>,
    pub disabled: bool,
    pub kind: FieldViewKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum FieldViewKind {
    Text {
        value: String,
        /// Allowed values when the string is an enum.
        options: Option<Vec<String>>,
    },
    Number {
        value: Option<f64>,
        integer: bool,
        minimum: Option<f64>,
        maximum: Option<f64>,
    },
    Toggle {
        value: bool,
    },
    Media {
        #[serde(skip)]
        kind: MediaKind,
        label: &'static str,
        /// MIME filter for the upload affordance.
        accept: &'static str,
        /// `None` shows the upload affordance; otherwise a preview with a
        /// remove affordance.
        preview: Option<MediaPreview>,
    },
    Object {
        properties: Vec<PropertyView>,
    },
    Array {
        items: Vec<FieldView>,
        can_add: bool,
        can_remove: bool,
        min_items: Option<u64>,
        max_items: Option<u64>,
    },
    AnyOf {
        options: Vec<String>,
        selected: usize,
        /// Nesting depth among unions at this path, for
        /// [`FieldEdit::SelectBranchAt`](super::FieldEdit::SelectBranchAt).
        depth: usize,
        active: Option<Box<FieldView>>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyView {
    pub name: String,
    pub required: bool,
    pub field: FieldView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MediaPreview {
    Image { url: String },
    /// Upper-cased container format, e.g. `MP3`.
    Audio { format: String },
    Video { url: String },
    File { label: String },
    /// A value is present but not a recognizable media part.
    Unrecognized,
}

impl FieldView {
    /// Look up the outermost view rendered at `path`.
    pub fn find(&self, path: &str) -> Option<&FieldView> {
        if self.path == path {
            return Some(self);
        }
        if !schema_form_path::is_within(&self.path, path) {
            return None;
        }
        match &self.kind {
            FieldViewKind::Object { properties } => {
                properties.iter().find_map(|p| p.field.find(path))
            }
            FieldViewKind::Array { items, .. } => items.iter().find_map(|item| item.find(path)),
            FieldViewKind::AnyOf { active, .. } => {
                active.as_deref().and_then(|active| active.find(path))
            }
            _ => None,
        }
    }
}
