//! The form controller.
//!
//! Owns the schema, the current value, the validation errors and the
//! per-form caches (union branch selections, upload generations). Edits go
//! through the field dispatcher and always produce a whole new value.

use schema_form_path::{join_index, join_key, parse_path, validate_path, PathStep};
use tracing::debug;

use crate::config::FormOptions;
use crate::default::default_value;
use crate::error::{EditError, MediaError};
use crate::fields::media::media_kind;
use crate::fields::{edit_field, render_field, BranchSelections, FieldEdit, FieldProps, FieldView};
use crate::matcher::{detect_matching_schema_index, value_matches_schema};
use crate::media::{encode_media, FileBlob, UploadTicket, UploadTracker};
use crate::schema::{schema_type_label, InputSchema};
use crate::validator::{self, validate_value_with, ValidationError};
use crate::value::{InputValue, RichContentPart};

/// Observer of form state changes. All methods default to no-ops.
pub trait FormListener: Send {
    /// The value was replaced.
    fn on_change(&mut self, _value: &InputValue) {}

    /// Errors were recomputed. Fires after every `on_change`.
    fn on_validate(&mut self, _errors: &[ValidationError]) {}

    /// Reading a selected file failed. The field keeps its prior value.
    fn on_upload_error(&mut self, _path: &str, _error: &MediaError) {}
}

pub struct SchemaForm {
    schema: InputSchema,
    value: InputValue,
    errors: Vec<ValidationError>,
    options: FormOptions,
    branches: BranchSelections,
    uploads: UploadTracker,
    listener: Option<Box<dyn FormListener>>,
}

impl std::fmt::Debug for SchemaForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaForm")
            .field("schema", &self.schema)
            .field("value", &self.value)
            .field("errors", &self.errors)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// The incoming value when it has the right shape, else the schema default.
fn effective_value(schema: &InputSchema, incoming: Option<InputValue>) -> InputValue {
    match incoming {
        Some(value) if value_matches_schema(&value, schema) => value,
        Some(value) => {
            debug!(
                found = value.type_name(),
                expected = schema_type_label(schema),
                "substituting default value"
            );
            default_value(schema)
        }
        None => default_value(schema),
    }
}

impl SchemaForm {
    /// Mount a form. `incoming` is used when it matches the schema's
    /// shape; otherwise the form starts from the schema default.
    pub fn new(schema: InputSchema, incoming: Option<InputValue>, options: FormOptions) -> Self {
        let value = effective_value(&schema, incoming);
        let errors = validate_value_with(&schema, Some(&value), "", false, &options.validator);
        Self {
            schema,
            value,
            errors,
            options,
            branches: BranchSelections::new(),
            uploads: UploadTracker::new(),
            listener: None,
        }
    }

    pub fn with_listener(mut self, listener: impl FormListener + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn set_listener(&mut self, listener: Option<Box<dyn FormListener>>) {
        self.listener = listener;
    }

    /// Replace the value from outside the form.
    ///
    /// Union selections are re-detected and pending uploads are abandoned.
    /// The listener sees the change only when the incoming value had to be
    /// substituted, since the host already knows what it passed in.
    pub fn set_value(&mut self, incoming: Option<InputValue>) {
        let substituted = !matches!(&incoming, Some(v) if value_matches_schema(v, &self.schema));
        self.value = effective_value(&self.schema, incoming);
        self.branches.clear();
        self.uploads = UploadTracker::new();
        self.revalidate();
        if substituted {
            if let Some(listener) = self.listener.as_mut() {
                listener.on_change(&self.value);
            }
        }
        if let Some(listener) = self.listener.as_mut() {
            listener.on_validate(&self.errors);
        }
    }

    pub fn value(&self) -> &InputValue {
        &self.value
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn schema(&self) -> &InputSchema {
        &self.schema
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.options.disabled = disabled;
    }

    /// First error message at exactly `path`.
    pub fn error_message(&self, path: &str) -> Option<&str> {
        validator::error_message(&self.errors, path)
    }

    /// Errors at `path` or beneath it.
    pub fn errors_for_path(&self, path: &str) -> Vec<&ValidationError> {
        validator::errors_for_path(&self.errors, path)
    }

    pub fn render(&mut self) -> FieldView {
        let props = FieldProps {
            schema: &self.schema,
            value: &self.value,
            path: "",
            errors: &self.errors,
            disabled: self.options.disabled,
            union_depth: 0,
        };
        render_field(&props, &mut self.branches)
    }

    /// Apply a user edit to the field at `path`.
    ///
    /// Pending uploads beneath `path` are abandoned unless the edit only
    /// appends an array item.
    ///
    /// # Errors
    ///
    /// See [`EditError`]. On error the value is unchanged.
    pub fn apply(&mut self, path: &str, edit: FieldEdit) -> Result<(), EditError> {
        let keeps_uploads = matches!(edit, FieldEdit::AppendItem);
        self.apply_edit(path, edit)?;
        if !keeps_uploads {
            self.uploads.cancel_within(path);
        }
        Ok(())
    }

    fn apply_edit(&mut self, path: &str, edit: FieldEdit) -> Result<(), EditError> {
        let target = parse_path(path)?;
        validate_path(&target)?;
        let props = FieldProps {
            schema: &self.schema,
            value: &self.value,
            path: "",
            errors: &self.errors,
            disabled: self.options.disabled,
            union_depth: 0,
        };
        let mut replaced = None;
        edit_field(&props, &mut self.branches, &target, edit, &mut |new| replaced = Some(new))?;
        if let Some(value) = replaced {
            self.commit(value);
        }
        Ok(())
    }

    fn commit(&mut self, value: InputValue) {
        self.value = value;
        self.revalidate();
        if let Some(listener) = self.listener.as_mut() {
            listener.on_change(&self.value);
            listener.on_validate(&self.errors);
        }
    }

    fn revalidate(&mut self) {
        self.errors = validate_value_with(
            &self.schema,
            Some(&self.value),
            "",
            false,
            &self.options.validator,
        );
    }

    /// Start a file selection on the media field at `path`.
    ///
    /// The returned ticket supersedes any earlier one for the same field.
    ///
    /// # Errors
    ///
    /// Fails when the form is disabled or `path` is not a media field.
    pub fn begin_upload(&mut self, path: &str) -> Result<UploadTicket, EditError> {
        if self.options.disabled {
            return Err(EditError::Disabled);
        }
        let target = parse_path(path)?;
        let schema = schema_at(&self.schema, Some(&self.value), "", 0, &target, &mut self.branches)
            .ok_or_else(|| EditError::UnknownPath {
                path: path.to_string(),
            })?;
        let kind = media_kind(schema).ok_or_else(|| EditError::Unsupported {
            kind: schema_type_label(schema),
            edit: "SelectFile",
        })?;
        debug!(path, kind = kind.label(), "upload started");
        Ok(self.uploads.begin(path, kind))
    }

    /// Finish a file selection. Returns whether the value changed.
    ///
    /// Stale tickets are dropped. Read failures leave the value as it was
    /// and are reported to the listener.
    pub fn complete_upload(
        &mut self,
        ticket: UploadTicket,
        result: Result<RichContentPart, MediaError>,
    ) -> bool {
        if !self.uploads.finish(&ticket) {
            debug!(path = %ticket.path, generation = ticket.generation, "discarding stale upload");
            return false;
        }
        match result {
            Ok(part) => match self.apply_edit(&ticket.path, FieldEdit::SetMedia(part)) {
                Ok(()) => true,
                Err(err) => {
                    debug!(path = %ticket.path, error = %err, "upload could not be applied");
                    false
                }
            },
            Err(err) => {
                debug!(path = %ticket.path, error = %err, "upload read failed");
                if let Some(listener) = self.listener.as_mut() {
                    listener.on_upload_error(&ticket.path, &err);
                }
                false
            }
        }
    }

    /// Read `file` and store it in the media field at `path`.
    ///
    /// The form stays mutably borrowed until the read finishes, so this
    /// cannot overlap with another selection. Hosts that let a newer
    /// selection supersede a pending one should drive
    /// [`begin_upload`](SchemaForm::begin_upload) and
    /// [`complete_upload`](SchemaForm::complete_upload) themselves.
    ///
    /// # Errors
    ///
    /// Fails only if the selection cannot start; read failures are handled
    /// as in [`SchemaForm::complete_upload`].
    pub async fn select_file(
        &mut self,
        path: &str,
        file: &dyn FileBlob,
    ) -> Result<bool, EditError> {
        let ticket = self.begin_upload(path)?;
        let result = encode_media(ticket.kind, file).await;
        Ok(self.complete_upload(ticket, result))
    }
}

/// Resolve the schema of the field at `rest`, following active union
/// branches.
fn schema_at<'s>(
    schema: &'s InputSchema,
    value: Option<&InputValue>,
    path: &str,
    depth: usize,
    rest: &[PathStep],
    branches: &mut BranchSelections,
) -> Option<&'s InputSchema> {
    match (schema, rest.split_first()) {
        (InputSchema::AnyOf(s), _) => {
            let selected = branches.get_or_insert_with(path, depth, || {
                detect_matching_schema_index(&s.any_of, value)
            });
            schema_at(s.any_of.get(selected)?, value, path, depth + 1, rest, branches)
        }
        (_, None) => Some(schema),
        (InputSchema::Object(s), Some((PathStep::Key(key), rest))) => {
            let child = s.properties.get(key)?;
            let child_value = value.and_then(|v| v.get(key));
            schema_at(child, child_value, &join_key(path, key), 0, rest, branches)
        }
        (InputSchema::Array(s), Some((PathStep::Index(index), rest))) => {
            let item = value.and_then(InputValue::as_array).and_then(|items| items.get(*index));
            schema_at(&s.items, item, &join_index(path, *index), 0, rest, branches)
        }
        _ => None,
    }
}
