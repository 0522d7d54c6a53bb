use schema_form_path::PathStep;

use crate::error::EditError;
use crate::schema::InputSchema;
use crate::value::{InputValue, MediaKind, RichContentPart};

use super::{
    field_view, unknown_path, unsupported, BranchSelections, FieldBehavior, FieldEdit, FieldProps,
    FieldView,
    FieldViewKind, MediaPreview,
};

/// Image, audio, video and file fields.
pub struct MediaField;

/// Media kind accepted by a media schema.
pub fn media_kind(schema: &InputSchema) -> Option<MediaKind> {
    match schema {
        InputSchema::Image(_) => Some(MediaKind::Image),
        InputSchema::Audio(_) => Some(MediaKind::Audio),
        InputSchema::Video(_) => Some(MediaKind::Video),
        InputSchema::File(_) => Some(MediaKind::File),
        _ => None,
    }
}

fn preview(value: &InputValue) -> Option<MediaPreview> {
    if value.is_null() {
        return None;
    }
    let preview = match value.as_rich_content() {
        Some(RichContentPart::ImageUrl { image_url }) => MediaPreview::Image {
            url: image_url.url.clone(),
        },
        Some(RichContentPart::InputAudio { input_audio }) => MediaPreview::Audio {
            format: input_audio.format.as_str().to_ascii_uppercase(),
        },
        Some(
            RichContentPart::VideoUrl { video_url } | RichContentPart::InputVideo { video_url },
        ) => {
            MediaPreview::Video {
                url: video_url.url.clone(),
            }
        }
        Some(RichContentPart::File { file }) => MediaPreview::File {
            label: file
                .filename
                .clone()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| "Uploaded file".to_string()),
        },
        None => MediaPreview::Unrecognized,
    };
    Some(preview)
}

impl FieldBehavior for MediaField {
    fn render(&self, props: &FieldProps<'_>, _branches: &mut BranchSelections) -> FieldView {
        let kind = media_kind(props.schema).unwrap_or(MediaKind::File);
        field_view(
            props,
            FieldViewKind::Media {
                kind,
                label: kind.label(),
                accept: kind.accept(),
                preview: preview(props.value),
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
            FieldEdit::SetMedia(part) if media_kind(props.schema) == Some(part.kind()) => {
                on_change(InputValue::rich(part))
            }
            FieldEdit::ClearMedia => on_change(InputValue::Null),
            edit => return Err(unsupported(props, &edit)),
        }
        Ok(())
    }
}
