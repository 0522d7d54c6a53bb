use std::sync::{Arc, Mutex};

use schema_form::fields::{FieldViewKind, MediaPreview};
use schema_form::media::InMemoryFile;
use schema_form::{
    DiskFile, EditError, FieldEdit, FormListener, FormOptions, InputSchema, InputValue, MediaError,
    RichContentPart, SchemaForm,
};
use serde_json::json;

#[derive(Debug, Default)]
struct Events {
    changes: Vec<serde_json::Value>,
    validations: Vec<usize>,
    upload_errors: Vec<String>,
}

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Events>>);

impl FormListener for Recorder {
    fn on_change(&mut self, value: &InputValue) {
        self.0.lock().unwrap().changes.push(value.to_json());
    }

    fn on_validate(&mut self, errors: &[schema_form::ValidationError]) {
        self.0.lock().unwrap().validations.push(errors.len());
    }

    fn on_upload_error(&mut self, path: &str, _error: &MediaError) {
        self.0.lock().unwrap().upload_errors.push(path.to_string());
    }
}

fn submission_schema() -> InputSchema {
    InputSchema::object(
        [
            ("title", InputSchema::string()),
            ("report", InputSchema::file()),
            ("clips", InputSchema::array(InputSchema::audio())),
            (
                "answer",
                InputSchema::any_of(vec![
                    InputSchema::string(),
                    InputSchema::object([("score", InputSchema::number())], &["score"]),
                ]),
            ),
        ],
        &["title"],
    )
}

#[test]
fn edits_notify_change_then_validate() {
    let recorder = Recorder::default();
    let mut form = SchemaForm::new(submission_schema(), None, FormOptions::default())
        .with_listener(recorder.clone());
    assert!(!form.is_valid());

    form.apply("title", FieldEdit::SetString("Q3".into())).unwrap();
    assert!(form.is_valid());

    let events = recorder.0.lock().unwrap();
    assert_eq!(events.changes.len(), 1);
    assert_eq!(events.changes[0]["title"], json!("Q3"));
    assert_eq!(events.validations, [0]);
}

#[test]
fn any_of_switch_resets_value() {
    let mut form = SchemaForm::new(submission_schema(), None, FormOptions::default());
    form.apply("answer", FieldEdit::SetString("draft".into())).unwrap();
    form.apply("answer", FieldEdit::SelectBranch(1)).unwrap();
    assert_eq!(form.value().to_json()["answer"], json!({"score": 0}));

    form.apply("answer.score", FieldEdit::SetNumber(7.5)).unwrap();
    form.apply("answer", FieldEdit::SelectBranch(0)).unwrap();
    assert_eq!(form.value().to_json()["answer"], json!(""));

    let view = form.render();
    let answer = view.find("answer").unwrap();
    assert!(matches!(
        &answer.kind,
        FieldViewKind::AnyOf { selected: 0, options, .. } if options == &["String", "Object"]
    ));
}

#[test]
fn branch_selection_survives_ambiguous_edits() {
    let schema = InputSchema::any_of(vec![InputSchema::number(), InputSchema::integer()]);
    let mut form = SchemaForm::new(schema, None, FormOptions::default());
    form.apply("", FieldEdit::SelectBranch(1)).unwrap();
    form.apply("", FieldEdit::SetNumber(3.9)).unwrap();
    // Still the integer branch even though the value also matches `number`.
    assert_eq!(form.value(), &InputValue::Number(3.0));
    assert!(matches!(form.render().kind, FieldViewKind::AnyOf { selected: 1, .. }));
}

#[test]
fn disabled_form_rejects_edits_and_uploads() {
    let mut form = SchemaForm::new(submission_schema(), None, FormOptions::disabled());
    let before = form.value().clone();
    assert_eq!(form.apply("title", FieldEdit::SetString("x".into())), Err(EditError::Disabled));
    assert_eq!(form.begin_upload("report"), Err(EditError::Disabled));
    assert!(form.value().ptr_eq(&before));
    assert!(form.render().disabled);
}

#[test]
fn malformed_edit_paths() {
    let mut form = SchemaForm::new(submission_schema(), None, FormOptions::default());
    assert!(matches!(form.apply("title[", FieldEdit::AppendItem), Err(EditError::Path(_))));
    assert!(matches!(
        form.apply("clips[4]", FieldEdit::ClearMedia),
        Err(EditError::IndexOutOfBounds { index: 4, len: 0, .. })
    ));
    assert!(matches!(
        form.apply("title", FieldEdit::AppendItem),
        Err(EditError::Unsupported { kind: "String", edit: "AppendItem" })
    ));
}

#[tokio::test]
async fn file_upload_produces_raw_base64() {
    let mut form = SchemaForm::new(submission_schema(), None, FormOptions::default());
    let file = InMemoryFile::new("report.pdf", "application/pdf", b"%PDF-1.4".to_vec());
    assert!(form.select_file("report", &file).await.unwrap());

    let report = &form.value().to_json()["report"];
    assert_eq!(
        report,
        &json!({"type": "file", "file": {"file_data": "JVBERi0xLjQ=", "filename": "report.pdf"}})
    );
    assert!(!report["file"]["file_data"].as_str().unwrap().starts_with("data:"));

    let view = form.render();
    assert!(matches!(
        &view.find("report").unwrap().kind,
        FieldViewKind::Media {
            preview: Some(MediaPreview::File { label }),
            ..
        } if label == "report.pdf"
    ));
}

#[tokio::test]
async fn audio_upload_into_array_item() {
    let mut form = SchemaForm::new(submission_schema(), None, FormOptions::default());
    form.apply("clips", FieldEdit::AppendItem).unwrap();
    let clip = InMemoryFile::new("take.ogg", "audio/ogg", vec![1, 2, 3]);
    assert!(form.select_file("clips[0]", &clip).await.unwrap());
    assert_eq!(
        form.value().to_json()["clips"],
        json!([{"type": "input_audio", "input_audio": {"data": "AQID", "format": "wav"}}])
    );
}

#[test]
fn stale_upload_never_overwrites_newer_selection() {
    let mut form = SchemaForm::new(submission_schema(), None, FormOptions::default());
    let first = form.begin_upload("report").unwrap();
    let second = form.begin_upload("report").unwrap();

    let part = |name: &str| RichContentPart::File {
        file: schema_form::value::FileContent {
            file_data: Some("AA==".into()),
            file_url: None,
            filename: Some(name.into()),
        },
    };

    // The newer selection resolves first, the older one late.
    assert!(form.complete_upload(second, Ok(part("new.pdf"))));
    assert!(!form.complete_upload(first, Ok(part("old.pdf"))));
    assert_eq!(form.value().to_json()["report"]["file"]["filename"], json!("new.pdf"));
}

#[tokio::test]
async fn read_failure_keeps_value_and_reports() {
    let recorder = Recorder::default();
    let mut form = SchemaForm::new(submission_schema(), None, FormOptions::default())
        .with_listener(recorder.clone());
    let missing_path = std::env::temp_dir().join("schema-form-missing-upload.pdf");
    let missing = DiskFile::new(missing_path, "application/pdf");
    assert!(!form.select_file("report", &missing).await.unwrap());
    assert_eq!(form.value().get("report"), Some(&InputValue::Null));

    let events = recorder.0.lock().unwrap();
    assert_eq!(events.upload_errors, ["report"]);
    assert!(events.changes.is_empty());
}

#[test]
fn set_value_substitutes_and_remounts() {
    let recorder = Recorder::default();
    let mut form = SchemaForm::new(submission_schema(), None, FormOptions::default())
        .with_listener(recorder.clone());
    form.apply("answer", FieldEdit::SelectBranch(1)).unwrap();

    form.set_value(Some(InputValue::from(json!({"title": "T", "answer": "text"}))));
    assert!(matches!(
        form.render().find("answer").map(|v| &v.kind),
        Some(FieldViewKind::AnyOf { selected: 0, .. })
    ));

    form.set_value(Some(InputValue::from(json!([1, 2]))));
    assert_eq!(form.value().get("title"), Some(&InputValue::from("")));
    let events = recorder.0.lock().unwrap();
    // SelectBranch plus the substituted external value.
    assert_eq!(events.changes.len(), 2);
    assert_eq!(events.validations.len(), 3);
}
