use schema_form::{validate_schema, InputSchema, InputValue, SchemaError, SchemaKind};
use serde_json::json;

#[test]
fn schema_json_roundtrip() {
    let source = json!({
        "type": "object",
        "description": "Submission",
        "properties": {
            "prompt": {"type": "string", "enum": ["a", "b"]},
            "weight": {"type": "number", "minimum": 0, "maximum": 1},
            "photos": {"type": "array", "items": {"type": "image"}, "minItems": 1, "maxItems": 4},
            "answer": {"anyOf": [{"type": "string"}, {"type": "integer"}]}
        },
        "required": ["prompt"]
    });
    let schema: InputSchema = serde_json::from_value(source.clone()).unwrap();
    assert_eq!(schema.kind(), SchemaKind::Object);
    assert_eq!(schema.description(), Some("Submission"));
    assert!(validate_schema(&schema).is_ok());

    let InputSchema::Object(object) = &schema else {
        panic!("expected object schema");
    };
    assert_eq!(
        object.properties.keys().collect::<Vec<_>>(),
        ["prompt", "weight", "photos", "answer"]
    );
    assert_eq!(object.properties["answer"].kind(), SchemaKind::AnyOf);

    let back = serde_json::to_value(&schema).unwrap();
    let reparsed: InputSchema = serde_json::from_value(back).unwrap();
    assert_eq!(reparsed, schema);
}

#[test]
fn schema_from_json_reports_errors() {
    assert!(matches!(InputSchema::from_json("{\"type\": \"tuple\"}"), Err(SchemaError::Json(_))));
    let source = r#"{"type": "integer", "minimum": 5, "maximum": 1}"#;
    let schema = InputSchema::from_json(source).unwrap();
    assert!(matches!(validate_schema(&schema), Err(SchemaError::InvertedBounds { .. })));
}

#[test]
fn rich_media_values_keep_their_wire_shape() {
    let source = json!({
        "image": {
            "type": "image_url",
            "image_url": {"url": "data:image/png;base64,AAAA", "detail": "auto"}
        },
        "audio": {"type": "input_audio", "input_audio": {"data": "AAAA", "format": "mp3"}},
        "video": {"type": "video_url", "video_url": {"url": "https://cdn/x.mp4"}},
        "legacy_video": {"type": "input_video", "video_url": {"url": "https://cdn/y.mp4"}},
        "file": {"type": "file", "file": {"file_data": "AAAA", "filename": "a.txt"}},
        "count": 25,
        "ratio": 0.25
    });
    let value = InputValue::from_json(&source.to_string()).unwrap();
    for key in ["image", "audio", "video", "legacy_video", "file"] {
        assert!(value.get(key).unwrap().is_rich_content(), "{key} should be rich media");
    }
    assert_eq!(value.to_json(), source);
    assert_eq!(serde_json::to_string(&value).unwrap(), source.to_string());
}

#[test]
fn tagged_objects_are_never_mappings() {
    let malformed = InputValue::from(json!({"type": "image_url", "url": "oops"}));
    assert!(malformed.as_object().is_none());
    assert!(malformed.is_rich_content());
    let schema = InputSchema::object([("url", InputSchema::string())], &[]);
    assert!(!schema_form::value_matches_schema(&malformed, &schema));
    assert_eq!(malformed.to_json(), json!({"type": "image_url", "url": "oops"}));
}
