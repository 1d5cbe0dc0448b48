use super::*;

fn names(fields: &[SubmissionField]) -> Vec<&'static str> {
    fields.iter().map(|f| f.name).collect()
}

fn text_of<'a>(fields: &'a [SubmissionField], name: &str) -> Option<&'a str> {
    fields.iter().find(|f| f.name == name).and_then(|f| match &f.value {
        FieldValue::Text(s) => Some(s.as_str()),
        FieldValue::File(_) => None,
    })
}

#[test]
fn default_form_fields_in_order() {
    let fields = submission_fields(&ThumbnailForm::default(), &FormFiles::default());
    assert_eq!(
        names(&fields),
        [
            "style",
            "strength",
            "edge_color",
            "edge_alpha",
            "width",
            "height",
            "season_raw",
            "episode_raw",
            "overlay_color",
            "overlay_alpha",
        ]
    );
    assert_eq!(text_of(&fields, "style"), Some("game"));
    assert_eq!(text_of(&fields, "strength"), Some("1"));
    assert_eq!(text_of(&fields, "edge_color"), Some("#8e0052"));
    assert_eq!(text_of(&fields, "edge_alpha"), Some("1"));
    assert_eq!(text_of(&fields, "width"), Some("1280"));
    assert_eq!(text_of(&fields, "overlay_alpha"), Some("0.15"));
}

#[test]
fn uploads_and_title_are_included_when_present() {
    let form = ThumbnailForm {
        title: Some("Boss fight".to_string()),
        season: None,
        episode: Some(String::new()),
        overlay_hex: None,
        ..ThumbnailForm::default()
    };
    let files = FormFiles {
        screenshot: Some(Upload::new("shot.png", vec![1, 2])),
        logo: None,
        game_logo: Some(Upload::new("game.png", vec![3])),
    };
    let fields = submission_fields(&form, &files);
    assert_eq!(
        names(&fields),
        [
            "style",
            "strength",
            "edge_color",
            "edge_alpha",
            "width",
            "height",
            "screenshot",
            "game_logo",
            "title",
        ]
    );
    match &fields[6].value {
        FieldValue::File(u) => assert_eq!(u.file_name, "shot.png"),
        other => panic!("expected file, got {other:?}"),
    }
    assert_eq!(text_of(&fields, "title"), Some("Boss fight"));
}

#[test]
fn opaque_response_is_an_error() {
    let r = interpret_response(0, None, None, b"");
    match r {
        GenerateResponse::Error { message } => assert!(message.starts_with("Opaque response")),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn image_response_uses_disposition_filename() {
    let r = interpret_response(
        200,
        Some("image/png"),
        Some("attachment; filename=\"thumb 1.png\""),
        &[9, 9, 9],
    );
    assert_eq!(
        r,
        GenerateResponse::Image {
            bytes: vec![9, 9, 9],
            filename: "thumb 1.png".to_string(),
        }
    );

    let r = interpret_response(200, Some("image/jpeg"), None, &[1]);
    assert_eq!(
        r,
        GenerateResponse::Image {
            bytes: vec![1],
            filename: DEFAULT_FILENAME.to_string(),
        }
    );
}

#[test]
fn json_response_yields_url_or_error() {
    let ct = Some("application/json; charset=utf-8");
    assert_eq!(
        interpret_response(200, ct, None, br#"{"url":"https://x/y.png"}"#),
        GenerateResponse::Url {
            url: "https://x/y.png".to_string()
        }
    );
    assert_eq!(
        interpret_response(422, ct, None, br#"{"error":"bad strength"}"#),
        GenerateResponse::Error {
            message: "bad strength".to_string()
        }
    );
    assert_eq!(
        interpret_response(500, ct, None, br#"{"url":""}"#),
        GenerateResponse::Error {
            message: "HTTP 500".to_string()
        }
    );
    assert!(matches!(
        interpret_response(200, ct, None, b"not json"),
        GenerateResponse::Error { .. }
    ));
}

#[test]
fn other_content_types_are_errors() {
    assert_eq!(
        interpret_response(200, Some("text/html"), None, b"<html>"),
        GenerateResponse::Error {
            message: "Unexpected content-type: text/html (HTTP 200)".to_string()
        }
    );
    assert_eq!(
        interpret_response(502, None, None, b""),
        GenerateResponse::Error {
            message: "Unexpected content-type: unknown (HTTP 502)".to_string()
        }
    );
}

#[test]
fn content_disposition_variants() {
    assert_eq!(
        filename_from_content_disposition("attachment; filename=plain.png").as_deref(),
        Some("plain.png")
    );
    assert_eq!(
        filename_from_content_disposition("attachment; FILENAME=\"quoted.png\"; size=3")
            .as_deref(),
        Some("quoted.png")
    );
    assert_eq!(
        filename_from_content_disposition("attachment; filename*=UTF-8''caf%C3%A9.png").as_deref(),
        Some("café.png")
    );
    assert_eq!(filename_from_content_disposition("inline"), None);
    assert_eq!(filename_from_content_disposition("attachment; filename="), None);
    assert_eq!(
        filename_from_content_disposition("attachment; filename=bad%zz.png"),
        None
    );
}
