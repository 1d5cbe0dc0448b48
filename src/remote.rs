//! Data shapes exchanged with the remote thumbnail generator.
//!
//! This module never performs a request. It turns a form into the ordered multipart field list
//! the generator expects, and turns a raw HTTP response into a [`GenerateResponse`].

use serde::Deserialize;

use crate::form::{FormFiles, ThumbnailForm, Upload};

/// Suggested file name when the response does not carry one.
pub const DEFAULT_FILENAME: &str = "thumbnail.png";

/// Value of one multipart field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    /// Plain text part.
    Text(String),
    /// Binary file part.
    File(Upload),
}

/// One named multipart field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionField {
    /// Field name as the generator expects it.
    pub name: &'static str,
    /// Field value.
    pub value: FieldValue,
}

impl SubmissionField {
    fn text(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: FieldValue::Text(value.into()),
        }
    }

    fn file(name: &'static str, upload: &Upload) -> Self {
        Self {
            name,
            value: FieldValue::File(upload.clone()),
        }
    }
}

/// Build the multipart fields for a generation request, in submission order.
///
/// Required fields come first (`style`, `strength`, `edge_color`, `edge_alpha`, `width`,
/// `height`); optional uploads and labels follow only when present and non-empty.
pub fn submission_fields(form: &ThumbnailForm, files: &FormFiles) -> Vec<SubmissionField> {
    let mut out = vec![
        SubmissionField::text("style", &form.style),
        SubmissionField::text("strength", form.strength.to_string()),
        SubmissionField::text("edge_color", &form.border_hex),
        SubmissionField::text("edge_alpha", form.border_alpha.to_string()),
        SubmissionField::text("width", form.width.to_string()),
        SubmissionField::text("height", form.height.to_string()),
    ];

    let uploads = [
        ("screenshot", &files.screenshot),
        ("logo", &files.logo),
        ("game_logo", &files.game_logo),
    ];
    for (name, upload) in uploads {
        if let Some(upload) = upload {
            out.push(SubmissionField::file(name, upload));
        }
    }

    let labels = [
        ("season_raw", &form.season),
        ("episode_raw", &form.episode),
        ("title", &form.title),
    ];
    for (name, value) in labels {
        if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
            out.push(SubmissionField::text(name, v));
        }
    }

    if let Some(hex) = form.overlay_hex.as_deref().filter(|h| !h.is_empty()) {
        out.push(SubmissionField::text("overlay_color", hex));
        out.push(SubmissionField::text(
            "overlay_alpha",
            form.overlay_alpha.to_string(),
        ));
    }

    out
}

/// Outcome of a generation request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerateResponse {
    /// The generator returned the image itself.
    Image {
        /// Encoded image bytes.
        bytes: Vec<u8>,
        /// Suggested save name.
        filename: String,
    },
    /// The generator returned a link to the image.
    Url {
        /// Image location.
        url: String,
    },
    /// The generator (or the transport) reported a failure.
    Error {
        /// Human-readable message.
        message: String,
    },
}

#[derive(Deserialize)]
struct JsonReply {
    url: Option<String>,
    error: Option<String>,
}

/// Interpret a raw HTTP response from the generator.
///
/// `status == 0` stands for an opaque (CORS/redirect) response. `image/*` bodies are returned
/// as bytes with a file name from `Content-Disposition`; JSON bodies yield their `url` or
/// `error`; anything else is an error naming the content type.
pub fn interpret_response(
    status: u16,
    content_type: Option<&str>,
    content_disposition: Option<&str>,
    body: &[u8],
) -> GenerateResponse {
    if status == 0 {
        return GenerateResponse::Error {
            message: "Opaque response (CORS/redirect). Enable CORS or proxy in dev.".to_string(),
        };
    }

    let ct = content_type.unwrap_or("");
    if ct.starts_with("image/") {
        let filename = content_disposition
            .and_then(filename_from_content_disposition)
            .unwrap_or_else(|| DEFAULT_FILENAME.to_string());
        return GenerateResponse::Image {
            bytes: body.to_vec(),
            filename,
        };
    }

    if ct.contains("json") {
        return match serde_json::from_slice::<JsonReply>(body) {
            Ok(JsonReply { url: Some(url), .. }) if !url.is_empty() => {
                GenerateResponse::Url { url }
            }
            Ok(reply) => GenerateResponse::Error {
                message: reply.error.unwrap_or_else(|| format!("HTTP {status}")),
            },
            Err(e) => GenerateResponse::Error {
                message: format!("invalid JSON response: {e}"),
            },
        };
    }

    let shown = if ct.is_empty() { "unknown" } else { ct };
    GenerateResponse::Error {
        message: format!("Unexpected content-type: {shown} (HTTP {status})"),
    }
}

/// Extract the file name from a `Content-Disposition` header value.
///
/// Handles `filename=` and `filename*=`, drops a `UTF-8''` prefix and surrounding quotes, and
/// percent-decodes the result. Malformed escapes or non-UTF-8 results give `None`.
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    let lower = header.to_ascii_lowercase();
    let mut from = 0;

    while let Some(pos) = lower[from..].find("filename") {
        let mut i = from + pos + "filename".len();
        from += pos + 1;

        let bytes = header.as_bytes();
        if bytes.get(i) == Some(&b'*') {
            i += 1;
        }
        if bytes.get(i) != Some(&b'=') {
            continue;
        }
        i += 1;

        let raw = header[i..].split(';').next().unwrap_or("").trim();
        if raw.is_empty() {
            continue;
        }

        let raw = raw.strip_prefix("UTF-8''").unwrap_or(raw);
        let raw = raw.strip_prefix('"').unwrap_or(raw);
        let raw = raw.strip_suffix('"').unwrap_or(raw);
        return percent_decode(raw);
    }
    None
}

fn percent_decode(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = s.get(i + 1..i + 3)?;
            if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

#[cfg(test)]
#[path = "../tests/unit/remote.rs"]
mod tests;
