//! `PHOTO` references and inline embedding.
//!
//! A photo is either carried inline (base64 payload or `data:` URI), points
//! at a local file, or points at a remote resource. Exported files must be
//! self-contained, so local references are replaced by an inline payload
//! before serialization.

use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::serializer::DEFAULT_VERSION;
use crate::rfc::vcard::core::{ContactRecord, is_base64, names};
use crate::rfc::vcard::parse::lexer::{line_params, line_value};

/// Where the image of a `PHOTO` line lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoRef {
    Inline,
    Local(PathBuf),
    Remote(String),
}

/// Classifies a `PHOTO` line.
#[must_use]
pub fn photo_reference(line: &str) -> PhotoRef {
    let value = line_value(line).trim();

    if is_base64(&line_params(line)) || value.starts_with("data:") {
        return PhotoRef::Inline;
    }

    if let Some(path) = file_uri_path(value) {
        return PhotoRef::Local(path);
    }

    if value.contains("://") {
        return PhotoRef::Remote(value.to_string());
    }

    if value.is_empty() {
        PhotoRef::Inline
    } else {
        PhotoRef::Local(PathBuf::from(value))
    }
}

/// Converts a `file://` URI to a path, percent-decoding it.
///
/// Returns `None` for anything that is not a `file://` URI naming this
/// machine, i.e. with an empty or `localhost` authority.
#[must_use]
pub fn file_uri_path(uri: &str) -> Option<PathBuf> {
    let rest = uri.strip_prefix("file://")?;
    let (authority, path) = rest.split_at(rest.find('/')?);

    if !authority.is_empty() && !authority.eq_ignore_ascii_case("localhost") {
        return None;
    }
    Some(PathBuf::from(percent_decode(path)))
}

/// Returns the local file a `PHOTO` line refers to, if any.
#[must_use]
pub fn local_photo_path(line: &str) -> Option<PathBuf> {
    match photo_reference(line) {
        PhotoRef::Local(path) => Some(path),
        PhotoRef::Inline | PhotoRef::Remote(_) => None,
    }
}

/// Guesses an image media type from a file extension.
#[must_use]
pub fn media_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "image/jpeg",
    }
}

/// Replaces the `index`-th `PHOTO` line with an inline base64 payload.
///
/// The line takes the form of the record's version: `ENCODING=BASE64` for
/// 2.1, `ENCODING=b` for 3.0 and a `data:` URI for 4.0. Returns `false` when
/// the record has no such `PHOTO` line.
pub fn embed_photo(
    record: &mut ContactRecord,
    index: usize,
    bytes: &[u8],
    media_type: &str,
) -> bool {
    let mut lines = record.lines(names::PHOTO).to_vec();
    let Some(slot) = lines.get_mut(index) else {
        return false;
    };

    let payload = STANDARD.encode(bytes);
    let image_type = media_type
        .rsplit('/')
        .next()
        .unwrap_or(media_type)
        .trim_end_matches("+xml")
        .to_ascii_uppercase();

    *slot = match record.version().unwrap_or(DEFAULT_VERSION) {
        "2.1" => format!("PHOTO;ENCODING=BASE64;TYPE={image_type}:{payload}"),
        "4.0" => format!("PHOTO:data:{media_type};base64,{payload}"),
        _ => format!("PHOTO;ENCODING=b;TYPE={image_type}:{payload}"),
    };

    record.set_lines(names::PHOTO, lines);
    true
}

fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%'
            && let Some(hex) = s.get(i + 1..i + 3)
            && let Ok(byte) = u8::from_str_radix(hex, 16)
        {
            out.push(byte);
            i += 3;
            continue;
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}
