//! Image payload helpers.
//!
//! Uploaded pictures are kept inline as `data:` URIs so the whole collection stays a
//! single self-contained JSON blob.

use crate::errors::{Error, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Largest image accepted for inline storage.
pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

/// Encodes raw image bytes as a `data:<mime>;base64,...` URI.
///
/// # Errors
/// Rejects empty payloads, payloads over [`MAX_IMAGE_BYTES`], and content types
/// that are not `image/*`.
pub fn encode_data_uri(content_type: Option<&str>, bytes: &[u8]) -> Result<String> {
    let mime = content_type
        .map(|value| value.split(';').next().unwrap_or(value).trim())
        .filter(|mime| mime.starts_with("image/"))
        .ok_or_else(|| Error::Validation {
            message: format!(
                "Unsupported image type: {}",
                content_type.unwrap_or("unknown")
            ),
        })?;

    if bytes.is_empty() {
        return Err(Error::Validation {
            message: "Image is empty".to_string(),
        });
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(Error::Validation {
            message: format!(
                "Image is {} bytes, the limit is {MAX_IMAGE_BYTES}",
                bytes.len()
            ),
        });
    }

    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

/// Splits a base64 `data:` URI back into its MIME type and bytes.
/// Returns `None` for anything that is not a well-formed base64 data URI.
#[must_use]
pub fn decode_data_uri(uri: &str) -> Option<(String, Vec<u8>)> {
    let rest = uri.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime = header.strip_suffix(";base64")?;
    let bytes = STANDARD.decode(payload).ok()?;
    Some((mime.to_string(), bytes))
}

/// File extension to use when re-uploading a decoded image.
#[must_use]
pub fn extension_for(mime: &str) -> &'static str {
    match mime {
        "image/jpeg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "png",
    }
}
