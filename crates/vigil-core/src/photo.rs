//! Photo attachment encoding and validation.
//!
//! Photos travel inside the plan payload as `data:image/<type>;base64,<data>`
//! URLs. The whole list is written to the shared store on every mutation, so
//! the encoded size is bounded.

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::{Result, VigilError};

/// Maximum length in bytes of an encoded photo data URL.
pub const MAX_PHOTO_BYTES: usize = 1024 * 1024;

const DATA_URL_PREFIX: &str = "data:image/";
const BASE64_MARKER: &str = ";base64,";

/// Maps a file extension to the image MIME subtype it carries.
fn image_subtype(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("png"),
        "jpg" | "jpeg" => Some("jpeg"),
        "webp" => Some("webp"),
        "gif" => Some("gif"),
        _ => None,
    }
}

/// Encodes raw image bytes as a data URL and checks the size bound.
///
/// ```rust
/// use vigil_core::photo::encode_photo;
///
/// let url = encode_photo("png", b"\x89PNG").unwrap();
/// assert_eq!(url, "data:image/png;base64,iVBORw==");
/// ```
pub fn encode_photo(subtype: &str, bytes: &[u8]) -> Result<String> {
    if bytes.is_empty() {
        return Err(VigilError::invalid_input("photo").with_reason("Image file is empty"));
    }
    let url = format!("{DATA_URL_PREFIX}{subtype}{BASE64_MARKER}{}", STANDARD.encode(bytes));
    validate_photo(&url)?;
    Ok(url)
}

/// Reads an image file and encodes it as a data URL.
pub fn load_photo(path: &Path) -> Result<String> {
    let subtype = image_subtype(path).ok_or_else(|| {
        VigilError::invalid_input("photo").with_reason(format!(
            "Unsupported image type for '{}'; use png, jpg, webp or gif",
            path.display()
        ))
    })?;
    let bytes = std::fs::read(path).map_err(|e| VigilError::FileSystem {
        path: path.to_path_buf(),
        source: e,
    })?;
    encode_photo(subtype, &bytes)
}

/// Checks that a photo value is a well-formed, size-bounded image data URL.
pub fn validate_photo(value: &str) -> Result<()> {
    if value.len() > MAX_PHOTO_BYTES {
        return Err(VigilError::invalid_input("photo").with_reason(format!(
            "Encoded photo is {} bytes; the limit is {MAX_PHOTO_BYTES}",
            value.len()
        )));
    }

    let rest = value.strip_prefix(DATA_URL_PREFIX).ok_or_else(|| {
        VigilError::invalid_input("photo").with_reason("Photo must be an image data URL")
    })?;
    let (subtype, data) = rest.split_once(BASE64_MARKER).ok_or_else(|| {
        VigilError::invalid_input("photo").with_reason("Photo data URL must be base64 encoded")
    })?;
    if subtype.is_empty() {
        return Err(VigilError::invalid_input("photo").with_reason("Photo image type is missing"));
    }
    STANDARD.decode(data).map_err(|e| {
        VigilError::invalid_input("photo").with_reason(format!("Photo data is not valid base64: {e}"))
    })?;

    Ok(())
}
