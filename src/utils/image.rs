use std::fs;
use std::path::Path;
use base64::engine::general_purpose::{self, GeneralPurpose, GeneralPurposeConfig};
use base64::{alphabet, Engine as _};
use tracing::info;

use crate::error::{Result, UtilsError};

/// Standard alphabet and padding, but unused bits in the last symbol may be set.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Decodes a base64 image payload and writes the raw bytes to `file_name`.
///
/// ASCII whitespace in the payload is ignored so line-wrapped input decodes,
/// and so are stray low bits in the final symbol (`QR==` decodes to `A`).
pub fn decode_image(img_string: &str, file_name: impl AsRef<Path>) -> Result<()> {
    let path = file_name.as_ref();
    let compact: String = img_string.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = LENIENT
        .decode(compact.as_bytes())
        .map_err(|source| UtilsError::Base64 {
            path: path.to_path_buf(),
            source,
        })?;
    fs::write(path, &bytes).map_err(|e| UtilsError::io(path, e))?;

    info!("Image decoded and saved at: {}", path.display());
    Ok(())
}

/// Reads an image file and returns its standard, padded base64 encoding.
pub fn encode_image_into_base64(image_path: impl AsRef<Path>) -> Result<String> {
    let path = image_path.as_ref();
    let bytes = fs::read(path).map_err(|e| UtilsError::from_read(path, e))?;
    Ok(general_purpose::STANDARD.encode(bytes))
}
