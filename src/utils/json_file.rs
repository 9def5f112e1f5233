use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use serde::ser::Error as _;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::info;

use crate::error::{value_type_name, Result, UtilsError};
use crate::models::ConfigBox;
use crate::utils::yaml_file::non_finite_key;

const INDENT: &[u8] = b"    ";

/// Writes `data` as a JSON object indented by four spaces, replacing any
/// existing file.
///
/// NaN and infinite floats are rejected with [`UtilsError::NonFinite`]; JSON
/// cannot hold them and `serde_json` would write `null` in their place.
pub fn save_json<T: Serialize + ?Sized>(path: impl AsRef<Path>, data: &T) -> Result<()> {
    let path = path.as_ref();
    let json_err = |source| UtilsError::Json {
        path: path.to_path_buf(),
        source,
    };

    let value = serde_json::to_value(data).map_err(json_err)?;
    if !value.is_object() {
        return Err(UtilsError::NotAMapping {
            path: path.to_path_buf(),
            found: value_type_name(&value),
        });
    }
    // serde_yaml keeps floats as they are, unlike serde_json::Value
    let shadow = serde_yaml::to_value(data)
        .map_err(|e| json_err(serde_json::Error::custom(e.to_string())))?;
    if let Some(key) = non_finite_key(&shadow) {
        return Err(UtilsError::NonFinite {
            path: path.to_path_buf(),
            key,
        });
    }

    let file = File::create(path).map_err(|e| UtilsError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    value.serialize(&mut serializer).map_err(json_err)?;
    writer.flush().map_err(|e| UtilsError::io(path, e))?;

    info!("JSON file saved at: {}", path.display());
    Ok(())
}

/// Loads a JSON object from `path`.
///
/// A missing file is reported as [`UtilsError::Io`], which still answers
/// `true` to [`UtilsError::is_not_found`].
pub fn load_json(path: impl AsRef<Path>) -> Result<ConfigBox> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| UtilsError::io(path, e))?;
    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|source| UtilsError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    let config = ConfigBox::try_from(value).map_err(|other| UtilsError::NotAMapping {
        path: path.to_path_buf(),
        found: value_type_name(&other),
    })?;

    info!("JSON file loaded successfully from: {}", path.display());
    Ok(config)
}
