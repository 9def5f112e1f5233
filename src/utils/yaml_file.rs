use std::fs;
use std::path::Path;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::error::{value_type_name, Result, UtilsError};
use crate::models::ConfigBox;

/// Reads a YAML file into a [`ConfigBox`].
///
/// A null document, an empty file or an empty top-level mapping is rejected
/// with [`UtilsError::EmptyContent`] rather than returned as an empty box.
pub fn read_yaml(path: impl AsRef<Path>) -> Result<ConfigBox> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| UtilsError::from_read(path, e))?;
    if !has_content(&content) {
        return Err(UtilsError::EmptyContent { path: path.to_path_buf() });
    }

    let yaml_err = |source| UtilsError::Yaml {
        path: path.to_path_buf(),
        source,
    };

    let mut document: serde_yaml::Value = serde_yaml::from_str(&content).map_err(yaml_err)?;
    // `<<: *anchor` keys are folded into their mapping
    document.apply_merge().map_err(yaml_err)?;
    if is_empty_document(&document) {
        return Err(UtilsError::EmptyContent { path: path.to_path_buf() });
    }
    if let Some(key) = non_finite_key(&document) {
        return Err(UtilsError::NonFinite {
            path: path.to_path_buf(),
            key,
        });
    }

    // Non-string keys and tagged values fail here
    let value: serde_json::Value = serde_yaml::from_value(document).map_err(yaml_err)?;
    let config = ConfigBox::try_from(value).map_err(|other| UtilsError::NotAMapping {
        path: path.to_path_buf(),
        found: value_type_name(&other),
    })?;

    info!("YAML file: {} loaded successfully", path.display());
    Ok(config)
}

/// Reads a YAML file straight into a typed config struct.
pub fn read_yaml_as<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    read_yaml(path)?
        .to_typed()
        .map_err(|source| UtilsError::Deserialize {
            path: path.to_path_buf(),
            source,
        })
}

/// False for streams made only of blank lines, comments and document markers.
fn has_content(content: &str) -> bool {
    content.lines().map(str::trim).any(|line| {
        !(line.is_empty() || line.starts_with('#') || line == "---" || line == "...")
    })
}

/// Dotted key of the first NaN or infinite number, `"."` for the root itself.
///
/// JSON has no representation for these, so they would otherwise turn into
/// `null` on the way into a [`ConfigBox`].
pub(crate) fn non_finite_key(value: &serde_yaml::Value) -> Option<String> {
    non_finite_suffix(value).map(|key| if key.is_empty() { ".".to_string() } else { key })
}

fn non_finite_suffix(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Number(n) if n.is_nan() || n.is_infinite() => Some(String::new()),
        serde_yaml::Value::Sequence(items) => items.iter().enumerate().find_map(|(i, item)| {
            non_finite_suffix(item).map(|rest| join_key(&i.to_string(), rest))
        }),
        serde_yaml::Value::Mapping(map) => map.iter().find_map(|(key, item)| {
            let key = match key.as_str() {
                Some(key) => key.to_string(),
                None => serde_yaml::to_string(key).unwrap_or_default().trim().to_string(),
            };
            non_finite_suffix(item).map(|rest| join_key(&key, rest))
        }),
        serde_yaml::Value::Tagged(tagged) => non_finite_suffix(&tagged.value),
        _ => None,
    }
}

fn join_key(head: &str, rest: String) -> String {
    if rest.is_empty() {
        head.to_string()
    } else {
        format!("{}.{}", head, rest)
    }
}

fn is_empty_document(document: &serde_yaml::Value) -> bool {
    match document {
        serde_yaml::Value::Null => true,
        serde_yaml::Value::Mapping(map) => map.is_empty(),
        _ => false,
    }
}
