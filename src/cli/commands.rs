use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};

use crate::utils::{
    create_directories, decode_image, encode_image_into_base64, get_size, load_json, read_yaml,
    save_json,
};

/// Prints a YAML config, or a single dotted key of it, as pretty JSON.
pub fn read_yaml_command(path: &Path, key: Option<&str>, out: &mut impl Write) -> Result<()> {
    let config = read_yaml(path)?;
    let rendered = match key {
        Some(key) => {
            let value = config
                .get_path(key)
                .with_context(|| format!("Key '{}' not found in {}", key, path.display()))?;
            serde_json::to_string_pretty(value)?
        }
        None => serde_json::to_string_pretty(&config)?,
    };
    writeln!(out, "{}", rendered)?;
    Ok(())
}

pub fn create_dirs_command(paths: &[PathBuf], quiet: bool) -> Result<()> {
    create_directories(paths, !quiet)?;
    Ok(())
}

/// Validates `raw` as a JSON object and saves it to `path`.
pub fn save_json_command(path: &Path, raw: &str) -> Result<()> {
    let value: serde_json::Value =
        serde_json::from_str(raw).context("Argument is not valid JSON")?;
    save_json(path, &value)?;
    Ok(())
}

pub fn load_json_command(path: &Path, out: &mut impl Write) -> Result<()> {
    let config = load_json(path)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&config)?)?;
    Ok(())
}

pub fn size_command(path: &Path, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", get_size(path)?)?;
    Ok(())
}

pub fn encode_image_command(path: &Path, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", encode_image_into_base64(path)?)?;
    Ok(())
}

/// Reads a base64 payload from `input` and writes the decoded image to `output`.
pub fn decode_image_command(output: &Path, input: &mut impl Read) -> Result<()> {
    let mut payload = String::new();
    input
        .read_to_string(&mut payload)
        .context("Failed to read base64 payload")?;
    decode_image(&payload, output)?;
    Ok(())
}
