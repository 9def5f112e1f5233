use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use bincode::Options;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::error::{Result, UtilsError};

/// Fixed-width integers, little endian, and no trailing bytes allowed on read.
fn bincode_options() -> impl Options {
    bincode::DefaultOptions::new().with_fixint_encoding()
}

/// Serializes an artifact (model weights, metrics, arrays) to `path`.
pub fn save_bin<T: Serialize + ?Sized>(data: &T, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| UtilsError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    bincode_options()
        .serialize_into(&mut writer, data)
        .map_err(|source| UtilsError::Bincode {
            path: path.to_path_buf(),
            source,
        })?;
    writer.flush().map_err(|e| UtilsError::io(path, e))?;

    info!("Binary file saved at: {}", path.display());
    Ok(())
}

/// Loads an artifact written by [`save_bin`].
///
/// The target type must match the one that was saved; leftover bytes after
/// the value are treated as corruption.
pub fn load_bin<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| UtilsError::io(path, e))?;
    let data = bincode_options()
        .deserialize(&bytes)
        .map_err(|source| UtilsError::Bincode {
            path: path.to_path_buf(),
            source,
        })?;

    info!("Binary file loaded from: {}", path.display());
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde::Deserialize;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Dense {
        weights: Vec<Vec<f32>>,
        bias: Vec<f32>,
        activation: String,
    }

    #[test]
    fn test_bin_roundtrip_struct() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.bin");
        let layer = Dense {
            weights: vec![vec![0.1, -0.2], vec![1.5, 3.25]],
            bias: vec![0.0, 0.5],
            activation: "relu".to_string(),
        };

        save_bin(&layer, &path).unwrap();
        let loaded: Dense = load_bin(&path).unwrap();
        assert_eq!(loaded, layer);
    }

    #[test]
    fn test_bin_roundtrip_metric_map() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("metrics.bin");
        let mut metrics = BTreeMap::new();
        metrics.insert("accuracy".to_string(), vec![0.61, 0.74, 0.88]);
        metrics.insert("loss".to_string(), vec![1.2, 0.8, 0.4]);

        save_bin(&metrics, &path).unwrap();
        let loaded: BTreeMap<String, Vec<f64>> = load_bin(&path).unwrap();
        assert_eq!(loaded, metrics);
    }

    #[test]
    fn test_load_bin_truncated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.bin");
        save_bin(&vec![1u64, 2, 3, 4], &path).unwrap();

        let bytes = fs::read(&path).unwrap();
        fs::write(&path, &bytes[..bytes.len() - 3]).unwrap();

        let err = load_bin::<Vec<u64>>(&path).unwrap_err();
        assert!(matches!(err, UtilsError::Bincode { .. }));
        assert_eq!(err.kind(), ErrorKind::Value);
    }

    #[test]
    fn test_load_bin_trailing_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pair.bin");
        save_bin(&(7u32, 9u32), &path).unwrap();

        let err = load_bin::<u32>(&path).unwrap_err();
        assert!(matches!(err, UtilsError::Bincode { .. }));
    }

    #[test]
    fn test_load_bin_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_bin::<Vec<f32>>(dir.path().join("absent.bin")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
        assert!(err.is_not_found());
    }
}
