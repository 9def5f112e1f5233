use std::collections::HashMap;
use std::fs;
use anyhow::Result;
use cnn_classifier::{
    create_directories, decode_image, encode_image_into_base64, get_size, load_bin, save_bin,
    ErrorKind,
};
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct TrainedModel {
    name: String,
    input_shape: [u32; 3],
    layers: Vec<Layer>,
    class_indices: HashMap<String, u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Layer {
    kind: LayerKind,
    weights: Vec<Vec<f32>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum LayerKind {
    Conv { filters: u16, kernel: (u8, u8) },
    Dense { units: u32 },
    Dropout(f32),
}

fn sample_model() -> TrainedModel {
    TrainedModel {
        name: "vgg16-finetuned".to_string(),
        input_shape: [224, 224, 3],
        layers: vec![
            Layer {
                kind: LayerKind::Conv { filters: 64, kernel: (3, 3) },
                weights: vec![vec![0.01, -0.02, 0.03]; 3],
            },
            Layer {
                kind: LayerKind::Dropout(0.5),
                weights: Vec::new(),
            },
            Layer {
                kind: LayerKind::Dense { units: 2 },
                weights: vec![vec![1.0, -1.0]],
            },
        ],
        class_indices: HashMap::from([("Normal".to_string(), 0), ("Tumor".to_string(), 1)]),
    }
}

#[test]
fn test_artifact_layout_and_roundtrip() -> Result<()> {
    let root = TempDir::new()?;
    let model_dir = root.path().join("artifacts/training");
    create_directories(&[&model_dir, &root.path().join("artifacts/evaluation")], true)?;
    create_directories(&[&model_dir], true)?;

    let model_path = model_dir.join("model.bin");
    let model = sample_model();
    save_bin(&model, &model_path)?;

    let loaded: TrainedModel = load_bin(&model_path)?;
    assert_eq!(loaded, model);
    assert_eq!(get_size(&model_path)?, "~ 0 KB");
    Ok(())
}

#[test]
fn test_large_numeric_array_size() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("embeddings.bin");
    // 8-byte length prefix + 1024 * 4 bytes
    let embeddings = vec![0.5f32; 1024];
    save_bin(&embeddings, &path)?;

    assert_eq!(fs::metadata(&path)?.len(), 8 + 4096);
    assert_eq!(get_size(&path)?, "~ 4 KB");
    assert_eq!(load_bin::<Vec<f32>>(&path)?, embeddings);
    Ok(())
}

#[test]
fn test_image_payload_roundtrip() -> Result<()> {
    let dir = TempDir::new()?;
    let original: Vec<u8> = (0..=255u8).cycle().take(5000).collect();
    let source = dir.path().join("scan.jpg");
    fs::write(&source, &original)?;

    let payload = encode_image_into_base64(&source)?;
    let restored = dir.path().join("inputImage.jpg");
    decode_image(&payload, &restored)?;

    assert_eq!(fs::read(&restored)?, original);
    assert_eq!(encode_image_into_base64(&restored)?, payload);
    Ok(())
}

#[test]
fn test_missing_inputs_fail_not_found() -> Result<()> {
    let dir = TempDir::new()?;
    let missing = dir.path().join("missing");

    let err = get_size(&missing).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = encode_image_into_base64(&missing).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = load_bin::<Vec<u8>>(&missing).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.path(), missing.as_path());
    Ok(())
}
