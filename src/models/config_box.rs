use std::ops::Index;
use serde::{Serialize, Deserialize};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

static NULL: Value = Value::Null;

/// Parsed YAML or JSON document with ordered keys.
///
/// Nested values are reached by key (`config["artifacts_root"]`), by dotted
/// path (`config.get_path("data_ingestion.root_dir")`), or by deserializing
/// the whole mapping into a typed struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigBox(Map<String, Value>);

impl ConfigBox {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Walks nested mappings along a `.`-separated path.
    ///
    /// Numeric segments index into sequences, so `"layers.0.units"` works.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.0.get(segments.next()?)?;
        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Returns a nested mapping as its own box.
    pub fn child(&self, key: &str) -> Option<ConfigBox> {
        match self.0.get(key)? {
            Value::Object(map) => Some(ConfigBox(map.clone())),
            _ => None,
        }
    }

    /// Converts the mapping into a caller-defined config struct.
    pub fn to_typed<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(Value::Object(self.0.clone()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Index<&str> for ConfigBox {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.0.get(key).unwrap_or(&NULL)
    }
}

impl From<Map<String, Value>> for ConfigBox {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for ConfigBox {
    type Error = Value;

    /// Hands the value back unchanged when it is not an object.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

impl From<ConfigBox> for Value {
    fn from(config: ConfigBox) -> Self {
        Value::Object(config.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ConfigBox {
        ConfigBox::try_from(json!({
            "artifacts_root": "artifacts",
            "data_ingestion": {
                "root_dir": "artifacts/data_ingestion",
                "source_url": "https://example.com/data.zip"
            },
            "layers": [{"units": 64}, {"units": 10}]
        }))
        .unwrap()
    }

    #[test]
    fn test_key_access() {
        let config = sample();
        assert_eq!(config["artifacts_root"], "artifacts");
        assert_eq!(config.get("artifacts_root"), Some(&json!("artifacts")));
        assert!(config["missing"].is_null());
        assert!(config.get("missing").is_none());
    }

    #[test]
    fn test_get_path() {
        let config = sample();
        assert_eq!(
            config.get_path("data_ingestion.root_dir"),
            Some(&json!("artifacts/data_ingestion"))
        );
        assert_eq!(config.get_path("layers.1.units"), Some(&json!(10)));
        assert_eq!(config.get_path("layers.7.units"), None);
        assert_eq!(config.get_path("artifacts_root.nested"), None);
        assert_eq!(config.get_path(""), None);
    }

    #[test]
    fn test_child_box() {
        let config = sample();
        let ingestion = config.child("data_ingestion").unwrap();
        assert_eq!(ingestion["source_url"], "https://example.com/data.zip");
        assert!(config.child("artifacts_root").is_none());
    }

    #[test]
    fn test_keys_keep_insertion_order() {
        let config = sample();
        let keys: Vec<_> = config.keys().collect();
        assert_eq!(keys, vec!["artifacts_root", "data_ingestion", "layers"]);
    }

    #[test]
    fn test_to_typed_struct() {
        #[derive(Debug, Deserialize)]
        struct Ingestion {
            root_dir: String,
            source_url: String,
        }

        let ingestion: Ingestion = sample().child("data_ingestion").unwrap().to_typed().unwrap();
        assert_eq!(ingestion.root_dir, "artifacts/data_ingestion");
        assert!(ingestion.source_url.ends_with("data.zip"));
    }

    #[test]
    fn test_try_from_rejects_non_object() {
        let err = ConfigBox::try_from(json!([1, 2, 3])).unwrap_err();
        assert_eq!(err, json!([1, 2, 3]));
    }
}
