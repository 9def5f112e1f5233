use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, UtilsError>;

/// Coarse classification of a failure, mirroring what callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The resource the operation requires is absent
    NotFound,
    /// Malformed content, serialization failure or a wrapped I/O error
    Value,
    /// The operating system refused a directory operation
    Os,
}

/// Errors raised by the file helpers
#[derive(Debug, Error)]
pub enum UtilsError {
    #[error("file not found: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("non-finite number at `{key}` in {}", path.display())]
    NonFinite { path: PathBuf, key: String },

    #[error("YAML file at {} is empty", path.display())]
    EmptyContent { path: PathBuf },

    #[error("expected a mapping at the top level of {}, found {found}", path.display())]
    NotAMapping { path: PathBuf, found: &'static str },

    #[error("error parsing YAML file {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("error handling JSON file at {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config at {} does not match the requested type: {source}", path.display())]
    Deserialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("error handling binary file at {}: {source}", path.display())]
    Bincode {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },

    #[error("error decoding image for {}: {source}", path.display())]
    Base64 {
        path: PathBuf,
        #[source]
        source: base64::DecodeError,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error creating directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl UtilsError {
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        UtilsError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Maps a missing file to `NotFound` and everything else to `Io`.
    pub fn from_read(path: impl AsRef<Path>, source: io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        if source.kind() == io::ErrorKind::NotFound {
            UtilsError::NotFound { path, source }
        } else {
            UtilsError::Io { path, source }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            UtilsError::NotFound { .. } => ErrorKind::NotFound,
            UtilsError::CreateDir { .. } => ErrorKind::Os,
            _ => ErrorKind::Value,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            UtilsError::NotFound { path, .. }
            | UtilsError::NonFinite { path, .. }
            | UtilsError::EmptyContent { path }
            | UtilsError::NotAMapping { path, .. }
            | UtilsError::Yaml { path, .. }
            | UtilsError::Json { path, .. }
            | UtilsError::Deserialize { path, .. }
            | UtilsError::Bincode { path, .. }
            | UtilsError::Base64 { path, .. }
            | UtilsError::Io { path, .. }
            | UtilsError::CreateDir { path, .. } => path.as_path(),
        }
    }

    /// True when the failure comes down to a missing file, whatever the
    /// variant the operation reports it under.
    pub fn is_not_found(&self) -> bool {
        match self {
            UtilsError::NotFound { .. } => true,
            UtilsError::Io { source, .. } | UtilsError::CreateDir { source, .. } => {
                source.kind() == io::ErrorKind::NotFound
            }
            UtilsError::Bincode { source, .. } => matches!(
                &**source,
                bincode::ErrorKind::Io(e) if e.kind() == io::ErrorKind::NotFound
            ),
            _ => false,
        }
    }
}

/// Short name of a JSON value's type, for error messages.
pub(crate) fn value_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a sequence",
        serde_json::Value::Object(_) => "a mapping",
    }
}
