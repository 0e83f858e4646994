use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShipwrightError {
    #[error("Plugin name '{name}' does not normalize to a usable id")]
    InvalidPluginName { name: String },

    #[error("Built artifact not found for plugin '{project}': {path}")]
    ArtifactMissing { project: String, path: PathBuf },

    #[error("Failed to read artifact {path}: {source}")]
    ArtifactRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to copy artifact {src} to {dst}: {source}")]
    ArtifactCopy {
        src: PathBuf,
        dst: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed manifest {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },

    #[error("Invalid plugin descriptor {path}: {message}")]
    DescriptorParse { path: PathBuf, message: String },

    #[error("Config parse error in {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Release verification failed: {issues} artifact(s) do not match the manifest")]
    VerificationFailed { issues: usize },

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ShipwrightError>;

impl ShipwrightError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidPluginName { .. } => 2,
            Self::ArtifactMissing { .. } => 3,
            Self::ManifestParse { .. } => 4,
            Self::DescriptorParse { .. } => 5,
            Self::ConfigParse { .. } => 6,
            Self::VerificationFailed { .. } => 7,
            _ => 1,
        }
    }
}
