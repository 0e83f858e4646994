use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShipwrightError};
use crate::sync::SyncOptions;

const CONFIG_FILE: &str = "shipwright.toml";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# shipwright configuration file
# Location: <workspace root>/shipwright.toml

[publish]
# Organization shown as the provider of every published plugin
provider = "Acme Plugins"

# Support / project URL recorded in new manifest entries
project_url = "https://example.com/support"

# Base URL under which the release directory is served.
# Release URLs are "{download_base_url}/{project}-{version}.{ext}".
download_base_url = "https://raw.githubusercontent.com/OWNER/REPO/master/release"

# Host application compatibility constraint stamped on every release
requires = "^1.0.0"

# Extension of packaged plugin artifacts
artifact_ext = "jar"

[registry]
# Environment variable holding the token for the private package registry
# used during dependency resolution. The value itself never appears in this
# file or in the manifest.
token_env = "PACKAGES_TOKEN"
"#;

/// Workspace configuration, loaded from `shipwright.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub publish: PublishConfig,
    #[serde(default)]
    pub registry: RegistryAuth,
}

/// Publishing settings stamped into manifest entries and release records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishConfig {
    /// Provider name recorded in new manifest entries
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Support URL recorded in new manifest entries
    #[serde(default = "default_project_url")]
    pub project_url: String,

    /// Base URL for release download links
    #[serde(default = "default_base_url")]
    pub download_base_url: String,

    /// Host compatibility constraint for every release
    #[serde(default = "default_requires")]
    pub requires: String,

    /// Packaged artifact extension
    #[serde(default = "default_artifact_ext")]
    pub artifact_ext: String,
}

fn default_provider() -> String {
    "Acme Plugins".to_string()
}

fn default_project_url() -> String {
    "https://example.com/support".to_string()
}

fn default_base_url() -> String {
    "https://raw.githubusercontent.com/OWNER/REPO/master/release".to_string()
}

fn default_requires() -> String {
    "^1.0.0".to_string()
}

fn default_artifact_ext() -> String {
    "jar".to_string()
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            project_url: default_project_url(),
            download_base_url: default_base_url(),
            requires: default_requires(),
            artifact_ext: default_artifact_ext(),
        }
    }
}

/// Credential pass-through for the private package registry used by the
/// dependency-fetch step. Only the env var name is configuration; the token
/// is read from the environment at call time and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryAuth {
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

fn default_token_env() -> String {
    "PACKAGES_TOKEN".to_string()
}

impl Default for RegistryAuth {
    fn default() -> Self {
        Self {
            token_env: default_token_env(),
        }
    }
}

impl RegistryAuth {
    /// Read the registry token from the environment, if set.
    pub fn token(&self) -> Option<RegistryToken> {
        std::env::var(&self.token_env).ok().map(RegistryToken)
    }
}

/// Opaque registry credential. Redacted in all formatted output.
#[derive(Clone)]
pub struct RegistryToken(String);

impl RegistryToken {
    /// Access the raw token for the transport that needs it.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RegistryToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RegistryToken(<redacted>)")
    }
}

impl fmt::Display for RegistryToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl Config {
    /// Load config from the workspace root. Missing file yields defaults.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content).map_err(|e| ShipwrightError::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        Ok(config)
    }

    /// Save config to the workspace root.
    pub fn save(&self, root: &Path) -> Result<()> {
        let path = root.join(CONFIG_FILE);
        fs::create_dir_all(root)?;
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn path(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE)
    }

    /// Initialize config with the default template (rich comments).
    pub fn init(root: &Path) -> Result<PathBuf> {
        let path = root.join(CONFIG_FILE);
        fs::create_dir_all(root)?;

        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        Ok(path)
    }

    /// Build synchronizer options for the given manifest path and release
    /// directory.
    pub fn to_sync_options(&self, manifest_path: PathBuf, release_dir: PathBuf) -> SyncOptions {
        SyncOptions {
            manifest_path,
            release_dir,
            download_base_url: self.publish.download_base_url.clone(),
            requires: self.publish.requires.clone(),
            provider: self.publish.provider.clone(),
            project_url: self.publish.project_url.clone(),
        }
    }
}
