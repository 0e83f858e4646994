//! Plugin release manifest (plugins.json)
//!
//! The manifest is the persisted index of every publishable plugin and its
//! release history. It is serialized as a pretty-printed JSON array of
//! entries; field names and nesting are a stability contract with the host
//! application's plugin loader and must not change without a migration plan.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShipwrightError};

/// One published version of one plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRecord {
    /// Semantic-version-like release identifier, unique within its entry
    pub version: String,
    /// Compatibility constraint against the host application version
    pub requires: String,
    /// Publication date, `YYYY-MM-DD`
    pub date: String,
    /// Fully-qualified download location of the artifact
    pub url: String,
    /// Uppercase hex SHA-512 digest of the artifact bytes
    pub sha512sum: String,
}

/// One plugin's manifest entry, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Stable identifier derived from `name` at first publish
    pub id: String,
    /// Human-readable display name
    pub name: String,
    /// Description shown to users browsing the index
    pub description: String,
    /// Publishing organization
    pub provider: String,
    /// Support / project URL
    #[serde(rename = "projectUrl")]
    pub project_url: String,
    /// Release history in insertion order (not sorted by version)
    pub releases: Vec<ReleaseRecord>,
}

/// Descriptive fields used when a publish creates a brand-new entry.
///
/// When an entry for the id already exists its descriptive fields are left
/// untouched; only the release list is updated.
#[derive(Debug, Clone)]
pub struct EntrySeed {
    pub id: String,
    pub name: String,
    pub description: String,
    pub provider: String,
    pub project_url: String,
}

/// Outcome of merging one release into the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new entry was created for the id
    Created,
    /// The release was appended to an existing entry
    Appended,
    /// An existing release with the same version was replaced in place
    Replaced,
}

/// In-memory manifest: a set of entries with unique ids.
///
/// Entry order is preserved from the loaded file, with newly created entries
/// appended, so repeated runs produce stable diffs.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Load a manifest from disk.
    ///
    /// A missing file is not an error and yields an empty manifest; any other
    /// read or parse failure is fatal so a publish never runs against a
    /// silently truncated index.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let entries: Vec<ManifestEntry> =
            serde_json::from_str(&content).map_err(|e| ShipwrightError::ManifestParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(Self { entries })
    }

    /// Write the manifest as pretty-printed JSON, overwriting `path`.
    ///
    /// The content is fully serialized to a buffer before the write, so a
    /// serialization failure leaves the previous file intact.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json =
            serde_json::to_string_pretty(&self.entries).map_err(|e| ShipwrightError::ManifestParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        fs::write(path, json)?;
        Ok(())
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ManifestEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Merge one release into the manifest.
    ///
    /// If an entry exists for `seed.id` and already has a release with the
    /// same version, that record is replaced at its current index; a new
    /// version is appended. If no entry exists one is created from the seed
    /// with a single-release history.
    ///
    /// Known limitation: entries are never re-keyed. If a plugin's display
    /// name changes between publishes, the new name normalizes to a new id
    /// and a second entry appears instead of renaming the existing one.
    pub fn upsert_release(&mut self, seed: EntrySeed, record: ReleaseRecord) -> UpsertOutcome {
        match self.entries.iter_mut().find(|e| e.id == seed.id) {
            Some(entry) => {
                match entry.releases.iter().position(|r| r.version == record.version) {
                    Some(index) => {
                        entry.releases[index] = record;
                        UpsertOutcome::Replaced
                    }
                    None => {
                        entry.releases.push(record);
                        UpsertOutcome::Appended
                    }
                }
            }
            None => {
                self.entries.push(ManifestEntry {
                    id: seed.id,
                    name: seed.name,
                    description: seed.description,
                    provider: seed.provider,
                    project_url: seed.project_url,
                    releases: vec![record],
                });
                UpsertOutcome::Created
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seed(id: &str) -> EntrySeed {
        EntrySeed {
            id: id.to_string(),
            name: "Demo".to_string(),
            description: "A demo".to_string(),
            provider: "Acme".to_string(),
            project_url: "https://example.com/support".to_string(),
        }
    }

    fn record(version: &str, sha: &str) -> ReleaseRecord {
        ReleaseRecord {
            version: version.to_string(),
            requires: "^1.0.0".to_string(),
            date: "2026-08-24".to_string(),
            url: format!("https://example.com/demo-{}.jar", version),
            sha512sum: sha.to_string(),
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let manifest = Manifest::load(&temp.path().join("plugins.json")).unwrap();
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_load_malformed_is_fatal() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("plugins.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Manifest::load(&path).unwrap_err();
        assert!(matches!(err, ShipwrightError::ManifestParse { .. }));
    }

    #[test]
    fn test_upsert_creates_entry() {
        let mut manifest = Manifest::default();
        let outcome = manifest.upsert_release(seed("demo"), record("1.0.0", "AA"));

        assert_eq!(outcome, UpsertOutcome::Created);
        let entry = manifest.get("demo").unwrap();
        assert_eq!(entry.name, "Demo");
        assert_eq!(entry.releases.len(), 1);
    }

    #[test]
    fn test_upsert_appends_new_version() {
        let mut manifest = Manifest::default();
        manifest.upsert_release(seed("demo"), record("1.0.0", "AA"));
        let outcome = manifest.upsert_release(seed("demo"), record("1.0.1", "BB"));

        assert_eq!(outcome, UpsertOutcome::Appended);
        let versions: Vec<_> = manifest.get("demo").unwrap().releases.iter()
            .map(|r| r.version.as_str())
            .collect();
        assert_eq!(versions, vec!["1.0.0", "1.0.1"]);
    }

    #[test]
    fn test_upsert_replaces_same_version_in_place() {
        let mut manifest = Manifest::default();
        manifest.upsert_release(seed("demo"), record("1.0.0", "AA"));
        manifest.upsert_release(seed("demo"), record("1.0.1", "BB"));
        let outcome = manifest.upsert_release(seed("demo"), record("1.0.0", "CC"));

        assert_eq!(outcome, UpsertOutcome::Replaced);
        let releases = &manifest.get("demo").unwrap().releases;
        assert_eq!(releases.len(), 2);
        // Replaced record keeps its original position.
        assert_eq!(releases[0].version, "1.0.0");
        assert_eq!(releases[0].sha512sum, "CC");
        assert_eq!(releases[1].version, "1.0.1");
        assert_eq!(releases[1].sha512sum, "BB");
    }

    #[test]
    fn test_upsert_keeps_existing_descriptive_fields() {
        let mut manifest = Manifest::default();
        manifest.upsert_release(seed("demo"), record("1.0.0", "AA"));

        let mut renamed = seed("demo");
        renamed.description = "Something else".to_string();
        manifest.upsert_release(renamed, record("1.0.1", "BB"));

        assert_eq!(manifest.get("demo").unwrap().description, "A demo");
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("plugins.json");

        let mut manifest = Manifest::default();
        manifest.upsert_release(seed("demo"), record("1.0.0", "AA"));
        manifest.save(&path).unwrap();

        let reloaded = Manifest::load(&path).unwrap();
        assert_eq!(reloaded.entries(), manifest.entries());
    }

    #[test]
    fn test_serialized_field_names_are_stable() {
        let mut manifest = Manifest::default();
        manifest.upsert_release(seed("demo"), record("1.0.0", "AA"));

        let json = serde_json::to_value(manifest.entries()).unwrap();
        let entry = &json[0];
        for field in ["id", "name", "description", "provider", "projectUrl", "releases"] {
            assert!(entry.get(field).is_some(), "missing field {}", field);
        }
        let release = &entry["releases"][0];
        for field in ["version", "requires", "date", "url", "sha512sum"] {
            assert!(release.get(field).is_some(), "missing field {}", field);
        }
    }
}
