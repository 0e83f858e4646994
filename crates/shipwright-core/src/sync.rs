//! Manifest synchronization
//!
//! Turns the current set of built plugin artifacts into an updated manifest
//! file and a populated release directory. This is a run-once batch step:
//! candidates are processed sequentially, every failure is fatal for the
//! whole run, and the manifest file is only rewritten after every candidate
//! has been merged in memory.

use std::fs;
use std::path::PathBuf;

use crate::digest;
use crate::error::{Result, ShipwrightError};
use crate::id::normalize_id;
use crate::manifest::{EntrySeed, Manifest, ReleaseRecord, UpsertOutcome};
use crate::workspace::BuildUnit;

/// Explicit synchronizer configuration. Everything the original build kept
/// as ambient project properties is passed in here.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Path of the persisted manifest file (may not exist yet)
    pub manifest_path: PathBuf,
    /// Directory receiving artifact copies, created if absent
    pub release_dir: PathBuf,
    /// Base URL under which the release directory is served
    pub download_base_url: String,
    /// Host compatibility constraint stamped on every release
    pub requires: String,
    /// Provider recorded in newly created manifest entries
    pub provider: String,
    /// Support URL recorded in newly created manifest entries
    pub project_url: String,
}

/// One release published by a synchronize run.
#[derive(Debug, Clone)]
pub struct PublishedRelease {
    pub id: String,
    pub project: String,
    pub version: String,
    pub outcome: UpsertOutcome,
}

/// Summary of a synchronize run.
#[derive(Debug)]
pub struct SyncReport {
    /// Releases merged into the manifest, in processing order
    pub published: Vec<PublishedRelease>,
    /// Candidates skipped for missing name/description
    pub skipped: usize,
    /// Total entries in the written manifest
    pub entries: usize,
}

pub struct Synchronizer {
    options: SyncOptions,
}

impl Synchronizer {
    pub fn new(options: SyncOptions) -> Self {
        Self { options }
    }

    /// Synchronize the manifest and release directory with `candidates`.
    ///
    /// Candidates without both a display name and a description are skipped
    /// silently; a qualifying candidate whose artifact is missing or
    /// unreadable aborts the whole run before the manifest file is touched.
    /// The updated manifest is serialized in full and written once at the
    /// end, so a failed run leaves the previous manifest intact (artifact
    /// copies that already happened are re-done by the next run).
    pub fn synchronize(&self, candidates: &[BuildUnit]) -> Result<SyncReport> {
        let mut manifest = Manifest::load(&self.options.manifest_path)?;

        fs::create_dir_all(&self.options.release_dir)?;

        let mut published = Vec::new();
        let mut skipped = 0;

        for unit in candidates {
            if !unit.is_publishable() {
                skipped += 1;
                continue;
            }

            // is_publishable guarantees both fields are present and non-empty
            let name = unit.display_name.as_deref().unwrap_or_default();
            let description = unit.description.as_deref().unwrap_or_default();

            if !unit.artifact.is_file() {
                return Err(ShipwrightError::ArtifactMissing {
                    project: unit.project.clone(),
                    path: unit.artifact.clone(),
                });
            }

            // Always recomputed from the current bytes, never reused from a
            // previous manifest.
            let sha512sum = digest::sha512_file(&unit.artifact)?;

            let file_name = unit.artifact_file_name();
            let record = ReleaseRecord {
                version: unit.version.clone(),
                requires: self.options.requires.clone(),
                date: release_date(),
                url: format!(
                    "{}/{}",
                    self.options.download_base_url.trim_end_matches('/'),
                    file_name
                ),
                sha512sum,
            };

            let id = normalize_id(name)?;
            let outcome = manifest.upsert_release(
                EntrySeed {
                    id: id.clone(),
                    name: name.to_string(),
                    description: description.to_string(),
                    provider: self.options.provider.clone(),
                    project_url: self.options.project_url.clone(),
                },
                record,
            );

            let dst = self.options.release_dir.join(&file_name);
            fs::copy(&unit.artifact, &dst).map_err(|source| ShipwrightError::ArtifactCopy {
                src: unit.artifact.clone(),
                dst: dst.clone(),
                source,
            })?;

            published.push(PublishedRelease {
                id,
                project: unit.project.clone(),
                version: unit.version.clone(),
                outcome,
            });
        }

        manifest.save(&self.options.manifest_path)?;

        Ok(SyncReport {
            published,
            skipped,
            entries: manifest.len(),
        })
    }
}

/// Verification issue found by [`verify_release_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyIssue {
    /// A release record points at a file absent from the release directory
    MissingArtifact { file: String },
    /// The artifact's current digest differs from the recorded one
    DigestMismatch { file: String },
}

/// Result of checking the release directory against the manifest.
#[derive(Debug)]
pub struct VerifyReport {
    /// Release records checked
    pub checked: usize,
    pub issues: Vec<VerifyIssue>,
}

impl VerifyReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Recompute the digest of every released artifact and compare it with the
/// manifest, the same check the host loader performs before loading a
/// plugin.
pub fn verify_release_dir(
    manifest_path: &std::path::Path,
    release_dir: &std::path::Path,
) -> Result<VerifyReport> {
    let manifest = Manifest::load(manifest_path)?;

    let mut checked = 0;
    let mut issues = Vec::new();

    for entry in manifest.entries() {
        for release in &entry.releases {
            checked += 1;
            let file = release
                .url
                .rsplit('/')
                .next()
                .unwrap_or(release.url.as_str())
                .to_string();
            let path = release_dir.join(&file);

            if !path.is_file() {
                issues.push(VerifyIssue::MissingArtifact { file });
                continue;
            }

            if digest::sha512_file(&path)? != release.sha512sum {
                issues.push(VerifyIssue::DigestMismatch { file });
            }
        }
    }

    Ok(VerifyReport { checked, issues })
}

/// Publication date at day granularity.
fn release_date() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
