pub mod config;
pub mod digest;
pub mod error;
pub mod id;
pub mod manifest;
pub mod sync;
pub mod workspace;

pub use config::{Config, PublishConfig, RegistryAuth, RegistryToken};
pub use digest::{sha512_file, sha512_hex};
pub use error::{Result, ShipwrightError};
pub use id::normalize_id;
pub use manifest::{EntrySeed, Manifest, ManifestEntry, ReleaseRecord, UpsertOutcome};
pub use sync::{
    verify_release_dir, PublishedRelease, SyncOptions, SyncReport, Synchronizer, VerifyIssue,
    VerifyReport,
};
pub use workspace::{enumerate_units, BuildUnit, DESCRIPTOR_FILE};
