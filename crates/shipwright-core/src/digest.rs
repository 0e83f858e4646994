use std::fs;
use std::path::Path;

use sha2::{Digest, Sha512};

use crate::error::{Result, ShipwrightError};

/// SHA-512 digest of a byte slice, uppercase hex.
///
/// Consumers of the manifest verify artifacts against this value before
/// loading them, so the encoding (uppercase) is part of the format contract.
pub fn sha512_hex(content: &[u8]) -> String {
    let mut hasher = Sha512::new();
    hasher.update(content);
    hex::encode_upper(hasher.finalize())
}

/// SHA-512 digest of a file's full contents, uppercase hex.
pub fn sha512_file(path: &Path) -> Result<String> {
    let content = fs::read(path).map_err(|source| ShipwrightError::ArtifactRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(sha512_hex(&content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // SHA-512("hello"), independently computed.
    const HELLO_SHA512: &str = "9B71D224BD62F3785D96D46AD3EA3D73319BFBC2890CAADAE2DFF72519673CA72323C3D99BA5C11D7C7ACC6E14B8C5DA0C4663475C2E5C3ADEF46F73BCDEC043";

    #[test]
    fn test_sha512_hex_known_vector() {
        assert_eq!(sha512_hex(b"hello"), HELLO_SHA512);
    }

    #[test]
    fn test_sha512_hex_is_uppercase() {
        let digest = sha512_hex(b"anything");
        assert!(!digest.chars().any(|c| c.is_ascii_lowercase()));
        assert_eq!(digest.len(), 128);
    }

    #[test]
    fn test_sha512_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("artifact.jar");
        fs::write(&path, b"hello").unwrap();

        assert_eq!(sha512_file(&path).unwrap(), HELLO_SHA512);
    }

    #[test]
    fn test_sha512_file_missing_is_error() {
        let temp = TempDir::new().unwrap();
        let err = sha512_file(&temp.path().join("nope.jar")).unwrap_err();
        assert!(err.to_string().contains("nope.jar"));
    }
}
