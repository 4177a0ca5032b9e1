use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use depstrap_schema::Checksum;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// SHA-256 of `bytes`, base64 encoded with padding.
pub fn checksum_bytes(bytes: &[u8]) -> Checksum {
    let digest = Sha256::digest(bytes);
    Checksum::new(BASE64.encode(digest.as_slice()))
}

/// Checksum of a file's complete content.
///
/// The whole file is read into memory before hashing, so a short read can
/// never produce a digest.
pub fn checksum_file(path: &Path) -> std::io::Result<Checksum> {
    let bytes = fs::read(path)?;
    Ok(checksum_bytes(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vectors() {
        assert_eq!(
            checksum_bytes(b"abc"),
            "ungWv48Bz+pBQUDeXa4iI7ADYaOWF3qctBD/YfIAFa0="
        );
        assert_eq!(
            checksum_bytes(b""),
            "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU="
        );
    }

    #[test]
    fn digest_is_stable() {
        let data = b"hello depstrap";
        assert_eq!(checksum_bytes(data), checksum_bytes(data));
        assert_eq!(
            checksum_bytes(data),
            "7CvQITClQoBFpFRATy0YbSzpb0SLPYKDGXQ51ImA8Iw="
        );
    }

    #[test]
    fn flipping_one_byte_changes_digest() {
        let original = b"hello depstrap".to_vec();
        let mut flipped = original.clone();
        flipped[5] ^= 0x01;
        assert_ne!(checksum_bytes(&original), checksum_bytes(&flipped));
    }

    #[test]
    fn encoded_digest_is_256_bits() {
        // 32 bytes -> 44 base64 characters including one pad.
        let c = checksum_bytes(b"anything");
        assert_eq!(c.len(), 44);
        assert!(c.ends_with('='));
    }

    #[test]
    fn file_checksum_matches_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("core.jar");
        fs::write(&path, b"core-jar-bytes").unwrap();
        let c = checksum_file(&path).unwrap();
        assert_eq!(c, checksum_bytes(b"core-jar-bytes"));
        assert_eq!(c, "hystn5K5iUKEgxDiTueIOLuegK1pSibU8pF4lJkG7ow=");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = checksum_file(&dir.path().join("absent.jar")).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
