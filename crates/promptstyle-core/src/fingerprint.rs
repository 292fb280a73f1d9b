use anyhow::Context;
use sha2::{Digest, Sha256};
use std::path::Path;

pub fn sha256_hex(s: &str) -> String {
    sha256_bytes_hex(s.as_bytes())
}

pub fn sha256_bytes_hex(bytes: &[u8]) -> String {
    let mut h = Sha256::new();
    h.update(bytes);
    hex::encode(h.finalize())
}

/// Content hash of a file, prefixed with the algorithm (`sha256:<hex>`).
pub fn file_fingerprint(path: &Path) -> anyhow::Result<String> {
    let content =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(format!("sha256:{}", sha256_bytes_hex(&content)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        assert_eq!(
            sha256_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_file_fingerprint_tracks_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.json");
        std::fs::write(&path, "abc").unwrap();
        let fp = file_fingerprint(&path).unwrap();
        assert_eq!(fp, format!("sha256:{}", sha256_hex("abc")));

        std::fs::write(&path, "abd").unwrap();
        assert_ne!(file_fingerprint(&path).unwrap(), fp);
    }
}
