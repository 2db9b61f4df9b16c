//! SHA-1 content hashing for blobs.

use sha1::{Digest, Sha1};

/// Length of a hex-encoded SHA-1 digest
pub const HASH_LEN: usize = 40;

/// Computes the lowercase hex SHA-1 of the UTF-8 bytes of `data`.
pub fn digest_sha1(data: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(data.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Whether `hash` looks like a hex SHA-1 digest.
pub fn is_valid_hash(hash: &str) -> bool {
    hash.len() == HASH_LEN && hash.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        assert_eq!(
            digest_sha1("hello world"),
            "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed"
        );
    }

    #[test]
    fn test_digest_deterministic() {
        assert_eq!(digest_sha1("testing 123"), digest_sha1("testing 123"));
        assert_ne!(digest_sha1("testing 123"), digest_sha1("testing 12345"));
    }

    #[test]
    fn test_is_valid_hash() {
        assert!(is_valid_hash(&digest_sha1("x")));
        assert!(!is_valid_hash("abc"));
        assert!(!is_valid_hash("zz31da668340f24ec7bf7e9fb934ce3ff1497f1b"));
        assert!(!is_valid_hash("../1da668340f24ec7bf7e9fb934ce3ff1497f1b"));
    }
}
