//! Content fingerprints used as cache keys.

use sha2::{Digest, Sha256};

/// Returns the lowercase hex SHA-256 digest of `text`.
///
/// The digest covers the exact bytes given; no trimming or case folding is
/// applied, so inputs differing only in whitespace get different keys.
pub fn fingerprint(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}
