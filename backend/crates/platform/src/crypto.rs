//! Cryptographic Utilities
//!
//! Small wrappers shared by the challenge issuer (random hex) and the
//! submission signature (HMAC-SHA256 carried as base64).

use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use rand::{RngCore, rngs::OsRng};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// `len` bytes from the OS generator
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Standard alphabet, padded
pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(s)
}

fn keyed(key: &[u8], data: &[u8]) -> Option<HmacSha256> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key).ok()?;
    mac.update(data);
    Some(mac)
}

/// HMAC-SHA256 tag; `None` only if the key is rejected
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> Option<[u8; 32]> {
    keyed(key, data).map(|mac| mac.finalize().into_bytes().into())
}

/// Constant-time tag comparison
pub fn verify_hmac_sha256(key: &[u8], data: &[u8], tag: &[u8]) -> bool {
    keyed(key, data).is_some_and(|mac| mac.verify_slice(tag).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bytes_are_fresh() {
        let a = random_bytes(32);
        assert_eq!(a.len(), 32);
        assert_ne!(random_bytes(32), a);
        assert_eq!(to_hex(&a).len(), 64);
    }

    #[test]
    fn test_base64_is_standard_padded() {
        assert_eq!(to_base64(b"nonce"), "bm9uY2U=");
        assert_eq!(from_base64("bm9uY2U=").unwrap(), b"nonce");
        assert!(from_base64("bm9uY2U").is_err());
        assert!(from_base64("not base64!").is_err());
    }

    #[test]
    fn test_hmac_rfc4231_case_2() {
        let mac = hmac_sha256(b"Jefe", b"what do ya want for nothing?").unwrap();
        assert_eq!(
            to_hex(&mac),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_verify_rejects_truncated_or_foreign_tags() {
        let key = b"shared-secret";
        let tag = hmac_sha256(key, b"submission").unwrap();
        assert!(verify_hmac_sha256(key, b"submission", &tag));
        assert!(!verify_hmac_sha256(key, b"submission2", &tag));
        assert!(!verify_hmac_sha256(b"other", b"submission", &tag));
        assert!(!verify_hmac_sha256(key, b"submission", &tag[..31]));
        assert!(!verify_hmac_sha256(key, b"submission", &[]));
    }
}
