//! Hybrid Submission Envelope
//!
//! Confidentiality for benchmark submissions in transit:
//! - a fresh AES-256-GCM content key and 96-bit nonce per envelope
//! - the content key wrapped with the recipient's RSA public key (OAEP, SHA-256)
//! - all three parts base64-encoded independently on the wire
//!
//! [`open`] never tells the caller *why* it failed. Bad base64, a bad OAEP
//! unwrap and a GCM tag mismatch all surface as the same [`DecryptionError`].

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::{RngCore, rngs::OsRng};
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::crypto::{from_base64, to_base64};

/// Content-encryption key size in bytes (AES-256)
pub const CONTENT_KEY_LEN: usize = 32;

/// AES-GCM nonce size in bytes
pub const NONCE_LEN: usize = 12;

/// Minimum RSA modulus accepted for provisioned keys
pub const MIN_RSA_BITS: usize = 2048;

/// Encrypted submission body as it travels over the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionEnvelope {
    /// AES-GCM ciphertext including the 16-byte tag (base64)
    #[serde(rename = "data")]
    pub ciphertext: String,
    /// AES-GCM nonce (base64)
    pub nonce: String,
    /// RSA-OAEP wrapped content key (base64)
    #[serde(rename = "encrypted_key")]
    pub wrapped_key: String,
}

/// Opaque failure of [`open`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Decryption failed")]
pub struct DecryptionError;

/// Errors on the sealing side and during key provisioning
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("Failed to seal submission envelope")]
    Seal,

    #[error("Invalid RSA key: {0}")]
    InvalidKey(String),
}

/// Encrypt `plaintext` for the holder of `recipient`'s private key
pub fn seal(plaintext: &[u8], recipient: &RsaPublicKey) -> Result<SubmissionEnvelope, EnvelopeError> {
    let mut content_key = Zeroizing::new([0u8; CONTENT_KEY_LEN]);
    OsRng.fill_bytes(&mut content_key[..]);

    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);

    let cipher =
        Aes256Gcm::new_from_slice(&content_key[..]).map_err(|_| EnvelopeError::Seal)?;
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| EnvelopeError::Seal)?;

    let wrapped_key = recipient
        .encrypt(&mut OsRng, Oaep::new::<Sha256>(), &content_key[..])
        .map_err(|_| EnvelopeError::Seal)?;

    Ok(SubmissionEnvelope {
        ciphertext: to_base64(&ciphertext),
        nonce: to_base64(&nonce),
        wrapped_key: to_base64(&wrapped_key),
    })
}

/// Unwrap the content key and authenticate-decrypt the payload
pub fn open(
    envelope: &SubmissionEnvelope,
    private_key: &RsaPrivateKey,
) -> Result<Vec<u8>, DecryptionError> {
    let wrapped_key = from_base64(&envelope.wrapped_key).map_err(|_| DecryptionError)?;
    let nonce = from_base64(&envelope.nonce).map_err(|_| DecryptionError)?;
    let ciphertext = from_base64(&envelope.ciphertext).map_err(|_| DecryptionError)?;

    if nonce.len() != NONCE_LEN {
        return Err(DecryptionError);
    }

    let content_key = Zeroizing::new(
        private_key
            .decrypt(Oaep::new::<Sha256>(), &wrapped_key)
            .map_err(|_| DecryptionError)?,
    );
    if content_key.len() != CONTENT_KEY_LEN {
        return Err(DecryptionError);
    }

    let cipher = Aes256Gcm::new_from_slice(&content_key).map_err(|_| DecryptionError)?;
    cipher
        .decrypt(Nonce::from_slice(&nonce), ciphertext.as_ref())
        .map_err(|_| DecryptionError)
}

/// Load the ingestion private key from PEM (PKCS#8, with PKCS#1 fallback)
pub fn load_private_key_pem(pem: &str) -> Result<RsaPrivateKey, EnvelopeError> {
    let pem = pem.trim();
    let key = RsaPrivateKey::from_pkcs8_pem(pem)
        .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
        .map_err(|e| EnvelopeError::InvalidKey(e.to_string()))?;
    ensure_key_size(rsa::traits::PublicKeyParts::size(&key))?;
    Ok(key)
}

/// Load a recipient public key from SPKI PEM
pub fn load_public_key_pem(pem: &str) -> Result<RsaPublicKey, EnvelopeError> {
    let key = RsaPublicKey::from_public_key_pem(pem.trim())
        .map_err(|e| EnvelopeError::InvalidKey(e.to_string()))?;
    ensure_key_size(rsa::traits::PublicKeyParts::size(&key))?;
    Ok(key)
}

/// Generate a fresh keypair (development and tests)
pub fn generate_keypair(bits: usize) -> Result<RsaPrivateKey, EnvelopeError> {
    ensure_key_size(bits / 8)?;
    RsaPrivateKey::new(&mut OsRng, bits).map_err(|e| EnvelopeError::InvalidKey(e.to_string()))
}

/// Export a private key as PKCS#8 PEM
pub fn private_key_to_pem(key: &RsaPrivateKey) -> Result<Zeroizing<String>, EnvelopeError> {
    key.to_pkcs8_pem(LineEnding::LF)
        .map_err(|e| EnvelopeError::InvalidKey(e.to_string()))
}

/// Export a public key as SPKI PEM
pub fn public_key_to_pem(key: &RsaPublicKey) -> Result<String, EnvelopeError> {
    key.to_public_key_pem(LineEnding::LF)
        .map_err(|e| EnvelopeError::InvalidKey(e.to_string()))
}

fn ensure_key_size(modulus_bytes: usize) -> Result<(), EnvelopeError> {
    if modulus_bytes * 8 < MIN_RSA_BITS {
        return Err(EnvelopeError::InvalidKey(format!(
            "modulus is {} bits, need at least {MIN_RSA_BITS}",
            modulus_bytes * 8
        )));
    }
    Ok(())
}
