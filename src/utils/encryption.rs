use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::Aes256Gcm;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rand::RngCore;
use thiserror::Error;

const NONCE_LEN: usize = 12;
const FORMAT_VERSION: u8 = 0x01;

/// Errors from sealing/opening the session token
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    #[error("Encryption failed: {0}")]
    Encryption(String),
    #[error("Decryption failed: {0}")]
    Decryption(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

fn load_cipher(key_hex: &str) -> Result<Aes256Gcm, CryptoError> {
    let key_bytes = hex::decode(key_hex).map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
    let key: [u8; 32] = key_bytes
        .try_into()
        .map_err(|_| CryptoError::InvalidKey("key must be 32 bytes (64 hex chars)".to_string()))?;
    Ok(Aes256Gcm::new(&key.into()))
}

/// Seal a session token with AES-256-GCM.
/// Output is base64 over `[version][nonce(12)][ciphertext]`.
pub fn seal_token(token: &str, key_hex: &str) -> Result<String, CryptoError> {
    let cipher = load_cipher(key_hex)?;

    let mut nonce = [0u8; NONCE_LEN];
    rand::rngs::OsRng.fill_bytes(&mut nonce);

    let ciphertext = cipher
        .encrypt((&nonce).into(), token.as_bytes())
        .map_err(|e| CryptoError::Encryption(e.to_string()))?;

    let mut sealed = Vec::with_capacity(1 + NONCE_LEN + ciphertext.len());
    sealed.push(FORMAT_VERSION);
    sealed.extend_from_slice(&nonce);
    sealed.extend_from_slice(&ciphertext);

    Ok(BASE64.encode(sealed))
}

/// Open a token sealed by [`seal_token`]
pub fn open_token(sealed_b64: &str, key_hex: &str) -> Result<String, CryptoError> {
    let sealed = BASE64
        .decode(sealed_b64.trim())
        .map_err(|e| CryptoError::InvalidData(e.to_string()))?;

    if sealed.len() < 1 + NONCE_LEN {
        return Err(CryptoError::InvalidData("sealed token too short".to_string()));
    }
    if sealed[0] != FORMAT_VERSION {
        return Err(CryptoError::InvalidData(format!(
            "unsupported format version {}",
            sealed[0]
        )));
    }

    let cipher = load_cipher(key_hex)?;
    let nonce: [u8; NONCE_LEN] = sealed[1..1 + NONCE_LEN]
        .try_into()
        .map_err(|_| CryptoError::InvalidData("truncated nonce".to_string()))?;

    let plaintext = cipher
        .decrypt((&nonce).into(), &sealed[1 + NONCE_LEN..])
        .map_err(|e| CryptoError::Decryption(e.to_string()))?;

    String::from_utf8(plaintext).map_err(|e| CryptoError::InvalidData(e.to_string()))
}
