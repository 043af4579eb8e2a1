// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Encrypted local key-value store.
//!
//! A single file holds a JSON string map encrypted with AES-256-GCM.
//! The layout on disk is base64 of `nonce (12 bytes) || ciphertext`; the
//! key is SHA-256 of the configured passphrase. Every write re-encrypts
//! the whole map with a fresh random nonce.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use aes_gcm::aead::{rand_core::RngCore, Aead, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use sha2::{Digest, Sha256};

use crate::error::AppError;

const NONCE_LEN: usize = 12;

/// Encrypted string-keyed store backed by a single file.
#[derive(Clone)]
pub struct SecureStore {
    path: Arc<PathBuf>,
    key: [u8; 32],
}

impl SecureStore {
    /// Open a store at `path`, deriving the encryption key from `passphrase`.
    /// The file is created lazily on first write.
    pub fn open(path: impl AsRef<Path>, passphrase: &str) -> Self {
        let mut key = [0u8; 32];
        key.copy_from_slice(&Sha256::digest(passphrase.as_bytes()));
        Self {
            path: Arc::new(path.as_ref().to_path_buf()),
            key,
        }
    }

    /// Get the value stored under `key`, if any.
    pub async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.read_map().await?.remove(key))
    }

    /// Store `value` under `key`, overwriting any previous value.
    pub async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut map = self.read_map().await?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map).await
    }

    /// Remove `key` from the store. Removing an absent key is not an error.
    pub async fn remove(&self, key: &str) -> Result<(), AppError> {
        let mut map = self.read_map().await?;
        if map.remove(key).is_some() {
            self.write_map(&map).await?;
        }
        Ok(())
    }

    async fn read_map(&self) -> Result<BTreeMap<String, String>, AppError> {
        let encoded = match tokio::fs::read_to_string(self.path.as_ref()).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new());
            }
            Err(e) => {
                return Err(AppError::Storage(format!(
                    "Failed to read store file: {}",
                    e
                )));
            }
        };

        let blob = BASE64
            .decode(encoded.trim())
            .map_err(|e| AppError::Storage(format!("Store file base64 decode failed: {}", e)))?;

        if blob.len() < NONCE_LEN {
            return Err(AppError::Storage("Store file truncated".to_string()));
        }
        let (nonce_bytes, ciphertext) = blob.split_at(NONCE_LEN);

        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.key));
        let plaintext = cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|e| AppError::Storage(format!("Store decryption failed: {}", e)))?;

        serde_json::from_slice(&plaintext)
            .map_err(|e| AppError::Storage(format!("Store contents malformed: {}", e)))
    }

    async fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), AppError> {
        let plaintext = serde_json::to_vec(map)
            .map_err(|e| AppError::Storage(format!("Store serialization failed: {}", e)))?;

        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.key));
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);

        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_slice())
            .map_err(|e| AppError::Storage(format!("Store encryption failed: {}", e)))?;

        let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        blob.extend_from_slice(&nonce_bytes);
        blob.extend_from_slice(&ciphertext);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    AppError::Storage(format!("Failed to create store directory: {}", e))
                })?;
            }
        }

        tokio::fs::write(self.path.as_ref(), BASE64.encode(&blob))
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write store file: {}", e)))
    }
}
