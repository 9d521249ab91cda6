//! Decrypted license keys.
//!
//! Each key container in a license carries an AES-128-CBC encrypted key under
//! the session encryption key, together with its IV.

use std::fmt;

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, KeyIvInit};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::license_protocol::license::key_container::KeyType;
use crate::license_protocol::license::KeyContainer;

type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

/// Operation a key of type OPERATOR_SESSION may be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Encrypt,
    Decrypt,
    Sign,
    SignatureVerify,
}

/// A key recovered from a license.
#[derive(Clone, PartialEq, Eq)]
pub struct LicenseKey {
    /// Container type; content keys are [`KeyType::Content`].
    pub key_type: KeyType,
    /// Key identifier as sent by the server.
    pub id: Vec<u8>,
    /// IV the key was wrapped with.
    pub iv: Vec<u8>,
    /// Plaintext key bytes.
    pub key: Vec<u8>,
    /// Allowed operations for OPERATOR_SESSION keys.
    pub permissions: Vec<Permission>,
    /// Track label such as "SD" or "AUDIO", if the server sent one.
    pub track_label: Option<String>,
}

impl LicenseKey {
    /// Decrypt a key container with the session encryption key.
    ///
    /// Returns `Ok(None)` for containers that carry no key material. A missing
    /// or malformed IV, or bad padding, is a [`Error::DecryptionFailed`].
    pub fn from_key_container(container: &KeyContainer, enc_key: &[u8; 16]) -> Result<Option<Self>> {
        let encrypted = match container.key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => return Ok(None),
        };
        let iv: [u8; 16] = container
            .iv
            .as_deref()
            .and_then(|iv| iv.try_into().ok())
            .ok_or(Error::DecryptionFailed)?;

        let key = Aes128CbcDec::new(enc_key.into(), &iv.into())
            .decrypt_padded_vec_mut::<Pkcs7>(encrypted)
            .map_err(|_| Error::DecryptionFailed)?;

        let mut permissions = Vec::new();
        if container.r#type() == KeyType::OperatorSession {
            if let Some(perms) = container.operator_session_key_permissions.as_ref() {
                for (allowed, permission) in [
                    (perms.allow_encrypt, Permission::Encrypt),
                    (perms.allow_decrypt, Permission::Decrypt),
                    (perms.allow_sign, Permission::Sign),
                    (perms.allow_signature_verify, Permission::SignatureVerify),
                ] {
                    if allowed.unwrap_or(false) {
                        permissions.push(permission);
                    }
                }
            }
        }

        Ok(Some(Self {
            key_type: container.r#type(),
            id: container.id.clone().unwrap_or_default(),
            iv: iv.to_vec(),
            key,
            permissions,
            track_label: container.track_label.clone(),
        }))
    }

    /// Key id as a UUID, when it is exactly 16 bytes.
    pub fn kid_uuid(&self) -> Option<Uuid> {
        Uuid::from_slice(&self.id).ok()
    }

    /// Content key, the only kind that decrypts media.
    pub fn is_content(&self) -> bool {
        self.key_type == KeyType::Content
    }
}

impl fmt::Display for LicenseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}:{}",
            self.key_type.as_str_name(),
            hex::encode(&self.id),
            hex::encode(&self.key)
        )
    }
}

impl fmt::Debug for LicenseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LicenseKey")
            .field("key_type", &self.key_type)
            .field("id", &hex::encode(&self.id))
            .field("permissions", &self.permissions)
            .field("track_label", &self.track_label)
            .finish_non_exhaustive()
    }
}

/// Keep only keys of `key_type`, preserving order.
pub fn filter_keys(keys: &[LicenseKey], key_type: KeyType) -> Vec<LicenseKey> {
    keys.iter()
        .filter(|k| k.key_type == key_type)
        .cloned()
        .collect()
}
