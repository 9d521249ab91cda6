//! Session key unwrapping and key derivation.
//!
//! The license server wraps a fresh 16-byte session key under the device's
//! RSA key. Both sides then run the NIST SP 800-108 counter-mode KDF with
//! AES-128-CMAC over the serialized license request to obtain the content-key
//! encryption key and the two HMAC keys.

use std::fmt;

use aes::Aes128;
use cmac::{Cmac, Mac};
use rsa::{Oaep, RsaPrivateKey};
use sha1::Sha1;

use crate::error::{Error, Result};

type CmacAes128 = Cmac<Aes128>;

/// Length of the wrapped session key.
pub const SESSION_KEY_LEN: usize = 16;

const ENCRYPTION_LABEL: &[u8] = b"ENCRYPTION";
const AUTHENTICATION_LABEL: &[u8] = b"AUTHENTICATION";
const CMAC_BLOCK_LEN: usize = 16;

/// SP 800-108 counter-mode KDF with AES-128-CMAC as the PRF.
///
/// Block `i` (from 1) is `CMAC(key, [i] || label || 0x00 || context || L)`
/// where `L` is `bits` as a big-endian u32. The output is `bits / 8` bytes.
pub fn derive_key(
    key: &[u8; SESSION_KEY_LEN],
    label: &[u8],
    context: &[u8],
    bits: u32,
) -> Result<Vec<u8>> {
    let out_len = (bits / 8) as usize;
    let blocks = out_len.div_ceil(CMAC_BLOCK_LEN);
    if bits % 8 != 0 || blocks > u8::MAX as usize {
        return Err(Error::InvalidArgument(format!(
            "Unsupported KDF output length: {} bits",
            bits
        )));
    }

    let mut out = counter_blocks(key, label, context, bits, blocks as u8);
    out.truncate(out_len);
    Ok(out)
}

/// Keys derived for one license exchange.
///
/// Lives only for the duration of a response parse.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    encryption_key: [u8; 16],
    server_mac_key: [u8; 32],
    client_mac_key: [u8; 32],
}

impl Session {
    /// Derive the session keys from a raw session key and the serialized
    /// license request.
    #[must_use]
    pub fn derive(session_key: &[u8; SESSION_KEY_LEN], context: &[u8]) -> Self {
        let mut encryption_key = [0u8; 16];
        encryption_key.copy_from_slice(&counter_blocks(session_key, ENCRYPTION_LABEL, context, 128, 1));

        let auth = counter_blocks(session_key, AUTHENTICATION_LABEL, context, 512, 4);
        let mut server_mac_key = [0u8; 32];
        let mut client_mac_key = [0u8; 32];
        server_mac_key.copy_from_slice(&auth[..32]);
        client_mac_key.copy_from_slice(&auth[32..]);

        Self {
            encryption_key,
            server_mac_key,
            client_mac_key,
        }
    }

    /// Unwrap an RSA-OAEP (SHA-1) encrypted session key and derive from it.
    ///
    /// Every failure is reported as [`Error::DecryptionFailed`].
    pub fn unwrap(
        private_key: &RsaPrivateKey,
        encrypted_session_key: &[u8],
        context: &[u8],
    ) -> Result<Self> {
        let session_key = private_key
            .decrypt(Oaep::new::<Sha1>(), encrypted_session_key)
            .map_err(|_| Error::DecryptionFailed)?;
        let session_key: [u8; SESSION_KEY_LEN] = session_key
            .as_slice()
            .try_into()
            .map_err(|_| Error::DecryptionFailed)?;

        Ok(Self::derive(&session_key, context))
    }

    /// AES-128 key protecting the key containers.
    pub fn encryption_key(&self) -> &[u8; 16] {
        &self.encryption_key
    }

    /// HMAC-SHA256 key the server signs responses with.
    pub fn server_mac_key(&self) -> &[u8; 32] {
        &self.server_mac_key
    }

    /// HMAC-SHA256 key for client-originated messages such as renewals.
    pub fn client_mac_key(&self) -> &[u8; 32] {
        &self.client_mac_key
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

fn counter_blocks(
    key: &[u8; SESSION_KEY_LEN],
    label: &[u8],
    context: &[u8],
    bits: u32,
    blocks: u8,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(blocks as usize * CMAC_BLOCK_LEN);
    for counter in 1..=blocks {
        let mut mac = <CmacAes128 as Mac>::new(key.into());
        mac.update(&[counter]);
        mac.update(label);
        mac.update(&[0]);
        mac.update(context);
        mac.update(&bits.to_be_bytes());
        out.extend_from_slice(&mac.finalize().into_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use rsa::rand_core::OsRng;

    use super::*;
    use crate::test_support::test_device;

    const KEY: [u8; 16] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
        0x0f,
    ];
    const CONTEXT: &[u8] = b"license-request-bytes";

    #[test]
    fn derives_known_vector() {
        let session = Session::derive(&KEY, CONTEXT);
        assert_eq!(
            hex::encode(session.encryption_key()),
            "449f741fa8f1131c6cb72adef99b5573"
        );
        assert_eq!(
            hex::encode(session.server_mac_key()),
            "2dac2e4401076e0121ea656f5baa260029f991a3950f0f96745ba559802ef418"
        );
        assert_eq!(
            hex::encode(session.client_mac_key()),
            "e53a1de7595606037922c54b4817b9cdfa38b495b846d1a63a132e552778c81d"
        );
    }

    #[test]
    fn raw_kdf_matches_session_keys() {
        let session = Session::derive(&KEY, CONTEXT);
        let enc = derive_key(&KEY, b"ENCRYPTION", CONTEXT, 128).expect("derive enc");
        let auth = derive_key(&KEY, b"AUTHENTICATION", CONTEXT, 512).expect("derive auth");
        assert_eq!(enc.as_slice(), session.encryption_key());
        assert_eq!(&auth[..32], session.server_mac_key());
        assert_eq!(&auth[32..], session.client_mac_key());
    }

    #[test]
    fn derivation_depends_on_context() {
        assert_eq!(Session::derive(&KEY, CONTEXT), Session::derive(&KEY, CONTEXT));
        assert_ne!(
            Session::derive(&KEY, CONTEXT),
            Session::derive(&KEY, b"license-request-bytez")
        );
    }

    #[test]
    fn rejects_unsupported_lengths() {
        assert!(derive_key(&KEY, b"X", CONTEXT, 12).is_err());
        assert!(derive_key(&KEY, b"X", CONTEXT, 256 * 128).is_err());
    }

    #[test]
    fn unwraps_oaep_session_key() {
        let device = test_device();
        let wrapped = device
            .public_key()
            .encrypt(&mut OsRng, Oaep::new::<Sha1>(), &KEY)
            .expect("wrap session key");

        let session = Session::unwrap(device.private_key(), &wrapped, CONTEXT).expect("unwrap");
        assert_eq!(session, Session::derive(&KEY, CONTEXT));
    }

    #[test]
    fn unwrap_failures_carry_no_detail() {
        let device = test_device();
        let short_key = device
            .public_key()
            .encrypt(&mut OsRng, Oaep::new::<Sha1>(), &KEY[..15])
            .expect("wrap short key");

        for wrapped in [short_key, vec![0x42; 256], Vec::new()] {
            let err = Session::unwrap(device.private_key(), &wrapped, CONTEXT).expect_err("bad key");
            assert!(matches!(err, Error::DecryptionFailed));
        }
    }

    #[test]
    fn debug_output_hides_keys() {
        assert_eq!(format!("{:?}", Session::derive(&KEY, CONTEXT)), "Session { .. }");
    }
}
