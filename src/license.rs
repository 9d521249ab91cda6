//! License response processing.

use hmac::{Hmac, Mac};
use prost::Message;
use sha2::Sha256;

use crate::challenge::LicenseContext;
use crate::error::{Error, Result};
use crate::key::LicenseKey;
use crate::license_protocol::signed_message::MessageType;
use crate::license_protocol::{License, SignedMessage};
use crate::session::Session;

type HmacSha256 = Hmac<Sha256>;

impl LicenseContext {
    /// Verify a license response and decrypt its keys.
    ///
    /// Keys come back in the order the server listed them. Containers without
    /// key material are skipped. Any failure rejects the whole response.
    pub fn parse_license(&self, response: &[u8]) -> Result<Vec<LicenseKey>> {
        let signed = SignedMessage::decode(response)?;
        if signed.r#type != Some(MessageType::License as i32) {
            return Err(Error::MalformedInput("Expected a LICENSE message".to_string()));
        }

        let msg = signed
            .msg
            .as_deref()
            .ok_or_else(|| Error::MalformedInput("License missing msg".to_string()))?;
        let signature = signed
            .signature
            .as_deref()
            .ok_or_else(|| Error::MalformedInput("License missing signature".to_string()))?;
        let session_key = signed
            .session_key
            .as_deref()
            .ok_or_else(|| Error::MalformedInput("License missing session key".to_string()))?;

        let session = Session::unwrap(self.device.private_key(), session_key, self.request())?;

        let mut mac = <HmacSha256 as Mac>::new_from_slice(session.server_mac_key())
            .map_err(|_| Error::DecryptionFailed)?;
        if let Some(core) = signed.oemcrypto_core_message.as_deref() {
            mac.update(core);
        }
        mac.update(msg);
        mac.verify_slice(signature)
            .map_err(|_| Error::InvalidSignature("license".to_string()))?;

        let license = License::decode(msg)?;
        if let Some(id) = license.id.as_ref().and_then(|id| id.request_id.as_deref()) {
            if id != self.request_id() {
                warn!("License request id does not match the challenge");
            }
        }

        let mut keys = Vec::with_capacity(license.key.len());
        for container in &license.key {
            if let Some(key) = LicenseKey::from_key_container(container, session.encryption_key())? {
                keys.push(key);
            }
        }

        info!("Loaded {} keys from license", keys.len());
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::challenge::build_challenge;
    use crate::license_protocol::license::key_container::KeyType;
    use crate::license_protocol::license::KeyContainer;
    use crate::license_protocol::LicenseType;
    use crate::pssh::{Pssh, WIDEVINE_SYSTEM_ID};
    use crate::test_support::{fixed_clock, test_device, SeededRandom, TestLicense};

    fn exchange() -> (Vec<u8>, LicenseContext) {
        let device = Arc::new(test_device());
        let pssh = Pssh::new(WIDEVINE_SYSTEM_ID, Some(vec![vec![1; 16]]), Vec::new(), 1, 0).unwrap();
        build_challenge(
            &device,
            &pssh,
            LicenseType::Streaming,
            false,
            None,
            &SeededRandom::new(11),
            &fixed_clock(),
        )
        .unwrap()
    }

    #[test]
    fn core_message_is_covered_by_signature() {
        let (challenge, context) = exchange();
        let mut server = TestLicense::for_challenge(&challenge).with_key(KeyType::Content, &[1; 16], &[2; 16]);
        server.core_message = Some(b"core".to_vec());

        let keys = context
            .parse_license(&server.to_bytes(&context.device().public_key()))
            .expect("license with core message");
        assert_eq!(keys[0].key, vec![2; 16]);

        let mut signed = server.sign(&context.device().public_key());
        signed.oemcrypto_core_message = Some(b"CORE".to_vec());
        let err = context.parse_license(&signed.encode_to_vec()).expect_err("core tampered");
        assert!(matches!(err, Error::InvalidSignature(_)));
    }

    #[test]
    fn key_control_only_containers_are_skipped() {
        let (challenge, context) = exchange();
        let server = TestLicense::for_challenge(&challenge)
            .with_container(KeyContainer {
                r#type: Some(KeyType::KeyControl as i32),
                ..Default::default()
            })
            .with_key(KeyType::Content, &[3; 16], &[4; 16]);

        let keys = context
            .parse_license(&server.to_bytes(&context.device().public_key()))
            .unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].id, vec![3; 16]);
    }

    #[test]
    fn envelope_must_be_a_complete_license() {
        let (challenge, context) = exchange();
        let server = TestLicense::for_challenge(&challenge).with_key(KeyType::Content, &[3; 16], &[4; 16]);
        let good = server.sign(&context.device().public_key());

        let mut wrong_type = good.clone();
        wrong_type.r#type = Some(MessageType::LicenseRequest as i32);
        let mut no_msg = good.clone();
        no_msg.msg = None;
        let mut no_session_key = good.clone();
        no_session_key.session_key = None;
        let mut no_signature = good;
        no_signature.signature = None;

        for message in [wrong_type, no_msg, no_session_key, no_signature] {
            let err = context.parse_license(&message.encode_to_vec()).expect_err("incomplete");
            assert!(matches!(err, Error::MalformedInput(_)), "{:?}", err);
        }

        let err = context.parse_license(b"\xff\xff").expect_err("garbage");
        assert!(matches!(err, Error::MalformedInput(_)));
    }
}
