//! Fixtures shared by the unit tests: a provisioned test device, deterministic
//! providers and a minimal license server.

use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use cbc::cipher::{block_padding::Pkcs7, BlockEncryptMut, KeyIvInit};
use hmac::{Hmac, Mac};
use prost::Message;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPublicKey};
use rsa::rand_core::OsRng;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha1::Sha1;
use sha2::Sha256;

use crate::device::{Device, DeviceType};
use crate::license_protocol::client_identification::{NameValue, TokenType};
use crate::license_protocol::license::key_container::KeyType;
use crate::license_protocol::license::KeyContainer;
use crate::license_protocol::license_request::content_identification::ContentIdVariant;
use crate::license_protocol::signed_message::MessageType;
use crate::license_protocol::{
    drm_certificate, ClientIdentification, DrmCertificate, License, LicenseIdentification,
    LicenseRequest, SignedDrmCertificate, SignedMessage,
};
use crate::provider::RandomSource;
use crate::session::Session;

/// PKCS#1 `RSAPrivateKey` DER.
pub const TEST_DEVICE_KEY: &[u8] = include_bytes!("testdata/device_private_key.der");
pub const TEST_SYSTEM_ID: u32 = 4464;
pub const TEST_TIME_SECS: u64 = 1_700_000_000;

pub fn test_private_key() -> RsaPrivateKey {
    RsaPrivateKey::from_pkcs1_der(TEST_DEVICE_KEY).expect("test key")
}

pub fn test_client_id() -> ClientIdentification {
    let public_key = test_private_key()
        .to_public_key()
        .to_pkcs1_der()
        .expect("encode public key");
    let drm_cert = DrmCertificate {
        r#type: Some(drm_certificate::Type::Device as i32),
        serial_number: Some(vec![0x44; 16]),
        creation_time_seconds: Some(1_600_000_000),
        public_key: Some(public_key.as_bytes().to_vec()),
        system_id: Some(TEST_SYSTEM_ID),
        ..Default::default()
    };
    let signed = SignedDrmCertificate {
        drm_certificate: Some(drm_cert.encode_to_vec()),
        signature: Some(vec![0x5a; 256]),
        signer: None,
    };

    ClientIdentification {
        r#type: Some(TokenType::DrmDeviceCertificate as i32),
        token: Some(signed.encode_to_vec()),
        client_info: vec![NameValue {
            name: Some("company_name".to_string()),
            value: Some("wvcdm".to_string()),
        }],
        ..Default::default()
    }
}

pub fn test_device() -> Device {
    Device::new(DeviceType::Android, 3, 0, test_private_key(), test_client_id())
        .expect("test device")
}

/// Deterministic random source.
pub struct SeededRandom(Mutex<StdRng>);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(Mutex::new(StdRng::seed_from_u64(seed)))
    }
}

impl RandomSource for SeededRandom {
    fn fill_bytes(&self, dest: &mut [u8]) {
        self.0.lock().expect("rng lock").fill_bytes(dest);
    }
}

pub fn fixed_clock() -> impl Fn() -> SystemTime + Send + Sync + 'static {
    || UNIX_EPOCH + Duration::from_secs(TEST_TIME_SECS)
}

/// License server stand-in that answers a challenge for a given device key.
pub struct TestLicense {
    pub session_key: [u8; 16],
    pub request: Vec<u8>,
    pub license: License,
    pub core_message: Option<Vec<u8>>,
}

impl TestLicense {
    pub fn for_challenge(challenge: &[u8]) -> Self {
        let signed = SignedMessage::decode(challenge).expect("challenge envelope");
        let request = signed.msg.expect("challenge msg");
        let request_id = match LicenseRequest::decode(request.as_slice())
            .expect("license request")
            .content_id
            .and_then(|c| c.content_id_variant)
        {
            Some(ContentIdVariant::WidevinePsshData(data)) => data.request_id,
            _ => None,
        };

        let mut session_key = [0u8; 16];
        OsRng.fill_bytes(&mut session_key);

        Self {
            session_key,
            request,
            license: License {
                id: Some(LicenseIdentification {
                    request_id,
                    ..Default::default()
                }),
                ..Default::default()
            },
            core_message: None,
        }
    }

    pub fn session(&self) -> Session {
        Session::derive(&self.session_key, &self.request)
    }

    /// Append a container holding `key` encrypted under the session key.
    pub fn with_key(mut self, key_type: KeyType, id: &[u8], key: &[u8]) -> Self {
        let mut iv = [0u8; 16];
        OsRng.fill_bytes(&mut iv);
        let encrypted = cbc::Encryptor::<aes::Aes128>::new(self.session().encryption_key().into(), &iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(key);
        self.license.key.push(KeyContainer {
            id: Some(id.to_vec()),
            iv: Some(iv.to_vec()),
            key: Some(encrypted),
            r#type: Some(key_type as i32),
            ..Default::default()
        });
        self
    }

    pub fn with_container(mut self, container: KeyContainer) -> Self {
        self.license.key.push(container);
        self
    }

    /// Wrap, sign and envelope the license for `device_key`.
    pub fn sign(&self, device_key: &RsaPublicKey) -> SignedMessage {
        let msg = self.license.encode_to_vec();
        let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(self.session().server_mac_key())
            .expect("hmac key");
        if let Some(core) = self.core_message.as_ref() {
            mac.update(core);
        }
        mac.update(&msg);

        SignedMessage {
            r#type: Some(MessageType::License as i32),
            msg: Some(msg),
            signature: Some(mac.finalize().into_bytes().to_vec()),
            session_key: Some(
                device_key
                    .encrypt(&mut OsRng, Oaep::new::<Sha1>(), &self.session_key)
                    .expect("wrap session key"),
            ),
            oemcrypto_core_message: self.core_message.clone(),
            ..Default::default()
        }
    }

    pub fn to_bytes(&self, device_key: &RsaPublicKey) -> Vec<u8> {
        self.sign(device_key).encode_to_vec()
    }
}
