//! Widevine CDM entry point.
//!
//! A [`Cdm`] pairs a device identity with the randomness and time sources
//! used to build challenges. It keeps no per-request state: each challenge
//! returns a [`LicenseContext`] that processes the matching response.
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::certificate::ServiceCertificate;
use crate::challenge::{build_challenge, LicenseContext};
use crate::device::Device;
use crate::error::{Error, Result};
use crate::license_protocol::LicenseType;
use crate::provider::{random_bytes, Clock, OsRandom, RandomSource, SystemClock};
use crate::pssh::Pssh;

/// Widevine Content Decryption Module (CDM).
///
/// Cheap to share between threads; challenges never mutate it.
#[derive(Clone)]
pub struct Cdm {
    device: Option<Arc<Device>>,
    random: Arc<dyn RandomSource>,
    clock: Arc<dyn Clock>,
}

/// Builder for [`Cdm`].
///
/// Defaults: no device, [`OsRandom`] and [`SystemClock`].
#[derive(Default)]
pub struct CdmBuilder {
    device: Option<Arc<Device>>,
    random: Option<Arc<dyn RandomSource>>,
    clock: Option<Arc<dyn Clock>>,
}

impl CdmBuilder {
    /// Identity used to sign challenges and unwrap session keys.
    pub fn device(mut self, device: impl Into<Arc<Device>>) -> Self {
        self.device = Some(device.into());
        self
    }

    /// Random source for request ids, nonces, privacy keys and signature salts.
    pub fn random(mut self, random: impl RandomSource + 'static) -> Self {
        self.random = Some(Arc::new(random));
        self
    }

    /// Time source for the request timestamp.
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    pub fn build(self) -> Cdm {
        Cdm {
            device: self.device,
            random: self.random.unwrap_or_else(|| Arc::new(OsRandom)),
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
        }
    }
}

impl Cdm {
    pub fn builder() -> CdmBuilder {
        CdmBuilder::default()
    }

    /// A CDM for `device` with the default providers.
    pub fn new(device: Device) -> Self {
        Self::builder().device(device).build()
    }

    /// The configured device, if any.
    pub fn device(&self) -> Option<&Device> {
        self.device.as_deref()
    }

    /// Build a signed license request for `pssh`.
    ///
    /// When `privacy_mode` is set the client identification is encrypted for
    /// `service_cert`, which must then be present. The returned context is
    /// the only way to process the matching response.
    pub fn get_license_challenge(
        &self,
        pssh: &Pssh,
        license_type: LicenseType,
        privacy_mode: bool,
        service_cert: Option<&ServiceCertificate>,
    ) -> Result<(Vec<u8>, LicenseContext)> {
        let device = self.device.as_ref().ok_or(Error::MissingDevice)?;
        trace!("Requesting license for {} key ids", pssh.key_ids().len());
        build_challenge(
            device,
            pssh,
            license_type,
            privacy_mode,
            service_cert,
            self.random.as_ref(),
            self.clock.as_ref(),
        )
    }

    /// `n` bytes from the configured random source.
    pub fn random_bytes(&self, n: usize) -> Vec<u8> {
        random_bytes(self.random.as_ref(), n)
    }
}

impl fmt::Debug for Cdm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cdm")
            .field("device", &self.device)
            .finish_non_exhaustive()
    }
}

impl FromStr for LicenseType {
    type Err = Error;

    /// Parse a license type by name, ignoring case ("streaming", "OFFLINE").
    fn from_str(s: &str) -> Result<Self> {
        LicenseType::from_str_name(&s.trim().to_ascii_uppercase())
            .ok_or_else(|| Error::InvalidArgument(format!("Invalid license type: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use prost::Message;

    use super::*;
    use crate::certificate::COMMON_PRIVACY_CERT;
    use crate::key::filter_keys;
    use crate::license_protocol::license::key_container::KeyType;
    use crate::license_protocol::{LicenseRequest, SignedMessage};
    use crate::pssh::WIDEVINE_SYSTEM_ID;
    use crate::test_support::{fixed_clock, test_device, SeededRandom, TestLicense};

    fn test_cdm(seed: u64) -> Cdm {
        Cdm::builder()
            .device(test_device())
            .random(SeededRandom::new(seed))
            .clock(fixed_clock())
            .build()
    }

    fn test_pssh() -> Pssh {
        Pssh::new(
            WIDEVINE_SYSTEM_ID,
            Some(vec![vec![0xa1; 16], vec![0xa2; 16]]),
            Vec::new(),
            1,
            0,
        )
        .unwrap()
    }

    #[test]
    fn round_trip_recovers_keys_in_order() {
        let cdm = test_cdm(1);
        let (challenge, context) = cdm
            .get_license_challenge(&test_pssh(), LicenseType::Streaming, false, None)
            .expect("challenge");

        let server = TestLicense::for_challenge(&challenge)
            .with_key(KeyType::Signing, &[0; 16], &[0x55; 64])
            .with_key(KeyType::Content, &[0xa2; 16], &[0xb2; 16])
            .with_key(KeyType::Content, &[0xa1; 16], &[0xb1; 16]);
        let keys = context
            .parse_license(&server.to_bytes(&cdm.device().unwrap().public_key()))
            .expect("parse license");

        assert_eq!(keys.len(), 3);
        let content = filter_keys(&keys, KeyType::Content);
        assert_eq!(content[0].id, vec![0xa2; 16]);
        assert_eq!(content[0].key, vec![0xb2; 16]);
        assert_eq!(content[1].id, vec![0xa1; 16]);
        assert_eq!(content[1].key, vec![0xb1; 16]);
        assert_eq!(keys[0].key, vec![0x55; 64]);
    }

    #[test]
    fn identical_providers_give_identical_challenges() {
        let pssh = test_pssh();
        let a = test_cdm(9)
            .get_license_challenge(&pssh, LicenseType::Offline, false, None)
            .unwrap();
        let b = test_cdm(9)
            .get_license_challenge(&pssh, LicenseType::Offline, false, None)
            .unwrap();
        assert_eq!(a.0, b.0);
        assert_eq!(a.1.request_id(), b.1.request_id());
    }

    #[test]
    fn tampered_responses_are_rejected() {
        let cdm = test_cdm(2);
        let public_key = cdm.device().unwrap().public_key();
        let (challenge, context) = cdm
            .get_license_challenge(&test_pssh(), LicenseType::Streaming, false, None)
            .unwrap();
        let server = TestLicense::for_challenge(&challenge).with_key(KeyType::Content, &[0xa1; 16], &[0xb1; 16]);
        let good = server.sign(&public_key);

        let mut bad_signature = good.clone();
        bad_signature.signature.as_mut().unwrap()[0] ^= 0x80;
        let err = context.parse_license(&bad_signature.encode_to_vec()).unwrap_err();
        assert!(matches!(err, Error::InvalidSignature(_)));

        let mut bad_msg = good.clone();
        let last = bad_msg.msg.as_ref().unwrap().len() - 1;
        bad_msg.msg.as_mut().unwrap()[last] ^= 0x01;
        let err = context.parse_license(&bad_msg.encode_to_vec()).unwrap_err();
        assert!(matches!(err, Error::InvalidSignature(_)));

        let mut bad_session_key = good;
        bad_session_key.session_key.as_mut().unwrap()[17] ^= 0x01;
        let err = context.parse_license(&bad_session_key.encode_to_vec()).unwrap_err();
        assert!(matches!(err, Error::DecryptionFailed));

        let mut bad_container = server;
        bad_container.license.key[0].key.as_mut().unwrap().truncate(15);
        let err = context.parse_license(&bad_container.to_bytes(&public_key)).unwrap_err();
        assert!(matches!(err, Error::DecryptionFailed));
    }

    #[test]
    fn response_for_another_request_fails_signature() {
        let cdm = test_cdm(3);
        let public_key = cdm.device().unwrap().public_key();
        let (first, _) = cdm
            .get_license_challenge(&test_pssh(), LicenseType::Streaming, false, None)
            .unwrap();
        let (_, second) = test_cdm(4)
            .get_license_challenge(&test_pssh(), LicenseType::Streaming, false, None)
            .unwrap();

        let response = TestLicense::for_challenge(&first)
            .with_key(KeyType::Content, &[1; 16], &[2; 16])
            .to_bytes(&public_key);
        let err = second.parse_license(&response).unwrap_err();
        assert!(matches!(err, Error::InvalidSignature(_)));
    }

    #[test]
    fn privacy_mode_requires_certificate() {
        let cdm = test_cdm(5);
        let err = cdm
            .get_license_challenge(&test_pssh(), LicenseType::Streaming, true, None)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        let cert = ServiceCertificate::from_base64(COMMON_PRIVACY_CERT).unwrap();
        let (challenge, _) = cdm
            .get_license_challenge(&test_pssh(), LicenseType::Streaming, true, Some(&cert))
            .expect("privacy challenge");
        let signed = SignedMessage::decode(challenge.as_slice()).unwrap();
        let request = LicenseRequest::decode(signed.msg.as_deref().unwrap()).unwrap();
        assert!(request.client_id.is_none());
        assert!(request.encrypted_client_id.is_some());
    }

    #[test]
    fn challenge_without_device_fails() {
        let cdm = Cdm::builder().build();
        assert!(cdm.device().is_none());
        let err = cdm
            .get_license_challenge(&test_pssh(), LicenseType::Streaming, false, None)
            .unwrap_err();
        assert!(matches!(err, Error::MissingDevice));
    }

    #[test]
    fn random_bytes_have_requested_length() {
        let cdm = Cdm::builder().build();
        assert_eq!(cdm.random_bytes(16).len(), 16);
        assert_eq!(cdm.random_bytes(32).len(), 32);
        assert_eq!(test_cdm(6).random_bytes(16), test_cdm(6).random_bytes(16));
    }

    #[test]
    fn cdm_and_context_are_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Cdm>();
        assert_send_sync::<CdmBuilder>();
        assert_send_sync::<LicenseContext>();
    }

    #[test]
    fn license_type_parses_by_name() {
        assert_eq!("streaming".parse::<LicenseType>().unwrap(), LicenseType::Streaming);
        assert_eq!("OFFLINE".parse::<LicenseType>().unwrap(), LicenseType::Offline);
        assert_eq!("Automatic".parse::<LicenseType>().unwrap(), LicenseType::Automatic);
        assert!(matches!(
            "rental".parse::<LicenseType>(),
            Err(Error::InvalidArgument(_))
        ));
    }

    /// Recorded exchange for a provisioned L3 device (system id 4464).
    ///
    /// The device file is not redistributable, so the fixtures are read from
    /// the directory named by `WVCDM_FIXTURES`: `device.wvd`, `pssh`,
    /// `license-challenge` and `license`.
    #[test]
    #[ignore = "requires WVCDM_FIXTURES"]
    fn recorded_license_yields_known_key() {
        let dir = PathBuf::from(std::env::var_os("WVCDM_FIXTURES").expect("WVCDM_FIXTURES is not set"));
        let read = |name: &str| std::fs::read(dir.join(name)).expect(name);

        let device = Arc::new(Device::from_bytes(&read("device.wvd")).expect("device.wvd"));
        assert_eq!(device.system_id, 4464);
        Pssh::from_bytes(&read("pssh")).expect("pssh fixture");

        let context = LicenseContext::from_challenge(device, &read("license-challenge"))
            .expect("license-challenge fixture");
        let keys = context.parse_license(&read("license")).expect("license fixture");

        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].key_type, KeyType::Content);
        assert_eq!(hex::encode(&keys[0].iv), "8421e83ef1d57ee79e4aaa4b0b38df47");
        assert_eq!(hex::encode(&keys[0].id), "df6ef2f5fd83078091a78566c8d01925");
        assert_eq!(hex::encode(&keys[0].key), "20be4041a33c7a081e43b2b4378d6d5c");
    }
}
