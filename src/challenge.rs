//! License request construction.
//!
//! A challenge is a `SignedMessage` of type LICENSE_REQUEST whose `msg` is the
//! serialized `LicenseRequest`, signed by the device with RSASSA-PSS (SHA-1).
//! The exact request bytes are kept in a [`LicenseContext`] because the
//! response keys are derived from them.

use std::sync::Arc;

use prost::Message;
use rsa::Pss;
use sha1::{Digest, Sha1};

use crate::certificate::ServiceCertificate;
use crate::device::Device;
use crate::error::{Error, Result};
use crate::license_protocol::license_request::content_identification::{
    ContentIdVariant, WidevinePsshData,
};
use crate::license_protocol::license_request::{ContentIdentification, RequestType};
use crate::license_protocol::signed_message::MessageType;
use crate::license_protocol::{LicenseRequest, LicenseType, ProtocolVersion, SignedMessage};
use crate::provider::{random_bytes, random_u32, unix_seconds, Clock, RandomSource, SourceRng};
use crate::pssh::Pssh;

/// Length of the request id embedded in each challenge.
pub const REQUEST_ID_LEN: usize = 16;

/// State needed to process the response to one challenge.
///
/// Holds the device handle and the exact request bytes that were signed.
/// Dropping it abandons the exchange.
#[derive(Debug, Clone)]
pub struct LicenseContext {
    pub(crate) device: Arc<Device>,
    request_id: Vec<u8>,
    request: Vec<u8>,
}

impl LicenseContext {
    /// Rebuild a context from challenge bytes issued earlier for `device`.
    pub fn from_challenge(device: Arc<Device>, challenge: &[u8]) -> Result<Self> {
        let signed = SignedMessage::decode(challenge)?;
        if signed.r#type != Some(MessageType::LicenseRequest as i32) {
            return Err(Error::MalformedInput(
                "Expected a LICENSE_REQUEST message".to_string(),
            ));
        }
        let request = signed
            .msg
            .ok_or_else(|| Error::MalformedInput("Challenge missing msg".to_string()))?;

        let content_id = LicenseRequest::decode(request.as_slice())?
            .content_id
            .and_then(|c| c.content_id_variant);
        let request_id = match content_id {
            Some(ContentIdVariant::WidevinePsshData(data)) => data.request_id.unwrap_or_default(),
            _ => Vec::new(),
        };

        Ok(Self {
            device,
            request_id,
            request,
        })
    }

    /// Request id the server echoes back in the license.
    pub fn request_id(&self) -> &[u8] {
        &self.request_id
    }

    /// Serialized `LicenseRequest` that was signed.
    pub fn request(&self) -> &[u8] {
        &self.request
    }

    /// Device the challenge was signed by.
    pub fn device(&self) -> &Device {
        &self.device
    }
}

/// Build and sign a license challenge.
///
/// With `privacy_mode` the client identification is encrypted for
/// `service_cert`; requesting privacy without a certificate is an
/// [`Error::InvalidArgument`] and consumes no randomness.
pub fn build_challenge(
    device: &Arc<Device>,
    pssh: &Pssh,
    license_type: LicenseType,
    privacy_mode: bool,
    service_cert: Option<&ServiceCertificate>,
    random: &dyn RandomSource,
    clock: &dyn Clock,
) -> Result<(Vec<u8>, LicenseContext)> {
    let privacy_cert = match (privacy_mode, service_cert) {
        (true, None) => {
            return Err(Error::InvalidArgument(
                "Privacy mode requires a service certificate".to_string(),
            ))
        }
        (true, Some(cert)) => Some(cert),
        (false, _) => None,
    };

    let request_id = new_request_id(random);
    let key_control_nonce = random_u32(random);

    let (client_id, encrypted_client_id) = match privacy_cert {
        Some(cert) => (None, Some(cert.encrypt_client_id(&device.client_id, random)?)),
        None => (Some(device.client_id.clone()), None),
    };

    let license_request = LicenseRequest {
        client_id,
        content_id: Some(ContentIdentification {
            content_id_variant: Some(ContentIdVariant::WidevinePsshData(WidevinePsshData {
                pssh_data: vec![pssh.init_data().to_vec()],
                license_type: Some(license_type as i32),
                request_id: Some(request_id.clone()),
            })),
        }),
        r#type: Some(RequestType::New as i32),
        request_time: Some(unix_seconds(clock.now())),
        key_control_nonce_deprecated: None,
        protocol_version: Some(ProtocolVersion::Version21 as i32),
        key_control_nonce: Some(key_control_nonce),
        encrypted_client_id,
    };
    let request = license_request.encode_to_vec();

    // Only a device key too short for PSS-SHA1 with a 20-byte salt fails here.
    let signature = device
        .private_key()
        .sign_with_rng(&mut SourceRng(random), Pss::new::<Sha1>(), &Sha1::digest(&request))
        .map_err(|e| Error::InvalidArgument(format!("Device key cannot sign license request: {}", e)))?;

    let challenge = SignedMessage {
        r#type: Some(MessageType::LicenseRequest as i32),
        msg: Some(request.clone()),
        signature: Some(signature),
        ..Default::default()
    }
    .encode_to_vec();

    debug!(
        "Built {} license challenge ({} bytes, privacy: {})",
        license_type.as_str_name(),
        challenge.len(),
        privacy_cert.is_some()
    );

    Ok((
        challenge,
        LicenseContext {
            device: Arc::clone(device),
            request_id,
            request,
        },
    ))
}

/// `rand4 || 0u32 || 1u64 (LE)`, the request id layout OEMCrypto produces.
fn new_request_id(random: &dyn RandomSource) -> Vec<u8> {
    let mut request_id = random_bytes(random, 4);
    request_id.extend_from_slice(&[0u8; 4]);
    request_id.extend_from_slice(&1u64.to_le_bytes());
    request_id
}
