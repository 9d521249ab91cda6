//! Device identity: the RSA private key and signed client identification
//! that authenticate license requests.
//!
//! Devices are usually distributed as WVD containers. v2 stores VMP data
//! inside the ClientIdentification message; v1 stored it separately and is
//! migrated on parse. Only the in-memory codec lives here, reading the file
//! is up to the caller.

use std::fmt;

use prost::Message;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::{DecodePrivateKey, EncodePrivateKey};
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::error::{Error, Result};
use crate::license_protocol::{ClientIdentification, DrmCertificate, FileHashes, SignedDrmCertificate};

/// WVD container signature.
const WVD_MAGIC: &[u8; 3] = b"WVD";

/// Version written by [`Device::to_bytes`].
const WVD_VERSION: u8 = 2;

/// CDM flavour the identity was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DeviceType {
    /// Desktop browser CDM.
    Chrome = 1,
    /// Android MediaDrm CDM.
    Android = 2,
}

impl TryFrom<u8> for DeviceType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(DeviceType::Chrome),
            2 => Ok(DeviceType::Android),
            _ => Err(Error::MalformedInput(format!(
                "Invalid device type: {}",
                value
            ))),
        }
    }
}

impl From<DeviceType> for u8 {
    fn from(device_type: DeviceType) -> Self {
        device_type as u8
    }
}

/// Client cryptographic identity.
///
/// Immutable once built. The CDM shares it read-only between concurrent
/// challenges, and the private key is only reachable from inside the crate.
pub struct Device {
    /// CDM flavour.
    pub device_type: DeviceType,
    /// Widevine security level; 1 is hardware-backed, 3 software-only.
    pub security_level: u8,
    /// Device flags (reserved).
    pub flags: u8,
    /// Signed client identification sent with (or encrypted into) requests.
    pub client_id: ClientIdentification,
    /// Decoded VMP file hashes, when the client id carries them.
    pub vmp: Option<FileHashes>,
    /// Widevine system id from the device certificate.
    pub system_id: u32,
    private_key: RsaPrivateKey,
}

impl Device {
    /// Create a Device from decoded components.
    ///
    /// The system id is read from the DRM certificate carried in the client
    /// identification token; a client id without one is rejected.
    pub fn new(
        device_type: DeviceType,
        security_level: u8,
        flags: u8,
        private_key: RsaPrivateKey,
        client_id: ClientIdentification,
    ) -> Result<Self> {
        let vmp = match client_id.vmp_data.as_ref() {
            Some(data) if !data.is_empty() => Some(FileHashes::decode(data.as_slice())?),
            _ => None,
        };

        let token = client_id
            .token
            .as_ref()
            .ok_or_else(|| Error::MalformedInput("Client ID token missing".to_string()))?;

        let signed_drm_cert = SignedDrmCertificate::decode(token.as_slice())?;
        let drm_cert_bytes = signed_drm_cert
            .drm_certificate
            .as_ref()
            .ok_or_else(|| Error::MalformedInput("DRM certificate missing".to_string()))?;
        let drm_cert = DrmCertificate::decode(drm_cert_bytes.as_slice())?;

        let system_id = drm_cert
            .system_id
            .ok_or_else(|| Error::MalformedInput("System ID missing".to_string()))?;

        Ok(Self {
            device_type,
            security_level,
            flags,
            client_id,
            vmp,
            system_id,
            private_key,
        })
    }

    /// Create a Device from a DER private key (PKCS#8 or PKCS#1) and a
    /// serialized ClientIdentification blob.
    pub fn from_parts(
        device_type: DeviceType,
        security_level: u8,
        private_key_der: &[u8],
        client_id_blob: &[u8],
    ) -> Result<Self> {
        let private_key = parse_private_key(private_key_der)?;
        let client_id = ClientIdentification::decode(client_id_blob)?;
        Self::new(device_type, security_level, 0, private_key, client_id)
    }

    /// Decode a WVD container (v1 or v2).
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut reader = WvdReader::new(data);
        if reader.take(3)? != WVD_MAGIC {
            return Err(Error::MalformedInput("Invalid magic bytes".to_string()));
        }

        let version = reader.u8()?;
        if version != 1 && version != WVD_VERSION {
            return Err(Error::MalformedInput(format!(
                "Unsupported WVD version: {}",
                version
            )));
        }

        let device_type = DeviceType::try_from(reader.u8()?)?;
        let security_level = reader.u8()?;
        let flags = reader.u8()?;

        let private_key_len = reader.u16()? as usize;
        let private_key = parse_private_key(reader.take(private_key_len)?)?;

        let client_id_len = reader.u16()? as usize;
        let mut client_id = ClientIdentification::decode(reader.take(client_id_len)?)?;

        // v1 carried VMP after the client id; fold it in unless already present.
        if version == 1 {
            let vmp_len = reader.u16()? as usize;
            let vmp_bytes = reader.take(vmp_len)?;
            let has_vmp = client_id.vmp_data.as_ref().is_some_and(|d| !d.is_empty());
            if vmp_len > 0 && !has_vmp {
                client_id.vmp_data = Some(vmp_bytes.to_vec());
            }
        }

        Self::new(device_type, security_level, flags, private_key, client_id)
    }

    /// Serialize to WVD v2 bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let private_key_der = self.private_key.to_pkcs8_der()?;
        let private_key_bytes = private_key_der.as_bytes();
        let client_id_bytes = self.client_id.encode_to_vec();

        let private_key_len = u16::try_from(private_key_bytes.len())
            .map_err(|_| Error::InvalidArgument("Private key too large for WVD".to_string()))?;
        let client_id_len = u16::try_from(client_id_bytes.len())
            .map_err(|_| Error::InvalidArgument("Client ID too large for WVD".to_string()))?;

        let mut buf = Vec::with_capacity(9 + private_key_bytes.len() + client_id_bytes.len());
        buf.extend_from_slice(WVD_MAGIC);
        buf.push(WVD_VERSION);
        buf.push(self.device_type.into());
        buf.push(self.security_level);
        buf.push(self.flags);
        buf.extend_from_slice(&private_key_len.to_be_bytes());
        buf.extend_from_slice(private_key_bytes);
        buf.extend_from_slice(&client_id_len.to_be_bytes());
        buf.extend_from_slice(&client_id_bytes);
        Ok(buf)
    }

    /// Security level as the conventional tag, e.g. "L3".
    #[must_use]
    pub fn security_level_tag(&self) -> String {
        format!("L{}", self.security_level)
    }

    /// Public half of the device key.
    #[must_use]
    pub fn public_key(&self) -> RsaPublicKey {
        self.private_key.to_public_key()
    }

    pub(crate) fn private_key(&self) -> &RsaPrivateKey {
        &self.private_key
    }
}

impl fmt::Debug for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Device")
            .field("device_type", &self.device_type)
            .field("security_level", &self.security_level)
            .field("flags", &self.flags)
            .field("system_id", &self.system_id)
            .field("has_vmp", &self.vmp.is_some())
            .finish_non_exhaustive()
    }
}

fn parse_private_key(der: &[u8]) -> Result<RsaPrivateKey> {
    match RsaPrivateKey::from_pkcs8_der(der) {
        Ok(key) => Ok(key),
        Err(_) => Ok(RsaPrivateKey::from_pkcs1_der(der)?),
    }
}

struct WvdReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> WvdReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .offset
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or_else(|| Error::MalformedInput("WVD data truncated".to_string()))?;
        let out = &self.data[self.offset..end];
        self.offset = end;
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }
}
