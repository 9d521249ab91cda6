//! Service certificates and privacy mode.
//!
//! A license server hands out a signed `DrmCertificate` of type SERVICE. Once
//! its signature checks out against the Widevine root key, its public key is
//! used to hide the client identification inside license requests.
use std::sync::LazyLock;

use aes::Aes128;
use base64::Engine;
use cbc::cipher::{block_padding::Pkcs7, BlockEncryptMut, KeyIvInit};
use prost::Message;
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::{Oaep, Pss, RsaPublicKey};
use sha1::{Digest, Sha1};

use crate::error::{Error, Result};
use crate::license_protocol::drm_certificate;
use crate::license_protocol::signed_message::MessageType;
use crate::license_protocol::{
    ClientIdentification, DrmCertificate, EncryptedClientIdentification, SignedDrmCertificate,
    SignedMessage,
};
use crate::provider::{random_bytes, RandomSource, SourceRng};

type Aes128CbcEnc = cbc::Encryptor<Aes128>;

/// Body of a service certificate request (`SignedMessage` type 4).
pub const SERVICE_CERTIFICATE_CHALLENGE: &[u8] = b"\x08\x04";

/// Privacy certificate of the public license.widevine.com server.
pub const COMMON_PRIVACY_CERT: &str = concat!(
    "CAUSxwUKwQIIAxIQFwW5F8wSBIaLBjM6L3cqjBiCtIKSBSKOAjCCAQoCggEBAJntWzsy",
    "fateJO/DtiqVtZhSCtW8yzdQPgZFuBTYdrjfQFEEQa2M462xG7iMTnJaXkqeB5Up",
    "HVhYQCOn4a8OOKkSeTkwCGELbxWMh4x+Ib/7/up34QGeHleB6KRfRiY9FOYOgFioY",
    "Hrc4E+shFexN6jWfM3rM3BdmDoh+07svUoQykdJDKR+ql1DghjduvHK3jOS8T1v+",
    "2RC/THhv0CwxgTRxLpMlSCkv5fuvWCSmvzu9Vu69WTi0Ods18Vcc6CCuZYSC4NZ7",
    "c4kcHCCaA1vZ8bYLErF8xNEkKdO7DevSy8BDFnoKEPiWC8La59dsPxebt9k+9MI",
    "tHEbzxJQAZyfWgkCAwEAAToUbGljZW5zZS53aWRldmluZS5jb20SgAOuNHMUtag1",
    "KX8nE4j7e7jLUnfSSYI83dHaMLkzOVEes8y96gS5RLknwSE0bv296snUE5F+bsF2",
    "oQQ4RgpQO8GVK5uk5M4PxL/CCpgIqq9L/NGcHc/N9XTMrCjRtBBBbPneiAQwHL2z",
    "NMr80NQJeEI6ZC5UYT3wr8+WykqSSdhV5Cs6cD7xdn9qm9Nta/gr52u/DLpP3lnS",
    "q8x2/rZCR7hcQx+8pSJmthn8NpeVQ/ypy727+voOGlXnVaPHvOZV+WRvWCq5z3Cq",
    "CLl5+Gf2Ogsrf9s2LFvE7NVV2FvKqcWTw4PIV9Sdqrd+QLeFHd/SSZiAjjWyWOdd",
    "eOrAyhb3BHMEwg2T7eTo/xxvF+YkPj89qPwXCYcOxF+6gjomPwzvofcJOxkJkoMm",
    "MzcFBDopvab5tDQsyN9UPLGhGC98X/8z8QSQ+spbJTYLdgFenFoGq47gLwDS6NWY",
    "YQSqzE3Udf2W7pzk4ybyG4PHBYV3s4cyzdq8amvtE/sNSdOKReuHpfQ="
);

/// Privacy certificate of the staging.google.com test server.
pub const STAGING_PRIVACY_CERT: &str = concat!(
    "CAUSxQUKvwIIAxIQKHA0VMAI9jYYredEPbbEyBiL5/mQBSKOAjCCAQoCggEBALUhEr",
    "jQXQI/zF2V4sJRwcZJtBd82NK+7zVbsGdD3mYePSq8MYK3mUbVX9wI3+lUB4Femm",
    "J0syKix/XgZ7tfCsB6idRa6pSyUW8HW2bvgR0NJuG5priU8rmFeWKqFxxPZmMNPk",
    "xgJxiJf14e+baq9a1Nuip+FBdt8TSh0xhbWiGKwFpMQfCB7/+Ao6BAxQsJu8dA7t",
    "zY8U1nWpGYD5LKfdxkagatrVEB90oOSYzAHwBTK6wheFC9kF6QkjZWt9/v70JIZ2",
    "fzPvYoPU9CVKtyWJOQvuVYCPHWaAgNRdiTwryi901goMDQoJk87wFgRwMzTDY4E5",
    "SGvJ2vJP1noH+a2UMCAwEAAToSc3RhZ2luZy5nb29nbGUuY29tEoADmD4wNSZ19A",
    "unFfwkm9rl1KxySaJmZSHkNlVzlSlyH/iA4KrvxeJ7yYDa6tq/P8OG0ISgLIJTeE",
    "jMdT/0l7ARp9qXeIoA4qprhM19ccB6SOv2FgLMpaPzIDCnKVww2pFbkdwYubyVk7",
    "jei7UPDe3BKTi46eA5zd4Y+oLoG7AyYw/pVdhaVmzhVDAL9tTBvRJpZjVrKH1lex",
    "jOY9Dv1F/FJp6X6rEctWPlVkOyb/SfEJwhAa/K81uDLyiPDZ1Flg4lnoX7XSTb0s",
    "+Cdkxd2b9yfvvpyGH4aTIfat4YkF9Nkvmm2mU224R1hx0WjocLsjA89wxul4TJPS",
    "3oRa2CYr5+DU4uSgdZzvgtEJ0lksckKfjAF0K64rPeytvDPD5fS69eFuy3Tq26/L",
    "fGcF96njtvOUA4P5xRFtICogySKe6WnCUZcYMDtQ0BMMM1LgawFNg4VA+KDCJ8AB",
    "Hg9bOOTimO0sswHrRWSWX1XF15dXolCk65yEqz5lOfa2/fVomeopkU"
);

// Self-signed Widevine root `SignedDrmCertificate`.
const ROOT_SIGNED_CERT_B64: &str = concat!(
    "CpwDCAASAQAY3ZSIiwUijgMwggGKAoIBgQC0/jnDZZAD2zwRlwnoaM3yw16b8ud",
    "NI7EQ24dl39z7nzWgVwNTTPZtNX2meNuzNtI/nECplSZyf7i+Zt/FIZh4FRZoXS9",
    "GDkPLioQ5q/uwNYAivjQji6tTW3LsS7VIaVM+R1/9Cf2ndhOPD5LWTN+udqm62SI",
    "QqZ1xRdbX4RklhZxTmpfrhNfMqIiCIHAmIP1+QFAn4iWTb7w+cqD6wb0ptE2CXMG",
    "0y5xyfrDpihc+GWP8/YJIK7eyM7l97Eu6iR8nuJuISISqGJIOZfXIbBH/azbkdDT",
    "KjDOx+biOtOYS4AKYeVJeRTP/Edzrw1O6fGAaET0A+9K3qjD6T15Id1sX3HXvb9I",
    "Zbdy+f7B4j9yCYEy/5CkGXmmMOROtFCXtGbLynwGCDVZEiMg17B8RsyTgWQ035Ec",
    "86kt/lzEcgXyUikx9aBWE/6UI/Rjn5yvkRycSEbgj7FiTPKwS0ohtQT3F/hzcufj",
    "UUT4H5QNvpxLoEve1zqaWVT94tGSCUNIzX5ECAwEAARKAA1jx1k0ECXvf1+9dOwI",
    "5F/oUNnVKOGeFVxKnFO41FtU9v0KG9mkAds2T9Hyy355EzUzUrgkYU0Qy7OBhG+X",
    "aE9NVxd0ay5AeflvG6Q8in76FAv6QMcxrA4S9IsRV+vXyCM1lQVjofSnaBFiC9Td",
    "pvPNaV4QXezKHcLKwdpyywxXRESYqI3WZPrl3IjINvBoZwdVlkHZVdA8OaU1fTY8",
    "Zr9/WFjGUqJJfT7x6Mfiujq0zt+kw0IwKimyDNfiKgbL+HIisKmbF/73mF9BiC9",
    "yKRfewPlrIHkokL2yl4xyIFIPVxe9enz2FRXPia1BSV0z7kmxmdYrWDRuu8+yvUS",
    "IDXQouY5OcCwEgqKmELhfKrnPsIht5rvagcizfB0fbiIYwFHghESKIrNdUdPnzJs",
    "KlVshWTwApHQh7evuVicPumFSePGuUBRMS9nG5qxPDDJtGCHs9Mmpoyh6ckGLF7R",
    "C5HxclzpC5bc3ERvWjYhN0AqdipPpV2d7PouaAdFUGSdUCDA=="
);

static ROOT_PUBLIC_KEY: LazyLock<Option<RsaPublicKey>> = LazyLock::new(|| {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(ROOT_SIGNED_CERT_B64)
        .ok()?;
    let signed = SignedDrmCertificate::decode(bytes.as_slice()).ok()?;
    let cert = DrmCertificate::decode(signed.drm_certificate?.as_slice()).ok()?;
    RsaPublicKey::from_pkcs1_der(cert.public_key?.as_slice()).ok()
});

/// The Widevine root public key service certificates are signed with.
pub fn widevine_root_key() -> Result<&'static RsaPublicKey> {
    ROOT_PUBLIC_KEY
        .as_ref()
        .ok_or_else(|| Error::MalformedInput("Embedded root certificate is invalid".to_string()))
}

/// A verified license-server certificate.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCertificate {
    /// Provider the certificate was issued to, e.g. "license.widevine.com".
    pub provider_id: String,
    /// Certificate serial number.
    pub serial_number: Vec<u8>,
    /// Key used to wrap the client identification.
    pub public_key: RsaPublicKey,
    signed: SignedDrmCertificate,
}

impl ServiceCertificate {
    /// Parse a certificate and verify it against the Widevine root.
    ///
    /// Accepts a serialized `SignedDrmCertificate` or a `SignedMessage` of type
    /// SERVICE_CERTIFICATE wrapping one.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_root(data, widevine_root_key()?)
    }

    /// Parse a base64 certificate, as commonly shipped in player configs.
    pub fn from_base64(data_b64: &str) -> Result<Self> {
        let data = base64::engine::general_purpose::STANDARD.decode(data_b64.trim())?;
        Self::from_bytes(&data)
    }

    /// Parse a certificate and verify it against a caller-supplied root.
    pub fn from_bytes_with_root(data: &[u8], root_key: &RsaPublicKey) -> Result<Self> {
        let signed = decode_signed_drm_certificate(data)?;
        let cert_bytes = signed
            .drm_certificate
            .as_deref()
            .ok_or_else(|| Error::MalformedInput("Missing DRM certificate".to_string()))?;
        let cert = DrmCertificate::decode(cert_bytes)?;

        if cert.r#type() != drm_certificate::Type::Service {
            return Err(Error::MalformedInput(format!(
                "Expected a SERVICE certificate, got {}",
                cert.r#type().as_str_name()
            )));
        }

        let provider_id = cert
            .provider_id
            .ok_or_else(|| Error::MalformedInput("Missing provider id".to_string()))?;
        let serial_number = cert
            .serial_number
            .ok_or_else(|| Error::MalformedInput("Missing serial number".to_string()))?;
        let public_key_der = cert
            .public_key
            .ok_or_else(|| Error::MalformedInput("Missing public key".to_string()))?;
        let public_key = RsaPublicKey::from_pkcs1_der(&public_key_der)?;

        let certificate = Self {
            provider_id,
            serial_number,
            public_key,
            signed,
        };
        certificate.verify_with(root_key)?;

        debug!("Loaded service certificate for {}", certificate.provider_id);
        Ok(certificate)
    }

    /// Check the certificate signature (RSASSA-PSS, SHA-1) with `root_key`.
    pub fn verify_with(&self, root_key: &RsaPublicKey) -> Result<()> {
        let cert_bytes = self.signed.drm_certificate.as_deref().unwrap_or_default();
        let signature = self
            .signed
            .signature
            .as_deref()
            .ok_or_else(|| Error::MalformedInput("Missing certificate signature".to_string()))?;

        root_key
            .verify(Pss::new::<Sha1>(), &Sha1::digest(cert_bytes), signature)
            .map_err(|_| Error::InvalidSignature("certificate".to_string()))
    }

    /// Encrypt a client identification for this server.
    ///
    /// The message is AES-128-CBC encrypted under a fresh privacy key and IV;
    /// the privacy key is wrapped with RSA-OAEP (SHA-1) under the certificate
    /// key.
    pub fn encrypt_client_id(
        &self,
        client_id: &ClientIdentification,
        random: &dyn RandomSource,
    ) -> Result<EncryptedClientIdentification> {
        let privacy_key: [u8; 16] = random_array(random);
        let privacy_iv: [u8; 16] = random_array(random);

        let encrypted_client_id = Aes128CbcEnc::new(&privacy_key.into(), &privacy_iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(&client_id.encode_to_vec());

        let encrypted_privacy_key = self
            .public_key
            .encrypt(&mut SourceRng(random), Oaep::new::<Sha1>(), &privacy_key)
            .map_err(|e| Error::InvalidArgument(format!("Cannot wrap privacy key: {}", e)))?;

        Ok(EncryptedClientIdentification {
            provider_id: Some(self.provider_id.clone()),
            service_certificate_serial_number: Some(self.serial_number.clone()),
            encrypted_client_id: Some(encrypted_client_id),
            encrypted_client_id_iv: Some(privacy_iv.to_vec()),
            encrypted_privacy_key: Some(encrypted_privacy_key),
        })
    }
}

fn random_array(random: &dyn RandomSource) -> [u8; 16] {
    let mut out = [0u8; 16];
    out.copy_from_slice(&random_bytes(random, 16));
    out
}

fn decode_signed_drm_certificate(data: &[u8]) -> Result<SignedDrmCertificate> {
    if let Ok(message) = SignedMessage::decode(data) {
        if message.r#type == Some(MessageType::ServiceCertificate as i32) {
            let msg = message
                .msg
                .ok_or_else(|| Error::MalformedInput("SignedMessage missing msg".to_string()))?;
            return Ok(SignedDrmCertificate::decode(msg.as_slice())?);
        }
    }

    Ok(SignedDrmCertificate::decode(data)?)
}
