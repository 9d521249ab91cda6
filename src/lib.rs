//! wvcdm - Widevine license protocol client.
//!
//! This crate provides:
//! - Widevine device (.wvd) parsing and export.
//! - PSSH box and service certificate parsing.
//! - License challenge construction, signed with the device key.
//! - License response verification and content key decryption.
//!
//! ```no_run
//! # fn run(wvd: &[u8], pssh_b64: &str, response: &[u8]) -> wvcdm::Result<()> {
//! use wvcdm::{Cdm, Device, LicenseType, Pssh};
//!
//! let cdm = Cdm::new(Device::from_bytes(wvd)?);
//! let pssh: Pssh = pssh_b64.parse()?;
//! let (challenge, context) = cdm.get_license_challenge(&pssh, LicenseType::Streaming, false, None)?;
//! // POST `challenge` to the license server, then:
//! for key in context.parse_license(response)? {
//!     println!("{}", key);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Feature flags:
//! - `tracing` (default): emit diagnostics through `tracing`.
#![allow(clippy::result_large_err)]

#[macro_use]
mod macros;

/// CDM entry point and builder.
pub mod cdm;
/// Service certificate parsing and client id encryption.
pub mod certificate;
/// License challenge construction.
pub mod challenge;
/// Widevine device (.wvd) parsing and serialization.
pub mod device;
/// Common error types and Result alias.
pub mod error;
/// Decrypted key representation.
pub mod key;
/// License response processing.
pub mod license;
/// License protocol messages.
pub mod license_protocol;
/// Randomness and clock providers.
pub mod provider;
/// PSSH box parsing.
pub mod pssh;
/// Session key unwrap and key derivation.
pub mod session;

#[cfg(test)]
mod test_support;

pub use cdm::{Cdm, CdmBuilder};
pub use certificate::ServiceCertificate;
pub use challenge::LicenseContext;
pub use device::{Device, DeviceType};
pub use error::{Error, Result};
pub use key::LicenseKey;
pub use license_protocol::license::key_container::KeyType;
pub use license_protocol::LicenseType;
pub use provider::{Clock, RandomSource};
pub use pssh::Pssh;
