//! Error types for wvcdm.

use thiserror::Error;

/// Main error type for CDM operations.
///
/// Every variant ends the call that produced it; nothing is retried
/// internally. Signature and decryption failures never say which byte or
/// field was at fault.
#[derive(Debug, Error)]
pub enum Error {
    /// Structural decode failure of a PSSH box, certificate, device or envelope.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A caller-supplied argument combination is not allowed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A signing or decryption step was attempted without a device.
    #[error("No device configured")]
    MissingDevice,

    /// Certificate or license signature did not verify.
    #[error("Signature mismatch on {0}")]
    InvalidSignature(String),

    /// RSA-OAEP or AES-CBC decryption failed.
    #[error("Decryption failed")]
    DecryptionFailed,
}

impl From<prost::DecodeError> for Error {
    fn from(e: prost::DecodeError) -> Self {
        Error::MalformedInput(format!("Protobuf decode error: {}", e))
    }
}

impl From<base64::DecodeError> for Error {
    fn from(e: base64::DecodeError) -> Self {
        Error::MalformedInput(format!("Base64 decode error: {}", e))
    }
}

impl From<rsa::pkcs1::Error> for Error {
    fn from(e: rsa::pkcs1::Error) -> Self {
        Error::MalformedInput(format!("PKCS1 error: {}", e))
    }
}

impl From<rsa::pkcs8::Error> for Error {
    fn from(e: rsa::pkcs8::Error) -> Self {
        Error::MalformedInput(format!("PKCS8 error: {}", e))
    }
}

/// Result type alias for CDM operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn decryption_failure_carries_no_detail() {
        assert_eq!(Error::DecryptionFailed.to_string(), "Decryption failed");
    }

    #[test]
    fn decode_errors_become_malformed_input() {
        let err: Error = base64::Engine::decode(&base64::engine::general_purpose::STANDARD, "@@")
            .expect_err("invalid base64")
            .into();
        assert!(matches!(err, Error::MalformedInput(_)));
    }
}
