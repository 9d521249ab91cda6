//! Widevine license protocol messages.
//!
//! These mirror `license_protocol.proto` (proto2) with the module nesting that
//! prost-build produces, restricted to the messages the CDM exchanges. Fields
//! not listed here are skipped on decode.
#![allow(clippy::derive_partial_eq_without_eq)]

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LicenseIdentification {
    #[prost(bytes = "vec", optional, tag = "1")]
    pub request_id: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "2")]
    pub session_id: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "3")]
    pub purchase_id: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(enumeration = "LicenseType", optional, tag = "4")]
    pub r#type: ::core::option::Option<i32>,
    #[prost(int32, optional, tag = "5")]
    pub version: ::core::option::Option<i32>,
    #[prost(bytes = "vec", optional, tag = "6")]
    pub provider_session_token: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct License {
    #[prost(message, optional, tag = "1")]
    pub id: ::core::option::Option<LicenseIdentification>,
    #[prost(message, optional, tag = "2")]
    pub policy: ::core::option::Option<license::Policy>,
    #[prost(message, repeated, tag = "3")]
    pub key: ::prost::alloc::vec::Vec<license::KeyContainer>,
    #[prost(int64, optional, tag = "4")]
    pub license_start_time: ::core::option::Option<i64>,
    #[prost(bool, optional, tag = "5")]
    pub remote_attestation_verified: ::core::option::Option<bool>,
    #[prost(bytes = "vec", optional, tag = "6")]
    pub provider_client_token: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(uint32, optional, tag = "7")]
    pub protection_scheme: ::core::option::Option<u32>,
    #[prost(bytes = "vec", optional, tag = "8")]
    pub srm_requirement: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "9")]
    pub srm_update: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(bytes = "vec", repeated, tag = "11")]
    pub group_ids: ::prost::alloc::vec::Vec<::prost::alloc::vec::Vec<u8>>,
}

/// Nested message and enum types in `License`.
pub mod license {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Policy {
        #[prost(bool, optional, tag = "1")]
        pub can_play: ::core::option::Option<bool>,
        #[prost(bool, optional, tag = "2")]
        pub can_persist: ::core::option::Option<bool>,
        #[prost(bool, optional, tag = "3")]
        pub can_renew: ::core::option::Option<bool>,
        #[prost(int64, optional, tag = "4")]
        pub rental_duration_seconds: ::core::option::Option<i64>,
        #[prost(int64, optional, tag = "5")]
        pub playback_duration_seconds: ::core::option::Option<i64>,
        #[prost(int64, optional, tag = "6")]
        pub license_duration_seconds: ::core::option::Option<i64>,
        #[prost(int64, optional, tag = "7")]
        pub renewal_recovery_duration_seconds: ::core::option::Option<i64>,
        #[prost(string, optional, tag = "8")]
        pub renewal_server_url: ::core::option::Option<::prost::alloc::string::String>,
        #[prost(int64, optional, tag = "9")]
        pub renewal_delay_seconds: ::core::option::Option<i64>,
        #[prost(int64, optional, tag = "10")]
        pub renewal_retry_interval_seconds: ::core::option::Option<i64>,
        #[prost(bool, optional, tag = "11")]
        pub renew_with_usage: ::core::option::Option<bool>,
        #[prost(bool, optional, tag = "12")]
        pub always_include_client_id: ::core::option::Option<bool>,
        #[prost(int64, optional, tag = "13")]
        pub play_start_grace_period_seconds: ::core::option::Option<i64>,
        #[prost(bool, optional, tag = "14")]
        pub soft_enforce_playback_duration: ::core::option::Option<bool>,
        #[prost(bool, optional, tag = "15")]
        pub soft_enforce_rental_duration: ::core::option::Option<bool>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct KeyContainer {
        #[prost(bytes = "vec", optional, tag = "1")]
        pub id: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
        #[prost(bytes = "vec", optional, tag = "2")]
        pub iv: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
        #[prost(bytes = "vec", optional, tag = "3")]
        pub key: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
        #[prost(enumeration = "key_container::KeyType", optional, tag = "4")]
        pub r#type: ::core::option::Option<i32>,
        #[prost(enumeration = "key_container::SecurityLevel", optional, tag = "5")]
        pub level: ::core::option::Option<i32>,
        #[prost(message, optional, tag = "8")]
        pub key_control: ::core::option::Option<key_container::KeyControl>,
        #[prost(message, optional, tag = "9")]
        pub operator_session_key_permissions:
            ::core::option::Option<key_container::OperatorSessionKeyPermissions>,
        #[prost(bool, optional, tag = "11")]
        pub anti_rollback_usage_table: ::core::option::Option<bool>,
        #[prost(string, optional, tag = "12")]
        pub track_label: ::core::option::Option<::prost::alloc::string::String>,
    }

    /// Nested message and enum types in `KeyContainer`.
    pub mod key_container {
        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct KeyControl {
            #[prost(bytes = "vec", optional, tag = "1")]
            pub key_control_block: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
            #[prost(bytes = "vec", optional, tag = "2")]
            pub iv: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
        }

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct OperatorSessionKeyPermissions {
            #[prost(bool, optional, tag = "1")]
            pub allow_encrypt: ::core::option::Option<bool>,
            #[prost(bool, optional, tag = "2")]
            pub allow_decrypt: ::core::option::Option<bool>,
            #[prost(bool, optional, tag = "3")]
            pub allow_sign: ::core::option::Option<bool>,
            #[prost(bool, optional, tag = "4")]
            pub allow_signature_verify: ::core::option::Option<bool>,
        }

        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
        #[repr(i32)]
        pub enum KeyType {
            Signing = 1,
            Content = 2,
            KeyControl = 3,
            OperatorSession = 4,
            Entitlement = 5,
            OemContent = 6,
        }
        impl KeyType {
            /// String value of the enum field names used in the ProtoBuf definition.
            pub fn as_str_name(&self) -> &'static str {
                match self {
                    Self::Signing => "SIGNING",
                    Self::Content => "CONTENT",
                    Self::KeyControl => "KEY_CONTROL",
                    Self::OperatorSession => "OPERATOR_SESSION",
                    Self::Entitlement => "ENTITLEMENT",
                    Self::OemContent => "OEM_CONTENT",
                }
            }
            /// Creates an enum from field names used in the ProtoBuf definition.
            pub fn from_str_name(value: &str) -> ::core::option::Option<Self> {
                match value {
                    "SIGNING" => Some(Self::Signing),
                    "CONTENT" => Some(Self::Content),
                    "KEY_CONTROL" => Some(Self::KeyControl),
                    "OPERATOR_SESSION" => Some(Self::OperatorSession),
                    "ENTITLEMENT" => Some(Self::Entitlement),
                    "OEM_CONTENT" => Some(Self::OemContent),
                    _ => None,
                }
            }
        }

        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
        #[repr(i32)]
        pub enum SecurityLevel {
            SwSecureCrypto = 1,
            SwSecureDecode = 2,
            HwSecureCrypto = 3,
            HwSecureDecode = 4,
            HwSecureAll = 5,
        }
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LicenseRequest {
    #[prost(message, optional, tag = "1")]
    pub client_id: ::core::option::Option<ClientIdentification>,
    #[prost(message, optional, tag = "2")]
    pub content_id: ::core::option::Option<license_request::ContentIdentification>,
    #[prost(enumeration = "license_request::RequestType", optional, tag = "3")]
    pub r#type: ::core::option::Option<i32>,
    #[prost(int64, optional, tag = "4")]
    pub request_time: ::core::option::Option<i64>,
    #[prost(bytes = "vec", optional, tag = "5")]
    pub key_control_nonce_deprecated: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(enumeration = "ProtocolVersion", optional, tag = "6")]
    pub protocol_version: ::core::option::Option<i32>,
    #[prost(uint32, optional, tag = "7")]
    pub key_control_nonce: ::core::option::Option<u32>,
    #[prost(message, optional, tag = "8")]
    pub encrypted_client_id: ::core::option::Option<EncryptedClientIdentification>,
}

/// Nested message and enum types in `LicenseRequest`.
pub mod license_request {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ContentIdentification {
        #[prost(oneof = "content_identification::ContentIdVariant", tags = "1, 2, 3, 4")]
        pub content_id_variant: ::core::option::Option<content_identification::ContentIdVariant>,
    }

    /// Nested message and enum types in `ContentIdentification`.
    pub mod content_identification {
        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct WidevinePsshData {
            #[prost(bytes = "vec", repeated, tag = "1")]
            pub pssh_data: ::prost::alloc::vec::Vec<::prost::alloc::vec::Vec<u8>>,
            #[prost(enumeration = "super::super::LicenseType", optional, tag = "2")]
            pub license_type: ::core::option::Option<i32>,
            #[prost(bytes = "vec", optional, tag = "3")]
            pub request_id: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
        }

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct WebmKeyId {
            #[prost(bytes = "vec", optional, tag = "1")]
            pub header: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
            #[prost(enumeration = "super::super::LicenseType", optional, tag = "2")]
            pub license_type: ::core::option::Option<i32>,
            #[prost(bytes = "vec", optional, tag = "3")]
            pub request_id: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
        }

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct ExistingLicense {
            #[prost(message, optional, tag = "1")]
            pub license_id: ::core::option::Option<super::super::LicenseIdentification>,
            #[prost(int64, optional, tag = "2")]
            pub seconds_since_started: ::core::option::Option<i64>,
            #[prost(int64, optional, tag = "3")]
            pub seconds_since_last_played: ::core::option::Option<i64>,
            #[prost(bytes = "vec", optional, tag = "4")]
            pub session_usage_table_entry: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
        }

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct InitData {
            #[prost(enumeration = "init_data::InitDataType", optional, tag = "1")]
            pub init_data_type: ::core::option::Option<i32>,
            #[prost(bytes = "vec", optional, tag = "2")]
            pub init_data: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
            #[prost(enumeration = "super::super::LicenseType", optional, tag = "3")]
            pub license_type: ::core::option::Option<i32>,
            #[prost(bytes = "vec", optional, tag = "4")]
            pub request_id: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
        }

        /// Nested message and enum types in `InitData`.
        pub mod init_data {
            #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
            #[repr(i32)]
            pub enum InitDataType {
                Cenc = 1,
                Webm = 2,
            }
        }

        #[derive(Clone, PartialEq, ::prost::Oneof)]
        pub enum ContentIdVariant {
            #[prost(message, tag = "1")]
            WidevinePsshData(WidevinePsshData),
            #[prost(message, tag = "2")]
            WebmKeyId(WebmKeyId),
            #[prost(message, tag = "3")]
            ExistingLicense(ExistingLicense),
            #[prost(message, tag = "4")]
            InitData(InitData),
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum RequestType {
        New = 1,
        Renewal = 2,
        Release = 3,
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SignedMessage {
    #[prost(enumeration = "signed_message::MessageType", optional, tag = "1")]
    pub r#type: ::core::option::Option<i32>,
    #[prost(bytes = "vec", optional, tag = "2")]
    pub msg: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "3")]
    pub signature: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "4")]
    pub session_key: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "5")]
    pub remote_attestation: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(enumeration = "signed_message::SessionKeyType", optional, tag = "8")]
    pub session_key_type: ::core::option::Option<i32>,
    #[prost(bytes = "vec", optional, tag = "9")]
    pub oemcrypto_core_message: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
}

/// Nested message and enum types in `SignedMessage`.
pub mod signed_message {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum MessageType {
        LicenseRequest = 1,
        License = 2,
        ErrorResponse = 3,
        ServiceCertificateRequest = 4,
        ServiceCertificate = 5,
        SubLicense = 6,
        CasLicenseRequest = 7,
        CasLicense = 8,
        ExternalLicenseRequest = 9,
        ExternalLicense = 10,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum SessionKeyType {
        Undefined = 0,
        WrappedAesKey = 1,
        EphemeralEccPublicKey = 2,
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ClientIdentification {
    #[prost(enumeration = "client_identification::TokenType", optional, tag = "1")]
    pub r#type: ::core::option::Option<i32>,
    #[prost(bytes = "vec", optional, tag = "2")]
    pub token: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(message, repeated, tag = "3")]
    pub client_info: ::prost::alloc::vec::Vec<client_identification::NameValue>,
    #[prost(bytes = "vec", optional, tag = "4")]
    pub provider_client_token: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(uint32, optional, tag = "5")]
    pub license_counter: ::core::option::Option<u32>,
    #[prost(message, optional, tag = "6")]
    pub client_capabilities: ::core::option::Option<client_identification::ClientCapabilities>,
    #[prost(bytes = "vec", optional, tag = "7")]
    pub vmp_data: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(message, repeated, tag = "8")]
    pub device_credentials: ::prost::alloc::vec::Vec<client_identification::ClientCredentials>,
}

/// Nested message and enum types in `ClientIdentification`.
pub mod client_identification {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct NameValue {
        #[prost(string, optional, tag = "1")]
        pub name: ::core::option::Option<::prost::alloc::string::String>,
        #[prost(string, optional, tag = "2")]
        pub value: ::core::option::Option<::prost::alloc::string::String>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ClientCapabilities {
        #[prost(bool, optional, tag = "1")]
        pub client_token: ::core::option::Option<bool>,
        #[prost(bool, optional, tag = "2")]
        pub session_token: ::core::option::Option<bool>,
        #[prost(bool, optional, tag = "3")]
        pub video_resolution_constraints: ::core::option::Option<bool>,
        #[prost(enumeration = "client_capabilities::HdcpVersion", optional, tag = "4")]
        pub max_hdcp_version: ::core::option::Option<i32>,
        #[prost(uint32, optional, tag = "5")]
        pub oem_crypto_api_version: ::core::option::Option<u32>,
        #[prost(bool, optional, tag = "6")]
        pub anti_rollback_usage_table: ::core::option::Option<bool>,
        #[prost(uint32, optional, tag = "7")]
        pub srm_version: ::core::option::Option<u32>,
        #[prost(bool, optional, tag = "8")]
        pub can_update_srm: ::core::option::Option<bool>,
        #[prost(
            enumeration = "client_capabilities::CertificateKeyType",
            repeated,
            packed = "false",
            tag = "9"
        )]
        pub supported_certificate_key_type: ::prost::alloc::vec::Vec<i32>,
        #[prost(enumeration = "client_capabilities::AnalogOutputCapabilities", optional, tag = "10")]
        pub analog_output_capabilities: ::core::option::Option<i32>,
        #[prost(bool, optional, tag = "11")]
        pub can_disable_analog_output: ::core::option::Option<bool>,
        #[prost(uint32, optional, tag = "12")]
        pub resource_rating_tier: ::core::option::Option<u32>,
    }

    /// Nested message and enum types in `ClientCapabilities`.
    pub mod client_capabilities {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
        #[repr(i32)]
        pub enum HdcpVersion {
            HdcpNone = 0,
            HdcpV1 = 1,
            HdcpV2 = 2,
            HdcpV21 = 3,
            HdcpV22 = 4,
            HdcpV23 = 5,
            HdcpNoDigitalOutput = 255,
        }

        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
        #[repr(i32)]
        pub enum CertificateKeyType {
            Rsa2048 = 0,
            Rsa3072 = 1,
            EccSecp256r1 = 2,
            EccSecp384r1 = 3,
            EccSecp521r1 = 4,
        }

        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
        #[repr(i32)]
        pub enum AnalogOutputCapabilities {
            AnalogOutputUnknown = 0,
            AnalogOutputNone = 1,
            AnalogOutputSupported = 2,
            AnalogOutputSupportsCgmsA = 3,
        }
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ClientCredentials {
        #[prost(enumeration = "TokenType", optional, tag = "1")]
        pub r#type: ::core::option::Option<i32>,
        #[prost(bytes = "vec", optional, tag = "2")]
        pub token: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum TokenType {
        Keybox = 0,
        DrmDeviceCertificate = 1,
        RemoteAttestationCertificate = 2,
        OemDeviceCertificate = 3,
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EncryptedClientIdentification {
    #[prost(string, optional, tag = "1")]
    pub provider_id: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(bytes = "vec", optional, tag = "2")]
    pub service_certificate_serial_number: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "3")]
    pub encrypted_client_id: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "4")]
    pub encrypted_client_id_iv: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "5")]
    pub encrypted_privacy_key: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DrmCertificate {
    #[prost(enumeration = "drm_certificate::Type", optional, tag = "1")]
    pub r#type: ::core::option::Option<i32>,
    #[prost(bytes = "vec", optional, tag = "2")]
    pub serial_number: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(uint32, optional, tag = "3")]
    pub creation_time_seconds: ::core::option::Option<u32>,
    #[prost(bytes = "vec", optional, tag = "4")]
    pub public_key: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(uint32, optional, tag = "5")]
    pub system_id: ::core::option::Option<u32>,
    #[prost(bool, optional, tag = "6")]
    pub test_device_deprecated: ::core::option::Option<bool>,
    #[prost(string, optional, tag = "7")]
    pub provider_id: ::core::option::Option<::prost::alloc::string::String>,
}

/// Nested message and enum types in `DrmCertificate`.
pub mod drm_certificate {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Type {
        Root = 0,
        DeviceModel = 1,
        Device = 2,
        Service = 3,
        Provisioner = 4,
    }
    impl Type {
        /// String value of the enum field names used in the ProtoBuf definition.
        pub fn as_str_name(&self) -> &'static str {
            match self {
                Self::Root => "ROOT",
                Self::DeviceModel => "DEVICE_MODEL",
                Self::Device => "DEVICE",
                Self::Service => "SERVICE",
                Self::Provisioner => "PROVISIONER",
            }
        }
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SignedDrmCertificate {
    #[prost(bytes = "vec", optional, tag = "1")]
    pub drm_certificate: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "2")]
    pub signature: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(message, optional, boxed, tag = "3")]
    pub signer: ::core::option::Option<::prost::alloc::boxed::Box<SignedDrmCertificate>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct WidevinePsshData {
    #[prost(bytes = "vec", repeated, tag = "2")]
    pub key_ids: ::prost::alloc::vec::Vec<::prost::alloc::vec::Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "4")]
    pub content_id: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(uint32, optional, tag = "7")]
    pub crypto_period_index: ::core::option::Option<u32>,
    #[prost(uint32, optional, tag = "9")]
    pub protection_scheme: ::core::option::Option<u32>,
    #[prost(uint32, optional, tag = "10")]
    pub crypto_period_seconds: ::core::option::Option<u32>,
    #[prost(enumeration = "widevine_pssh_data::Type", optional, tag = "11")]
    pub r#type: ::core::option::Option<i32>,
    #[prost(uint32, optional, tag = "12")]
    pub key_sequence: ::core::option::Option<u32>,
    #[prost(bytes = "vec", repeated, tag = "13")]
    pub group_ids: ::prost::alloc::vec::Vec<::prost::alloc::vec::Vec<u8>>,
    #[prost(enumeration = "widevine_pssh_data::Algorithm", optional, tag = "1")]
    pub algorithm: ::core::option::Option<i32>,
    #[prost(string, optional, tag = "3")]
    pub provider: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "5")]
    pub track_type: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "6")]
    pub policy: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(bytes = "vec", optional, tag = "8")]
    pub grouped_license: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
}

/// Nested message and enum types in `WidevinePsshData`.
pub mod widevine_pssh_data {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Type {
        Single = 0,
        Entitlement = 1,
        EntitledKey = 2,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Algorithm {
        Unencrypted = 0,
        Aesctr = 1,
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FileHashes {
    #[prost(bytes = "vec", optional, tag = "1")]
    pub signer: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(message, repeated, tag = "2")]
    pub signatures: ::prost::alloc::vec::Vec<file_hashes::Signature>,
}

/// Nested message and enum types in `FileHashes`.
pub mod file_hashes {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Signature {
        #[prost(string, optional, tag = "1")]
        pub filename: ::core::option::Option<::prost::alloc::string::String>,
        #[prost(bool, optional, tag = "2")]
        pub test_signing: ::core::option::Option<bool>,
        #[prost(bytes = "vec", optional, tag = "3")]
        pub signature: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
        #[prost(bool, optional, tag = "4")]
        pub main_exe: ::core::option::Option<bool>,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum LicenseType {
    Streaming = 1,
    Offline = 2,
    Automatic = 3,
}
impl LicenseType {
    /// String value of the enum field names used in the ProtoBuf definition.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Self::Streaming => "STREAMING",
            Self::Offline => "OFFLINE",
            Self::Automatic => "AUTOMATIC",
        }
    }
    /// Creates an enum from field names used in the ProtoBuf definition.
    pub fn from_str_name(value: &str) -> ::core::option::Option<Self> {
        match value {
            "STREAMING" => Some(Self::Streaming),
            "OFFLINE" => Some(Self::Offline),
            "AUTOMATIC" => Some(Self::Automatic),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ProtocolVersion {
    Version20 = 20,
    Version21 = 21,
    Version22 = 22,
}
