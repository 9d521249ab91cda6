//! PSSH box parsing.
//!
//! A `pssh` box names the DRM system and the keys protecting a piece of
//! content. Version 1 boxes list raw 16-byte key ids in the header; version 0
//! boxes only carry init data, which for Widevine is a `WidevinePsshData`
//! message with its own key id list and optional content id.
use std::str::FromStr;

use base64::Engine;
use byteorder::{BigEndian, ByteOrder};
use prost::Message;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::license_protocol::WidevinePsshData;

/// Widevine system UUID.
pub const WIDEVINE_SYSTEM_ID: Uuid = Uuid::from_u128(0xedef8ba979d64acea3c827dcd51d21ed);

const BOX_TYPE: &[u8; 4] = b"pssh";
const KEY_ID_LEN: usize = 16;

/// Parsed protection-system-specific header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pssh {
    pub version: u8,
    pub flags: u32,
    pub system_id: Uuid,
    key_ids: Vec<Vec<u8>>,
    content_id: Option<Vec<u8>>,
    init_data: Vec<u8>,
    raw: Vec<u8>,
}

impl Pssh {
    /// Parse a serialized `pssh` box.
    ///
    /// A bare `WidevinePsshData` payload is also accepted and treated as the
    /// init data of a version 0 Widevine box.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::MalformedInput("PSSH data must not be empty".to_string()));
        }

        if data.len() >= 8 && &data[4..8] == BOX_TYPE {
            return parse_pssh_box(data);
        }

        if let Ok(pssh_data) = WidevinePsshData::decode(data) {
            if pssh_data.encode_to_vec() == data {
                return Pssh::new(WIDEVINE_SYSTEM_ID, None, data.to_vec(), 0, 0);
            }
        }

        Err(Error::MalformedInput("Not a PSSH box".to_string()))
    }

    /// Parse a base64-encoded `pssh` box.
    pub fn from_base64(data_b64: &str) -> Result<Self> {
        let data = base64::engine::general_purpose::STANDARD.decode(data_b64.trim())?;
        Self::from_bytes(&data)
    }

    /// Build a box from its parts.
    ///
    /// Version 0 boxes cannot carry a header key id list, and every header key
    /// id must be 16 bytes.
    pub fn new(
        system_id: Uuid,
        key_ids: Option<Vec<Vec<u8>>>,
        init_data: Vec<u8>,
        version: u8,
        flags: u32,
    ) -> Result<Self> {
        if version > 1 {
            return Err(Error::InvalidArgument(format!("Invalid PSSH version: {}", version)));
        }
        if version == 0 && key_ids.is_some() {
            return Err(Error::InvalidArgument(
                "Version 0 PSSH boxes must use only init_data".to_string(),
            ));
        }
        if flags > 0x00ff_ffff {
            return Err(Error::InvalidArgument("PSSH flags exceed 24 bits".to_string()));
        }

        let header_key_ids = key_ids.unwrap_or_default();
        if header_key_ids.iter().any(|kid| kid.len() != KEY_ID_LEN) {
            return Err(Error::InvalidArgument("Key ids must be 16 bytes".to_string()));
        }

        let raw = build_pssh_box(version, flags, &system_id, &header_key_ids, &init_data);
        resolve(version, flags, system_id, header_key_ids, init_data, raw)
    }

    /// Key ids in the order they appear; duplicates are kept.
    pub fn key_ids(&self) -> &[Vec<u8>] {
        &self.key_ids
    }

    /// Content id from the Widevine init data, if any.
    pub fn content_id(&self) -> Option<&[u8]> {
        self.content_id.as_deref()
    }

    /// System-specific init data carried by the box.
    pub fn init_data(&self) -> &[u8] {
        &self.init_data
    }

    /// The serialized box.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Serialize the box.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.raw.clone()
    }

    /// Serialize as base64.
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.raw)
    }
}

impl FromStr for Pssh {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Pssh::from_base64(s)
    }
}

fn parse_pssh_box(data: &[u8]) -> Result<Pssh> {
    let mut offset = 8;
    let size = BigEndian::read_u32(&data[0..4]) as u64;

    let box_size = match size {
        0 => data.len() as u64,
        1 => {
            if data.len() < 16 {
                return Err(Error::MalformedInput("PSSH large size truncated".to_string()));
            }
            offset += 8;
            BigEndian::read_u64(&data[8..16])
        }
        n => n,
    };

    if box_size != data.len() as u64 {
        return Err(Error::MalformedInput(format!(
            "PSSH size {} does not match data length {}",
            box_size,
            data.len()
        )));
    }

    if data.len() < offset + 4 + 16 {
        return Err(Error::MalformedInput("PSSH header incomplete".to_string()));
    }

    let version = data[offset];
    let flags = BigEndian::read_u24(&data[offset + 1..offset + 4]);
    offset += 4;
    if version > 1 {
        return Err(Error::MalformedInput(format!("Unsupported PSSH version: {}", version)));
    }

    let system_id = Uuid::from_slice(&data[offset..offset + 16])
        .map_err(|_| Error::MalformedInput("Invalid system ID".to_string()))?;
    offset += 16;

    let mut key_ids = Vec::new();
    if version == 1 {
        if data.len() < offset + 4 {
            return Err(Error::MalformedInput("Missing KID count".to_string()));
        }
        let kid_count = BigEndian::read_u32(&data[offset..offset + 4]) as usize;
        offset += 4;

        let kids_end = kid_count
            .checked_mul(KEY_ID_LEN)
            .and_then(|len| offset.checked_add(len))
            .filter(|end| *end <= data.len())
            .ok_or_else(|| Error::MalformedInput("Missing KIDs".to_string()))?;
        key_ids = data[offset..kids_end]
            .chunks_exact(KEY_ID_LEN)
            .map(<[u8]>::to_vec)
            .collect();
        offset = kids_end;
    }

    if data.len() < offset + 4 {
        return Err(Error::MalformedInput("Missing init data length".to_string()));
    }
    let data_size = BigEndian::read_u32(&data[offset..offset + 4]) as usize;
    offset += 4;
    if data.len() - offset != data_size {
        return Err(Error::MalformedInput(
            "Init data length does not match box size".to_string(),
        ));
    }
    let init_data = data[offset..].to_vec();

    resolve(version, flags, system_id, key_ids, init_data, data.to_vec())
}

/// Fill in key ids and content id from the version discriminant.
fn resolve(
    version: u8,
    flags: u32,
    system_id: Uuid,
    header_key_ids: Vec<Vec<u8>>,
    init_data: Vec<u8>,
    raw: Vec<u8>,
) -> Result<Pssh> {
    let pssh_data = if system_id == WIDEVINE_SYSTEM_ID && !init_data.is_empty() {
        Some(WidevinePsshData::decode(init_data.as_slice())?)
    } else {
        None
    };

    let key_ids = match (version, &pssh_data) {
        (1, _) => header_key_ids,
        (_, Some(data)) => data.key_ids.clone(),
        (_, None) => Vec::new(),
    };
    let content_id = pssh_data.and_then(|data| data.content_id);

    Ok(Pssh {
        version,
        flags,
        system_id,
        key_ids,
        content_id,
        init_data,
        raw,
    })
}

fn build_pssh_box(
    version: u8,
    flags: u32,
    system_id: &Uuid,
    key_ids: &[Vec<u8>],
    init_data: &[u8],
) -> Vec<u8> {
    let mut body = Vec::new();
    body.push(version);
    body.extend_from_slice(&flags.to_be_bytes()[1..]);
    body.extend_from_slice(system_id.as_bytes());

    if version == 1 {
        body.extend_from_slice(&(key_ids.len() as u32).to_be_bytes());
        for kid in key_ids {
            body.extend_from_slice(kid);
        }
    }

    body.extend_from_slice(&(init_data.len() as u32).to_be_bytes());
    body.extend_from_slice(init_data);

    let size = (body.len() + 8) as u32;
    let mut out = Vec::with_capacity(body.len() + 8);
    out.extend_from_slice(&size.to_be_bytes());
    out.extend_from_slice(BOX_TYPE);
    out.extend_from_slice(&body);
    out
}
