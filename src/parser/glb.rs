use crate::error::SignError;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;

pub const GLB_MAGIC: u32 = 0x4654_6C67; // "glTF"
pub const GLB_VERSION: u32 = 2;
pub const GLB_HEADER_LEN: usize = 12;

pub const CHUNK_JSON: u32 = 0x4E4F_534A;
pub const CHUNK_BIN: u32 = 0x004E_4942;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlbHeader {
    pub version: u32,
    pub length: u32,
}

/// Validate the 12-byte GLB header before the payload is decoded.
pub fn read_header(bytes: &[u8]) -> Result<GlbHeader, SignError> {
    if bytes.len() < GLB_HEADER_LEN {
        return Err(SignError::new("glb-truncated").with_arg("len", bytes.len()));
    }

    let mut cursor = Cursor::new(bytes);
    let magic = cursor.read_u32::<LittleEndian>()?;
    if magic != GLB_MAGIC {
        return Err(SignError::new("glb-magic").with_arg("magic", format!("{magic:#010x}")));
    }

    let version = cursor.read_u32::<LittleEndian>()?;
    if version != GLB_VERSION {
        return Err(SignError::new("glb-version")
            .with_arg("version", version)
            .with_arg("expected", GLB_VERSION));
    }

    let length = cursor.read_u32::<LittleEndian>()?;
    if length as usize > bytes.len() {
        return Err(SignError::new("glb-length")
            .with_arg("declared", length)
            .with_arg("actual", bytes.len()));
    }

    Ok(GlbHeader { version, length })
}
