//! Script chunk parsing and push encoding.
//!
//! A chunk is either a bare opcode or a data push together with the opcode
//! that introduced it (a direct length byte or one of OP_PUSHDATA1/2/4).

use crate::opcodes::*;
use crate::ScriptError;

/// A single parsed element of a script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptChunk {
    /// A non-push opcode.
    Op(u8),
    /// A data push; `op` is the length byte or PUSHDATA opcode used.
    Push { op: u8, data: Vec<u8> },
}

impl ScriptChunk {
    /// The opcode byte that introduced this chunk.
    pub fn op(&self) -> u8 {
        match self {
            ScriptChunk::Op(op) => *op,
            ScriptChunk::Push { op, .. } => *op,
        }
    }

    /// The pushed bytes, if this is a data push.
    pub fn data(&self) -> Option<&[u8]> {
        match self {
            ScriptChunk::Op(_) => None,
            ScriptChunk::Push { data, .. } => Some(data.as_slice()),
        }
    }

    /// The integer pushed by OP_1..=OP_16, if this chunk is one of them.
    pub fn small_int(&self) -> Option<usize> {
        match self {
            ScriptChunk::Op(op) => small_int_value(*op),
            ScriptChunk::Push { .. } => None,
        }
    }

    /// ASM token: hex for data pushes, the OP_xxx name otherwise.
    pub fn to_asm_string(&self) -> String {
        match self {
            ScriptChunk::Push { data, .. } => hex::encode(data),
            ScriptChunk::Op(op) => opcode_to_string(*op).to_string(),
        }
    }
}

/// Decode raw script bytes into chunks.
///
/// # Arguments
/// * `bytes` - The raw script bytes.
///
/// # Returns
/// The chunks in order, or `DataTooSmall` if a push runs past the end.
pub fn decode_script(bytes: &[u8]) -> Result<Vec<ScriptChunk>, ScriptError> {
    let mut chunks = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        chunks.push(read_chunk(bytes, &mut pos)?);
    }
    Ok(chunks)
}

/// Read one chunk starting at `pos`, advancing it past the consumed bytes.
fn read_chunk(bytes: &[u8], pos: &mut usize) -> Result<ScriptChunk, ScriptError> {
    let op = bytes[*pos];
    *pos += 1;

    let length = match op {
        OP_DATA_1..=OP_DATA_75 => op as usize,
        OP_PUSHDATA1 => read_le(bytes, pos, 1)?,
        OP_PUSHDATA2 => read_le(bytes, pos, 2)?,
        OP_PUSHDATA4 => read_le(bytes, pos, 4)?,
        _ => return Ok(ScriptChunk::Op(op)),
    };

    let end = pos.checked_add(length).ok_or(ScriptError::DataTooSmall)?;
    let data = bytes.get(*pos..end).ok_or(ScriptError::DataTooSmall)?.to_vec();
    *pos = end;
    Ok(ScriptChunk::Push { op, data })
}

/// Read a `width`-byte little-endian length prefix.
fn read_le(bytes: &[u8], pos: &mut usize, width: usize) -> Result<usize, ScriptError> {
    let raw = bytes.get(*pos..*pos + width).ok_or(ScriptError::DataTooSmall)?;
    *pos += width;
    Ok(raw
        .iter()
        .rev()
        .fold(0usize, |acc, &b| (acc << 8) | b as usize))
}

/// Compute the minimal push prefix for a payload of `data_len` bytes.
///
/// # Returns
/// A direct length byte for up to 75 bytes, otherwise the smallest
/// OP_PUSHDATA form, or `DataTooBig` above 4 GiB.
pub fn push_data_prefix(data_len: usize) -> Result<Vec<u8>, ScriptError> {
    if data_len <= OP_DATA_75 as usize {
        Ok(vec![data_len as u8])
    } else if data_len <= 0xFF {
        Ok(vec![OP_PUSHDATA1, data_len as u8])
    } else if data_len <= 0xFFFF {
        let mut buf = vec![OP_PUSHDATA2];
        buf.extend_from_slice(&(data_len as u16).to_le_bytes());
        Ok(buf)
    } else if data_len <= 0xFFFF_FFFF {
        let mut buf = vec![OP_PUSHDATA4];
        buf.extend_from_slice(&(data_len as u32).to_le_bytes());
        Ok(buf)
    } else {
        Err(ScriptError::DataTooBig)
    }
}
