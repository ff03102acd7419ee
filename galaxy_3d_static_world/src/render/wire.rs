/// Visibility wire format: the byte layout of the GPU-resident buffer.
///
/// A header-less, tightly packed array of 16-byte records:
///
/// | offset | type | field                 |
/// |--------|------|-----------------------|
/// | 0      | f32  | model index (as float)|
/// | 4      | f32  | position.x            |
/// | 8      | f32  | position.y            |
/// | 12     | f32  | position.z            |
///
/// The record count is `byte_len / 16`. Floats are in host byte order
/// (little-endian on every target the renderer runs on).

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use crate::error::{Error, Result};
use crate::world::InstanceRecord;

/// One record as laid out in the buffer
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct WireRecord {
    pub model_index: f32,
    pub position: [f32; 3],
}

/// Size in bytes of one encoded record
pub const RECORD_SIZE: usize = std::mem::size_of::<WireRecord>();

impl From<InstanceRecord> for WireRecord {
    fn from(record: InstanceRecord) -> Self {
        Self {
            model_index: record.model_index as f32,
            position: record.position.to_array(),
        }
    }
}

impl From<WireRecord> for InstanceRecord {
    fn from(record: WireRecord) -> Self {
        InstanceRecord::new(record.model_index as i32, Vec3::from_array(record.position))
    }
}

/// Encode `records` into a fresh byte blob of exactly `records.len() * 16` bytes
pub fn encode_records(records: &[InstanceRecord]) -> Vec<u8> {
    let mut bytes = Vec::new();
    encode_records_into(records, &mut bytes);
    bytes
}

/// Encode into `bytes`, replacing its contents (keeps the allocation)
pub fn encode_records_into(records: &[InstanceRecord], bytes: &mut Vec<u8>) {
    bytes.clear();
    bytes.reserve(records.len() * RECORD_SIZE);
    for record in records {
        bytes.extend_from_slice(bytemuck::bytes_of(&WireRecord::from(*record)));
    }
}

/// Decode a blob produced by `encode_records`, preserving record order.
///
/// # Errors
///
/// `InvalidWireData` if the length is not a multiple of 16.
pub fn decode_records(bytes: &[u8]) -> Result<Vec<InstanceRecord>> {
    if bytes.len() % RECORD_SIZE != 0 {
        return Err(Error::InvalidWireData(format!(
            "length {} is not a multiple of the {}-byte record size",
            bytes.len(), RECORD_SIZE
        )));
    }

    Ok(bytes
        .chunks_exact(RECORD_SIZE)
        .map(|chunk| bytemuck::pod_read_unaligned::<WireRecord>(chunk).into())
        .collect())
}

#[cfg(test)]
#[path = "wire_tests.rs"]
mod tests;
