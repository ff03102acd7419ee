/// VisibilitySync: per-frame upload of the visible instance list.
///
/// Once per frame: query the spatial index with the camera's corners,
/// encode the result in the wire format, and replace the whole contents
/// of the attached GPU buffer with it. `sync` takes `&mut self`, so the
/// buffer has exactly one writer for the duration of an upload.
///
/// Until a buffer is attached (the backend may create it after the world
/// is loaded) every frame is skipped, which is not an error.

use std::sync::Arc;
use glam::Vec3;
use rdst::{RadixKey, RadixSort};
use crate::error::Result;
use crate::world::{InstanceRecord, SpatialIndex};
use super::buffer::{BufferUsage, VisibilityBuffer};
use super::model_registry::ModelRegistry;
use super::wire::{encode_records_into, RECORD_SIZE};

const SOURCE: &str = "galaxy3d::VisibilitySync";

/// Descriptor for creating a VisibilitySync
#[derive(Debug, Clone, Copy)]
pub struct VisibilitySyncDesc {
    /// Usage hint passed to every upload
    pub usage: BufferUsage,
    /// Group records by model index before upload (instanced draws
    /// can then walk contiguous runs)
    pub sort_by_model: bool,
}

impl Default for VisibilitySyncDesc {
    fn default() -> Self {
        Self {
            usage: BufferUsage::Storage,
            sort_by_model: false,
        }
    }
}

/// Result of one frame's sync
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The buffer now holds exactly `record_count` records
    Uploaded { record_count: usize, byte_len: usize },
    /// No buffer attached; nothing was queried or uploaded
    Skipped,
}

// Sort key: model index with the sign bit flipped so negative indices
// order before positive ones.
impl RadixKey for InstanceRecord {
    const LEVELS: usize = 4;

    #[inline]
    fn get_level(&self, level: usize) -> u8 {
        let key = (self.model_index as u32) ^ 0x8000_0000;
        (key >> (level * 8)) as u8
    }
}

pub struct VisibilitySync {
    desc: VisibilitySyncDesc,
    buffer: Option<Arc<dyn VisibilityBuffer>>,
    /// Scratch storage reused across frames
    records: Vec<InstanceRecord>,
    bytes: Vec<u8>,
    frames_uploaded: u64,
    frames_skipped: u64,
    last_record_count: usize,
}

impl VisibilitySync {
    pub fn new(desc: VisibilitySyncDesc) -> Self {
        Self {
            desc,
            buffer: None,
            records: Vec::new(),
            bytes: Vec::new(),
            frames_uploaded: 0,
            frames_skipped: 0,
            last_record_count: 0,
        }
    }

    /// Attach the buffer to upload into, replacing any previous one
    pub fn attach_buffer(&mut self, buffer: Arc<dyn VisibilityBuffer>) {
        if self.buffer.is_some() {
            crate::engine_debug!(SOURCE, "Replacing attached visibility buffer");
        }
        self.buffer = Some(buffer);
    }

    /// Detach and return the current buffer (e.g. on swapchain rebuild)
    pub fn detach_buffer(&mut self) -> Option<Arc<dyn VisibilityBuffer>> {
        self.buffer.take()
    }

    pub fn has_buffer(&self) -> bool {
        self.buffer.is_some()
    }

    /// Query `index` with the 8 query corners and upload the result.
    ///
    /// # Errors
    ///
    /// - `UnresolvedModel` if a visible model has no registry index
    ///   (the buffer keeps last frame's contents)
    /// - Any error returned by the buffer upload
    pub fn sync(
        &mut self,
        index: &SpatialIndex,
        registry: &dyn ModelRegistry,
        corners: &[Vec3],
    ) -> Result<SyncOutcome> {
        let Some(buffer) = self.buffer.clone() else {
            self.frames_skipped += 1;
            crate::engine_debug!(SOURCE, "No visibility buffer attached, frame skipped");
            return Ok(SyncOutcome::Skipped);
        };

        self.records.clear();
        index.query_into(corners, registry, &mut self.records)?;

        if self.desc.sort_by_model {
            self.records.radix_sort_unstable();
        }

        encode_records_into(&self.records, &mut self.bytes);
        debug_assert_eq!(self.bytes.len(), self.records.len() * RECORD_SIZE);

        if let Err(error) = buffer.replace_contents(&self.bytes, self.desc.usage) {
            crate::engine_error!(SOURCE, "Visibility upload failed: {}", error);
            return Err(error);
        }

        self.frames_uploaded += 1;
        self.last_record_count = self.records.len();
        crate::engine_trace!(SOURCE, "Uploaded {} visible instance(s) ({} bytes)",
            self.records.len(), self.bytes.len());

        Ok(SyncOutcome::Uploaded {
            record_count: self.records.len(),
            byte_len: self.bytes.len(),
        })
    }

    /// Frames successfully uploaded
    pub fn frames_uploaded(&self) -> u64 {
        self.frames_uploaded
    }

    /// Frames skipped for lack of a buffer
    pub fn frames_skipped(&self) -> u64 {
        self.frames_skipped
    }

    /// Record count of the last successful upload
    pub fn last_record_count(&self) -> usize {
        self.last_record_count
    }
}

impl Default for VisibilitySync {
    fn default() -> Self {
        Self::new(VisibilitySyncDesc::default())
    }
}

#[cfg(test)]
#[path = "visibility_sync_tests.rs"]
mod tests;
