//! Render-side boundary of the static world
//!
//! Model registry, the visibility wire format, and the per-frame upload
//! of visible instances into a GPU buffer.

mod buffer;
mod model_registry;
mod visibility_sync;
pub mod wire;

#[cfg(test)]
pub(crate) mod mock_buffer;

pub use buffer::{BufferUsage, VisibilityBuffer};
pub use model_registry::{ModelRegistry, ModelTable};
pub use visibility_sync::{VisibilitySync, VisibilitySyncDesc, SyncOutcome};
pub use wire::{WireRecord, RECORD_SIZE, encode_records, encode_records_into, decode_records};
pub use crate::utils::MAX_WIRE_INDEX;
