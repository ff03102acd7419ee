/*!
# Galaxy 3D Static World

Spatial index for the static content of a Galaxy 3D world.

Placed model instances (rocks, trees, props) live in an octree that
subdivides lazily, only where two instances collide. Once per frame the
renderer asks which instances fall inside the camera's visible region,
and the answer is written into a GPU buffer as a flat array of 16-byte
records.

## Architecture

- **SpatialIndex**: octree over instance positions, fixed root region
- **QueryVolume**: the 8 corners of the visible region (from a view-projection matrix)
- **StaticWorld**: lock-free frame reads, deferred edits applied between frames
- **SharedSpatialIndex**: reader/writer-locked index for free-threaded access
- **ModelTable**: model handles → wire indices
- **VisibilitySync**: query, encode, replace the GPU buffer contents
*/

// Internal modules
mod error;
mod engine;
mod utils;
pub mod log;
pub mod world;
pub mod render;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton (logging)
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Spatial index and its concurrency wrappers
    pub mod world {
        pub use crate::world::*;
    }

    // Registry, wire format and GPU upload
    pub mod render {
        pub use crate::render::*;
    }
}

// Re-export math library at crate root
pub use glam;
