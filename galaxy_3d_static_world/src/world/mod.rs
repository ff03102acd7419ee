//! Static world module
//!
//! Octree spatial index over placed model instances, visibility queries,
//! and the two ways of sharing the index with the render loop
//! (`SharedSpatialIndex` lock, `StaticWorld` deferred edits).

mod bounding_region;
mod model_instance;
mod tree_node;
mod query_volume;
mod spatial_index;
mod shared_spatial_index;
mod static_world;

pub use bounding_region::{BoundingRegion, OCTANT_COUNT};
pub use model_instance::{ModelHandle, ModelInstance, InstanceRecord};
pub use query_volume::{QueryVolume, QUERY_CORNER_COUNT};
pub use spatial_index::{
    SpatialIndex, SpatialIndexDesc, SpatialIndexStats,
    DEFAULT_WORLD_HALF_EXTENT, DEFAULT_MAX_DEPTH,
};
pub use shared_spatial_index::SharedSpatialIndex;
pub use static_world::{StaticWorld, WorldEdit, WorldEditQueue, EditReport};
