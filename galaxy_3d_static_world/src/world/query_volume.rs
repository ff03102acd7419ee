/// QueryVolume: the 8 corners of a viewer's visible region.
///
/// Usually the corners of a camera frustum. The spatial index only uses
/// their axis-aligned bounds, so any convex volume given by 8 points works.
///
/// Corner order for the built-in constructors follows the octant numbering
/// of `BoundingRegion` (x outer, then y, then z, "+" first); for frustums
/// "+z" is the near plane.

use glam::{Mat4, Vec3};
use super::bounding_region::BoundingRegion;

/// Number of corners a query volume is made of
pub const QUERY_CORNER_COUNT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryVolume {
    corners: [Vec3; QUERY_CORNER_COUNT],
    bounds: BoundingRegion,
}

impl QueryVolume {
    /// Build from arbitrary corners.
    ///
    /// Returns `None` unless exactly 8 finite points are given.
    pub fn from_corners(corners: &[Vec3]) -> Option<Self> {
        let corners: [Vec3; QUERY_CORNER_COUNT] = corners.try_into().ok()?;
        let bounds = BoundingRegion::from_points(&corners)?;
        Some(Self { corners, bounds })
    }

    /// The 8 corners of a box
    pub fn from_region(region: &BoundingRegion) -> Self {
        let (min, max) = (region.min(), region.max());
        let corners = std::array::from_fn(|i| Vec3::new(
            if i & 0b100 == 0 { max.x } else { min.x },
            if i & 0b010 == 0 { max.y } else { min.y },
            if i & 0b001 == 0 { max.z } else { min.z },
        ));
        Self { corners, bounds: *region }
    }

    /// World-space frustum corners of a view-projection matrix.
    ///
    /// Unprojects the NDC cube (x, y in -1..1, depth in 0..1, the glam /
    /// Vulkan convention). Returns `None` for a degenerate matrix.
    pub fn from_view_projection(view_projection: &Mat4) -> Option<Self> {
        let inverse = view_projection.inverse();
        let corners: [Vec3; QUERY_CORNER_COUNT] = std::array::from_fn(|i| {
            let ndc = Vec3::new(
                if i & 0b100 == 0 { 1.0 } else { -1.0 },
                if i & 0b010 == 0 { 1.0 } else { -1.0 },
                if i & 0b001 == 0 { 0.0 } else { 1.0 },
            );
            inverse.project_point3(ndc)
        });
        Self::from_corners(&corners)
    }

    pub fn corners(&self) -> &[Vec3; QUERY_CORNER_COUNT] {
        &self.corners
    }

    /// Axis-aligned bounds of the corners
    pub fn bounds(&self) -> &BoundingRegion {
        &self.bounds
    }
}

#[cfg(test)]
#[path = "query_volume_tests.rs"]
mod tests;
