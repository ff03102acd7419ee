/// BoundingRegion: axis-aligned box described by center and half-extents.
///
/// Immutable value type. Splits into 8 octants by the sign of the offset
/// from its center. Octant numbering (x outer, then y, then z, "+" first):
///
/// | index | x | y | z |
/// |-------|---|---|---|
/// | 0     | + | + | + |
/// | 1     | + | + | − |
/// | 2     | + | − | + |
/// | 3     | + | − | − |
/// | 4     | − | + | + |
/// | 5     | − | + | − |
/// | 6     | − | − | + |
/// | 7     | − | − | − |
///
/// An axis selects the "+" half only when `coord > center.coord`; a
/// coordinate equal to the center falls on the "−" side.

use glam::{BVec3, Vec3};

/// Number of children of every internal node
pub const OCTANT_COUNT: usize = 8;

/// Axis-aligned box.
///
/// The corners are stored as given and the center is fixed at
/// construction. Children take their bounds straight from the parent's
/// corners and center, so a point routed into an octant always lies
/// inside that octant's region, whatever the f32 rounding of the center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingRegion {
    min: Vec3,
    max: Vec3,
    center: Vec3,
}

impl BoundingRegion {
    /// Create a region from its center and half-extents.
    ///
    /// Negative half-extents are folded to their absolute value.
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        let half_extents = half_extents.abs();
        Self {
            min: center - half_extents,
            max: center + half_extents,
            center,
        }
    }

    /// Cube centered at `center` with the same half-extent on every axis
    pub fn cube(center: Vec3, half_extent: f32) -> Self {
        Self::new(center, Vec3::splat(half_extent))
    }

    /// Region spanning two opposite corners (in any order)
    pub fn from_min_max(a: Vec3, b: Vec3) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self {
            min,
            max,
            center: midpoint(min, max),
        }
    }

    /// Tight axis-aligned bounds of a point set.
    ///
    /// Returns `None` for an empty set or when any coordinate is not finite.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        if !first.is_finite() {
            return None;
        }

        let mut min = *first;
        let mut max = *first;
        for p in rest {
            if !p.is_finite() {
                return None;
            }
            min = min.min(*p);
            max = max.max(*p);
        }

        Some(Self::from_min_max(min, max))
    }

    // ===== ACCESSORS =====

    /// Splitting point used for octant addressing
    pub fn center(&self) -> Vec3 { self.center }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Minimum corner
    pub fn min(&self) -> Vec3 { self.min }

    /// Maximum corner
    pub fn max(&self) -> Vec3 { self.max }

    // ===== OCTANT ADDRESSING =====

    /// Octant index (0..8) of a point relative to this region's center.
    ///
    /// Strict `>` per axis: points on a splitting plane go to the "−" side.
    pub fn octant_of(&self, point: Vec3) -> usize {
        let x_neg = !(point.x > self.center.x) as usize;
        let y_neg = !(point.y > self.center.y) as usize;
        let z_neg = !(point.z > self.center.z) as usize;
        (x_neg << 2) | (y_neg << 1) | z_neg
    }

    /// Region of a child octant: the "+" half of an axis spans
    /// `[center, max]`, the "−" half spans `[min, center]`.
    pub fn child_region(&self, octant: usize) -> BoundingRegion {
        debug_assert!(octant < OCTANT_COUNT, "octant out of range: {}", octant);

        let select = BVec3::new(
            octant & 0b100 == 0,
            octant & 0b010 == 0,
            octant & 0b001 == 0,
        );
        let min = Vec3::select(select, self.center, self.min);
        let max = Vec3::select(select, self.max, self.center);

        BoundingRegion {
            min,
            max,
            center: midpoint(min, max),
        }
    }

    // ===== TESTS =====

    /// Box/box overlap. Touching faces count as overlapping.
    pub fn overlaps(&self, other: &BoundingRegion) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }

    /// Inclusive point containment. NaN coordinates are never contained.
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x
            && point.y >= self.min.y && point.y <= self.max.y
            && point.z >= self.min.z && point.z <= self.max.z
    }

    /// Whether `other` lies entirely within this region
    pub fn contains_region(&self, other: &BoundingRegion) -> bool {
        self.min.cmple(other.min).all() && self.max.cmpge(other.max).all()
    }
}

// Stays within [min, max] for finite inputs
fn midpoint(min: Vec3, max: Vec3) -> Vec3 {
    (min * 0.5 + max * 0.5).clamp(min, max)
}

#[cfg(test)]
#[path = "bounding_region_tests.rs"]
mod tests;
