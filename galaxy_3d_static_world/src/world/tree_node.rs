/// Tree nodes of the spatial index.
///
/// Exactly two shapes exist, so they form a closed enum:
/// - `Leaf`: one placed instance, no region of its own
/// - `Internal`: a region and 8 exclusively-owned child slots
///
/// Internal nodes are only created by splitting an occupied leaf slot and
/// are never collapsed again; an emptied internal node simply stays.

use glam::Vec3;
use super::bounding_region::{BoundingRegion, OCTANT_COUNT};
use super::model_instance::{ModelHandle, ModelInstance};

pub(crate) enum TreeNode {
    Leaf(LeafNode),
    Internal(Box<InternalNode>),
}

pub(crate) struct LeafNode {
    pub(crate) instance: ModelInstance,
}

pub(crate) struct InternalNode {
    pub(crate) region: BoundingRegion,
    pub(crate) children: [Option<TreeNode>; OCTANT_COUNT],
}

/// Why an instance could not be placed. The tree is left untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum InsertFailure {
    /// Another instance (of this model) already sits at the exact position
    Duplicate(ModelHandle),
    /// Separating the instances would need an internal node at this depth
    DepthLimit(u32),
}

/// Structural summary gathered by a full walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct TreeShape {
    pub(crate) internal_nodes: usize,
    pub(crate) leaves: usize,
    pub(crate) deepest_leaf: u32,
}

impl InternalNode {
    pub(crate) fn new(region: BoundingRegion) -> Self {
        Self {
            region,
            children: Default::default(),
        }
    }

    /// Place `instance` below this node (which sits at `depth`).
    ///
    /// An empty slot takes a new leaf. An occupied leaf slot is split: a
    /// new internal node covering the slot's octant receives the displaced
    /// instance, the new one is inserted into it, and only on success does
    /// the internal node replace the leaf. Returns the depth of the new leaf.
    pub(crate) fn insert(
        &mut self,
        instance: ModelInstance,
        depth: u32,
        max_depth: u32,
    ) -> Result<u32, InsertFailure> {
        let octant = self.region.octant_of(instance.position);
        let slot = &mut self.children[octant];

        match slot {
            None => {
                *slot = Some(TreeNode::Leaf(LeafNode { instance }));
                Ok(depth + 1)
            }
            Some(TreeNode::Internal(child)) => child.insert(instance, depth + 1, max_depth),
            Some(TreeNode::Leaf(leaf)) => {
                let displaced = leaf.instance;

                // Identical points never separate, however deep we go
                if displaced.position == instance.position {
                    return Err(InsertFailure::Duplicate(displaced.model));
                }
                if depth + 1 > max_depth {
                    return Err(InsertFailure::DepthLimit(depth + 1));
                }

                let mut child = Box::new(InternalNode::new(self.region.child_region(octant)));
                let displaced_octant = child.region.octant_of(displaced.position);
                child.children[displaced_octant] = Some(TreeNode::Leaf(LeafNode { instance: displaced }));

                let placed_depth = child.insert(instance, depth + 1, max_depth)?;
                *slot = Some(TreeNode::Internal(child));
                Ok(placed_depth)
            }
        }
    }

    /// Empty the leaf slot holding `model` at exactly `position`.
    ///
    /// Follows the octant path of `position`, so cost is O(depth).
    pub(crate) fn remove(&mut self, model: ModelHandle, position: Vec3) -> bool {
        let octant = self.region.octant_of(position);
        let slot = &mut self.children[octant];

        match slot {
            None => false,
            Some(TreeNode::Internal(child)) => child.remove(model, position),
            Some(TreeNode::Leaf(leaf)) => {
                let matches = leaf.instance.model == model && leaf.instance.position == position;
                if matches {
                    *slot = None;
                }
                matches
            }
        }
    }

    /// Append every instance under this node whose position lies in `volume`.
    ///
    /// Child subtrees whose region misses the volume are skipped entirely;
    /// subtrees fully inside the volume are collected without further tests.
    pub(crate) fn query(&self, volume: &BoundingRegion, results: &mut Vec<ModelInstance>) {
        for child in self.children.iter().flatten() {
            match child {
                TreeNode::Leaf(leaf) => {
                    if volume.contains_point(leaf.instance.position) {
                        results.push(leaf.instance);
                    }
                }
                TreeNode::Internal(node) => {
                    if volume.contains_region(&node.region) {
                        node.collect_all(results);
                    } else if node.region.overlaps(volume) {
                        node.query(volume, results);
                    }
                }
            }
        }
    }

    /// Append every instance under this node, depth-first in octant order
    pub(crate) fn collect_all(&self, results: &mut Vec<ModelInstance>) {
        for child in self.children.iter().flatten() {
            match child {
                TreeNode::Leaf(leaf) => results.push(leaf.instance),
                TreeNode::Internal(node) => node.collect_all(results),
            }
        }
    }

    /// Accumulate node counts for this subtree (this node sits at `depth`)
    pub(crate) fn shape(&self, depth: u32, shape: &mut TreeShape) {
        shape.internal_nodes += 1;
        for child in self.children.iter().flatten() {
            match child {
                TreeNode::Leaf(_) => {
                    shape.leaves += 1;
                    shape.deepest_leaf = shape.deepest_leaf.max(depth + 1);
                }
                TreeNode::Internal(node) => node.shape(depth + 1, shape),
            }
        }
    }
}
