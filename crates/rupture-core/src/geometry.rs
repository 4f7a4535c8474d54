//! Interface geometry: which block points make up an interface.
//!
//! An interface is a 2D sheet of `shape = [n1, n2]` grid points. Each
//! owning block contributes a rectangular [`Patch`] of it; a point's
//! block-local `(i, j)` maps to the global in-plane index
//! `(origin[0] + i, origin[1] + j)`.

use smallvec::SmallVec;

use crate::error::ConfigError;
use crate::id::{BlockId, PointKey};

/// A rectangular piece of an interface owned by one block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Patch {
    /// Owning block.
    pub block: BlockId,
    /// Global in-plane index of the patch's local `(0, 0)`.
    pub origin: [usize; 2],
    /// Number of points along each in-plane direction.
    pub extent: [usize; 2],
}

impl Patch {
    fn overlaps(&self, other: &Patch) -> bool {
        (0..2).all(|d| {
            self.origin[d] < other.origin[d] + other.extent[d]
                && other.origin[d] < self.origin[d] + self.extent[d]
        })
    }
}

/// Layout of an interface's grid points across blocks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterfaceGeometry {
    shape: [usize; 2],
    patches: SmallVec<[Patch; 4]>,
}

impl InterfaceGeometry {
    /// Create an empty geometry of the given in-plane shape.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Geometry`] if either extent is zero.
    pub fn new(shape: [usize; 2]) -> Result<Self, ConfigError> {
        if shape[0] == 0 || shape[1] == 0 {
            return Err(ConfigError::Geometry {
                reason: format!("interface shape {shape:?} has no points"),
            });
        }
        Ok(Self {
            shape,
            patches: SmallVec::new(),
        })
    }

    /// A geometry where one block owns the whole interface.
    pub fn single_block(block: BlockId, shape: [usize; 2]) -> Result<Self, ConfigError> {
        Self::new(shape)?.with_patch(Patch {
            block,
            origin: [0, 0],
            extent: shape,
        })
    }

    /// Add a patch.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Geometry`] if the patch is empty, extends
    /// past the interface shape, or overlaps an existing patch.
    pub fn with_patch(mut self, patch: Patch) -> Result<Self, ConfigError> {
        if patch.extent[0] == 0 || patch.extent[1] == 0 {
            return Err(ConfigError::Geometry {
                reason: format!("patch of block {} is empty", patch.block),
            });
        }
        for d in 0..2 {
            if patch.origin[d] + patch.extent[d] > self.shape[d] {
                return Err(ConfigError::Geometry {
                    reason: format!(
                        "patch of block {} extends to {} along axis {d}, interface has {}",
                        patch.block,
                        patch.origin[d] + patch.extent[d],
                        self.shape[d]
                    ),
                });
            }
        }
        if let Some(other) = self.patches.iter().find(|p| p.overlaps(&patch)) {
            return Err(ConfigError::Geometry {
                reason: format!(
                    "patch of block {} overlaps patch of block {}",
                    patch.block, other.block
                ),
            });
        }
        self.patches.push(patch);
        Ok(self)
    }

    /// In-plane shape `[n1, n2]`.
    pub fn shape(&self) -> [usize; 2] {
        self.shape
    }

    /// Registered patches in insertion order.
    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    /// Number of points covered by patches.
    pub fn point_count(&self) -> usize {
        self.patches.iter().map(|p| p.extent[0] * p.extent[1]).sum()
    }

    /// Every point with its global in-plane index, patch by patch in
    /// row-major order.
    pub fn points(&self) -> impl Iterator<Item = (PointKey, [usize; 2])> + '_ {
        self.patches.iter().flat_map(|p| {
            (0..p.extent[0]).flat_map(move |i| {
                (0..p.extent[1]).map(move |j| {
                    (
                        PointKey::new(p.block, i as u32, j as u32),
                        [p.origin[0] + i, p.origin[1] + j],
                    )
                })
            })
        })
    }

    /// Global in-plane index of a point, if it belongs to this interface.
    pub fn global_index(&self, key: PointKey) -> Option<[usize; 2]> {
        let (i, j) = (key.i as usize, key.j as usize);
        self.patches
            .iter()
            .find(|p| p.block == key.block && i < p.extent[0] && j < p.extent[1])
            .map(|p| [p.origin[0] + i, p.origin[1] + j])
    }

    /// Row-major flat offset of a global index.
    pub fn flat_index(&self, global: [usize; 2]) -> usize {
        global[0] * self.shape[1] + global[1]
    }
}
