//! Strongly-typed identifiers for blocks, interfaces, and interface points.

use std::fmt;

/// Identifies a structured block (subdomain) of the finite-difference grid.
///
/// Blocks are numbered by the external geometry layer; the interface
/// solver only uses the ID to key per-point state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u32);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for BlockId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies an interface (fault or bonded contact) between two blocks.
///
/// `InterfaceId(n)` corresponds to the n-th interface declared in the
/// input file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InterfaceId(pub u32);

impl fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for InterfaceId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Stable key of one interface grid point.
///
/// Points are addressed by the block that owns them and the block-local
/// in-plane indices. The key is independent of storage order, so state
/// arenas can be laid out however suits iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointKey {
    /// Owning block.
    pub block: BlockId,
    /// Block-local index along the first in-plane direction.
    pub i: u32,
    /// Block-local index along the second in-plane direction.
    pub j: u32,
}

impl PointKey {
    /// Construct a key from its parts.
    pub fn new(block: BlockId, i: u32, j: u32) -> Self {
        Self { block, i, j }
    }
}

impl fmt::Display for PointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block {} ({}, {})", self.block, self.i, self.j)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_key_display_names_block_and_indices() {
        let key = PointKey::new(BlockId(2), 5, 7);
        assert_eq!(key.to_string(), "block 2 (5, 7)");
    }

    #[test]
    fn point_keys_order_by_block_then_indices() {
        let a = PointKey::new(BlockId(0), 9, 9);
        let b = PointKey::new(BlockId(1), 0, 0);
        let c = PointKey::new(BlockId(1), 0, 1);
        assert!(a < b);
        assert!(b < c);
    }
}
