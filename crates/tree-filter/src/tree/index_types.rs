//! Node index types for type-safe tree addressing.

/// A compact 32-bit index into the node slab.
///
/// The u32::MAX value is reserved for `OptionNodeId` and used as an
/// invalid/sentinel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Invalid index sentinel value (u32::MAX).
    pub const INVALID: Self = Self(u32::MAX);

    /// Creates a new NodeId from a usize.
    ///
    /// # Panics
    /// Panics if `index >= u32::MAX` (reserved for None sentinel).
    #[inline]
    pub fn new(index: usize) -> Self {
        assert!(
            index < u32::MAX as usize,
            "node index must be less than u32::MAX"
        );
        Self(index as u32)
    }

    /// Returns the index as a usize.
    #[inline]
    pub fn get(&self) -> usize {
        self.0 as usize
    }
}

/// An optional node index using u32::MAX as the None sentinel.
///
/// Fits in 4 bytes instead of the 8 an `Option<NodeId>` would take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct OptionNodeId(u32);

impl OptionNodeId {
    #[inline]
    pub fn none() -> Self {
        Self(NodeId::INVALID.0)
    }

    #[inline]
    pub fn some(index: NodeId) -> Self {
        Self(index.0)
    }

    #[inline]
    pub fn from_option(index: Option<NodeId>) -> Self {
        index.map_or(Self::none(), Self::some)
    }

    #[inline]
    pub fn to_option(self) -> Option<NodeId> {
        if self.0 == NodeId::INVALID.0 {
            None
        } else {
            Some(NodeId(self.0))
        }
    }
}
