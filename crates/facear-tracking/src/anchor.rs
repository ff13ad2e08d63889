use std::sync::atomic::{AtomicU64, Ordering};

use crate::pose::Pose;

static NEXT_ANCHOR_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier of an anchor within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorId(u64);

impl AnchorId {
    fn next() -> Self {
        Self(NEXT_ANCHOR_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw id value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for AnchorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "anchor#{}", self.0)
    }
}

/// A fixed point in world space the tracking session keeps reporting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    id: AnchorId,
    /// The anchor pose in world space.
    pub transform: Pose,
}

impl Anchor {
    /// Create a new anchor with a fresh id.
    pub fn new(transform: Pose) -> Self {
        Self {
            id: AnchorId::next(),
            transform,
        }
    }

    /// The anchor id.
    #[inline]
    pub fn id(&self) -> AnchorId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_ids_are_unique() {
        let a = Anchor::new(Pose::IDENTITY);
        let b = Anchor::new(Pose::IDENTITY);
        assert_ne!(a.id(), b.id());
        assert!(b.id() > a.id());
    }
}
