//! Identifiers and simple allocators for core entities.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PrototypeId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct LayerId(pub u32);

/// A pooled resource handle. Opaque externally; dense per-pool internally.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Handle(pub u32);

/// Monotonic allocator for PrototypeId and LayerId.
/// Handle allocation lives in the pool, which owns the handle namespace.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_prototype: u32,
    next_layer: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_prototype(&mut self) -> PrototypeId {
        let id = PrototypeId(self.next_prototype);
        self.next_prototype = self.next_prototype.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_layer(&mut self) -> LayerId {
        let id = LayerId(self.next_layer);
        self.next_layer = self.next_layer.wrapping_add(1);
        id
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.alloc_prototype(), PrototypeId(0));
        assert_eq!(alloc.alloc_prototype(), PrototypeId(1));
        assert_eq!(alloc.alloc_layer(), LayerId(0));
        assert_eq!(alloc.alloc_layer(), LayerId(1));
        alloc.reset();
        assert_eq!(alloc.alloc_prototype(), PrototypeId(0));
    }
}
