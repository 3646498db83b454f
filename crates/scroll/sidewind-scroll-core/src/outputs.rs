//! Output contracts from the core engine.
//!
//! Outputs carry the per-tick placements of every active handle plus a list
//! of semantic events. Hosts (renderer, audio, scene logic) consume them
//! after update() returns; the buffers are cleared at the start of each tick.

use serde::{Deserialize, Serialize};

use crate::ids::{Handle, LayerId, PrototypeId};

/// Render position of one active handle this tick. The x coordinate is the
/// only place double precision is narrowed to f32, for the renderer.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Placement {
    pub layer: LayerId,
    pub prototype: PrototypeId,
    pub handle: Handle,
    pub x: f32,
}

/// Discrete semantic signals emitted during stepping.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[non_exhaustive]
pub enum CoreEvent {
    TileActivated {
        layer: LayerId,
        slot: usize,
        prototype: PrototypeId,
    },
    TileDeactivated {
        layer: LayerId,
        slot: usize,
        prototype: PrototypeId,
    },
    /// The layer's scroll passed its period and wrapped.
    LayerWrapped { layer: LayerId },
    /// A non-looping layer scrolled past its last slot; emitted once.
    LayerIdle { layer: LayerId },
}

/// Outputs returned by Engine::update().
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub placements: Vec<Placement>,
    #[serde(default)]
    pub events: Vec<CoreEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.placements.clear();
        self.events.clear();
    }

    #[inline]
    pub fn push_placement(&mut self, placement: Placement) {
        self.placements.push(placement);
    }

    #[inline]
    pub fn push_event(&mut self, event: CoreEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty() && self.events.is_empty()
    }
}
