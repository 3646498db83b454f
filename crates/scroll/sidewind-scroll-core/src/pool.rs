//! Fixed-capacity handle pool, keyed by prototype.
//!
//! The pool is non-lazy to avoid sudden instantiation spikes: capacity is set
//! by `warm` during initialization and never grows afterward. Steady-state
//! ticks only flip entries between active and inactive.

use hashbrown::HashMap;

use crate::error::PoolError;
use crate::ids::{Handle, PrototypeId};

/// Where released handles are parked. Off-world so a leaked reference cannot
/// visibly misplace a tile.
pub const PARK_POSITION: [f32; 2] = [-1.0e4, 0.0];

#[derive(Debug)]
struct Entry {
    handle: Handle,
    active: bool,
    position: [f32; 2],
}

/// Per-layer pool of reusable resource handles.
#[derive(Debug, Default)]
pub struct HandlePool {
    entries: HashMap<PrototypeId, Vec<Entry>>,
    next_handle: u32,
}

impl HandlePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure at least `count` handles exist for `prototype`, instantiating
    /// the remainder as inactive. Idempotent; the larger count wins when the
    /// same prototype is warmed repeatedly.
    pub fn warm(&mut self, prototype: PrototypeId, count: usize) {
        let pool = self.entries.entry(prototype).or_default();
        while pool.len() < count {
            let handle = Handle(self.next_handle);
            self.next_handle = self.next_handle.wrapping_add(1);
            pool.push(Entry {
                handle,
                active: false,
                position: PARK_POSITION,
            });
        }
    }

    /// Mark an inactive handle active and return it.
    pub fn acquire(&mut self, prototype: PrototypeId) -> Result<Handle, PoolError> {
        let pool = self
            .entries
            .get_mut(&prototype)
            .ok_or(PoolError::UnknownPrototype { prototype })?;
        for entry in pool.iter_mut() {
            if !entry.active {
                entry.active = true;
                return Ok(entry.handle);
            }
        }
        Err(PoolError::Exhausted { prototype })
    }

    /// Mark an active handle inactive and park it at the canonical reset
    /// position. Double releases and cross-prototype releases are bugs and
    /// surface as InvalidHandle.
    pub fn release(&mut self, prototype: PrototypeId, handle: Handle) -> Result<(), PoolError> {
        let pool = self
            .entries
            .get_mut(&prototype)
            .ok_or(PoolError::UnknownPrototype { prototype })?;
        for entry in pool.iter_mut() {
            if entry.handle == handle {
                if !entry.active {
                    return Err(PoolError::InvalidHandle { prototype, handle });
                }
                entry.active = false;
                entry.position = PARK_POSITION;
                return Ok(());
            }
        }
        Err(PoolError::InvalidHandle { prototype, handle })
    }

    /// Write the x coordinate of an active handle (the position pass).
    pub fn set_x(&mut self, prototype: PrototypeId, handle: Handle, x: f32) -> Result<(), PoolError> {
        let pool = self
            .entries
            .get_mut(&prototype)
            .ok_or(PoolError::UnknownPrototype { prototype })?;
        match pool.iter_mut().find(|e| e.handle == handle && e.active) {
            Some(entry) => {
                entry.position[0] = x;
                Ok(())
            }
            None => Err(PoolError::InvalidHandle { prototype, handle }),
        }
    }

    /// Mutable 2-D position of an active handle, for hosts that also drive y.
    pub fn position_mut(&mut self, prototype: PrototypeId, handle: Handle) -> Option<&mut [f32; 2]> {
        self.entries
            .get_mut(&prototype)?
            .iter_mut()
            .find(|e| e.handle == handle && e.active)
            .map(|e| &mut e.position)
    }

    pub fn capacity(&self, prototype: PrototypeId) -> usize {
        self.entries.get(&prototype).map_or(0, |pool| pool.len())
    }

    pub fn active_count(&self, prototype: PrototypeId) -> usize {
        self.entries
            .get(&prototype)
            .map_or(0, |pool| pool.iter().filter(|e| e.active).count())
    }

    /// All active handles with their positions, for the renderer.
    pub fn iter_active(&self) -> impl Iterator<Item = (PrototypeId, Handle, [f32; 2])> + '_ {
        self.entries.iter().flat_map(|(proto, pool)| {
            pool.iter()
                .filter(|e| e.active)
                .map(move |e| (*proto, e.handle, e.position))
        })
    }
}
