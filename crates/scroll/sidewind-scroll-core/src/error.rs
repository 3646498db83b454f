//! Error taxonomy. Everything here is fatal: a configuration mistake or an
//! internal invariant violation, never a transient condition. Callers abort
//! initialization or the tick rather than continue with partial tile state.

use thiserror::Error;

use crate::ids::{Handle, LayerId, PrototypeId};

/// Setup-time failures. A layer refuses to start rather than run with an
/// undefined layout.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("viewport width must be positive, got {width}")]
    InvalidWindow { width: f64 },
    #[error("prototype '{name}' has no usable geometry: {reason}")]
    MissingGeometry { name: String, reason: String },
    #[error("prototype '{name}' net extent is not positive once inner margins are removed")]
    DegenerateExtent { name: String },
    #[error("invalid strip '{name}': {reason}")]
    InvalidStrip { name: String, reason: String },
}

/// Pool bookkeeping failures.
#[derive(Debug, Error)]
pub enum PoolError {
    /// Every handle for the prototype is already active. The capacity sizing
    /// invariant was violated; masking this would drop visible content or
    /// double-use a handle.
    #[error("pool exhausted for prototype {prototype:?}")]
    Exhausted { prototype: PrototypeId },
    #[error("prototype {prototype:?} was never warmed into this pool")]
    UnknownPrototype { prototype: PrototypeId },
    /// Double release, or a release against the wrong prototype's pool.
    #[error("handle {handle:?} is not an active member of prototype {prototype:?}'s pool")]
    InvalidHandle {
        prototype: PrototypeId,
        handle: Handle,
    },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error("unknown layer {0:?}")]
    UnknownLayer(LayerId),
    #[error("unknown prototype {0:?}")]
    UnknownPrototype(PrototypeId),
}
