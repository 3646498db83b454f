//! Sidewind Scroll Core (engine-agnostic)
//!
//! An infinite-horizon scrolling-strip engine: a 1-D strip of tiles is laid
//! out once from a list of repeating prototypes, then rendered by activating
//! only the tiles visible under an advancing scroll offset, recycling their
//! handles through a fixed-capacity pool. Hosts drive `Engine::update(dt,
//! inputs)` from their frame loop and consume `Outputs` afterward.

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod ids;
pub mod inputs;
pub mod layout;
pub mod outputs;
pub mod pool;
pub mod stored_strip;

// Re-exports for consumers (adapters)
pub use config::{CameraConfig, Config, LayerCfg, Viewport};
pub use data::{Margins, PrototypeDesc, StripData, StripIngredient, TileIngredient};
pub use engine::{Engine, Layer};
pub use error::{ConfigError, CoreError, PoolError};
pub use ids::{Handle, IdAllocator, LayerId, PrototypeId};
pub use inputs::{Inputs, LayerCommand};
pub use layout::{build_slots, required_pool_count, spans_intersect, Layout, TileSlot};
pub use outputs::{CoreEvent, Outputs, Placement};
pub use pool::HandlePool;
pub use stored_strip::parse_stored_strip_json;
