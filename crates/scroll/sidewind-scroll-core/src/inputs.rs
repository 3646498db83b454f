//! Input contracts for the core engine.
//!
//! The world scroll speed is owned by the host (game state, difficulty
//! curve) and injected here every tick rather than read through a global.
//! Backward motion is unsupported: speed and multipliers are assumed
//! non-negative.

use serde::{Deserialize, Serialize};

use crate::ids::LayerId;

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Inputs {
    /// World scroll speed in units/second, shared by every layer.
    #[serde(default)]
    pub scroll_speed: f64,
    /// Layer-level commands applied before stepping.
    #[serde(default)]
    pub layer_cmds: Vec<LayerCommand>,
}

impl Inputs {
    pub fn with_speed(scroll_speed: f64) -> Self {
        Self {
            scroll_speed,
            layer_cmds: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum LayerCommand {
    /// Change a layer's parallax factor. Commands addressed to unknown
    /// layers are ignored.
    SetMultiplier { layer: LayerId, multiplier: f64 },
}
