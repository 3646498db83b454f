//! Engine: data ownership and public API with scroll math plus the three
//! per-tick passes (deactivate, activate, position).
//!
//! Methods:
//! - new, load_prototype, create_layer, load_strip, update

use log::{debug, warn};

use crate::config::{Config, LayerCfg, Viewport};
use crate::data::{PrototypeDesc, StripData, TileIngredient};
use crate::error::{ConfigError, CoreError, PoolError};
use crate::ids::{IdAllocator, LayerId, PrototypeId};
use crate::inputs::{Inputs, LayerCommand};
use crate::layout::{self, TileSlot};
use crate::outputs::{CoreEvent, Outputs, Placement};
use crate::pool::HandlePool;

/// Per-layer scroll state. Each layer owns its slot array and its pool;
/// nothing is shared across layers.
#[derive(Debug)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    /// Parallax factor applied to the world scroll speed.
    pub multiplier: f64,
    pub looping: bool,
    scroll: f64,
    period: f64,
    /// Rightmost slot end, used to detect a finished non-looping layer.
    strip_end: f64,
    idle: bool,
    ingredients: Vec<TileIngredient>,
    slots: Vec<TileSlot>,
    pool: HandlePool,
}

impl Layer {
    #[inline]
    fn prototype_of(&self, slot: &TileSlot) -> PrototypeId {
        self.ingredients[slot.ingredient].prototype
    }

    /// One synchronous tick. Runs to completion; a pool fault aborts the
    /// tick and propagates.
    fn tick(
        &mut self,
        dt: f64,
        scroll_speed: f64,
        viewport: &Viewport,
        outputs: &mut Outputs,
    ) -> Result<(), PoolError> {
        self.scroll += dt * self.multiplier * scroll_speed;
        if self.looping && self.period > 0.0 && self.scroll >= self.period {
            self.scroll %= self.period;
            outputs.push_event(CoreEvent::LayerWrapped { layer: self.id });
        }

        // A slot can be thinner than its neighbors' margins, so slot extents
        // are not ordered relative to the window; all three passes stay
        // brute force over the slot array.
        let window = (
            self.scroll + viewport.camera_left,
            self.scroll + viewport.camera_left + viewport.window_width,
        );
        let forward_window = (window.0 + self.period, window.1 + self.period);
        let backward_window = (window.0 - self.period, window.1 - self.period);

        // Deactivation pass. A tile leaving toward the far side of the loop
        // is confirmed gone against the forward-shifted window; swapping the
        // shifted windows between this pass and the next breaks the seam.
        for i in 0..self.slots.len() {
            let Some(handle) = self.slots[i].handle else {
                continue;
            };
            let span = (self.slots[i].start, self.slots[i].end);
            let mut off_screen = !layout::spans_intersect(span, window);
            if self.looping {
                off_screen &= !layout::spans_intersect(span, forward_window);
            }
            if off_screen {
                let prototype = self.prototype_of(&self.slots[i]);
                self.pool.release(prototype, handle)?;
                self.slots[i].handle = None;
                outputs.push_event(CoreEvent::TileDeactivated {
                    layer: self.id,
                    slot: i,
                    prototype,
                });
            }
        }

        // Activation pass. A tile approaching from the far side of the loop
        // is pre-activated against the backward-shifted window.
        for i in 0..self.slots.len() {
            if self.slots[i].handle.is_some() {
                continue;
            }
            let span = (self.slots[i].start, self.slots[i].end);
            let mut on_screen = layout::spans_intersect(span, window);
            if self.looping {
                on_screen |= layout::spans_intersect(span, backward_window);
            }
            if on_screen {
                let prototype = self.prototype_of(&self.slots[i]);
                let handle = self.pool.acquire(prototype)?;
                self.slots[i].handle = Some(handle);
                outputs.push_event(CoreEvent::TileActivated {
                    layer: self.id,
                    slot: i,
                    prototype,
                });
            }
        }

        // Position pass. When looping, a slot that sits entirely outside the
        // primary window must be the wrapped instance, so it renders shifted
        // by a full period.
        for i in 0..self.slots.len() {
            let Some(handle) = self.slots[i].handle else {
                continue;
            };
            let slot = &self.slots[i];
            let mut offset = 0.0;
            if self.looping {
                if slot.end < window.0 {
                    offset = self.period;
                } else if slot.start > window.1 {
                    offset = -self.period;
                }
            }
            let x = (slot.anchor - self.scroll + offset) as f32;
            let prototype = self.prototype_of(slot);
            self.pool.set_x(prototype, handle, x)?;
            outputs.push_placement(Placement {
                layer: self.id,
                prototype,
                handle,
                x,
            });
        }

        if !self.looping && !self.idle {
            let past_end = window.0 > self.strip_end;
            if past_end && self.slots.iter().all(|s| s.handle.is_none()) {
                self.idle = true;
                outputs.push_event(CoreEvent::LayerIdle { layer: self.id });
            }
        }

        Ok(())
    }
}

/// Minimal prototype library storage.
#[derive(Default, Debug)]
struct PrototypeLib {
    items: Vec<(PrototypeId, PrototypeDesc)>,
}

impl PrototypeLib {
    fn insert(&mut self, id: PrototypeId, desc: PrototypeDesc) {
        self.items.push((id, desc));
    }
    fn get(&self, id: PrototypeId) -> Option<&PrototypeDesc> {
        self.items
            .iter()
            .find_map(|(p, d)| if *p == id { Some(d) } else { None })
    }
}

/// Engine (core): owns the viewport, the prototype library, and the layers.
/// Single-threaded by design; one full tick is the unit of serialization.
#[derive(Debug)]
pub struct Engine {
    cfg: Config,
    viewport: Viewport,
    ids: IdAllocator,
    protos: PrototypeLib,
    layers: Vec<Layer>,

    // Per-tick outputs
    outputs: Outputs,
}

impl Engine {
    /// Create a new engine, deriving the viewport from the camera config.
    pub fn new(cfg: Config) -> Result<Self, CoreError> {
        let viewport = Viewport::from_camera(&cfg.camera);
        if !viewport.window_width.is_finite() || viewport.window_width <= 0.0 {
            return Err(ConfigError::InvalidWindow {
                width: viewport.window_width,
            }
            .into());
        }
        Ok(Self {
            cfg,
            viewport,
            ids: IdAllocator::new(),
            protos: PrototypeLib::default(),
            layers: Vec::new(),
            outputs: Outputs::default(),
        })
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Register a tile prototype, returning its id.
    pub fn load_prototype(&mut self, desc: PrototypeDesc) -> Result<PrototypeId, CoreError> {
        if !desc.min_x.is_finite() || !desc.max_x.is_finite() || desc.max_x <= desc.min_x {
            return Err(ConfigError::MissingGeometry {
                name: desc.name.clone(),
                reason: format!("extent {}..{} is empty or non-finite", desc.min_x, desc.max_x),
            }
            .into());
        }
        let m = &desc.margins;
        if m.left_outer < 0.0 || m.left_inner < 0.0 || m.right_inner < 0.0 || m.right_outer < 0.0 {
            return Err(ConfigError::MissingGeometry {
                name: desc.name.clone(),
                reason: "negative margin".into(),
            }
            .into());
        }
        let id = self.ids.alloc_prototype();
        self.protos.insert(id, desc);
        Ok(id)
    }

    /// Build a layer: size and warm its pool, then lay out its slots. Runs
    /// once; slot positions are immutable for the life of the layer.
    pub fn create_layer(
        &mut self,
        name: &str,
        ingredients: &[TileIngredient],
        cfg: LayerCfg,
    ) -> Result<LayerId, CoreError> {
        let mut resolved: Vec<(&PrototypeDesc, u32)> = Vec::with_capacity(ingredients.len());
        let mut pool = HandlePool::new();
        for ing in ingredients {
            let desc = self
                .protos
                .get(ing.prototype)
                .ok_or(CoreError::UnknownPrototype(ing.prototype))?;
            if desc.net_extent() <= 0.0 {
                return Err(ConfigError::DegenerateExtent {
                    name: desc.name.clone(),
                }
                .into());
            }
            if ing.repeat == 0 {
                warn!("layer '{name}': ingredient '{}' repeats zero times", desc.name);
            }
            let count = layout::required_pool_count(self.viewport.window_width, desc);
            pool.warm(ing.prototype, count);
            debug!(
                "layer '{name}': warmed {count} handles for prototype '{}'",
                desc.name
            );
            resolved.push((desc, ing.repeat));
        }

        let built = layout::build_slots(&resolved, cfg.scroll_start);
        let strip_end = built
            .slots
            .iter()
            .fold(cfg.scroll_start, |acc, s| acc.max(s.end));
        debug!(
            "layer '{name}': {} slots, period {}",
            built.slots.len(),
            built.period
        );

        let id = self.ids.alloc_layer();
        self.layers.push(Layer {
            id,
            name: name.to_string(),
            multiplier: cfg.scroll_multiplier,
            looping: cfg.looping,
            scroll: 0.0,
            period: built.period,
            strip_end,
            idle: false,
            ingredients: ingredients.to_vec(),
            slots: built.slots,
            pool,
        });
        Ok(id)
    }

    /// Register a stored strip's prototypes and create a layer from its
    /// ingredient list in one step.
    pub fn load_strip(&mut self, strip: &StripData, cfg: LayerCfg) -> Result<LayerId, CoreError> {
        strip
            .validate_basic()
            .map_err(|reason| ConfigError::InvalidStrip {
                name: strip.name.clone(),
                reason,
            })?;

        let mut by_name: Vec<(&str, PrototypeId)> = Vec::with_capacity(strip.prototypes.len());
        for proto in &strip.prototypes {
            let id = self.load_prototype(proto.clone())?;
            by_name.push((proto.name.as_str(), id));
        }

        let mut ingredients: Vec<TileIngredient> = Vec::with_capacity(strip.ingredients.len());
        for ing in &strip.ingredients {
            let prototype = by_name
                .iter()
                .find(|(n, _)| *n == ing.prototype)
                .map(|(_, id)| *id)
                .ok_or_else(|| ConfigError::InvalidStrip {
                    name: strip.name.clone(),
                    reason: format!("unresolved prototype '{}'", ing.prototype),
                })?;
            ingredients.push(TileIngredient {
                prototype,
                repeat: ing.repeat,
            });
        }
        self.create_layer(&strip.name, &ingredients, cfg)
    }

    /// Step every layer by dt with the given inputs, producing placements
    /// and events. Pool faults abort the tick and propagate; partial tile
    /// state is worse than a loud failure.
    pub fn update(&mut self, dt: f64, inputs: Inputs) -> Result<&Outputs, CoreError> {
        self.outputs.clear();

        for cmd in inputs.layer_cmds {
            match cmd {
                LayerCommand::SetMultiplier { layer, multiplier } => {
                    if let Some(l) = self.layers.iter_mut().find(|l| l.id == layer) {
                        l.multiplier = multiplier;
                    }
                }
            }
        }

        let Self {
            layers,
            outputs,
            viewport,
            ..
        } = self;
        for layer in layers.iter_mut() {
            layer
                .tick(dt, inputs.scroll_speed, viewport, outputs)
                .map_err(CoreError::Pool)?;
        }

        Ok(&self.outputs)
    }
}

/// Read-side accessors for hosts and tests.
impl Engine {
    pub fn layer_scroll(&self, layer: LayerId) -> Option<f64> {
        self.layers.iter().find(|l| l.id == layer).map(|l| l.scroll)
    }

    pub fn layer_period(&self, layer: LayerId) -> Option<f64> {
        self.layers.iter().find(|l| l.id == layer).map(|l| l.period)
    }

    pub fn slots(&self, layer: LayerId) -> Option<&[TileSlot]> {
        self.layers
            .iter()
            .find(|l| l.id == layer)
            .map(|l| l.slots.as_slice())
    }

    /// The layer's pool, for renderers that read active positions directly.
    pub fn pool(&self, layer: LayerId) -> Option<&HandlePool> {
        self.layers.iter().find(|l| l.id == layer).map(|l| &l.pool)
    }

    /// Mutable pool access, for hosts that drive the y coordinate.
    pub fn pool_mut(&mut self, layer: LayerId) -> Option<&mut HandlePool> {
        self.layers
            .iter_mut()
            .find(|l| l.id == layer)
            .map(|l| &mut l.pool)
    }
}
