//! Canonical strip data model (StoredStrip).
//!
//! A strip is authored as a set of tile prototypes plus an ordered ingredient
//! list; each ingredient repeats one prototype a fixed number of times. The
//! layout pass in layout.rs expands ingredients into slots.

use serde::{Deserialize, Serialize};

use crate::ids::PrototypeId;

/// Margins attached to a prototype. Inner margins are the overlap zone where
/// adjacent tiles touch; outer margins add slack for effects that bleed past
/// the measured bounds (a light near the tile edge, for example).
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Margins {
    #[serde(default)]
    pub left_outer: f32,
    #[serde(default)]
    pub left_inner: f32,
    #[serde(default)]
    pub right_inner: f32,
    #[serde(default)]
    pub right_outer: f32,
}

/// A tile prototype: measured horizontal extent plus margin overrides.
/// Extents come from the authoring tool's combined render+collision bounds
/// and are single precision; everything scroll-related is double precision.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PrototypeDesc {
    pub name: String,
    /// Minimum x of the combined visual+collision bounds.
    pub min_x: f32,
    /// Maximum x of the combined visual+collision bounds.
    pub max_x: f32,
    /// The prototype's own transform x, folded into the anchor because
    /// authors forget to zero it out.
    #[serde(default)]
    pub local_origin_x: f32,
    #[serde(default)]
    pub margins: Margins,
}

impl PrototypeDesc {
    #[inline]
    pub fn extent(&self) -> f64 {
        f64::from(self.max_x) - f64::from(self.min_x)
    }

    /// Extent minus both inner margins; the stride one repetition advances
    /// the layout cursor, and the denominator of the pool-sizing formula.
    #[inline]
    pub fn net_extent(&self) -> f64 {
        self.extent() - f64::from(self.margins.left_inner) - f64::from(self.margins.right_inner)
    }
}

/// One engine-side ingredient: a registered prototype repeated `repeat` times.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct TileIngredient {
    pub prototype: PrototypeId,
    pub repeat: u32,
}

/// Stored-form ingredient referencing a prototype by name.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StripIngredient {
    pub prototype: String,
    pub repeat: u32,
}

/// Canonical StoredStrip format (standard, single supported schema).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StripData {
    pub name: String,
    pub prototypes: Vec<PrototypeDesc>,
    pub ingredients: Vec<StripIngredient>,
}

impl StripData {
    /// Validate basic invariants (finite positive extents, non-negative
    /// margins, ingredients referencing declared prototypes).
    pub fn validate_basic(&self) -> Result<(), String> {
        for proto in &self.prototypes {
            if !proto.min_x.is_finite() || !proto.max_x.is_finite() {
                return Err(format!("prototype '{}' has non-finite bounds", proto.name));
            }
            if proto.max_x <= proto.min_x {
                return Err(format!(
                    "prototype '{}' has empty extent ({}..{})",
                    proto.name, proto.min_x, proto.max_x
                ));
            }
            let m = &proto.margins;
            if m.left_outer < 0.0 || m.left_inner < 0.0 || m.right_inner < 0.0 || m.right_outer < 0.0
            {
                return Err(format!("prototype '{}' has a negative margin", proto.name));
            }
        }
        for ing in &self.ingredients {
            if !self.prototypes.iter().any(|p| p.name == ing.prototype) {
                return Err(format!(
                    "ingredient references undeclared prototype '{}'",
                    ing.prototype
                ));
            }
        }
        Ok(())
    }
}
