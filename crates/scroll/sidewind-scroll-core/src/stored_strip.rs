use serde::Deserialize;

use crate::data::{Margins, PrototypeDesc, StripData, StripIngredient};

/// Public API: parse StoredStrip-style JSON (see fixtures/strips/*.json) into
/// the canonical StripData (data.rs).
///
/// Notes:
/// - Extents are authored in world units as numbers; they are narrowed to f32
///   here because measured bounds are single precision at the source.
/// - `margins` is optional on a prototype; absent means all four are 0.
/// - `origin` is optional and defaults to 0.
pub fn parse_stored_strip_json(s: &str) -> Result<StripData, String> {
    let ss: StoredStrip = serde_json::from_str(s).map_err(|e| format!("parse error: {e}"))?;

    let mut prototypes: Vec<PrototypeDesc> = Vec::with_capacity(ss.prototypes.len());
    for sp in ss.prototypes {
        let margins = sp
            .margins
            .map(|m| Margins {
                left_outer: m.left_outer as f32,
                left_inner: m.left_inner as f32,
                right_inner: m.right_inner as f32,
                right_outer: m.right_outer as f32,
            })
            .unwrap_or_default();
        prototypes.push(PrototypeDesc {
            name: sp.name,
            min_x: sp.extent.min as f32,
            max_x: sp.extent.max as f32,
            local_origin_x: sp.origin.unwrap_or(0.0) as f32,
            margins,
        });
    }

    let ingredients = ss
        .ingredients
        .into_iter()
        .map(|si| StripIngredient {
            prototype: si.prototype,
            repeat: si.repeat,
        })
        .collect();

    let data = StripData {
        name: ss.name,
        prototypes,
        ingredients,
    };
    // Basic validation (finite extents, margins >= 0, references resolve)
    data.validate_basic()?;
    Ok(data)
}

// ----- JSON schema (serde) -----

#[derive(Debug, Deserialize)]
struct StoredStrip {
    pub name: String,
    pub prototypes: Vec<SsPrototype>,
    pub ingredients: Vec<SsIngredient>,
}

#[derive(Debug, Deserialize)]
struct SsPrototype {
    pub name: String,
    pub extent: SsExtent,
    #[serde(default)]
    pub origin: Option<f64>,
    #[serde(default)]
    pub margins: Option<SsMargins>,
}

#[derive(Debug, Deserialize)]
struct SsExtent {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Default, Deserialize)]
struct SsMargins {
    #[serde(default)]
    #[serde(rename = "leftOuter")]
    pub left_outer: f64,
    #[serde(default)]
    #[serde(rename = "leftInner")]
    pub left_inner: f64,
    #[serde(default)]
    #[serde(rename = "rightInner")]
    pub right_inner: f64,
    #[serde(default)]
    #[serde(rename = "rightOuter")]
    pub right_outer: f64,
}

#[derive(Debug, Deserialize)]
struct SsIngredient {
    pub prototype: String,
    pub repeat: u32,
}
