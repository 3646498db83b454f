//! Slot layout: expand an ingredient list into an immutable slot sequence.
//!
//! Layout runs once per layer. Slots carry double-precision extents because
//! the world moves around the camera and positions get far from the origin;
//! narrowing to f32 happens only when a render position is written.

use crate::data::PrototypeDesc;
use crate::ids::Handle;

/// One logical segment of the strip, derived from one repetition of an
/// ingredient. Position fields are immutable after layout; only `handle`
/// mutates, every tick.
#[derive(Debug, Clone)]
pub struct TileSlot {
    /// Occupied span along the scroll axis, outer margins included.
    pub start: f64,
    pub end: f64,
    /// World reference such that `anchor - scroll` is the render x at zero
    /// offset.
    pub anchor: f64,
    /// Back-reference into the layer's ingredient list.
    pub ingredient: usize,
    /// Live pool handle while the slot is on screen.
    pub handle: Option<Handle>,
}

/// The product of the layout pass.
#[derive(Debug, Clone)]
pub struct Layout {
    pub slots: Vec<TileSlot>,
    /// Total non-margined extent of the strip; the wraparound modulus when
    /// looping is enabled.
    pub period: f64,
}

/// Expand ingredients (already resolved to prototype descriptions) into slots.
///
/// The cursor `running_min` tracks the non-margined start point: each slot
/// subtracts its left margins for `start`, adds its extent and right outer
/// margin for `end`, and advances the cursor by the net (inner-margin
/// adjusted) extent so consecutive tiles of the same ingredient overlap only
/// across their inner margins.
pub fn build_slots(resolved: &[(&PrototypeDesc, u32)], scroll_start: f64) -> Layout {
    let total: usize = resolved.iter().map(|(_, repeat)| *repeat as usize).sum();
    let mut slots = Vec::with_capacity(total);

    let mut running_min = scroll_start;
    for (index, (proto, repeat)) in resolved.iter().enumerate() {
        let extent = proto.extent();
        let left_outer = f64::from(proto.margins.left_outer);
        let left_inner = f64::from(proto.margins.left_inner);
        let right_inner = f64::from(proto.margins.right_inner);
        let right_outer = f64::from(proto.margins.right_outer);

        for _ in 0..*repeat {
            slots.push(TileSlot {
                start: running_min - left_inner - left_outer,
                end: running_min - left_inner + extent + right_outer,
                anchor: running_min - left_inner - f64::from(proto.min_x)
                    + f64::from(proto.local_origin_x),
                ingredient: index,
                handle: None,
            });
            running_min += extent - right_inner - left_inner;
        }
    }

    Layout {
        slots,
        period: running_min,
    }
}

/// Pool capacity needed to tile the window with one prototype: enough
/// concurrent instances to cover the visible width at the net stride, plus
/// one for the partial tile entering on each side.
pub fn required_pool_count(window_width: f64, proto: &PrototypeDesc) -> usize {
    (window_width / proto.net_extent()).ceil() as usize + 1
}

/// Inclusive interval intersection: touching boundaries count as overlap.
#[inline]
pub fn spans_intersect(a: (f64, f64), b: (f64, f64)) -> bool {
    !(a.1 < b.0 || a.0 > b.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Margins;

    fn proto(name: &str, min_x: f32, max_x: f32, margins: Margins) -> PrototypeDesc {
        PrototypeDesc {
            name: name.into(),
            min_x,
            max_x,
            local_origin_x: 0.0,
            margins,
        }
    }

    #[test]
    fn intersection_is_inclusive_at_boundaries() {
        assert!(spans_intersect((0.0, 1.0), (1.0, 2.0)));
        assert!(spans_intersect((1.0, 2.0), (0.0, 1.0)));
        assert!(!spans_intersect((0.0, 1.0), (1.0 + 1e-12, 2.0)));
        assert!(spans_intersect((0.0, 10.0), (3.0, 4.0)));
    }

    #[test]
    fn pool_count_rounds_up_plus_one() {
        let p = proto("p", 0.0, 5.0, Margins::default());
        assert_eq!(required_pool_count(16.0, &p), 5); // ceil(16/5)+1
        assert_eq!(required_pool_count(15.0, &p), 4); // exact division
    }

    #[test]
    fn margins_shrink_net_extent_and_raise_pool_count() {
        let p = proto(
            "p",
            0.0,
            5.0,
            Margins {
                left_inner: 0.5,
                right_inner: 0.5,
                ..Default::default()
            },
        );
        assert_eq!(required_pool_count(16.0, &p), 5); // ceil(16/4)+1
    }

    #[test]
    fn zero_repeat_ingredient_yields_no_slots() {
        let p = proto("p", 0.0, 5.0, Margins::default());
        let layout = build_slots(&[(&p, 0)], 0.0);
        assert!(layout.slots.is_empty());
        assert_eq!(layout.period, 0.0);
    }
}
