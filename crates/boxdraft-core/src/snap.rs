//! Snapping: rotation angles to fixed segments and dragged bounds to other shapes.

use crate::geometry::{BoundsWithCenter, translate_bounds};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Normalize an angle into `[0, 2π)`.
pub fn clamp_radians(r: f64) -> f64 {
    (TAU + r) % TAU
}

/// Snap an angle to the nearest of `segments` equal divisions of a full turn.
pub fn snap_angle_to_segments(r: f64, segments: u32) -> f64 {
    let seg = TAU / f64::from(segments.max(1));
    ((clamp_radians(r) + seg / 2.0) / seg).floor() * seg
}

/// A guide line between the dragged selection and an aligned shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapLine {
    pub start: Point,
    pub end: Point,
}

/// Outcome of snapping a moving box against others.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapResult {
    /// Amount to subtract from the drag delta to land on the snap.
    pub offset: Vec2,
    pub lines: Vec<SnapLine>,
}

#[derive(Debug, Clone, Copy)]
enum Anchor {
    Mid,
    Min,
    Max,
}

const ANCHORS: [Anchor; 3] = [Anchor::Mid, Anchor::Min, Anchor::Max];

fn x_at(b: &BoundsWithCenter, anchor: Anchor) -> f64 {
    match anchor {
        Anchor::Mid => b.mid_x(),
        Anchor::Min => b.min_x(),
        Anchor::Max => b.max_x(),
    }
}

fn y_at(b: &BoundsWithCenter, anchor: Anchor) -> f64 {
    match anchor {
        Anchor::Mid => b.mid_y(),
        Anchor::Min => b.min_y(),
        Anchor::Max => b.max_y(),
    }
}

/// Signed distances from each anchor of `moving` to each anchor of `other` on one axis.
fn gaps<'a>(
    at: fn(&BoundsWithCenter, Anchor) -> f64,
    moving: &'a BoundsWithCenter,
    other: &'a BoundsWithCenter,
) -> impl Iterator<Item = (Anchor, f64)> + 'a {
    ANCHORS.into_iter().flat_map(move |from| {
        ANCHORS
            .into_iter()
            .map(move |to| (from, at(moving, from) - at(other, to)))
    })
}

/// Snap `moving` against `others` on each axis independently.
///
/// Every pairing of min/mid/max anchors is considered; the closest pairing
/// strictly under `distance` wins its axis. Returns `None` when neither axis snaps.
pub fn snap_bounds(
    moving: &BoundsWithCenter,
    others: &[BoundsWithCenter],
    distance: f64,
) -> Option<SnapResult> {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut gap_x = 0.0;
    let mut gap_y = 0.0;

    for other in others {
        for (_, gap) in gaps(x_at, moving, other) {
            if gap.abs() < distance && gap.abs() < min_x {
                min_x = gap.abs();
                gap_x = gap;
            }
        }
        for (_, gap) in gaps(y_at, moving, other) {
            if gap.abs() < distance && gap.abs() < min_y {
                min_y = gap.abs();
                gap_y = gap;
            }
        }
    }

    if min_x.is_infinite() && min_y.is_infinite() {
        return None;
    }

    let offset = Vec2::new(gap_x, gap_y);
    let snapped = BoundsWithCenter::new(translate_bounds(moving.bounds, -offset));

    let mut lines = Vec::new();
    for other in others {
        for (from, gap) in gaps(x_at, moving, other) {
            if gap.abs() == min_x {
                let x = x_at(&snapped, from);
                lines.push(SnapLine {
                    start: Point::new(x, snapped.min_y().min(other.min_y())),
                    end: Point::new(x, snapped.max_y().max(other.max_y())),
                });
            }
        }
        for (from, gap) in gaps(y_at, moving, other) {
            if gap.abs() == min_y {
                let y = y_at(&snapped, from);
                lines.push(SnapLine {
                    start: Point::new(snapped.min_x().min(other.min_x()), y),
                    end: Point::new(snapped.max_x().max(other.max_x()), y),
                });
            }
        }
    }

    Some(SnapResult { offset, lines })
}
