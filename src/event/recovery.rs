// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Event handling: incremental transform recovery

use super::{SampleSet, TouchId, TouchSample};
use crate::geom::{Affine, Linear, Vec2};
use linear_map::LinearMap;

/// Result of joining two sample sets by contact identity
///
/// Maps each [`TouchId`] present in both sets to its
/// `(previous, current)` sample pair, in the previous set's iteration order.
pub type MatchedPairs = LinearMap<TouchId, (TouchSample, TouchSample)>;

/// Join `previous` and `current` samples by contact identity
///
/// A contact present in only one set is dropped. Should either set hold more
/// than one sample per contact (a host contract violation), the first
/// occurrence wins.
pub fn match_samples(previous: &SampleSet, current: &SampleSet) -> MatchedPairs {
    let mut pairs = MatchedPairs::with_capacity(previous.len().min(current.len()));
    for prev in previous {
        if pairs.contains_key(&prev.id) {
            continue;
        }
        if let Some(cur) = current.get(prev.id) {
            pairs.insert(prev.id, (*prev, *cur));
        }
    }
    pairs
}

/// Recover the incremental transform between two sample sets
///
/// Returns the single [`Affine`] explaining the motion from `previous` to
/// `current`, to be applied on top of the manipulated object's current state
/// for this step only. `pre` is that current state (the "pre-transform"),
/// applied to sample locations before recovery so that the result composes
/// correctly with the object's own coordinate frame; pass
/// [`Affine::IDENTITY`] to work in the reference coordinate space directly.
///
/// The result depends on the number of contacts matched by identity between
/// the two sets (unmatched contacts are ignored entirely):
///
/// -   zero matched: identity
/// -   one matched: pure translation
/// -   two matched: rotation and uniform scale recovered by matching the
///     segment between the two previous locations to the segment between the
///     two current locations; the rotation acts about the intersection of the
///     two segment lines, or about the origin when they are parallel
/// -   three or more matched: identity
///
/// Degenerate geometry never fails: a zero-length previous segment (two
/// contacts captured at the same location) also yields identity.
pub fn recover(previous: &SampleSet, current: &SampleSet, pre: Affine) -> Affine {
    let pairs = match_samples(previous, current);
    let mut values = pairs.values();
    match (values.next(), values.next(), values.next()) {
        (Some((prev, cur)), None, _) => {
            Affine::translate(pre * cur.coord - pre * prev.coord)
        }
        (Some((prev0, cur0)), Some((prev1, cur1)), None) => two_point(
            pre * prev0.coord,
            pre * prev1.coord,
            pre * cur0.coord,
            pre * cur1.coord,
        ),
        _ => Affine::IDENTITY,
    }
}

/// Recover rotation, scale and translation matching segment `(a, b)` to
/// `(a1, b1)`
fn two_point(a: Vec2, b: Vec2, a1: Vec2, b1: Vec2) -> Affine {
    let seg = b - a;
    let seg1 = b1 - a1;

    let len = seg.magnitude();
    if len == 0.0 {
        // No segment to match against; scale recovery would divide by zero.
        return Affine::IDENTITY;
    }

    let angle = seg1.direction() - seg.direction();
    let scale = seg1.magnitude() / len;

    let rotation = match line_intersection(a, b, a1, b1) {
        Some(pivot) => {
            Affine::translate(pivot)
                * Affine::from(Linear::rotate(angle))
                * Affine::translate(-pivot)
        }
        // Parallel segment lines: no pivot exists
        None => Affine::from(Linear::rotate(angle)),
    };

    let mid = (a + b) * 0.5;
    let mid1 = (a1 + b1) * 0.5;
    let scaling = Affine::translate(mid1)
        * Affine::from(Linear::scale(scale))
        * Affine::translate(-(rotation * mid));

    scaling * rotation
}

/// Intersection of the infinite lines through `(a, b)` and `(c, d)`
///
/// Returns `None` when the lines are parallel (zero determinant), including
/// the collinear case.
fn line_intersection(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> Option<Vec2> {
    let r = b - a;
    let s = d - c;
    let det = r.0 * s.1 - r.1 * s.0;
    if det == 0.0 {
        return None;
    }
    let t = ((c.0 - a.0) * s.1 - (c.1 - a.1) * s.0) / det;
    Some(a + r * t)
}
