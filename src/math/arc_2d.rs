//! Chord-defined arc math.
//!
//! An arc between two points is fully described by the two endpoints and a
//! signed radius:
//! - `radius > 0`: counter-clockwise arc, center left of the chord
//! - `radius < 0`: clockwise arc, center right of the chord
//!
//! Only the minor arc (sweep magnitude below π) is ever produced.

use nalgebra::Rotation2;
use std::f64::consts::FRAC_PI_2;

use super::{left_normal, Point2};
use crate::error::GeometryError;
use crate::tessellation::DiscretizationParams;

/// Center and signed sweep of an arc spanning a chord.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChordArc {
    /// Center of the arc circle.
    pub center: Point2,
    /// Signed sweep angle in radians, positive for counter-clockwise.
    pub sweep: f64,
}

/// Computes the center and sweep of the arc of signed `radius` from `p1` to `p2`.
///
/// # Errors
///
/// Returns [`GeometryError::SmallArcRadius`] if the chord is longer than the
/// diameter by more than `params.length_tolerance`, and
/// [`GeometryError::DuplicateControlPoint`] if the endpoints coincide.
pub fn arc_from_chord(
    p1: &Point2,
    p2: &Point2,
    radius: f64,
    params: &DiscretizationParams,
) -> Result<ChordArc, GeometryError> {
    let r_abs = radius.abs();
    let v12 = p2 - p1;
    let chord_len = v12.norm();
    if chord_len == 0.0 {
        return Err(GeometryError::DuplicateControlPoint);
    }
    if chord_len - 2.0 * r_abs > params.length_tolerance {
        return Err(GeometryError::SmallArcRadius {
            chord: chord_len,
            radius,
        });
    }
    let chord_center = p1 + v12 * 0.5;

    // Half the angle the chord subtends at the arc center. Chords slightly
    // longer than the diameter are accepted by the tolerance and clamp to a semicircle.
    let mut half_angle = (chord_len / (2.0 * r_abs)).min(1.0).asin();
    // asin never exceeds π/2, so stepping away means stepping below it.
    if FRAC_PI_2 - half_angle < params.semicircle_epsilon {
        // Ill conditioned near the semicircle.
        half_angle = FRAC_PI_2 - params.semicircle_epsilon;
    }

    let unit_perp = if radius > 0.0 {
        left_normal(v12) / chord_len
    } else {
        -left_normal(v12) / chord_len
    };
    // Distance from chord midpoint to arc center.
    let x = 0.5 * chord_len / half_angle.tan();

    Ok(ChordArc {
        center: chord_center + unit_perp * x,
        sweep: (2.0 * half_angle).copysign(radius),
    })
}

/// Appends the interior points of an arc around `center` starting at `start`.
///
/// Exactly `facets - 1` points are appended at uniform angular spacing of
/// `sweep / facets`. Neither `start` nor the arc's end point is appended.
pub fn append_arc_points(dst: &mut Vec<Point2>, start: &Point2, center: &Point2, sweep: f64, facets: u32) {
    if facets <= 1 {
        return;
    }
    let step = Rotation2::new(sweep / f64::from(facets));
    let mut rv = start - center;
    for _ in 1..facets {
        rv = step * rv;
        dst.push(center + rv);
    }
}

/// Appends the interior points of the arc of signed `radius` from `p1` to `p2`.
///
/// Nothing is appended (and nothing validated) for `facets <= 1`, which
/// degenerates to the straight edge.
///
/// # Errors
///
/// Propagates the errors of [`arc_from_chord`].
pub fn append_arc_between(
    dst: &mut Vec<Point2>,
    p1: &Point2,
    p2: &Point2,
    radius: f64,
    facets: u32,
    params: &DiscretizationParams,
) -> Result<(), GeometryError> {
    if facets <= 1 {
        return Ok(());
    }
    let arc = arc_from_chord(p1, p2, radius, params)?;
    append_arc_points(dst, p1, &arc.center, arc.sweep, facets);
    Ok(())
}
