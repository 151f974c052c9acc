use std::f64::consts::PI;

use super::arc_2d::append_arc_points;
use super::orientation::copy_orientation;
use super::{equal_elem, Point2};
use crate::error::GeometryError;
use crate::tessellation::DiscretizationParams;

/// Tangent construction of a rounded corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerFillet {
    /// Tangent point on the incoming edge.
    pub start: Point2,
    /// Tangent point on the outgoing edge.
    pub end: Point2,
    /// Center of the rounding arc.
    pub center: Point2,
    /// Signed sweep from `start` to `end`, positive for counter-clockwise.
    pub sweep: f64,
}

/// Computes the fillet of radius `radius` replacing corner `p1`, where `p0` is the
/// previous neighbour and `p2` the next one.
///
/// # Errors
///
/// - [`GeometryError::BadSmooth`] if a neighbour coincides with the corner, or
///   the corner angle lies within `params.angle_tolerance` of 0 or π.
/// - [`GeometryError::LargeSmoothRadius`] if `radius` exceeds an adjacent edge
///   length by more than `params.length_tolerance`.
pub fn corner_fillet(
    p0: &Point2,
    p1: &Point2,
    p2: &Point2,
    radius: f64,
    params: &DiscretizationParams,
) -> Result<CornerFillet, GeometryError> {
    let v10 = p0 - p1;
    let v12 = p2 - p1;
    let norm10 = v10.norm();
    let norm12 = v12.norm();
    if norm10 == 0.0 || norm12 == 0.0 {
        return Err(GeometryError::BadSmooth("neighbour coincides with corner"));
    }
    for edge in [norm10, norm12] {
        if radius - edge > params.length_tolerance {
            return Err(GeometryError::LargeSmoothRadius { radius, edge });
        }
    }
    let v10 = v10 / norm10;
    let v12 = v12 / norm12;

    // Opening angle of the corner.
    let theta = v10.dot(&v12).clamp(-1.0, 1.0).acos();
    if theta.abs() < params.angle_tolerance {
        return Err(GeometryError::BadSmooth("corner folds back on itself"));
    }
    if (theta - PI).abs() < params.angle_tolerance {
        return Err(GeometryError::BadSmooth("corner is nearly straight"));
    }

    let (sin_half, cos_half) = (0.5 * theta).sin_cos();
    // Distance from the corner to both tangent points.
    let d = radius * cos_half / sin_half;
    let start = p1 + v10 * d;
    let end = p1 + v12 * d;

    let bisector = (v10 + v12).normalize();
    let center = p1 + bisector * (radius / sin_half);
    let sweep = copy_orientation(PI - theta, &start, p1, &end);

    Ok(CornerFillet {
        start,
        end,
        center,
        sweep,
    })
}

/// Appends the discretized fillet of corner `p1` to `dst`.
///
/// Emits the start tangent point, `facets - 1` interior arc points and the end
/// tangent point. A tangent point is left out when it lands on its neighbour
/// (within `params.cap_tolerance` of the edge length) so the fillet caps the
/// edge instead of duplicating the neighbour. With `facets == 1` only the two
/// tangent points are emitted, which cuts the corner with a straight chamfer.
///
/// # Errors
///
/// Propagates the errors of [`corner_fillet`].
pub fn append_smoothed_corner(
    dst: &mut Vec<Point2>,
    p0: &Point2,
    p1: &Point2,
    p2: &Point2,
    radius: f64,
    facets: u32,
    params: &DiscretizationParams,
) -> Result<(), GeometryError> {
    let fillet = corner_fillet(p0, p1, p2, radius, params)?;
    let norm10 = (p0 - p1).norm();
    let norm12 = (p2 - p1).norm();

    if !equal_elem(p0, &fillet.start, params.cap_tolerance * norm10) {
        dst.push(fillet.start);
    }
    append_arc_points(dst, &fillet.start, &fillet.center, fillet.sweep, facets);
    if !equal_elem(p2, &fillet.end, params.cap_tolerance * norm12) {
        dst.push(fillet.end);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    const TOL: f64 = 1e-9;

    fn params() -> DiscretizationParams {
        DiscretizationParams::default()
    }

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn right_angle_ccw_corner() {
        // Square corner at (4,0) walked counter-clockwise.
        let f = corner_fillet(&p(0.0, 0.0), &p(4.0, 0.0), &p(4.0, 4.0), 1.0, &params()).unwrap();
        assert_abs_diff_eq!(f.start.x, 3.0, epsilon = TOL);
        assert_abs_diff_eq!(f.start.y, 0.0, epsilon = TOL);
        assert_abs_diff_eq!(f.end.x, 4.0, epsilon = TOL);
        assert_abs_diff_eq!(f.end.y, 1.0, epsilon = TOL);
        assert_abs_diff_eq!(f.center.x, 3.0, epsilon = TOL);
        assert_abs_diff_eq!(f.center.y, 1.0, epsilon = TOL);
        assert_abs_diff_eq!(f.sweep, FRAC_PI_2, epsilon = TOL);
    }

    #[test]
    fn right_angle_cw_corner_has_negative_sweep() {
        let f = corner_fillet(&p(4.0, 4.0), &p(4.0, 0.0), &p(0.0, 0.0), 1.0, &params()).unwrap();
        assert_abs_diff_eq!(f.sweep, -FRAC_PI_2, epsilon = TOL);
        assert_abs_diff_eq!(f.center.x, 3.0, epsilon = TOL);
        assert_abs_diff_eq!(f.center.y, 1.0, epsilon = TOL);
    }

    #[test]
    fn emitted_points_lie_on_fillet_circle() {
        let mut dst = Vec::new();
        append_smoothed_corner(&mut dst, &p(0.0, 0.0), &p(4.0, 0.0), &p(4.0, 4.0), 1.0, 5, &params())
            .unwrap();
        // Both tangents are far from their neighbours: 2 tangents + 4 interior.
        assert_eq!(dst.len(), 6);
        for v in &dst {
            assert_abs_diff_eq!((v - p(3.0, 1.0)).norm(), 1.0, epsilon = TOL);
        }
    }

    #[test]
    fn tangent_on_neighbour_is_capped() {
        // Radius equals both edges: tangents coincide with the neighbours.
        let mut dst = Vec::new();
        append_smoothed_corner(&mut dst, &p(1.0, 0.0), &p(1.0, 1.0), &p(0.0, 1.0), 1.0, 3, &params())
            .unwrap();
        assert_eq!(dst.len(), 2);
        for v in &dst {
            assert_abs_diff_eq!(v.coords.norm(), 1.0, epsilon = TOL);
        }
    }

    #[test]
    fn single_facet_emits_chamfer_cut() {
        let size = 2.0;
        let mut dst = Vec::new();
        append_smoothed_corner(
            &mut dst,
            &p(0.0, 0.0),
            &p(10.0, 0.0),
            &p(10.0, 10.0),
            size * std::f64::consts::FRAC_1_SQRT_2,
            1,
            &params(),
        )
        .unwrap();
        assert_eq!(dst.len(), 2);
        assert_abs_diff_eq!((dst[1] - dst[0]).norm(), size, epsilon = TOL);
    }

    #[test]
    fn radius_larger_than_edge() {
        let err = corner_fillet(&p(0.0, 0.0), &p(1.0, 0.0), &p(1.0, 1.0), 3.0, &params()).unwrap_err();
        assert!(matches!(err, GeometryError::LargeSmoothRadius { .. }));
    }

    #[test]
    fn straight_corner_is_bad() {
        let err = corner_fillet(&p(0.0, 0.0), &p(1.0, 0.0), &p(2.0, 0.01), 0.1, &params()).unwrap_err();
        assert!(matches!(err, GeometryError::BadSmooth(_)));
    }

    #[test]
    fn reversing_corner_is_bad() {
        let err = corner_fillet(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.0, 0.01), 0.1, &params()).unwrap_err();
        assert!(matches!(err, GeometryError::BadSmooth(_)));
    }

    #[test]
    fn coincident_neighbour_is_bad() {
        let err = corner_fillet(&p(1.0, 0.0), &p(1.0, 0.0), &p(1.0, 1.0), 3.0, &params()).unwrap_err();
        assert!(matches!(err, GeometryError::BadSmooth(_)));
    }
}
