use tracing::{debug, trace};

use crate::error::{DiscretizationError, GeometryError, PolyroundError, Result};
use crate::geometry::{ControlPoint, CornerMode};
use crate::math::arc_2d::append_arc_between;
use crate::math::fillet_2d::append_smoothed_corner;
use crate::math::Point2;

use super::DiscretizationParams;

/// Discretizes a closed sequence of control points into boundary vertices.
///
/// The sequence is always treated as closed: the edge from the last control
/// point back to the first is a real edge, and both neighbours of every point
/// are taken cyclically.
#[derive(Debug)]
pub struct DiscretizeBoundary<'a> {
    points: &'a [ControlPoint],
    params: DiscretizationParams,
}

impl<'a> DiscretizeBoundary<'a> {
    /// Creates a new discretization pass over `points`.
    #[must_use]
    pub fn new(points: &'a [ControlPoint], params: DiscretizationParams) -> Self {
        Self { points, params }
    }

    /// Appends the boundary vertices to `dst`.
    ///
    /// Sharp points contribute their position, arc points the interior arc
    /// points followed by their position, and smoothed points their fillet.
    /// On failure the vertices emitted before the failing control point are
    /// left in `dst`.
    ///
    /// # Errors
    ///
    /// - [`DiscretizationError::InvalidParameters`] if the params do not validate.
    /// - [`DiscretizationError::TooFewVertices`] for fewer than 2 control points.
    /// - [`PolyroundError::AtControlPoint`] carrying the failing index when two
    ///   adjacent points coincide or an arc or fillet kernel fails.
    pub fn execute(&self, dst: &mut Vec<Point2>) -> Result<()> {
        self.params.validate()?;
        let n = self.points.len();
        if n < 2 {
            return Err(DiscretizationError::TooFewVertices { count: n }.into());
        }
        let start_len = dst.len();
        debug!(control_points = n, "discretizing boundary");

        for (i, current) in self.points.iter().enumerate() {
            let prev = &self.points[(i + n - 1) % n];
            let next = &self.points[(i + 1) % n];
            trace!(index = i, mode = ?current.mode(), "control point");
            if let Err(source) = self.emit(dst, prev, current, next) {
                debug!(index = i, error = %source, emitted = dst.len() - start_len, "discretization aborted");
                return Err(PolyroundError::AtControlPoint { index: i, source });
            }
        }

        debug!(vertices = dst.len() - start_len, "boundary discretized");
        Ok(())
    }

    fn emit(
        &self,
        dst: &mut Vec<Point2>,
        prev: &ControlPoint,
        current: &ControlPoint,
        next: &ControlPoint,
    ) -> std::result::Result<(), GeometryError> {
        let position = current.position();
        if prev.position() == position {
            return Err(GeometryError::DuplicateControlPoint);
        }
        match current.mode() {
            CornerMode::Sharp => dst.push(position),
            CornerMode::Arc { radius, facets } => {
                append_arc_between(dst, &prev.position(), &position, radius, facets, &self.params)?;
                dst.push(position);
            }
            CornerMode::Smoothed { radius, facets } => {
                append_smoothed_corner(
                    dst,
                    &prev.position(),
                    &position,
                    &next.position(),
                    radius,
                    facets,
                    &self.params,
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::PolygonBuilder;
    use crate::math::Vector2;
    use approx::assert_abs_diff_eq;

    const RADIUS_TOL: f64 = 1e-4;
    const FACETS: [u32; 5] = [2, 3, 4, 6, 7];

    fn rounded_square(r: f64, offset: Vector2, facets: u32) -> PolygonBuilder {
        let mut b = PolygonBuilder::new();
        let o = Point2::from(offset);
        b.add(o + Vector2::new(r, 0.0));
        let c = b.add(o + Vector2::new(r, r));
        b.smooth(c, r, facets).unwrap();
        b.add(o + Vector2::new(0.0, r));
        let c = b.add(o + Vector2::new(-r, r));
        b.smooth(c, r, facets).unwrap();
        b.add(o + Vector2::new(-r, 0.0));
        let c = b.add(o + Vector2::new(-r, -r));
        b.smooth(c, r, facets).unwrap();
        b.add(o + Vector2::new(0.0, -r));
        let c = b.add(o + Vector2::new(r, -r));
        b.smooth(c, r, facets).unwrap();
        b
    }

    #[test]
    fn rounded_square_is_a_circle() {
        let offsets = [
            Vector2::new(0.0, 0.0),
            Vector2::new(3.5, -2.0),
            Vector2::new(-120.0, 45.25),
        ];
        for r in [1e-6, 0.1, 1.0, 5.0, 100.0] {
            for offset in offsets {
                for facets in FACETS {
                    let b = rounded_square(r, offset, facets);
                    let verts = b.to_vecs().unwrap();
                    assert_eq!(verts.len(), (4 + (facets - 1) * 4) as usize, "r={r} facets={facets}");
                    for v in &verts {
                        let got = (v - Point2::from(offset)).norm();
                        assert!((got - r).abs() < RADIUS_TOL, "r={r} facets={facets} v={v}");
                    }
                }
            }
        }
    }

    #[test]
    fn two_arcs_make_a_circle() {
        let offsets = [Vector2::new(0.0, 0.0), Vector2::new(-120.0, 45.25)];
        for r in [1e-6, 0.1, 1.0, 5.0, 100.0] {
            for offset in offsets {
                let o = Point2::from(offset);
                for facets in FACETS {
                    let mut b = PolygonBuilder::new();
                    let a = b.add(o + Vector2::new(r, 0.0));
                    b.arc(a, r, facets).unwrap();
                    let c = b.add(o + Vector2::new(-r, 0.0));
                    b.arc(c, r, facets).unwrap();
                    let verts = b.to_vecs().unwrap();
                    assert_eq!(verts.len(), (2 + (facets - 1) * 2) as usize);
                    for v in &verts {
                        let got = (v - o).norm();
                        assert!((got - r).abs() < RADIUS_TOL, "r={r} facets={facets} v={v}");
                    }
                }
            }
        }
    }

    #[test]
    fn single_arc_edge_vertex_count() {
        let r = 2.0;
        let mut b = PolygonBuilder::new();
        b.add_xy(r, 0.0);
        let c = b.add_xy(-r, 0.0);
        b.arc(c, r, 5).unwrap();
        let verts = b.to_vecs().unwrap();
        // 1 sharp + 4 interior + explicit endpoint.
        assert_eq!(verts.len(), 6);
        // Positive radius sweeps counter-clockwise: from +x through +y.
        assert!(verts[1..5].iter().all(|v| v.y > 0.0));
    }

    #[test]
    fn negative_arc_radius_sweeps_clockwise() {
        let r = 2.0;
        let mut b = PolygonBuilder::new();
        b.add_xy(r, 0.0);
        let c = b.add_xy(-r, 0.0);
        b.arc(c, -r, 5).unwrap();
        let verts = b.to_vecs().unwrap();
        assert!(verts[1..5].iter().all(|v| v.y < 0.0));
    }

    #[test]
    fn sharp_points_pass_through() {
        let mut b = PolygonBuilder::new();
        b.add_xy(0.0, 0.0);
        b.add_xy(2.0, 0.0);
        b.add_xy(2.0, 1.0);
        let verts = b.to_vecs().unwrap();
        assert_eq!(verts, vec![Point2::new(0.0, 0.0), Point2::new(2.0, 0.0), Point2::new(2.0, 1.0)]);
    }

    #[test]
    fn too_few_vertices() {
        let mut b = PolygonBuilder::new();
        let mut buf = Vec::new();
        assert_eq!(
            b.append_vecs(&mut buf).unwrap_err(),
            PolyroundError::from(DiscretizationError::TooFewVertices { count: 0 })
        );
        b.add_xy(1.0, 1.0);
        assert_eq!(
            b.append_vecs(&mut buf).unwrap_err(),
            PolyroundError::from(DiscretizationError::TooFewVertices { count: 1 })
        );
        assert!(buf.is_empty());
    }

    #[test]
    fn duplicate_control_point_reports_index() {
        let mut b = PolygonBuilder::new();
        b.add_xy(0.0, 0.0);
        b.add_xy(1.0, 0.0);
        b.add_xy(1.0, 0.0);
        b.add_xy(0.0, 1.0);
        let mut buf = Vec::new();
        let err = b.append_vecs(&mut buf).unwrap_err();
        assert_eq!(err.control_point_index(), Some(2));
        assert_eq!(err.geometry(), Some(&GeometryError::DuplicateControlPoint));
        // Vertices before the failing point are kept.
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn closing_edge_duplicate_is_detected() {
        let mut b = PolygonBuilder::new();
        b.add_xy(0.0, 0.0);
        b.add_xy(1.0, 0.0);
        b.add_xy(0.0, 0.0);
        let err = b.to_vecs().unwrap_err();
        assert_eq!(err.control_point_index(), Some(0));
    }

    #[test]
    fn large_smooth_radius_reports_its_index() {
        let mut b = PolygonBuilder::new();
        b.add_xy(0.0, 0.0);
        let ok = b.add_xy(4.0, 0.0);
        b.smooth(ok, 0.5, 3).unwrap();
        let bad = b.add_xy(4.0, 3.0);
        b.smooth(bad, 5.0, 3).unwrap();
        b.add_xy(0.0, 4.0);

        let mut buf = Vec::new();
        let err = b.append_vecs(&mut buf).unwrap_err();
        assert_eq!(err.control_point_index(), Some(2));
        assert!(matches!(err.geometry(), Some(GeometryError::LargeSmoothRadius { .. })));
        // Sharp point 0 plus the full fillet of point 1 were emitted first.
        assert_eq!(buf.len(), 1 + 2 + 2);
    }

    #[test]
    fn small_arc_radius_reports_its_index() {
        let mut b = PolygonBuilder::new();
        b.add_xy(0.0, 0.0);
        b.add_xy(10.0, 0.0);
        let c = b.add_xy(10.0, 10.0);
        b.arc(c, 1.0, 4).unwrap();
        let err = b.to_vecs().unwrap_err();
        assert_eq!(err.control_point_index(), Some(2));
        assert!(matches!(err.geometry(), Some(GeometryError::SmallArcRadius { .. })));
    }

    #[test]
    fn chamfer_cuts_square_corners() {
        let mut b = PolygonBuilder::new();
        for (x, y) in [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)] {
            let id = b.add_xy(x, y);
            b.chamfer(id, 1.0).unwrap();
        }
        let verts = b.to_vecs().unwrap();
        assert_eq!(verts.len(), 8);
        // Every other edge is a chamfer cut of the requested length.
        for pair in verts.chunks(2) {
            assert_abs_diff_eq!((pair[1] - pair[0]).norm(), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn generation_is_repeatable_and_appends() {
        let b = rounded_square(1.0, Vector2::new(0.0, 0.0), 4);
        let first = b.to_vecs().unwrap();
        let mut buf = vec![Point2::new(9.0, 9.0)];
        b.append_vecs(&mut buf).unwrap();
        assert_eq!(buf[0], Point2::new(9.0, 9.0));
        assert_eq!(&buf[1..], first.as_slice());
        assert_eq!(b.to_vecs().unwrap(), first);
    }

    #[test]
    fn invalid_params_are_rejected_before_work() {
        let mut b = rounded_square(1.0, Vector2::new(0.0, 0.0), 4);
        b.set_params(DiscretizationParams {
            length_tolerance: -1.0,
            ..DiscretizationParams::default()
        });
        let mut buf = Vec::new();
        assert!(matches!(
            b.append_vecs(&mut buf).unwrap_err(),
            PolyroundError::Discretization(DiscretizationError::InvalidParameters(_))
        ));
        assert!(buf.is_empty());
    }
}
