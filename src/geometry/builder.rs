use std::f64::consts::TAU;

use nalgebra::Rotation2;
use slotmap::SlotMap;
use tracing::debug;

use super::control_point::{ControlPoint, ControlPointId};
use crate::error::{BuilderError, Result};
use crate::math::orientation::signed_area;
use crate::math::{Point2, Vector2};
use crate::tessellation::{DiscretizationParams, DiscretizeBoundary};

/// Builds closed polygons out of sharp, smoothed and arc control points.
///
/// Control points are kept in insertion order, which is the winding order of
/// the resulting boundary. The sequence is always closed: the last control
/// point connects back to the first.
///
/// Every `add*` call returns a [`ControlPointId`] that stays valid until the
/// point is dropped or the builder is reset. Stale ids are rejected instead
/// of addressing whatever point now occupies the slot.
#[derive(Debug, Clone, Default)]
pub struct PolygonBuilder {
    points: Vec<ControlPoint>,
    slots: SlotMap<ControlPointId, usize>,
    params: DiscretizationParams,
}

impl PolygonBuilder {
    /// Creates a new, empty builder with default discretization params.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty builder discretizing with `params`.
    #[must_use]
    pub fn with_params(params: DiscretizationParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    /// Returns the discretization params.
    #[must_use]
    pub fn params(&self) -> &DiscretizationParams {
        &self.params
    }

    /// Replaces the discretization params.
    pub fn set_params(&mut self, params: DiscretizationParams) {
        self.params = params;
    }

    // --- Point insertion ---

    /// Adds a point in absolute cartesian coordinates.
    pub fn add(&mut self, position: Point2) -> ControlPointId {
        let index = self.points.len();
        let id = self.slots.insert(index);
        self.points.push(ControlPoint::new(id, position));
        id
    }

    /// Adds the point `(x, y)` in absolute cartesian coordinates.
    pub fn add_xy(&mut self, x: f64, y: f64) -> ControlPointId {
        self.add(Point2::new(x, y))
    }

    /// Adds a point in absolute polar coordinates.
    pub fn add_polar(&mut self, r: f64, theta: f64) -> ControlPointId {
        let (sin, cos) = theta.sin_cos();
        self.add(Point2::new(r * cos, r * sin))
    }

    /// Adds a point relative to the last point added, or to the origin if the
    /// builder is empty.
    pub fn add_relative(&mut self, delta: Vector2) -> ControlPointId {
        let base = self.last().map_or_else(Point2::origin, ControlPoint::position);
        self.add(base + delta)
    }

    /// Shorthand for [`add_relative`](Self::add_relative) with `(dx, dy)`.
    pub fn add_relative_xy(&mut self, dx: f64, dy: f64) -> ControlPointId {
        self.add_relative(Vector2::new(dx, dy))
    }

    /// Drops the most recently added point. Does nothing if the builder is empty.
    pub fn drop_last(&mut self) {
        if let Some(point) = self.points.pop() {
            self.slots.remove(point.id());
        }
    }

    /// Drops all points. Params are kept.
    pub fn reset(&mut self) {
        self.points.clear();
        self.slots.clear();
    }

    // --- Corner modes ---

    /// Rounds the corner at `id` with a fillet of `radius` discretized in `facets` chords.
    ///
    /// The mode is left unchanged unless `radius > 0` and `facets > 0`.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::ControlPointNotFound`] if `id` is stale.
    pub fn smooth(&mut self, id: ControlPointId, radius: f64, facets: u32) -> Result<()> {
        if !self.control_point_mut(id)?.smooth(radius, facets) {
            debug!(radius, facets, "ignoring invalid smoothing");
        }
        Ok(())
    }

    /// Replaces the edge from the previous point to `id` with an arc of signed
    /// `radius` discretized in `facets` chords. A positive radius sweeps
    /// counter-clockwise, a negative one clockwise.
    ///
    /// The mode is left unchanged unless `radius != 0` and `facets > 0`.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::ControlPointNotFound`] if `id` is stale.
    pub fn arc(&mut self, id: ControlPointId, radius: f64, facets: u32) -> Result<()> {
        if !self.control_point_mut(id)?.arc(radius, facets) {
            debug!(radius, facets, "ignoring invalid arc");
        }
        Ok(())
    }

    /// Cuts the corner at `id` with a single straight facet, `size` long for a
    /// right-angle corner.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::ControlPointNotFound`] if `id` is stale.
    pub fn chamfer(&mut self, id: ControlPointId, size: f64) -> Result<()> {
        if !self.control_point_mut(id)?.chamfer(size) {
            debug!(size, "ignoring invalid chamfer");
        }
        Ok(())
    }

    // --- Regular polygons ---

    /// Replaces the points with those of a regular `n`-gon whose vertices lie
    /// `center_distance` from the origin, the first one on the +x axis.
    /// Does nothing if `n < 3`.
    pub fn nagon(&mut self, n: usize, center_distance: f64) {
        self.nagon_smoothed(n, center_distance, 0, 0.0);
    }

    /// Like [`nagon`](Self::nagon), additionally smoothing every corner with
    /// `radius` and `facets`. Does nothing if `n < 3` or `radius > center_distance`.
    pub fn nagon_smoothed(&mut self, n: usize, center_distance: f64, facets: u32, radius: f64) {
        if n < 3 || (radius != 0.0 && radius > center_distance) {
            debug!(n, center_distance, radius, "ignoring invalid n-gon");
            return;
        }
        self.reset();
        #[allow(clippy::cast_precision_loss)]
        let step = Rotation2::new(TAU / n as f64);
        let mut v = Vector2::new(center_distance, 0.0);
        for _ in 0..n {
            self.add(Point2::from(v));
            if let Some(point) = self.points.last_mut() {
                point.smooth(radius, facets);
            }
            v = step * v;
        }
    }

    // --- Queries ---

    /// Returns the number of control points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if there are no control points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the control points in winding order.
    #[must_use]
    pub fn control_points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Returns the most recently added control point.
    #[must_use]
    pub fn last(&self) -> Option<&ControlPoint> {
        self.points.last()
    }

    /// Returns the control point for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::ControlPointNotFound`] if `id` is stale.
    pub fn control_point(&self, id: ControlPointId) -> Result<&ControlPoint> {
        let index = *self.slots.get(id).ok_or(BuilderError::ControlPointNotFound)?;
        Ok(&self.points[index])
    }

    fn control_point_mut(&mut self, id: ControlPointId) -> Result<&mut ControlPoint> {
        let index = *self.slots.get(id).ok_or(BuilderError::ControlPointNotFound)?;
        Ok(&mut self.points[index])
    }

    /// Returns the signed area enclosed by the control-point positions,
    /// positive for counter-clockwise winding in y-up coordinates.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        let positions: Vec<Point2> = self.points.iter().map(ControlPoint::position).collect();
        signed_area(&positions)
    }

    /// Returns true if the control points wind clockwise as seen in y-down
    /// (raster) coordinates, the convention of the vertex consumer. This is
    /// the case when the y-up [`signed_area`](Self::signed_area) is positive.
    #[must_use]
    pub fn is_clockwise(&self) -> bool {
        self.signed_area() > 0.0
    }

    // --- Discretization ---

    /// Appends the discretized boundary to `buf`. The builder is not modified,
    /// so repeated calls produce identical output.
    ///
    /// On error the vertices emitted before the failing control point remain in `buf`.
    ///
    /// # Errors
    ///
    /// See [`DiscretizeBoundary::execute`].
    pub fn append_vecs(&self, buf: &mut Vec<Point2>) -> Result<()> {
        DiscretizeBoundary::new(&self.points, self.params).execute(buf)
    }

    /// Discretizes the boundary into a new buffer.
    ///
    /// # Errors
    ///
    /// See [`DiscretizeBoundary::execute`].
    pub fn to_vecs(&self) -> Result<Vec<Point2>> {
        let mut buf = Vec::new();
        self.append_vecs(&mut buf)?;
        Ok(buf)
    }

    /// Appends the discretized boundary to `buf` as interleaved `x, y` `f32`
    /// pairs ready for upload as vertex data.
    ///
    /// `scratch` is cleared and used for the intermediate `f64` vertices, so
    /// reusing it across passes avoids reallocating.
    ///
    /// # Errors
    ///
    /// See [`DiscretizeBoundary::execute`]. On error `buf` is left untouched.
    #[allow(clippy::cast_possible_truncation)]
    pub fn append_vertex_data(&self, scratch: &mut Vec<Point2>, buf: &mut Vec<f32>) -> Result<()> {
        scratch.clear();
        self.append_vecs(scratch)?;
        buf.reserve(scratch.len() * 2);
        for v in scratch.iter() {
            buf.extend_from_slice(&[v.x as f32, v.y as f32]);
        }
        Ok(())
    }
}
