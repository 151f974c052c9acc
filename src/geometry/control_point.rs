use std::f64::consts::FRAC_1_SQRT_2;

use crate::math::Point2;

slotmap::new_key_type! {
    /// Stable handle to a control point in a [`PolygonBuilder`](super::PolygonBuilder).
    pub struct ControlPointId;
}

/// How a control point shapes the boundary around it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CornerMode {
    /// The point is emitted as a polygon vertex.
    Sharp,
    /// The corner is replaced by a tangent rounding arc of `facets` chords.
    Smoothed { radius: f64, facets: u32 },
    /// The edge from the previous control point to this one is a circular arc
    /// of `facets` chords. Positive `radius` sweeps counter-clockwise,
    /// negative clockwise.
    Arc { radius: f64, facets: u32 },
}

/// A builder-level polygon point annotated with its [`CornerMode`].
///
/// A smoothed control point does not itself lie on the generated boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    id: ControlPointId,
    position: Point2,
    mode: CornerMode,
}

impl ControlPoint {
    pub(crate) fn new(id: ControlPointId, position: Point2) -> Self {
        Self {
            id,
            position,
            mode: CornerMode::Sharp,
        }
    }

    /// Returns the handle of this control point.
    #[must_use]
    pub fn id(&self) -> ControlPointId {
        self.id
    }

    /// Returns the absolute position of this control point.
    #[must_use]
    pub fn position(&self) -> Point2 {
        self.position
    }

    /// Returns the corner mode.
    #[must_use]
    pub fn mode(&self) -> CornerMode {
        self.mode
    }

    /// Rounds this corner. Returns `false` and leaves the mode untouched unless
    /// `radius > 0` and `facets > 0`.
    pub(crate) fn smooth(&mut self, radius: f64, facets: u32) -> bool {
        if radius.is_finite() && radius > 0.0 && facets > 0 {
            self.mode = CornerMode::Smoothed { radius, facets };
            return true;
        }
        false
    }

    /// Arcs the incoming edge. Returns `false` and leaves the mode untouched
    /// unless `radius != 0` and `facets > 0`.
    pub(crate) fn arc(&mut self, radius: f64, facets: u32) -> bool {
        if radius.is_finite() && radius != 0.0 && facets > 0 {
            self.mode = CornerMode::Arc { radius, facets };
            return true;
        }
        false
    }

    /// Cuts the corner with a single facet. For a right angle the cut is `size` long.
    pub(crate) fn chamfer(&mut self, size: f64) -> bool {
        self.smooth(size * FRAC_1_SQRT_2, 1)
    }
}
