use thiserror::Error;

/// Top-level error type for polygon construction and discretization.
#[derive(Debug, Error, PartialEq)]
pub enum PolyroundError {
    #[error(transparent)]
    Builder(#[from] BuilderError),

    #[error(transparent)]
    Discretization(#[from] DiscretizationError),

    /// A geometry kernel failed while processing the control point at `index`.
    #[error("control point [{index}]: {source}")]
    AtControlPoint {
        index: usize,
        #[source]
        source: GeometryError,
    },
}

impl PolyroundError {
    /// Returns the index of the offending control point, if the error is tied to one.
    #[must_use]
    pub fn control_point_index(&self) -> Option<usize> {
        match self {
            Self::AtControlPoint { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Returns the underlying geometry error, if any.
    #[must_use]
    pub fn geometry(&self) -> Option<&GeometryError> {
        match self {
            Self::AtControlPoint { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors raised by the arc and fillet kernels.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("equal to previous control point")]
    DuplicateControlPoint,

    #[error("arc radius {radius} too small to span chord of length {chord}")]
    SmallArcRadius { chord: f64, radius: f64 },

    #[error("smoothing radius {radius} too large for edge of length {edge}")]
    LargeSmoothRadius { radius: f64, edge: f64 },

    #[error("badly conditioned smoothing: {0}")]
    BadSmooth(&'static str),
}

/// Errors related to control-point bookkeeping.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BuilderError {
    #[error("control point not found")]
    ControlPointNotFound,
}

/// Errors related to a discretization pass as a whole.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DiscretizationError {
    #[error("too few vertices: need at least 2 control points, got {count}")]
    TooFewVertices { count: usize },

    #[error("invalid discretization parameters: {0}")]
    InvalidParameters(String),
}

/// Convenience type alias for results using [`PolyroundError`].
pub type Result<T> = std::result::Result<T, PolyroundError>;
