pub mod error;
pub mod geometry;
pub mod math;
pub mod tessellation;

pub use error::{PolyroundError, Result};
pub use geometry::{ControlPoint, ControlPointId, CornerMode, PolygonBuilder};
pub use tessellation::DiscretizationParams;
