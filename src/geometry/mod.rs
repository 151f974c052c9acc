pub mod builder;
pub mod control_point;

pub use builder::PolygonBuilder;
pub use control_point::{ControlPoint, ControlPointId, CornerMode};
