pub mod arc_2d;
pub mod fillet_2d;
pub mod orientation;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Returns the left-pointing normal of a direction vector.
#[must_use]
pub fn left_normal(dir: Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}

/// Returns true if every component of `a` lies within `tol` of the same component of `b`.
#[must_use]
pub fn equal_elem(a: &Point2, b: &Point2, tol: f64) -> bool {
    (a.x - b.x).abs() <= tol && (a.y - b.y).abs() <= tol
}
