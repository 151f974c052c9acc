use super::Point2;

/// Winding of an ordered triple of points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    Collinear,
}

/// Classifies the ordered triple `(p1, p2, p3)` by comparing the slopes of
/// `p1→p2` and `p2→p3`.
#[must_use]
pub fn orientation(p1: &Point2, p2: &Point2, p3: &Point2) -> Orientation {
    let slope1 = (p2.y - p1.y) * (p3.x - p2.x);
    let slope2 = (p3.y - p2.y) * (p2.x - p1.x);
    let diff = slope2 - slope1;
    if diff > 0.0 {
        Orientation::CounterClockwise
    } else if diff < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Returns `magnitude` signed by the orientation of `(p1, p2, p3)`:
/// `|magnitude|` for counter-clockwise, `-|magnitude|` for clockwise and
/// zero for collinear points.
#[must_use]
pub fn copy_orientation(magnitude: f64, p1: &Point2, p2: &Point2, p3: &Point2) -> f64 {
    match orientation(p1, p2, p3) {
        Orientation::CounterClockwise => magnitude.abs(),
        Orientation::Clockwise => -magnitude.abs(),
        Orientation::Collinear => 0.0,
    }
}

/// Computes the signed area of a closed polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}
