use crate::domain::types::{Location, Point};

/// Straight-line distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Unweighted length of a closed tour depot -> stops -> depot.
pub fn tour_distance(route: &[Location], depot: Point) -> f64 {
    let (Some(first), Some(last)) = (route.first(), route.last()) else {
        return 0.0;
    };

    let legs: f64 = route
        .windows(2)
        .map(|pair| distance(pair[0].point, pair[1].point))
        .sum();

    distance(depot, first.point) + legs + distance(last.point, depot)
}
