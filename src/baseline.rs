use itertools::Itertools;
use tracing::debug;

use crate::config::constant::BRUTE_FORCE_LIMIT;
use crate::distance::distance;
use crate::domain::types::Point;

/// Exact single-vehicle tour by exhaustive search, for comparison with the GA on small
/// instances. `None` for empty inputs or more than [`BRUTE_FORCE_LIMIT`] points.
pub fn brute_force_tsp(points: &[Point], depot: Point) -> Option<(f64, Vec<Point>)> {
    if points.is_empty() || points.len() > BRUTE_FORCE_LIMIT {
        return None;
    }

    let best = points
        .iter()
        .copied()
        .permutations(points.len())
        .map(|perm| {
            let cost = closed_tour_cost(&perm, depot);
            (cost, perm)
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))?;

    debug!("Exact tour over {} points costs {:.2}", points.len(), best.0);
    Some(best)
}

fn closed_tour_cost(perm: &[Point], depot: Point) -> f64 {
    let legs: f64 = perm
        .iter()
        .tuple_windows()
        .map(|(a, b)| distance(*a, *b))
        .sum();
    distance(depot, perm[0]) + legs + distance(perm[perm.len() - 1], depot)
}

/// Relative gap in percent between a GA distance and the exact one.
pub fn optimality_gap(ga_distance: f64, exact: f64) -> Option<f64> {
    (exact > 0.0).then(|| 100.0 * (ga_distance - exact) / exact)
}
