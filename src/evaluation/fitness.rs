use crate::distance::distance;
use crate::domain::solution::Individual;
use crate::domain::types::{Location, Priority, ProblemInstance};
use crate::evaluation::penalty::{
    autonomy_penalty, lateness_penalty, overload_penalty, stop_penalty, weighted, FitnessParams,
};
use crate::utils::std_dev;

/// Cost components of a single vehicle route.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RouteMetrics {
    /// Priority-weighted distance plus overload, autonomy and stop penalties.
    pub cost: f64,
    pub load: f64,
    /// Lateness of high-priority stops, charged once at solution level.
    pub lateness: f64,
}

/// Priority-weighted travel distance of a closed tour. Each edge between stops is
/// scaled by the priority of its source stop; the depot legs are not scaled.
pub fn weighted_route_distance(
    route: &[Location],
    instance: &ProblemInstance,
    params: &FitnessParams,
) -> f64 {
    let (Some(first), Some(last)) = (route.first(), route.last()) else {
        return 0.0;
    };

    let legs: f64 = route
        .windows(2)
        .map(|pair| {
            let weight = instance.priority_of(&pair[0]).edge_weight();
            distance(pair[0].point, pair[1].point) * weight
        })
        .sum();

    distance(params.depot, first.point) + legs + distance(last.point, params.depot)
}

pub fn route_metrics(
    route: &[Location],
    instance: &ProblemInstance,
    params: &FitnessParams,
) -> RouteMetrics {
    if route.is_empty() {
        return RouteMetrics::default();
    }

    let route_distance = weighted_route_distance(route, instance, params);
    let load: f64 = route.iter().map(|loc| instance.demand_of(loc)).sum();

    let lateness: f64 = if params.lateness_weight > 0.0 {
        route
            .iter()
            .enumerate()
            .filter(|(_, loc)| instance.priority_of(loc) == Priority::High)
            .map(|(i, _)| lateness_penalty(i + 1, route.len(), params))
            .sum()
    } else {
        0.0
    };

    let cost = route_distance
        + overload_penalty(load, params)
        + autonomy_penalty(route_distance, params)
        + stop_penalty(route.len(), params);

    RouteMetrics {
        cost,
        load,
        lateness,
    }
}

/// Scalar cost of a complete solution. Lower is better.
pub fn find_fitness(
    solution: &Individual,
    instance: &ProblemInstance,
    params: &FitnessParams,
) -> f64 {
    let metrics: Vec<RouteMetrics> = solution
        .routes
        .iter()
        .map(|route| route_metrics(route, instance, params))
        .collect();

    let mut total: f64 = metrics.iter().map(|m| m.cost).sum();

    if params.balance_load_weight > 0.0 {
        let loads: Vec<f64> = metrics.iter().map(|m| m.load).collect();
        total += weighted(std_dev(&loads), params.balance_load_weight);
    }

    if params.balance_distance_weight > 0.0 {
        let costs: Vec<f64> = metrics.iter().map(|m| m.cost).collect();
        total += weighted(std_dev(&costs), params.balance_distance_weight);
    }

    total + metrics.iter().map(|m| m.lateness).sum::<f64>()
}
