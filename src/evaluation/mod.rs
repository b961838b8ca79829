pub mod fitness;
pub mod penalty;

pub use fitness::{find_fitness, route_metrics, weighted_route_distance, RouteMetrics};
pub use penalty::FitnessParams;
