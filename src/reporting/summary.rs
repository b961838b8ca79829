use std::fmt::Write as _;

use serde::Serialize;

use crate::config::GaConfig;
use crate::distance::tour_distance;
use crate::domain::solution::Individual;
use crate::domain::types::{Point, ProblemInstance};
use crate::utils::round_to;

/// Per-vehicle indicators of a returned solution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleSummary {
    /// 1-based vehicle number.
    pub vehicle: usize,
    pub stops: usize,
    pub load: f64,
    /// Unweighted closed-tour distance.
    pub distance: f64,
    pub capacity_excess: f64,
    pub autonomy_excess: f64,
    pub stop_excess: usize,
}

impl VehicleSummary {
    pub fn has_excess(&self) -> bool {
        self.capacity_excess > 0.0 || self.autonomy_excess > 0.0 || self.stop_excess > 0
    }
}

pub fn vehicle_summary(
    solution: &Individual,
    instance: &ProblemInstance,
    config: &GaConfig,
) -> Vec<VehicleSummary> {
    let autonomy = config.autonomy_limit();
    let depot = config.depot_for(instance);

    solution
        .routes
        .iter()
        .enumerate()
        .map(|(idx, route)| {
            let distance = tour_distance(route, depot);
            let load: f64 = route.iter().map(|loc| instance.demand_of(loc)).sum();

            VehicleSummary {
                vehicle: idx + 1,
                stops: route.len(),
                load: round_to(load, 3),
                distance: round_to(distance, 3),
                capacity_excess: round_to((load - config.max_capacity).max(0.0), 3),
                autonomy_excess: round_to((distance - autonomy).max(0.0), 3),
                stop_excess: route.len().saturating_sub(config.max_stops_per_vehicle),
            }
        })
        .collect()
}

/// Unweighted distance travelled by the whole fleet.
pub fn total_distance(solution: &Individual, depot: Point) -> f64 {
    solution
        .routes
        .iter()
        .map(|route| tour_distance(route, depot))
        .sum()
}

/// First generation (from 1 on) whose best equals the final best; the history length
/// when no such generation exists.
pub fn convergence_generation(history: &[f64]) -> usize {
    let Some(final_best) = history.last() else {
        return 0;
    };

    (1..history.len())
        .find(|&i| history[i] == *final_best)
        .unwrap_or(history.len())
}

/// Plain-text run report for drivers and dispatchers.
pub fn render_report(summaries: &[VehicleSummary], total_distance: f64, capacity: f64) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total distance: {:.2} km", total_distance);
    let _ = writeln!(out);

    for s in summaries {
        let _ = writeln!(out, "Vehicle {}:", s.vehicle);
        let _ = writeln!(out, "- Distance: {:.2} km", s.distance);
        let _ = writeln!(out, "- Load: {}/{}", s.load, capacity);
        let _ = writeln!(out, "- Stops: {}", s.stops);

        let mut excess = Vec::new();
        if s.capacity_excess > 0.0 {
            excess.push("capacity");
        }
        if s.autonomy_excess > 0.0 {
            excess.push("autonomy");
        }
        if s.stop_excess > 0 {
            excess.push("stops");
        }
        if !excess.is_empty() {
            let _ = writeln!(out, "- Excess: {}", excess.join(", "));
        }
        let _ = writeln!(out);
    }

    out
}
