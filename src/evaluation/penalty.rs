use crate::domain::types::Point;

/// Weights and limits of the composite cost model.
#[derive(Debug, Clone, PartialEq)]
pub struct FitnessParams {
    pub capacity: f64,
    pub overload_weight: f64,
    pub autonomy_limit: f64,
    pub autonomy_weight: f64,
    pub depot: Point,
    pub balance_load_weight: f64,
    pub balance_distance_weight: f64,
    pub lateness_weight: f64,
    pub max_stops: usize,
    pub stop_weight: f64,
}

impl FitnessParams {
    /// Capacity model only; every other term keeps its default.
    pub fn new(capacity: f64, overload_weight: f64) -> Self {
        Self {
            capacity,
            overload_weight,
            ..Self::default()
        }
    }
}

impl Default for FitnessParams {
    fn default() -> Self {
        Self {
            capacity: f64::INFINITY,
            overload_weight: 0.0,
            autonomy_limit: f64::INFINITY,
            autonomy_weight: 10.0,
            depot: Point::default(),
            balance_load_weight: 0.0,
            balance_distance_weight: 0.0,
            lateness_weight: 0.0,
            max_stops: 10,
            stop_weight: 5.0,
        }
    }
}

/// `amount * weight`, where a zero amount costs nothing even under an infinite weight.
pub fn weighted(amount: f64, weight: f64) -> f64 {
    if amount == 0.0 {
        return 0.0;
    }
    amount * weight
}

/// Excess of `value` over `limit`, times `weight`. Never negative for non-negative weights.
pub fn excess_penalty(value: f64, limit: f64, weight: f64) -> f64 {
    weighted((value - limit).max(0.0), weight)
}

pub fn overload_penalty(load: f64, params: &FitnessParams) -> f64 {
    excess_penalty(load, params.capacity, params.overload_weight)
}

pub fn autonomy_penalty(route_distance: f64, params: &FitnessParams) -> f64 {
    excess_penalty(route_distance, params.autonomy_limit, params.autonomy_weight)
}

pub fn stop_penalty(stops: usize, params: &FitnessParams) -> f64 {
    weighted(stops.saturating_sub(params.max_stops) as f64, params.stop_weight)
}

/// Penalty for a high-priority stop at 1-based `position` of a route with `route_len` stops.
pub fn lateness_penalty(position: usize, route_len: usize, params: &FitnessParams) -> f64 {
    (position as f64 / route_len.max(1) as f64) * params.lateness_weight
}
