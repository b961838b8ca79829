use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A planar coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Delivery priority of a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    #[default]
    Low,
}

impl Priority {
    /// Normalizes a raw label. Unknown labels fall back to `Low`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "high" => Priority::High,
            "medium" => Priority::Medium,
            _ => Priority::Low,
        }
    }

    /// Multiplier applied to edges leaving a stop of this priority.
    pub fn edge_weight(self) -> f64 {
        match self {
            Priority::High => 1.5,
            Priority::Medium => 1.2,
            Priority::Low => 1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: usize,
    pub point: Point,
    pub demand: f64,
    pub priority: Priority,
}

/// A customer reference carried through routes. `index` is the position of the
/// customer in [`ProblemInstance::customers`]; identity never depends on `point`.
#[derive(Debug, Clone, Copy)]
pub struct Location {
    pub index: usize,
    pub point: Point,
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

/// The stops of one vehicle, depot excluded at both ends.
pub type Route = Vec<Location>;

#[derive(Debug, Clone)]
pub struct ProblemInstance {
    pub depot: Point,
    pub customers: Vec<Customer>,
}

impl ProblemInstance {
    /// Builds an instance, re-numbering customer ids to their position.
    pub fn new(depot: Point, customers: Vec<Customer>) -> Self {
        let customers = customers
            .into_iter()
            .enumerate()
            .map(|(id, customer)| Customer { id, ..customer })
            .collect();
        Self { depot, customers }
    }

    pub fn num_customers(&self) -> usize {
        self.customers.len()
    }

    pub fn locations(&self) -> Vec<Location> {
        self.customers
            .iter()
            .map(|c| Location {
                index: c.id,
                point: c.point,
            })
            .collect()
    }

    pub fn demand_of(&self, location: &Location) -> f64 {
        self.customers
            .get(location.index)
            .map_or(0.0, |c| c.demand)
    }

    pub fn priority_of(&self, location: &Location) -> Priority {
        self.customers
            .get(location.index)
            .map_or(Priority::Low, |c| c.priority)
    }

    pub fn total_demand(&self) -> f64 {
        self.customers.iter().map(|c| c.demand).sum()
    }
}
