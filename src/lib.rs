//! Multi-vehicle delivery routing with a generational genetic algorithm.
//!
//! Customers are partitioned into one route per vehicle and ordered within each route.
//! The search minimizes priority-weighted distance plus soft penalties for overload,
//! autonomy overrun, excess stops, fleet imbalance and late high-priority deliveries.

pub mod baseline;
pub mod config;
pub mod distance;
pub mod domain;
pub mod error;
pub mod evaluation;
pub mod fixtures;
pub mod reporting;
pub mod setup;
pub mod solver;
pub mod utils;

pub use config::GaConfig;
pub use domain::{Customer, Individual, Location, Point, Priority, ProblemInstance, Route};
pub use error::{GaError, GaResult};
pub use evaluation::{find_fitness, FitnessParams};
pub use solver::genetic::{run_ga, run_ga_with_observer, GaOutcome, GenerationSnapshot};
