pub mod solution;
pub mod types;

pub use solution::{repartition, Individual};
pub use types::{Customer, Location, Point, Priority, ProblemInstance, Route};
