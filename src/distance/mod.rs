pub mod euclidean;

pub use euclidean::{distance, tour_distance};
