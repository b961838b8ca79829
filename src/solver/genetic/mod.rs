pub mod crossover;
pub mod mutation;
pub mod population;
pub mod search;

pub use crossover::order_crossover;
pub use mutation::swap_mutation;
pub use population::{
    breed, evolve_population, generate_individual, initial_population, rank_population, Ranked,
};
pub use search::{run_ga, run_ga_with_observer, GaOutcome, GenerationSnapshot};
