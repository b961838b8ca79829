use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use crate::config::constant::{COORD_RANGE, DEMAND_RANGE, MAX_GENERATED_CLIENTS};
use crate::domain::types::{Customer, Point, Priority, ProblemInstance};
use crate::utils::round_to;

const PRIORITIES: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

/// Random customer coordinate, rounded to two decimals.
fn random_point(rng: &mut ChaCha8Rng) -> Point {
    let (lo, hi) = COORD_RANGE;
    Point::new(
        round_to(rng.gen_range(lo..=hi), 2),
        round_to(rng.gen_range(lo..=hi), 2),
    )
}

/// Generates a seeded instance with the depot at the origin.
///
/// Customers get integer demands in [`DEMAND_RANGE`] and a uniformly drawn priority.
/// The client count is capped at [`MAX_GENERATED_CLIENTS`].
pub fn generate_instance(n_clients: usize, seed: u64) -> ProblemInstance {
    let n_clients = if n_clients > MAX_GENERATED_CLIENTS {
        warn!(
            "Requested {} clients, generating the maximum of {}",
            n_clients, MAX_GENERATED_CLIENTS
        );
        MAX_GENERATED_CLIENTS
    } else {
        n_clients
    };

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let customers: Vec<Customer> = (0..n_clients)
        .map(|id| {
            let point = random_point(&mut rng);
            let demand = rng.gen_range(DEMAND_RANGE.0..=DEMAND_RANGE.1) as f64;
            let priority = PRIORITIES[rng.gen_range(0..PRIORITIES.len())];
            Customer {
                id,
                point,
                demand,
                priority,
            }
        })
        .collect();

    let instance = ProblemInstance::new(Point::default(), customers);
    info!(
        "Generated instance with {} clients, total demand {}",
        instance.num_customers(),
        instance.total_demand()
    );
    instance
}
