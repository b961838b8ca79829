use rand::seq::index::sample;
use rand::Rng;

use crate::domain::types::Location;

/// Swap mutation: with probability `probability`, exchange two distinct random positions.
/// At most one swap per call.
pub fn swap_mutation<R: Rng>(genes: &[Location], probability: f64, rng: &mut R) -> Vec<Location> {
    let mut mutated = genes.to_vec();

    if mutated.len() > 1 && rng.gen::<f64>() < probability {
        let pair = sample(rng, mutated.len(), 2);
        mutated.swap(pair.index(0), pair.index(1));
    }

    mutated
}
