use rand::seq::index::sample;
use rand::seq::SliceRandom;
use rand::Rng;
use rayon::prelude::*;
use tracing::trace;

use crate::domain::solution::{repartition, Individual};
use crate::domain::types::{ProblemInstance, Route};
use crate::error::{GaError, GaResult};
use crate::evaluation::fitness::find_fitness;
use crate::evaluation::penalty::FitnessParams;

use super::crossover::order_crossover;
use super::mutation::swap_mutation;

/// Parents are drawn from this many top-ranked individuals.
pub const PARENT_POOL: usize = 10;

/// An individual paired with its fitness.
pub type Ranked = (Individual, f64);

/// Random capacity-aware individual: customers are shuffled and each goes to the first
/// vehicle with room for it, or to the least-loaded vehicle when none has room.
pub fn generate_individual<R: Rng>(
    instance: &ProblemInstance,
    capacity: f64,
    n_vehicles: usize,
    rng: &mut R,
) -> Individual {
    // zero vehicles degrades to a single route, as in `repartition`
    let n_vehicles = n_vehicles.max(1);

    let mut shuffled = instance.locations();
    shuffled.shuffle(rng);

    let mut routes: Vec<Route> = vec![Vec::new(); n_vehicles];
    let mut loads = vec![0.0_f64; n_vehicles];

    for location in shuffled {
        let demand = instance.demand_of(&location);
        let vehicle = loads
            .iter()
            .position(|&load| load + demand <= capacity)
            .unwrap_or_else(|| least_loaded(&loads));

        routes[vehicle].push(location);
        loads[vehicle] += demand;
    }

    Individual::new(routes)
}

fn least_loaded(loads: &[f64]) -> usize {
    loads
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(b.1))
        .map_or(0, |(idx, _)| idx)
}

pub fn initial_population<R: Rng>(
    instance: &ProblemInstance,
    pop_size: usize,
    capacity: f64,
    n_vehicles: usize,
    rng: &mut R,
) -> Vec<Individual> {
    (0..pop_size)
        .map(|_| generate_individual(instance, capacity, n_vehicles, rng))
        .collect()
}

/// Score every individual in parallel, then stable-sort ascending by fitness.
pub fn rank_population(
    population: Vec<Individual>,
    instance: &ProblemInstance,
    params: &FitnessParams,
) -> Vec<Ranked> {
    let mut ranked: Vec<Ranked> = population
        .into_par_iter()
        .map(|individual| {
            let fitness = find_fitness(&individual, instance, params);
            (individual, fitness)
        })
        .collect();

    ranked.par_sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked
}

/// Flatten both parents, apply order crossover then swap mutation, and split the child
/// back into as many routes as the first parent has.
pub fn breed<R: Rng>(
    parent1: &Individual,
    parent2: &Individual,
    mutation_prob: f64,
    rng: &mut R,
) -> GaResult<Individual> {
    let child = order_crossover(&parent1.flatten(), &parent2.flatten(), rng)?;
    let child = swap_mutation(&child, mutation_prob, rng);
    Ok(Individual::new(repartition(&child, parent1.num_routes())))
}

/// Next generation: the top `elitism` individuals unchanged, then offspring of parents
/// sampled from the best [`PARENT_POOL`] until `pop_size` is reached.
pub fn evolve_population<R: Rng>(
    ranked: &[Ranked],
    mutation_prob: f64,
    pop_size: usize,
    elitism: usize,
    rng: &mut R,
) -> GaResult<Vec<Individual>> {
    let mut next: Vec<Individual> = ranked
        .iter()
        .take(elitism.min(pop_size))
        .map(|(individual, _)| individual.clone())
        .collect();

    let pool = PARENT_POOL.min(pop_size).min(ranked.len());
    if next.len() < pop_size && pool < 2 {
        return Err(GaError::InvalidInput(format!(
            "breeding needs two ranked parents, got {}",
            pool
        )));
    }
    while next.len() < pop_size {
        let parents = sample(rng, pool, 2);
        let (p1, p2) = (&ranked[parents.index(0)].0, &ranked[parents.index(1)].0);
        next.push(breed(p1, p2, mutation_prob, rng)?);
    }

    trace!("bred {} offspring", pop_size.saturating_sub(elitism));
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Customer, Point, Priority};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn instance(n: usize, demand: f64) -> ProblemInstance {
        ProblemInstance::new(
            Point::default(),
            (0..n)
                .map(|i| Customer {
                    id: i,
                    point: Point::new(i as f64 + 1.0, (i % 3) as f64),
                    demand,
                    priority: Priority::Low,
                })
                .collect(),
        )
    }

    fn sorted_ids(individual: &Individual) -> Vec<usize> {
        let mut ids: Vec<usize> = individual.flatten().iter().map(|l| l.index).collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn initial_individual_has_one_route_per_vehicle() {
        let inst = instance(9, 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let individual = generate_individual(&inst, 100.0, 3, &mut rng);

        assert_eq!(individual.num_routes(), 3);
        assert_eq!(individual.num_stops(), 9);
        assert_eq!(sorted_ids(&individual), (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn first_fit_respects_capacity_while_possible() {
        let inst = instance(6, 10.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let individual = generate_individual(&inst, 20.0, 3, &mut rng);

        for route in &individual.routes {
            assert_eq!(route.len(), 2);
        }
    }

    #[test]
    fn overflow_goes_to_least_loaded_vehicle() {
        let inst = instance(5, 10.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        // two vehicles with room for one stop each, three stops left over
        let individual = generate_individual(&inst, 10.0, 2, &mut rng);

        assert_eq!(individual.num_stops(), 5);
        let sizes: Vec<usize> = individual.routes.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![3, 2]);
    }

    #[test]
    fn ranking_is_ascending() {
        let inst = instance(8, 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let population = initial_population(&inst, 20, 100.0, 2, &mut rng);
        let ranked = rank_population(population, &inst, &FitnessParams::new(100.0, 1.0));

        assert_eq!(ranked.len(), 20);
        assert!(ranked.windows(2).all(|w| w[0].1 <= w[1].1));
    }

    #[test]
    fn elites_survive_unchanged() {
        let inst = instance(8, 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let population = initial_population(&inst, 12, 100.0, 2, &mut rng);
        let ranked = rank_population(population, &inst, &FitnessParams::new(100.0, 1.0));

        let next = evolve_population(&ranked, 0.5, 12, 3, &mut rng).unwrap();

        assert_eq!(next.len(), 12);
        for i in 0..3 {
            assert_eq!(next[i], ranked[i].0);
        }
        for child in &next {
            assert_eq!(child.num_routes(), 2);
            assert_eq!(sorted_ids(child), (0..8).collect::<Vec<_>>());
        }
    }

    #[test]
    fn elitism_larger_than_population_is_clamped() {
        let inst = instance(5, 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let population = initial_population(&inst, 4, 100.0, 2, &mut rng);
        let ranked = rank_population(population, &inst, &FitnessParams::new(100.0, 1.0));

        let next = evolve_population(&ranked, 0.2, 4, 10, &mut rng).unwrap();
        assert_eq!(next.len(), 4);
    }

    #[test]
    fn offspring_without_two_parents_is_an_error() {
        let inst = instance(5, 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let population = initial_population(&inst, 1, 100.0, 2, &mut rng);
        let ranked = rank_population(population, &inst, &FitnessParams::new(100.0, 1.0));

        let result = evolve_population(&ranked, 0.2, 3, 0, &mut rng);
        assert!(matches!(result, Err(GaError::InvalidInput(_))));

        // a generation filled by elites needs no parents
        let next = evolve_population(&ranked, 0.2, 1, 1, &mut rng).unwrap();
        assert_eq!(next, vec![ranked[0].0.clone()]);
    }

    #[test]
    fn breeding_too_few_customers_fails() {
        let inst = instance(2, 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let a = generate_individual(&inst, 100.0, 1, &mut rng);
        let b = generate_individual(&inst, 100.0, 1, &mut rng);

        assert!(breed(&a, &b, 0.0, &mut rng).is_err());
    }
}
