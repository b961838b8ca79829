use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, span, trace, Level};

use crate::config::GaConfig;
use crate::domain::solution::Individual;
use crate::domain::types::ProblemInstance;
use crate::error::{GaError, GaResult};
use crate::evaluation::penalty::FitnessParams;

use super::population::{evolve_population, initial_population, rank_population};

/// Smallest instance order crossover can work on.
pub const MIN_CUSTOMERS: usize = 3;

/// Ranked state of one generation, handed to the observer before the next one is bred.
#[derive(Debug, Clone, Copy)]
pub struct GenerationSnapshot<'a> {
    pub generation: usize,
    pub best: &'a Individual,
    pub best_fitness: f64,
    pub history: &'a [f64],
}

#[derive(Debug, Clone)]
pub struct GaOutcome {
    pub best_solution: Individual,
    pub best_fitness: f64,
    /// Generation in which `best_solution` was first reached.
    pub best_generation: usize,
    /// Rank-0 fitness of every generation, in order.
    pub fitness_history: Vec<f64>,
}

/// Mutable state owned by a single run.
struct SearchState {
    rng: ChaCha8Rng,
    population: Vec<Individual>,
    best_so_far: Option<(Individual, f64)>,
    best_so_far_generation: usize,
    history: Vec<f64>,
}

impl SearchState {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            population: Vec::new(),
            best_so_far: None,
            best_so_far_generation: 0,
            history: Vec::new(),
        }
    }

    /// Keeps the earliest individual on ties; only a strictly lower fitness replaces it.
    fn record(&mut self, generation: usize, candidate: &Individual, fitness: f64) {
        let improved = self
            .best_so_far
            .as_ref()
            .map_or(true, |(_, best)| fitness < *best);

        if improved {
            if self.best_so_far.is_some() {
                info!(
                    "New best at generation {}: fitness = {:.2}",
                    generation, fitness
                );
            }
            self.best_so_far = Some((candidate.clone(), fitness));
            self.best_so_far_generation = generation;
        }
        self.history.push(fitness);
    }
}

fn check_instance(instance: &ProblemInstance) -> GaResult<()> {
    if instance.num_customers() < MIN_CUSTOMERS {
        return Err(GaError::InvalidInput(format!(
            "at least {} customers are required, got {}",
            MIN_CUSTOMERS,
            instance.num_customers()
        )));
    }
    Ok(())
}

/// Run the generational GA without an observer.
pub fn run_ga(instance: &ProblemInstance, config: &GaConfig) -> GaResult<GaOutcome> {
    run_ga_with_observer(instance, config, |_| {})
}

/// Run the generational GA. `observer` is called synchronously once per generation with
/// the ranked best of that generation and the history so far.
///
/// Every run seeds its own `ChaCha8Rng` from `config.seed`, so identical inputs give
/// identical outcomes.
pub fn run_ga_with_observer<F>(
    instance: &ProblemInstance,
    config: &GaConfig,
    mut observer: F,
) -> GaResult<GaOutcome>
where
    F: FnMut(&GenerationSnapshot<'_>),
{
    config.validate()?;
    check_instance(instance)?;

    let params: FitnessParams = config.fitness_params(instance);
    let mut state = SearchState::new(config.seed);

    info!(
        "Starting GA with {} customers, {} vehicles, {} generations, population {}",
        instance.num_customers(),
        config.n_vehicles,
        config.n_generations,
        config.pop_size
    );

    {
        let span = span!(Level::INFO, "setup");
        let _guard = span.enter();
        state.population = initial_population(
            instance,
            config.pop_size,
            config.max_capacity,
            config.n_vehicles,
            &mut state.rng,
        );
    }

    let loop_span = span!(
        Level::INFO,
        "generation_loop",
        total_generations = config.n_generations
    );
    let _loop_guard = loop_span.enter();

    for generation in 0..config.n_generations {
        let gen_span = span!(Level::DEBUG, "generation", generation = generation);
        let _gen_guard = gen_span.enter();

        let population = std::mem::take(&mut state.population);
        let ranked = rank_population(population, instance, &params);

        let (generation_best, generation_fitness) = &ranked[0];
        state.record(generation, generation_best, *generation_fitness);
        debug!(
            "generation {}: best = {:.2}, worst = {:.2}",
            generation,
            generation_fitness,
            ranked[ranked.len() - 1].1
        );
        trace!("best routes: {:?}", generation_best.route_indices());

        observer(&GenerationSnapshot {
            generation,
            best: generation_best,
            best_fitness: *generation_fitness,
            history: &state.history,
        });

        if generation + 1 < config.n_generations {
            state.population = evolve_population(
                &ranked,
                config.mutation_prob,
                config.pop_size,
                config.elitism,
                &mut state.rng,
            )?;
        }
    }

    let (best_solution, best_fitness) = state.best_so_far.ok_or_else(|| {
        GaError::InvalidInput("no generation was evaluated".to_string())
    })?;

    info!(
        "GA complete. Best fitness {:.2} found at generation {}",
        best_fitness, state.best_so_far_generation
    );

    Ok(GaOutcome {
        best_solution,
        best_fitness,
        best_generation: state.best_so_far_generation,
        fitness_history: state.history,
    })
}
