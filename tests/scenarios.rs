use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use vrp_ga::evaluation::FitnessParams;
use vrp_ga::fixtures::generate_instance;
use vrp_ga::setup::load_instance;
use vrp_ga::solver::genetic::generate_individual;
use vrp_ga::{
    find_fitness, run_ga, Customer, GaConfig, GaError, Individual, Point, Priority,
    ProblemInstance,
};

fn two_stop_instance(first: Priority, second: Priority) -> ProblemInstance {
    ProblemInstance::new(
        Point::default(),
        vec![
            Customer {
                id: 0,
                point: Point::new(10.0, 0.0),
                demand: 5.0,
                priority: first,
            },
            Customer {
                id: 1,
                point: Point::new(20.0, 0.0),
                demand: 5.0,
                priority: second,
            },
        ],
    )
}

fn no_penalties(capacity: f64) -> FitnessParams {
    FitnessParams {
        capacity,
        overload_weight: 0.0,
        autonomy_weight: 0.0,
        stop_weight: 0.0,
        ..FitnessParams::default()
    }
}

#[test]
fn single_vehicle_without_penalties_costs_its_tour() {
    let instance = two_stop_instance(Priority::Low, Priority::Low);
    let solution = Individual::new(vec![instance.locations()]);

    // depot -> (10,0) -> (20,0) -> depot
    assert_eq!(find_fitness(&solution, &instance, &no_penalties(100.0)), 40.0);
}

#[test]
fn overloaded_vehicle_pays_per_unit_of_excess() {
    let instance = two_stop_instance(Priority::Low, Priority::Low);
    let solution = Individual::new(vec![instance.locations()]);
    let params = FitnessParams {
        overload_weight: 2.0,
        ..no_penalties(5.0)
    };

    assert_eq!(find_fitness(&solution, &instance, &params), 40.0 + 5.0 * 2.0);
}

#[test]
fn last_high_priority_stop_pays_full_lateness() {
    let instance = two_stop_instance(Priority::Low, Priority::High);
    let solution = Individual::new(vec![instance.locations()]);
    let params = FitnessParams {
        lateness_weight: 10.0,
        ..no_penalties(100.0)
    };

    assert_eq!(find_fitness(&solution, &instance, &params), 40.0 + 10.0);
}

#[test]
fn initial_individual_covers_nine_customers_with_three_vehicles() {
    let instance = generate_instance(9, 3);
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let individual = generate_individual(&instance, 1_000.0, 3, &mut rng);

    assert_eq!(individual.num_routes(), 3);
    assert_eq!(individual.num_stops(), 9);
}

#[test]
fn identical_runs_are_reproducible() {
    let instance = generate_instance(14, 5);
    let config = GaConfig {
        n_generations: 30,
        pop_size: 20,
        ..GaConfig::default()
    };

    let a = run_ga(&instance, &config).unwrap();
    let b = run_ga(&instance, &config).unwrap();

    assert_eq!(a.best_solution, b.best_solution);
    assert_eq!(a.fitness_history, b.fitness_history);
}

#[test]
fn elitism_makes_history_non_increasing() {
    let instance = generate_instance(18, 8);
    let config = GaConfig {
        n_generations: 60,
        pop_size: 24,
        elitism: 1,
        mutation_prob: 0.4,
        priority_lateness_weight: 2.0,
        balance_load_weight: 1.0,
        ..GaConfig::default()
    };

    let outcome = run_ga(&instance, &config).unwrap();

    assert_eq!(outcome.fitness_history.len(), 60);
    assert!(outcome.fitness_history.windows(2).all(|w| w[1] <= w[0]));
    assert_eq!(outcome.best_fitness, *outcome.fitness_history.last().unwrap());
}

#[test]
fn returned_solution_is_scored_as_reported() {
    let instance = generate_instance(12, 21);
    let config = GaConfig {
        n_generations: 20,
        pop_size: 12,
        max_autonomy: Some(150.0),
        ..GaConfig::default()
    };

    let outcome = run_ga(&instance, &config).unwrap();
    let params = config.fitness_params(&instance);
    let rescored = find_fitness(&outcome.best_solution, &instance, &params);

    assert_eq!(rescored, outcome.best_fitness);
}

#[test]
fn overloaded_fleet_still_places_every_customer() {
    let instance = generate_instance(15, 4);
    let config = GaConfig {
        n_generations: 10,
        pop_size: 10,
        max_capacity: 0.0,
        ..GaConfig::default()
    };

    let outcome = run_ga(&instance, &config).unwrap();

    assert_eq!(outcome.best_solution.num_stops(), 15);
    assert!(outcome.best_fitness > 0.0);
}

#[test]
fn runs_need_at_least_three_customers() {
    let instance = two_stop_instance(Priority::Low, Priority::Low);
    let result = run_ga(&instance, &GaConfig::default());

    assert!(matches!(result, Err(GaError::InvalidInput(_))));
}

#[test]
fn runs_are_scored_from_the_depot_in_the_instance_file() {
    let path = std::env::temp_dir().join(format!("vrp_ga_depot_{}.csv", std::process::id()));
    std::fs::write(
        &path,
        "id,x,y,demand,priority\n\
         0,50,50,0,low\n\
         1,51,50,1,low\n\
         2,52,50,1,low\n\
         3,53,50,1,low\n",
    )
    .unwrap();
    let instance = load_instance(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let config = GaConfig {
        n_generations: 30,
        pop_size: 12,
        n_vehicles: 1,
        ..GaConfig::default()
    };
    let outcome = run_ga(&instance, &config).unwrap();

    // out and back along the row of customers
    assert_eq!(instance.depot, Point::new(50.0, 50.0));
    assert_eq!(outcome.best_fitness, 6.0);
    assert_eq!(config.fitness_params(&instance).depot, instance.depot);
}
