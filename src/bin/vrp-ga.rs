use std::env;
use std::error::Error;
use std::path::Path;
use std::time::Instant;

use colored::*;
use dotenv::dotenv;
use tracing::{debug, info, span, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vrp_ga::baseline::{brute_force_tsp, optimality_gap};
use vrp_ga::config::constant::{GENERATED_CLIENTS, HISTORY_CSV_PATH, SCORE_LOG_PATH};
use vrp_ga::config::GaConfig;
use vrp_ga::domain::ProblemInstance;
use vrp_ga::fixtures::generate_instance;
use vrp_ga::reporting::{
    append_score, convergence_generation, render_report, save_fitness_history, total_distance,
    vehicle_summary, VehicleSummary,
};
use vrp_ga::setup::load_instance;
use vrp_ga::solver::genetic::{run_ga_with_observer, GaOutcome};

/// Progress is logged at info level every this many generations.
const PROGRESS_EVERY: usize = 25;

fn init_tracing_and_env() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_span_events(fmt::format::FmtSpan::CLOSE))
        .init();

    dotenv().ok();
    Ok(())
}

/// `INSTANCE_CSV` if set, otherwise a seeded random instance of `GA_CLIENTS` clients.
fn load_problem(config: &GaConfig) -> Result<ProblemInstance, Box<dyn Error>> {
    match env::var("INSTANCE_CSV") {
        Ok(path) => Ok(load_instance(path)?),
        Err(_) => {
            let n_clients = match env::var("GA_CLIENTS") {
                Ok(raw) => raw.trim().parse()?,
                Err(_) => GENERATED_CLIENTS,
            };
            info!("INSTANCE_CSV not set, generating {} clients", n_clients);
            Ok(generate_instance(n_clients, config.seed))
        }
    }
}

fn print_summary(summaries: &[VehicleSummary], outcome: &GaOutcome, total: f64) {
    println!("{}", "Best solution".bold());
    for s in summaries {
        let line = format!(
            "  vehicle {:>2} | stops {:>3} | load {:>8.2} | distance {:>9.2}",
            s.vehicle, s.stops, s.load, s.distance
        );
        if s.has_excess() {
            println!(
                "{} {}",
                line.yellow(),
                format!(
                    "(excess: capacity {}, autonomy {}, stops {})",
                    s.capacity_excess, s.autonomy_excess, s.stop_excess
                )
                .red()
            );
        } else {
            println!("{}", line.green());
        }
    }
    println!(
        "  total distance {:.2}, fitness {:.2}",
        total, outcome.best_fitness
    );
}

fn report_final_stats(
    instance: &ProblemInstance,
    config: &GaConfig,
    outcome: &GaOutcome,
    elapsed: f64,
) {
    let depot = config.depot_for(instance);
    let summaries = vehicle_summary(&outcome.best_solution, instance, config);
    let total = total_distance(&outcome.best_solution, depot);

    print_summary(&summaries, outcome, total);
    let penalised = summaries.iter().filter(|s| s.has_excess()).count();
    if penalised > 0 {
        warn!("{} of {} vehicles exceed a limit", penalised, summaries.len());
    }
    debug!("\n{}", render_report(&summaries, total, config.max_capacity));

    info!(
        "Converged at generation {}, best first seen at generation {}, {:.2}s",
        convergence_generation(&outcome.fitness_history),
        outcome.best_generation,
        elapsed
    );

    let points: Vec<_> = instance.customers.iter().map(|c| c.point).collect();
    if let Some((exact, _)) = brute_force_tsp(&points, depot) {
        match optimality_gap(total, exact) {
            Some(gap) => info!("Exact single-tour cost {:.2}, GA gap {:.2}%", exact, gap),
            None => info!("Exact single-tour cost {:.2}", exact),
        }
    }
}

/// History and score logs are best-effort; failures never abort the run.
fn persist(config: &GaConfig, outcome: &GaOutcome, history_path: &Path, score_path: &Path) {
    if let Err(e) = save_fitness_history(history_path, &outcome.fitness_history) {
        warn!("Could not write fitness history: {}", e);
    }

    if let Err(e) = append_score(score_path, outcome.best_fitness, config) {
        warn!("Could not append to score log: {}", e);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing_and_env()?;

    let config = GaConfig::from_env()?;
    config.validate()?;

    let instance = {
        let span = span!(Level::INFO, "setup");
        let _guard = span.enter();
        load_problem(&config)?
    };

    let depot = config.depot_for(&instance);
    info!(
        "Starting VRP GA with {} customers and {} generations, depot at ({}, {})",
        instance.num_customers(),
        config.n_generations,
        depot.x,
        depot.y
    );

    let start = Instant::now();
    let outcome = run_ga_with_observer(&instance, &config, |snapshot| {
        if snapshot.generation % PROGRESS_EVERY == 0 {
            info!(
                "generation {:>4}: best fitness {:.2}",
                snapshot.generation, snapshot.best_fitness
            );
        }
    })?;
    let elapsed = start.elapsed().as_secs_f64();

    report_final_stats(&instance, &config, &outcome, elapsed);
    persist(
        &config,
        &outcome,
        Path::new(HISTORY_CSV_PATH),
        Path::new(SCORE_LOG_PATH),
    );

    Ok(())
}
