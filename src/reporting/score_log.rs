use std::fs::{self, OpenOptions};
use std::path::Path;

use chrono::Local;
use csv::{Reader, WriterBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::GaConfig;
use crate::error::GaResult;

/// One row of the run-history log: the best score of a run and the parameters behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub run: usize,
    pub timestamp: String,
    pub best_score: f64,
    pub n_generations: usize,
    pub pop_size: usize,
    pub mutation_prob: f64,
    pub elitism: usize,
    pub max_capacity: f64,
    pub penalty_weight: f64,
    pub n_vehicles: usize,
    pub max_autonomy: Option<f64>,
    pub autonomy_penalty_weight: f64,
    /// Empty when the run used the instance's depot.
    pub depot_x: Option<f64>,
    pub depot_y: Option<f64>,
    pub balance_load_weight: f64,
    pub balance_distance_weight: f64,
    pub priority_lateness_weight: f64,
    pub max_stops_per_vehicle: usize,
    pub stop_penalty_weight: f64,
    pub seed: u64,
}

impl ScoreRecord {
    pub fn new(run: usize, best_score: f64, config: &GaConfig) -> Self {
        Self {
            run,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            best_score,
            n_generations: config.n_generations,
            pop_size: config.pop_size,
            mutation_prob: config.mutation_prob,
            elitism: config.elitism,
            max_capacity: config.max_capacity,
            penalty_weight: config.penalty_weight,
            n_vehicles: config.n_vehicles,
            max_autonomy: config.max_autonomy,
            autonomy_penalty_weight: config.autonomy_penalty_weight,
            depot_x: config.depot.map(|p| p.x),
            depot_y: config.depot.map(|p| p.y),
            balance_load_weight: config.balance_load_weight,
            balance_distance_weight: config.balance_distance_weight,
            priority_lateness_weight: config.priority_lateness_weight,
            max_stops_per_vehicle: config.max_stops_per_vehicle,
            stop_penalty_weight: config.stop_penalty_weight,
            seed: config.seed,
        }
    }
}

/// All logged runs; empty when the log does not exist yet.
pub fn load_scores(path: impl AsRef<Path>) -> GaResult<Vec<ScoreRecord>> {
    if !path.as_ref().exists() {
        return Ok(Vec::new());
    }

    let mut reader = Reader::from_path(path.as_ref())?;
    let records = reader
        .deserialize()
        .collect::<Result<Vec<ScoreRecord>, csv::Error>>()?;
    Ok(records)
}

/// Appends a run to the log, creating it with a header on first use. Returns the run number.
pub fn append_score(path: impl AsRef<Path>, best_score: f64, config: &GaConfig) -> GaResult<usize> {
    let path = path.as_ref();
    let run = load_scores(path)?.len() + 1;
    let needs_header = fs::metadata(path).map_or(true, |m| m.len() == 0);

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut wtr = WriterBuilder::new()
        .has_headers(needs_header)
        .from_writer(file);
    wtr.serialize(ScoreRecord::new(run, best_score, config))?;
    wtr.flush()?;

    info!("Logged run {} with score {:.2} to {}", run, best_score, path.display());
    Ok(run)
}

pub fn clear_scores(path: impl AsRef<Path>) -> GaResult<()> {
    if path.as_ref().exists() {
        fs::remove_file(path.as_ref())?;
        debug!("Removed score log {}", path.as_ref().display());
    }
    Ok(())
}

/// Writes `generation,best_fitness` rows.
pub fn save_fitness_history(path: impl AsRef<Path>, history: &[f64]) -> GaResult<()> {
    let mut wtr = csv::Writer::from_path(path.as_ref())?;
    wtr.write_record(["generation", "best_fitness"])?;

    for (generation, value) in history.iter().enumerate() {
        wtr.write_record([generation.to_string(), value.to_string()])?;
    }

    wtr.flush()?;
    Ok(())
}
