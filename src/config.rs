use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use dotenv::dotenv;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::types::{Point, ProblemInstance};
use crate::error::{GaError, GaResult};
use crate::evaluation::penalty::FitnessParams;

pub mod constant {
    pub const SEED: u64 = 42;
    pub const MAX_GENERATED_CLIENTS: usize = 50;
    pub const GENERATED_CLIENTS: usize = 20;
    pub const COORD_RANGE: (f64, f64) = (0.0, 100.0);
    pub const DEMAND_RANGE: (u32, u32) = (1, 20);
    pub const BRUTE_FORCE_LIMIT: usize = 10;
    pub const SCORE_LOG_PATH: &str = "score_log.csv";
    pub const HISTORY_CSV_PATH: &str = "fitness_history.csv";
}

/// Every option of a GA run. Missing JSON keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    pub n_generations: usize,
    pub pop_size: usize,
    pub mutation_prob: f64,
    pub elitism: usize,
    pub max_capacity: f64,
    /// Overload weight.
    pub penalty_weight: f64,
    pub n_vehicles: usize,
    /// `None` means unbounded.
    pub max_autonomy: Option<f64>,
    pub autonomy_penalty_weight: f64,
    /// Overrides the instance's depot when set.
    pub depot: Option<Point>,
    pub balance_load_weight: f64,
    pub balance_distance_weight: f64,
    pub priority_lateness_weight: f64,
    pub max_stops_per_vehicle: usize,
    pub stop_penalty_weight: f64,
    pub seed: u64,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            n_generations: 150,
            pop_size: 60,
            mutation_prob: 0.2,
            elitism: 4,
            max_capacity: 100.0,
            penalty_weight: 3.0,
            n_vehicles: 3,
            max_autonomy: None,
            autonomy_penalty_weight: 10.0,
            depot: None,
            balance_load_weight: 0.0,
            balance_distance_weight: 0.0,
            priority_lateness_weight: 0.0,
            max_stops_per_vehicle: 10,
            stop_penalty_weight: 5.0,
            seed: constant::SEED,
        }
    }
}

impl GaConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> GaResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: GaConfig = serde_json::from_str(&content)?;
        debug!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Defaults, or the JSON file named by `GA_CONFIG`, with `GA_*` overrides applied.
    /// Reads `.env` first.
    pub fn from_env() -> GaResult<Self> {
        dotenv().ok();

        let mut config = match env::var("GA_CONFIG") {
            Ok(path) => {
                info!("Loading GA config from {}", path);
                Self::from_json_file(path)?
            }
            Err(_) => Self::default(),
        };

        env_override("GA_N_GENERATIONS", &mut config.n_generations)?;
        env_override("GA_POP_SIZE", &mut config.pop_size)?;
        env_override("GA_MUTATION_PROB", &mut config.mutation_prob)?;
        env_override("GA_ELITISM", &mut config.elitism)?;
        env_override("GA_MAX_CAPACITY", &mut config.max_capacity)?;
        env_override("GA_PENALTY_WEIGHT", &mut config.penalty_weight)?;
        env_override("GA_N_VEHICLES", &mut config.n_vehicles)?;
        env_override("GA_AUTONOMY_PENALTY_WEIGHT", &mut config.autonomy_penalty_weight)?;
        env_override("GA_BALANCE_LOAD_WEIGHT", &mut config.balance_load_weight)?;
        env_override("GA_BALANCE_DISTANCE_WEIGHT", &mut config.balance_distance_weight)?;
        env_override("GA_PRIORITY_LATENESS_WEIGHT", &mut config.priority_lateness_weight)?;
        env_override("GA_MAX_STOPS_PER_VEHICLE", &mut config.max_stops_per_vehicle)?;
        env_override("GA_STOP_PENALTY_WEIGHT", &mut config.stop_penalty_weight)?;
        env_override("GA_SEED", &mut config.seed)?;
        if env::var("GA_DEPOT_X").is_ok() || env::var("GA_DEPOT_Y").is_ok() {
            let mut depot = config.depot.unwrap_or_default();
            env_override("GA_DEPOT_X", &mut depot.x)?;
            env_override("GA_DEPOT_Y", &mut depot.y)?;
            config.depot = Some(depot);
        }

        if let Ok(raw) = env::var("GA_MAX_AUTONOMY") {
            config.max_autonomy = Some(parse_value("GA_MAX_AUTONOMY", &raw)?);
        }

        Ok(config)
    }

    pub fn validate(&self) -> GaResult<()> {
        if self.n_generations == 0 {
            return Err(GaError::Config("n_generations must be positive".into()));
        }
        if self.pop_size == 0 {
            return Err(GaError::Config("pop_size must be positive".into()));
        }
        // offspring need two distinct parents unless the elite fills the generation
        if self.pop_size < 2 && self.elitism < self.pop_size {
            return Err(GaError::Config(format!(
                "pop_size {} leaves room for offspring but cannot supply two parents",
                self.pop_size
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_prob) {
            return Err(GaError::Config(format!(
                "mutation_prob must be in [0, 1], got {}",
                self.mutation_prob
            )));
        }
        if self.n_vehicles == 0 {
            return Err(GaError::Config("n_vehicles must be positive".into()));
        }
        if self.max_stops_per_vehicle == 0 {
            return Err(GaError::Config("max_stops_per_vehicle must be positive".into()));
        }

        let weights = [
            ("penalty_weight", self.penalty_weight),
            ("autonomy_penalty_weight", self.autonomy_penalty_weight),
            ("balance_load_weight", self.balance_load_weight),
            ("balance_distance_weight", self.balance_distance_weight),
            ("priority_lateness_weight", self.priority_lateness_weight),
            ("stop_penalty_weight", self.stop_penalty_weight),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(GaError::Config(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }

        if self.max_capacity.is_nan() || self.max_autonomy.is_some_and(f64::is_nan) {
            return Err(GaError::Config("capacity and autonomy must be numbers".into()));
        }
        if self.depot.is_some_and(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(GaError::Config("depot coordinates must be finite".into()));
        }

        Ok(())
    }

    pub fn autonomy_limit(&self) -> f64 {
        self.max_autonomy.unwrap_or(f64::INFINITY)
    }

    /// The configured depot if any, otherwise the one the instance was loaded with.
    pub fn depot_for(&self, instance: &ProblemInstance) -> Point {
        self.depot.unwrap_or(instance.depot)
    }

    pub fn fitness_params(&self, instance: &ProblemInstance) -> FitnessParams {
        FitnessParams {
            capacity: self.max_capacity,
            overload_weight: self.penalty_weight,
            autonomy_limit: self.autonomy_limit(),
            autonomy_weight: self.autonomy_penalty_weight,
            depot: self.depot_for(instance),
            balance_load_weight: self.balance_load_weight,
            balance_distance_weight: self.balance_distance_weight,
            lateness_weight: self.priority_lateness_weight,
            max_stops: self.max_stops_per_vehicle,
            stop_weight: self.stop_penalty_weight,
        }
    }
}

fn parse_value<T: FromStr>(name: &str, raw: &str) -> GaResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| GaError::Config(format!("{name} has an invalid value '{raw}'")))
}

fn env_override<T: FromStr>(name: &str, field: &mut T) -> GaResult<()> {
    if let Ok(raw) = env::var(name) {
        *field = parse_value(name, &raw)?;
        debug!("{} overridden from environment", name);
    }
    Ok(())
}
