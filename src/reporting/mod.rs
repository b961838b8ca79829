pub mod score_log;
pub mod summary;

pub use score_log::{append_score, clear_scores, load_scores, save_fitness_history, ScoreRecord};
pub use summary::{
    convergence_generation, render_report, total_distance, vehicle_summary, VehicleSummary,
};
