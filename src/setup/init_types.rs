use serde::{Deserialize, Serialize};

/// One row of an instance CSV (`id,x,y,demand,priority`). Row 0 is the depot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceRecord {
    pub id: i64,
    pub x: f64,
    pub y: f64,
    pub demand: f64,
    pub priority: String,
}
