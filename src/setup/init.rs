use std::path::Path;

use csv::{ReaderBuilder, Trim, Writer};
use tracing::{debug, info, warn};

use crate::domain::types::{Customer, Point, Priority, ProblemInstance};
use crate::error::{GaError, GaResult};
use crate::setup::init_types::InstanceRecord;

/// Structural checks on raw instance rows.
pub fn validate_records(records: &[InstanceRecord]) -> GaResult<()> {
    let depot = records
        .first()
        .ok_or_else(|| GaError::Instance("instance has no rows".into()))?;

    if depot.id != 0 {
        return Err(GaError::Instance(format!(
            "the first row (depot) must have id 0, got {}",
            depot.id
        )));
    }
    if depot.demand != 0.0 {
        return Err(GaError::Instance(format!(
            "the depot must have zero demand, got {}",
            depot.demand
        )));
    }

    for record in records {
        if !record.x.is_finite() || !record.y.is_finite() {
            return Err(GaError::Instance(format!(
                "row {} has non-numeric coordinates",
                record.id
            )));
        }
        if record.demand.is_nan() || record.demand < 0.0 {
            return Err(GaError::Instance(format!(
                "row {} has negative demand {}",
                record.id, record.demand
            )));
        }
        if record.priority.trim().is_empty() {
            return Err(GaError::Instance(format!(
                "row {} has no priority",
                record.id
            )));
        }
    }

    Ok(())
}

/// Builds an instance from validated rows: row 0 is the depot, the rest are customers.
pub fn instance_from_records(records: &[InstanceRecord]) -> GaResult<ProblemInstance> {
    validate_records(records)?;

    let depot = Point::new(records[0].x, records[0].y);
    let customers: Vec<Customer> = records[1..]
        .iter()
        .enumerate()
        .map(|(id, r)| Customer {
            id,
            point: Point::new(r.x, r.y),
            demand: r.demand,
            priority: Priority::parse(&r.priority),
        })
        .collect();

    let unknown = records[1..]
        .iter()
        .filter(|r| !matches!(r.priority.trim().to_lowercase().as_str(), "high" | "medium" | "low"))
        .count();
    if unknown > 0 {
        warn!("{} customers have an unrecognized priority and count as low", unknown);
    }

    Ok(ProblemInstance::new(depot, customers))
}

pub fn read_records(path: impl AsRef<Path>) -> GaResult<Vec<InstanceRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_path(path.as_ref())?;

    let records = reader
        .deserialize()
        .collect::<Result<Vec<InstanceRecord>, csv::Error>>()?;
    debug!("Read {} rows from {}", records.len(), path.as_ref().display());
    Ok(records)
}

/// Reads and validates an instance CSV.
pub fn load_instance(path: impl AsRef<Path>) -> GaResult<ProblemInstance> {
    let records = read_records(path.as_ref())?;
    let instance = instance_from_records(&records)?;

    info!(
        "Loaded instance {} with {} customers, total demand {:.1}",
        path.as_ref().display(),
        instance.num_customers(),
        instance.total_demand()
    );
    Ok(instance)
}

pub fn instance_to_records(instance: &ProblemInstance) -> Vec<InstanceRecord> {
    let depot = InstanceRecord {
        id: 0,
        x: instance.depot.x,
        y: instance.depot.y,
        demand: 0.0,
        priority: Priority::Low.as_str().to_string(),
    };

    std::iter::once(depot)
        .chain(instance.customers.iter().map(|c| InstanceRecord {
            id: c.id as i64 + 1,
            x: c.point.x,
            y: c.point.y,
            demand: c.demand,
            priority: c.priority.as_str().to_string(),
        }))
        .collect()
}

pub fn write_instance(path: impl AsRef<Path>, instance: &ProblemInstance) -> GaResult<()> {
    let mut wtr = Writer::from_path(path.as_ref())?;
    for record in instance_to_records(instance) {
        wtr.serialize(record)?;
    }
    wtr.flush()?;

    info!(
        "Wrote instance with {} customers to {}",
        instance.num_customers(),
        path.as_ref().display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, x: f64, y: f64, demand: f64, priority: &str) -> InstanceRecord {
        InstanceRecord {
            id,
            x,
            y,
            demand,
            priority: priority.to_string(),
        }
    }

    #[test]
    fn depot_must_come_first_with_zero_demand() {
        let rows = vec![record(1, 0.0, 0.0, 0.0, "low")];
        assert!(matches!(validate_records(&rows), Err(GaError::Instance(_))));

        let rows = vec![record(0, 0.0, 0.0, 3.0, "low")];
        assert!(matches!(validate_records(&rows), Err(GaError::Instance(_))));

        assert!(validate_records(&[]).is_err());
    }

    #[test]
    fn negative_demand_and_missing_priority_are_rejected() {
        let rows = vec![record(0, 0.0, 0.0, 0.0, "low"), record(1, 1.0, 1.0, -2.0, "high")];
        assert!(validate_records(&rows).is_err());

        let rows = vec![record(0, 0.0, 0.0, 0.0, "low"), record(1, 1.0, 1.0, 2.0, "  ")];
        assert!(validate_records(&rows).is_err());
    }

    #[test]
    fn customers_are_numbered_after_the_depot() {
        let rows = vec![
            record(0, 5.0, 5.0, 0.0, "low"),
            record(1, 1.0, 2.0, 4.0, "HIGH"),
            record(2, 3.0, 4.0, 6.0, "normal"),
        ];
        let instance = instance_from_records(&rows).unwrap();

        assert_eq!(instance.depot, Point::new(5.0, 5.0));
        assert_eq!(instance.num_customers(), 2);
        assert_eq!(instance.customers[0].id, 0);
        assert_eq!(instance.customers[0].priority, Priority::High);
        assert_eq!(instance.customers[1].priority, Priority::Low);
        assert_eq!(instance_to_records(&instance)[2].id, 2);
    }

    #[test]
    fn instance_survives_a_csv_file() {
        let rows = vec![
            record(0, 0.0, 0.0, 0.0, "low"),
            record(1, 10.5, 2.25, 4.0, "medium"),
            record(2, 3.0, 4.0, 6.0, "high"),
        ];
        let instance = instance_from_records(&rows).unwrap();

        let path = std::env::temp_dir().join(format!("vrp_ga_instance_{}.csv", std::process::id()));
        write_instance(&path, &instance).unwrap();
        let loaded = load_instance(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.customers, instance.customers);
        assert_eq!(loaded.depot, instance.depot);
    }
}
