use crate::domain::types::{Location, Route};

/// A candidate solution: one route per vehicle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Individual {
    pub routes: Vec<Route>,
}

impl Individual {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    pub fn num_stops(&self) -> usize {
        self.routes.iter().map(Vec::len).sum()
    }

    /// Concatenates all routes in vehicle order.
    pub fn flatten(&self) -> Vec<Location> {
        self.routes.iter().flatten().copied().collect()
    }

    /// Customer ids in vehicle order, used for logging.
    pub fn route_indices(&self) -> Vec<Vec<usize>> {
        self.routes
            .iter()
            .map(|r| r.iter().map(|loc| loc.index).collect())
            .collect()
    }
}

/// Split a flat sequence into `n_parts` consecutive routes whose sizes differ by at most one.
/// The first `len % n_parts` routes get the extra stop. `n_parts == 0` keeps a single route.
pub fn repartition(flat: &[Location], n_parts: usize) -> Vec<Route> {
    if n_parts == 0 {
        return vec![flat.to_vec()];
    }

    let base = flat.len() / n_parts;
    let extra = flat.len() % n_parts;

    let mut routes = Vec::with_capacity(n_parts);
    let mut idx = 0;
    for part in 0..n_parts {
        let count = base + usize::from(part < extra);
        routes.push(flat[idx..idx + count].to_vec());
        idx += count;
    }
    routes
}
