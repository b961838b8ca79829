use std::collections::HashSet;

use rand::seq::index::sample;
use rand::Rng;

use crate::domain::types::Location;
use crate::error::{GaError, GaResult};

/// Order crossover (OX).
///
/// Copies `parent1[start..end]` verbatim, then fills around it with the customers of
/// `parent2` that are not in the slice, in `parent2` order:
/// `remaining[..start] + slice + remaining[start..]`.
pub fn order_crossover<R: Rng>(
    parent1: &[Location],
    parent2: &[Location],
    rng: &mut R,
) -> GaResult<Vec<Location>> {
    if parent1.len() != parent2.len() {
        return Err(GaError::InvalidInput(format!(
            "crossover parents differ in length ({} vs {})",
            parent1.len(),
            parent2.len()
        )));
    }
    if parent1.len() <= 2 {
        return Err(GaError::InvalidInput(format!(
            "crossover needs more than 2 genes, got {}",
            parent1.len()
        )));
    }

    let mut cuts = sample(rng, parent1.len(), 2).into_vec();
    cuts.sort_unstable();
    let (start, end) = (cuts[0], cuts[1]);

    let slice = &parent1[start..end];
    let in_slice: HashSet<usize> = slice.iter().map(|loc| loc.index).collect();
    let remaining: Vec<Location> = parent2
        .iter()
        .filter(|loc| !in_slice.contains(&loc.index))
        .copied()
        .collect();

    // end < len, so at least `start` genes remain outside the slice
    let split = start.min(remaining.len());
    let mut child = Vec::with_capacity(parent1.len());
    child.extend_from_slice(&remaining[..split]);
    child.extend_from_slice(slice);
    child.extend_from_slice(&remaining[split..]);

    Ok(child)
}
