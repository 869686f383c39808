use rayon::prelude::*;

use crate::{
    Coord, Error, Result, RouteSearch, SearchControl, SearchOutcome, Strategy,
    constants::PARALLEL_SCAN_MIN, tour::order_length,
};

/// Nearest-neighbor construction starting at input index 0.
///
/// Ties go to the lowest input index. Large scans run on the rayon pool with the
/// same `(distance, index)` ordering, so results do not depend on thread count.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedySearch;

impl RouteSearch for GreedySearch {
    fn strategy(&self) -> Strategy {
        Strategy::Greedy
    }

    fn search(&self, coords: &[Coord], control: &mut SearchControl<'_>) -> Result<SearchOutcome> {
        let order = nearest_neighbor_order(coords)?;
        if control.is_cancelled() {
            log::info!("greedy: cancelled n={}", coords.len());
            return Ok(SearchOutcome::Cancelled);
        }
        let length = order_length(coords, &order);
        log::info!("greedy: complete n={} length={length:.2}", coords.len());
        Ok(SearchOutcome::Found { order, length })
    }
}

#[azroute_derive::timer("greedy")]
pub(crate) fn nearest_neighbor_order(coords: &[Coord]) -> Result<Vec<usize>> {
    if coords.is_empty() {
        return Err(Error::EmptyInput);
    }

    let n = coords.len();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut current = 0;
    visited[current] = true;
    order.push(current);

    while order.len() < n {
        let remaining = n - order.len();
        let Some(next) = nearest_unvisited(coords, &visited, current, remaining) else {
            break;
        };
        visited[next] = true;
        order.push(next);
        current = next;
    }

    Ok(order)
}

fn nearest_unvisited(
    coords: &[Coord],
    visited: &[bool],
    from: usize,
    remaining: usize,
) -> Option<usize> {
    let origin = coords[from];
    let candidate = |idx: usize| (origin.dist(coords[idx]), idx);
    let closer = |a: &(f64, usize), b: &(f64, usize)| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1));

    let best = if remaining >= PARALLEL_SCAN_MIN {
        (0..coords.len())
            .into_par_iter()
            .filter(|&idx| !visited[idx])
            .map(candidate)
            .min_by(closer)
    } else {
        (0..coords.len())
            .filter(|&idx| !visited[idx])
            .map(candidate)
            .min_by(closer)
    };
    best.map(|(_, idx)| idx)
}
