use std::fmt;

use crate::{Coord, Result, SearchControl};

/// Which search produced a tour.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Strategy {
    Exact,
    Greedy,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Exact => "exact",
            Self::Greedy => "greedy",
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome {
    /// Visiting order as indices into the searched coordinates, and its cycle length.
    Found { order: Vec<usize>, length: f64 },
    Cancelled,
}

/// A tour construction strategy the optimizer can delegate to.
pub trait RouteSearch: Send + Sync {
    fn strategy(&self) -> Strategy;

    /// Orders `coords` into a closed tour. Implementations that run long must call
    /// [`SearchControl::checkpoint`] regularly and stop when it breaks.
    fn search(&self, coords: &[Coord], control: &mut SearchControl<'_>) -> Result<SearchOutcome>;
}
