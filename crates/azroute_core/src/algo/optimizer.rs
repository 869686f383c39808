use std::{convert::Infallible, fmt, str::FromStr};

use crate::{
    CancelToken, ExactSearch, GreedySearch, Leg, Point, ProgressSink, Result, RouteSearch,
    SearchControl, SearchOutcome, Strategy, Tour,
    constants::{DEFAULT_EXACT_THRESHOLD, MAX_EXACT_THRESHOLD, MIN_ROUTE_POINTS},
    error::Error,
    node::resolve_coords,
};

/// Largest point count still searched exhaustively.
///
/// Construction is lenient: non-positive or non-numeric values fall back to the
/// default with a warning, values above the cap are clamped to it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ExactThreshold(usize);

impl ExactThreshold {
    pub const DEFAULT: Self = Self(DEFAULT_EXACT_THRESHOLD);
    pub const MAX: Self = Self(MAX_EXACT_THRESHOLD);

    pub fn new(raw: i64) -> Self {
        if raw <= 0 {
            log::warn!("options: exact threshold {raw} is not positive, using {DEFAULT_EXACT_THRESHOLD}");
            return Self::DEFAULT;
        }
        let value = usize::try_from(raw).unwrap_or(usize::MAX);
        if value > MAX_EXACT_THRESHOLD {
            log::warn!("options: exact threshold {value} capped to {MAX_EXACT_THRESHOLD}");
            return Self::MAX;
        }
        Self(value)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for ExactThreshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ExactThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ExactThreshold {
    type Err = Infallible;

    fn from_str(raw: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match raw.trim().parse::<i64>() {
            Ok(value) => Self::new(value),
            Err(_) => {
                log::warn!(
                    "options: exact threshold {raw:?} is not a number, using {DEFAULT_EXACT_THRESHOLD}"
                );
                Self::DEFAULT
            }
        })
    }
}

/// A finished route: the tour, its closed length and per-leg annotations.
#[derive(Clone, Debug, PartialEq)]
pub struct OptimizedRoute {
    pub tour: Tour,
    pub length: f64,
    pub strategy: Strategy,
    pub legs: Vec<Leg>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Completed(OptimizedRoute),
    /// The caller cancelled the run. No tour is produced.
    Cancelled,
}

impl Outcome {
    pub fn route(&self) -> Option<&OptimizedRoute> {
        match self {
            Self::Completed(route) => Some(route),
            Self::Cancelled => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Chooses exact or greedy search by point count and turns the result into a route.
pub struct RouteOptimizer {
    threshold: ExactThreshold,
    exact: Box<dyn RouteSearch>,
    greedy: Box<dyn RouteSearch>,
}

impl RouteOptimizer {
    pub fn new(threshold: ExactThreshold) -> Self {
        Self::with_strategies(threshold, ExactSearch, GreedySearch)
    }

    pub fn with_strategies(
        threshold: ExactThreshold,
        exact: impl RouteSearch + 'static,
        greedy: impl RouteSearch + 'static,
    ) -> Self {
        Self {
            threshold,
            exact: Box::new(exact),
            greedy: Box::new(greedy),
        }
    }

    pub fn threshold(&self) -> ExactThreshold {
        self.threshold
    }

    /// Strategy used for `n` points, or [`Error::InsufficientPoints`] below three.
    pub fn strategy_for(&self, n: usize) -> Result<Strategy> {
        if n < MIN_ROUTE_POINTS {
            return Err(Error::insufficient_points(n));
        }
        Ok(if n <= self.threshold.get() {
            Strategy::Exact
        } else {
            Strategy::Greedy
        })
    }

    #[azroute_derive::timer("optimizer")]
    pub fn optimize(
        &self,
        points: &[Point],
        progress: &mut dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<Outcome> {
        let coords = resolve_coords(points)?;
        let strategy = self.strategy_for(coords.len())?;
        let search = match strategy {
            Strategy::Exact => &self.exact,
            Strategy::Greedy => &self.greedy,
        };
        log::info!(
            "optimizer: start n={} strategy={strategy} threshold={}",
            coords.len(),
            self.threshold
        );

        let mut control = SearchControl::new(progress, cancel);
        let (order, length) = match search.search(&coords, &mut control)? {
            SearchOutcome::Found { order, length } => (order, length),
            SearchOutcome::Cancelled => {
                log::warn!(
                    "optimizer: cancelled n={} progress={}%",
                    coords.len(),
                    control.last_reported().unwrap_or(0)
                );
                return Ok(Outcome::Cancelled);
            }
        };
        check_permutation(&order, coords.len())?;
        control.complete();

        let tour = Tour::from_order(points, &coords, &order);
        let legs = tour.legs();
        log::info!("optimizer: complete n={} length={length:.2}", tour.len());

        Ok(Outcome::Completed(OptimizedRoute {
            tour,
            length,
            strategy,
            legs,
        }))
    }
}

impl Default for RouteOptimizer {
    fn default() -> Self {
        Self::new(ExactThreshold::DEFAULT)
    }
}

/// One-shot convenience over [`RouteOptimizer`] with the built-in strategies.
pub fn optimize_route(
    points: &[Point],
    threshold: ExactThreshold,
    progress: &mut dyn ProgressSink,
    cancel: &CancelToken,
) -> Result<Outcome> {
    RouteOptimizer::new(threshold).optimize(points, progress, cancel)
}

fn check_permutation(order: &[usize], n: usize) -> Result<()> {
    let mut seen = vec![false; n];
    let valid = order.len() == n
        && order
            .iter()
            .all(|&idx| idx < n && !std::mem::replace(&mut seen[idx], true));
    if valid {
        Ok(())
    } else {
        Err(Error::other(format!(
            "search returned an order that is not a permutation of {n} points"
        )))
    }
}
