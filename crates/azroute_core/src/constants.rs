/// Smallest point count that makes a meaningful closed route.
pub(crate) const MIN_ROUTE_POINTS: usize = 3;

pub(crate) const DEFAULT_EXACT_THRESHOLD: usize = 8;
/// 11! is roughly 4e7 leaves, still a few seconds of exact search.
pub(crate) const MAX_EXACT_THRESHOLD: usize = 11;

/// Exact search leaves between progress reports and cancellation polls.
pub(crate) const CHECKPOINT_INTERVAL: u64 = 100;

/// Unvisited-point count above which the nearest-neighbor scan runs on the rayon pool.
pub(crate) const PARALLEL_SCAN_MIN: usize = 4_096;

pub(crate) const PROGRESS_DONE: u8 = 100;
