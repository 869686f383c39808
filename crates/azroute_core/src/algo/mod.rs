pub(crate) mod exact;
pub(crate) mod greedy;
pub(crate) mod optimizer;
mod permutations;
pub(crate) mod search;
