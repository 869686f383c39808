/// Heap's algorithm as a resumable generator over `0..n`.
///
/// Each step performs a single swap, so consecutive permutations differ in two
/// positions. The sequence is finite (`n!` items) and cannot be restarted.
pub(crate) struct HeapPermutations {
    perm: Vec<usize>,
    counters: Vec<usize>,
    level: usize,
    started: bool,
}

impl HeapPermutations {
    pub(crate) fn new(n: usize) -> Self {
        Self {
            perm: (0..n).collect(),
            counters: vec![0; n],
            level: 1,
            started: false,
        }
    }

    /// Advances to the next permutation. The first call yields the identity.
    pub(crate) fn next_permutation(&mut self) -> Option<&[usize]> {
        if !self.started {
            self.started = true;
            return Some(&self.perm);
        }

        while self.level < self.perm.len() {
            let i = self.level;
            if self.counters[i] < i {
                let j = if i % 2 == 0 { 0 } else { self.counters[i] };
                self.perm.swap(j, i);
                self.counters[i] += 1;
                self.level = 1;
                return Some(&self.perm);
            }
            self.counters[i] = 0;
            self.level += 1;
        }
        None
    }
}

/// `n!`, saturating at `u64::MAX` from 21 on.
pub(crate) fn factorial(n: usize) -> u64 {
    (1..=n as u64)
        .try_fold(1_u64, |acc, k| acc.checked_mul(k))
        .unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{HeapPermutations, factorial};

    fn collect(n: usize) -> Vec<Vec<usize>> {
        let mut perms = HeapPermutations::new(n);
        let mut out = Vec::new();
        while let Some(p) = perms.next_permutation() {
            out.push(p.to_vec());
        }
        out
    }

    #[test]
    fn yields_every_permutation_exactly_once() {
        for n in 1..=7 {
            let all = collect(n);
            let distinct: HashSet<_> = all.iter().cloned().collect();
            assert_eq!(all.len() as u64, factorial(n));
            assert_eq!(distinct.len(), all.len());
        }
    }

    #[test]
    fn factorial_saturates_instead_of_wrapping() {
        assert_eq!(factorial(0), 1);
        assert_eq!(factorial(20), 2_432_902_008_176_640_000);
        assert_eq!(factorial(21), u64::MAX);
        assert_eq!(factorial(40), u64::MAX);
    }

    #[test]
    fn follows_heap_order() {
        assert_eq!(
            collect(3),
            vec![
                vec![0, 1, 2],
                vec![1, 0, 2],
                vec![2, 0, 1],
                vec![0, 2, 1],
                vec![1, 2, 0],
                vec![2, 1, 0],
            ]
        );
    }

    #[test]
    fn stays_exhausted() {
        let mut perms = HeapPermutations::new(2);
        assert!(perms.next_permutation().is_some());
        assert!(perms.next_permutation().is_some());
        assert!(perms.next_permutation().is_none());
        assert!(perms.next_permutation().is_none());
    }

    #[test]
    fn factorial_of_small_values() {
        assert_eq!(factorial(0), 1);
        assert_eq!(factorial(1), 1);
        assert_eq!(factorial(8), 40_320);
    }
}
