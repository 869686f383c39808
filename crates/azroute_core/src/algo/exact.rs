use crate::{
    Coord, Error, Result, RouteSearch, SearchControl, SearchOutcome, Strategy,
    algo::permutations::{HeapPermutations, factorial},
    constants::CHECKPOINT_INTERVAL,
    tour::order_length,
};

/// Exhaustive search over all `n!` visiting orders.
///
/// Orders are generated with Heap's algorithm; the first minimal order in that
/// sequence wins, later ties never replace it. Progress is reported and
/// cancellation polled every [`CHECKPOINT_INTERVAL`] leaves.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExactSearch;

impl RouteSearch for ExactSearch {
    fn strategy(&self) -> Strategy {
        Strategy::Exact
    }

    #[azroute_derive::timer("exact")]
    fn search(&self, coords: &[Coord], control: &mut SearchControl<'_>) -> Result<SearchOutcome> {
        if coords.is_empty() {
            return Err(Error::EmptyInput);
        }

        let n = coords.len();
        let total = factorial(n);
        log::debug!("exact: start n={n} leaves={total}");

        let mut perms = HeapPermutations::new(n);
        let mut best_order: Vec<usize> = Vec::with_capacity(n);
        let mut best_length = f64::INFINITY;
        let mut done: u64 = 0;

        while let Some(order) = perms.next_permutation() {
            let length = order_length(coords, order);
            if length < best_length {
                best_length = length;
                best_order.clear();
                best_order.extend_from_slice(order);
            }

            done += 1;
            if done % CHECKPOINT_INTERVAL == 0 && control.checkpoint(done, total).is_break() {
                log::info!("exact: cancelled leaves={done}/{total}");
                return Ok(SearchOutcome::Cancelled);
            }
        }

        // A checkpoint on the final leaf already polled the token.
        if done % CHECKPOINT_INTERVAL != 0 && control.is_cancelled() {
            log::info!("exact: cancelled leaves={done}/{total}");
            return Ok(SearchOutcome::Cancelled);
        }
        control.complete();

        log::info!("exact: complete leaves={done} best={best_length:.2}");
        Ok(SearchOutcome::Found {
            order: best_order,
            length: best_length,
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::ExactSearch;
    use crate::{
        CancelToken, Coord, Error, NoProgress, RouteSearch, SearchControl, SearchOutcome,
        tour::order_length,
    };

    const EPS: f64 = 1e-9;

    fn run(coords: &[Coord]) -> SearchOutcome {
        let cancel = CancelToken::new();
        let mut sink = NoProgress;
        let mut control = SearchControl::new(&mut sink, &cancel);
        ExactSearch.search(coords, &mut control).expect("search runs")
    }

    fn found(outcome: SearchOutcome) -> (Vec<usize>, f64) {
        match outcome {
            SearchOutcome::Found { order, length } => (order, length),
            SearchOutcome::Cancelled => panic!("search was not expected to cancel"),
        }
    }

    fn random_coords(rng: &mut StdRng, n: usize) -> Vec<Coord> {
        (0..n)
            .map(|_| Coord::new(rng.random_range(-50.0..50.0), rng.random_range(-50.0..50.0)))
            .collect()
    }

    /// Independent enumeration by recursive insertion, scoring every ordering.
    fn brute_force_min(coords: &[Coord]) -> f64 {
        fn walk(coords: &[Coord], prefix: &mut Vec<usize>, used: &mut [bool], best: &mut f64) {
            if prefix.len() == coords.len() {
                *best = best.min(order_length(coords, prefix));
                return;
            }
            for idx in 0..coords.len() {
                if used[idx] {
                    continue;
                }
                used[idx] = true;
                prefix.push(idx);
                walk(coords, prefix, used, best);
                prefix.pop();
                used[idx] = false;
            }
        }
        let mut best = f64::INFINITY;
        walk(coords, &mut Vec::new(), &mut vec![false; coords.len()], &mut best);
        best
    }

    #[test]
    fn three_point_route_has_expected_length() {
        let coords = [
            Coord::new(0.0, 0.0),
            Coord::new(0.0, 10.0),
            Coord::new(10.0, 10.0),
        ];
        let (order, length) = found(run(&coords));
        assert_eq!(order.len(), 3);
        assert!((length - (20.0 + 200.0_f64.sqrt())).abs() < EPS);
    }

    #[test]
    fn matches_brute_force_for_random_inputs() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 3..=8 {
            let coords = random_coords(&mut rng, n);
            let (order, length) = found(run(&coords));
            let reference = brute_force_min(&coords);
            assert!(length <= reference + EPS, "n={n} exact={length} brute={reference}");
            assert!((order_length(&coords, &order) - length).abs() < EPS);
        }
    }

    #[test]
    fn result_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(11);
        let coords = random_coords(&mut rng, 7);
        let (mut order, _) = found(run(&coords));
        order.sort_unstable();
        assert_eq!(order, (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn repeated_runs_return_identical_tours() {
        let mut rng = StdRng::seed_from_u64(23);
        let coords = random_coords(&mut rng, 8);
        assert_eq!(run(&coords), run(&coords));
    }

    #[test]
    fn first_minimal_order_wins_ties() {
        // Every rotation and reflection of the perimeter ties; identity is generated first.
        let square = [
            Coord::new(0.0, 0.0),
            Coord::new(0.0, 1.0),
            Coord::new(1.0, 1.0),
            Coord::new(1.0, 0.0),
        ];
        let (order, length) = found(run(&square));
        assert_eq!(order, vec![0, 1, 2, 3]);
        assert!((length - 4.0).abs() < EPS);
    }

    #[test]
    fn one_and_two_points_use_the_general_path() {
        let (order, length) = found(run(&[Coord::new(2.0, 2.0)]));
        assert_eq!(order, vec![0]);
        assert_eq!(length, 0.0);

        let (order, length) = found(run(&[Coord::new(0.0, 0.0), Coord::new(3.0, 4.0)]));
        assert_eq!(order, vec![0, 1]);
        assert!((length - 10.0).abs() < EPS);
    }

    #[test]
    fn empty_input_is_an_error() {
        let cancel = CancelToken::new();
        let mut sink = NoProgress;
        let mut control = SearchControl::new(&mut sink, &cancel);
        assert!(matches!(
            ExactSearch.search(&[], &mut control),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn progress_is_monotonic_and_ends_at_100() {
        let mut rng = StdRng::seed_from_u64(3);
        let coords = random_coords(&mut rng, 7);
        let cancel = CancelToken::new();
        let mut seen = Vec::new();
        {
            let mut sink = |p: u8| seen.push(p);
            let mut control = SearchControl::new(&mut sink, &cancel);
            found(ExactSearch.search(&coords, &mut control).expect("search runs"));
        }
        assert!(seen.len() > 1);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(seen.last(), Some(&100));
    }

    #[test]
    fn cancellation_stops_before_completion() {
        let mut rng = StdRng::seed_from_u64(5);
        let coords = random_coords(&mut rng, 8);
        let cancel = CancelToken::new();
        let trigger = cancel.clone();
        let mut seen = Vec::new();
        let outcome = {
            let mut sink = |p: u8| {
                seen.push(p);
                if p >= 25 {
                    trigger.cancel();
                }
            };
            let mut control = SearchControl::new(&mut sink, &cancel);
            ExactSearch.search(&coords, &mut control).expect("search runs")
        };
        assert_eq!(outcome, SearchOutcome::Cancelled);
        let last = *seen.last().expect("progress was reported");
        assert!(last < 100, "last progress {last}");
    }

    #[test]
    fn cancel_on_final_report_keeps_finished_tour() {
        // 10! is a multiple of the checkpoint interval, so the last leaf reports 100.
        let coords: Vec<Coord> = (0..10)
            .map(|i| Coord::new(f64::from(i), f64::from(i % 3)))
            .collect();
        let cancel = CancelToken::new();
        let trigger = cancel.clone();
        let mut seen = Vec::new();
        let outcome = {
            let mut sink = |p: u8| {
                seen.push(p);
                if p == 100 {
                    trigger.cancel();
                }
            };
            let mut control = SearchControl::new(&mut sink, &cancel);
            ExactSearch.search(&coords, &mut control).expect("search runs")
        };
        assert!(cancel.is_cancelled());
        assert_eq!(seen.last(), Some(&100));
        let (order, _) = found(outcome);
        assert_eq!(order.len(), 10);
    }

    #[test]
    fn cancel_before_first_checkpoint_is_honoured() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let mut sink = NoProgress;
        let mut control = SearchControl::new(&mut sink, &cancel);
        let coords = [
            Coord::new(0.0, 0.0),
            Coord::new(0.0, 1.0),
            Coord::new(1.0, 1.0),
            Coord::new(1.0, 0.0),
        ];
        let outcome = ExactSearch.search(&coords, &mut control).expect("search runs");
        assert_eq!(outcome, SearchOutcome::Cancelled);
    }
}
