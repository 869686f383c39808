use std::fmt;

use crate::{Coord, Point, Result, node::resolve_coords};

/// Total length of the closed cycle through `coords` in order. Zero below two points.
pub fn tour_length(coords: &[Coord]) -> f64 {
    let n = coords.len();
    if n < 2 {
        return 0.0;
    }
    (0..n).map(|i| coords[i].dist(coords[(i + 1) % n])).sum()
}

/// Cycle length of `coords` visited in `order`, without materializing the tour.
#[inline]
pub(crate) fn order_length(coords: &[Coord], order: &[usize]) -> f64 {
    let n = order.len();
    if n < 2 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        sum += coords[order[i]].dist(coords[order[(i + 1) % n]]);
    }
    sum
}

/// One directed edge of a tour.
#[derive(Clone, Debug, PartialEq)]
pub struct Leg {
    pub from: Point,
    pub to: Point,
    /// Degrees in (-180, 180].
    pub bearing: f64,
    pub distance: f64,
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}: bearing={:.2}° distance={:.2}",
            self.from.name(),
            self.to.name(),
            self.bearing,
            self.distance
        )
    }
}

/// Legs of the closed tour through `points`; the last leg returns to the first point.
pub fn annotate_legs(points: &[Point]) -> Result<Vec<Leg>> {
    let coords = resolve_coords(points)?;
    Ok(legs_of(points, &coords))
}

fn legs_of(points: &[Point], coords: &[Coord]) -> Vec<Leg> {
    let n = points.len();
    (0..n)
        .map(|i| {
            let j = (i + 1) % n;
            Leg {
                from: points[i].clone(),
                to: points[j].clone(),
                bearing: coords[i].bearing(coords[j]),
                distance: coords[i].dist(coords[j]),
            }
        })
        .collect()
}

/// Points in visiting order. Always a permutation of the optimizer input.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tour {
    points: Vec<Point>,
    coords: Vec<Coord>,
}

impl Tour {
    pub(crate) fn from_order(points: &[Point], coords: &[Coord], order: &[usize]) -> Self {
        Self {
            points: order.iter().map(|&idx| points[idx].clone()).collect(),
            coords: order.iter().map(|&idx| coords[idx]).collect(),
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn length(&self) -> f64 {
        tour_length(&self.coords)
    }

    pub fn legs(&self) -> Vec<Leg> {
        legs_of(&self.points, &self.coords)
    }

    pub fn metrics(&self) -> TourMetrics {
        let n = self.len();

        if n < 2 {
            log::info!("metrics: n={n} so there's nothing to report");
            return TourMetrics::default();
        }

        let distances: Vec<f64> = (0..n)
            .map(|i| self.coords[i].dist(self.coords[(i + 1) % n]))
            .collect();
        let total: f64 = distances.iter().sum();
        let longest = distances.iter().copied().fold(0.0_f64, f64::max);
        let average = total / n as f64;

        log::info!("metrics: n={n} total={total:.2} longest_leg={longest:.2} avg_leg={average:.2}");

        TourMetrics {
            total,
            longest,
            average,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TourMetrics {
    pub total: f64,
    pub longest: f64,
    pub average: f64,
}

#[cfg(test)]
mod tests {
    use super::{Tour, annotate_legs, order_length, tour_length};
    use crate::{Coord, Error, Point};

    const EPS: f64 = 1e-9;

    fn square() -> Vec<Coord> {
        vec![
            Coord::new(0.0, 0.0),
            Coord::new(0.0, 1.0),
            Coord::new(1.0, 1.0),
            Coord::new(1.0, 0.0),
        ]
    }

    #[test]
    fn tour_length_closes_cycle() {
        assert!((tour_length(&square()) - 4.0).abs() < EPS);
    }

    #[test]
    fn tour_length_is_zero_below_two_points() {
        assert_eq!(tour_length(&[]), 0.0);
        assert_eq!(tour_length(&[Coord::new(5.0, 5.0)]), 0.0);
    }

    #[test]
    fn two_point_tour_counts_both_directions() {
        let coords = [Coord::new(0.0, 0.0), Coord::new(3.0, 4.0)];
        assert!((tour_length(&coords) - 10.0).abs() < EPS);
    }

    #[test]
    fn tour_length_is_invariant_under_rotation_and_reversal() {
        let coords = vec![
            Coord::new(0.0, 0.0),
            Coord::new(4.0, 1.0),
            Coord::new(6.0, 5.0),
            Coord::new(1.0, 7.0),
            Coord::new(-2.0, 3.0),
        ];
        let base = tour_length(&coords);
        for shift in 1..coords.len() {
            let mut rotated = coords.clone();
            rotated.rotate_left(shift);
            assert!((tour_length(&rotated) - base).abs() < EPS);
        }
        let mut reversed = coords.clone();
        reversed.reverse();
        assert!((tour_length(&reversed) - base).abs() < EPS);
    }

    #[test]
    fn order_length_matches_materialized_tour() {
        let coords = square();
        let order = [0, 2, 1, 3];
        let materialized: Vec<Coord> = order.iter().map(|&i| coords[i]).collect();
        assert!((order_length(&coords, &order) - tour_length(&materialized)).abs() < EPS);
    }

    #[test]
    fn annotate_legs_wraps_and_keeps_order() {
        let points = vec![
            Point::new("A", 0.0, 0.0),
            Point::new("B", 0.0, 10.0),
            Point::new("C", 10.0, 10.0),
        ];
        let legs = annotate_legs(&points).expect("complete points");
        assert_eq!(legs.len(), 3);
        assert_eq!(legs[0].from.label, "A");
        assert_eq!(legs[2].to.label, "A");
        assert_eq!(legs[0].to_string(), "A -> B: bearing=0.00° distance=10.00");
        assert_eq!(legs[1].to_string(), "B -> C: bearing=90.00° distance=10.00");
        assert_eq!(legs[2].to_string(), "C -> A: bearing=-135.00° distance=14.14");
    }

    #[test]
    fn annotate_legs_rejects_incomplete_points() {
        let points = vec![Point::new("A", 0.0, 0.0), Point::with_coords("B", None, None)];
        assert!(matches!(
            annotate_legs(&points),
            Err(Error::IncompletePoint { index: 1, .. })
        ));
    }

    #[test]
    fn tour_metrics_reports_longest_and_average_leg() {
        let points: Vec<Point> = square()
            .into_iter()
            .enumerate()
            .map(|(i, c)| Point::new(format!("p{i}"), c.x, c.y))
            .collect();
        let coords = square();
        let tour = Tour::from_order(&points, &coords, &[0, 2, 1, 3]);
        let metrics = tour.metrics();
        let diag = 2.0_f64.sqrt();
        assert!((metrics.total - (2.0 + 2.0 * diag)).abs() < EPS);
        assert!((metrics.longest - diag).abs() < EPS);
        assert!((metrics.average - metrics.total / 4.0).abs() < EPS);
        assert_eq!(tour.points()[1].label, "p2");
    }
}
