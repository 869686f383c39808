//! Shortest closed tours over labeled planar points.
//! Small inputs are searched exhaustively; larger ones get a nearest-neighbor tour.
//! Every run reports progress and can be cancelled cooperatively.

mod algo;
mod constants;
mod error;
mod geo;
mod io;
pub mod logging;
mod node;
mod progress;
mod tour;

pub(crate) use io::options;

pub use algo::exact::ExactSearch;
pub use algo::greedy::GreedySearch;
pub use algo::optimizer::{ExactThreshold, OptimizedRoute, Outcome, RouteOptimizer, optimize_route};
pub use algo::search::{RouteSearch, SearchOutcome, Strategy};
pub use error::{Error, Result};
pub use geo::geometry;
pub use io::input::{parse_points, read_points, retain_complete};
pub use io::options::{LogFormat, LogLevel, RouteOptions};
pub use io::output::{write_route, write_route_to};
pub use node::{Coord, Point};
pub use progress::{CancelToken, NoProgress, ProgressSink, SearchControl};
pub use tour::{Leg, Tour, TourMetrics, annotate_legs, tour_length};
