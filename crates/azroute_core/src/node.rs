use std::fmt;

use crate::{Error, Result, geometry};

/// Resolved planar coordinate. All search code works on these.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dist(self, rhs: Self) -> f64 {
        geometry::distance(self, rhs)
    }

    pub fn bearing(self, rhs: Self) -> f64 {
        geometry::bearing(self, rhs)
    }
}

/// Labeled point as the user entered it. Either coordinate may be absent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub label: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl Point {
    pub fn new(label: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            label: label.into(),
            x: Some(x),
            y: Some(y),
        }
    }

    pub fn with_coords(label: impl Into<String>, x: Option<f64>, y: Option<f64>) -> Self {
        Self {
            label: label.into(),
            x,
            y,
        }
    }

    pub fn coord(&self) -> Option<Coord> {
        Some(Coord::new(self.x?, self.y?))
    }

    pub fn is_complete(&self) -> bool {
        self.coord().is_some()
    }

    /// Label, or the coordinates when the label is blank.
    pub fn name(&self) -> String {
        if self.label.trim().is_empty() {
            format!("({}; {})", fmt_coord(self.x), fmt_coord(self.y))
        } else {
            self.label.clone()
        }
    }
}

/// `comment;x;y`, absent coordinates written as empty fields.
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{};{}", self.label, fmt_coord(self.x), fmt_coord(self.y))
    }
}

fn fmt_coord(value: Option<f64>) -> String {
    value
        .map(|v| ryu::Buffer::new().format(v).to_owned())
        .unwrap_or_default()
}

/// Coordinates of every point, failing on the first incomplete one.
pub(crate) fn resolve_coords(points: &[Point]) -> Result<Vec<Coord>> {
    points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            point.coord().ok_or_else(|| Error::IncompletePoint {
                index,
                label: point.label.clone(),
            })
        })
        .collect()
}
