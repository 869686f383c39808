use std::{fs, io::Read, path::Path};

use crate::{Error, Point, Result};

const FIELD_SEPARATOR: char = ';';

/// Reads a point list from `path`, or stdin when `None`.
pub fn read_points(path: Option<&Path>) -> Result<Vec<Point>> {
    let text = match path {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            Error::invalid_input(format!("cannot read points from {}: {e}", path.display()))
        })?,
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    let points = parse_points(&text)?;
    log::debug!("input: read points n={}", points.len());
    Ok(points)
}

/// Parses `comment;x;y` lines. Blank lines are skipped.
///
/// The comment may itself contain semicolons; the last two fields are the
/// coordinates. An empty or unparseable coordinate yields an incomplete point.
pub fn parse_points(text: &str) -> Result<Vec<Point>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse_line(idx + 1, line))
        .collect()
}

fn parse_line(line_no: usize, line: &str) -> Result<Point> {
    let mut fields = line.rsplitn(3, FIELD_SEPARATOR);
    let (Some(y), Some(x), Some(label)) = (fields.next(), fields.next(), fields.next()) else {
        return Err(Error::invalid_input(format!(
            "Line {line_no}: expected 'comment;x;y' but got: {line}"
        )));
    };
    Ok(Point::with_coords(label.trim(), parse_number(x), parse_number(y)))
}

/// Finite number with either `.` or `,` as decimal separator.
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Drops points with a missing coordinate, warning once per dropped point.
pub fn retain_complete(points: Vec<Point>) -> Vec<Point> {
    let total = points.len();
    let complete: Vec<Point> = points
        .into_iter()
        .enumerate()
        .filter(|(idx, point)| {
            let keep = point.is_complete();
            if !keep {
                log::warn!("input: skipping incomplete point #{idx} label={:?}", point.label);
            }
            keep
        })
        .map(|(_, point)| point)
        .collect();
    if complete.len() < total {
        log::info!("input: kept {}/{total} points", complete.len());
    }
    complete
}
