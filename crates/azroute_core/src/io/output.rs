use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::{Error, OptimizedRoute, Result};

/// Writes the route as `comment;x;y` lines in visiting order, so the output can be
/// read back as a point file. With `with_legs`, a leg table and summary follow.
pub fn write_route<W: Write>(out: &mut W, route: &OptimizedRoute, with_legs: bool) -> Result<()> {
    for point in route.tour.points() {
        writeln!(out, "{point}")?;
    }
    if with_legs {
        writeln!(out)?;
        for leg in &route.legs {
            writeln!(out, "{leg}")?;
        }
        writeln!(
            out,
            "total: {:.2} ({} points, {})",
            route.length,
            route.tour.len(),
            route.strategy
        )?;
    }
    out.flush()?;
    Ok(())
}

/// [`write_route`] to a file, or stdout when `path` is `None`.
pub fn write_route_to(path: Option<&Path>, route: &OptimizedRoute, with_legs: bool) -> Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                Error::other(format!("failed to create output file {}: {e}", path.display()))
            })?;
            write_route(&mut BufWriter::new(file), route, with_legs)?;
            log::debug!("output: wrote route to {}", path.display());
        }
        None => write_route(&mut io::stdout().lock(), route, with_legs)?,
    }
    Ok(())
}
