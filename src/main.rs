use std::{process::ExitCode, time::Instant};

use log::{info, warn};

use azroute_core::{
    CancelToken, Outcome, Result, RouteOptimizer, RouteOptions, geometry, logging, read_points,
    retain_complete, write_route_to,
};

fn main() -> ExitCode {
    if std::env::args().skip(1).any(|arg| arg == "--help" || arg == "-h") {
        print!("{}", RouteOptions::usage());
        return ExitCode::SUCCESS;
    }

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let now = Instant::now();
    let options = RouteOptions::from_args()?;
    logging::init_logger(&options)?;

    info!("options: {options}");

    if let Some((from, to)) = options.manual_pair()? {
        println!("Azimuth: {:.2}°", geometry::bearing(from, to));
        println!("Distance: {:.2}", geometry::distance(from, to));
        return Ok(ExitCode::SUCCESS);
    }

    let points = retain_complete(read_points(options.input_path())?);
    info!("input: n={}", points.len());

    let cancel = CancelToken::new();
    cancel.cancel_on_ctrlc()?;

    let optimizer = RouteOptimizer::new(options.exact_threshold);
    let show_progress = options.progress;
    let mut progress = |percent: u8| {
        if show_progress {
            eprint!("\rprogress: {percent:>3}%");
            if percent == 100 {
                eprintln!();
            }
        }
    };

    match optimizer.optimize(&points, &mut progress, &cancel)? {
        Outcome::Cancelled => {
            if show_progress {
                eprintln!();
            }
            warn!("output: cancelled after {:.2}s", now.elapsed().as_secs_f32());
            eprintln!("cancelled");
            Ok(ExitCode::from(130))
        }
        Outcome::Completed(route) => {
            write_route_to(options.output_path(), &route, options.legs)?;
            info!(
                "output: n={} length={:.2} strategy={} time={:.2}s",
                route.tour.len(),
                route.length,
                route.strategy,
                now.elapsed().as_secs_f32()
            );
            route.tour.metrics();
            Ok(ExitCode::SUCCESS)
        }
    }
}
