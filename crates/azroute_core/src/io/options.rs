use std::{
    env,
    path::{Path, PathBuf},
};

use azroute_derive::{CliOptions, CliValue, KvDisplay};
use log::LevelFilter;

use crate::{Coord, Error, ExactThreshold, Result, io::input::parse_number};

/// Runtime options for the `azroute` binary.
#[derive(Clone, Debug, CliOptions, KvDisplay)]
pub struct RouteOptions {
    /// Point file with `comment;x;y` lines. Empty or `-` means stdin.
    #[cli(long = "input", value = "<path>", help = "Point file (comment;x;y), - for stdin")]
    #[kv(fmt = "path")]
    pub input: PathBuf,
    /// Route output file. Empty or `-` means stdout.
    #[cli(long = "output", value = "<path>", help = "Route output file, - for stdout")]
    #[kv(fmt = "path")]
    pub output: PathBuf,
    #[cli(
        long = "exact-threshold",
        value = "<n>",
        help = "Largest point count searched exhaustively"
    )]
    pub exact_threshold: ExactThreshold,
    #[cli(long = "progress", help = "Print search progress to stderr")]
    pub progress: bool,
    #[cli(long = "legs", help = "Append bearing and distance of every leg")]
    pub legs: bool,
    /// Manual two-point mode, together with `to`.
    #[cli(long = "from", value = "<x,y>", help = "Start point for a single azimuth")]
    pub from: String,
    #[cli(long = "to", value = "<x,y>", help = "End point for a single azimuth")]
    pub to: String,
    #[cli(
        long = "log-level",
        value = "<error|warn|info|debug|trace|off>",
        parse_with = "LogLevel::parse"
    )]
    pub log_level: LogLevel,
    #[cli(long = "log-format", value = "<compact|pretty>", parse_with = "LogFormat::parse")]
    pub log_format: LogFormat,
    #[cli(long = "log-timestamp", help = "Prefix log lines with a timestamp")]
    pub log_timestamp: bool,
    /// Log file. Empty or `-` means stderr.
    #[cli(long = "log-output", value = "<path>", help = "Log file, - for stderr")]
    #[kv(fmt = "path")]
    pub log_output: PathBuf,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-level")]
pub enum LogLevel {
    Error,
    #[cli(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-format")]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: PathBuf::new(),
            exact_threshold: ExactThreshold::DEFAULT,
            progress: false,
            legs: true,
            from: String::new(),
            to: String::new(),
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: false,
            log_output: PathBuf::new(),
        }
    }
}

impl RouteOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    pub fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::invalid_input(Self::usage()));
            }

            let Some(raw_name) = arg.strip_prefix("--").filter(|name| !name.is_empty()) else {
                return Err(Error::invalid_input(format!(
                    "Unexpected argument: {arg}\n\n{}",
                    Self::usage()
                )));
            };

            let (name, value) = Self::split_arg(raw_name, &mut args);
            if !options.apply_cli_option(&name, value)? {
                return Err(Error::invalid_input(format!(
                    "Unknown option: --{name}\n\n{}",
                    Self::usage()
                )));
            }
        }

        Ok(options)
    }

    pub fn usage() -> String {
        format!(
            concat!(
                "Usage:\n",
                "  azroute [options] [--input points.txt]\n",
                "  azroute [options] < points.txt\n",
                "  azroute --from <x,y> --to <x,y>\n\n",
                "Options:\n",
                "{}\n",
                "Examples:\n",
                "  azroute --input points.txt --output route.txt\n",
                "  azroute --exact-threshold 9 --progress < points.txt\n",
                "  azroute --log-level=info --log-output run.log < points.txt\n",
                "  azroute --from 0,0 --to 10,10\n",
            ),
            Self::cli_usage()
        )
    }

    pub fn input_path(&self) -> Option<&Path> {
        stream_path(&self.input)
    }

    pub fn output_path(&self) -> Option<&Path> {
        stream_path(&self.output)
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        stream_path(&self.log_output)
    }

    /// Both ends of the manual azimuth mode, `None` when neither is set.
    pub fn manual_pair(&self) -> Result<Option<(Coord, Coord)>> {
        match (self.from.trim(), self.to.trim()) {
            ("", "") => Ok(None),
            ("", _) | (_, "") => Err(Error::invalid_input(
                "--from and --to must be given together",
            )),
            (from, to) => Ok(Some((
                parse_coord_pair("from", from)?,
                parse_coord_pair("to", to)?,
            ))),
        }
    }
}

fn stream_path(raw: &Path) -> Option<&Path> {
    if raw.as_os_str().is_empty() || raw == Path::new("-") {
        None
    } else {
        Some(raw)
    }
}

/// `x,y`, or `x;y` which also allows decimal commas.
fn parse_coord_pair(name: &str, raw: &str) -> Result<Coord> {
    let separator = if raw.contains(';') { ';' } else { ',' };
    let invalid =
        || Error::invalid_input(format!("Invalid value for --{name}: {raw} (expected x,y)"));

    let mut parts = raw.split(separator);
    let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };
    Ok(Coord::new(
        parse_number(x).ok_or_else(invalid)?,
        parse_number(y).ok_or_else(invalid)?,
    ))
}

pub(crate) fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::invalid_input(format!(
            "Invalid boolean for --{name}: {value} (expected true/false)"
        ))),
    }
}
