use std::{fs::File, io::Write};

use env_logger::{Builder, Target, WriteStyle};
use log::{Level, Record};

use crate::{
    Error, Result,
    options::{LogFormat, RouteOptions},
};

/// Installs the global logger described by the `log_*` options.
///
/// Logs go to stderr unless `--log-output` names a file, so stdout stays free
/// for the route itself.
pub fn init_logger(options: &RouteOptions) -> Result<()> {
    let style = LineStyle {
        format: options.log_format,
        timestamp: options.log_timestamp,
    };

    let mut builder = Builder::new();
    builder
        .filter_level(options.log_level.to_filter())
        .write_style(WriteStyle::Never)
        .format(move |buf, record| {
            if style.timestamp {
                write!(buf, "{} ", buf.timestamp_millis())?;
            }
            writeln!(buf, "{}", style.render(record))
        })
        .target(log_target(options)?);

    builder
        .try_init()
        .map_err(|e| Error::other(format!("logger init failed: {e}")))
}

fn log_target(options: &RouteOptions) -> Result<Target> {
    let Some(path) = options.log_output_path() else {
        return Ok(Target::Stderr);
    };
    let file = File::create(path).map_err(|e| {
        Error::other(format!("failed to create log file {}: {e}", path.display()))
    })?;
    Ok(Target::Pipe(Box::new(file)))
}

#[derive(Clone, Copy)]
struct LineStyle {
    format: LogFormat,
    timestamp: bool,
}

impl LineStyle {
    fn render(&self, record: &Record<'_>) -> String {
        let tag = level_tag(record.level());
        match self.format {
            LogFormat::Compact => format!("{tag} {}", record.args()),
            LogFormat::Pretty => format!("{tag:<5} [{}] {}", record.target(), record.args()),
        }
    }
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

#[cfg(test)]
mod tests {
    use log::{Level, Record};

    use super::LineStyle;
    use crate::options::LogFormat;

    fn render(format: LogFormat, level: Level) -> String {
        let style = LineStyle {
            format,
            timestamp: false,
        };
        style.render(
            &Record::builder()
                .args(format_args!("exact: complete n=5"))
                .level(level)
                .target("azroute_core::algo::exact")
                .build(),
        )
    }

    #[test]
    fn compact_lines_carry_only_level_and_message() {
        assert_eq!(
            render(LogFormat::Compact, Level::Info),
            "INFO exact: complete n=5"
        );
    }

    #[test]
    fn pretty_lines_include_target() {
        assert_eq!(
            render(LogFormat::Pretty, Level::Warn),
            "WARN  [azroute_core::algo::exact] exact: complete n=5"
        );
    }
}
