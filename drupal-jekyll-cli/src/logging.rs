//! Logger setup.
//!
//! Command output goes through `log::info!`, so the default format is the
//! bare message. Warnings and errors get a colored label. `--verbose` adds
//! timestamps and debug messages; `--quiet` drops everything below warn.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use env_logger::{Builder, Target};
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::error::CliError;

/// Install the global logger. `RUST_LOG` still overrides the level.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> Result<(), CliError> {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = Builder::new();
    builder.filter_level(level).parse_default_env();

    builder.format(move |buf, record| {
        let label = match record.level() {
            Level::Error => format!("{} ", "error:".if_supports_color(Stdout, |t| t.red())),
            Level::Warn => format!("{} ", "warning:".if_supports_color(Stdout, |t| t.yellow())),
            _ => String::new(),
        };
        if verbose {
            writeln!(
                buf,
                "[{} {:5} {}] {}{}",
                buf.timestamp_seconds(),
                record.level(),
                record.target(),
                label,
                record.args()
            )
        } else {
            writeln!(buf, "{}{}", label, record.args())
        }
    });

    match logfile {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| CliError::logging(format!("{}: {}", path.display(), e)))?;
            builder.target(Target::Pipe(Box::new(TeeWriter { file })));
        }
        None => {
            builder.target(Target::Stdout);
        }
    }

    builder
        .try_init()
        .map_err(|e| CliError::logging(e.to_string()))
}

/// Copies log output to stdout and, without ANSI escapes, to a file.
struct TeeWriter {
    file: File,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write_all(buf)?;
        self.file.write_all(&strip_ansi_escapes::strip(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        self.file.flush()
    }
}
