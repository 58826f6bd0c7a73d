//! Logging setup based on `tracing-subscriber`.
//!
//! Console output with colour control, optional file output (full, compact
//! or JSON), and a reloadable level filter so the level can be changed after
//! start-up.

pub mod config;
pub mod error;
pub(crate) mod writer;


pub use config::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};
pub use error::LoggerError;

use std::io::IsTerminal;

use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, reload};
use writer::LogFileWriter;

type FilteredRegistry = Layered<reload::Layer<EnvFilter, Registry>, Registry>;
type BoxedLayer = Box<dyn Layer<FilteredRegistry> + Send + Sync>;

/// Handle for changing the active level filter at runtime.
#[derive(Clone)]
pub struct LogLevelHandle {
    inner: reload::Handle<EnvFilter, Registry>,
}

impl LogLevelHandle {
    /// Replaces the level filter, e.g. `handle.set_level("debug")`.
    pub fn set_level(&self, level: &str) -> Result<(), LoggerError> {
        let filter = build_filter(level)?;
        self.inner.reload(filter).map_err(|e| LoggerError::Reload {
            message: e.to_string(),
        })
    }
}

/// Installs the global subscriber described by `config`.
pub fn init_logger(config: &LoggerConfig) -> Result<LogLevelHandle, LoggerError> {
    config.validate()?;

    let (filter, handle) = reload::Layer::new(build_filter(&config.level)?);
    tracing_subscriber::registry()
        .with(filter)
        .with(build_layers(config)?)
        .try_init()
        .map_err(|e| LoggerError::Init {
            message: e.to_string(),
        })?;

    Ok(LogLevelHandle { inner: handle })
}

fn build_filter(level: &str) -> Result<EnvFilter, LoggerError> {
    config::parse_level(level)?;
    EnvFilter::try_new(level.to_lowercase()).map_err(|e| LoggerError::config(e.to_string()))
}

/// Output layers in registration order.
fn build_layers(config: &LoggerConfig) -> Result<Vec<BoxedLayer>, LoggerError> {
    let mut layers = Vec::with_capacity(2);

    // The file layer goes first; otherwise span fields formatted by the
    // console layer carry ANSI codes into the file.
    if config.file.enabled {
        let writer = LogFileWriter::new(&config.file)?;
        let layer = match config.file.format {
            LogFormat::Full => fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer)
                .boxed(),
            LogFormat::Compact => fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .compact()
                .with_writer(writer)
                .boxed(),
            LogFormat::Json => fmt::layer()
                .with_ansi(false)
                .json()
                .with_writer(writer)
                .boxed(),
        };
        layers.push(layer);
    }

    if config.console.enabled {
        // stdout is reserved for command output
        let use_ansi = config.console.colored && std::io::stderr().is_terminal();
        layers.push(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(use_ansi)
                .with_target(true)
                .with_level(true)
                .boxed(),
        );
    }

    Ok(layers)
}
