mod config;
mod studio;

use anyhow::Result;

use tracer_engine::logging::{init_logging, LoggingConfig};
use tracer_engine::window::{Runtime, RuntimeConfig};

use config::StudioConfig;
use studio::Studio;

fn main() -> Result<()> {
    let config = StudioConfig::from_env()?;

    init_logging(match &config.log_filter {
        Some(filter) => LoggingConfig::with_filter(filter.clone()),
        None => LoggingConfig::default(),
    });

    let runtime = RuntimeConfig {
        title: "Glob Tracer".to_string(),
        initial_size: config.canvas_size(),
        resizable: true,
    };

    Runtime::run(runtime, Studio::new(config))
}
