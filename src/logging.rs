// Tracing setup. Output goes to stderr: stdout carries protocol frames.

use crate::error::{Result, TicketmasterError};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Installs the global subscriber. `RUST_LOG` wins over `log_level`.
pub fn init_tracing(log_level: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ticketmaster_mcp={},warn", log_level)));

    let formatting_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true);

    Registry::default()
        .with(env_filter)
        .with(formatting_layer)
        .try_init()
        .map_err(|e| TicketmasterError::ConfigError(format!("Failed to initialize tracing: {}", e)))?;

    tracing::info!(log_level, "Logging initialized");
    Ok(())
}
