//! Structured logging for the operator console.
//!
//! Log lines go to stderr so the bracket printed on stdout stays readable
//! when it is piped or redirected.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging
///
/// Levels come from `RUST_LOG` (default `info`). Records emitted by the
/// engine through the `log` facade are forwarded to the same subscriber.
///
/// # Example
///
/// ```no_run
/// use ss_cli::logging;
///
/// logging::init();
/// tracing::info!("Console starting");
/// ```
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::debug!("Structured logging initialized");
}

/// Log an operator action on a bracket
///
/// # Arguments
///
/// * `event_type` - Action name (`record`, `reset`, `reseed`, ...)
/// * `group_key` - Group the action applies to
/// * `match_key` - Optional match the action applies to
/// * `message` - Event message
///
/// # Example
///
/// ```
/// use ss_cli::logging::log_bracket_event;
///
/// log_bracket_event("record", "Boys-U-14-45kg", Some("round0-match1"), "Winner recorded");
/// ```
pub fn log_bracket_event(
    event_type: &str,
    group_key: &str,
    match_key: Option<&str>,
    message: &str,
) {
    tracing::info!(
        event_type = event_type,
        group_key = group_key,
        match_key = match_key,
        "BRACKET: {}",
        message
    );
}

/// Log an operator action the engine refused
pub fn log_rejected_action(event_type: &str, group_key: &str, reason: &str) {
    tracing::warn!(
        event_type = event_type,
        group_key = group_key,
        reason = reason,
        "Rejected operator action"
    );
}
