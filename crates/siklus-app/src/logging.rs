use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

/// All workspace crate targets that should receive log output.
const CRATE_TARGETS: &[&str] = &["siklus", "siklus_app", "siklus_core", "siklus_cycle"];

/// Handle for swapping the log filter once configuration is known.
pub struct LogHandle {
    handle: reload::Handle<EnvFilter, tracing_subscriber::Registry>,
    from_cli: bool,
}

fn crate_filter(level: &str) -> String {
    CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize tracing based on CLI verbosity level.
///
/// Mapping:
/// - 0 (none) -> warn, until the configured level is applied
/// - 1 (-v)   -> info
/// - 2 (-vv)  -> debug
/// - 3+ (-vvv)-> trace
///
/// `RUST_LOG` env var overrides both the CLI flag and the configuration.
pub fn init(verbosity: u8) -> LogHandle {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let from_env = EnvFilter::try_from_default_env().ok();
    let pinned = from_env.is_some() || verbosity > 0;
    let filter = from_env.unwrap_or_else(|| EnvFilter::new(crate_filter(level)));

    let (filter_layer, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    LogHandle {
        handle,
        from_cli: pinned,
    }
}

impl LogHandle {
    /// ## Summary
    /// Applies the configured level unless `RUST_LOG` or `-v` already chose
    /// one.
    pub fn apply_configured(&self, level: &str) {
        if self.from_cli {
            return;
        }

        if let Ok(filter) = EnvFilter::try_new(crate_filter(level)) {
            if let Err(e) = self.handle.modify(|current| *current = filter) {
                tracing::warn!(error = %e, "Failed to update log filter from config");
            }
        } else {
            tracing::warn!(level = %level, "Invalid log level in config, keeping warn");
        }
    }
}
