//! Tracing bootstrap for stacks binaries.

use stacks_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::EnvFilter;

/// Build the level filter: `RUST_LOG` when set, the configured level otherwise.
pub fn env_filter(settings: &TelemetrySettings) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level))
}

/// Install the global tracing subscriber.
///
/// Returns `false` when a subscriber was already installed, in which case the
/// existing one is left in place.
pub fn init(settings: &TelemetrySettings) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(settings))
        .with_writer(std::io::stderr);

    let installed = match settings.log_format {
        LogFormat::Pretty => builder.try_init().is_ok(),
        LogFormat::Json => builder.json().try_init().is_ok(),
    };

    if installed {
        tracing::debug!(
            target: "stacks-telemetry",
            format = ?settings.log_format,
            level = %settings.level,
            "telemetry initialized"
        );
    }

    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_a_no_op() {
        let settings = TelemetrySettings::default();
        let _ = init(&settings);
        assert!(!init(&settings));
    }

    #[test]
    fn configured_level_is_used_as_fallback() {
        let settings = TelemetrySettings {
            log_format: LogFormat::Json,
            level: "warn".to_string(),
        };
        if std::env::var("RUST_LOG").is_err() {
            assert_eq!(
                env_filter(&settings).max_level_hint(),
                Some(tracing_subscriber::filter::LevelFilter::WARN)
            );
        }
    }
}
