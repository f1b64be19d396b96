//! Tracing setup and the debug-gated log sink.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT_TRACING: Once = Once::new();

const SINK_PREFIX: &str = "====== ";

/// Install the global fmt subscriber. Later calls are no-ops.
///
/// `RUST_LOG` wins when set; otherwise the level is `debug` in debug mode and
/// `info` elsewhere.
pub fn init_tracing(debug_mode: bool) {
    INIT_TRACING.call_once(|| {
        let fallback = if debug_mode { "debug" } else { "info" };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init();

        tracing::debug!("tracing initialized (debug_mode={})", debug_mode);
    });
}

/// Leveled sink gated by a debug-mode flag fixed at construction.
///
/// Emits nothing when the flag is off. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink {
    enabled: bool,
}

impl LogSink {
    pub fn new(debug_mode: bool) -> Self {
        Self {
            enabled: debug_mode,
        }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn debug(&self, msg: impl AsRef<str>) {
        if self.enabled {
            tracing::debug!(target: "m3u8_log", "{}{}", SINK_PREFIX, msg.as_ref());
        }
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        if self.enabled {
            tracing::error!(target: "m3u8_log", "{}{}", SINK_PREFIX, msg.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_gate() {
        assert!(LogSink::new(true).is_enabled());
        assert!(!LogSink::new(false).is_enabled());
        assert!(!LogSink::default().is_enabled());

        // Either way these must not panic.
        LogSink::disabled().debug("dropped");
        LogSink::new(true).error(format!("kept {}", 1));
    }

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing(false);
        init_tracing(true);
    }
}
