//! Tracing setup for the `holdem` binary.
//!
//! Logs go to stderr so command output on stdout stays machine-readable.
//! `RUST_LOG` overrides the default `warn` filter, e.g.
//! `RUST_LOG=holdem_engine=debug holdem sim --rounds 5`.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

pub const DEFAULT_FILTER: &str = "warn";

/// Installs the global subscriber. Returns `false` when one was already set.
pub fn init_logging() -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).is_ok()
}

#[cfg(test)]
pub(crate) mod capture {
    use std::sync::{Arc, Mutex};
    use tracing::Level;
    use tracing_subscriber::Layer;
    use tracing_subscriber::layer::Context;

    #[derive(Debug, Clone)]
    pub struct LogEntry {
        pub level: Level,
        pub target: String,
        pub message: String,
        pub fields: Vec<(String, String)>,
    }

    /// Layer that keeps every event it sees.
    #[derive(Clone, Default)]
    pub struct CaptureLayer {
        entries: Arc<Mutex<Vec<LogEntry>>>,
    }

    impl CaptureLayer {
        pub fn entries(&self) -> Vec<LogEntry> {
            self.entries.lock().unwrap().clone()
        }
    }

    impl<S: tracing::Subscriber> Layer<S> for CaptureLayer {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let metadata = event.metadata();
            let mut visitor = FieldVisitor::default();
            event.record(&mut visitor);
            self.entries.lock().unwrap().push(LogEntry {
                level: *metadata.level(),
                target: metadata.target().to_string(),
                message: visitor.message.unwrap_or_default(),
                fields: visitor.fields,
            });
        }
    }

    #[derive(Default)]
    struct FieldVisitor {
        message: Option<String>,
        fields: Vec<(String, String)>,
    }

    impl tracing::field::Visit for FieldVisitor {
        fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
            let value_str = format!("{:?}", value);
            if field.name() == "message" {
                self.message = Some(value_str);
            } else {
                self.fields.push((field.name().to_string(), value_str));
            }
        }
    }
}
