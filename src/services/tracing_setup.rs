//! Tracing subscriber setup
//!
//! Shared by the `splf` tool and by tests that want log output.

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Build a subscriber writing formatted events to `writer`.
///
/// `RUST_LOG` is honoured; `default_level` applies to everything it does not
/// mention.
pub fn build_subscriber<W>(writer: W, default_level: tracing::Level) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer().with_writer(writer).with_target(true);

    tracing_subscriber::registry().with(fmt_layer).with(env_filter)
}

/// Install the global subscriber, logging to stderr.
///
/// Returns false if a global subscriber was already set.
pub fn init_global(default_level: tracing::Level) -> bool {
    build_subscriber(std::io::stderr, default_level)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'w> MakeWriter<'w> for Captured {
        type Writer = Captured;

        fn make_writer(&'w self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_subscriber_respects_default_level() {
        let captured = Captured::default();
        let subscriber = build_subscriber(captured.clone(), tracing::Level::INFO);

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("hidden debug message");
            tracing::warn!("visible warning");
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("visible warning"), "{output}");
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(!output.contains("hidden debug message"), "{output}");
        }
    }
}
