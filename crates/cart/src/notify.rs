//! Notification sink adapters.

use tracing::error;

use crate::ports::NotificationSink;

/// Routes user-facing messages through the `tracing` pipeline.
///
/// The UI layer is expected to bring its own sink (toast, banner, ...);
/// this one is the composition-time default so failures are never silent.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    /// Create the notifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl NotificationSink for TracingNotifier {
    fn error(&self, message: &str) {
        error!(target: "rocketshoes_cart::notify", "{message}");
    }
}
