//! Transient user-facing notifications.

use tokio::sync::mpsc;
use tracing::debug;

/// Fire-and-forget transient message display.
///
/// Used for validation failures: the message is shown once (snackbar,
/// toast, log line) and never becomes part of the search state.
pub trait Notify: Send + Sync {
    fn notify(&self, message: &str);
}

/// A [`Notify`] implementation backed by an unbounded channel.
///
/// The presentation layer drains the receiving half. A dropped receiver
/// is not an error; the message is simply discarded.
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<String>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiver the presentation layer drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notify for ChannelNotifier {
    fn notify(&self, message: &str) {
        if self.tx.send(message.to_string()).is_err() {
            debug!(message, "notification dropped: no receiver");
        }
    }
}
