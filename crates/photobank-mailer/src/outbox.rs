//! Fire-and-forget delivery queue.

use std::sync::Arc;

use tokio_util::task::TaskTracker;
use tracing::{debug, warn};

use photobank_core::traits::{MailDispatcher, MailMessage};

/// Hands messages to a [`MailDispatcher`] on background tasks.
///
/// [`MailOutbox::submit`] returns immediately and cannot fail. Delivery
/// errors are observed only through the log; they never reach the
/// operation that queued the message. Cloning shares the same tracker.
#[derive(Debug, Clone)]
pub struct MailOutbox {
    dispatcher: Arc<dyn MailDispatcher>,
    tracker: TaskTracker,
}

impl MailOutbox {
    /// Creates an outbox delivering through `dispatcher`.
    pub fn new(dispatcher: Arc<dyn MailDispatcher>) -> Self {
        Self {
            dispatcher,
            tracker: TaskTracker::new(),
        }
    }

    /// Queues `message` for delivery. Must be called within a Tokio runtime.
    pub fn submit(&self, message: MailMessage) {
        let dispatcher = Arc::clone(&self.dispatcher);
        self.tracker.spawn(async move {
            match dispatcher.send(&message).await {
                Ok(()) => debug!(to = %message.to, subject = %message.subject, "Mail delivered"),
                Err(e) => warn!(
                    to = %message.to,
                    subject = %message.subject,
                    error = %e,
                    "Mail delivery failed"
                ),
            }
        });
    }

    /// Number of deliveries still in flight.
    pub fn pending(&self) -> usize {
        self.tracker.len()
    }

    /// Waits until every queued delivery has finished, successfully or not.
    ///
    /// The outbox keeps accepting messages afterwards.
    pub async fn flush(&self) {
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }
}
