/**
 * Document Broadcast Channel
 *
 * This module provides the publish/subscribe topic that carries document
 * edits to every connected editor. It wraps a `tokio::sync::broadcast`
 * channel, which provides a multi-producer, multi-consumer queue where every
 * subscriber receives its own copy of each message.
 *
 * # Delivery
 *
 * - Publishing never blocks and never fails; with no subscribers the message
 *   is simply dropped.
 * - A new subscription sees only messages published after it was created.
 *   There is no backlog and no replay.
 * - A subscriber that falls more than `capacity` messages behind loses the
 *   oldest ones and continues with the rest.
 */

use crate::shared::{BroadcastMessage, DOCUMENTS_TOPIC};
use futures_util::stream::{self, Stream};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Default channel capacity
pub const DEFAULT_CAPACITY: usize = 1000;

/// The `documents` topic
///
/// Cheap to clone; every clone publishes into the same topic.
///
/// # Usage
///
/// ```rust
/// use xfdocs::backend::realtime::DocumentsChannel;
/// use xfdocs::shared::BroadcastMessage;
///
/// let channel = DocumentsChannel::new(16);
/// let subscription = channel.subscribe();
/// assert_eq!(channel.publish(BroadcastMessage::new(1, "hello")), 1);
/// subscription.unsubscribe();
/// ```
#[derive(Debug, Clone)]
pub struct DocumentsChannel {
    sender: broadcast::Sender<BroadcastMessage>,
}

impl DocumentsChannel {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Topic name
    pub fn topic(&self) -> &'static str {
        DOCUMENTS_TOPIC
    }

    /// Publish a message to all current subscribers
    ///
    /// # Returns
    ///
    /// Number of active subscribers that received the message (0 if none)
    pub fn publish(&self, message: BroadcastMessage) -> usize {
        let id = message.id;
        match self.sender.send(message) {
            Ok(subscriber_count) => {
                tracing::info!(
                    "[Realtime] Document {} broadcast to {} subscribers",
                    id,
                    subscriber_count
                );
                subscriber_count
            }
            Err(_) => {
                tracing::debug!("[Realtime] No subscribers to receive document {}", id);
                0
            }
        }
    }

    /// Open a new subscription
    pub fn subscribe(&self) -> Subscription {
        let subscription = Subscription {
            id: Uuid::new_v4(),
            receiver: self.sender.subscribe(),
        };
        tracing::debug!(
            "[Realtime] Subscription {} opened on '{}'",
            subscription.id,
            DOCUMENTS_TOPIC
        );
        subscription
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for DocumentsChannel {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// One subscriber's view of the topic
///
/// Dropping the subscription stops delivery. [`Subscription::unsubscribe`]
/// does the same explicitly; it consumes `self`, so it can only happen once.
#[derive(Debug)]
pub struct Subscription {
    id: Uuid,
    receiver: broadcast::Receiver<BroadcastMessage>,
}

impl Subscription {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Wait for the next message
    ///
    /// Returns `None` once every publisher is gone. Lagged messages are
    /// skipped with a warning.
    pub async fn recv(&mut self) -> Option<BroadcastMessage> {
        loop {
            match self.receiver.recv().await {
                Ok(message) => return Some(message),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        "[Realtime] Subscription {} lagged, skipped {} messages",
                        self.id,
                        skipped
                    );
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::debug!("[Realtime] Channel closed for subscription {}", self.id);
                    return None;
                }
            }
        }
    }

    /// Non-blocking receive; `None` when nothing is queued
    pub fn try_recv(&mut self) -> Option<BroadcastMessage> {
        loop {
            match self.receiver.try_recv() {
                Ok(message) => return Some(message),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        "[Realtime] Subscription {} lagged, skipped {} messages",
                        self.id,
                        skipped
                    );
                    continue;
                }
                Err(_) => return None,
            }
        }
    }

    /// Stop receiving messages
    pub fn unsubscribe(self) {
        tracing::debug!("[Realtime] Subscription {} closed", self.id);
    }

    /// Turn the subscription into a stream of messages
    pub fn into_stream(self) -> impl Stream<Item = BroadcastMessage> {
        stream::unfold(self, |mut subscription| async move {
            subscription
                .recv()
                .await
                .map(|message| (message, subscription))
        })
    }
}
