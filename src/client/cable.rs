//! Cable Subscription Client
//!
//! Connects to `GET /cable`, decodes the Server-Sent Events stream into
//! [`BroadcastMessage`]s and forwards them to the editor's event loop.
//! Failed connects, stream errors and streams the server closes are all
//! retried with exponential backoff, from 1s up to 30s. The task only ends
//! when the handle is dropped.

use futures_util::StreamExt;
use reqwest::Client;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::client::config::Config;
use crate::shared::{BroadcastMessage, DocumentId, DOCUMENTS_TOPIC};

const INITIAL_RECONNECT_DELAY: Duration = Duration::from_millis(1000);
const MAX_RECONNECT_DELAY: Duration = Duration::from_secs(30);

/// Longest line the decoder will hold while waiting for its newline
pub const MAX_LINE_BYTES: usize = 1024 * 1024;

/// Subscription status reported by the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionStatus {
    Connecting,
    Connected,
    Retrying,
    Error(String),
    Disconnected,
}

/// Everything the cable task reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CableEvent {
    Message(BroadcastMessage),
    Status(SubscriptionStatus),
}

/// Incremental Server-Sent Events decoder
///
/// Feed it raw chunks; it yields one message per complete `documents`
/// event. Comment lines (keep-alives) and other event names are ignored.
/// Chunks may split lines, and UTF-8 sequences, anywhere.
///
/// A line longer than [`MAX_LINE_BYTES`] is dropped along with the event it
/// belongs to.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    event: Option<String>,
    data: Vec<String>,
    /// Skipping the remainder of an oversized line
    discarding: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: impl AsRef<[u8]>) -> Vec<BroadcastMessage> {
        self.buffer.extend_from_slice(chunk.as_ref());
        let mut messages = Vec::new();

        while let Some(newline_pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let raw: Vec<u8> = self.buffer.drain(..=newline_pos).collect();
            if self.discarding {
                self.discarding = false;
                continue;
            }
            let line = match std::str::from_utf8(&raw[..newline_pos]) {
                Ok(line) => line.trim_end_matches('\r'),
                Err(e) => {
                    tracing::warn!("[Cable] Skipping line with invalid UTF-8: {}", e);
                    continue;
                }
            };

            if line.is_empty() {
                if let Some(message) = self.dispatch() {
                    messages.push(message);
                }
                continue;
            }

            if line.starts_with(':') {
                continue;
            }

            let (field, value) = match line.split_once(':') {
                Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
                None => (line, ""),
            };

            match field {
                "event" => self.event = Some(value.to_string()),
                "data" => self.data.push(value.to_string()),
                _ => {}
            }
        }

        if self.buffer.len() > MAX_LINE_BYTES {
            tracing::warn!(
                "[Cable] Dropping line longer than {} bytes",
                MAX_LINE_BYTES
            );
            self.buffer.clear();
            self.event = None;
            self.data.clear();
            self.discarding = true;
        }

        messages
    }

    fn dispatch(&mut self) -> Option<BroadcastMessage> {
        let event = self.event.take();
        if self.data.is_empty() {
            return None;
        }
        let data = self.data.join("\n");
        self.data.clear();

        if let Some(name) = event.as_deref() {
            if name != DOCUMENTS_TOPIC {
                return None;
            }
        }

        match serde_json::from_str::<BroadcastMessage>(&data) {
            Ok(message) => Some(message),
            Err(e) => {
                tracing::warn!("[Cable] Failed to parse event data: {} | data: {}", e, data);
                None
            }
        }
    }
}

/// A running cable subscription
///
/// Dropping the handle, or calling [`CableHandle::unsubscribe`], stops the
/// background task.
#[derive(Debug)]
pub struct CableHandle {
    events: mpsc::UnboundedReceiver<CableEvent>,
    task: JoinHandle<()>,
}

impl CableHandle {
    /// Wait for the next event; `None` once the task has ended
    pub async fn recv(&mut self) -> Option<CableEvent> {
        self.events.recv().await
    }

    pub fn unsubscribe(self) {
        self.task.abort();
    }
}

impl Drop for CableHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Start a cable subscription on the current tokio runtime
pub fn subscribe(config: Config, filter: Option<DocumentId>) -> CableHandle {
    let (sender, events) = mpsc::unbounded_channel();
    let task = tokio::spawn(run_subscription(config, filter, sender));
    CableHandle { events, task }
}

async fn run_subscription(
    config: Config,
    filter: Option<DocumentId>,
    sender: mpsc::UnboundedSender<CableEvent>,
) {
    let client = Client::new();
    let url = config.cable_url(filter);
    let mut reconnect_delay = INITIAL_RECONNECT_DELAY;

    let status = |status: SubscriptionStatus| {
        let _ = sender.send(CableEvent::Status(status));
    };

    loop {
        if sender.is_closed() {
            tracing::debug!("[Cable] Receiver dropped; stopping subscription");
            return;
        }

        tracing::info!("[Cable] Subscribing to {}", url);
        status(SubscriptionStatus::Connecting);

        match client.get(&url).header("Accept", "text/event-stream").send().await {
            Ok(resp) if resp.status().is_success() => {
                tracing::info!("[Cable] Subscription established");
                status(SubscriptionStatus::Connected);

                let mut stream = resp.bytes_stream();
                let mut decoder = SseDecoder::new();
                let mut delivered = false;

                while let Some(chunk_result) = stream.next().await {
                    let chunk = match chunk_result {
                        Ok(chunk) => chunk,
                        Err(e) => {
                            tracing::error!("[Cable] Error reading from stream: {}", e);
                            status(SubscriptionStatus::Error(format!("stream: {}", e)));
                            break;
                        }
                    };

                    for message in decoder.push(&chunk) {
                        delivered = true;
                        if sender.send(CableEvent::Message(message)).is_err() {
                            // Receiver gone: the editor unsubscribed
                            return;
                        }
                    }
                }

                tracing::info!("[Cable] Stream closed (will retry)");
                status(SubscriptionStatus::Disconnected);

                // Reset the backoff only after a connection that delivered edits
                if delivered {
                    reconnect_delay = INITIAL_RECONNECT_DELAY;
                }
            }
            Ok(resp) => {
                tracing::error!("[Cable] Subscription failed with status: {} (will retry)", resp.status());
                status(SubscriptionStatus::Error(format!("http: {}", resp.status())));
            }
            Err(e) => {
                tracing::warn!("[Cable] Failed to connect (will retry): {}", e);
                status(SubscriptionStatus::Error(format!("network: {}", e)));
            }
        }

        status(SubscriptionStatus::Retrying);
        tokio::time::sleep(reconnect_delay).await;
        reconnect_delay = std::cmp::min(reconnect_delay * 2, MAX_RECONNECT_DELAY);
    }
}
