//! Editor client: HTTP API access, the cable subscription and local state.

pub mod api;
pub mod cable;
pub mod command;
pub mod config;
pub mod editor;

pub use api::{ClientError, DocClient, DocumentApi};
pub use cable::{subscribe, CableEvent, CableHandle, SseDecoder, SubscriptionStatus};
pub use command::Command;
pub use config::Config;
pub use editor::{Editor, NewDocument};
