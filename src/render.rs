//! Render Collaborator
//!
//! Port through which menus publish their frames: send a new message, edit it in
//! place, delete it. Deletion is idempotent at the menu level; a message that is
//! already gone counts as deleted.

use crate::error::TransportError;
use crate::frame::Frame;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub mod console;
pub mod memory;

pub use console::ConsoleTransport;
pub use memory::{MemoryTransport, TransportCall};

/// Where the first message of a menu is published
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SendTarget {
    /// Reply to the interaction that opened the menu
    Reply { interaction_id: String },
    /// Follow-up to an interaction that was already answered
    FollowUp { interaction_id: String },
    /// Plain post to a channel
    Channel { channel_id: String },
}

/// Handle to a published message
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageRef {
    pub channel_id: String,
    pub message_id: String,
}

/// Message transport
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Publish `frame` and return a handle to the new message
    async fn send(&self, target: &SendTarget, frame: &Frame) -> Result<MessageRef, TransportError>;

    /// Replace the content of a published message
    async fn edit(&self, message: &MessageRef, frame: &Frame) -> Result<(), TransportError>;

    /// Remove a published message
    async fn delete(&self, message: &MessageRef) -> Result<(), TransportError>;
}

/// Delete `message`, treating an already-deleted message as success
pub async fn delete_best_effort(
    transport: &dyn MessageTransport,
    message: &MessageRef,
) -> Result<(), TransportError> {
    match transport.delete(message).await {
        Err(err) if err.is_already_gone() => {
            debug!(message_id = %message.message_id, error = %err, "Message already deleted");
            Ok(())
        }
        other => other,
    }
}
