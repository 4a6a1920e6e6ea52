//! In-memory transport that records every call.

use crate::error::TransportError;
use crate::frame::Frame;
use crate::render::{MessageRef, MessageTransport, SendTarget};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;

/// A recorded transport call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCall {
    Send {
        target: SendTarget,
        frame: Frame,
        message: MessageRef,
    },
    Edit {
        message: MessageRef,
        frame: Frame,
    },
    Delete {
        message: MessageRef,
    },
}

#[derive(Debug, Default)]
struct MemoryState {
    calls: Vec<TransportCall>,
    live: HashSet<MessageRef>,
    next_message: u64,
    fail_edit: Option<TransportError>,
    fail_delete: Option<TransportError>,
}

/// Transport keeping messages in memory
#[derive(Debug, Default)]
pub struct MemoryTransport {
    state: Mutex<MemoryState>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<TransportCall> {
        self.state.lock().calls.clone()
    }

    /// Frame of the most recent send or edit
    pub fn last_frame(&self) -> Option<Frame> {
        self.state
            .lock()
            .calls
            .iter()
            .rev()
            .find_map(|call| match call {
                TransportCall::Send { frame, .. } | TransportCall::Edit { frame, .. } => {
                    Some(frame.clone())
                }
                TransportCall::Delete { .. } => None,
            })
    }

    pub fn edit_count(&self) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|call| matches!(call, TransportCall::Edit { .. }))
            .count()
    }

    pub fn is_live(&self, message: &MessageRef) -> bool {
        self.state.lock().live.contains(message)
    }

    pub fn fail_next_edit(&self, err: TransportError) {
        self.state.lock().fail_edit = Some(err);
    }

    pub fn fail_next_delete(&self, err: TransportError) {
        self.state.lock().fail_delete = Some(err);
    }
}

#[async_trait]
impl MessageTransport for MemoryTransport {
    async fn send(&self, target: &SendTarget, frame: &Frame) -> Result<MessageRef, TransportError> {
        let mut state = self.state.lock();
        state.next_message += 1;
        let channel_id = match target {
            SendTarget::Channel { channel_id } => channel_id.clone(),
            SendTarget::Reply { interaction_id } | SendTarget::FollowUp { interaction_id } => {
                format!("interaction-{}", interaction_id)
            }
        };
        let message = MessageRef {
            channel_id,
            message_id: format!("msg-{}", state.next_message),
        };
        state.live.insert(message.clone());
        state.calls.push(TransportCall::Send {
            target: target.clone(),
            frame: frame.clone(),
            message: message.clone(),
        });
        Ok(message)
    }

    async fn edit(&self, message: &MessageRef, frame: &Frame) -> Result<(), TransportError> {
        let mut state = self.state.lock();
        if let Some(err) = state.fail_edit.take() {
            return Err(err);
        }
        if !state.live.contains(message) {
            return Err(TransportError::AlreadyGone(message.message_id.clone()));
        }
        state.calls.push(TransportCall::Edit {
            message: message.clone(),
            frame: frame.clone(),
        });
        Ok(())
    }

    async fn delete(&self, message: &MessageRef) -> Result<(), TransportError> {
        let mut state = self.state.lock();
        if let Some(err) = state.fail_delete.take() {
            return Err(err);
        }
        if !state.live.remove(message) {
            return Err(TransportError::AlreadyGone(message.message_id.clone()));
        }
        state.calls.push(TransportCall::Delete {
            message: message.clone(),
        });
        Ok(())
    }
}
