//! Terminal transport: prints every published frame.

use crate::error::TransportError;
use crate::frame::{ButtonStyle, Control, Frame};
use crate::render::{MessageRef, MessageTransport, SendTarget};
use async_trait::async_trait;
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::io::Write;

struct ConsoleState {
    out: Box<dyn Write + Send>,
    live: HashSet<MessageRef>,
    next_message: u64,
}

/// Transport writing human-readable frames to a terminal
pub struct ConsoleTransport {
    state: Mutex<ConsoleState>,
    color: bool,
}

impl ConsoleTransport {
    pub fn stdout(color: bool) -> Self {
        Self::with_writer(Box::new(std::io::stdout()), color)
    }

    pub fn with_writer(out: Box<dyn Write + Send>, color: bool) -> Self {
        Self {
            state: Mutex::new(ConsoleState {
                out,
                live: HashSet::new(),
                next_message: 0,
            }),
            color,
        }
    }

    /// Plain-text layout of a frame
    pub fn format_frame(&self, message: &MessageRef, frame: &Frame) -> String {
        let mut lines = vec![format!("── {} ──", message.message_id)];
        if let Some(content) = &frame.content {
            lines.push(content.clone());
        }
        for embed in &frame.embeds {
            if let Some(title) = &embed.title {
                lines.push(if self.color {
                    title.bold().to_string()
                } else {
                    title.clone()
                });
            }
            if let Some(description) = &embed.description {
                lines.push(format!("  {}", description));
            }
            for field in &embed.fields {
                lines.push(format!("  {}: {}", field.name, field.value));
            }
            if let Some(footer) = &embed.footer {
                lines.push(format!("  ({})", footer));
            }
        }
        for file in &frame.files {
            lines.push(format!("[file] {}", file.name));
        }
        for row in &frame.rows {
            let cells: Vec<String> = row.controls.iter().map(|c| self.format_control(c)).collect();
            lines.push(cells.join(" "));
        }
        lines.join("\n")
    }

    fn format_control(&self, control: &Control) -> String {
        match control {
            Control::Button {
                custom_id,
                label,
                style,
                url,
                ..
            } => {
                let target = custom_id.as_deref().or(url.as_deref()).unwrap_or("");
                let cell = format!("[{} <{}>]", label, target);
                if !self.color {
                    return cell;
                }
                match style {
                    ButtonStyle::Primary => cell.blue().to_string(),
                    ButtonStyle::Secondary => cell.dimmed().to_string(),
                    ButtonStyle::Success => cell.green().to_string(),
                    ButtonStyle::Danger => cell.red().to_string(),
                    ButtonStyle::Link | ButtonStyle::Premium => cell.underline().to_string(),
                }
            }
            Control::Select {
                custom_id, options, ..
            } => {
                let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
                format!("{{select <{}>: {}}}", custom_id, values.join("|"))
            }
        }
    }

    fn write(&self, state: &mut ConsoleState, text: &str) -> Result<(), TransportError> {
        writeln!(state.out, "{}", text)
            .and_then(|_| state.out.flush())
            .map_err(|e| TransportError::Request(format!("Failed to write frame: {}", e)))
    }
}

#[async_trait]
impl MessageTransport for ConsoleTransport {
    async fn send(&self, target: &SendTarget, frame: &Frame) -> Result<MessageRef, TransportError> {
        let mut state = self.state.lock();
        state.next_message += 1;
        let channel_id = match target {
            SendTarget::Channel { channel_id } => channel_id.clone(),
            SendTarget::Reply { interaction_id } | SendTarget::FollowUp { interaction_id } => {
                interaction_id.clone()
            }
        };
        let message = MessageRef {
            channel_id,
            message_id: format!("console-{}", state.next_message),
        };
        let text = self.format_frame(&message, frame);
        self.write(&mut state, &text)?;
        state.live.insert(message.clone());
        Ok(message)
    }

    async fn edit(&self, message: &MessageRef, frame: &Frame) -> Result<(), TransportError> {
        let mut state = self.state.lock();
        if !state.live.contains(message) {
            return Err(TransportError::AlreadyGone(message.message_id.clone()));
        }
        let text = self.format_frame(message, frame);
        self.write(&mut state, &text)
    }

    async fn delete(&self, message: &MessageRef) -> Result<(), TransportError> {
        let mut state = self.state.lock();
        if !state.live.remove(message) {
            return Err(TransportError::AlreadyGone(message.message_id.clone()));
        }
        let text = format!("── {} deleted ──", message.message_id);
        self.write(&mut state, &text)
    }
}
