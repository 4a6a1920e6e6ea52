//! Stack entries and what each stack position displays.

use crate::frame::Frame;
use crate::menu::actions::FrameActions;

/// What a stack position shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveContext {
    /// The frame's own display
    Display,
    /// The frame overlaid with the current page of a registered pager
    Paged { pager_id: String },
}

impl ActiveContext {
    pub fn pager_id(&self) -> Option<&str> {
        match self {
            ActiveContext::Display => None,
            ActiveContext::Paged { pager_id } => Some(pager_id),
        }
    }
}

/// One stack position. Frame, action table and context are pushed and popped together.
#[derive(Debug, Clone)]
pub struct FrameEntry {
    pub frame: Frame,
    pub actions: FrameActions,
    pub context: ActiveContext,
}

/// Overlay a pager's page onto a frame: the frame's text, the page's embed and file,
/// then the page rows (control row first) followed by the frame's own rows.
pub fn compose_paged_view(frame: &Frame, page: Frame) -> Frame {
    let mut rows = page.rows;
    rows.extend(frame.rows.iter().cloned());
    Frame {
        content: frame.content.clone().or(page.content),
        embeds: page.embeds,
        files: page.files,
        rows,
    }
}
