//! Activation Id Protocol
//!
//! Controls are routed by their activation id: an ASCII, hyphen-delimited token
//! string such as `back-settings`, `next-page-0` or `plus-10k-amount`. This module
//! decomposes ids into segments and classifies them into navigation kinds against
//! the currently reserved id sets.
//!
//! Classification order is fixed: paging ids first, then explicitly ignored ids,
//! then the `back-` and `cancel` prefixes. Everything else is a forward action.

use crate::error::MenuError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

pub const BACK_PREFIX: &str = "back-";
pub const CANCEL_PREFIX: &str = "cancel";
pub const CONFIRM_PREFIX: &str = "confirm-";
pub const RESET_PREFIX: &str = "reset-";
pub const PAGE_TOKEN: &str = "page";

/// Navigation kind of an activation id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Belongs to the injected pager's control row
    Pagination,
    /// Explicitly ignored by the menu
    Reserved,
    Back,
    Cancel,
    Forward,
    /// Not known to the current frame
    Unknown,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Pagination => "pagination",
            ActionKind::Reserved => "reserved",
            ActionKind::Back => "back",
            ActionKind::Cancel => "cancel",
            ActionKind::Forward => "forward",
            ActionKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page turn direction carried as the leading token of paging ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageDirection {
    Next,
    Back,
}

impl PageDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            PageDirection::Next => "next",
            PageDirection::Back => "back",
        }
    }
}

impl FromStr for PageDirection {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "next" => Ok(PageDirection::Next),
            "back" => Ok(PageDirection::Back),
            other => Err(MenuError::InvalidDirection(other.to_string())),
        }
    }
}

impl fmt::Display for PageDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the id of a pager's direction button: `<next|back>-page-<pager_id>`
pub fn page_control_id(direction: PageDirection, pager_id: &str) -> String {
    format!("{}-{}-{}", direction.as_str(), PAGE_TOKEN, pager_id)
}

/// Check an id that ends up as the trailing segment of activation ids
/// (pager ids, number block control ids). It must be one non-empty segment.
pub fn validate_trailing_id(id: &str) -> Result<(), MenuError> {
    if id.is_empty() || id.contains('-') {
        return Err(MenuError::InvalidId(id.to_string()));
    }
    Ok(())
}

/// Borrowed, segment-wise view over a raw activation id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionId<'a> {
    raw: &'a str,
    segments: Vec<&'a str>,
}

impl<'a> ActionId<'a> {
    pub fn parse(raw: &'a str) -> Self {
        Self {
            raw,
            segments: raw.split('-').collect(),
        }
    }

    pub fn raw(&self) -> &'a str {
        self.raw
    }

    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }

    /// First segment: the operation or direction token
    pub fn leading(&self) -> &'a str {
        self.segments.first().copied().unwrap_or("")
    }

    /// Last segment: the association (pager id, control id, ...)
    pub fn trailing(&self) -> &'a str {
        self.segments.last().copied().unwrap_or("")
    }

    /// Middle segment of a three-part `operation-magnitude-association` id
    pub fn magnitude(&self) -> Option<&'a str> {
        if self.segments.len() == 3 {
            Some(self.segments[1])
        } else {
            None
        }
    }

    /// Split `<direction>-...-<pager_id>` into a typed page turn
    pub fn page_turn(&self) -> Result<(PageDirection, &'a str), MenuError> {
        let direction = self.leading().parse::<PageDirection>()?;
        Ok((direction, self.trailing()))
    }
}

/// Paging ids injected by the pager currently grafted onto the menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagingOverlay {
    pub pager_id: String,
    pub ids: HashSet<String>,
}

impl PagingOverlay {
    pub fn new(pager_id: impl Into<String>, ids: impl IntoIterator<Item = String>) -> Self {
        Self {
            pager_id: pager_id.into(),
            ids: ids.into_iter().collect(),
        }
    }
}

/// Classifies activation ids against the reserved id sets
#[derive(Debug, Clone, Default)]
pub struct IdClassifier {
    overlay: Option<PagingOverlay>,
    ignore: HashSet<String>,
}

impl IdClassifier {
    pub fn new<I, S>(ignore: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            overlay: None,
            ignore: ignore.into_iter().map(Into::into).collect(),
        }
    }

    /// Replace the paging overlay wholesale
    pub fn inject(&mut self, overlay: PagingOverlay) {
        self.overlay = Some(overlay);
    }

    pub fn overlay(&self) -> Option<&PagingOverlay> {
        self.overlay.as_ref()
    }

    pub fn active_pager_id(&self) -> Option<&str> {
        self.overlay.as_ref().map(|o| o.pager_id.as_str())
    }

    pub fn ignored(&self) -> &HashSet<String> {
        &self.ignore
    }

    pub fn is_pagination(&self, id: &str) -> bool {
        self.overlay
            .as_ref()
            .map(|o| o.ids.contains(id))
            .unwrap_or(false)
    }

    pub fn is_ignored(&self, id: &str) -> bool {
        self.ignore.contains(id)
    }

    pub fn is_reserved(&self, id: &str) -> bool {
        self.is_pagination(id) || self.is_ignored(id)
    }

    pub fn is_back_action(&self, id: &str) -> bool {
        !self.is_reserved(id) && id.starts_with(BACK_PREFIX)
    }

    pub fn is_cancel_action(&self, id: &str) -> bool {
        !self.is_reserved(id) && id.starts_with(CANCEL_PREFIX)
    }

    pub fn is_forward_action(&self, id: &str) -> bool {
        !self.is_back_action(id) && !self.is_cancel_action(id) && !self.is_reserved(id)
    }

    /// Classify an id into exactly one kind. Never returns [`ActionKind::Unknown`];
    /// unknown-ness depends on frame tables, which the classifier does not see.
    pub fn classify(&self, id: &str) -> ActionKind {
        if self.is_pagination(id) {
            ActionKind::Pagination
        } else if self.is_ignored(id) {
            ActionKind::Reserved
        } else if id.starts_with(BACK_PREFIX) {
            ActionKind::Back
        } else if id.starts_with(CANCEL_PREFIX) {
            ActionKind::Cancel
        } else {
            ActionKind::Forward
        }
    }
}
