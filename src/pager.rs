//! Paginator
//!
//! Cyclic cursor over a fixed list of content pages. Each page is the entry at the
//! current index of up to three parallel sequences (embeds, files, page-specific
//! control rows). The view of a page always leads with the pager's control row.

use crate::action_id::{page_control_id, validate_trailing_id, PageDirection, CANCEL_PREFIX};
use crate::error::MenuError;
use crate::frame::{ActionRow, Attachment, ButtonStyle, Control, Embed, Frame};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Content bundle a pager is loaded from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContents {
    pub embeds: Option<Vec<Embed>>,
    pub files: Option<Vec<Attachment>>,
    /// Extra rows shown under the control row, one entry per page
    pub components: Option<Vec<Vec<ActionRow>>>,
}

impl PageContents {
    pub fn from_embeds(embeds: Vec<Embed>) -> Self {
        Self {
            embeds: Some(embeds),
            ..Self::default()
        }
    }

    pub fn from_files(files: Vec<Attachment>) -> Self {
        Self {
            files: Some(files),
            ..Self::default()
        }
    }

    pub fn with_files(mut self, files: Vec<Attachment>) -> Self {
        self.files = Some(files);
        self
    }

    pub fn with_components(mut self, components: Vec<Vec<ActionRow>>) -> Self {
        self.components = Some(components);
        self
    }

    /// Check shape and return the page count
    pub fn validate(&self) -> Result<usize, MenuError> {
        if self.embeds.is_none() && self.components.is_some() {
            return Err(MenuError::MissingContent(
                "paged components require embeds".to_string(),
            ));
        }

        let (lead_field, expected) = match (&self.embeds, &self.files) {
            (Some(embeds), _) => ("embeds", embeds.len()),
            (None, Some(files)) => ("files", files.len()),
            (None, None) => {
                return Err(MenuError::MissingContent(
                    "pages need embeds or files".to_string(),
                ))
            }
        };
        if expected == 0 {
            return Err(MenuError::MissingContent(format!("{} is empty", lead_field)));
        }

        let lengths = [
            ("files", self.files.as_ref().map(Vec::len)),
            ("components", self.components.as_ref().map(Vec::len)),
        ];
        for (field, len) in lengths {
            if let Some(actual) = len {
                if actual != expected {
                    return Err(MenuError::LengthMismatch {
                        field,
                        expected,
                        actual,
                    });
                }
            }
        }

        Ok(expected)
    }
}

/// Cyclic content browser
#[derive(Debug, Clone)]
pub struct Paginator {
    id: String,
    contents: PageContents,
    control_row: ActionRow,
    current_page: usize,
    final_page: usize,
}

impl Paginator {
    /// Create a pager with the default back/next control row
    pub fn new(id: impl Into<String>, contents: PageContents) -> Result<Self, MenuError> {
        let id = id.into();
        let control_row = Self::default_control_row(&id);
        Self::with_control_row(id, contents, control_row)
    }

    pub fn with_control_row(
        id: impl Into<String>,
        contents: PageContents,
        control_row: ActionRow,
    ) -> Result<Self, MenuError> {
        let id = id.into();
        validate_trailing_id(&id)?;
        let count = contents.validate()?;
        Ok(Self {
            id,
            contents,
            control_row,
            current_page: 0,
            final_page: count - 1,
        })
    }

    /// Two-button row: `back-page-<id>` then `next-page-<id>`
    pub fn default_control_row(pager_id: &str) -> ActionRow {
        ActionRow::new(vec![
            Control::styled_button(
                page_control_id(PageDirection::Back, pager_id),
                "◀",
                ButtonStyle::Secondary,
            ),
            Control::styled_button(
                page_control_id(PageDirection::Next, pager_id),
                "▶",
                ButtonStyle::Secondary,
            ),
        ])
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Last valid zero-based page index
    pub fn final_page(&self) -> usize {
        self.final_page
    }

    pub fn page_count(&self) -> usize {
        self.final_page + 1
    }

    pub fn control_row(&self) -> &ActionRow {
        &self.control_row
    }

    /// Replace the content; the cursor returns to the first page.
    /// On error the pager is left untouched.
    pub fn load_pages(&mut self, contents: PageContents) -> Result<(), MenuError> {
        let count = contents.validate()?;
        self.contents = contents;
        self.current_page = 0;
        self.final_page = count - 1;
        debug!(pager_id = %self.id, pages = count, "Loaded pages");
        Ok(())
    }

    /// Move one page, wrapping at both ends, and return the new page view
    pub fn change_page(&mut self, direction: PageDirection) -> Frame {
        self.current_page = match direction {
            PageDirection::Next if self.current_page >= self.final_page => 0,
            PageDirection::Next => self.current_page + 1,
            PageDirection::Back if self.current_page == 0 => self.final_page,
            PageDirection::Back => self.current_page - 1,
        };
        debug!(
            pager_id = %self.id,
            direction = %direction,
            page = self.current_page,
            "Changed page"
        );
        self.page()
    }

    /// View of the current page: its embed and file plus `[control row, ...page rows]`
    pub fn page(&self) -> Frame {
        let index = self.current_page;
        let mut frame = Frame::new().with_row(self.control_row.clone());
        if let Some(embed) = self.contents.embeds.as_ref().and_then(|e| e.get(index)) {
            frame.embeds.push(embed.clone());
        }
        if let Some(file) = self.contents.files.as_ref().and_then(|f| f.get(index)) {
            frame.files.push(file.clone());
        }
        if let Some(rows) = self.contents.components.as_ref().and_then(|c| c.get(index)) {
            frame.rows.extend(rows.iter().cloned());
        }
        frame
    }

    /// Clickable control-row ids that act as paging ids.
    /// Cancel buttons placed on the control row stay ordinary cancel actions.
    pub fn base_row_ids(&self) -> Vec<String> {
        self.control_row
            .controls
            .iter()
            .filter_map(Control::actionable_id)
            .filter(|id| !id.starts_with(CANCEL_PREFIX))
            .map(str::to_string)
            .collect()
    }

    /// Page-specific rows across every page
    pub fn page_rows(&self) -> impl Iterator<Item = &ActionRow> {
        self.contents
            .components
            .iter()
            .flat_map(|pages| pages.iter())
            .flat_map(|rows| rows.iter())
    }
}
