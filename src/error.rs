//! Error types for the menu navigation system.

use thiserror::Error;

/// Errors raised by a render collaborator
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The remote message no longer exists (deleted by someone else, expired, ...)
    #[error("Message already gone: {0}")]
    AlreadyGone(String),

    #[error("Transport request failed: {0}")]
    Request(String),
}

impl TransportError {
    pub fn is_already_gone(&self) -> bool {
        matches!(self, TransportError::AlreadyGone(_))
    }
}

/// Menu, pager and configuration errors
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("Page content length mismatch: {field} has {actual} entries, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Missing page content: {0}")]
    MissingContent(String),

    #[error("Pager already registered: {0}")]
    DuplicatePager(String),

    #[error("Invalid id '{0}': ids used as a trailing segment must be non-empty and contain no '-'")]
    InvalidId(String),

    #[error("Pager not found: {0}")]
    PagerNotFound(String),

    #[error("No pagers registered")]
    NoPagers,

    #[error("Invalid page direction: {0} (must be 'next' or 'back')")]
    InvalidDirection(String),

    #[error("Menu has no anchor message")]
    NoAnchor,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Broad classification of [`MenuError`] used by callers deciding how to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad content bundles, duplicate or unknown pager ids, invalid settings
    Configuration,
    /// Unrecognised tokens in an activation id
    InvalidInput,
    /// Operation not possible in the current menu state
    State,
    /// Remote edit/delete failed
    TransientIo,
}

impl MenuError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MenuError::LengthMismatch { .. }
            | MenuError::MissingContent(_)
            | MenuError::DuplicatePager(_)
            | MenuError::PagerNotFound(_)
            | MenuError::InvalidId(_)
            | MenuError::ConfigError(_) => ErrorKind::Configuration,
            MenuError::InvalidDirection(_) => ErrorKind::InvalidInput,
            MenuError::NoPagers | MenuError::NoAnchor => ErrorKind::State,
            MenuError::Transport(_) => ErrorKind::TransientIo,
        }
    }
}

impl From<config::ConfigError> for MenuError {
    fn from(err: config::ConfigError) -> Self {
        MenuError::ConfigError(err.to_string())
    }
}
