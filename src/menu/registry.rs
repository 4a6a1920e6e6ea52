//! Pager registry: pagers addressable by caller-chosen ids.
//!
//! Entries are registered once and live as long as the menu owning the registry.

use crate::error::MenuError;
use crate::pager::Paginator;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct PagerRegistry {
    pagers: HashMap<String, Paginator>,
}

impl PagerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pager under its own id
    pub fn register(&mut self, pager: Paginator) -> Result<(), MenuError> {
        if self.pagers.contains_key(pager.id()) {
            return Err(MenuError::DuplicatePager(pager.id().to_string()));
        }
        self.pagers.insert(pager.id().to_string(), pager);
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.pagers.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Paginator> {
        self.pagers.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Paginator> {
        self.pagers.get_mut(id)
    }

    /// Look up a pager, distinguishing an empty registry from an unknown id
    pub fn get_or_error(&self, id: &str) -> Result<&Paginator, MenuError> {
        if self.pagers.is_empty() {
            return Err(MenuError::NoPagers);
        }
        self.get(id)
            .ok_or_else(|| MenuError::PagerNotFound(id.to_string()))
    }

    pub fn get_mut_or_error(&mut self, id: &str) -> Result<&mut Paginator, MenuError> {
        if self.pagers.is_empty() {
            return Err(MenuError::NoPagers);
        }
        self.pagers
            .get_mut(id)
            .ok_or_else(|| MenuError::PagerNotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.pagers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pagers.is_empty()
    }

    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.pagers.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
