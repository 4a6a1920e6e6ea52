//! Property-based tests for navigation and paging invariants

mod navigation;
mod paging;
