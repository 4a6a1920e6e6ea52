//! Integration tests for menu navigation, paging and number blocks

mod collector_session;
mod config_integration;
mod paged_menus;
mod test_utils;
