//! Menuflow: Frame-Stack Menus for Interactive Messages
//!
//! A navigation state machine for component-driven chat messages. A menu owns a
//! stack of frames bound to one anchor message; control activations are classified
//! by their custom ids and move the menu forward, back, through pages, or close it.
//! Paginators and arithmetic number blocks are built on the same id conventions.

pub mod action_id;
pub mod collector;
pub mod config;
pub mod error;
pub mod frame;
pub mod logging;
pub mod menu;
pub mod number_block;
pub mod pager;
pub mod render;
