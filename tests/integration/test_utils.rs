//! Shared test utilities for integration tests
//!
//! Menu fixtures published through a recording [`MemoryTransport`].

use menuflow::frame::{ActionRow, ButtonStyle, Control, Embed, Frame};
use menuflow::menu::{MenuManager, MenuOptions};
use menuflow::pager::PageContents;
use menuflow::render::{MemoryTransport, SendTarget};
use std::sync::Arc;

pub fn channel() -> SendTarget {
    SendTarget::Channel {
        channel_id: "test-channel".to_string(),
    }
}

/// Root frame: two forward buttons, a spacer that is ignored, and a close button
pub fn root_frame() -> Frame {
    Frame::text("Main").with_row(ActionRow::new(vec![
        Control::button("open-shop", "Shop"),
        Control::button("open-amount", "Amount"),
        Control::button("spacer", " "),
        Control::styled_button("cancel", "Close", ButtonStyle::Danger),
    ]))
}

/// Second-level frame with a back button
pub fn shop_frame() -> Frame {
    Frame::text("Shop").with_row(ActionRow::new(vec![
        Control::button("back-main", "Back"),
        Control::button("buy-sword", "Sword"),
    ]))
}

/// Third-level frame with both back and cancel
pub fn checkout_frame() -> Frame {
    Frame::text("Checkout").with_row(ActionRow::new(vec![
        Control::button("back-shop", "Back"),
        Control::button("pay", "Pay"),
        Control::button("cancel-checkout", "Cancel"),
    ]))
}

pub fn embed_pages(n: usize) -> PageContents {
    PageContents::from_embeds(
        (0..n)
            .map(|i| Embed::titled(format!("Page {}", i + 1)))
            .collect(),
    )
}

/// A published menu over a fresh memory transport
pub async fn published_menu() -> (MenuManager, Arc<MemoryTransport>) {
    let transport = Arc::new(MemoryTransport::new());
    let options = MenuOptions::new(root_frame()).with_ignored(["spacer"]);
    let menu = MenuManager::create(transport.clone(), &channel(), options)
        .await
        .unwrap();
    (menu, transport)
}
