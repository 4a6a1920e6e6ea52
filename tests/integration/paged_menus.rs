//! Integration tests for pagers grafted onto menu frames

use super::test_utils::{embed_pages, published_menu, root_frame, shop_frame};
use menuflow::action_id::ActionKind;
use menuflow::error::MenuError;
use menuflow::frame::{ActionRow, Control, Embed};
use menuflow::menu::{ActiveContext, ForwardOptions, Navigation};
use menuflow::pager::{PageContents, Paginator};

fn page_ids(view: &menuflow::frame::Frame) -> Vec<String> {
    view.control_ids().into_iter().map(str::to_string).collect()
}

#[tokio::test]
async fn test_pages_wrap_in_both_directions() {
    let (mut menu, transport) = published_menu().await;
    menu.spawn_page_container(embed_pages(3), Some("books"))
        .unwrap();
    menu.frame_forward(shop_frame(), ForwardOptions::with_pager("books"))
        .await
        .unwrap();

    let mut seen = Vec::new();
    for _ in 0..3 {
        match menu.handle_activation("next-page-books").await.unwrap() {
            Navigation::Paged { page, .. } => seen.push(page),
            other => panic!("unexpected navigation {:?}", other),
        }
    }
    assert_eq!(seen, vec![1, 2, 0]);

    assert_eq!(menu.frame_page_change("back-page-books").await.unwrap(), 2);
    assert_eq!(
        transport.last_frame().unwrap().embeds,
        vec![Embed::titled("Page 3")]
    );
    assert_eq!(menu.position(), 2);
}

#[tokio::test]
async fn test_paged_view_row_order() {
    let (mut menu, transport) = published_menu().await;
    let contents = embed_pages(2).with_components(vec![
        vec![ActionRow::new(vec![Control::button("buy-1", "Buy one")])],
        vec![ActionRow::new(vec![Control::button("buy-2", "Buy two")])],
    ]);
    menu.spawn_page_container(contents, None).unwrap();
    menu.frame_forward(shop_frame(), ForwardOptions::with_pager("0"))
        .await
        .unwrap();

    let view = transport.last_frame().unwrap();
    assert_eq!(view.content.as_deref(), Some("Shop"));
    assert_eq!(
        page_ids(&view),
        vec!["back-page-0", "next-page-0", "buy-1", "back-main", "buy-sword"]
    );
    assert_eq!(menu.context(), &ActiveContext::Paged {
        pager_id: "0".to_string()
    });
}

#[tokio::test]
async fn test_page_rows_of_every_page_are_actions() {
    let (mut menu, _transport) = published_menu().await;
    let contents = embed_pages(2).with_components(vec![
        vec![ActionRow::new(vec![Control::button("buy-1", "Buy one")])],
        vec![ActionRow::new(vec![Control::button("buy-2", "Buy two")])],
    ]);
    menu.spawn_page_container(contents, None).unwrap();
    menu.frame_forward(shop_frame(), ForwardOptions::with_pager("0"))
        .await
        .unwrap();

    assert_eq!(menu.analyze_action("buy-1"), ActionKind::Forward);
    assert_eq!(menu.analyze_action("buy-2"), ActionKind::Forward);
    assert_eq!(menu.analyze_action("next-page-0"), ActionKind::Pagination);
    assert_eq!(menu.analyze_action("back-page-0"), ActionKind::Pagination);
    assert_eq!(menu.analyze_action("back-main"), ActionKind::Back);
}

#[tokio::test]
async fn test_back_to_plain_frame_renders_plain_view() {
    let (mut menu, transport) = published_menu().await;
    menu.spawn_page_container(embed_pages(2), Some("books"))
        .unwrap();
    menu.frame_forward(shop_frame(), ForwardOptions::with_pager("books"))
        .await
        .unwrap();

    menu.frame_backward().await.unwrap();
    assert_eq!(transport.last_frame(), Some(root_frame()));
    // the overlay stays until another pager replaces it
    assert_eq!(menu.active_pager_id(), Some("books"));
    assert_eq!(menu.analyze_action("next-page-books"), ActionKind::Pagination);
}

#[tokio::test]
async fn test_back_onto_paged_frame_renders_its_page() {
    let (mut menu, transport) = published_menu().await;
    menu.spawn_page_container(embed_pages(3), Some("books"))
        .unwrap();
    menu.frame_forward(shop_frame(), ForwardOptions::with_pager("books"))
        .await
        .unwrap();
    menu.frame_page_change("next-page-books").await.unwrap();

    let detail = menuflow::frame::Frame::text("Detail").with_row(ActionRow::new(vec![
        Control::button("back-detail", "Back"),
    ]));
    menu.frame_forward(detail, ForwardOptions::default())
        .await
        .unwrap();
    assert_eq!(menu.position(), 3);

    menu.frame_backward().await.unwrap();
    let view = transport.last_frame().unwrap();
    assert_eq!(view.embeds, vec![Embed::titled("Page 2")]);
    assert_eq!(view.content.as_deref(), Some("Shop"));
}

#[tokio::test]
async fn test_turning_another_pager_replaces_the_overlay() {
    let (mut menu, _transport) = published_menu().await;
    menu.spawn_page_container(embed_pages(2), None).unwrap();
    menu.spawn_page_container(embed_pages(2), Some("books"))
        .unwrap();
    assert_eq!(menu.active_pager_id(), Some("0"));

    menu.frame_page_change("next-page-books").await.unwrap();
    assert_eq!(menu.active_pager_id(), Some("books"));
    assert_eq!(menu.analyze_action("next-page-0"), ActionKind::Unknown);
    assert_eq!(menu.pager("0").unwrap().current_page(), 0);
}

#[tokio::test]
async fn test_spawn_page_container_errors() {
    let (mut menu, _transport) = published_menu().await;
    menu.spawn_page_container(embed_pages(1), None).unwrap();
    assert!(matches!(
        menu.spawn_page_container(embed_pages(2), None),
        Err(MenuError::DuplicatePager(id)) if id == "0"
    ));
    assert!(matches!(
        menu.spawn_page_container(PageContents::from_embeds(Vec::new()), Some("empty")),
        Err(MenuError::MissingContent(_))
    ));
    assert!(matches!(
        menu.spawn_page_container(
            embed_pages(2).with_components(vec![Vec::new()]),
            Some("short")
        ),
        Err(MenuError::LengthMismatch { field: "components", expected: 2, actual: 1 })
    ));
    assert_eq!(menu.pagers().ids(), vec!["0"]);
}

#[tokio::test]
async fn test_cancel_on_custom_control_row_closes_menu() {
    let (mut menu, transport) = published_menu().await;
    let row = ActionRow::new(vec![
        Control::button("back-page-gallery", "Prev"),
        Control::button("next-page-gallery", "Next"),
        Control::button("cancel-gallery", "Close"),
    ]);
    let pager = Paginator::with_control_row("gallery", embed_pages(2), row).unwrap();
    menu.register_pager(pager).unwrap();
    menu.frame_forward(shop_frame(), ForwardOptions::with_pager("gallery"))
        .await
        .unwrap();

    assert_eq!(menu.analyze_action("next-page-gallery"), ActionKind::Pagination);
    assert_eq!(menu.analyze_action("cancel-gallery"), ActionKind::Cancel);

    let anchor = menu.anchor().cloned().unwrap();
    assert_eq!(
        menu.handle_activation("cancel-gallery").await.unwrap(),
        Navigation::Closed
    );
    assert!(!transport.is_live(&anchor));
}

#[tokio::test]
async fn test_pager_mutation_through_menu() {
    let (mut menu, _transport) = published_menu().await;
    menu.spawn_page_container(embed_pages(3), None).unwrap();
    menu.frame_page_change("next-page-0").await.unwrap();

    let pager = menu.pager_mut("0").unwrap();
    pager.load_pages(embed_pages(5)).unwrap();
    assert_eq!(pager.current_page(), 0);
    assert_eq!(pager.final_page(), 4);
}

#[tokio::test]
async fn test_refresh_with_paging_rerenders_current_page() {
    let (mut menu, transport) = published_menu().await;
    menu.spawn_page_container(embed_pages(3), Some("books"))
        .unwrap();
    menu.frame_forward(shop_frame(), ForwardOptions::with_pager("books"))
        .await
        .unwrap();
    menu.frame_page_change("next-page-books").await.unwrap();
    let edits = transport.edit_count();

    menu.frame_refresh(true).await.unwrap();
    assert_eq!(transport.edit_count(), edits + 1);
    let view = transport.last_frame().unwrap();
    assert_eq!(view.embeds, vec![Embed::titled("Page 2")]);
    assert_eq!(view.content.as_deref(), Some("Shop"));
    assert_eq!(menu.position(), 2);
}

#[tokio::test]
async fn test_restart_from_paged_frame_shows_plain_root() {
    let (mut menu, transport) = published_menu().await;
    menu.spawn_page_container(embed_pages(2), Some("books"))
        .unwrap();
    menu.frame_forward(shop_frame(), ForwardOptions::with_pager("books"))
        .await
        .unwrap();
    menu.frame_forward(
        menuflow::frame::Frame::text("Detail"),
        ForwardOptions::default(),
    )
    .await
    .unwrap();

    menu.frame_restart().await.unwrap();
    assert_eq!(menu.position(), 1);
    assert_eq!(menu.context(), &ActiveContext::Display);
    assert_eq!(transport.last_frame(), Some(root_frame()));
}

#[tokio::test]
async fn test_hyphenated_pager_id_cannot_be_registered() {
    let (mut menu, _transport) = published_menu().await;
    let err = menu
        .spawn_page_container(embed_pages(2), Some("my-books"))
        .unwrap_err();
    assert!(matches!(err, MenuError::InvalidId(ref id) if id == "my-books"));
    assert!(matches!(
        menu.frame_forward(shop_frame(), ForwardOptions::with_pager("my-books"))
            .await,
        Err(MenuError::NoPagers)
    ));
    assert_eq!(menu.position(), 1);
}
