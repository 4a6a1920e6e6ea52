//! Property-based tests for frame-stack navigation

use menuflow::action_id::{ActionKind, IdClassifier};
use menuflow::frame::{ActionRow, Control, Frame};
use menuflow::menu::{ForwardOptions, MenuManager, MenuOptions};
use menuflow::render::{MemoryTransport, SendTarget};
use proptest::prelude::*;
use std::sync::Arc;

fn level_frame(depth: usize) -> Frame {
    Frame::text(format!("Level {}", depth)).with_row(ActionRow::new(vec![
        Control::button(format!("back-{}", depth), "Back"),
        Control::button(format!("open-{}", depth + 1), "Deeper"),
    ]))
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

/// Forward N times then back M times: depth is N + 1 and then never drops below the root
#[test]
fn test_stack_depth_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(0usize..12, 0usize..16), |(forwards, backs)| {
            runtime().block_on(async {
                let transport = Arc::new(MemoryTransport::new());
                let target = SendTarget::Channel {
                    channel_id: "prop".to_string(),
                };
                let mut menu =
                    MenuManager::create(transport, &target, MenuOptions::new(level_frame(0)))
                        .await
                        .unwrap();

                for depth in 1..=forwards {
                    menu.frame_forward(level_frame(depth), ForwardOptions::default())
                        .await
                        .unwrap();
                }
                assert_eq!(menu.position(), forwards + 1);

                for _ in 0..backs {
                    menu.frame_backward().await.unwrap();
                }
                assert_eq!(menu.position(), (forwards + 1).saturating_sub(backs).max(1));
                let depth = menu.position() - 1;
                assert_eq!(menu.current_frame(), &level_frame(depth));
            });
            Ok(())
        })
        .unwrap();
}

/// The classifier files every id under exactly one known kind
#[test]
fn test_classifier_never_unknown_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&"[a-z]{0,8}(-[a-z0-9]{0,6}){0,3}", |id| {
            let classifier = IdClassifier::new(["noop"]);
            let kind = classifier.classify(&id);
            prop_assert_ne!(kind, ActionKind::Unknown);
            prop_assert_ne!(kind, ActionKind::Pagination);

            let expected = if id == "noop" {
                ActionKind::Reserved
            } else if id.starts_with("back-") {
                ActionKind::Back
            } else if id.starts_with("cancel") {
                ActionKind::Cancel
            } else {
                ActionKind::Forward
            };
            prop_assert_eq!(kind, expected);
            Ok(())
        })
        .unwrap();
}

/// Ids absent from the top frame resolve to Unknown
#[test]
fn test_foreign_ids_are_unknown_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&"zz[a-z]{1,8}", |id| {
            let menu = MenuManager::new(
                Arc::new(MemoryTransport::new()),
                MenuOptions::new(level_frame(0)),
            );
            prop_assert_eq!(menu.analyze_action(&id), ActionKind::Unknown);
            Ok(())
        })
        .unwrap();
}
