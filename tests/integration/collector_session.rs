//! Integration tests driving menus from activation collectors

use super::test_utils::{published_menu, shop_frame};
use menuflow::collector::{self, Activation, CollectorEnd, CollectorOptions};
use menuflow::menu::{ForwardOptions, Navigation};
use std::time::Duration;

#[tokio::test]
async fn test_session_until_cancel() {
    let (mut menu, transport) = published_menu().await;
    let (sender, mut collector) = collector::channel("alice", CollectorOptions::default());
    menu.attach_collector(collector.handle());
    let anchor = menu.anchor().cloned().unwrap();

    for (user, id) in [
        ("alice", "open-shop"),
        ("mallory", "cancel"),
        ("alice", "back-main"),
        ("alice", "cancel"),
    ] {
        sender.send(Activation::new(id, user));
    }

    let mut log = Vec::new();
    loop {
        let activation = match collector.next().await {
            Ok(activation) => activation,
            Err(end) => {
                log.push(format!("end:{:?}", end));
                break;
            }
        };
        match menu.handle_activation(&activation.custom_id).await.unwrap() {
            Navigation::Forward(id) if id == "open-shop" => {
                menu.frame_forward(shop_frame(), ForwardOptions::default())
                    .await
                    .unwrap();
                log.push("forward".to_string());
            }
            Navigation::Back { position } => log.push(format!("back:{}", position)),
            Navigation::Closed => log.push("closed".to_string()),
            other => log.push(format!("{:?}", other)),
        }
    }

    assert_eq!(log, vec!["forward", "back:1", "closed", "end:Stopped"]);
    assert!(menu.is_destroyed());
    assert_eq!(collector.ended(), Some(CollectorEnd::Stopped));
    assert!(!transport.is_live(&anchor));
}

#[tokio::test(start_paused = true)]
async fn test_session_times_out() {
    let (mut menu, _transport) = published_menu().await;
    let (_sender, mut collector) =
        collector::channel("alice", CollectorOptions::new(Duration::from_secs(30)));
    menu.attach_collector(collector.handle());

    assert_eq!(collector.next().await.unwrap_err(), CollectorEnd::Timeout);
    menu.destroy().await.unwrap();
    assert!(menu.is_destroyed());
}

#[tokio::test]
async fn test_open_filter_accepts_everyone() {
    let options = CollectorOptions::default().with_filter(|_| true);
    let (sender, mut collector) = collector::channel("alice", options);
    sender.send(Activation::new("open-shop", "bob"));
    drop(sender);

    assert_eq!(collector.next().await.unwrap().user_id, "bob");
    assert_eq!(collector.next().await.unwrap_err(), CollectorEnd::Closed);
}
