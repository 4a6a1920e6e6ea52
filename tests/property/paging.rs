//! Property-based tests for page cycling and number blocks

use menuflow::action_id::PageDirection;
use menuflow::frame::Embed;
use menuflow::number_block::NumberBlock;
use menuflow::pager::{PageContents, Paginator};
use proptest::prelude::*;

/// The cursor always equals the net number of turns modulo the page count
#[test]
fn test_page_cursor_wraps_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(1usize..10, prop::collection::vec(any::<bool>(), 0..40)),
            |(pages, turns)| {
                let contents = PageContents::from_embeds(
                    (0..pages).map(|i| Embed::titled(format!("{}", i))).collect(),
                );
                let mut pager = Paginator::new("p", contents).unwrap();
                let mut net: i64 = 0;

                for next in turns {
                    let direction = if next {
                        net += 1;
                        PageDirection::Next
                    } else {
                        net -= 1;
                        PageDirection::Back
                    };
                    let view = pager.change_page(direction);
                    prop_assert!(pager.current_page() <= pager.final_page());
                    prop_assert_eq!(view.embeds.len(), 1);
                }

                let expected = net.rem_euclid(pages as i64) as usize;
                prop_assert_eq!(pager.current_page(), expected);
                Ok(())
            },
        )
        .unwrap();
}

/// Ids that look like block ids but are not on the keypad leave the total alone
#[test]
fn test_number_block_rejects_foreign_tokens_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&"(plus|minus|mult)-[0-9k]{0,4}-gold", |id| {
            let mut block = NumberBlock::new("gold").unwrap();
            block.set_total(7);
            match block.evaluate(&id) {
                Some(_) => prop_assert!(block.owns(&id)),
                None => prop_assert_eq!(block.total(), 7),
            }
            Ok(())
        })
        .unwrap();
}
