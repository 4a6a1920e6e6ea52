//! Per-frame action tables.

use crate::action_id::{ActionKind, IdClassifier};
use crate::frame::ActionRow;
use std::collections::HashSet;

/// Ids a frame resolves to next/back/cancel. The three sets never overlap;
/// the first classification an id receives wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameActions {
    pub next: HashSet<String>,
    pub back: HashSet<String>,
    pub cancel: HashSet<String>,
}

impl FrameActions {
    pub fn from_rows<'a, I>(rows: I, classifier: &IdClassifier) -> Self
    where
        I: IntoIterator<Item = &'a ActionRow>,
    {
        let mut actions = Self::default();
        actions.extend_from_rows(rows, classifier);
        actions
    }

    /// Scan rows and file every clickable id.
    ///
    /// A row led by a select control contributes that control's id as `next`,
    /// whatever its prefix. Button ids go through the classifier; reserved ids
    /// are never recorded.
    pub fn extend_from_rows<'a, I>(&mut self, rows: I, classifier: &IdClassifier)
    where
        I: IntoIterator<Item = &'a ActionRow>,
    {
        for row in rows {
            if row.is_select_row() {
                if let Some(id) = row.controls.first().and_then(|c| c.custom_id()) {
                    self.insert(ActionKind::Forward, id);
                }
                continue;
            }
            for id in row.controls.iter().filter_map(|c| c.actionable_id()) {
                self.insert(classifier.classify(id), id);
            }
        }
    }

    fn insert(&mut self, kind: ActionKind, id: &str) {
        if self.resolve(id).is_some() {
            return;
        }
        let table = match kind {
            ActionKind::Forward => &mut self.next,
            ActionKind::Back => &mut self.back,
            ActionKind::Cancel => &mut self.cancel,
            ActionKind::Pagination | ActionKind::Reserved | ActionKind::Unknown => return,
        };
        table.insert(id.to_string());
    }

    pub fn resolve(&self, id: &str) -> Option<ActionKind> {
        if self.next.contains(id) {
            Some(ActionKind::Forward)
        } else if self.back.contains(id) {
            Some(ActionKind::Back)
        } else if self.cancel.contains(id) {
            Some(ActionKind::Cancel)
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.next.len() + self.back.len() + self.cancel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
