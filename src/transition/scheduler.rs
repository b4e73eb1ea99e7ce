//! Show/hide transition scheduling
//!
//! Timing contract:
//!
//! - **Reveal**: the item is displayed immediately in its dimmed state; one
//!   tick later ([`REVEAL_TICK`]) it transitions to rest over the family's
//!   reveal duration.
//! - **Hide**: the item transitions to its dimmed state immediately; once
//!   the family's hide duration has elapsed it stops being displayed and its
//!   transform is reset.
//!
//! Each item has at most one pending step. A new instruction for an item
//! cancels the step still pending for it, so the final state always follows
//! the last instruction.
//!
//! The scheduler keeps its own monotonic clock, advanced by the caller.

use super::types::{ItemVisual, Opacity, REVEAL_TICK, Transform, TransitionFamily};
use crate::item::ItemIndex;
use serde::Serialize;
use slotmap::{SlotMap, new_key_type};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::time::Duration;

const COMPACT_SLACK: usize = 32;

new_key_type! {
    /// Identifier of a pending transition step
    pub struct StepId;
}

/// What a step does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// Start the transition from dimmed to rest
    Settle,
    /// Stop displaying the item and reset its transform
    Conceal,
}

#[derive(Debug, Clone, Copy)]
struct PendingStep {
    item: ItemIndex,
    kind: StepKind,
    due: Duration,
}

/// Queue entry, ordered so the earliest step pops first
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    id: StepId,
    due: Duration,
    seq: u64,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap.
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A step that fired during [`TransitionScheduler::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FiredStep {
    pub item: ItemIndex,
    pub kind: StepKind,
    pub at: Duration,
}

/// Per-container transition scheduler
#[derive(Debug, Clone)]
pub struct TransitionScheduler {
    family: TransitionFamily,
    now: Duration,
    seq: u64,
    steps: SlotMap<StepId, PendingStep>,
    queue: BinaryHeap<QueueEntry>,
    pending_by_item: HashMap<ItemIndex, StepId>,
    visuals: HashMap<ItemIndex, ItemVisual>,
}

impl TransitionScheduler {
    #[must_use]
    pub fn new(family: TransitionFamily) -> Self {
        Self {
            family,
            now: Duration::ZERO,
            seq: 0,
            steps: SlotMap::with_key(),
            queue: BinaryHeap::new(),
            pending_by_item: HashMap::new(),
            visuals: HashMap::new(),
        }
    }

    #[must_use]
    pub const fn family(&self) -> TransitionFamily {
        self.family
    }

    /// Current scheduler time
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Set an item's state without any transition (initial render)
    pub fn place(&mut self, item: ItemIndex, displayed: bool) {
        self.cancel(item);
        let visual = if displayed {
            ItemVisual::resting()
        } else {
            ItemVisual::concealed()
        };
        self.visuals.insert(item, visual);
    }

    /// Begin revealing an item
    pub fn reveal(&mut self, item: ItemIndex) {
        self.cancel(item);
        self.visuals.insert(
            item,
            ItemVisual {
                displayed: true,
                opacity: Opacity::Transparent,
                transform: self.family.reveal_from(),
                transition: Some(self.family.reveal_duration()),
            },
        );
        self.schedule(item, StepKind::Settle, REVEAL_TICK);
    }

    /// Begin hiding an item
    pub fn hide(&mut self, item: ItemIndex) {
        self.cancel(item);
        let hide_duration = self.family.hide_duration();
        let displayed = self.visual(item).displayed;
        self.visuals.insert(
            item,
            ItemVisual {
                displayed,
                opacity: Opacity::Transparent,
                transform: self.family.hide_to(),
                transition: Some(hide_duration),
            },
        );
        self.schedule(item, StepKind::Conceal, hide_duration);
    }

    /// Advance the clock, firing every step that has come due
    pub fn advance(&mut self, elapsed: Duration) -> Vec<FiredStep> {
        self.now = self.now.saturating_add(elapsed);
        let mut fired = Vec::new();

        while let Some(entry) = self.queue.peek().copied() {
            if entry.due > self.now {
                break;
            }
            self.queue.pop();

            // Cancelled steps leave stale queue entries behind.
            let Some(step) = self.steps.remove(entry.id) else {
                continue;
            };
            self.pending_by_item.remove(&step.item);
            self.apply(step);
            fired.push(FiredStep {
                item: step.item,
                kind: step.kind,
                at: step.due,
            });
        }

        fired
    }

    /// Advance until nothing is pending
    pub fn flush(&mut self) -> Vec<FiredStep> {
        let mut fired = Vec::new();
        while let Some(due) = self.next_due() {
            let wait = due.saturating_sub(self.now);
            fired.extend(self.advance(wait));
        }
        fired
    }

    /// When the earliest pending step fires
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.steps.values().map(|s| s.due).min()
    }

    /// Visual state of an item (concealed if never placed)
    #[must_use]
    pub fn visual(&self, item: ItemIndex) -> ItemVisual {
        self.visuals
            .get(&item)
            .copied()
            .unwrap_or_else(ItemVisual::concealed)
    }

    #[must_use]
    pub fn is_pending(&self, item: ItemIndex) -> bool {
        self.pending_by_item.contains_key(&item)
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.steps.len()
    }

    fn schedule(&mut self, item: ItemIndex, kind: StepKind, delay: Duration) {
        let due = self.now.saturating_add(delay);
        let id = self.steps.insert(PendingStep { item, kind, due });
        self.seq += 1;
        self.queue.push(QueueEntry {
            id,
            due,
            seq: self.seq,
        });
        self.pending_by_item.insert(item, id);
        tracing::trace!(%item, ?kind, ?due, "transition step scheduled");
    }

    fn cancel(&mut self, item: ItemIndex) {
        if let Some(id) = self.pending_by_item.remove(&item)
            && let Some(step) = self.steps.remove(id)
        {
            tracing::trace!(%item, kind = ?step.kind, "pending transition step superseded");
            self.compact();
        }
    }

    /// Drop stale queue entries once they outnumber the live steps.
    /// Keeps the queue within twice the pending count plus a small slack.
    fn compact(&mut self) {
        if self.queue.len() <= 2 * self.steps.len() + COMPACT_SLACK {
            return;
        }
        let steps = &self.steps;
        self.queue.retain(|entry| steps.contains_key(entry.id));
    }

    fn apply(&mut self, step: PendingStep) {
        let visual = self.visuals.entry(step.item).or_insert_with(ItemVisual::concealed);
        match step.kind {
            StepKind::Settle => {
                visual.opacity = Opacity::Opaque;
                visual.transform = Transform::Identity;
            }
            StepKind::Conceal => {
                visual.displayed = false;
                visual.transform = Transform::Identity;
            }
        }
    }
}

impl Default for TransitionScheduler {
    fn default() -> Self {
        Self::new(TransitionFamily::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEM: ItemIndex = ItemIndex(0);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_reveal_displays_immediately_then_settles() {
        let mut scheduler = TransitionScheduler::new(TransitionFamily::Fade);
        scheduler.place(ITEM, false);
        scheduler.reveal(ITEM);

        let visual = scheduler.visual(ITEM);
        assert!(visual.displayed);
        assert_eq!(visual.opacity, Opacity::Transparent);
        assert_eq!(visual.transform, Transform::Shrunk);
        assert_eq!(visual.transition, Some(ms(400)));

        assert!(scheduler.advance(ms(9)).is_empty());
        let fired = scheduler.advance(ms(1));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].kind, StepKind::Settle);
        assert_eq!(fired[0].at, ms(10));

        let visual = scheduler.visual(ITEM);
        assert_eq!(visual.opacity, Opacity::Opaque);
        assert_eq!(visual.transform, Transform::Identity);
        assert!(!scheduler.is_pending(ITEM));
    }

    #[test]
    fn test_hide_conceals_after_duration() {
        let mut scheduler = TransitionScheduler::new(TransitionFamily::Slide);
        scheduler.place(ITEM, true);
        scheduler.hide(ITEM);

        let visual = scheduler.visual(ITEM);
        assert!(visual.displayed);
        assert_eq!(visual.opacity, Opacity::Transparent);
        assert_eq!(visual.transform, Transform::Offset(-20));

        assert!(scheduler.advance(ms(299)).is_empty());
        assert!(scheduler.visual(ITEM).displayed);

        let fired = scheduler.advance(ms(1));
        assert_eq!(fired[0].kind, StepKind::Conceal);
        let visual = scheduler.visual(ITEM);
        assert!(!visual.displayed);
        assert_eq!(visual.transform, Transform::Identity);
    }

    #[test]
    fn test_plain_hide_uses_shorter_duration() {
        let mut scheduler = TransitionScheduler::new(TransitionFamily::Plain);
        scheduler.place(ITEM, true);
        scheduler.hide(ITEM);
        assert_eq!(scheduler.visual(ITEM).transform, Transform::Identity);
        assert_eq!(scheduler.advance(ms(200)).len(), 1);
        assert!(!scheduler.visual(ITEM).displayed);
    }

    #[test]
    fn test_new_instruction_supersedes_pending_step() {
        let mut scheduler = TransitionScheduler::new(TransitionFamily::Fade);
        scheduler.place(ITEM, true);

        scheduler.hide(ITEM);
        scheduler.advance(ms(100));
        scheduler.reveal(ITEM);
        assert_eq!(scheduler.pending_count(), 1);

        let fired = scheduler.flush();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].kind, StepKind::Settle);

        // The superseded conceal never fires.
        scheduler.advance(ms(1000));
        assert!(scheduler.visual(ITEM).displayed);
        assert_eq!(scheduler.visual(ITEM).opacity, Opacity::Opaque);
    }

    #[test]
    fn test_reveal_then_hide_ends_concealed() {
        let mut scheduler = TransitionScheduler::new(TransitionFamily::Fade);
        scheduler.place(ITEM, false);
        scheduler.reveal(ITEM);
        scheduler.hide(ITEM);

        let fired = scheduler.flush();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].kind, StepKind::Conceal);
        assert!(!scheduler.visual(ITEM).displayed);
    }

    #[test]
    fn test_steps_fire_in_due_order() {
        let mut scheduler = TransitionScheduler::new(TransitionFamily::Fade);
        scheduler.place(ItemIndex(1), true);
        scheduler.hide(ItemIndex(1));
        scheduler.reveal(ItemIndex(2));

        let fired = scheduler.flush();
        let order: Vec<ItemIndex> = fired.iter().map(|f| f.item).collect();
        assert_eq!(order, vec![ItemIndex(2), ItemIndex(1)]);
        assert_eq!(scheduler.now(), ms(300));
        assert_eq!(scheduler.next_due(), None);
    }

    #[test]
    fn test_unknown_item_is_concealed() {
        let scheduler = TransitionScheduler::default();
        assert_eq!(scheduler.visual(ItemIndex(42)), ItemVisual::concealed());
    }

    #[test]
    fn test_clock_saturates_instead_of_overflowing() {
        let mut scheduler = TransitionScheduler::new(TransitionFamily::Plain);
        scheduler.place(ITEM, false);
        scheduler.reveal(ITEM);

        let fired = scheduler.advance(Duration::MAX);
        assert_eq!(fired.len(), 1);
        assert_eq!(scheduler.now(), Duration::MAX);

        scheduler.hide(ITEM);
        assert_eq!(scheduler.next_due(), Some(Duration::MAX));
        assert_eq!(scheduler.advance(ms(1)).len(), 1);
        assert!(!scheduler.visual(ITEM).displayed);
    }

    #[test]
    fn test_superseded_steps_do_not_pile_up() {
        let mut scheduler = TransitionScheduler::new(TransitionFamily::Fade);
        scheduler.place(ITEM, true);
        for _ in 0..1_000 {
            scheduler.hide(ITEM);
            scheduler.reveal(ITEM);
        }

        assert_eq!(scheduler.pending_count(), 1);
        assert!(scheduler.queue.len() <= 2 + COMPACT_SLACK);

        let fired = scheduler.flush();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].kind, StepKind::Settle);
    }
}
