//! Review scheduler: decides where each card goes after a judgment and
//! when it counts as mastered.
//!
//! The scheduler owns two structures on purpose (they are not merged):
//! a queue of card ids (front = next to present) and a map from id to
//! card plus learning state. Requeue-by-splice needs the ordered queue;
//! O(1) lookup needs the map.
//!
//! ## State Transitions
//!
//! ```text
//! Initial --(recognized on first review)--> Mastered
//! Initial --(forgotten)--> AfterFirstLapse
//! AfterFirstLapse --(recognized)--> AfterFirstRecall   [requeued 15-20 back]
//! AfterFirstLapse --(forgotten)--> AfterFirstLapse     [requeued 8-12 back]
//! AfterFirstRecall --(recognized)--> Mastered
//! AfterFirstRecall --(forgotten)--> AfterFirstLapse    [requeued 8-12 back]
//! Mastered --(forgotten)--> AfterFirstLapse            [requeued 8-12 back]
//! ```
//!
//! Mastered cards leave the queue. They can only come back through a
//! restored snapshot whose queue still lists them; that order is trusted
//! verbatim, and a forgotten judgment then reopens the cycle.

pub mod rng;

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::card::{Card, LearningState, LearningStep};
use crate::storage::progress::Snapshot;
use rng::RandomSource;

/// Requeue offset after a forgotten card: uniform in [8, 12].
const SHORT_INTERVAL_MIN: usize = 8;
const SHORT_INTERVAL_SPAN: usize = 5;

/// Requeue offset after the first recall following a lapse: uniform in [15, 20].
const LONG_INTERVAL_MIN: usize = 15;
const LONG_INTERVAL_SPAN: usize = 6;

/// Learner verdict on the card just presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Judgment {
    Recognized,
    Forgotten,
}

/// One card under review: immutable content plus mutable learning state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewItem {
    pub card: Card,
    pub state: LearningState,
}

/// The review state machine.
///
/// Strictly synchronous: each judgment is handled to completion before
/// the next one can be applied. The queue and item map are exclusively
/// owned; persistence is the host's job (see [`Snapshot`]).
pub struct Scheduler {
    items: HashMap<String, ReviewItem>,
    queue: VecDeque<String>,
    rng: Box<dyn RandomSource>,
}

impl Scheduler {
    /// Build a scheduler from freshly loaded cards, optionally carrying
    /// over state from a restored snapshot.
    ///
    /// Restored per-card state is matched by id; cards without saved
    /// state start at zero. A restored queue order is filtered to ids
    /// that are still present and then trusted verbatim when non-empty
    /// (it may list already-mastered cards). Without a usable restored
    /// order, the queue is a uniform Fisher-Yates permutation of all ids.
    pub fn new(cards: Vec<Card>, restored: Option<Snapshot>, mut rng: Box<dyn RandomSource>) -> Self {
        let restored = restored.unwrap_or_default();

        let mut items = HashMap::with_capacity(cards.len());
        let mut order: Vec<String> = Vec::with_capacity(cards.len());
        for card in cards {
            let state = restored.items.get(&card.id).cloned().unwrap_or_default();
            order.push(card.id.clone());
            items.insert(card.id.clone(), ReviewItem { card, state });
        }

        let saved_order: Vec<String> = restored
            .queue_order
            .into_iter()
            .filter(|id| items.contains_key(id))
            .collect();

        let queue: VecDeque<String> = if !saved_order.is_empty() {
            saved_order.into()
        } else {
            rng::shuffle(&mut order, rng.as_mut());
            order.into()
        };

        Self { items, queue, rng }
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Number of loaded cards.
    pub fn total(&self) -> usize {
        self.items.len()
    }

    /// Number of cards currently marked mastered. Derived from the item
    /// map on demand rather than kept as a running counter.
    pub fn mastered(&self) -> usize {
        self.items.values().filter(|item| item.state.mastered).count()
    }

    /// Number of queued ids still pending review.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn get(&self, id: &str) -> Option<&ReviewItem> {
        self.items.get(id)
    }

    pub fn items(&self) -> impl Iterator<Item = &ReviewItem> {
        self.items.values()
    }

    /// Pending review order, front first.
    pub fn queue(&self) -> impl Iterator<Item = &str> {
        self.queue.iter().map(String::as_str)
    }

    // ── Operations ───────────────────────────────────────────────────

    /// The next card to present, or `None` when the session is complete.
    ///
    /// Queue ids with no backing item are dropped on the way (the queue
    /// and map can only desync through a tampered snapshot, but a
    /// dangling id must not wedge the session).
    pub fn current(&mut self) -> Option<&ReviewItem> {
        loop {
            let Some(front) = self.queue.front() else {
                return None;
            };
            if self.items.contains_key(front) {
                break;
            }
            if let Some(stale) = self.queue.pop_front() {
                log::warn!("queue references unknown card id '{stale}', dropping it");
            }
        }
        self.queue.front().and_then(|id| self.items.get(id))
    }

    /// Apply a judgment to the card at the front of the queue.
    ///
    /// With an empty queue this is a no-op; callers are expected to check
    /// [`Scheduler::current`] first.
    pub fn apply(&mut self, judgment: Judgment) {
        // Re-validate the front so a dangling id is never judged.
        if self.current().is_none() {
            return;
        }
        let Some(id) = self.queue.pop_front() else {
            return;
        };
        let Some(item) = self.items.get_mut(&id) else {
            return;
        };

        let state = &mut item.state;
        state.review_count += 1;

        let requeue_at = match judgment {
            Judgment::Recognized => {
                state.correct_count += 1;
                state.consecutive_correct += 1;

                if state.review_count == 1 {
                    // Recognized on first sight: mastered outright.
                    state.mastered = true;
                    state.learning_step = LearningStep::Mastered;
                    None
                } else if state.learning_step == LearningStep::AfterFirstLapse {
                    // First recall after a lapse: promote and push back far.
                    state.learning_step = LearningStep::AfterFirstRecall;
                    Some(LONG_INTERVAL_MIN + self.rng.next_below(LONG_INTERVAL_SPAN))
                } else if state.learning_step == LearningStep::AfterFirstRecall {
                    // Second recall in a row: mastered.
                    state.mastered = true;
                    state.learning_step = LearningStep::Mastered;
                    None
                } else {
                    // Counters above already advanced; no transition.
                    log::warn!(
                        "unexpected state for '{id}': review_count={}, step={:?}",
                        state.review_count,
                        state.learning_step
                    );
                    None
                }
            }
            Judgment::Forgotten => {
                // A lapse resets the cycle regardless of the prior step.
                state.wrong_count += 1;
                state.consecutive_correct = 0;
                state.mastered = false;
                state.learning_step = LearningStep::AfterFirstLapse;
                Some(SHORT_INTERVAL_MIN + self.rng.next_below(SHORT_INTERVAL_SPAN))
            }
        };

        if let Some(offset) = requeue_at {
            // Clamp against the queue as it stands after the front removal.
            let at = offset.min(self.queue.len());
            self.queue.insert(at, id);
        }
    }

    /// Rekey an item after an external edit reassigned its id.
    ///
    /// The map entry moves to the new id and any queue occurrence is
    /// rewritten in place; position and all counters are preserved.
    /// Returns false when `old_id` is unknown.
    pub fn rename(&mut self, old_id: &str, card: Card) -> bool {
        let Some(mut item) = self.items.remove(old_id) else {
            return false;
        };
        let new_id = card.id.clone();
        item.card = card;
        self.items.insert(new_id.clone(), item);
        for slot in self.queue.iter_mut() {
            if slot == old_id {
                *slot = new_id.clone();
            }
        }
        true
    }

    /// Serializable view of the learning state and queue order, for the
    /// progress store.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            items: self
                .items
                .iter()
                .map(|(id, item)| (id.clone(), item.state.clone()))
                .collect(),
            queue_order: self.queue.iter().cloned().collect(),
        }
    }

    #[cfg(test)]
    fn push_front_raw(&mut self, id: &str) {
        self.queue.push_front(id.to_string());
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::rng::{PcgSource, ScriptedSource};
    use super::*;

    fn make_cards(ids: &[&str]) -> Vec<Card> {
        ids.iter()
            .map(|id| Card {
                id: id.to_string(),
                question: format!("Q {id}"),
                answer: format!("A {id}"),
            })
            .collect()
    }

    fn make_cards_n(n: usize) -> Vec<Card> {
        let ids: Vec<String> = (0..n).map(|i| format!("card-{i:03}")).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        make_cards(&refs)
    }

    /// Snapshot that pins the queue order without any saved state.
    fn pinned_order(ids: &[&str]) -> Snapshot {
        Snapshot {
            items: HashMap::new(),
            queue_order: ids.iter().map(|id| id.to_string()).collect(),
        }
    }

    fn scripted(values: &[usize]) -> Box<dyn RandomSource> {
        Box::new(ScriptedSource::new(values))
    }

    fn queue_of(scheduler: &Scheduler) -> Vec<String> {
        scheduler.queue().map(str::to_string).collect()
    }

    #[test]
    fn first_try_recognition_masters_immediately() {
        let cards = make_cards(&["a", "b", "c"]);
        let mut scheduler =
            Scheduler::new(cards, Some(pinned_order(&["a", "b", "c"])), scripted(&[]));

        assert_eq!(scheduler.current().map(|i| i.card.id.clone()).as_deref(), Some("a"));
        scheduler.apply(Judgment::Recognized);

        let a = scheduler.get("a").expect("a exists");
        assert!(a.state.mastered);
        assert_eq!(a.state.learning_step, LearningStep::Mastered);
        assert_eq!(a.state.review_count, 1);
        assert_eq!(a.state.correct_count, 1);
        assert_eq!(a.state.consecutive_correct, 1);
        assert_eq!(scheduler.mastered(), 1);
        assert_eq!(queue_of(&scheduler), vec!["b", "c"]);
    }

    #[test]
    fn forgotten_requeues_between_8_and_12() {
        for draw in 0..5 {
            let cards = make_cards_n(30);
            let order: Vec<String> = cards.iter().map(|c| c.id.clone()).collect();
            let refs: Vec<&str> = order.iter().map(String::as_str).collect();
            let mut scheduler =
                Scheduler::new(cards, Some(pinned_order(&refs)), scripted(&[draw]));

            scheduler.apply(Judgment::Forgotten);
            let position = scheduler
                .queue()
                .position(|id| id == "card-000")
                .expect("card still queued");
            assert_eq!(position, 8 + draw);
            assert_eq!(scheduler.pending(), 30);
        }
    }

    #[test]
    fn recall_after_lapse_requeues_between_15_and_20() {
        for draw in 0..6 {
            let cards = make_cards_n(30);
            let order: Vec<String> = cards.iter().map(|c| c.id.clone()).collect();
            let refs: Vec<&str> = order.iter().map(String::as_str).collect();
            let mut snapshot = pinned_order(&refs);
            snapshot.items.insert(
                "card-000".to_string(),
                LearningState {
                    review_count: 1,
                    learning_step: LearningStep::AfterFirstLapse,
                    wrong_count: 1,
                    ..LearningState::default()
                },
            );
            let mut scheduler = Scheduler::new(cards, Some(snapshot), scripted(&[draw]));

            scheduler.apply(Judgment::Recognized);
            let card = scheduler.get("card-000").expect("card exists");
            assert_eq!(card.state.learning_step, LearningStep::AfterFirstRecall);
            assert!(!card.state.mastered);
            let position = scheduler
                .queue()
                .position(|id| id == "card-000")
                .expect("card still queued");
            assert_eq!(position, 15 + draw);
        }
    }

    #[test]
    fn single_card_clamps_requeue_to_queue_length() {
        // One card: forgotten, recalled, recalled again.
        let cards = make_cards(&["x"]);
        let mut scheduler = Scheduler::new(cards, Some(pinned_order(&["x"])), scripted(&[4, 5]));

        scheduler.apply(Judgment::Forgotten);
        assert_eq!(queue_of(&scheduler), vec!["x"]); // clamped to index 0
        let x = scheduler.get("x").expect("x exists");
        assert_eq!(x.state.learning_step, LearningStep::AfterFirstLapse);
        assert_eq!(x.state.wrong_count, 1);

        scheduler.apply(Judgment::Recognized);
        assert_eq!(queue_of(&scheduler), vec!["x"]); // clamped again
        let x = scheduler.get("x").expect("x exists");
        assert_eq!(x.state.learning_step, LearningStep::AfterFirstRecall);

        scheduler.apply(Judgment::Recognized);
        assert!(queue_of(&scheduler).is_empty());
        let x = scheduler.get("x").expect("x exists");
        assert!(x.state.mastered);
        assert_eq!(x.state.review_count, 3);
        assert_eq!(x.state.correct_count, 2);
        assert_eq!(x.state.wrong_count, 1);
        assert_eq!(scheduler.mastered(), 1);
    }

    #[test]
    fn forgotten_resets_from_every_step() {
        let steps = [
            LearningStep::Initial,
            LearningStep::AfterFirstLapse,
            LearningStep::AfterFirstRecall,
            LearningStep::Mastered,
        ];
        for step in steps {
            let cards = make_cards_n(20);
            let order: Vec<String> = cards.iter().map(|c| c.id.clone()).collect();
            let refs: Vec<&str> = order.iter().map(String::as_str).collect();
            let mut snapshot = pinned_order(&refs);
            snapshot.items.insert(
                "card-000".to_string(),
                LearningState {
                    review_count: 2,
                    consecutive_correct: 2,
                    learning_step: step,
                    mastered: step == LearningStep::Mastered,
                    ..LearningState::default()
                },
            );
            let mut scheduler = Scheduler::new(cards, Some(snapshot), scripted(&[0]));

            scheduler.apply(Judgment::Forgotten);
            let card = scheduler.get("card-000").expect("card exists");
            assert_eq!(card.state.learning_step, LearningStep::AfterFirstLapse);
            assert!(!card.state.mastered);
            assert_eq!(card.state.consecutive_correct, 0);
            assert!(scheduler.queue().any(|id| id == "card-000"));
        }
    }

    #[test]
    fn queue_length_is_conserved_except_on_mastery() {
        let cards = make_cards_n(25);
        let mut scheduler = Scheduler::new(cards, None, Box::new(PcgSource::seeded(11)));

        let mut seen: HashSet<String> = HashSet::new();
        let mut step = 0usize;
        loop {
            let Some(item) = scheduler.current() else { break };
            let id = item.card.id.clone();
            let was_mastered = item.state.mastered;
            let before = scheduler.pending();

            // Forget each card on first sight, recognize it afterwards;
            // every card walks the full lapse-recall-mastery path.
            let judgment = if seen.insert(id.clone()) {
                Judgment::Forgotten
            } else {
                Judgment::Recognized
            };
            scheduler.apply(judgment);
            step += 1;

            let after = scheduler.pending();
            let now_mastered = scheduler.get(&id).map(|i| i.state.mastered).unwrap_or(false);
            if now_mastered && !was_mastered {
                assert_eq!(after, before - 1, "mastery removes exactly one entry");
            } else {
                assert_eq!(after, before, "non-mastering judgment conserves the queue");
            }

            assert!(step < 10_000, "session did not converge");
        }
        assert_eq!(scheduler.mastered(), 25);
    }

    #[test]
    fn initial_shuffle_reaches_every_front_position() {
        let mut seen = HashSet::new();
        for seed in 0..200 {
            let mut scheduler =
                Scheduler::new(make_cards_n(5), None, Box::new(PcgSource::seeded(seed)));
            if let Some(item) = scheduler.current() {
                seen.insert(item.card.id.clone());
            }
        }
        assert_eq!(seen.len(), 5, "every card should lead the queue for some seed");
    }

    #[test]
    fn restore_drops_ids_missing_from_the_loaded_set() {
        let cards = make_cards(&["a", "b"]);
        let snapshot = pinned_order(&["ghost", "b", "a"]);
        let scheduler = Scheduler::new(cards, Some(snapshot), scripted(&[]));
        assert_eq!(queue_of(&scheduler), vec!["b", "a"]);
    }

    #[test]
    fn restored_queue_is_trusted_even_with_mastered_cards() {
        let cards = make_cards(&["a", "b"]);
        let mut snapshot = pinned_order(&["a", "b"]);
        snapshot.items.insert(
            "a".to_string(),
            LearningState {
                review_count: 1,
                correct_count: 1,
                consecutive_correct: 1,
                learning_step: LearningStep::Mastered,
                mastered: true,
                ..LearningState::default()
            },
        );
        let mut scheduler = Scheduler::new(cards, Some(snapshot), scripted(&[0]));

        // The mastered card is re-presented as saved.
        assert_eq!(scheduler.current().map(|i| i.card.id.clone()).as_deref(), Some("a"));

        // A lapse reopens its cycle.
        scheduler.apply(Judgment::Forgotten);
        let a = scheduler.get("a").expect("a exists");
        assert!(!a.state.mastered);
        assert_eq!(a.state.learning_step, LearningStep::AfterFirstLapse);
        assert_eq!(scheduler.mastered(), 0);
    }

    #[test]
    fn restore_with_fully_stale_queue_falls_back_to_shuffle() {
        let cards = make_cards(&["a", "b", "c"]);
        let snapshot = pinned_order(&["ghost-1", "ghost-2"]);
        let scheduler = Scheduler::new(cards, Some(snapshot), scripted(&[]));

        let mut queued = queue_of(&scheduler);
        queued.sort();
        assert_eq!(queued, vec!["a", "b", "c"]);
    }

    #[test]
    fn recognized_in_unexpected_state_updates_counters_only() {
        let cards = make_cards(&["a", "b"]);
        let mut snapshot = pinned_order(&["a", "b"]);
        snapshot.items.insert(
            "a".to_string(),
            LearningState {
                review_count: 3,
                correct_count: 1,
                learning_step: LearningStep::Mastered,
                mastered: true,
                ..LearningState::default()
            },
        );
        let mut scheduler = Scheduler::new(cards, Some(snapshot), scripted(&[]));

        scheduler.apply(Judgment::Recognized);
        let a = scheduler.get("a").expect("a exists");
        assert_eq!(a.state.learning_step, LearningStep::Mastered);
        assert_eq!(a.state.review_count, 4);
        assert_eq!(a.state.correct_count, 2);
        assert!(!scheduler.queue().any(|id| id == "a"));
    }

    #[test]
    fn current_self_heals_dangling_queue_ids() {
        let cards = make_cards(&["a"]);
        let mut scheduler = Scheduler::new(cards, Some(pinned_order(&["a"])), scripted(&[]));
        scheduler.push_front_raw("dangling");

        assert_eq!(scheduler.current().map(|i| i.card.id.clone()).as_deref(), Some("a"));
        assert_eq!(queue_of(&scheduler), vec!["a"]);
    }

    #[test]
    fn apply_on_empty_queue_is_a_noop() {
        let mut scheduler = Scheduler::new(Vec::new(), None, scripted(&[]));
        scheduler.apply(Judgment::Recognized);
        scheduler.apply(Judgment::Forgotten);
        assert_eq!(scheduler.total(), 0);
        assert!(scheduler.current().is_none());
    }

    #[test]
    fn rename_rekeys_map_and_queue_in_place() {
        let cards = make_cards(&["1", "5", "9"]);
        let mut snapshot = pinned_order(&["1", "5", "9"]);
        snapshot.items.insert(
            "5".to_string(),
            LearningState {
                review_count: 2,
                wrong_count: 1,
                correct_count: 1,
                learning_step: LearningStep::AfterFirstRecall,
                ..LearningState::default()
            },
        );
        let mut scheduler = Scheduler::new(cards, Some(snapshot), scripted(&[]));

        let renamed = scheduler.rename(
            "5",
            Card {
                id: "5-v2".to_string(),
                question: "new question".to_string(),
                answer: "new answer".to_string(),
            },
        );
        assert!(renamed);
        assert!(scheduler.get("5").is_none());

        let item = scheduler.get("5-v2").expect("rekeyed item exists");
        assert_eq!(item.card.question, "new question");
        assert_eq!(item.state.review_count, 2);
        assert_eq!(item.state.learning_step, LearningStep::AfterFirstRecall);
        assert_eq!(queue_of(&scheduler), vec!["1", "5-v2", "9"]);

        assert!(!scheduler.rename("missing", make_cards(&["z"]).remove(0)));
    }

    #[test]
    fn snapshot_round_trips_state_and_order() {
        let cards = make_cards(&["a", "b", "c"]);
        let mut scheduler =
            Scheduler::new(cards.clone(), Some(pinned_order(&["a", "b", "c"])), scripted(&[0]));
        scheduler.apply(Judgment::Forgotten);

        let snapshot = scheduler.snapshot();
        let mut restored = Scheduler::new(cards, Some(snapshot), scripted(&[]));

        assert_eq!(queue_of(&restored), queue_of(&scheduler));
        assert_eq!(
            restored.get("a").map(|i| i.state.clone()),
            scheduler.get("a").map(|i| i.state.clone())
        );
        assert_eq!(restored.current().map(|i| i.card.id.clone()).as_deref(), Some("b"));
    }

    mod props {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn shuffled_queue_is_a_permutation(n in 1usize..60, seed in any::<u64>()) {
                let cards = make_cards_n(n);
                let mut expected: Vec<String> = cards.iter().map(|c| c.id.clone()).collect();
                let scheduler = Scheduler::new(cards, None, Box::new(PcgSource::seeded(seed)));

                let mut queued: Vec<String> = scheduler.queue().map(str::to_string).collect();
                queued.sort();
                expected.sort();
                prop_assert_eq!(queued, expected);
            }
        }
    }
}
