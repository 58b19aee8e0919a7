//! Flashcard data model.
//!
//! A card is immutable content ([`Card`]) plus mutable learning progress
//! ([`LearningState`]). The scheduler never touches card content; editing
//! is a library operation that may reassign the id.

use serde::{Deserialize, Serialize};

/// Card content as loaded from a knowledge base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Stable unique identifier within a knowledge base. Either explicit
    /// in the file or derived from the card's content.
    pub id: String,
    pub question: String,
    pub answer: String,
}

/// Progress stage through the mastery state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningStep {
    /// Never judged since this state was created.
    #[default]
    Initial,
    /// At least one lapse; the next recall promotes, not masters.
    AfterFirstLapse,
    /// One recall after a lapse; the next recall masters.
    AfterFirstRecall,
    /// Out of active review until the next lapse.
    Mastered,
}

/// Mutable learning state attached to a card.
///
/// `wrong_count` and `correct_count` are cumulative and feed reporting
/// only; the scheduler never reads them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningState {
    /// Times this card has been judged.
    #[serde(default)]
    pub review_count: u32,
    /// Consecutive "recognized" judgments since the last lapse.
    #[serde(default)]
    pub consecutive_correct: u32,
    #[serde(default)]
    pub learning_step: LearningStep,
    #[serde(default)]
    pub mastered: bool,
    #[serde(default)]
    pub wrong_count: u32,
    #[serde(default)]
    pub correct_count: u32,
}
