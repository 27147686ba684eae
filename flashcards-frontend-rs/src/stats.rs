use std::rc::Rc;

use indexmap::IndexSet;
use stash::KeyValueStore;
use vocab_utils::CardId;

#[derive(
    Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize, tsify::Tsify,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct StudyStats {
    /// Cards the user has looked at or been quizzed on, in the order first seen
    #[serde(rename = "studiedCardIds")]
    #[tsify(type = "number[]")]
    pub studied_ids: IndexSet<CardId>,
    pub total_quiz_attempts: u64,
    pub correct_quiz_answers: u64,
    pub incorrect_quiz_answers: u64,
}

impl StudyStats {
    /// Returns true if the card was not studied before.
    pub fn record_study(&mut self, card_id: CardId) -> bool {
        self.studied_ids.insert(card_id)
    }

    pub fn record_quiz_result(&mut self, card_id: CardId, is_correct: bool) {
        self.studied_ids.insert(card_id);
        // stored counters come from outside and may already sit at the top of the range
        self.total_quiz_attempts = self.total_quiz_attempts.saturating_add(1);
        if is_correct {
            self.correct_quiz_answers = self.correct_quiz_answers.saturating_add(1);
        } else {
            self.incorrect_quiz_answers = self.incorrect_quiz_answers.saturating_add(1);
        }
    }

    /// Percentage of correct quiz answers, rounded to the nearest integer. 0 before any attempt.
    pub fn correct_rate(&self) -> u32 {
        if self.total_quiz_attempts == 0 {
            return 0;
        }
        (self.correct_quiz_answers as f64 / self.total_quiz_attempts as f64 * 100.0).round() as u32
    }

    pub fn studied_count(&self) -> usize {
        self.studied_ids.len()
    }

    /// Whether the answer counters add up to the attempt counter
    pub fn is_consistent(&self) -> bool {
        self.correct_quiz_answers
            .checked_add(self.incorrect_quiz_answers)
            .is_some_and(|answered| answered == self.total_quiz_attempts)
    }
}

pub struct StatsManager {
    stats: StudyStats,
    store: Rc<dyn KeyValueStore>,
    key: String,
}

impl StatsManager {
    pub fn load(store: Rc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let stats: StudyStats = stash::load(store.as_ref(), &key, StudyStats::default());
        log::info!(
            "Loaded study stats: {} cards studied, {} quiz attempts",
            stats.studied_count(),
            stats.total_quiz_attempts
        );
        let manager = Self { stats, store, key };
        manager.persist();
        manager
    }

    pub fn snapshot(&self) -> &StudyStats {
        &self.stats
    }

    pub fn record_study(&mut self, card_id: CardId) {
        if self.stats.record_study(card_id) {
            self.persist();
        }
    }

    pub fn record_quiz_result(&mut self, card_id: CardId, is_correct: bool) {
        self.stats.record_quiz_result(card_id, is_correct);
        self.persist();
    }

    pub fn correct_rate(&self) -> u32 {
        self.stats.correct_rate()
    }

    fn persist(&self) {
        if let Err(e) = stash::save(self.store.as_ref(), &self.key, &self.stats) {
            log::warn!("Failed to persist study stats: {e}");
        }
    }
}
