//! Encoding of the deck and statistics records.
//!
//! Only the durable minimum is stored: the deck as `[{"id", "is_known"}, ...]` (the words always
//! come from the catalog), the statistics as their four fields. Decoding is lenient: it goes through
//! `serde_json::Value` so a single bad entry or field falls back to the seed instead of discarding the
//! whole record.

use indexmap::IndexSet;
use serde_json::Value;
use std::collections::HashMap;
use vocab_utils::CardId;

use crate::deck::{Card, Deck};
use crate::stats::StudyStats;

/// Minimal shape persisted for each flashcard.
#[derive(Debug, serde::Serialize)]
struct PersistedCard {
    id: CardId,
    is_known: bool,
}

pub fn serialize_deck(cards: &[Card]) -> Result<String, serde_json::Error> {
    let persisted: Vec<PersistedCard> = cards
        .iter()
        .map(|card| PersistedCard {
            id: card.id,
            is_known: card.is_known,
        })
        .collect();
    serde_json::to_string(&persisted)
}

/// Overlays the stored known-flags onto `seed`.
///
/// The result always has the seed's cards in the seed's order; the stored record can only flip
/// `is_known` for ids the seed contains. An absent, unparsable or entirely malformed record returns the
/// seed unchanged.
pub fn reconcile_deck(raw: Option<&str>, seed: Vec<Card>) -> Vec<Card> {
    let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
        return seed;
    };

    let parsed: Value = match serde_json::from_str(raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::warn!("Stored deck is not valid JSON, starting from the catalog: {e}");
            return seed;
        }
    };

    let Value::Array(entries) = parsed else {
        log::warn!("Stored deck is not a list, starting from the catalog");
        return seed;
    };

    let valid: Vec<(CardId, bool)> = entries.iter().filter_map(parse_persisted_card).collect();

    if valid.is_empty() {
        log::warn!("Stored deck has no usable entries, starting from the catalog");
        return seed;
    }
    if valid.len() < entries.len() {
        log::warn!(
            "Ignored {} malformed entries in stored deck",
            entries.len() - valid.len()
        );
    }

    let known_by_id: HashMap<CardId, bool> = valid.into_iter().collect();

    seed.into_iter()
        .map(|card| Card {
            is_known: known_by_id.get(&card.id).copied().unwrap_or(card.is_known),
            ..card
        })
        .collect()
}

fn parse_persisted_card(value: &Value) -> Option<(CardId, bool)> {
    let id = as_card_id(value.get("id")?)?;
    let is_known = value.get("is_known")?.as_bool()?;
    Some((id, is_known))
}

/// Ids written as whole floats (`1.0`) count as integers; anything fractional, negative or out of
/// range does not.
fn as_card_id(value: &Value) -> Option<CardId> {
    let id = match value.as_u64() {
        Some(id) => id,
        None => {
            let id = value.as_f64()?;
            if id.fract() != 0.0 || !(0.0..=f64::from(CardId::MAX)).contains(&id) {
                return None;
            }
            id as u64
        }
    };
    CardId::try_from(id).ok()
}

pub fn serialize_stats(stats: &StudyStats) -> Result<String, serde_json::Error> {
    serde_json::to_string(stats)
}

/// Rebuilds statistics field by field: each field that is missing or has the wrong type falls back to
/// the corresponding field of `default`, the rest are kept.
pub fn reconcile_stats(raw: Option<&str>, default: StudyStats) -> StudyStats {
    let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
        return default;
    };

    let parsed: Value = match serde_json::from_str(raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::warn!("Stored study stats are not valid JSON, starting from zero: {e}");
            return default;
        }
    };

    let studied_ids = parsed
        .get("studiedCardIds")
        .and_then(Value::as_array)
        .map(|ids| {
            ids.iter()
                .filter_map(as_card_id)
                .collect::<IndexSet<CardId>>()
        })
        .unwrap_or(default.studied_ids);

    let counter = |field: &str, fallback: u64| {
        parsed
            .get(field)
            .and_then(Value::as_u64)
            .unwrap_or(fallback)
    };

    let stats = StudyStats {
        studied_ids,
        total_quiz_attempts: counter("totalQuizAttempts", default.total_quiz_attempts),
        correct_quiz_answers: counter("correctQuizAnswers", default.correct_quiz_answers),
        incorrect_quiz_answers: counter("incorrectQuizAnswers", default.incorrect_quiz_answers),
    };

    if !stats.is_consistent() {
        // Kept as stored: there is no way to tell which counter is the wrong one.
        log::warn!(
            "Stored quiz counters do not add up ({} correct + {} incorrect != {} total)",
            stats.correct_quiz_answers,
            stats.incorrect_quiz_answers,
            stats.total_quiz_attempts
        );
    }

    stats
}

impl stash::Persisted for Deck {
    type Seed = Vec<Card>;

    fn serialize(&self) -> Result<String, serde_json::Error> {
        serialize_deck(self.cards())
    }

    fn reconcile(raw: Option<&str>, seed: Vec<Card>) -> Self {
        Deck::new(reconcile_deck(raw, seed))
    }
}

impl stash::Persisted for StudyStats {
    type Seed = StudyStats;

    fn serialize(&self) -> Result<String, serde_json::Error> {
        serialize_stats(self)
    }

    fn reconcile(raw: Option<&str>, seed: StudyStats) -> Self {
        reconcile_stats(raw, seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: CardId, spanish_word: &str, english_translation: &str) -> Card {
        Card {
            id,
            spanish_word: spanish_word.to_string(),
            english_translation: english_translation.to_string(),
            is_known: false,
        }
    }

    fn seed() -> Vec<Card> {
        vec![card(1, "casa", "house"), card(2, "perro", "dog")]
    }

    #[test]
    fn test_missing_or_empty_record_returns_seed() {
        assert_eq!(reconcile_deck(None, seed()), seed());
        assert_eq!(reconcile_deck(Some(""), seed()), seed());
    }

    #[test]
    fn test_malformed_records_return_seed() {
        for raw in [
            "not json",
            "{}",
            "42",
            "[]",
            r#"[{"id":"1","is_known":true}]"#,
            r#"[{"id":1,"is_known":"yes"}]"#,
            r#"[{"id":-1,"is_known":true}, null, 3, "x"]"#,
            r#"[{"id":1.5,"is_known":true}]"#,
        ] {
            assert_eq!(reconcile_deck(Some(raw), seed()), seed(), "{raw}");
        }
    }

    #[test]
    fn test_partial_record_keeps_seed_defaults() {
        let reconciled = reconcile_deck(Some(r#"[{"id":1,"is_known":true}]"#), seed());
        assert!(reconciled[0].is_known);
        assert!(!reconciled[1].is_known);
    }

    #[test]
    fn test_record_cannot_reorder_add_or_remove_cards() {
        let raw = r#"[
            {"id":2,"is_known":true},
            {"id":99,"is_known":true},
            {"id":1,"is_known":false},
            {"bogus":true}
        ]"#;
        let reconciled = reconcile_deck(Some(raw), seed());

        let ids: Vec<CardId> = reconciled.iter().map(|card| card.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(!reconciled[0].is_known);
        assert!(reconciled[1].is_known);
        assert_eq!(reconciled[1].spanish_word, "perro");
    }

    #[test]
    fn test_whole_float_ids_are_accepted() {
        let reconciled = reconcile_deck(Some(r#"[{"id":2.0,"is_known":true}]"#), seed());
        assert!(!reconciled[0].is_known);
        assert!(reconciled[1].is_known);

        let raw = r#"{"studiedCardIds": [1.0, 2.5, -3.0, 4e0], "totalQuizAttempts": 0}"#;
        let stats = reconcile_stats(Some(raw), StudyStats::default());
        assert_eq!(stats.studied_ids.iter().copied().collect::<Vec<_>>(), vec![1, 4]);
    }

    #[test]
    fn test_later_duplicate_wins() {
        let raw = r#"[{"id":1,"is_known":true},{"id":1,"is_known":false}]"#;
        assert!(!reconcile_deck(Some(raw), seed())[0].is_known);
    }

    #[test]
    fn test_round_trip_and_idempotence() {
        let mut deck = seed();
        deck[1].is_known = true;

        let encoded = serialize_deck(&deck).unwrap();
        assert_eq!(
            encoded,
            r#"[{"id":1,"is_known":false},{"id":2,"is_known":true}]"#
        );
        let once = reconcile_deck(Some(&encoded), seed());
        assert_eq!(once, deck);

        let twice = reconcile_deck(Some(&serialize_deck(&once).unwrap()), seed());
        assert_eq!(twice, once);
    }

    #[test]
    fn test_stats_missing_or_corrupt_returns_default() {
        assert_eq!(reconcile_stats(None, StudyStats::default()), StudyStats::default());
        assert_eq!(
            reconcile_stats(Some("{oops"), StudyStats::default()),
            StudyStats::default()
        );
        assert_eq!(
            reconcile_stats(Some("[1, 2]"), StudyStats::default()),
            StudyStats::default()
        );
    }

    #[test]
    fn test_stats_fields_default_independently() {
        let raw = r#"{
            "studiedCardIds": [3, "four", 5, -1, 3],
            "totalQuizAttempts": 4,
            "correctQuizAnswers": "three",
            "incorrectQuizAnswers": 1
        }"#;
        let stats = reconcile_stats(Some(raw), StudyStats::default());

        assert_eq!(stats.studied_ids.iter().copied().collect::<Vec<_>>(), vec![3, 5]);
        assert_eq!(stats.total_quiz_attempts, 4);
        assert_eq!(stats.correct_quiz_answers, 0);
        assert_eq!(stats.incorrect_quiz_answers, 1);
        // trusted as stored, even though the counters disagree
        assert!(!stats.is_consistent());
    }

    #[test]
    fn test_stats_round_trip() {
        let mut stats = StudyStats::default();
        stats.record_study(4);
        stats.record_quiz_result(2, true);
        stats.record_quiz_result(9, false);

        let encoded = serialize_stats(&stats).unwrap();
        assert_eq!(reconcile_stats(Some(&encoded), StudyStats::default()), stats);
    }
}
