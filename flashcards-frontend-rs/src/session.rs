use vocab_utils::Language;

use crate::deck::{Card, DeckManager};
use crate::stats::StatsManager;

/// Flip-to-reveal state of the study view: the card shows the Spanish word until it is flipped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StudySession {
    flipped: bool,
}

impl StudySession {
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Turns the current card over. Revealing the translation counts the card as studied.
    pub fn flip(&mut self, deck: &DeckManager, stats: &mut StatsManager) {
        self.flipped = !self.flipped;
        if self.flipped
            && let Some(card) = deck.current()
        {
            stats.record_study(card.id);
        }
    }

    pub fn next(&mut self, deck: &mut DeckManager) {
        self.flipped = false;
        deck.advance();
    }

    /// "I got it right" / "I got it wrong"
    pub fn assess(&mut self, deck: &mut DeckManager, is_known: bool) {
        deck.set_known(is_known);
        self.flipped = false;
    }

    pub fn visible_side(&self) -> Language {
        if self.flipped {
            Language::English
        } else {
            Language::Spanish
        }
    }

    pub fn visible_word<'a>(&self, card: &'a Card) -> &'a str {
        match self.visible_side() {
            Language::Spanish => &card.spanish_word,
            Language::English => &card.english_translation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::seed_deck;
    use stash::{KeyValueStore, MemoryStore};
    use std::rc::Rc;

    fn setup() -> (Rc<MemoryStore>, DeckManager, StatsManager) {
        let store = Rc::new(MemoryStore::new());
        let deck = DeckManager::load(store.clone(), "deck", seed_deck());
        let stats = StatsManager::load(store.clone(), "stats");
        (store, deck, stats)
    }

    #[test]
    fn test_flip_reveals_translation() {
        let (_, deck, mut stats) = setup();
        let mut session = StudySession::default();
        let card = deck.current().cloned().unwrap();

        assert_eq!(session.visible_side(), Language::Spanish);
        assert_eq!(session.visible_word(&card), "casa");

        session.flip(&deck, &mut stats);
        assert!(session.is_flipped());
        assert_eq!(session.visible_side(), Language::English);
        assert_eq!(session.visible_word(&card), "house");
        assert!(stats.snapshot().studied_ids.contains(&1));

        session.flip(&deck, &mut stats);
        assert!(!session.is_flipped());
        assert_eq!(stats.snapshot().studied_count(), 1);
    }

    #[test]
    fn test_next_unflips_and_advances() {
        let (_, mut deck, mut stats) = setup();
        let mut session = StudySession::default();

        session.flip(&deck, &mut stats);
        session.next(&mut deck);

        assert!(!session.is_flipped());
        assert_eq!(deck.current().map(|c| c.spanish_word.as_str()), Some("perro"));
    }

    #[test]
    fn test_assess_marks_current_card_and_persists() {
        let (store, mut deck, mut stats) = setup();
        let mut session = StudySession::default();

        session.flip(&deck, &mut stats);
        session.assess(&mut deck, true);

        assert!(!session.is_flipped());
        assert!(deck.current().is_some_and(|card| card.is_known));
        let stored = store.get("deck").unwrap().unwrap();
        assert!(stored.starts_with(r#"[{"id":1,"is_known":true}"#));
    }
}
