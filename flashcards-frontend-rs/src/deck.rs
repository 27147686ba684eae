use std::rc::Rc;

use rand::Rng;
use stash::KeyValueStore;
use vocab_utils::{CATALOG, CardId, VocabEntry};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct Card {
    pub id: CardId,
    pub spanish_word: String,
    pub english_translation: String,
    pub is_known: bool,
}

impl From<&VocabEntry> for Card {
    fn from(entry: &VocabEntry) -> Self {
        Card {
            id: entry.id,
            spanish_word: entry.spanish_word.to_string(),
            english_translation: entry.english_translation.to_string(),
            is_known: false,
        }
    }
}

/// Creates a fresh, mutable copy of the bundled catalog with nothing marked as known.
pub fn seed_deck() -> Vec<Card> {
    CATALOG.iter().map(Card::from).collect()
}

/// The cards being studied, in catalog order, plus the position of the card on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
    cursor: usize,
}

impl Deck {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards, cursor: 0 }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Index of the current card. An index that no longer fits the deck reads as 0.
    pub fn cursor(&self) -> Option<usize> {
        if self.cards.is_empty() {
            None
        } else if self.cursor >= self.cards.len() {
            Some(0)
        } else {
            Some(self.cursor)
        }
    }

    pub fn current(&self) -> Option<&Card> {
        self.cursor().and_then(|index| self.cards.get(index))
    }

    /// Moves to the next card, looping back to the start after the last one.
    pub fn advance(&mut self) {
        if let Some(cursor) = self.cursor() {
            self.cursor = (cursor + 1) % self.cards.len();
        }
    }

    /// Overwrites `is_known` on the current card only. Returns false if the deck is empty.
    pub fn set_known(&mut self, is_known: bool) -> bool {
        let Some(cursor) = self.cursor() else {
            return false;
        };
        self.cursor = cursor;
        self.cards[cursor].is_known = is_known;
        true
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn known_count(&self) -> usize {
        self.cards.iter().filter(|card| card.is_known).count()
    }

    pub fn unknown_count(&self) -> usize {
        self.cards.len() - self.known_count()
    }

    /// Uniformly random card other than `excluding`. `None` if no other card exists.
    pub fn pick_random_with<R: Rng + ?Sized>(&self, excluding: CardId, rng: &mut R) -> Option<&Card> {
        card_sampler::pick_excluding(&self.cards, rng, |card| card.id == excluding)
    }

    #[cfg(test)]
    pub(crate) fn with_cursor(cards: Vec<Card>, cursor: usize) -> Self {
        Self { cards, cursor }
    }
}

/// Owns the live deck and writes it back to storage after every change.
pub struct DeckManager {
    deck: Deck,
    store: Rc<dyn KeyValueStore>,
    key: String,
}

impl DeckManager {
    /// Rebuilds the deck from `seed` and whatever is stored under `key`, then writes the
    /// reconciled deck back so storage always holds the current catalog's shape.
    pub fn load(store: Rc<dyn KeyValueStore>, key: impl Into<String>, seed: Vec<Card>) -> Self {
        let key = key.into();
        let deck: Deck = stash::load(store.as_ref(), &key, seed);
        log::info!(
            "Loaded deck of {} cards ({} known)",
            deck.len(),
            deck.known_count()
        );
        let manager = Self { deck, store, key };
        manager.persist();
        manager
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn current(&self) -> Option<&Card> {
        self.deck.current()
    }

    /// Zero-based index of the current card (0 for an empty deck).
    pub fn cursor_position(&self) -> usize {
        self.deck.cursor().unwrap_or(0)
    }

    pub fn deck_size(&self) -> usize {
        self.deck.len()
    }

    pub fn advance(&mut self) {
        self.deck.advance();
    }

    pub fn set_known(&mut self, is_known: bool) {
        if self.deck.set_known(is_known) {
            self.persist();
        }
    }

    pub fn all_cards(&self) -> &[Card] {
        self.deck.cards()
    }

    pub fn pick_random(&self, excluding: CardId) -> Option<&Card> {
        self.deck.pick_random_with(excluding, &mut rand::thread_rng())
    }

    pub fn pick_random_with<R: Rng + ?Sized>(&self, excluding: CardId, rng: &mut R) -> Option<&Card> {
        self.deck.pick_random_with(excluding, rng)
    }

    fn persist(&self) {
        // Intentionally ignore persistence failures (e.g. quota exceeded); the next change writes again.
        if let Err(e) = stash::save(self.store.as_ref(), &self.key, &self.deck) {
            log::warn!("Failed to persist deck: {e}");
        }
    }
}
