#![deny(clippy::string_slice)]

mod audio;
pub mod codec;
pub mod config;
pub mod deck;
pub mod quiz;
pub mod session;
pub mod stats;
mod utils;

pub use config::{AppConfig, QuizConfig, StorageKeys};
pub use deck::{Card, Deck, DeckManager, seed_deck};
pub use quiz::{QuizMode, QuizOutcome, QuizQuestion};
pub use session::StudySession;
pub use stats::{StatsManager, StudyStats};
pub use vocab_utils::{CardId, Course, Language};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use stash::KeyValueStore;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::LazyLock;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

use crate::audio::ClickSound;

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn get_course() -> Course {
    vocab_utils::SPANISH_FOR_ENGLISH
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub struct FlashcardApp {
    // never hold one of these borrows while calling back into JS
    deck: RefCell<DeckManager>,
    stats: RefCell<StatsManager>,
    session: RefCell<StudySession>,
    rng: RefCell<ChaCha8Rng>,
    last_quiz_card: Cell<Option<CardId>>,
    click: ClickSound,
    config: AppConfig,
}

#[cfg(test)]
static LOGGER_INITS: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(0);

// putting this inside LOGGER prevents us from accidentally initializing the logger more than once
static LOGGER: LazyLock<()> = LazyLock::new(|| {
    utils::set_panic_hook();

    #[cfg(target_arch = "wasm32")]
    wasm_logger::init(wasm_logger::Config::default());
    #[cfg(test)]
    LOGGER_INITS.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    log::info!("Logging initialized");
});

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl FlashcardApp {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(constructor))]
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Loads the saved deck and statistics from localStorage. Never fails: without localStorage the
    /// app runs from memory.
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn with_config(config: AppConfig) -> Self {
        LazyLock::force(&LOGGER);

        Self::with_parts(
            utils::browser_store(),
            config,
            seed_deck(),
            ChaCha8Rng::from_entropy(),
        )
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn current_card(&self) -> Option<Card> {
        self.deck.borrow().current().cloned()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn cursor_position(&self) -> usize {
        self.deck.borrow().cursor_position()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn deck_size(&self) -> usize {
        self.deck.borrow().deck_size()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn advance(&self) {
        self.deck.borrow_mut().advance();
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn set_known(&self, is_known: bool) {
        self.deck.borrow_mut().set_known(is_known);
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn all_cards(&self) -> Vec<Card> {
        self.deck.borrow().all_cards().to_vec()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn pick_random(&self, excluding: CardId) -> Option<Card> {
        let mut rng = self.rng.borrow_mut();
        self.deck
            .borrow()
            .pick_random_with(excluding, &mut *rng)
            .cloned()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn known_count(&self) -> usize {
        self.deck.borrow().deck().known_count()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn unknown_count(&self) -> usize {
        self.deck.borrow().deck().unknown_count()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn record_study(&self, card_id: CardId) {
        self.stats.borrow_mut().record_study(card_id);
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn record_quiz_result(&self, card_id: CardId, is_correct: bool) {
        self.stats
            .borrow_mut()
            .record_quiz_result(card_id, is_correct);
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn stats_snapshot(&self) -> StudyStats {
        self.stats.borrow().snapshot().clone()
    }

    /// Percentage of quiz answers that were correct, 0 before the first answer.
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn correct_rate(&self) -> u32 {
        self.stats.borrow().correct_rate()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn is_flipped(&self) -> bool {
        self.session.borrow().is_flipped()
    }

    /// The word currently facing the user.
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn visible_word(&self) -> Option<String> {
        let deck = self.deck.borrow();
        let card = deck.current()?;
        Some(self.session.borrow().visible_word(card).to_string())
    }

    /// ISO 639-1 code of the visible side, for the word's `lang` attribute.
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn visible_lang(&self) -> String {
        self.session.borrow().visible_side().iso_639_1().to_string()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn flip(&self) {
        self.session
            .borrow_mut()
            .flip(&self.deck.borrow(), &mut self.stats.borrow_mut());
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn next_card(&self) {
        self.session.borrow_mut().next(&mut self.deck.borrow_mut());
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn assess(&self, is_known: bool) {
        self.session
            .borrow_mut()
            .assess(&mut self.deck.borrow_mut(), is_known);
    }

    /// A new question, never about the same card twice in a row unless the deck has only one card.
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn next_quiz_question(&self, mode: QuizMode) -> Option<QuizQuestion> {
        let question = quiz::build_question(
            self.deck.borrow().deck(),
            mode,
            self.last_quiz_card.get(),
            &self.config.quiz,
            &mut *self.rng.borrow_mut(),
        )?;
        self.last_quiz_card.set(Some(question.card_id));
        Some(question)
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn answer_quiz(&self, question: QuizQuestion, answer: String) -> QuizOutcome {
        quiz::answer(
            &question,
            &answer,
            &self.config.quiz,
            &mut self.stats.borrow_mut(),
        )
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
    pub fn play_click(&self) {
        self.click.play();
    }
}

impl FlashcardApp {
    /// Builds the app on an arbitrary store, catalog and random source.
    pub fn with_parts(
        store: Rc<dyn KeyValueStore>,
        config: AppConfig,
        catalog: Vec<Card>,
        rng: ChaCha8Rng,
    ) -> Self {
        let deck = DeckManager::load(store.clone(), config.storage.deck.clone(), catalog);
        let stats = StatsManager::load(store, config.storage.stats.clone());

        Self {
            deck: RefCell::new(deck),
            stats: RefCell::new(stats),
            session: RefCell::new(StudySession::default()),
            rng: RefCell::new(rng),
            last_quiz_card: Cell::new(None),
            click: ClickSound::default(),
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl Default for FlashcardApp {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn get_app_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
