use indexmap::IndexSet;
use rand::Rng;
use vocab_utils::CardId;
use vocab_utils::Language;
use vocab_utils::text_cleanup::{fold_accents, normalize_for_grading};

use crate::config::QuizConfig;
use crate::deck::Deck;
use crate::stats::StatsManager;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, tsify::Tsify,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub enum QuizMode {
    /// Spanish word shown, pick the English translation
    MultipleChoice,
    /// English word shown, type the Spanish word
    FillIn,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub card_id: CardId,
    pub mode: QuizMode,
    pub prompt: String,
    /// Shuffled choices, always including `answer`. Empty for fill-in questions.
    pub options: Vec<String>,
    pub answer: String,
}

impl QuizQuestion {
    pub fn answer_language(&self) -> Language {
        match self.mode {
            QuizMode::MultipleChoice => Language::English,
            QuizMode::FillIn => Language::Spanish,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct QuizOutcome {
    pub card_id: CardId,
    pub is_correct: bool,
    pub expected: String,
}

/// Builds a question about a random card, avoiding `previous` when the deck has another card to offer.
///
/// Multiple choice offers up to `config.distractor_count` wrong translations (as many as the deck
/// has), sampled uniformly without replacement. Returns `None` for an empty deck.
pub fn build_question<R: Rng + ?Sized>(
    deck: &Deck,
    mode: QuizMode,
    previous: Option<CardId>,
    config: &QuizConfig,
    rng: &mut R,
) -> Option<QuizQuestion> {
    let card = match previous {
        Some(previous) if deck.len() > 1 => deck.pick_random_with(previous, rng)?,
        _ => card_sampler::pick_excluding(deck.cards(), rng, |_| false)?,
    };

    let question = match mode {
        QuizMode::MultipleChoice => {
            let distractors =
                card_sampler::sample_distinct(deck.cards(), config.distractor_count, rng, |other| {
                    other.id == card.id || other.english_translation == card.english_translation
                });
            // IndexSet so two cards sharing a translation can't produce the same option twice
            let options: IndexSet<String> = std::iter::once(&card.english_translation)
                .chain(distractors.iter().map(|other| &other.english_translation))
                .cloned()
                .collect();

            QuizQuestion {
                card_id: card.id,
                mode,
                prompt: card.spanish_word.clone(),
                options: card_sampler::shuffled(options.into_iter().collect(), rng),
                answer: card.english_translation.clone(),
            }
        }
        QuizMode::FillIn => QuizQuestion {
            card_id: card.id,
            mode,
            prompt: card.english_translation.clone(),
            options: Vec::new(),
            answer: card.spanish_word.clone(),
        },
    };

    Some(question)
}

/// Case, spacing and punctuation never matter. Accents are ignored for typed answers when the config
/// allows it (`ñ` still has to be `ñ`).
pub fn grade(question: &QuizQuestion, submission: &str, config: &QuizConfig) -> bool {
    let language = question.answer_language();
    let fold = config.ignore_accents && question.mode == QuizMode::FillIn;
    let normalize = |text: &str| {
        let normalized = normalize_for_grading(text, language);
        if fold {
            fold_accents(&normalized)
        } else {
            normalized
        }
    };

    normalize(submission) == normalize(&question.answer)
}

/// Grades `submission` and records the result in the study stats.
pub fn answer(
    question: &QuizQuestion,
    submission: &str,
    config: &QuizConfig,
    stats: &mut StatsManager,
) -> QuizOutcome {
    let is_correct = grade(question, submission, config);
    stats.record_quiz_result(question.card_id, is_correct);
    QuizOutcome {
        card_id: question.card_id,
        is_correct,
        expected: question.answer.clone(),
    }
}
