/// Storage key used for persisting flashcard progress in localStorage.
pub const DECK_STORAGE_KEY: &str = "spanish-flashcards:deck";

pub const STATS_STORAGE_KEY: &str = "spanish-flashcards:stats";

#[derive(
    Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize, tsify::Tsify,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub storage: StorageKeys,
    pub quiz: QuizConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, tsify::Tsify)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageKeys {
    pub deck: String,
    pub stats: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            deck: DECK_STORAGE_KEY.to_string(),
            stats: STATS_STORAGE_KEY.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, tsify::Tsify)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizConfig {
    /// Wrong options shown next to the right one in multiple choice (fewer if the deck is small)
    pub distractor_count: usize,
    /// Accept typed answers that only differ in accents ("cancion" for "canción")
    pub ignore_accents: bool,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            distractor_count: 3,
            ignore_accents: true,
        }
    }
}
