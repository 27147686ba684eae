pub mod catalog;
pub mod text_cleanup;

pub use catalog::{CATALOG, VocabEntry};

/// Stable identifier of a vocabulary entry. Assigned by the catalog and never reused.
pub type CardId = u32;

#[derive(
    Copy,
    Clone,
    Debug,
    serde::Serialize,
    serde::Deserialize,
    PartialEq,
    Eq,
    Ord,
    PartialOrd,
    Hash,
    tsify::Tsify,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum Language {
    Spanish,
    English,
}

impl Language {
    pub fn iso_639_1(&self) -> &'static str {
        match self {
            Language::Spanish => "es",
            Language::English => "en",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::Spanish => write!(f, "Spanish"),
            Language::English => write!(f, "English"),
        }
    }
}

#[derive(
    Copy,
    Clone,
    Debug,
    serde::Serialize,
    serde::Deserialize,
    tsify::Tsify,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub native_language: Language,
    pub target_language: Language,
}

/// The only course the app ships: cards show the Spanish word first and reveal the English one.
pub const SPANISH_FOR_ENGLISH: Course = Course {
    native_language: Language::English,
    target_language: Language::Spanish,
};
