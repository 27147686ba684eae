//! The vocabulary bundled with the app.

use crate::CardId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VocabEntry {
    pub id: CardId,
    pub spanish_word: &'static str,
    pub english_translation: &'static str,
}

const fn entry(
    id: CardId,
    spanish_word: &'static str,
    english_translation: &'static str,
) -> VocabEntry {
    VocabEntry {
        id,
        spanish_word,
        english_translation,
    }
}

/// Ordered seed catalog. Ids are the join key with anything persisted, so entries may be appended
/// but an id must never be renumbered or reused.
pub const CATALOG: &[VocabEntry] = &[
    entry(1, "casa", "house"),
    entry(2, "perro", "dog"),
    entry(3, "gato", "cat"),
    entry(4, "libro", "book"),
    entry(5, "agua", "water"),
    entry(6, "comida", "food"),
    entry(7, "amigo", "friend"),
    entry(8, "escuela", "school"),
    entry(9, "ciudad", "city"),
    entry(10, "coche", "car"),
    entry(11, "árbol", "tree"),
    entry(12, "sol", "sun"),
    entry(13, "luna", "moon"),
    entry(14, "mesa", "table"),
    entry(15, "silla", "chair"),
    entry(16, "ventana", "window"),
    entry(17, "puerta", "door"),
    entry(18, "leche", "milk"),
    entry(19, "pan", "bread"),
    entry(20, "manzana", "apple"),
    entry(21, "niño", "child"),
    entry(22, "mujer", "woman"),
    entry(23, "hombre", "man"),
    entry(24, "familia", "family"),
    entry(25, "trabajo", "work"),
    entry(26, "tiempo", "time"),
    entry(27, "día", "day"),
    entry(28, "noche", "night"),
    entry(29, "año", "year"),
    entry(30, "corazón", "heart"),
    entry(31, "cielo", "sky"),
    entry(32, "mar", "sea"),
    entry(33, "playa", "beach"),
    entry(34, "montaña", "mountain"),
    entry(35, "calle", "street"),
    entry(36, "tienda", "store"),
    entry(37, "dinero", "money"),
    entry(38, "música", "music"),
    entry(39, "canción", "song"),
    entry(40, "feliz", "happy"),
];
