//! Plaintext generation.
//!
//! The engine only needs a long run of uppercase alphabet letters whose
//! length falls in a requested range; how the text reads is up to the
//! [`TextGenerator`]. [`SentenceGenerator`] builds French-looking sentences
//! from a built-in vocabulary, with spaces, accents and punctuation removed.

use crate::alphabet;
use crate::random::RandomSource;

/// Produces plaintext from a seeded generator.
pub trait TextGenerator {
    /// Returns a string of alphabet letters whose length lies in
    /// `[min_len, max_len)` (exactly `min_len` if the range is empty).
    fn generate(&self, rng: &mut dyn RandomSource, min_len: usize, max_len: usize) -> String;
}

const SUBJECTS: &[&str] = &[
    "LES GENS",
    "LE MARIN",
    "UNE AMIE",
    "MON VOISIN",
    "LA MAITRESSE",
    "LE VIEUX SAGE",
    "CETTE FILLE",
    "LES ENFANTS",
    "NOTRE CHEF",
    "LE CHAT",
    "UN SOLDAT",
    "LA REINE",
    "LE FACTEUR",
    "LES ETUDIANTS",
    "MA TANTE",
];

const VERBS: &[&str] = &[
    "REGARDE",
    "CHERCHE",
    "TROUVE",
    "PREPARE",
    "RACONTE",
    "DECOUVRE",
    "ATTEND",
    "OUBLIE",
    "ENTEND",
    "PROTEGE",
    "TRAVERSE",
    "DECHIFFRE",
    "ECRIT",
    "PORTE",
    "SUIT",
];

const OBJECTS: &[&str] = &[
    "UN MESSAGE SECRET",
    "LA PORTE DU JARDIN",
    "UNE LETTRE ANCIENNE",
    "LE CHEMIN DE LA GARE",
    "DES PREUVES CREDIBLES",
    "LA MACHINE A CHIFFRER",
    "UN LIVRE OUBLIE",
    "LES ROUES DENTEES",
    "UNE CARTE DU PORT",
    "LE TRESOR DU ROI",
    "LA CLEF DU COFFRE",
    "UN TELEGRAMME",
    "LES SIGNAUX RADIO",
    "LA RIVIERE",
    "UN NOUVEAU CODE",
];

const COMPLEMENTS: &[&str] = &[
    "AVANT LA NUIT",
    "SANS RIEN DIRE",
    "PENDANT LA GUERRE",
    "AU BORD DE LA MER",
    "CHAQUE MATIN",
    "AVEC BEAUCOUP DE PATIENCE",
    "DANS LE SILENCE",
    "SOUS LA PLUIE",
    "LOIN DE LA VILLE",
    "PAR HASARD",
    "DEPUIS LONGTEMPS",
    "A LA FIN DU JOUR",
];

const CONNECTORS: &[&str] = &["ET", "MAIS", "CAR", "PUIS", "DONC", "ENSUITE", "POURTANT"];

/// Builds plaintext out of simple French sentences.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceGenerator;

impl SentenceGenerator {
    fn pick<'a>(rng: &mut dyn RandomSource, words: &[&'a str]) -> &'a str {
        words[rng.next_below(words.len() as u64) as usize]
    }

    /// Appends one sentence of letters only to `out`.
    fn push_sentence(rng: &mut dyn RandomSource, out: &mut String) {
        let clauses = 1 + rng.next_below(2);
        for clause in 0..clauses {
            if clause > 0 {
                push_letters(out, Self::pick(rng, CONNECTORS));
            }
            push_letters(out, Self::pick(rng, SUBJECTS));
            push_letters(out, Self::pick(rng, VERBS));
            push_letters(out, Self::pick(rng, OBJECTS));
            if rng.next_below(2) == 0 {
                push_letters(out, Self::pick(rng, COMPLEMENTS));
            }
        }
    }
}

fn push_letters(out: &mut String, words: &str) {
    out.extend(words.chars().filter(|c| alphabet::rank(*c).is_some()));
}

impl TextGenerator for SentenceGenerator {
    fn generate(&self, rng: &mut dyn RandomSource, min_len: usize, max_len: usize) -> String {
        let len = rng.range(min_len, max_len);
        let mut out = String::with_capacity(len + 64);
        while out.len() < len {
            Self::push_sentence(rng, &mut out);
        }
        out.truncate(len);
        out
    }
}
