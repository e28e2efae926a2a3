//! Seed phrase word list and random phrase generation.
//!
//! The list is the 26-word NATO phonetic alphabet. Phrases are 12 words
//! drawn independently, with replacement, from an OS-backed CSPRNG.
//! This is not BIP39: there is no checksum and no entropy encoding.

use rand::rngs::OsRng;
use rand::{CryptoRng, Rng};
use zeroize::Zeroizing;

/// The fixed word list used for generated seed phrases.
pub const WORDLIST: [&str; 26] = [
    "alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel", "india",
    "juliet", "kilo", "lima", "mike", "november", "oscar", "papa", "quebec", "romeo",
    "sierra", "tango", "uniform", "victor", "whiskey", "xray", "yankee", "zulu",
];

/// Number of words in a generated seed phrase.
pub const PHRASE_WORD_COUNT: usize = 12;

/// Byte length of the longest possible generated phrase: every word the
/// longest list entry, plus the separating spaces.
///
/// Generation reserves this up front so the phrase buffer is never
/// reallocated, which would free a copy of the phrase without zeroizing it.
pub const MAX_PHRASE_LEN: usize = PHRASE_WORD_COUNT * longest_word() + (PHRASE_WORD_COUNT - 1);

const fn longest_word() -> usize {
    let mut longest = 0;
    let mut i = 0;
    while i < WORDLIST.len() {
        if WORDLIST[i].len() > longest {
            longest = WORDLIST[i].len();
        }
        i += 1;
    }
    longest
}

/// Generates a 12-word seed phrase from the operating system CSPRNG.
pub fn generate_phrase() -> Zeroizing<String> {
    generate_phrase_with(&mut OsRng)
}

/// Generates a 12-word seed phrase from the supplied CSPRNG.
///
/// Exposed so tests can drive generation from a seeded generator.
pub fn generate_phrase_with<R: Rng + CryptoRng>(rng: &mut R) -> Zeroizing<String> {
    let mut phrase = Zeroizing::new(String::with_capacity(MAX_PHRASE_LEN));
    for i in 0..PHRASE_WORD_COUNT {
        if i > 0 {
            phrase.push(' ');
        }
        phrase.push_str(WORDLIST[rng.gen_range(0..WORDLIST.len())]);
    }
    phrase
}

/// Returns the position of `word` in [`WORDLIST`], if present.
pub fn word_index(word: &str) -> Option<usize> {
    WORDLIST.iter().position(|w| *w == word)
}
