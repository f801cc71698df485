//! # Wordle Aid
//!
//! Narrows a word list to the candidates consistent with the feedback from
//! earlier Wordle guesses, and optionally plays the game itself to a known
//! target word.
//!
//! Previous guesses are written with case as the feedback channel: an
//! uppercase letter is in the word but in the wrong place, a lowercase letter
//! is not in the word (or not at that position, if the mask pins it there).
//! The last word is the mask, with `.` for unknown positions.

pub mod cli;
pub mod config;
pub mod constraints;
pub mod dictionary;
pub mod error;
pub mod feedback;
pub mod filter;
pub mod solver;

pub use constraints::{ConstraintSet, LetterSet, WordMask};
pub use dictionary::{Dictionary, DictionaryCache};
pub use error::{AidError, Result};
pub use feedback::{Feedback, Score};
pub use filter::{filter_candidates, get_words, Policy, Restrictions};
pub use solver::{Outcome, Round, Selection, Solution, Solver};

/// Placeholder used in masks and scores for an unknown or absent letter.
pub const PLACEHOLDER: char = '.';

/// Vowels counted by [`Policy::min_vowels`].
pub const VOWELS: &[u8] = b"aeiou";

/// Whether `b` is one of the 26 lowercase letters words are built from.
pub fn is_valid_letter(b: u8) -> bool {
    b.is_ascii_lowercase()
}

/// Load the dictionary from the embedded file
pub fn load_dictionary() -> Dictionary {
    Dictionary::parse(include_str!("../dictionary/dictionary.txt"))
}
