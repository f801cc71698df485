//! Feedback calculation for Wordle guesses.
//!
//! This module handles computing the per-letter feedback (green/yellow/gray)
//! for a guess against a target word, and the compact string form of it:
//! uppercase for a letter in the right place, lowercase for a letter present
//! elsewhere, `.` for an absent letter.

use crate::PLACEHOLDER;
use std::collections::HashMap;

/// Represents the feedback for a single letter position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// Correct letter in correct position (green)
    Correct,
    /// Correct letter in wrong position (yellow)
    Present,
    /// Letter not in word (gray)
    Absent,
}

impl Feedback {
    /// Convert to a character for display
    pub fn to_char(self) -> char {
        match self {
            Feedback::Correct => '🟩',
            Feedback::Present => '🟨',
            Feedback::Absent => '⬛',
        }
    }

    /// Parse from a character of a score string.
    pub fn from_char(c: char) -> Option<Self> {
        if c.is_ascii_uppercase() {
            Some(Feedback::Correct)
        } else if c.is_ascii_lowercase() {
            Some(Feedback::Present)
        } else if c == PLACEHOLDER {
            Some(Feedback::Absent)
        } else {
            None
        }
    }
}

/// The feedback for one guess, position by position.
///
/// Absent positions remember the guessed letter too, so a score can be
/// turned back into the annotated guess the next round needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Score {
    letters: Vec<u8>,
    feedback: Vec<Feedback>,
}

impl Score {
    /// Calculate the score of `word` against `target`.
    ///
    /// Two passes, so repeated letters are only credited as often as the
    /// target holds them:
    /// - pass one marks letters missing from the target absent and letters
    ///   in the right place correct, using up one of that letter each;
    /// - pass two uses up one letter for each remaining present mark, and
    ///   demotes the mark to absent once that letter has run out.
    ///
    /// Both words are expected to be lowercase and of equal length.
    pub fn calculate(word: &str, target: &str) -> Self {
        let word_bytes = word.as_bytes();
        let target_bytes = target.as_bytes();

        debug_assert_eq!(word_bytes.len(), target_bytes.len());

        let mut remaining: HashMap<u8, i32> = HashMap::new();
        for &t in target_bytes {
            *remaining.entry(t).or_insert(0) += 1;
        }

        let mut feedback = Vec::with_capacity(word_bytes.len());
        for (&c, &t) in word_bytes.iter().zip(target_bytes) {
            if !target_bytes.contains(&c) {
                feedback.push(Feedback::Absent);
            } else if c == t {
                *remaining.entry(c).or_insert(0) -= 1;
                feedback.push(Feedback::Correct);
            } else {
                feedback.push(Feedback::Present);
            }
        }

        for (fb, c) in feedback.iter_mut().zip(word_bytes) {
            if *fb == Feedback::Present {
                let left = remaining.entry(*c).or_insert(0);
                *left -= 1;
                if *left < 0 {
                    *fb = Feedback::Absent;
                }
            }
        }

        Self {
            letters: word_bytes.to_vec(),
            feedback,
        }
    }

    /// Parse a score string such as `"..A.e"`.
    ///
    /// Absent positions carry no letter in this form, so they are stored as
    /// the placeholder.
    pub fn parse(s: &str) -> Option<Self> {
        let mut letters = Vec::with_capacity(s.len());
        let mut feedback = Vec::with_capacity(s.len());
        for c in s.chars() {
            let fb = Feedback::from_char(c)?;
            letters.push(c.to_ascii_lowercase() as u8);
            feedback.push(fb);
        }
        Some(Self { letters, feedback })
    }

    pub fn len(&self) -> usize {
        self.feedback.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feedback.is_empty()
    }

    pub fn feedbacks(&self) -> &[Feedback] {
        &self.feedback
    }

    /// Check if every position is correct
    pub fn is_win(&self) -> bool {
        self.feedback.iter().all(|&fb| fb == Feedback::Correct)
    }

    /// The guess re-encoded for the next round's constraints: letters
    /// present elsewhere become uppercase, everything else stays lowercase.
    pub fn annotated_guess(&self) -> String {
        self.letters
            .iter()
            .zip(&self.feedback)
            .map(|(&c, fb)| match fb {
                Feedback::Present => c.to_ascii_uppercase() as char,
                _ => c as char,
            })
            .collect()
    }

    /// Letters confirmed at each position.
    pub fn correct_letters(&self) -> impl Iterator<Item = Option<u8>> + '_ {
        self.letters
            .iter()
            .zip(&self.feedback)
            .map(|(&c, &fb)| (fb == Feedback::Correct).then_some(c))
    }

    /// Display as emoji string
    pub fn to_emoji_string(&self) -> String {
        self.feedback.iter().map(|f| f.to_char()).collect()
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (&c, fb) in self.letters.iter().zip(&self.feedback) {
            let shown = match fb {
                Feedback::Correct => c.to_ascii_uppercase() as char,
                Feedback::Present => c as char,
                Feedback::Absent => PLACEHOLDER,
            };
            write!(f, "{}", shown)?;
        }
        Ok(())
    }
}
