//! Constraint building from previous guesses.
//!
//! A history of annotated guesses plus the current mask is reduced to a
//! [`ConstraintSet`]: which letters must and must not appear, which letters
//! are pinned to or barred from each position, and how many times a letter
//! known to repeat must occur.

use crate::error::{AidError, Result};
use crate::is_valid_letter;
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// A set of lowercase letters packed into a bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LetterSet(u32);

impl LetterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The letters of `word`, or `None` if any byte is not a valid letter.
    pub fn from_word(word: &[u8]) -> Option<Self> {
        let mut set = Self::new();
        for &b in word {
            if !is_valid_letter(b) {
                return None;
            }
            set.insert(b);
        }
        Some(set)
    }

    fn bit(letter: u8) -> u32 {
        debug_assert!(is_valid_letter(letter));
        1 << (letter - b'a')
    }

    pub fn insert(&mut self, letter: u8) {
        self.0 |= Self::bit(letter);
    }

    pub fn contains(&self, letter: u8) -> bool {
        self.0 & Self::bit(letter) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.0 & other.0 == 0
    }

    pub fn is_subset(&self, other: &Self) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn difference(&self, other: &Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub fn intersection(&self, other: &Self) -> Self {
        Self(self.0 & other.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (b'a'..=b'z').filter(move |&c| self.contains(c))
    }
}

impl FromIterator<u8> for LetterSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = Self::new();
        for c in iter {
            set.insert(c);
        }
        set
    }
}

impl std::fmt::Display for LetterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in self.iter() {
            write!(f, "{}", c as char)?;
        }
        Ok(())
    }
}

/// The template of known letters, e.g. `"..a.e"`.
///
/// Letters are matched case-insensitively; any other character is an
/// unknown position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordMask(Vec<Option<u8>>);

impl WordMask {
    pub fn parse(mask: &str) -> Self {
        Self(
            mask.chars()
                .map(|c| {
                    let c = c.to_ascii_lowercase();
                    (c.is_ascii() && is_valid_letter(c as u8)).then_some(c as u8)
                })
                .collect(),
        )
    }

    /// A mask with every position unknown.
    pub fn blank(len: usize) -> Self {
        Self(vec![None; len])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, pos: usize) -> Option<u8> {
        self.0.get(pos).copied().flatten()
    }

    /// Pin `letter` at `pos`.
    pub fn set(&mut self, pos: usize, letter: u8) {
        self.0[pos] = Some(letter);
    }

    /// The pinned positions, in order.
    pub fn pins(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(pos, c)| c.map(|c| (pos, c)))
    }
}

impl std::fmt::Display for WordMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in &self.0 {
            write!(f, "{}", c.map_or(crate::PLACEHOLDER, |c| c as char))?;
        }
        Ok(())
    }
}

/// Normalized rules a candidate word must satisfy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintSet {
    /// Required word length
    pub len: usize,
    /// Letters that must appear somewhere
    pub includes: LetterSet,
    /// Letters that must not appear anywhere
    pub excludes: LetterSet,
    /// Letters that must appear at a position
    pub includes_must: BTreeSet<(usize, u8)>,
    /// Letters that must not appear at a position
    pub includes_not: BTreeSet<(usize, u8)>,
    /// Minimum occurrences of letters known to repeat
    pub includes_count: BTreeMap<u8, usize>,
}

impl ConstraintSet {
    /// Derive the constraints for `history` against `mask`.
    ///
    /// In each guess a lowercase letter is tentatively excluded and an
    /// uppercase letter is required. Any letter not equal to the mask at its
    /// position is barred from that position. A letter required elsewhere is
    /// never left in `excludes`.
    pub fn build<S: AsRef<str>>(history: &[S], mask: &WordMask) -> Result<Self> {
        let len = mask.len();
        let mut includes: LetterSet = mask.pins().map(|(_, c)| c).collect();
        let mut excludes = LetterSet::new();
        let mut includes_not = BTreeSet::new();
        let mut includes_count: BTreeMap<u8, usize> = BTreeMap::new();

        for word in history.iter().map(AsRef::as_ref) {
            if word.chars().count() != len {
                return Err(AidError::LengthMismatch {
                    word: word.to_string(),
                    expected: len,
                });
            }

            let mut word_count: BTreeMap<u8, usize> = BTreeMap::new();
            for (pos, csrc) in word.chars().enumerate() {
                let c = csrc.to_ascii_lowercase();
                if !c.is_ascii() || !is_valid_letter(c as u8) {
                    return Err(AidError::InvalidCharacter {
                        word: word.to_string(),
                        ch: csrc,
                    });
                }
                let c = c as u8;
                let pinned = mask.get(pos) == Some(c);

                if !pinned {
                    includes_not.insert((pos, c));
                }

                if csrc.is_ascii_lowercase() {
                    excludes.insert(c);
                    if pinned {
                        *word_count.entry(c).or_insert(0) += 1;
                    }
                } else {
                    includes.insert(c);
                    *word_count.entry(c).or_insert(0) += 1;
                }
            }

            for (c, n) in word_count {
                let max = includes_count.entry(c).or_insert(0);
                *max = (*max).max(n);
            }
        }

        // A single occurrence is already implied by `includes`.
        includes_count.retain(|_, n| *n > 1);
        let excludes = excludes.difference(&includes);

        let constraints = Self {
            len,
            includes,
            excludes,
            includes_must: mask.pins().collect(),
            includes_not,
            includes_count,
        };
        debug!(
            "constraints: includes={} excludes={} must={:?} not={:?} counts={:?}",
            constraints.includes,
            constraints.excludes,
            constraints.includes_must,
            constraints.includes_not,
            constraints.includes_count
        );
        Ok(constraints)
    }

    /// Whether `word` satisfies every constraint, ignoring policy and
    /// restriction lists.
    pub fn matches(&self, word: &str) -> bool {
        let bytes = word.as_bytes();
        if bytes.len() != self.len {
            return false;
        }
        match LetterSet::from_word(bytes) {
            Some(letters) => self.matches_letters(bytes, &letters),
            None => false,
        }
    }

    pub(crate) fn matches_letters(&self, word: &[u8], letters: &LetterSet) -> bool {
        if !letters.is_disjoint(&self.excludes) || !self.includes.is_subset(letters) {
            return false;
        }

        if self.includes_not.iter().any(|&(pos, c)| word[pos] == c) {
            return false;
        }

        if self.includes_must.iter().any(|&(pos, c)| word[pos] != c) {
            return false;
        }

        self.includes_count
            .iter()
            .all(|(&c, &n)| word.iter().filter(|&&b| b == c).count() >= n)
    }
}
