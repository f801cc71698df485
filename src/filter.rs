//! Candidate filtering.
//!
//! Applies a [`ConstraintSet`] plus the user's policy to a word source and
//! returns the surviving words ordered by ascending frequency, so the best
//! guess is last.

use crate::constraints::{ConstraintSet, LetterSet, WordMask};
use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::solver::Selection;
use crate::VOWELS;
use log::debug;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Options that shape which words are offered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Policy {
    /// Only words with no repeated letters
    pub unique: bool,
    /// Only words with at least this many distinct vowels
    pub min_vowels: Option<usize>,
    /// How the solver picks its next guess
    pub selection: Selection,
}

/// Optional allow and deny lists. Empty lists restrict nothing.
///
/// The sets are shared snapshots, usually straight from a
/// [`DictionaryCache`](crate::DictionaryCache).
#[derive(Debug, Clone, Default)]
pub struct Restrictions {
    pub allow: Arc<HashSet<String>>,
    pub deny: Arc<HashSet<String>>,
}

impl Restrictions {
    pub fn new(allow: impl Into<Arc<HashSet<String>>>, deny: impl Into<Arc<HashSet<String>>>) -> Self {
        Self {
            allow: allow.into(),
            deny: deny.into(),
        }
    }

    pub fn permits(&self, word: &str) -> bool {
        (self.allow.is_empty() || self.allow.contains(word)) && !self.deny.contains(word)
    }
}

/// Filter `words` down to the candidates satisfying `constraints`.
///
/// Checks run cheapest first and stop at the first failure. A word seen more
/// than once keeps its highest frequency. Equal frequencies are ordered
/// alphabetically.
pub fn filter_candidates<'a, I>(
    constraints: &ConstraintSet,
    words: I,
    restrictions: &Restrictions,
    policy: &Policy,
) -> Vec<(String, u64)>
where
    I: IntoIterator<Item = (&'a str, u64)>,
{
    let vowels: LetterSet = VOWELS.iter().copied().collect();
    let mut candidates: HashMap<&str, u64> = HashMap::new();

    for (word, freq) in words {
        let bytes = word.as_bytes();
        if bytes.len() != constraints.len || !restrictions.permits(word) {
            continue;
        }

        let letters = match LetterSet::from_word(bytes) {
            Some(letters) => letters,
            None => continue,
        };

        if policy.unique && letters.len() != constraints.len {
            continue;
        }

        if let Some(min) = policy.min_vowels {
            if letters.intersection(&vowels).len() < min {
                continue;
            }
        }

        if !constraints.matches_letters(bytes, &letters) {
            continue;
        }

        let existing = candidates.entry(word).or_insert(freq);
        *existing = (*existing).max(freq);
    }

    let mut sorted: Vec<(String, u64)> = candidates
        .into_iter()
        .map(|(w, f)| (w.to_string(), f))
        .collect();
    sorted.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

    debug!("{} candidates of length {}", sorted.len(), constraints.len);
    sorted
}

/// Candidates for `history` against `mask`, in ascending frequency order.
pub fn get_words<S: AsRef<str>>(
    history: &[S],
    mask: &WordMask,
    dictionary: &Dictionary,
    restrictions: &Restrictions,
    policy: &Policy,
) -> Result<Vec<(String, u64)>> {
    let constraints = ConstraintSet::build(history, mask)?;
    Ok(filter_candidates(
        &constraints,
        dictionary.of_length(mask.len()),
        restrictions,
        policy,
    ))
}
