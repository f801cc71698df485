//! Word lists: the frequency dictionary, allow/deny word sets, and a
//! caller-owned cache of loaded lists.

use crate::error::{AidError, Result};
use log::info;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Words mapped to how common they are. Higher is more common.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: HashMap<String, u64>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `word, frequency` (or `word frequency`) lines.
    ///
    /// Lines that don't parse are skipped. Words are lower-cased.
    pub fn parse(text: &str) -> Self {
        let mut dictionary = Self::new();
        dictionary.extend_from_text(text);
        dictionary
    }

    /// Load and merge dictionary files.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut dictionary = Self::new();
        for path in paths {
            dictionary.extend_from_text(&read(path.as_ref())?);
        }
        Ok(dictionary)
    }

    fn extend_from_text(&mut self, text: &str) {
        for line in text.lines() {
            if let Some((word, freq)) = parse_line(line) {
                self.insert(&word, freq);
            }
        }
    }

    /// Add a word, keeping the higher frequency if it is already known.
    pub fn insert(&mut self, word: &str, freq: u64) {
        let existing = self.words.entry(word.to_lowercase()).or_insert(freq);
        *existing = (*existing).max(freq);
    }

    pub fn get(&self, word: &str) -> Option<u64> {
        self.words.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.words.iter().map(|(w, &f)| (w.as_str(), f))
    }

    /// Words of exactly `len` letters.
    pub fn of_length(&self, len: usize) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.iter().filter(move |(w, _)| w.len() == len)
    }
}

impl<'a> FromIterator<(&'a str, u64)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (&'a str, u64)>>(iter: I) -> Self {
        let mut dictionary = Self::new();
        for (word, freq) in iter {
            dictionary.insert(word, freq);
        }
        dictionary
    }
}

fn parse_line(line: &str) -> Option<(String, u64)> {
    let mut fields = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|f| !f.is_empty());
    let word = fields.next()?;
    let freq = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some((word.to_lowercase(), freq))
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| AidError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Collect the whitespace-separated words of `text`, lower-cased.
pub fn parse_word_set(text: &str) -> HashSet<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Load and merge word-set files.
pub fn load_word_set<P: AsRef<Path>>(paths: &[P]) -> Result<HashSet<String>> {
    let mut words = HashSet::new();
    for path in paths {
        words.extend(parse_word_set(&read(path.as_ref())?));
    }
    Ok(words)
}

/// Loaded word lists, keyed by the exact files they came from.
///
/// Owned by the caller and passed into each run, so a long-lived process
/// reuses loads without sharing state between unrelated callers. Entries are
/// immutable snapshots; [`DictionaryCache::reload`] swaps in a fresh one.
#[derive(Debug, Default)]
pub struct DictionaryCache {
    dictionaries: HashMap<Vec<PathBuf>, Arc<Dictionary>>,
    word_sets: HashMap<Vec<PathBuf>, Arc<HashSet<String>>>,
}

impl DictionaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The dictionary merged from `paths`, or the embedded one when empty.
    pub fn dictionary(&mut self, paths: &[PathBuf]) -> Result<Arc<Dictionary>> {
        if let Some(dictionary) = self.dictionaries.get(paths) {
            return Ok(Arc::clone(dictionary));
        }
        self.reload(paths)
    }

    /// Load the dictionary for `paths` again, replacing any cached copy.
    pub fn reload(&mut self, paths: &[PathBuf]) -> Result<Arc<Dictionary>> {
        let dictionary = if paths.is_empty() {
            crate::load_dictionary()
        } else {
            Dictionary::load(paths)?
        };
        info!("loaded {} dictionary words from {:?}", dictionary.len(), paths);
        let dictionary = Arc::new(dictionary);
        self.dictionaries
            .insert(paths.to_vec(), Arc::clone(&dictionary));
        Ok(dictionary)
    }

    /// The word set merged from `paths`; empty when no paths are given.
    pub fn word_set(&mut self, paths: &[PathBuf]) -> Result<Arc<HashSet<String>>> {
        if let Some(words) = self.word_sets.get(paths) {
            return Ok(Arc::clone(words));
        }
        let words = Arc::new(load_word_set(paths)?);
        if !paths.is_empty() {
            info!("loaded {} words from {:?}", words.len(), paths);
        }
        self.word_sets.insert(paths.to_vec(), Arc::clone(&words));
        Ok(words)
    }
}
