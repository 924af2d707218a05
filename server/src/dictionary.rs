//! Word list used to validate submissions and seed board generation
//!
//! The dictionary is loaded once at startup and shared read-only by every game.
//! Entries are trimmed and upper-cased; duplicates collapse and blank lines are
//! skipped.

use crate::error::DictionaryError;
use log::{error, info};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Word list shipped with the server
const BUNDLED_WORDS: &str = include_str!("../assets/words.txt");

#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: HashSet<String>,
    /// Same entries in sorted order, so seeded board generation is reproducible
    ordered: Vec<String>,
}

impl Dictionary {
    /// Builds a dictionary from in-memory entries
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: HashSet<String> = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_uppercase())
            .filter(|word| !word.is_empty())
            .collect();

        let mut ordered: Vec<String> = words.iter().cloned().collect();
        ordered.sort_unstable();

        Self { words, ordered }
    }

    /// Parses a line-oriented word list
    pub fn parse(content: &str) -> Self {
        Self::from_words(content.lines())
    }

    /// The word list compiled into the binary
    pub fn bundled() -> Self {
        Self::parse(BUNDLED_WORDS)
    }

    /// Reads a word list from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| DictionaryError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let dictionary = Self::parse(&content);
        info!("Loaded {} words from {}", dictionary.len(), path.display());
        Ok(dictionary)
    }

    /// Reads a word list, falling back to an empty dictionary on failure.
    /// Every submission will then be refused as "not in dictionary".
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(dictionary) => dictionary,
            Err(e) => {
                error!("Error loading dictionary: {}", e);
                Self::default()
            }
        }
    }

    /// Case-insensitive membership test
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.trim().to_uppercase())
    }

    /// All words, sorted
    pub fn words(&self) -> &[String] {
        &self.ordered
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
