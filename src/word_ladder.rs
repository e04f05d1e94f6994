//! Word ladders: step from one word to another, changing a single letter at
//! a time, where every intermediate word must be in a given word set.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashSet;

use crate::error::{PuzzleError, Result};
use crate::puzzle::{display_key, Puzzle};

/// Set of allowed words, shared by every configuration of one ladder.
pub type WordSet = Rc<FxHashSet<String>>;

/// A word ladder configuration.
#[derive(Clone, Debug)]
pub struct WordLadder {
    from: String,
    to: Rc<str>,
    words: WordSet,
}

impl WordLadder {
    /// Creates a ladder from `from` to `to` over the given words.
    pub fn new<I, S>(from: &str, to: &str, words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words = words.into_iter().map(Into::into).collect();
        Self::with_word_set(from, to, Rc::new(words))
    }

    /// Creates a ladder over an already shared word set.
    pub fn with_word_set(from: &str, to: &str, words: WordSet) -> Result<Self> {
        validate_word(from)?;
        validate_word(to)?;

        Ok(Self {
            from: from.to_owned(),
            to: to.into(),
            words,
        })
    }

    /// The word this configuration currently stands on.
    pub fn word(&self) -> &str {
        &self.from
    }

    pub fn target(&self) -> &str {
        &self.to
    }

    fn step_to(&self, word: &str) -> Self {
        Self {
            from: word.to_owned(),
            to: Rc::clone(&self.to),
            words: Rc::clone(&self.words),
        }
    }
}

/// Words are non-empty lowercase ascii, the alphabet the ladder substitutes
/// from.
fn validate_word(word: &str) -> Result<()> {
    if word.is_empty() || !word.bytes().all(|letter| letter.is_ascii_lowercase()) {
        return Err(PuzzleError::InvalidWord(word.to_owned()));
    }
    Ok(())
}

impl Puzzle for WordLadder {
    type Key = String;

    /// Every word in the set that differs from the current one in exactly
    /// one position, ordered by position, then by letter.
    fn extensions(&self) -> Vec<Self> {
        let mut extensions = Vec::new();
        let mut candidate = self.from.clone().into_bytes();

        for index in 0..candidate.len() {
            let original = candidate[index];
            for letter in b'a'..=b'z' {
                if letter == original {
                    continue;
                }
                candidate[index] = letter;
                if let Ok(word) = std::str::from_utf8(&candidate) {
                    if self.words.contains(word) {
                        extensions.push(self.step_to(word));
                    }
                }
            }
            candidate[index] = original;
        }

        extensions
    }

    fn is_solved(&self) -> bool {
        *self.from == *self.to
    }

    /// Substitutions keep the length, so a target of another length is out
    /// of reach.
    fn fail_fast(&self) -> bool {
        self.from.len() != self.to.len()
    }

    fn canonical_key(&self) -> String {
        display_key(self)
    }
}

impl PartialEq for WordLadder {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from
            && self.to == other.to
            && (Rc::ptr_eq(&self.words, &other.words) || self.words == other.words)
    }
}

impl Eq for WordLadder {}

impl fmt::Display for WordLadder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "From '{}' to '{}'", self.from, self.to)
    }
}
