//! # Program Structure for Intcode
//!
//! A program is the initial memory image: an ordered, zero-indexed list of
//! words. Its text form is the words in decimal separated by commas.

use crate::Word;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// Complete program image
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Program {
    words: Vec<Word>,
}

impl Program {
    /// Create a program from its words
    pub fn new(words: Vec<Word>) -> Self {
        Self { words }
    }

    /// The words of the program, address 0 first
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn into_words(self) -> Vec<Word> {
        self.words
    }

    /// Number of words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Word at `address`, if inside the image
    pub fn get(&self, address: usize) -> Option<Word> {
        self.words.get(address).copied()
    }

    /// Overwrite one word of the image before it is loaded.
    ///
    /// Patching past the end grows the image with zeros.
    pub fn patch(&mut self, address: usize, word: Word) {
        if address >= self.words.len() {
            self.words.resize(address + 1, 0);
        }
        self.words[address] = word;
    }

    /// Builder form of [`Program::patch`]
    pub fn with_patch(mut self, address: usize, word: Word) -> Self {
        self.patch(address, word);
        self
    }
}

impl From<Vec<Word>> for Program {
    fn from(words: Vec<Word>) -> Self {
        Self::new(words)
    }
}

impl FromIterator<Word> for Program {
    fn from_iter<I: IntoIterator<Item = Word>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Index<usize> for Program {
    type Output = Word;

    fn index(&self, address: usize) -> &Word {
        &self.words[address]
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", word)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let program = Program::new(vec![1, 9, 10, 3, 2, 3, 11, 0, 99, 30, 40, 50]);
        assert_eq!(program.to_string(), "1,9,10,3,2,3,11,0,99,30,40,50");
    }

    #[test]
    fn test_display_negative_and_empty() {
        assert_eq!(Program::new(vec![1101, 100, -1, 4, 0]).to_string(), "1101,100,-1,4,0");
        assert_eq!(Program::default().to_string(), "");
    }

    #[test]
    fn test_patch() {
        let mut program = Program::new(vec![1, 0, 0, 3, 99]);
        program.patch(1, 12);
        program.patch(2, 2);
        assert_eq!(program.words(), &[1, 12, 2, 3, 99]);
    }

    #[test]
    fn test_patch_grows() {
        let program = Program::new(vec![99]).with_patch(3, 7);
        assert_eq!(program.words(), &[99, 0, 0, 7]);
        assert_eq!(program.len(), 4);
    }

    #[test]
    fn test_index_and_get() {
        let program: Program = vec![4, 5, 6].into();
        assert_eq!(program[1], 5);
        assert_eq!(program.get(2), Some(6));
        assert_eq!(program.get(3), None);
    }
}
