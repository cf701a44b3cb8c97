//! Memory subsystem
//!
//! Memory is conceptually an infinite zero-initialized array of words. The
//! loaded program occupies a dense segment starting at address zero; writes
//! past its end go to a sparse map. A zero written to the sparse map removes
//! the entry, so equal logical contents always compare equal.

use std::collections::HashMap;

use intcode_spec::Word;

use crate::error::{Result, RuntimeError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Memory {
    dense: Vec<Word>,
    sparse: HashMap<Word, Word>,
}

impl Memory {
    /// Memory holding `words` at addresses `0..words.len()`
    pub fn new(words: Vec<Word>) -> Self {
        Memory {
            dense: words,
            sparse: HashMap::new(),
        }
    }

    #[inline]
    fn dense_index(&self, address: Word) -> Result<Option<usize>> {
        if address < 0 {
            return Err(RuntimeError::NegativeAddress { address });
        }
        Ok(usize::try_from(address)
            .ok()
            .filter(|&index| index < self.dense.len()))
    }

    /// Read a word; never-written cells read as zero
    pub fn read(&self, address: Word) -> Result<Word> {
        match self.dense_index(address)? {
            Some(index) => Ok(self.dense[index]),
            None => Ok(self.sparse.get(&address).copied().unwrap_or(0)),
        }
    }

    /// Write a word
    pub fn write(&mut self, address: Word, word: Word) -> Result<()> {
        match self.dense_index(address)? {
            Some(index) => self.dense[index] = word,
            None if word == 0 => {
                self.sparse.remove(&address);
            }
            None => {
                self.sparse.insert(address, word);
            }
        }
        Ok(())
    }

    /// Length of the dense segment
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    /// Whether the dense segment is empty; agrees with [`Memory::len`]
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// Number of nonzero cells beyond the dense segment
    pub fn sparse_len(&self) -> usize {
        self.sparse.len()
    }

    /// The dense segment
    pub fn words(&self) -> &[Word] {
        &self.dense
    }

    /// Nonzero cells beyond the dense segment, by ascending address
    pub fn sparse_entries(&self) -> Vec<(Word, Word)> {
        let mut entries: Vec<(Word, Word)> = self.sparse.iter().map(|(&a, &w)| (a, w)).collect();
        entries.sort_unstable();
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_read_write() {
        let mut mem = Memory::new(vec![1, 2, 3]);
        assert_eq!(mem.read(1).unwrap(), 2);
        mem.write(1, 0).unwrap();
        assert_eq!(mem.read(1).unwrap(), 0);
        assert_eq!(mem.len(), 3);
        assert_eq!(mem.sparse_len(), 0);
    }

    #[test]
    fn test_sparse_extension() {
        let mut mem = Memory::new(vec![99]);
        assert_eq!(mem.read(1_000_000).unwrap(), 0);
        assert_eq!(mem.sparse_len(), 0);

        mem.write(1_000_000, 42).unwrap();
        assert_eq!(mem.read(1_000_000).unwrap(), 42);
        assert_eq!(mem.sparse_len(), 1);
        assert_eq!(mem.len(), 1);
    }

    #[test]
    fn test_zero_write_removes_sparse_entry() {
        let mut a = Memory::new(vec![1, 2]);
        let b = a.clone();
        a.write(10, 5).unwrap();
        assert_ne!(a, b);
        a.write(10, 0).unwrap();
        assert_eq!(a.sparse_len(), 0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_negative_address() {
        let mut mem = Memory::new(vec![0; 4]);
        assert_eq!(
            mem.read(-1).unwrap_err(),
            RuntimeError::NegativeAddress { address: -1 }
        );
        assert!(mem.write(-5, 1).is_err());
    }

    #[test]
    fn test_sparse_entries() {
        let mut mem = Memory::new(vec![1, 2]);
        assert!(mem.sparse_entries().is_empty());
        mem.write(5, 7).unwrap();
        mem.write(3, 9).unwrap();
        mem.write(1, 4).unwrap();
        assert_eq!(mem.sparse_entries(), vec![(3, 9), (5, 7)]);
    }

    #[test]
    fn test_far_address() {
        let far: Word = 1 << 62;
        let mut mem = Memory::new(vec![99]);
        mem.write(far, 7).unwrap();
        mem.write(Word::MAX, -1).unwrap();
        assert_eq!(mem.read(far).unwrap(), 7);
        assert_eq!(mem.sparse_entries(), vec![(far, 7), (Word::MAX, -1)]);
        assert_eq!(mem.len(), 1);
    }

    #[test]
    fn test_empty_memory() {
        let mut mem = Memory::default();
        assert!(mem.is_empty());
        assert_eq!(mem.len(), 0);

        // Cells past an empty dense segment are sparse
        mem.write(0, 1).unwrap();
        assert_eq!(mem.read(0).unwrap(), 1);
        assert_eq!(mem.sparse_len(), 1);
        assert_eq!(mem.is_empty(), mem.len() == 0);
    }
}
