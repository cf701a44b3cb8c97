//! I/O devices
//!
//! A device is a FIFO of words. The machine pops from its input device when
//! an IN executes and pushes to its output device on OUT; drivers do the
//! opposite.

use std::collections::VecDeque;

use intcode_spec::Word;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Device {
    queue: VecDeque<Word>,
}

impl Device {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, word: Word) {
        self.queue.push_back(word);
    }

    /// Queue one word per character
    pub fn push_str(&mut self, text: &str) {
        self.queue.extend(text.chars().map(|c| c as Word));
    }

    pub fn pop(&mut self) -> Option<Word> {
        self.queue.pop_front()
    }

    pub fn front(&self) -> Option<Word> {
        self.queue.front().copied()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Remove and return everything queued
    pub fn drain(&mut self) -> Vec<Word> {
        self.queue.drain(..).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.queue.iter()
    }
}

impl Extend<Word> for Device {
    fn extend<I: IntoIterator<Item = Word>>(&mut self, iter: I) {
        self.queue.extend(iter);
    }
}

impl FromIterator<Word> for Device {
    fn from_iter<I: IntoIterator<Item = Word>>(iter: I) -> Self {
        Device {
            queue: iter.into_iter().collect(),
        }
    }
}
