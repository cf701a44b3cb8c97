//! ASCII text protocol
//!
//! Some programs talk in text: they emit one character per output word and
//! read commands as one character per input word, each command ending with a
//! newline. Words outside the ASCII range carry numeric answers.

use std::fmt;

use intcode_spec::{Program, Word, MAX_ASCII};

use crate::error::Result;
use crate::vm::Machine;

/// Output collected from one exchange
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AsciiOutput {
    /// The ASCII words as text
    pub text: String,
    /// Words outside `0..=127`, in order
    pub values: Vec<Word>,
}

impl AsciiOutput {
    pub fn from_words(words: impl IntoIterator<Item = Word>) -> Self {
        let mut out = AsciiOutput::default();
        for word in words {
            match u8::try_from(word) {
                Ok(byte) if word <= MAX_ASCII => out.text.push(byte as char),
                _ => out.values.push(word),
            }
        }
        out
    }

    /// The last non-ASCII word, usually the answer
    pub fn value(&self) -> Option<Word> {
        self.values.last().copied()
    }
}

impl fmt::Display for AsciiOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)?;
        for value in &self.values {
            writeln!(f, "{}", value)?;
        }
        Ok(())
    }
}

/// Line-oriented session with a machine
#[derive(Debug, Clone)]
pub struct AsciiTerminal {
    machine: Machine,
}

impl AsciiTerminal {
    pub fn new(program: &Program) -> Self {
        Self::from_machine(Machine::new(program))
    }

    pub fn from_machine(machine: Machine) -> Self {
        AsciiTerminal { machine }
    }

    /// Run until the machine halts or wants input, and collect its output
    pub fn read(&mut self) -> Result<AsciiOutput> {
        self.machine.run_to_completion()?;
        Ok(AsciiOutput::from_words(self.machine.drain_output()))
    }

    /// Send one line and read the reply
    pub fn command(&mut self, line: &str) -> Result<AsciiOutput> {
        tracing::debug!(line, "ascii command");
        self.machine.push_line(line);
        self.read()
    }

    /// Send each line in turn; returns the reply to the last one
    pub fn run_script<'a>(&mut self, lines: impl IntoIterator<Item = &'a str>) -> Result<AsciiOutput> {
        let mut reply = self.read()?;
        for line in lines {
            reply = self.command(line)?;
        }
        Ok(reply)
    }

    pub fn is_halted(&self) -> bool {
        self.machine.is_halted()
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn into_machine(self) -> Machine {
        self.machine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Copies input to output forever
    const ECHO: &[Word] = &[3, 100, 4, 100, 1105, 1, 0];

    #[test]
    fn test_output_split() {
        let out = AsciiOutput::from_words([79, 75, 10, 1000, -1, 127, 128]);
        assert_eq!(out.text, "OK\n\u{7f}");
        assert_eq!(out.values, vec![1000, -1, 128]);
        assert_eq!(out.value(), Some(128));
    }

    #[test]
    fn test_read_mixed_output() {
        let program = Program::new(vec![104, 79, 104, 75, 104, 10, 104, 1000, 99]);
        let mut term = AsciiTerminal::new(&program);
        let out = term.read().unwrap();
        assert_eq!(out.text, "OK\n");
        assert_eq!(out.values, vec![1000]);
        assert!(term.is_halted());
        assert_eq!(out.to_string(), "OK\n1000\n");
    }

    #[test]
    fn test_command_echo() {
        let mut term = AsciiTerminal::new(&Program::new(ECHO.to_vec()));
        assert_eq!(term.read().unwrap().text, "");
        assert_eq!(term.command("hi").unwrap().text, "hi\n");
        assert!(!term.is_halted());
    }

    #[test]
    fn test_run_script_returns_last_reply() {
        let mut term = AsciiTerminal::new(&Program::new(ECHO.to_vec()));
        let out = term.run_script(["NOT A J", "WALK"]).unwrap();
        assert_eq!(out.text, "WALK\n");
        assert_eq!(term.machine().steps() % 3, 0);
    }
}
