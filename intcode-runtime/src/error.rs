//! Runtime error types for the Intcode machine

use intcode_spec::{IntcodeError, Word};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("Spec error: {0}")]
    Spec(#[from] IntcodeError),

    #[error("Negative address: {address}")]
    NegativeAddress { address: Word },

    #[error("Address overflow: {base} + {offset}")]
    AddressOverflow { base: Word, offset: Word },

    #[error("Immediate mode used for a destination parameter")]
    ImmediateDestination,

    #[error("Arithmetic overflow: {a} {op} {b}")]
    ArithmeticOverflow { op: char, a: Word, b: Word },

    #[error("No output queued")]
    EmptyOutput,

    #[error("Input exhausted at pc {pc}")]
    InputExhausted { pc: Word },

    #[error("Fault at pc {pc} (word {word}): {source}")]
    Fault {
        pc: Word,
        word: Word,
        #[source]
        source: Box<RuntimeError>,
    },
}

impl RuntimeError {
    /// The underlying error, looking through any `Fault` wrapper
    pub fn root(&self) -> &RuntimeError {
        match self {
            RuntimeError::Fault { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_address_display() {
        let err = RuntimeError::NegativeAddress { address: -3 };
        assert_eq!(err.to_string(), "Negative address: -3");
    }

    #[test]
    fn test_overflow_display() {
        let err = RuntimeError::ArithmeticOverflow {
            op: '*',
            a: i64::MAX,
            b: 2,
        };
        assert_eq!(err.to_string(), "Arithmetic overflow: 9223372036854775807 * 2");
    }

    #[test]
    fn test_fault_display() {
        let err = RuntimeError::Fault {
            pc: 4,
            word: 11101,
            source: Box::new(RuntimeError::ImmediateDestination),
        };
        assert_eq!(
            err.to_string(),
            "Fault at pc 4 (word 11101): Immediate mode used for a destination parameter"
        );
        assert_eq!(err.root(), &RuntimeError::ImmediateDestination);
    }

    #[test]
    fn test_spec_error_from() {
        let runtime_err: RuntimeError = IntcodeError::InvalidOpcode(42).into();
        assert!(runtime_err.to_string().contains("Invalid opcode"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RuntimeError>();
    }
}
