//! Loader and assembler errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssemblerError {
    #[error("Syntax error at line {line}, column {column}: {message}")]
    SyntaxError {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Unknown instruction: {0}")]
    UnknownInstruction(String),

    #[error("Invalid operand: {0}")]
    InvalidOperand(String),

    #[error("Wrong operand count for {mnemonic}: expected {expected}, found {found}")]
    OperandCount {
        mnemonic: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid directive: {0}")]
    InvalidDirective(String),

    #[error("Line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<AssemblerError>,
    },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AssemblerError {
    /// Attach a 1-based source line to an error raised by the line parser
    pub fn at_line(self, line: usize) -> Self {
        match self {
            AssemblerError::SyntaxError { column, message, .. } => AssemblerError::SyntaxError {
                line,
                column,
                message,
            },
            other => AssemblerError::AtLine {
                line,
                source: Box::new(other),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, AssemblerError>;

/// Program text errors
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Number out of range at offset {offset}: {text}")]
    NumberOutOfRange { offset: usize, text: String },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_line_rewrites_syntax_error() {
        let err = AssemblerError::SyntaxError {
            line: 0,
            column: 4,
            message: "Expected operand".to_string(),
        }
        .at_line(7);
        assert_eq!(err.to_string(), "Syntax error at line 7, column 4: Expected operand");
    }

    #[test]
    fn test_at_line_wraps_other_errors() {
        let err = AssemblerError::UnknownInstruction("foo".to_string()).at_line(3);
        assert_eq!(err.to_string(), "Line 3: Unknown instruction: foo");
    }

    #[test]
    fn test_loader_error_display() {
        let err = LoaderError::NumberOutOfRange {
            offset: 6,
            text: "99999999999999999999".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Number out of range at offset 6: 99999999999999999999"
        );
    }
}
