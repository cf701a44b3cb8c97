//! Main assembler logic

use intcode_spec::{Program, Word};

use crate::encoder::encode;
use crate::error::{AssemblerError, Result};
use crate::parser::parse_instruction;

/// Assemble source text into a program image.
///
/// Each line holds one instruction or a `.word` directive listing raw words.
/// Text after `;` or `#` is a comment.
pub fn assemble(source: &str) -> Result<Program> {
    let mut words: Vec<Word> = Vec::new();

    for (line_num, line) in source.lines().enumerate() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }

        let encoded = if line.starts_with('.') {
            parse_directive(line)
        } else {
            parse_instruction(line).map(|instr| encode(&instr))
        };
        words.extend(encoded.map_err(|e| e.at_line(line_num + 1))?);
    }

    tracing::debug!(words = words.len(), "assembled program");
    Ok(Program::new(words))
}

fn strip_comment(line: &str) -> &str {
    match line.find([';', '#']) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_directive(line: &str) -> Result<Vec<Word>> {
    let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    if name != ".word" {
        return Err(AssemblerError::InvalidDirective(name.to_string()));
    }

    let rest = rest.trim();
    if rest.is_empty() {
        return Err(AssemblerError::SyntaxError {
            line: 0,
            column: line.len(),
            message: ".word needs at least one value".to_string(),
        });
    }

    rest.split(',')
        .map(|value| {
            let value = value.trim();
            value
                .parse::<Word>()
                .map_err(|_| AssemblerError::InvalidOperand(value.to_string()))
        })
        .collect()
}
