//! Error types for the handheld console.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// `line` is 1-based within program text, or 0 for a standalone line.
    #[error("Invalid instruction on line {line} ({text:?}): {reason}")]
    InvalidInstruction {
        line: usize,
        text: String,
        reason: String,
    },

    #[error("Cannot flip instruction `{instruction}`{}", index_suffix(.index))]
    UnflippableInstruction {
        index: Option<usize>,
        instruction: String,
    },

    #[error("No fix found after trying {candidates} candidate programs")]
    NoFixFound { candidates: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

fn index_suffix(index: &Option<usize>) -> String {
    index.map(|i| format!(" at index {}", i)).unwrap_or_default()
}

impl Error {
    pub fn invalid_instruction(line: usize, text: &str, reason: impl Into<String>) -> Self {
        Error::InvalidInstruction {
            line,
            text: text.to_string(),
            reason: reason.into(),
        }
    }

    /// Re-tags a standalone parse error with its line number in program text.
    pub fn at_line(self, line: usize) -> Self {
        match self {
            Error::InvalidInstruction { text, reason, .. } => {
                Error::InvalidInstruction { line, text, reason }
            }
            other => other,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_line_retags_invalid_instruction() {
        let err = Error::invalid_instruction(0, "xyz +1", "unknown mnemonic").at_line(7);
        match err {
            Error::InvalidInstruction { line, text, .. } => {
                assert_eq!(line, 7);
                assert_eq!(text, "xyz +1");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_at_line_leaves_other_errors_alone() {
        let err = Error::NoFixFound { candidates: 3 }.at_line(2);
        assert!(matches!(err, Error::NoFixFound { candidates: 3 }));
    }

    #[test]
    fn test_error_messages() {
        let err = Error::UnflippableInstruction {
            index: Some(4),
            instruction: "acc +3".to_string(),
        };
        assert_eq!(err.to_string(), "Cannot flip instruction `acc +3` at index 4");

        let err = Error::UnflippableInstruction {
            index: None,
            instruction: "acc -1".to_string(),
        };
        assert_eq!(err.to_string(), "Cannot flip instruction `acc -1`");

        let err = Error::NoFixFound { candidates: 0 };
        assert_eq!(err.to_string(), "No fix found after trying 0 candidate programs");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
