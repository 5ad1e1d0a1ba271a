use thiserror::Error;

#[derive(Debug, Error)]
pub enum EliminationError {
    #[error("unknown team: {0}")]
    UnknownTeam(String),

    #[error("malformed season input: {0}")]
    MalformedInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EliminationError {
    /// Create an unknown team error
    pub fn unknown_team(name: impl Into<String>) -> Self {
        Self::UnknownTeam(name.into())
    }

    /// Create a malformed input error with context
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    /// Prefix a malformed input error with the 1-based line it came from.
    pub(crate) fn at_line(self, line: usize) -> Self {
        match self {
            Self::MalformedInput(msg) => Self::MalformedInput(format!("line {line}: {msg}")),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, EliminationError>;
