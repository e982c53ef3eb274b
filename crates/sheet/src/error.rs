use thiserror::Error;

/// Problems reported by strict validation and CSV export.
///
/// The default parse path never produces these.
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Document has no header row")]
    MissingHeader,

    #[error("Unterminated quote on line {line}")]
    UnterminatedQuote { line: usize },

    #[error("Row length mismatch on line {line}: expected {expected} fields, got {actual}")]
    RowLength {
        line: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Duplicate slug '{slug}' on line {line} (first seen on line {first_line})")]
    DuplicateSlug {
        slug: String,
        line: usize,
        first_line: usize,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SheetError {
    /// Physical line the issue was found on, when it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::UnterminatedQuote { line }
            | Self::RowLength { line, .. }
            | Self::DuplicateSlug { line, .. } => Some(*line),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
