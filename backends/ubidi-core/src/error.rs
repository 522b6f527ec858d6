// this_file: backends/ubidi-core/src/error.rs

//! Error types for ubidi operations.

use std::fmt;
use thiserror::Error;

/// Low-level reason an analysis could not run.
///
/// Codes follow ICU's `UErrorCode` numbering so hosts can map them directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisStatus {
    /// Input could not be processed as given (text too long)
    IllegalArgument,
    /// A working buffer could not be allocated
    MemoryAllocation,
    /// An index fell outside its valid range
    IndexOutOfBounds,
}

impl AnalysisStatus {
    pub fn code(self) -> i32 {
        match self {
            AnalysisStatus::IllegalArgument => 1,
            AnalysisStatus::MemoryAllocation => 7,
            AnalysisStatus::IndexOutOfBounds => 8,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AnalysisStatus::IllegalArgument => "U_ILLEGAL_ARGUMENT_ERROR",
            AnalysisStatus::MemoryAllocation => "U_MEMORY_ALLOCATION_ERROR",
            AnalysisStatus::IndexOutOfBounds => "U_INDEX_OUTOFBOUNDS_ERROR",
        }
    }
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

/// Main error type for ubidi operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BidiError {
    /// Analysis could not be performed
    #[error("The bidi algorithm failed: {status}")]
    Analysis { status: AnalysisStatus },

    /// Line bounds are empty or exceed the paragraph
    #[error("Invalid line range [{start}, {limit}) for text of length {length}")]
    InvalidLineRange {
        start: usize,
        limit: usize,
        length: usize,
    },

    /// Line spans more than one paragraph
    #[error("Line range [{start}, {limit}) crosses a paragraph boundary at {boundary}")]
    LineCrossesParagraph {
        start: usize,
        limit: usize,
        boundary: usize,
    },

    /// Logical or visual position outside the valid domain
    #[error("Index {index} out of bounds (limit {limit})")]
    IndexOutOfRange { index: usize, limit: usize },

    /// Visual run index beyond the run count
    #[error("Run index out of bounds: {index} (run count {count})")]
    RunIndexOutOfRange { index: usize, count: usize },

    /// Paragraph index beyond the paragraph count
    #[error("Paragraph index out of bounds: {index} (paragraph count {count})")]
    ParagraphIndexOutOfRange { index: usize, count: usize },
}

impl BidiError {
    /// Shorthand for [`BidiError::Analysis`].
    pub fn analysis(status: AnalysisStatus) -> Self {
        BidiError::Analysis { status }
    }

    /// Check `index < limit`.
    pub fn check_index(index: usize, limit: usize) -> Result<usize> {
        if index < limit {
            Ok(index)
        } else {
            Err(BidiError::IndexOutOfRange { index, limit })
        }
    }
}

/// Specialized Result type for ubidi operations.
pub type Result<T> = std::result::Result<T, BidiError>;
