// this_file: backends/ubidi-core/src/lib.rs

//! Core traits and types for the ubidi analysis engine.

pub mod constants;
pub mod diagnostics;
pub mod error;
pub mod options;
pub mod traits;
pub mod types;
pub mod utils;

pub use diagnostics::{AnalysisDiagnostics, WriteDiagnostics};
pub use error::{AnalysisStatus, BidiError};
pub use options::{
    BidiConfig, ParaLevel, ParagraphOptions, ReorderingMode, ReorderingOptions, WriteOptions,
};
pub use traits::BidiClassifier;
pub use types::{
    BidiClass, BracketType, Direction, Level, LogicalRun, ParagraphInfo, VisualRun,
};

/// Result type for ubidi operations
pub type Result<T> = std::result::Result<T, BidiError>;
