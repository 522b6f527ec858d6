// this_file: src/lib.rs

//! ubidi: Unicode bidirectional paragraph analysis.
//!
//! Resolves embedding levels with the Unicode Bidirectional Algorithm, splits
//! text into directional runs, maps between logical and visual positions and
//! writes text in display order. Every index counts UTF-16 code units.
//!
//! ```
//! use ubidi::{BidiUnit, ParagraphOptions, WriteOptions};
//!
//! let options = ParagraphOptions {
//!     para_level: Some(ubidi::constants::DEFAULT_RTL as i64),
//!     ..Default::default()
//! };
//! let paragraph = ubidi::analyze("\u{5e9}\u{5dc}\u{5d5}\u{5dd}!", &options).unwrap();
//! assert_eq!(paragraph.count_runs(), 1);
//! assert_eq!(
//!     paragraph.write_reordered(WriteOptions::empty()),
//!     "!\u{5dd}\u{5d5}\u{5dc}\u{5e9}"
//! );
//! ```

pub mod batch;
pub mod cache;
pub mod report;

pub use batch::{BatchAnalyzer, BatchItem, BatchResult};
pub use cache::{AnalysisCache, AnalysisKey, CacheStats};
pub use report::UnitReport;

pub use ubidi_core::{
    constants, AnalysisStatus, BidiClass, BidiClassifier, BidiConfig, BidiError, BracketType,
    Direction, Level, LogicalRun, ParaLevel, ParagraphInfo, ParagraphOptions, ReorderingMode,
    ReorderingOptions, Result, VisualRun, WriteOptions,
};
pub use ubidi_engine::{base_direction, base_direction_with, BidiUnit, Line, Paragraph};
pub use ubidi_icu::IcuClassifier;

/// Analyze `text` with host options, repairing invalid fields.
pub fn analyze(text: &str, options: &ParagraphOptions) -> Result<Paragraph> {
    Paragraph::new(text, BidiConfig::from_options(options))
}
