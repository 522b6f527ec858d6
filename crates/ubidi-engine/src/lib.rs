// this_file: crates/ubidi-engine/src/lib.rs

//! Bidi paragraph analysis: level resolution, run segmentation, index mapping
//! and reordered output.
//!
//! ```
//! use ubidi_engine::{BidiConfig, BidiUnit, Direction, Paragraph, WriteOptions};
//!
//! let paragraph = Paragraph::new("abc \u{5d0}\u{5d1}\u{5d2}", BidiConfig::new()).unwrap();
//! assert_eq!(paragraph.direction(), Direction::Mixed);
//! assert_eq!(paragraph.count_runs(), 2);
//! assert_eq!(
//!     paragraph.write_reordered(WriteOptions::empty()),
//!     "abc \u{5d2}\u{5d1}\u{5d0}"
//! );
//! ```

mod layout;
mod line;
mod paragraph;
mod resolver;
mod runs;
mod text;
mod unit;
mod writer;

#[cfg(test)]
mod testing;

pub use line::Line;
pub use paragraph::Paragraph;
pub use unit::{BidiUnit, UnitState};

pub use ubidi_core::{
    AnalysisStatus, BidiClass, BidiClassifier, BidiConfig, BidiError, Direction, Level,
    LogicalRun, ParaLevel, ParagraphInfo, ParagraphOptions, ReorderingMode, ReorderingOptions,
    Result, VisualRun, WriteOptions,
};

use ubidi_icu::IcuClassifier;

/// Direction of the first strong character of `text`.
///
/// Returns [`Direction::Neutral`] when the text has no strong character.
pub fn base_direction(text: &str) -> Direction {
    base_direction_with(text, IcuClassifier::shared().as_ref())
}

/// [`base_direction`] with a caller-supplied classifier.
pub fn base_direction_with(text: &str, classifier: &dyn BidiClassifier) -> Direction {
    text.chars()
        .find_map(|ch| match classifier.bidi_class(ch) {
            BidiClass::L => Some(Direction::Ltr),
            BidiClass::R | BidiClass::AL => Some(Direction::Rtl),
            _ => None,
        })
        .unwrap_or(Direction::Neutral)
}
