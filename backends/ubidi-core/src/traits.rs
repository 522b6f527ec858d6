// this_file: backends/ubidi-core/src/traits.rs

//! Trait definitions for the Unicode property data the engine consumes.

use crate::types::{BidiClass, BracketType};

/// Source of the character properties the bidi algorithm needs.
///
/// Implementations must be cheap to query and safe to share between threads.
pub trait BidiClassifier: Send + Sync {
    /// Bidi_Class of a character.
    fn bidi_class(&self, ch: char) -> BidiClass;

    /// Bidi_Mirroring_Glyph of a character, if it has one.
    fn mirror(&self, ch: char) -> Option<char>;

    /// Bidi_Paired_Bracket_Type of a character with its paired bracket.
    fn bracket(&self, ch: char) -> BracketType;

    /// Whether the character is a combining mark (Mn, Mc or Me).
    fn is_combining_mark(&self, ch: char) -> bool;

    /// Short name used in diagnostics.
    fn name(&self) -> &'static str {
        "custom"
    }
}
