// this_file: backends/ubidi-core/src/types.rs

//! Core types used throughout the ubidi analysis engine.

use crate::constants;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Embedding level of a code unit.
///
/// Even levels are left-to-right, odd levels right-to-left. Resolved levels
/// never exceed [`Level::MAX_IMPLICIT`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Level(u8);

impl Level {
    pub const LTR: Level = Level(constants::LTR);
    pub const RTL: Level = Level(constants::RTL);
    /// Deepest level reachable through explicit embeddings.
    pub const MAX_EXPLICIT: Level = Level(constants::MAX_EXPLICIT_LEVEL);
    /// Deepest level reachable after the implicit rules.
    pub const MAX_IMPLICIT: Level = Level(constants::MAX_EXPLICIT_LEVEL + 1);

    /// Create a level, rejecting values above [`Level::MAX_IMPLICIT`].
    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX_IMPLICIT.0).then_some(Level(value))
    }

    /// Create an explicit level, rejecting values above [`Level::MAX_EXPLICIT`].
    pub fn explicit(value: u8) -> Option<Self> {
        (value <= Self::MAX_EXPLICIT.0).then_some(Level(value))
    }

    /// Create a level, clamping to [`Level::MAX_IMPLICIT`].
    pub const fn clamped(value: u8) -> Self {
        if value > Self::MAX_IMPLICIT.0 {
            Self::MAX_IMPLICIT
        } else {
            Level(value)
        }
    }

    /// Raw level number.
    pub fn number(self) -> u8 {
        self.0
    }

    pub fn is_ltr(self) -> bool {
        self.0 & 1 == 0
    }

    pub fn is_rtl(self) -> bool {
        self.0 & 1 == 1
    }

    /// Direction of text at this level.
    pub fn direction(self) -> Direction {
        if self.is_rtl() {
            Direction::Rtl
        } else {
            Direction::Ltr
        }
    }

    /// Smallest odd level greater than this one.
    pub fn next_rtl(self) -> Level {
        Level((self.0 + 1) | 1)
    }

    /// Smallest even level greater than this one.
    pub fn next_ltr(self) -> Level {
        Level((self.0 + 2) & !1)
    }

    /// Level raised by `by`, clamped to [`Level::MAX_IMPLICIT`].
    pub fn raised(self, by: u8) -> Level {
        Level(self.0.saturating_add(by).min(Self::MAX_IMPLICIT.0))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Level {
    type Error = u8;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        Level::new(value).ok_or(value)
    }
}

/// Overall direction of a paragraph, line or run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
    Mixed,
    Neutral,
}

impl Direction {
    /// Lowercase name used by hosts ("ltr", "rtl", "mixed", "neutral").
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
            Direction::Mixed => "mixed",
            Direction::Neutral => "neutral",
        }
    }

    /// Stable numeric code, see [`constants::DIRECTION_LTR`] and friends.
    pub fn code(self) -> u8 {
        match self {
            Direction::Ltr => constants::DIRECTION_LTR,
            Direction::Rtl => constants::DIRECTION_RTL,
            Direction::Mixed => constants::DIRECTION_MIXED,
            Direction::Neutral => constants::DIRECTION_NEUTRAL,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bidi_Class property values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BidiClass {
    /// Left-to-right
    L,
    /// Right-to-left
    R,
    /// Arabic letter
    AL,
    /// European number
    EN,
    /// European separator
    ES,
    /// European terminator
    ET,
    /// Arabic number
    AN,
    /// Common separator
    CS,
    /// Nonspacing mark
    NSM,
    /// Boundary neutral
    BN,
    /// Paragraph separator
    B,
    /// Segment separator
    S,
    /// Whitespace
    WS,
    /// Other neutral
    ON,
    LRE,
    LRO,
    RLE,
    RLO,
    PDF,
    LRI,
    RLI,
    FSI,
    PDI,
}

impl BidiClass {
    /// L, R or AL.
    pub fn is_strong(self) -> bool {
        matches!(self, BidiClass::L | BidiClass::R | BidiClass::AL)
    }

    /// Characters that rule X9 removes from resolution.
    pub fn is_removed_by_x9(self) -> bool {
        matches!(
            self,
            BidiClass::RLE
                | BidiClass::LRE
                | BidiClass::RLO
                | BidiClass::LRO
                | BidiClass::PDF
                | BidiClass::BN
        )
    }

    pub fn is_isolate_initiator(self) -> bool {
        matches!(self, BidiClass::LRI | BidiClass::RLI | BidiClass::FSI)
    }

    /// Neutral or isolate formatter, the set rules N1 and N2 operate on.
    pub fn is_neutral_or_isolate(self) -> bool {
        matches!(
            self,
            BidiClass::B
                | BidiClass::S
                | BidiClass::WS
                | BidiClass::ON
                | BidiClass::LRI
                | BidiClass::RLI
                | BidiClass::FSI
                | BidiClass::PDI
        )
    }

    /// Whitespace-like characters reset to paragraph level by rule L1.
    pub fn is_trailing_whitespace(self) -> bool {
        matches!(
            self,
            BidiClass::WS
                | BidiClass::LRI
                | BidiClass::RLI
                | BidiClass::FSI
                | BidiClass::PDI
        ) || self.is_removed_by_x9()
    }

    pub fn is_number(self) -> bool {
        matches!(self, BidiClass::EN | BidiClass::AN)
    }
}

/// Bidi_Paired_Bracket_Type with the paired bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BracketType {
    Open(char),
    Close(char),
    #[default]
    None,
}

/// A maximal span of one embedding level, in visual order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualRun {
    /// `Ltr` for even levels, `Rtl` for odd ones
    #[serde(rename = "dir")]
    pub direction: Direction,
    /// First logical code unit of the run
    pub logical_start: usize,
    /// Number of code units in the run
    pub length: usize,
}

impl VisualRun {
    pub fn logical_limit(&self) -> usize {
        self.logical_start + self.length
    }
}

/// The run containing a logical position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalRun {
    /// Exclusive end of the run
    pub limit: usize,
    /// Embedding level of the run
    pub level: Level,
}

/// One paragraph of a multi-paragraph text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphInfo {
    /// Zero-based paragraph index
    pub index: usize,
    /// First code unit
    pub start: usize,
    /// Exclusive end, including the paragraph separator
    pub limit: usize,
    /// Resolved paragraph embedding level
    pub level: Level,
    /// Direction of the paragraph's levels
    pub direction: Direction,
}

impl ParagraphInfo {
    pub fn contains(&self, index: usize) -> bool {
        (self.start..self.limit).contains(&index)
    }
}
