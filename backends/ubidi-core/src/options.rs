// this_file: backends/ubidi-core/src/options.rs

//! Analysis configuration: paragraph level, reordering mode and option flags.
//!
//! [`ParagraphOptions`] is the loose record hosts hand over (JSON, CLI flags).
//! [`BidiConfig`] is the typed form the engine consumes. Converting between
//! them never fails: malformed fields fall back to defaults with a warning.

use crate::constants;
use crate::types::Level;
use bitflags::bitflags;
use log::warn;
use serde::{Deserialize, Serialize};

/// Requested paragraph embedding level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParaLevel {
    /// Fixed level in `0..=125`
    Explicit(Level),
    /// First strong character decides, LTR when there is none
    #[default]
    DefaultLtr,
    /// First strong character decides, RTL when there is none
    DefaultRtl,
}

impl ParaLevel {
    /// Decode a raw level: `0..=125`, [`constants::DEFAULT_LTR`] or [`constants::DEFAULT_RTL`].
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            constants::DEFAULT_LTR => Some(ParaLevel::DefaultLtr),
            constants::DEFAULT_RTL => Some(ParaLevel::DefaultRtl),
            value => Level::explicit(value).map(ParaLevel::Explicit),
        }
    }

    pub fn raw(self) -> u8 {
        match self {
            ParaLevel::Explicit(level) => level.number(),
            ParaLevel::DefaultLtr => constants::DEFAULT_LTR,
            ParaLevel::DefaultRtl => constants::DEFAULT_RTL,
        }
    }

    pub fn is_default(self) -> bool {
        !matches!(self, ParaLevel::Explicit(_))
    }

    /// Level used when no strong character decides.
    pub fn fallback(self) -> Level {
        match self {
            ParaLevel::Explicit(level) => level,
            ParaLevel::DefaultLtr => Level::LTR,
            ParaLevel::DefaultRtl => Level::RTL,
        }
    }
}

/// Reordering mode, matching the raw `REORDER_*` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum ReorderingMode {
    /// Plain bidi algorithm
    #[default]
    Default = constants::REORDER_DEFAULT,
    /// Numbers after R/AL text are treated as Arabic numbers
    NumbersSpecial = constants::REORDER_NUMBERS_SPECIAL,
    /// Numbers between L and R text group with the R text
    GroupNumbersWithR = constants::REORDER_GROUP_NUMBERS_WITH_R,
    /// Only whole runs are permuted; run contents keep logical order
    RunsOnly = constants::REORDER_RUNS_ONLY,
    /// Visual to logical, numbers resolved as L
    InverseNumbersAsL = constants::REORDER_INVERSE_NUMBERS_AS_L,
    /// Visual to logical with the regular algorithm
    InverseLikeDirect = constants::REORDER_INVERSE_LIKE_DIRECT,
    /// Visual to logical counterpart of `NumbersSpecial`
    InverseForNumbersSpecial = constants::REORDER_INVERSE_FOR_NUMBERS_SPECIAL,
}

impl ReorderingMode {
    pub const ALL: [ReorderingMode; constants::REORDER_COUNT as usize] = [
        ReorderingMode::Default,
        ReorderingMode::NumbersSpecial,
        ReorderingMode::GroupNumbersWithR,
        ReorderingMode::RunsOnly,
        ReorderingMode::InverseNumbersAsL,
        ReorderingMode::InverseLikeDirect,
        ReorderingMode::InverseForNumbersSpecial,
    ];

    pub fn from_raw(raw: u8) -> Option<Self> {
        Self::ALL.get(raw as usize).copied()
    }

    pub fn raw(self) -> u8 {
        self as u8
    }

    pub fn is_inverse(self) -> bool {
        matches!(
            self,
            ReorderingMode::InverseNumbersAsL
                | ReorderingMode::InverseLikeDirect
                | ReorderingMode::InverseForNumbersSpecial
        )
    }

    /// Modes under which [`ReorderingOptions::INSERT_MARKS`] has an effect.
    pub fn inserts_marks(self) -> bool {
        self == ReorderingMode::RunsOnly || self.is_inverse()
    }

    /// Modes that treat European numbers after R/AL as Arabic numbers.
    pub fn numbers_special(self) -> bool {
        matches!(
            self,
            ReorderingMode::NumbersSpecial | ReorderingMode::InverseForNumbersSpecial
        )
    }
}

bitflags! {
    /// Reordering option bits, matching the raw `OPTION_*` values.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ReorderingOptions: u8 {
        const INSERT_MARKS = constants::OPTION_INSERT_MARKS;
        const REMOVE_CONTROLS = constants::OPTION_REMOVE_CONTROLS;
        const STREAMING = constants::OPTION_STREAMING;
    }
}

bitflags! {
    /// Output options for the reordered-text writer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct WriteOptions: u16 {
        const KEEP_BASE_COMBINING = constants::KEEP_BASE_COMBINING;
        const DO_MIRRORING = constants::DO_MIRRORING;
        const INSERT_LRM_FOR_NUMERIC = constants::INSERT_LRM_FOR_NUMERIC;
        const REMOVE_BIDI_CONTROLS = constants::REMOVE_BIDI_CONTROLS;
        const OUTPUT_REVERSE = constants::OUTPUT_REVERSE;
    }
}

impl WriteOptions {
    /// Decode raw write-option bits, dropping unknown ones with a warning.
    pub fn from_raw(raw: u16) -> Self {
        let options = WriteOptions::from_bits_truncate(raw);
        if options.bits() != raw {
            warn!(
                "Ignoring unknown write option bits {:#x}",
                raw & !WriteOptions::all().bits()
            );
        }
        options
    }
}

/// Typed analysis configuration for one paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BidiConfig {
    /// Requested paragraph level
    pub para_level: ParaLevel,
    /// Explicitly selected mode; `None` lets `inverse` decide
    pub reordering_mode: Option<ReorderingMode>,
    /// Reordering option bits
    pub reordering_options: ReorderingOptions,
    /// Treat the text as visual order (selects `InverseNumbersAsL` when no mode is set)
    pub inverse: bool,
    /// Resolve paragraph separators to level 0
    pub reorder_paragraphs_ltr: bool,
    /// Text logically preceding the paragraph, used as context only
    pub prologue: String,
    /// Text logically following the paragraph, used as context only
    pub epilogue: String,
    /// Caller-supplied embedding levels, one per code unit
    pub embedding_levels: Option<Vec<u8>>,
}

impl BidiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_para_level(mut self, para_level: ParaLevel) -> Self {
        self.para_level = para_level;
        self
    }

    pub fn with_reordering_mode(mut self, mode: ReorderingMode) -> Self {
        self.reordering_mode = Some(mode);
        self
    }

    pub fn with_reordering_options(mut self, options: ReorderingOptions) -> Self {
        self.reordering_options = options;
        self
    }

    pub fn with_inverse(mut self, inverse: bool) -> Self {
        self.inverse = inverse;
        self
    }

    pub fn with_reorder_paragraphs_ltr(mut self, enabled: bool) -> Self {
        self.reorder_paragraphs_ltr = enabled;
        self
    }

    pub fn with_context(mut self, prologue: impl Into<String>, epilogue: impl Into<String>) -> Self {
        self.prologue = prologue.into();
        self.epilogue = epilogue.into();
        self
    }

    pub fn with_embedding_levels(mut self, levels: Vec<u8>) -> Self {
        self.embedding_levels = Some(levels);
        self
    }

    /// Mode actually applied: the explicit mode wins over `inverse`.
    pub fn effective_mode(&self) -> ReorderingMode {
        match (self.reordering_mode, self.inverse) {
            (Some(mode), _) => mode,
            (None, true) => ReorderingMode::InverseNumbersAsL,
            (None, false) => ReorderingMode::Default,
        }
    }

    /// Whether layout marks are inserted between runs of different direction.
    pub fn inserts_marks(&self) -> bool {
        self.reordering_options
            .contains(ReorderingOptions::INSERT_MARKS)
            && self.effective_mode().inserts_marks()
    }

    /// Build a typed configuration from a host option record.
    pub fn from_options(options: &ParagraphOptions) -> Self {
        let para_level = match options.para_level {
            None if options.default_rtl => ParaLevel::DefaultRtl,
            None => ParaLevel::DefaultLtr,
            Some(raw) => match u8::try_from(raw).ok().and_then(ParaLevel::from_raw) {
                Some(level) => level,
                None => {
                    warn!("Invalid paragraph level {raw}, falling back to DEFAULT_LTR");
                    ParaLevel::DefaultLtr
                }
            },
        };

        let reordering_mode = options.reordering_mode.and_then(|raw| {
            let mode = u8::try_from(raw).ok().and_then(ReorderingMode::from_raw);
            if mode.is_none() {
                warn!("Ignoring invalid reordering mode {raw}");
            }
            mode
        });

        let reordering_options = match options.reordering_options {
            None => ReorderingOptions::empty(),
            Some(raw) => match u8::try_from(raw) {
                Ok(bits) => {
                    let flags = ReorderingOptions::from_bits_truncate(bits);
                    if flags.bits() != bits {
                        warn!(
                            "Ignoring unknown reordering option bits {:#x}",
                            bits & !ReorderingOptions::all().bits()
                        );
                    }
                    flags
                }
                Err(_) => {
                    warn!("Ignoring invalid reordering options {raw}");
                    ReorderingOptions::empty()
                }
            },
        };

        Self {
            para_level,
            reordering_mode,
            reordering_options,
            inverse: options.inverse,
            reorder_paragraphs_ltr: options.reorder_paragraphs_ltr,
            prologue: options.prologue.clone().unwrap_or_default(),
            epilogue: options.epilogue.clone().unwrap_or_default(),
            embedding_levels: options.embedding_levels.clone(),
        }
    }
}

/// Loosely typed analysis options, as received from a host.
///
/// Every field is optional. Numeric fields are kept wide so that out-of-range
/// values reach [`BidiConfig::from_options`] and are repaired there.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParagraphOptions {
    /// Raw paragraph level (`0..=125`, 254 or 255)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub para_level: Option<i64>,
    /// Prefer RTL when no paragraph level is given and no strong character decides
    pub default_rtl: bool,
    /// Raw reordering mode (`0..=6`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reordering_mode: Option<i64>,
    /// Raw reordering option bits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reordering_options: Option<i64>,
    pub inverse: bool,
    #[serde(rename = "reorderParagraphsLTR")]
    pub reorder_paragraphs_ltr: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prologue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epilogue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding_levels: Option<Vec<u8>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_para_level_raw_round() {
        assert_eq!(ParaLevel::from_raw(254), Some(ParaLevel::DefaultLtr));
        assert_eq!(ParaLevel::from_raw(255), Some(ParaLevel::DefaultRtl));
        assert_eq!(ParaLevel::from_raw(126), None);
        assert_eq!(ParaLevel::from_raw(3).map(ParaLevel::raw), Some(3));
        assert_eq!(ParaLevel::DefaultRtl.fallback(), Level::RTL);
    }

    #[test]
    fn test_mode_raw_values() {
        for (raw, mode) in ReorderingMode::ALL.iter().enumerate() {
            assert_eq!(mode.raw() as usize, raw);
        }
        assert_eq!(ReorderingMode::from_raw(7), None);
        assert!(ReorderingMode::RunsOnly.inserts_marks());
        assert!(!ReorderingMode::NumbersSpecial.inserts_marks());
    }

    #[test]
    fn test_effective_mode_explicit_wins() {
        let config = BidiConfig::new()
            .with_inverse(true)
            .with_reordering_mode(ReorderingMode::RunsOnly);
        assert_eq!(config.effective_mode(), ReorderingMode::RunsOnly);

        let config = BidiConfig::new().with_inverse(true);
        assert_eq!(config.effective_mode(), ReorderingMode::InverseNumbersAsL);
        assert_eq!(BidiConfig::new().effective_mode(), ReorderingMode::Default);
    }

    #[test]
    fn test_from_options_falls_back() {
        let options = ParagraphOptions {
            para_level: Some(300),
            reordering_mode: Some(42),
            reordering_options: Some(0x0b),
            ..Default::default()
        };
        let config = BidiConfig::from_options(&options);
        assert_eq!(config.para_level, ParaLevel::DefaultLtr);
        assert_eq!(config.reordering_mode, None);
        assert_eq!(
            config.reordering_options,
            ReorderingOptions::INSERT_MARKS | ReorderingOptions::REMOVE_CONTROLS
        );
    }

    #[test]
    fn test_from_options_default_rtl() {
        let options = ParagraphOptions {
            default_rtl: true,
            ..Default::default()
        };
        assert_eq!(
            BidiConfig::from_options(&options).para_level,
            ParaLevel::DefaultRtl
        );
    }

    #[test]
    fn test_options_json_names() {
        let options: ParagraphOptions = serde_json::from_str(
            r#"{"paraLevel":1,"reorderingMode":3,"reorderParagraphsLTR":true,"prologue":"abc"}"#,
        )
        .unwrap();
        let config = BidiConfig::from_options(&options);
        assert_eq!(config.para_level, ParaLevel::Explicit(Level::RTL));
        assert_eq!(config.reordering_mode, Some(ReorderingMode::RunsOnly));
        assert!(config.reorder_paragraphs_ltr);
        assert_eq!(config.prologue, "abc");
    }

    #[test]
    fn test_write_options_truncate() {
        let options = WriteOptions::from_raw(0x102);
        assert_eq!(options, WriteOptions::DO_MIRRORING);
    }

    #[test]
    fn test_inserts_marks_needs_mode() {
        let config =
            BidiConfig::new().with_reordering_options(ReorderingOptions::INSERT_MARKS);
        assert!(!config.inserts_marks());
        let config = config.with_reordering_mode(ReorderingMode::RunsOnly);
        assert!(config.inserts_marks());
    }
}
