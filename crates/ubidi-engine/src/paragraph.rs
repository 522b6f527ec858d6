// this_file: crates/ubidi-engine/src/paragraph.rs

//! Paragraph analysis: the owner of the text, its levels and its lines.

use crate::line::Line;
use crate::resolver::{self, Context, ResolveRequest};
use crate::text;
use crate::unit::{direction_of, BidiUnit, UnitState};
use log::warn;
use std::fmt;
use std::sync::Arc;
use ubidi_core::constants::{LEVEL_OVERRIDE, MAX_EXPLICIT_LEVEL};
use ubidi_core::{
    AnalysisDiagnostics, AnalysisStatus, BidiClass, BidiClassifier, BidiConfig, BidiError, Level,
    ParagraphInfo, ReorderingOptions, Result,
};
use ubidi_icu::IcuClassifier;

/// A text analyzed with the bidi algorithm.
///
/// The text may hold several paragraphs separated by paragraph separators;
/// each gets its own level. Run tables and index maps are built on first use.
pub struct Paragraph {
    units: Vec<u16>,
    classes: Vec<BidiClass>,
    paragraphs: Vec<ParagraphInfo>,
    config: BidiConfig,
    classifier: Arc<dyn BidiClassifier>,
    state: UnitState,
}

impl Paragraph {
    /// Analyze `text` with the shared ICU classifier.
    pub fn new(text: &str, config: BidiConfig) -> Result<Self> {
        Self::with_classifier(text, config, IcuClassifier::shared_dyn())
    }

    pub fn with_classifier(
        text: &str,
        config: BidiConfig,
        classifier: Arc<dyn BidiClassifier>,
    ) -> Result<Self> {
        Self::from_utf16(text.encode_utf16().collect(), config, classifier)
    }

    /// Analyze raw UTF-16 code units. Unpaired surrogates are treated as L.
    pub fn from_utf16(
        units: Vec<u16>,
        config: BidiConfig,
        classifier: Arc<dyn BidiClassifier>,
    ) -> Result<Self> {
        if units.len() > i32::MAX as usize {
            return Err(BidiError::analysis(AnalysisStatus::IllegalArgument));
        }

        let points = text::decode(&units)?;
        let chars: Vec<char> = points.iter().map(|point| point.ch).collect();
        let char_classes: Vec<BidiClass> = points
            .iter()
            .map(|point| {
                if point.lone_surrogate {
                    BidiClass::L
                } else {
                    classifier.bidi_class(point.ch)
                }
            })
            .collect();

        let embedding_levels = config
            .embedding_levels
            .as_deref()
            .and_then(|levels| per_char_levels(levels, units.len(), &points));

        let classify = |s: &str| -> Vec<BidiClass> {
            s.chars().map(|ch| classifier.bidi_class(ch)).collect()
        };
        let context = Context::new(&classify(&config.prologue), &classify(&config.epilogue));

        let resolution = resolver::resolve(&ResolveRequest {
            chars: &chars,
            classes: &char_classes,
            classifier: classifier.as_ref(),
            para_level: config.para_level,
            mode: config.effective_mode(),
            reorder_paragraphs_ltr: config.reorder_paragraphs_ltr,
            context,
            embedding_levels: embedding_levels.as_deref(),
        })?;

        let mut levels = text::filled(units.len(), Level::LTR)?;
        let mut classes = text::filled(units.len(), BidiClass::L)?;
        for (i, point) in points.iter().enumerate() {
            for unit in point.start..point.start + point.len {
                levels[unit] = resolution.levels[i];
                classes[unit] = char_classes[i];
            }
        }

        let unit_offset = |index: usize| points.get(index).map_or(units.len(), |p| p.start);
        let paragraphs: Vec<ParagraphInfo> = resolution
            .paragraphs
            .iter()
            .enumerate()
            .map(|(index, span)| {
                let start = unit_offset(span.start);
                let limit = unit_offset(span.limit);
                ParagraphInfo {
                    index,
                    start,
                    limit,
                    level: span.level,
                    direction: direction_of(&levels[start..limit], span.level),
                }
            })
            .collect();

        let processed = processed_length(&classes, &config);
        let state = UnitState::new(levels, resolution.para_level, processed);

        let paragraph = Self {
            units,
            classes,
            paragraphs,
            config,
            classifier,
            state,
        };
        AnalysisDiagnostics::new(
            paragraph.classifier.name(),
            paragraph.length(),
            processed,
            paragraph.paragraphs.len(),
            paragraph.para_level(),
            paragraph.direction(),
            &paragraph.config,
        )
        .log();
        Ok(paragraph)
    }

    /// Number of paragraphs in the text.
    pub fn count_paragraphs(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn paragraphs(&self) -> &[ParagraphInfo] {
        &self.paragraphs
    }

    /// Paragraph containing the code unit at `index`.
    pub fn paragraph_at(&self, index: usize) -> Result<ParagraphInfo> {
        let index = BidiError::check_index(index, self.length())?;
        let position = self.paragraphs.partition_point(|info| info.limit <= index);
        self.paragraphs
            .get(position)
            .copied()
            .ok_or(BidiError::IndexOutOfRange {
                index,
                limit: self.length(),
            })
    }

    pub fn paragraph_by_index(&self, index: usize) -> Result<ParagraphInfo> {
        self.paragraphs
            .get(index)
            .copied()
            .ok_or(BidiError::ParagraphIndexOutOfRange {
                index,
                count: self.paragraphs.len(),
            })
    }

    /// Analyze `[start, limit)` as a line of this paragraph.
    ///
    /// The range must be non-empty, inside the text and inside one paragraph.
    pub fn line(&self, start: usize, limit: usize) -> Result<Line<'_>> {
        Line::new(self, start, limit)
    }
}

impl BidiUnit for Paragraph {
    fn units(&self) -> &[u16] {
        &self.units
    }

    fn unit_classes(&self) -> &[BidiClass] {
        &self.classes
    }

    fn config(&self) -> &BidiConfig {
        &self.config
    }

    fn classifier(&self) -> &dyn BidiClassifier {
        self.classifier.as_ref()
    }

    fn state(&self) -> &UnitState {
        &self.state
    }
}

impl fmt::Debug for Paragraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paragraph")
            .field("length", &self.units.len())
            .field("paragraphs", &self.paragraphs)
            .field("config", &self.config)
            .field("classifier", &self.classifier.name())
            .finish()
    }
}

/// Caller-supplied levels, sampled at the first unit of each character.
fn per_char_levels(
    levels: &[u8],
    length: usize,
    points: &[text::CodePoint],
) -> Option<Vec<u8>> {
    if levels.len() != length {
        warn!(
            "Ignoring embedding levels: {} values for text of length {}",
            levels.len(),
            length
        );
        return None;
    }
    let clamped = levels
        .iter()
        .filter(|&&raw| raw & !LEVEL_OVERRIDE > MAX_EXPLICIT_LEVEL)
        .count();
    if clamped > 0 {
        warn!("Clamping {clamped} embedding levels above {MAX_EXPLICIT_LEVEL}");
    }
    Some(points.iter().map(|point| levels[point.start]).collect())
}

/// With streaming, processing stops after the last paragraph separator.
fn processed_length(classes: &[BidiClass], config: &BidiConfig) -> usize {
    let streaming = config
        .reordering_options
        .contains(ReorderingOptions::STREAMING);
    match classes.last() {
        Some(&last) if streaming && last != BidiClass::B => classes
            .iter()
            .rposition(|&class| class == BidiClass::B)
            .map_or(classes.len(), |pos| pos + 1),
        _ => classes.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::classifier;
    use ubidi_core::{Direction, ParaLevel, ReorderingMode, VisualRun, WriteOptions};

    fn analyze(text: &str, config: BidiConfig) -> Paragraph {
        Paragraph::with_classifier(text, config, classifier()).unwrap()
    }

    fn runs(paragraph: &Paragraph) -> Vec<(Direction, usize, usize)> {
        paragraph
            .visual_runs()
            .iter()
            .map(|run| (run.direction, run.logical_start, run.length))
            .collect()
    }

    #[test]
    fn test_single_ltr_run() {
        let paragraph = analyze("abc", BidiConfig::new());
        assert_eq!(paragraph.count_runs(), 1);
        assert_eq!(
            paragraph.visual_run(0).unwrap(),
            VisualRun {
                direction: Direction::Ltr,
                logical_start: 0,
                length: 3
            }
        );
        assert_eq!(paragraph.direction(), Direction::Ltr);
    }

    #[test]
    fn test_three_runs() {
        let paragraph = analyze("abc DEF ghi", BidiConfig::new());
        assert_eq!(paragraph.count_runs(), 3);
        assert_eq!(
            runs(&paragraph),
            vec![
                (Direction::Ltr, 0, 4),
                (Direction::Rtl, 4, 3),
                (Direction::Ltr, 7, 4)
            ]
        );
        assert_eq!(paragraph.direction(), Direction::Mixed);
        assert_eq!(paragraph.write_reordered(WriteOptions::empty()), "abc FED ghi");
    }

    #[test]
    fn test_run_index_out_of_range() {
        let paragraph = analyze("abc", BidiConfig::new());
        assert_eq!(
            paragraph.visual_run(1),
            Err(BidiError::RunIndexOutOfRange { index: 1, count: 1 })
        );
    }

    #[test]
    fn test_empty_text() {
        let paragraph = analyze("", BidiConfig::new());
        assert_eq!(paragraph.length(), 0);
        assert_eq!(paragraph.count_runs(), 0);
        assert_eq!(paragraph.count_paragraphs(), 0);
        assert_eq!(paragraph.result_length(), 0);
        assert_eq!(paragraph.write_reordered(WriteOptions::empty()), "");
        assert_eq!(paragraph.direction(), Direction::Ltr);
    }

    #[test]
    fn test_index_maps_round_trip() {
        let paragraph = analyze("ab CDE 12 fg", BidiConfig::new());
        for logical in 0..paragraph.processed_length() {
            let visual = paragraph.visual_index(logical).unwrap().unwrap();
            assert_eq!(paragraph.logical_index(visual).unwrap(), Some(logical));
        }
        assert!(paragraph.visual_index(paragraph.length()).is_err());
        assert!(paragraph.logical_index(paragraph.result_length()).is_err());
    }

    #[test]
    fn test_logical_run() {
        let paragraph = analyze("abc DEF ghi", BidiConfig::new());
        let run = paragraph.logical_run(5).unwrap();
        assert_eq!(run.limit, 7);
        assert_eq!(run.level, Level::RTL);
        assert!(paragraph.logical_run(11).is_err());
    }

    #[test]
    fn test_multiple_paragraphs() {
        let paragraph = analyze("abc\nDEF", BidiConfig::new());
        assert_eq!(paragraph.count_paragraphs(), 2);
        let second = paragraph.paragraph_at(5).unwrap();
        assert_eq!((second.index, second.start, second.limit), (1, 4, 7));
        assert_eq!(second.direction, Direction::Rtl);
        assert_eq!(paragraph.paragraph_by_index(0).unwrap().limit, 4);
        assert!(paragraph.paragraph_by_index(2).is_err());
        assert_eq!(paragraph.para_level(), Level::LTR);
    }

    #[test]
    fn test_streaming_stops_after_last_separator() {
        let config = BidiConfig::new().with_reordering_options(ReorderingOptions::STREAMING);
        let paragraph = analyze("abc\nde", config.clone());
        assert_eq!(paragraph.processed_length(), 4);
        assert_eq!(paragraph.levels().len(), 6);
        assert_eq!(paragraph.write_reordered(WriteOptions::empty()), "abc\n");

        let paragraph = analyze("abc\n", config.clone());
        assert_eq!(paragraph.processed_length(), 4);
        let paragraph = analyze("abc", config);
        assert_eq!(paragraph.processed_length(), 3);
    }

    #[test]
    fn test_remove_controls_changes_result_length() {
        let config =
            BidiConfig::new().with_reordering_options(ReorderingOptions::REMOVE_CONTROLS);
        let paragraph = analyze("a\u{202B}B\u{202C}c", config);
        assert_eq!(paragraph.length(), 5);
        assert_eq!(paragraph.result_length(), 3);
        assert_eq!(paragraph.visual_index(1).unwrap(), None);
        assert_eq!(paragraph.write_reordered(WriteOptions::empty()), "aBc");
    }

    #[test]
    fn test_runs_only_with_marks() {
        let config = BidiConfig::new()
            .with_reordering_mode(ReorderingMode::RunsOnly)
            .with_reordering_options(ReorderingOptions::INSERT_MARKS);
        let paragraph = analyze("ab CD", config);
        assert_eq!(paragraph.result_length(), 6);
        assert_eq!(paragraph.logical_index(2).unwrap(), None);
        assert_eq!(
            paragraph.write_reordered(WriteOptions::empty()),
            "CD\u{200E}ab "
        );
    }

    #[test]
    fn test_explicit_rtl_level() {
        let config = BidiConfig::new().with_para_level(ParaLevel::Explicit(Level::RTL));
        let paragraph = analyze("abc", config);
        assert_eq!(paragraph.para_level(), Level::RTL);
        assert_eq!(paragraph.levels(), &[Level::clamped(2); 3]);
        assert_eq!(paragraph.direction(), Direction::Ltr);
    }

    #[test]
    fn test_embedding_levels_length_mismatch_ignored() {
        let config = BidiConfig::new().with_embedding_levels(vec![1]);
        let paragraph = analyze("abc", config);
        assert_eq!(paragraph.levels(), &[Level::LTR; 3]);
    }

    #[test]
    fn test_lone_surrogate_is_ltr() {
        let units = vec![0x41, 0xD800, 0x42];
        let paragraph =
            Paragraph::from_utf16(units, BidiConfig::new(), classifier()).unwrap();
        assert_eq!(paragraph.count_runs(), 3);
        assert_eq!(paragraph.level_at(1).unwrap(), Level::clamped(2));
    }

    #[test]
    fn test_surrogates_share_level() {
        let paragraph = analyze("ab\u{10900}\u{10901}", BidiConfig::new());
        assert_eq!(paragraph.length(), 6);
        assert_eq!(paragraph.levels()[2], paragraph.levels()[3]);
        assert_eq!(
            paragraph.write_reordered(WriteOptions::empty()),
            "ab\u{10901}\u{10900}"
        );
    }
}
