// this_file: crates/ubidi-engine/src/line.rs

//! Lines: sub-ranges of one paragraph with whitespace re-resolved for display.

use crate::paragraph::Paragraph;
use crate::resolver;
use crate::unit::{BidiUnit, UnitState};
use ubidi_core::{
    BidiClass, BidiClassifier, BidiConfig, BidiError, Level, ParagraphInfo, Result,
};

/// A line of a [`Paragraph`], borrowed from it.
///
/// Trailing whitespace of the line takes the paragraph level (rule L1), so a
/// line's levels may differ from the paragraph's over the same range.
#[derive(Debug)]
pub struct Line<'p> {
    paragraph: &'p Paragraph,
    info: ParagraphInfo,
    start: usize,
    limit: usize,
    state: UnitState,
}

impl<'p> Line<'p> {
    pub(crate) fn new(paragraph: &'p Paragraph, start: usize, limit: usize) -> Result<Self> {
        let length = paragraph.length();
        if start >= limit || limit > length {
            return Err(BidiError::InvalidLineRange {
                start,
                limit,
                length,
            });
        }
        let info = paragraph.paragraph_at(start)?;
        if limit > info.limit {
            return Err(BidiError::LineCrossesParagraph {
                start,
                limit,
                boundary: info.limit,
            });
        }

        let classes = &paragraph.unit_classes()[start..limit];
        let mut levels: Vec<u8> = paragraph.levels()[start..limit]
            .iter()
            .map(|level| level.number())
            .collect();
        let separator_level = if paragraph.config().reorder_paragraphs_ltr {
            0
        } else {
            info.level.number()
        };
        let count = levels.len();
        resolver::reset_whitespace(
            classes,
            &mut levels,
            0,
            count,
            info.level.number(),
            separator_level,
        );

        let levels = levels.into_iter().map(Level::clamped).collect();
        Ok(Self {
            paragraph,
            info,
            start,
            limit,
            state: UnitState::new(levels, info.level, limit - start),
        })
    }

    /// Offset of the line in the paragraph text.
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn paragraph(&self) -> &'p Paragraph {
        self.paragraph
    }

    /// The paragraph of the text this line belongs to.
    pub fn paragraph_info(&self) -> ParagraphInfo {
        self.info
    }
}

impl BidiUnit for Line<'_> {
    fn units(&self) -> &[u16] {
        &self.paragraph.units()[self.start..self.limit]
    }

    fn unit_classes(&self) -> &[BidiClass] {
        &self.paragraph.unit_classes()[self.start..self.limit]
    }

    fn config(&self) -> &BidiConfig {
        self.paragraph.config()
    }

    fn classifier(&self) -> &dyn BidiClassifier {
        self.paragraph.classifier()
    }

    fn state(&self) -> &UnitState {
        &self.state
    }
}
