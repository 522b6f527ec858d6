// this_file: crates/ubidi-engine/src/unit.rs

//! Operations shared by paragraphs and lines.

use crate::layout::Layout;
use crate::runs::RunTable;
use crate::writer::{self, WriteInput};
use once_cell::sync::OnceCell;
use ubidi_core::{
    BidiClass, BidiClassifier, BidiConfig, BidiError, Direction, Level, LogicalRun, Result,
    VisualRun, WriteOptions,
};

/// Resolved levels of an analyzed unit plus its lazily built run table and layout.
#[derive(Debug)]
pub struct UnitState {
    levels: Vec<Level>,
    para_level: Level,
    direction: Direction,
    processed: usize,
    runs: OnceCell<RunTable>,
    layout: OnceCell<Layout>,
}

impl UnitState {
    pub(crate) fn new(levels: Vec<Level>, para_level: Level, processed: usize) -> Self {
        let direction = direction_of(&levels, para_level);
        Self {
            levels,
            para_level,
            direction,
            processed,
            runs: OnceCell::new(),
            layout: OnceCell::new(),
        }
    }

    pub(crate) fn runs(&self, config: &BidiConfig) -> &RunTable {
        self.runs.get_or_init(|| {
            RunTable::build(
                &self.levels,
                self.processed,
                self.para_level,
                config.effective_mode(),
            )
        })
    }

    pub(crate) fn layout(&self, units: &[u16], config: &BidiConfig) -> &Layout {
        self.layout.get_or_init(|| {
            Layout::build(
                units,
                self.processed,
                self.runs(config),
                self.para_level,
                config,
            )
        })
    }
}

/// Direction of a level sequence; an empty one takes the paragraph level's direction.
pub(crate) fn direction_of(levels: &[Level], para_level: Level) -> Direction {
    let has_ltr = levels.iter().any(|level| level.is_ltr());
    let has_rtl = levels.iter().any(|level| level.is_rtl());
    match (has_ltr, has_rtl) {
        (true, false) => Direction::Ltr,
        (false, true) => Direction::Rtl,
        (true, true) => Direction::Mixed,
        (false, false) => para_level.direction(),
    }
}

/// An analyzed span of text: a [`crate::Paragraph`] or a [`crate::Line`].
///
/// Positions are UTF-16 code units relative to the start of the unit.
pub trait BidiUnit {
    /// Text of the unit as UTF-16 code units.
    fn units(&self) -> &[u16];

    /// Original bidi class of every code unit.
    fn unit_classes(&self) -> &[BidiClass];

    fn config(&self) -> &BidiConfig;

    fn classifier(&self) -> &dyn BidiClassifier;

    fn state(&self) -> &UnitState;

    /// Text of the unit.
    fn text(&self) -> String {
        String::from_utf16_lossy(self.units())
    }

    fn length(&self) -> usize {
        self.units().len()
    }

    /// Length of the prefix covered by runs and index maps.
    fn processed_length(&self) -> usize {
        self.state().processed
    }

    /// Length of the visual layout: removed controls excluded, inserted marks included.
    fn result_length(&self) -> usize {
        self.state().layout(self.units(), self.config()).len()
    }

    /// Resolved level of every code unit.
    fn levels(&self) -> &[Level] {
        &self.state().levels
    }

    fn level_at(&self, index: usize) -> Result<Level> {
        let index = BidiError::check_index(index, self.length())?;
        Ok(self.state().levels[index])
    }

    fn para_level(&self) -> Level {
        self.state().para_level
    }

    fn direction(&self) -> Direction {
        self.state().direction
    }

    /// Number of runs; 0 for empty text.
    fn count_runs(&self) -> usize {
        self.state().runs(self.config()).len()
    }

    /// All runs in visual order.
    fn visual_runs(&self) -> &[VisualRun] {
        self.state().runs(self.config()).visual_runs()
    }

    /// Run at visual position `index`.
    fn visual_run(&self, index: usize) -> Result<VisualRun> {
        let runs = self.visual_runs();
        runs.get(index)
            .copied()
            .ok_or(BidiError::RunIndexOutOfRange {
                index,
                count: runs.len(),
            })
    }

    /// Run containing the logical `position`.
    fn logical_run(&self, position: usize) -> Result<LogicalRun> {
        let limit = self.processed_length();
        let position = BidiError::check_index(position, limit)?;
        self.state()
            .runs(self.config())
            .logical_run(position)
            .ok_or(BidiError::IndexOutOfRange {
                index: position,
                limit,
            })
    }

    /// Visual position of a logical code unit; `None` when it was removed.
    fn visual_index(&self, logical: usize) -> Result<Option<usize>> {
        let map = self.visual_map();
        let logical = BidiError::check_index(logical, map.len())?;
        Ok(map[logical])
    }

    /// Logical position of a visual slot; `None` for an inserted mark.
    fn logical_index(&self, visual: usize) -> Result<Option<usize>> {
        let map = self.logical_map();
        let visual = BidiError::check_index(visual, map.len())?;
        Ok(map[visual])
    }

    /// Visual position of every processed code unit.
    fn visual_map(&self) -> &[Option<usize>] {
        self.state().layout(self.units(), self.config()).visual_map()
    }

    /// Logical position of every visual slot.
    fn logical_map(&self) -> &[Option<usize>] {
        self.state().layout(self.units(), self.config()).logical_map()
    }

    /// Processed text in visual order.
    fn write_reordered(&self, options: WriteOptions) -> String {
        String::from_utf16_lossy(&self.write_reordered_utf16(options))
    }

    fn write_reordered_utf16(&self, options: WriteOptions) -> Vec<u16> {
        let state = self.state();
        let input = WriteInput {
            units: self.units(),
            classes: self.unit_classes(),
            runs: state.runs(self.config()),
            layout: state.layout(self.units(), self.config()),
            config: self.config(),
            classifier: self.classifier(),
            processed: state.processed,
        };
        writer::write_reordered(&input, options)
    }
}
