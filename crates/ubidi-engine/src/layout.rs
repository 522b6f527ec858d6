// this_file: crates/ubidi-engine/src/layout.rs

//! Visual layout and the logical/visual index maps derived from it.

use crate::runs::RunTable;
use crate::text;
use ubidi_core::utils::{is_bidi_control, mark_for_level};
use ubidi_core::{BidiConfig, Level, ReorderingOptions};

/// One position of the visual layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    /// Logical code unit
    Unit(usize),
    /// Inserted mark with no logical counterpart
    Mark,
}

/// Visual sequence of code units and inserted marks.
#[derive(Debug, Clone)]
pub(crate) struct Layout {
    slots: Vec<Slot>,
    /// Logical to visual, one entry per processed code unit
    visual_map: Vec<Option<usize>>,
    /// Visual to logical, one entry per slot
    logical_map: Vec<Option<usize>>,
    /// Visual run index of each layout mark, marks sit before that run
    marks_before: Vec<usize>,
    /// LRM or RLM, by paragraph direction
    mark: char,
}

impl Layout {
    pub fn build(
        units: &[u16],
        processed: usize,
        runs: &RunTable,
        para_level: Level,
        config: &BidiConfig,
    ) -> Self {
        let remove_controls = config
            .reordering_options
            .contains(ReorderingOptions::REMOVE_CONTROLS);
        let insert_marks = config.inserts_marks();
        let mark = mark_for_level(para_level.is_rtl());

        let mut slots = Vec::with_capacity(processed + runs.len());
        let mut marks_before = Vec::new();
        for index in 0..runs.len() {
            if insert_marks && index > 0 {
                let previous = runs.visual_level_run(index - 1).level.is_rtl();
                if previous != runs.visual_level_run(index).level.is_rtl() {
                    slots.push(Slot::Mark);
                    marks_before.push(index);
                }
            }

            let run = runs.visual_level_run(index);
            let mut spans = text::spans(units, run.start, run.limit);
            if runs.is_reversed(index) {
                spans.reverse();
            }
            for (start, len) in spans {
                if remove_controls && is_bidi_control(text::code_point_at(units, start)) {
                    continue;
                }
                slots.extend((start..start + len).map(Slot::Unit));
            }
        }

        let mut visual_map = vec![None; processed];
        let mut logical_map = Vec::with_capacity(slots.len());
        for (visual, slot) in slots.iter().enumerate() {
            match *slot {
                Slot::Unit(logical) => {
                    visual_map[logical] = Some(visual);
                    logical_map.push(Some(logical));
                }
                Slot::Mark => logical_map.push(None),
            }
        }

        Self {
            slots,
            visual_map,
            logical_map,
            marks_before,
            mark,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn visual_map(&self) -> &[Option<usize>] {
        &self.visual_map
    }

    pub fn logical_map(&self) -> &[Option<usize>] {
        &self.logical_map
    }

    /// Whether a layout mark precedes the run at visual position `index`.
    pub fn has_mark_before(&self, index: usize) -> bool {
        self.marks_before.binary_search(&index).is_ok()
    }

    pub fn mark(&self) -> char {
        self.mark
    }

    pub fn mark_count(&self) -> usize {
        self.marks_before.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ubidi_core::{ReorderingMode, ReorderingOptions};

    fn build(text: &str, raw_levels: &[u8], para: Level, config: &BidiConfig) -> Layout {
        let units: Vec<u16> = text.encode_utf16().collect();
        let levels: Vec<Level> = raw_levels.iter().map(|&l| Level::new(l).unwrap()).collect();
        let runs = RunTable::build(&levels, units.len(), para, config.effective_mode());
        Layout::build(&units, units.len(), &runs, para, config)
    }

    fn logical(layout: &Layout) -> Vec<Option<usize>> {
        layout.logical_map().to_vec()
    }

    #[test]
    fn test_reversed_run() {
        let layout = build("ab CD", &[0, 0, 0, 1, 1], Level::LTR, &BidiConfig::new());
        assert_eq!(
            logical(&layout),
            vec![Some(0), Some(1), Some(2), Some(4), Some(3)]
        );
        assert_eq!(layout.visual_map()[3], Some(4));
    }

    #[test]
    fn test_surrogate_pair_kept_whole() {
        // Two RTL supplementary characters
        let layout = build(
            "\u{10900}\u{10901}",
            &[1, 1, 1, 1],
            Level::RTL,
            &BidiConfig::new(),
        );
        assert_eq!(
            logical(&layout),
            vec![Some(2), Some(3), Some(0), Some(1)]
        );
    }

    #[test]
    fn test_remove_controls() {
        let config =
            BidiConfig::new().with_reordering_options(ReorderingOptions::REMOVE_CONTROLS);
        let layout = build("a\u{200F}b", &[0, 0, 0], Level::LTR, &config);
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.visual_map(), &[Some(0), None, Some(1)]);
    }

    #[test]
    fn test_insert_marks_between_direction_changes() {
        let config = BidiConfig::new()
            .with_reordering_mode(ReorderingMode::RunsOnly)
            .with_reordering_options(ReorderingOptions::INSERT_MARKS);
        let layout = build("ab CD", &[0, 0, 0, 1, 1], Level::LTR, &config);
        // Runs-only on an LTR paragraph: runs reversed, contents kept
        assert_eq!(
            logical(&layout),
            vec![Some(3), Some(4), None, Some(0), Some(1), Some(2)]
        );
        assert!(layout.has_mark_before(1));
        assert_eq!(layout.mark_count(), 1);
    }

    #[test]
    fn test_marks_ignored_in_default_mode() {
        let config =
            BidiConfig::new().with_reordering_options(ReorderingOptions::INSERT_MARKS);
        let layout = build("ab CD", &[0, 0, 0, 1, 1], Level::LTR, &config);
        assert_eq!(layout.len(), 5);
    }
}
