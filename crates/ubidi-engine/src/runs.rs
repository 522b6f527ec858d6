// this_file: crates/ubidi-engine/src/runs.rs

//! Run segmentation and visual run order (rule L2).

use ubidi_core::{Level, LogicalRun, ReorderingMode, VisualRun};

/// Maximal equal-level span in logical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LevelRun {
    pub start: usize,
    pub limit: usize,
    pub level: Level,
}

/// Logical runs of a unit plus their visual order.
#[derive(Debug, Clone, Default)]
pub(crate) struct RunTable {
    logical: Vec<LevelRun>,
    /// Indices into `logical`, leftmost first
    order: Vec<usize>,
    visual: Vec<VisualRun>,
    /// Whether run contents are written right to left
    reversed: Vec<bool>,
}

impl RunTable {
    /// Segment `levels[..processed]` and order the runs for display.
    pub fn build(levels: &[Level], processed: usize, para_level: Level, mode: ReorderingMode) -> Self {
        let mut logical: Vec<LevelRun> = Vec::new();
        for (i, &level) in levels[..processed].iter().enumerate() {
            match logical.last_mut() {
                Some(run) if run.level == level => run.limit = i + 1,
                _ => logical.push(LevelRun {
                    start: i,
                    limit: i + 1,
                    level,
                }),
            }
        }

        let runs_only = mode == ReorderingMode::RunsOnly;
        let mut order = l2_order(&logical);
        if runs_only && para_level.is_ltr() {
            order.reverse();
        }

        let visual = order
            .iter()
            .map(|&index| {
                let run = logical[index];
                VisualRun {
                    direction: run.level.direction(),
                    logical_start: run.start,
                    length: run.limit - run.start,
                }
            })
            .collect();
        let reversed = order
            .iter()
            .map(|&index| !runs_only && logical[index].level.is_rtl())
            .collect();

        Self {
            logical,
            order,
            visual,
            reversed,
        }
    }

    pub fn len(&self) -> usize {
        self.logical.len()
    }

    pub fn visual_runs(&self) -> &[VisualRun] {
        &self.visual
    }

    /// Logical run at visual position `index`.
    pub fn visual_level_run(&self, index: usize) -> LevelRun {
        self.logical[self.order[index]]
    }

    /// Whether the run at visual position `index` is written right to left.
    pub fn is_reversed(&self, index: usize) -> bool {
        self.reversed[index]
    }

    /// Run containing logical `position`; the caller checks the bound.
    pub fn logical_run(&self, position: usize) -> Option<LogicalRun> {
        let index = self.logical.partition_point(|run| run.limit <= position);
        self.logical.get(index).map(|run| LogicalRun {
            limit: run.limit,
            level: run.level,
        })
    }
}

/// L2: From the highest level down to the lowest odd level, reverse every
/// contiguous sequence of runs at that level or higher.
fn l2_order(runs: &[LevelRun]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..runs.len()).collect();
    let Some(highest) = runs.iter().map(|run| run.level.number()).max() else {
        return order;
    };
    let lowest_odd = runs
        .iter()
        .map(|run| run.level.number())
        .min()
        .map_or(1, |lowest| lowest | 1);

    let mut level = highest;
    while level >= lowest_odd {
        let mut i = 0;
        while i < order.len() {
            if runs[order[i]].level.number() < level {
                i += 1;
                continue;
            }
            let start = i;
            while i < order.len() && runs[order[i]].level.number() >= level {
                i += 1;
            }
            order[start..i].reverse();
        }
        level -= 1;
    }
    order
}
