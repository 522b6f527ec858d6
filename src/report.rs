// this_file: src/report.rs

//! Serializable snapshots of analyzed paragraphs and lines.

use serde::{Deserialize, Serialize};
use ubidi_core::constants::MAP_NOWHERE;
use ubidi_core::{Direction, ParagraphInfo, VisualRun, WriteOptions};
use ubidi_engine::{BidiUnit, Line, Paragraph};

/// Everything a host usually asks of an analyzed unit, in one JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitReport {
    pub direction: Direction,
    pub para_level: u8,
    /// Length in UTF-16 code units
    pub length: usize,
    pub processed_length: usize,
    pub result_length: usize,
    /// Level of every code unit
    pub levels: Vec<u8>,
    /// Runs in visual order
    pub runs: Vec<VisualRun>,
    pub paragraphs: Vec<ParagraphInfo>,
    /// Logical to visual; removed code units map to `MAP_NOWHERE`
    pub visual_map: Vec<i64>,
    /// Visual to logical; inserted marks map to `MAP_NOWHERE`
    pub logical_map: Vec<i64>,
    /// Processed text in visual order
    pub reordered: String,
}

impl UnitReport {
    /// Report on a unit, listing `paragraphs` as its paragraph table.
    pub fn from_unit(
        unit: &impl BidiUnit,
        paragraphs: Vec<ParagraphInfo>,
        options: WriteOptions,
    ) -> Self {
        Self {
            direction: unit.direction(),
            para_level: unit.para_level().number(),
            length: unit.length(),
            processed_length: unit.processed_length(),
            result_length: unit.result_length(),
            levels: unit.levels().iter().map(|level| level.number()).collect(),
            runs: unit.visual_runs().to_vec(),
            paragraphs,
            visual_map: unit.visual_map().iter().copied().map(map_entry).collect(),
            logical_map: unit.logical_map().iter().copied().map(map_entry).collect(),
            reordered: unit.write_reordered(options),
        }
    }

    pub fn for_paragraph(paragraph: &Paragraph, options: WriteOptions) -> Self {
        Self::from_unit(paragraph, paragraph.paragraphs().to_vec(), options)
    }

    pub fn for_line(line: &Line<'_>, options: WriteOptions) -> Self {
        Self::from_unit(line, vec![line.paragraph_info()], options)
    }
}

fn map_entry(entry: Option<usize>) -> i64 {
    entry.map_or(i64::from(MAP_NOWHERE), |index| index as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ubidi_core::{BidiConfig, ReorderingMode, ReorderingOptions};

    #[test]
    fn test_report_fields() {
        let paragraph = Paragraph::new("ab \u{5d0}\u{5d1}", BidiConfig::new()).unwrap();
        let report = UnitReport::for_paragraph(&paragraph, WriteOptions::empty());
        assert_eq!(report.direction, Direction::Mixed);
        assert_eq!(report.para_level, 0);
        assert_eq!(report.length, 5);
        assert_eq!(report.levels, vec![0, 0, 0, 1, 1]);
        assert_eq!(report.runs.len(), 2);
        assert_eq!(report.visual_map, vec![0, 1, 2, 4, 3]);
        assert_eq!(report.reordered, "ab \u{5d1}\u{5d0}");
    }

    #[test]
    fn test_report_json_shape() {
        let paragraph = Paragraph::new("abc", BidiConfig::new()).unwrap();
        let json = serde_json::to_value(UnitReport::for_paragraph(&paragraph, WriteOptions::empty()))
            .unwrap();
        assert_eq!(json["direction"], "ltr");
        assert_eq!(json["processedLength"], 3);
        assert_eq!(json["runs"][0]["dir"], "ltr");
        assert_eq!(json["runs"][0]["logicalStart"], 0);
        assert_eq!(json["paragraphs"][0]["limit"], 3);
    }

    #[test]
    fn test_marks_map_to_nowhere() {
        let config = BidiConfig::new()
            .with_reordering_mode(ReorderingMode::RunsOnly)
            .with_reordering_options(ReorderingOptions::INSERT_MARKS);
        let paragraph = Paragraph::new("ab \u{5d0}\u{5d1}", config).unwrap();
        let report = UnitReport::for_paragraph(&paragraph, WriteOptions::empty());
        assert_eq!(report.result_length, 6);
        assert_eq!(report.logical_map, vec![3, 4, -1, 0, 1, 2]);
    }

    #[test]
    fn test_line_report() {
        let paragraph = Paragraph::new("ab \u{5d0}\u{5d1} cd", BidiConfig::new()).unwrap();
        let line = paragraph.line(3, 7).unwrap();
        let report = UnitReport::for_line(&line, WriteOptions::empty());
        assert_eq!(report.length, 4);
        assert_eq!(report.paragraphs.len(), 1);
        assert_eq!(report.reordered, "\u{5d1}\u{5d0} c");
    }
}
