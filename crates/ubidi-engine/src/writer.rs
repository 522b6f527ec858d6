// this_file: crates/ubidi-engine/src/writer.rs

//! Reordered-output writer.

use crate::layout::Layout;
use crate::runs::RunTable;
use crate::text;
use std::ops::Range;
use ubidi_core::utils::{is_bidi_control, LRM};
use ubidi_core::{
    BidiClass, BidiClassifier, BidiConfig, ReorderingOptions, WriteDiagnostics, WriteOptions,
};

/// Everything the writer reads from an analyzed unit.
pub(crate) struct WriteInput<'a> {
    pub units: &'a [u16],
    /// Original class of each code unit
    pub classes: &'a [BidiClass],
    pub runs: &'a RunTable,
    pub layout: &'a Layout,
    pub config: &'a BidiConfig,
    pub classifier: &'a dyn BidiClassifier,
    pub processed: usize,
}

/// Output capacity: the largest of the text, processed and layout lengths,
/// plus one mark per run side whenever marks may be inserted.
pub(crate) fn capacity(input: &WriteInput<'_>, options: WriteOptions) -> usize {
    let base = input
        .processed
        .max(input.units.len())
        .max(input.layout.len());
    if options.contains(WriteOptions::INSERT_LRM_FOR_NUMERIC) || input.config.inserts_marks() {
        base + 2 * input.runs.len()
    } else {
        base
    }
}

/// Write the processed text in visual order.
///
/// # Panics
///
/// Panics if the output exceeds [`capacity`], which would mean the mark
/// accounting is broken.
pub(crate) fn write_reordered(input: &WriteInput<'_>, options: WriteOptions) -> Vec<u16> {
    let capacity = capacity(input, options);
    let mut writer = Writer {
        out: Vec::with_capacity(capacity),
        pieces: Vec::new(),
    };

    let remove_controls = options.contains(WriteOptions::REMOVE_BIDI_CONTROLS)
        || input
            .config
            .reordering_options
            .contains(ReorderingOptions::REMOVE_CONTROLS);
    let numeric_marks = options.contains(WriteOptions::INSERT_LRM_FOR_NUMERIC);
    let keep_combining = options.contains(WriteOptions::KEEP_BASE_COMBINING);
    let mirroring = options.contains(WriteOptions::DO_MIRRORING);
    let run_count = input.runs.len();

    for index in 0..run_count {
        let run = input.runs.visual_level_run(index);
        let reversed = input.runs.is_reversed(index);
        let spans = text::spans(input.units, run.start, run.limit);
        let (Some(&first), Some(&last)) = (spans.first(), spans.last()) else {
            continue;
        };
        let (left_edge, right_edge) = if reversed {
            (last.0, first.0)
        } else {
            (first.0, last.0)
        };

        let layout_mark = input.layout.has_mark_before(index);
        if layout_mark && !options.contains(WriteOptions::REMOVE_BIDI_CONTROLS) {
            writer.push_char(input.layout.mark());
        }
        if numeric_marks && index > 0 && !layout_mark && input.classes[left_edge].is_number() {
            writer.push_char(LRM);
        }

        let mut clusters = group(input, &spans, keep_combining);
        if reversed {
            clusters.reverse();
        }
        for cluster in clusters {
            let start = writer.out.len();
            for &(unit, len) in &spans[cluster] {
                let cp = text::code_point_at(input.units, unit);
                if remove_controls && is_bidi_control(cp) {
                    continue;
                }
                let mirrored = (mirroring && reversed)
                    .then(|| char::from_u32(cp).and_then(|ch| input.classifier.mirror(ch)))
                    .flatten()
                    .filter(|ch| ch.len_utf16() == len);
                match mirrored {
                    Some(ch) => {
                        let mut buf = [0u16; 2];
                        writer.out.extend_from_slice(ch.encode_utf16(&mut buf));
                    }
                    None => writer
                        .out
                        .extend_from_slice(&input.units[unit..unit + len]),
                }
            }
            writer.close_piece(start);
        }

        let next_has_mark = index + 1 < run_count && input.layout.has_mark_before(index + 1);
        if numeric_marks
            && index + 1 < run_count
            && !next_has_mark
            && input.classes[right_edge].is_number()
        {
            writer.push_char(LRM);
        }
    }

    let mut out = writer.out;
    if options.contains(WriteOptions::OUTPUT_REVERSE) {
        let mut reversed = Vec::with_capacity(out.len());
        for piece in writer.pieces.iter().rev() {
            reversed.extend_from_slice(&out[piece.clone()]);
        }
        out = reversed;
    }

    if out.len() > capacity {
        panic!(
            "reordered output overflowed its buffer: {} units written, capacity {}",
            out.len(),
            capacity
        );
    }

    WriteDiagnostics {
        options,
        runs: run_count,
        layout_marks: input.layout.mark_count(),
        capacity,
        written: out.len(),
    }
    .log();

    out
}

struct Writer {
    out: Vec<u16>,
    /// Output ranges that stay intact under `OUTPUT_REVERSE`
    pieces: Vec<Range<usize>>,
}

impl Writer {
    fn push_char(&mut self, ch: char) {
        let start = self.out.len();
        let mut buf = [0u16; 2];
        self.out.extend_from_slice(ch.encode_utf16(&mut buf));
        self.close_piece(start);
    }

    fn close_piece(&mut self, start: usize) {
        if self.out.len() > start {
            self.pieces.push(start..self.out.len());
        }
    }
}

/// Group code-point spans into clusters, as index ranges into `spans`.
///
/// With `keep_combining` a base character and the combining marks after it
/// form one cluster; otherwise every code point stands alone.
fn group(input: &WriteInput<'_>, spans: &[(usize, usize)], keep_combining: bool) -> Vec<Range<usize>> {
    let mut clusters: Vec<Range<usize>> = Vec::with_capacity(spans.len());
    for (i, &(unit, _)) in spans.iter().enumerate() {
        let combining = keep_combining
            && char::from_u32(text::code_point_at(input.units, unit))
                .is_some_and(|ch| input.classifier.is_combining_mark(ch));
        match clusters.last_mut() {
            Some(cluster) if combining => cluster.end = i + 1,
            _ => clusters.push(i..i + 1),
        }
    }
    clusters
}
