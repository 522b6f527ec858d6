// this_file: backends/ubidi-core/src/diagnostics.rs

//! Analysis diagnostics helpers for structured debug logging.

use crate::options::{BidiConfig, WriteOptions};
use crate::types::{Direction, Level};
use log::{debug, log_enabled, Level as LogLevel};

/// Lightweight snapshot of a finished analysis.
#[derive(Debug)]
pub struct AnalysisDiagnostics<'a> {
    classifier: &'a str,
    length: usize,
    processed: usize,
    paragraphs: usize,
    para_level: Level,
    direction: Direction,
    config: &'a BidiConfig,
}

impl<'a> AnalysisDiagnostics<'a> {
    /// Capture the snapshot for one analyzed unit.
    pub fn new(
        classifier: &'a str,
        length: usize,
        processed: usize,
        paragraphs: usize,
        para_level: Level,
        direction: Direction,
        config: &'a BidiConfig,
    ) -> Self {
        Self {
            classifier,
            length,
            processed,
            paragraphs,
            para_level,
            direction,
            config,
        }
    }

    /// Emit the snapshot at debug level when logging is enabled.
    pub fn log(&self) {
        if log_enabled!(LogLevel::Debug) {
            debug!(
                target: "ubidi::resolve",
                "classifier={classifier} length={length} processed={processed} paragraphs={paragraphs} para_level={para_level} requested={requested:#x} direction={direction} mode={mode:?} options={options:#x} prologue={prologue} epilogue={epilogue} explicit_levels={explicit}",
                classifier = self.classifier,
                length = self.length,
                processed = self.processed,
                paragraphs = self.paragraphs,
                para_level = self.para_level,
                requested = self.config.para_level.raw(),
                direction = self.direction,
                mode = self.config.effective_mode(),
                options = self.config.reordering_options.bits(),
                prologue = self.config.prologue.chars().count(),
                epilogue = self.config.epilogue.chars().count(),
                explicit = self.config.embedding_levels.is_some(),
            );
        }
    }
}

/// Snapshot of a reordered-output write.
#[derive(Debug)]
pub struct WriteDiagnostics {
    pub options: WriteOptions,
    pub runs: usize,
    /// Marks inserted by the layout
    pub layout_marks: usize,
    pub capacity: usize,
    pub written: usize,
}

impl WriteDiagnostics {
    pub fn log(&self) {
        if log_enabled!(LogLevel::Debug) {
            debug!(
                target: "ubidi::write",
                "options={options:#x} runs={runs} layout_marks={marks} capacity={capacity} written={written}",
                options = self.options.bits(),
                runs = self.runs,
                marks = self.layout_marks,
                capacity = self.capacity,
                written = self.written,
            );
        }
    }
}
