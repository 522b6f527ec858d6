// this_file: crates/ubidi-cli/src/jobs.rs

//! Batch job specification and JSONL result format.

use crate::limits::{validate_text, MAX_JOBS_PER_SPEC};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use ubidi::{AnalysisCache, BidiConfig, ParagraphOptions, UnitReport, WriteOptions};

/// Complete batch job specification (top-level JSON input).
#[derive(Debug, Clone, Deserialize)]
pub struct JobSpec {
    /// API version (must be "1.0")
    pub version: String,
    /// List of analysis jobs to process
    pub jobs: Vec<Job>,
}

impl JobSpec {
    pub fn validate(&self) -> Result<()> {
        if self.version != "1.0" {
            bail!("Unsupported API version '{}', expected '1.0'", self.version);
        }
        if self.jobs.is_empty() {
            bail!("Jobs array is empty");
        }
        if self.jobs.len() > MAX_JOBS_PER_SPEC {
            bail!(
                "Too many jobs in spec: {} (max: {})",
                self.jobs.len(),
                MAX_JOBS_PER_SPEC
            );
        }
        for job in &self.jobs {
            job.validate()?;
        }
        Ok(())
    }
}

/// Single analysis job.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Unique job identifier for correlation with results
    pub id: String,
    /// Text to analyze
    pub text: String,
    /// Paragraph options, repaired when out of range
    #[serde(default)]
    pub options: ParagraphOptions,
    /// Raw write option bits for the reordered text
    #[serde(default)]
    pub write_options: u16,
    /// Optional `[start, limit)` line to report instead of the whole text
    #[serde(default)]
    pub line: Option<(usize, usize)>,
}

impl Job {
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            bail!("Job ID is empty");
        }
        validate_text(&self.text)
    }
}

/// Job result (JSONL output line).
#[derive(Debug, Clone, Serialize)]
pub struct JobResult {
    /// Job ID (matches input)
    pub id: String,
    /// Status: "success" or "error"
    pub status: String,
    /// Analysis report (only present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<UnitReport>,
    /// Error message (only present on error)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Time spent on the job (milliseconds)
    pub elapsed_ms: f64,
}

impl JobResult {
    fn success(id: &str, report: UnitReport, started: Instant) -> Self {
        Self {
            id: id.to_owned(),
            status: "success".into(),
            report: Some(report),
            error: None,
            elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
        }
    }

    fn error(id: &str, error: impl ToString, started: Instant) -> Self {
        Self {
            id: id.to_owned(),
            status: "error".into(),
            report: None,
            error: Some(error.to_string()),
            elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
        }
    }
}

/// Analyze one job. Failures become error results.
pub fn process_job(job: &Job, cache: &AnalysisCache) -> JobResult {
    let started = Instant::now();
    if let Err(err) = job.validate() {
        return JobResult::error(&job.id, err, started);
    }

    let config = BidiConfig::from_options(&job.options);
    let write_options = WriteOptions::from_raw(job.write_options);
    let paragraph = match cache.get_or_analyze(&job.text, &config) {
        Ok(paragraph) => paragraph,
        Err(err) => return JobResult::error(&job.id, err, started),
    };

    let report = match job.line {
        None => UnitReport::for_paragraph(&paragraph, write_options),
        Some((start, limit)) => match paragraph.line(start, limit) {
            Ok(line) => UnitReport::for_line(&line, write_options),
            Err(err) => return JobResult::error(&job.id, err, started),
        },
    };
    log::debug!("Processed job {} ({} code units)", job.id, report.length);
    JobResult::success(&job.id, report, started)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(json: &str) -> Job {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn process_success() {
        let cache = AnalysisCache::new(4);
        let result = process_job(
            &job(r#"{"id":"a","text":"abc אב","writeOptions":2}"#),
            &cache,
        );
        assert_eq!(result.status, "success");
        let report = result.report.unwrap();
        assert_eq!(report.reordered, "abc \u{5d1}\u{5d0}");
        assert_eq!(report.runs.len(), 2);
    }

    #[test]
    fn process_line() {
        let cache = AnalysisCache::new(4);
        let result = process_job(
            &job(r#"{"id":"l","text":"abc אב","line":[4,6]}"#),
            &cache,
        );
        assert_eq!(result.report.unwrap().reordered, "\u{5d1}\u{5d0}");
    }

    #[test]
    fn process_bad_line_is_error() {
        let cache = AnalysisCache::new(4);
        let result = process_job(&job(r#"{"id":"x","text":"abc","line":[2,9]}"#), &cache);
        assert_eq!(result.status, "error");
        assert!(result.report.is_none());
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("report").is_none());
        assert!(json["error"].as_str().unwrap().contains("9"));
    }

    #[test]
    fn spec_version_checked() {
        let spec: JobSpec =
            serde_json::from_str(r#"{"version":"2.0","jobs":[{"id":"a","text":"x"}]}"#).unwrap();
        assert!(spec.validate().is_err());
    }
}
