// this_file: crates/ubidi-cli/src/limits.rs

//! Input size limits for CLI payloads.

use anyhow::{bail, Result};

/// Maximum allowed JSON input size (10MB)
pub const MAX_JSON_SIZE: usize = 10 * 1024 * 1024;
/// Maximum allowed number of jobs per spec
pub const MAX_JOBS_PER_SPEC: usize = 10_000;
/// Maximum allowed text length in UTF-16 code units
pub const MAX_TEXT_LENGTH: usize = 1_000_000;

/// Validate JSON input size
pub fn validate_json_size(json: &str, max_bytes: usize) -> Result<()> {
    if json.len() > max_bytes {
        bail!(
            "JSON payload too large: {} bytes (max: {} bytes)",
            json.len(),
            max_bytes
        );
    }
    Ok(())
}

/// Validate the length of a text to analyze
pub fn validate_text(text: &str) -> Result<()> {
    let units = text.encode_utf16().count();
    if units > MAX_TEXT_LENGTH {
        bail!("Text too long: {units} code units (max: {MAX_TEXT_LENGTH})");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_size_limit() {
        assert!(validate_json_size("{}", 2).is_ok());
        assert!(validate_json_size("{ }", 2).is_err());
    }

    #[test]
    fn test_text_limit() {
        assert!(validate_text("abc").is_ok());
        let long = "a".repeat(MAX_TEXT_LENGTH + 1);
        assert!(validate_text(&long).unwrap_err().to_string().contains("Text too long"));
    }
}
