use regex::{Regex, RegexBuilder};

use crate::errors::{Result, UaDetectorError};

/// A rule file regex, compiled once at load time.
///
/// The wire form is ECMA-style `/body/flags`. Honored flags are exactly
/// `i` (case-insensitive), `s` (dot matches newline) and `m` (multi-line);
/// any other flag character fails the load.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    source: String,
    flags: String,
    regex: Regex,
}

impl CompiledPattern {
    /// Parse and compile a delimited `/body/flags` expression.
    pub fn compile(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if !trimmed.starts_with('/') {
            return Err(UaDetectorError::data_corrupt(format!(
                "regex '{}' is not delimited with '/'",
                raw
            )));
        }
        let end = trimmed.rfind('/').unwrap_or(0);
        if end == 0 {
            return Err(UaDetectorError::data_corrupt(format!(
                "regex '{}' is missing its closing '/'",
                raw
            )));
        }

        let source = &trimmed[1..end];
        let flags = &trimmed[end + 1..];

        let mut builder = RegexBuilder::new(source);
        for flag in flags.chars() {
            match flag {
                'i' => builder.case_insensitive(true),
                's' => builder.dot_matches_new_line(true),
                'm' => builder.multi_line(true),
                other => {
                    return Err(UaDetectorError::data_corrupt(format!(
                        "regex '{}' uses unsupported flag '{}'",
                        raw, other
                    )));
                }
            };
        }

        let regex = builder.build().map_err(|e| {
            UaDetectorError::data_corrupt(format!("regex '{}' failed to compile: {}", raw, e))
        })?;

        Ok(Self {
            source: source.to_string(),
            flags: flags.to_string(),
            regex,
        })
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> &str {
        &self.flags
    }

    /// Render back to the delimited wire form.
    pub fn to_wire(&self) -> String {
        format!("/{}/{}", self.source, self.flags)
    }
}

// Regex carries no usable equality; two patterns are equal when their wire
// forms are.
impl PartialEq for CompiledPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.flags == other.flags
    }
}

impl Eq for CompiledPattern {}
