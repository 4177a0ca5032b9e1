use crate::BuildError;
use depstrap_schema::{DependencyCoordinate, FilterSection};
use regex::Regex;

/// Compiled exclusion patterns, validated once and immutable afterwards.
///
/// Every pattern must match the whole `group:name:version` string; a pattern
/// that only matches a substring does not apply.
#[derive(Debug, Clone, Default)]
pub struct DependencyFilter {
    exclude: Vec<Regex>,
    no_checksum: Vec<Regex>,
}

/// Outcome of filtering one coordinate.
///
/// The two checksum-skip causes are kept apart so callers can tell which fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterDecision {
    /// Left out of the manifest entirely.
    pub excluded: bool,
    /// Matched a no-checksum pattern.
    pub skip_by_pattern: bool,
    /// Artifact is not a binary archive.
    pub skip_by_type: bool,
}

impl FilterDecision {
    pub fn skip_checksum(&self) -> bool {
        self.skip_by_pattern || self.skip_by_type
    }

    /// True when the entry is emitted and must carry a checksum.
    pub fn needs_checksum(&self) -> bool {
        !self.excluded && !self.skip_checksum()
    }
}

impl DependencyFilter {
    /// Compile both pattern lists. Fails on the first malformed pattern.
    pub fn new<S: AsRef<str>>(exclude: &[S], no_checksum: &[S]) -> Result<Self, BuildError> {
        Ok(Self {
            exclude: compile_all("exclude", exclude)?,
            no_checksum: compile_all("no-checksum", no_checksum)?,
        })
    }

    pub fn from_section(section: &FilterSection) -> Result<Self, BuildError> {
        Self::new(section.exclude.as_slice(), section.no_checksum.as_slice())
    }

    pub fn is_excluded(&self, canonical: &str) -> bool {
        self.exclude.iter().any(|re| re.is_match(canonical))
    }

    pub fn skips_checksum(&self, canonical: &str) -> bool {
        self.no_checksum.iter().any(|re| re.is_match(canonical))
    }

    pub fn evaluate(&self, coordinate: &DependencyCoordinate) -> FilterDecision {
        let canonical = coordinate.canonical();
        FilterDecision {
            excluded: self.is_excluded(&canonical),
            skip_by_pattern: self.skips_checksum(&canonical),
            skip_by_type: !coordinate.is_archive(),
        }
    }
}

fn compile_all<S: AsRef<str>>(list: &'static str, patterns: &[S]) -> Result<Vec<Regex>, BuildError> {
    patterns
        .iter()
        .map(|pattern| {
            let pattern = pattern.as_ref();
            Regex::new(&format!("^(?:{pattern})$")).map_err(|source| BuildError::InvalidPattern {
                list,
                pattern: pattern.to_owned(),
                source,
            })
        })
        .collect()
}
