//! Best-effort extraction of package relocations from a repackaging step.
//!
//! The repackaging tool owns its configuration, so depstrap reads it through
//! the [`Repackager`] / [`Relocator`] capability traits instead of a schema of
//! its own. Nothing in this module can fail a build: unreadable rules are
//! logged at debug level and skipped.

use depstrap_schema::{Relocation, RelocationMap, WIRE_PLACEHOLDER};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, warn};

/// Kind reported by the plain prefix-to-prefix relocator, the only shape understood.
pub const SIMPLE_RELOCATOR: &str = "simple";

/// Field holding the original package prefix.
pub const PATTERN_FIELD: &str = "pattern";

/// Field holding the relocated package prefix.
pub const SHADED_PATTERN_FIELD: &str = "shadedPattern";

/// Non-fatal problems reading the repackaging tool's configuration.
#[derive(Debug, Error)]
pub enum RelocationError {
    #[error("repackaging configuration unreadable: {0}")]
    Unreadable(String),
    #[error("relocator has no field '{0}'")]
    MissingField(String),
    #[error("relocator field '{field}' is a {found}, expected a string")]
    FieldType { field: String, found: String },
}

/// One relocation rule as the repackaging tool stores it.
pub trait Relocator {
    /// Rule shape; only [`SIMPLE_RELOCATOR`] is extracted.
    fn kind(&self) -> &str;

    /// Read a named string field of the rule.
    fn field(&self, name: &str) -> Result<String, RelocationError>;
}

/// A configured repackaging step.
pub trait Repackager {
    /// The configured rules, in the order the tool applies them.
    fn relocators(&self) -> Result<Vec<Box<dyn Relocator + '_>>, RelocationError>;
}

/// Whether the build has a repackaging step at all.
#[derive(Clone, Copy)]
pub enum RelocationSource<'a> {
    /// No repackaging step; the manifest carries no relocations key.
    Absent,
    Available(&'a dyn Repackager),
}

/// Collect relocations from `source`.
///
/// `None` means there is no repackaging step. A configured step always yields
/// `Some`, possibly empty when no rule could be read. When two rules share a
/// `from` prefix only the first is kept, since the tool applies the first match.
pub fn extract_relocations(source: RelocationSource<'_>) -> Option<RelocationMap> {
    let repackager = match source {
        RelocationSource::Absent => {
            debug!("no repackaging step configured, omitting relocations");
            return None;
        }
        RelocationSource::Available(repackager) => repackager,
    };

    let relocators = match repackager.relocators() {
        Ok(relocators) => relocators,
        Err(e) => {
            debug!("could not resolve relocators: {e}");
            return Some(RelocationMap::default());
        }
    };

    let mut seen = HashSet::new();
    let mut relocations = Vec::with_capacity(relocators.len());
    for (index, relocator) in relocators.iter().enumerate() {
        if relocator.kind() != SIMPLE_RELOCATOR {
            debug!("relocator #{index}: unsupported relocator type {}", relocator.kind());
            continue;
        }
        let relocation = match read_simple(relocator.as_ref()) {
            Ok(relocation) => relocation,
            Err(e) => {
                debug!("relocator #{index}: cannot extract relocation: {e}");
                continue;
            }
        };
        if relocation.from.contains(WIRE_PLACEHOLDER) || relocation.to.contains(WIRE_PLACEHOLDER) {
            debug!(
                "relocator #{index}: '{}' -> '{}' contains reserved token '{WIRE_PLACEHOLDER}', skipping",
                relocation.from, relocation.to
            );
            continue;
        }
        if !seen.insert(relocation.from.clone()) {
            debug!(
                "relocator #{index}: '{}' already relocated by an earlier rule, skipping",
                relocation.from
            );
            continue;
        }
        relocations.push(relocation);
    }

    debug!("extracted {} relocation(s)", relocations.len());
    Some(RelocationMap::new(relocations))
}

fn read_simple(relocator: &dyn Relocator) -> Result<Relocation, RelocationError> {
    let from = relocator.field(PATTERN_FIELD)?;
    let to = relocator.field(SHADED_PATTERN_FIELD)?;
    Ok(Relocation { from, to })
}

/// Repackaging settings read from the untyped `[repackage]` table of a build
/// description.
///
/// Expected shape is `relocators = [{ kind = "simple", pattern = "...",
/// shadedPattern = "..." }, ...]`; anything else degrades.
#[derive(Debug, Clone)]
pub struct ConfiguredRepackager {
    config: toml::Value,
}

impl ConfiguredRepackager {
    pub fn new(config: toml::Value) -> Self {
        Self { config }
    }
}

impl Repackager for ConfiguredRepackager {
    fn relocators(&self) -> Result<Vec<Box<dyn Relocator + '_>>, RelocationError> {
        let Some(table) = self.config.as_table() else {
            warn!(
                "repackage settings are a {}, not a table; ignoring them",
                self.config.type_str()
            );
            return Err(RelocationError::Unreadable(format!(
                "expected a table, found a {}",
                self.config.type_str()
            )));
        };
        let Some(list) = table.get("relocators") else {
            return Ok(Vec::new());
        };
        let Some(items) = list.as_array() else {
            return Err(RelocationError::Unreadable(format!(
                "'relocators' is a {}, expected an array",
                list.type_str()
            )));
        };
        Ok(items
            .iter()
            .map(|value| Box::new(ValueRelocator(value)) as Box<dyn Relocator + '_>)
            .collect())
    }
}

struct ValueRelocator<'a>(&'a toml::Value);

impl Relocator for ValueRelocator<'_> {
    fn kind(&self) -> &str {
        self.0
            .get("kind")
            .and_then(toml::Value::as_str)
            .unwrap_or_else(|| self.0.type_str())
    }

    fn field(&self, name: &str) -> Result<String, RelocationError> {
        let value = self
            .0
            .get(name)
            .ok_or_else(|| RelocationError::MissingField(name.to_owned()))?;
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| RelocationError::FieldType {
                field: name.to_owned(),
                found: value.type_str().to_owned(),
            })
    }
}
