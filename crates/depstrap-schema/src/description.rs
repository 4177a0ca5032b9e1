use crate::coordinate::{DependencyCoordinate, RepositoryDecl, RepositoryKind, JAR_TYPE};
use crate::namespace::WIRE_PLACEHOLDER;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Version of the `depstrap.toml` layout understood by this crate.
pub const DESCRIPTION_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum DescriptionError {
    #[error("failed to read build description: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse build description: {0}")]
    ParseToml(#[from] toml::de::Error),
    #[error("unsupported description_version: {0}, expected {expected}", expected = DESCRIPTION_VERSION)]
    UnsupportedVersion(u32),
    #[error("dependency #{index}: '{field}' must not be empty")]
    EmptyDependencyField { index: usize, field: &'static str },
    #[error("dependency #{index}: group '{group}' contains reserved token '{token}'", token = WIRE_PLACEHOLDER)]
    ReservedTokenInGroup { index: usize, group: String },
    #[error("repository #{index}: url must not be empty")]
    EmptyRepositoryUrl { index: usize },
}

/// Everything the host build hands to the manifest generator: the resolved
/// dependency graph, repository declarations, pattern configuration, and the
/// repackaging tool's settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BuildDescription {
    pub description_version: u32,
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,
    #[serde(default)]
    pub filter: FilterSection,
    #[serde(default, rename = "dependency")]
    pub dependencies: Vec<DependencySpec>,
    #[serde(default, rename = "repository")]
    pub repositories: Vec<RepositorySpec>,
    /// Configuration owned by the repackaging tool. Kept untyped: its shape is
    /// that tool's business, and only introspected when relocations are extracted.
    #[serde(default)]
    pub repackage: Option<toml::Value>,
    /// Directory relative paths are resolved against.
    #[serde(skip, default = "default_base_dir")]
    pub base_dir: PathBuf,
}

/// Regex patterns matched against `group:name:version`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FilterSection {
    /// Dependencies left out of the manifest entirely.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Dependencies listed without a checksum.
    #[serde(default)]
    pub no_checksum: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DependencySpec {
    pub group: String,
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub classifier: Option<String>,
    #[serde(rename = "type", default = "default_artifact_type")]
    pub artifact_type: String,
    pub file: PathBuf,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RepositorySpec {
    pub url: String,
    #[serde(default)]
    pub kind: RepositoryKind,
}

fn default_build_dir() -> PathBuf {
    PathBuf::from("build")
}

fn default_base_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_artifact_type() -> String {
    JAR_TYPE.to_owned()
}

impl BuildDescription {
    /// Check the version gate and required fields.
    pub fn validate(&self) -> Result<(), DescriptionError> {
        if self.description_version != DESCRIPTION_VERSION {
            return Err(DescriptionError::UnsupportedVersion(
                self.description_version,
            ));
        }
        for (index, dep) in self.dependencies.iter().enumerate() {
            for (field, value) in [
                ("group", &dep.group),
                ("name", &dep.name),
                ("version", &dep.version),
            ] {
                if value.trim().is_empty() {
                    return Err(DescriptionError::EmptyDependencyField { index, field });
                }
            }
            // The wire encoding is only reversible without the placeholder.
            if dep.group.contains(WIRE_PLACEHOLDER) {
                return Err(DescriptionError::ReservedTokenInGroup {
                    index,
                    group: dep.group.clone(),
                });
            }
        }
        for (index, repo) in self.repositories.iter().enumerate() {
            if repo.url.trim().is_empty() {
                return Err(DescriptionError::EmptyRepositoryUrl { index });
            }
        }
        Ok(())
    }

    /// Build output directory, resolved against [`Self::base_dir`].
    pub fn resolved_build_dir(&self) -> PathBuf {
        self.base_dir.join(&self.build_dir)
    }

    /// Resolved coordinates in declaration order, artifact paths made absolute
    /// relative to the description.
    pub fn coordinates(&self) -> Vec<DependencyCoordinate> {
        self.dependencies
            .iter()
            .map(|dep| DependencyCoordinate {
                group: dep.group.clone(),
                name: dep.name.clone(),
                version: dep.version.clone(),
                classifier: dep.classifier.clone(),
                artifact_type: dep.artifact_type.clone(),
                file: self.base_dir.join(&dep.file),
            })
            .collect()
    }

    pub fn repository_decls(&self) -> Vec<RepositoryDecl> {
        self.repositories
            .iter()
            .map(|repo| RepositoryDecl {
                url: repo.url.clone(),
                kind: repo.kind,
            })
            .collect()
    }
}

pub fn parse_description_str(input: &str) -> Result<BuildDescription, DescriptionError> {
    let description: BuildDescription = toml::from_str(input)?;
    description.validate()?;
    Ok(description)
}

/// Parse and validate a description file; relative paths inside it resolve
/// against the file's directory.
pub fn parse_description_file(path: impl AsRef<Path>) -> Result<BuildDescription, DescriptionError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let mut description = parse_description_str(&content)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        description.base_dir = parent.to_path_buf();
    }
    Ok(description)
}
