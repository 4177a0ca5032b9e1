use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Artifact type of a binary archive; only these artifacts carry a checksum.
pub const JAR_TYPE: &str = "jar";

/// A dependency as resolved by the host build graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyCoordinate {
    pub group: String,
    pub name: String,
    pub version: String,
    pub classifier: Option<String>,
    /// Artifact type/extension, e.g. `jar` or `pom`.
    pub artifact_type: String,
    /// Location of the resolved artifact's bytes.
    pub file: PathBuf,
}

impl DependencyCoordinate {
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
        file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
            classifier: None,
            artifact_type: JAR_TYPE.to_owned(),
            file: file.into(),
        }
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    #[must_use]
    pub fn with_type(mut self, artifact_type: impl Into<String>) -> Self {
        self.artifact_type = artifact_type.into();
        self
    }

    /// `group:name:version`, the string exclusion patterns are matched against.
    pub fn canonical(&self) -> String {
        format!("{}:{}:{}", self.group, self.name, self.version)
    }

    pub fn is_archive(&self) -> bool {
        self.artifact_type == JAR_TYPE
    }

    pub fn identity(&self) -> CoordinateId {
        CoordinateId {
            group: self.group.clone(),
            name: self.name.clone(),
            version: self.version.clone(),
            classifier: self.classifier.clone(),
        }
    }
}

/// Identity of a dependency within a manifest: (group, name, version, classifier).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoordinateId {
    pub group: String,
    pub name: String,
    pub version: String,
    pub classifier: Option<String>,
}

impl fmt::Display for CoordinateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{classifier}")?;
        }
        Ok(())
    }
}

/// How a repository is laid out and reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepositoryKind {
    /// Maven-layout repository, the only layout the runtime loader fetches from.
    #[default]
    Maven,
    /// The user's local Maven cache.
    MavenLocal,
    FlatDir,
    Ivy,
}

/// A repository as declared in the build configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryDecl {
    pub url: String,
    pub kind: RepositoryKind,
}

impl RepositoryDecl {
    pub fn maven(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind: RepositoryKind::Maven,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_omits_classifier_and_type() {
        let coord = DependencyCoordinate::new("com.example", "core", "1.2.0", "core.jar")
            .with_classifier("linux")
            .with_type("zip");
        assert_eq!(coord.canonical(), "com.example:core:1.2.0");
    }

    #[test]
    fn identity_includes_classifier() {
        let plain = DependencyCoordinate::new("com.example", "core", "1.2.0", "a.jar");
        let native = plain.clone().with_classifier("natives");
        assert_ne!(plain.identity(), native.identity());
        assert_eq!(native.identity().to_string(), "com.example:core:1.2.0:natives");
        assert_eq!(plain.identity().to_string(), "com.example:core:1.2.0");
    }

    #[test]
    fn default_type_is_archive() {
        let coord = DependencyCoordinate::new("g", "n", "1", "n.jar");
        assert!(coord.is_archive());
        assert!(!coord.with_type("pom").is_archive());
    }

    #[test]
    fn repository_kind_parses_kebab_case() {
        let kind: RepositoryKind = serde_json::from_str("\"maven-local\"").unwrap();
        assert_eq!(kind, RepositoryKind::MavenLocal);
        assert_eq!(RepositoryKind::default(), RepositoryKind::Maven);
    }
}
