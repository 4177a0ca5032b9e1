use crate::builder::ManifestBuilder;
use crate::filter::DependencyFilter;
use crate::output::{default_manifest_path, resource_dir, write_manifest};
use crate::relocation::{ConfiguredRepackager, RelocationSource};
use crate::BuildError;
use depstrap_schema::{parse_description_file, BootstrapManifest, BuildDescription};
use std::path::{Path, PathBuf};
use tracing::info;

/// The manifest-generation build step.
///
/// Construction validates the description and compiles the filter patterns, so
/// configuration errors surface before any artifact is read.
pub struct Generator {
    description: BuildDescription,
    builder: ManifestBuilder,
    output: Option<PathBuf>,
}

/// Result of a successful generation.
#[derive(Debug)]
pub struct GenerateResult {
    pub manifest: BootstrapManifest,
    pub manifest_path: PathBuf,
    /// Directory to register as a resource root of the packaged artifact.
    pub resource_dir: PathBuf,
}

impl Generator {
    pub fn new(description: BuildDescription) -> Result<Self, BuildError> {
        description.validate()?;
        let filter = DependencyFilter::from_section(&description.filter)?;
        Ok(Self {
            description,
            builder: ManifestBuilder::new(filter),
            output: None,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, BuildError> {
        info!("loading build description from {}", path.display());
        Self::new(parse_description_file(path)?)
    }

    /// Write the manifest to `path` instead of the default location.
    #[must_use]
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    pub fn description(&self) -> &BuildDescription {
        &self.description
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_manifest_path(&self.description.resolved_build_dir()))
    }

    /// Build the manifest in memory without writing it.
    pub fn build_manifest(&self) -> Result<BootstrapManifest, BuildError> {
        let coordinates = self.description.coordinates();
        let repositories = self.description.repository_decls();
        let repackager = self
            .description
            .repackage
            .clone()
            .map(ConfiguredRepackager::new);
        let relocations = match &repackager {
            Some(repackager) => RelocationSource::Available(repackager),
            None => RelocationSource::Absent,
        };
        self.builder.build(&coordinates, &repositories, relocations)
    }

    /// Build and persist the manifest. Nothing is written unless the whole
    /// document was built.
    pub fn run(&self) -> Result<GenerateResult, BuildError> {
        let manifest = self.build_manifest()?;
        let manifest_path = self.manifest_path();
        write_manifest(&manifest_path, &manifest)?;

        let resource_dir = match &self.output {
            Some(path) => override_resource_dir(path),
            None => resource_dir(&self.description.resolved_build_dir()),
        };
        info!("wrote {}", manifest_path.display());
        Ok(GenerateResult {
            manifest,
            manifest_path,
            resource_dir,
        })
    }
}

/// Directory holding an explicitly chosen manifest path.
fn override_resource_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
