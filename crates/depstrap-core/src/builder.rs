use crate::checksum::checksum_file;
use crate::filter::DependencyFilter;
use crate::relocation::{extract_relocations, RelocationSource};
use crate::repository::network_repositories;
use crate::BuildError;
use depstrap_schema::{
    BootstrapManifest, DependencyCoordinate, LibraryEntry, RepositoryDecl,
    MANIFEST_FORMAT_VERSION,
};
use std::collections::HashSet;
use tracing::{debug, info};

/// Assembles a [`BootstrapManifest`] from a resolved dependency graph.
///
/// The builder holds only immutable, pre-validated configuration; every call to
/// [`ManifestBuilder::build`] starts from scratch.
#[derive(Debug, Clone, Default)]
pub struct ManifestBuilder {
    filter: DependencyFilter,
}

impl ManifestBuilder {
    pub fn new(filter: DependencyFilter) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> &DependencyFilter {
        &self.filter
    }

    /// Build the manifest.
    ///
    /// Coordinates and repositories keep their input order. An artifact that
    /// needs a checksum but cannot be read aborts the whole build.
    pub fn build(
        &self,
        coordinates: &[DependencyCoordinate],
        repositories: &[RepositoryDecl],
        relocations: RelocationSource<'_>,
    ) -> Result<BootstrapManifest, BuildError> {
        let mut libraries = Vec::with_capacity(coordinates.len());
        let mut seen = HashSet::with_capacity(coordinates.len());
        let mut excluded = 0usize;

        for coordinate in coordinates {
            let decision = self.filter.evaluate(coordinate);
            if decision.excluded {
                debug!("excluding {}", coordinate.canonical());
                excluded += 1;
                continue;
            }
            let identity = coordinate.identity();
            if !seen.insert(identity) {
                debug!("{} already listed, skipping duplicate", coordinate.identity());
                continue;
            }

            let checksum = if decision.skip_checksum() {
                debug!(
                    "no checksum for {} (pattern: {}, type '{}': {})",
                    coordinate.canonical(),
                    decision.skip_by_pattern,
                    coordinate.artifact_type,
                    decision.skip_by_type
                );
                None
            } else {
                let checksum =
                    checksum_file(&coordinate.file).map_err(|source| BuildError::ArtifactRead {
                        coordinate: coordinate.identity().to_string(),
                        path: coordinate.file.clone(),
                        source,
                    })?;
                Some(checksum)
            };

            libraries.push(LibraryEntry {
                group: coordinate.group.clone(),
                name: coordinate.name.clone(),
                version: coordinate.version.clone(),
                classifier: coordinate.classifier.clone(),
                checksum,
            });
        }

        let repositories = network_repositories(repositories);
        let relocations = extract_relocations(relocations);

        info!(
            "manifest: {} libraries ({excluded} excluded), {} repositories, {}",
            libraries.len(),
            repositories.len(),
            relocations.as_ref().map_or_else(
                || "no relocations".to_owned(),
                |r| format!("{} relocations", r.len())
            )
        );

        Ok(BootstrapManifest {
            version: MANIFEST_FORMAT_VERSION,
            libraries,
            repositories,
            relocations,
        })
    }
}
