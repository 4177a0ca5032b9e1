//! Manifest generation pipeline for depstrap.
//!
//! This crate turns a resolved dependency graph into a `BootstrapManifest`:
//! pattern-based filtering (`DependencyFilter`), SHA-256 checksums over artifact
//! bytes, network repository selection, best-effort relocation extraction from
//! an optional repackaging tool (`RelocationSource`), assembly
//! (`ManifestBuilder`), and atomic persistence. `Generator` ties these together
//! as the single build-step entry point.

pub mod builder;
pub mod checksum;
pub mod filter;
pub mod generator;
pub mod output;
pub mod relocation;
pub mod repository;

pub use builder::ManifestBuilder;
pub use checksum::{checksum_bytes, checksum_file};
pub use filter::{DependencyFilter, FilterDecision};
pub use generator::{GenerateResult, Generator};
pub use output::{default_manifest_path, resource_dir, write_manifest, MANIFEST_FILE_NAME};
pub use relocation::{
    extract_relocations, ConfiguredRepackager, RelocationError, RelocationSource, Relocator,
    Repackager, SIMPLE_RELOCATOR,
};
pub use repository::{is_network_url, network_repositories};

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors. Any of these aborts the build before a manifest is written.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("description error: {0}")]
    Description(#[from] depstrap_schema::DescriptionError),
    #[error("invalid {list} pattern '{pattern}': {source}")]
    InvalidPattern {
        list: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("failed to read artifact for {coordinate} at {}: {source}", .path.display())]
    ArtifactRead {
        coordinate: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write manifest to {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("manifest error: {0}")]
    Manifest(#[from] depstrap_schema::ManifestError),
}
