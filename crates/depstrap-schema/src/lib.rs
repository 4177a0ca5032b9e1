//! Wire format, namespace encoding, and build description for depstrap.
//!
//! This crate defines the schema layer: the `BootstrapManifest` document a
//! runtime dependency loader reads (with its deterministic JSON rendering and
//! version-gated reader), the reversible namespace encoding used for group
//! identifiers and relocation prefixes, the resolved dependency and repository
//! types handed over by the host build, and the `depstrap.toml` build
//! description that carries them.

pub mod coordinate;
pub mod description;
pub mod manifest;
pub mod namespace;
pub mod types;

pub use coordinate::{CoordinateId, DependencyCoordinate, RepositoryDecl, RepositoryKind, JAR_TYPE};
pub use description::{
    parse_description_file, parse_description_str, BuildDescription, DependencySpec,
    DescriptionError, FilterSection, RepositorySpec, DESCRIPTION_VERSION,
};
pub use manifest::{
    parse_manifest_str, read_manifest_file, BootstrapManifest, LibraryEntry, ManifestError,
    Relocation, RelocationMap, MANIFEST_FORMAT_VERSION,
};
pub use namespace::{decode_namespace, encode_namespace, NAMESPACE_SEPARATOR, WIRE_PLACEHOLDER};
pub use types::{Checksum, RepositoryUrl};
