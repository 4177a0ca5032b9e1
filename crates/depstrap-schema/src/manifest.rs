use crate::namespace::{decode_namespace, encode_namespace};
use crate::types::{Checksum, RepositoryUrl};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Schema version written to every manifest. Readers reject any other value.
pub const MANIFEST_FORMAT_VERSION: u32 = 0;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse manifest: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unsupported manifest version: {0}, expected {expected}", expected = MANIFEST_FORMAT_VERSION)]
    UnsupportedVersion(u32),
}

/// The document a runtime loader reads to fetch, verify, and relocate dependencies.
///
/// Field order here is the key order on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BootstrapManifest {
    pub version: u32,
    pub libraries: Vec<LibraryEntry>,
    pub repositories: Vec<RepositoryUrl>,
    /// `None` when the build has no repackaging step; the key is then omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relocations: Option<RelocationMap>,
}

/// One dependency the loader must fetch.
///
/// `group` is held in its dotted form and encoded only on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LibraryEntry {
    #[serde(with = "crate::namespace::wire")]
    pub group: String,
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<Checksum>,
}

/// A namespace rewrite applied by the repackaging step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    pub from: String,
    pub to: String,
}

impl Relocation {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Relocations in extraction order, rendered as a JSON object.
///
/// Serialization walks the vector, so key order on the wire is exactly the
/// order the repackaging tool reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelocationMap(Vec<Relocation>);

impl RelocationMap {
    pub fn new(relocations: Vec<Relocation>) -> Self {
        Self(relocations)
    }

    pub fn as_slice(&self) -> &[Relocation] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Relocation> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Relocation>> for RelocationMap {
    fn from(relocations: Vec<Relocation>) -> Self {
        Self(relocations)
    }
}

impl<'a> IntoIterator for &'a RelocationMap {
    type Item = &'a Relocation;
    type IntoIter = std::slice::Iter<'a, Relocation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for RelocationMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for relocation in &self.0 {
            map.serialize_entry(
                &encode_namespace(&relocation.from),
                &encode_namespace(&relocation.to),
            )?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RelocationMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RelocationVisitor;

        impl<'de> Visitor<'de> for RelocationVisitor {
            type Value = RelocationMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping relocated prefixes")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut relocations = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((from, to)) = access.next_entry::<String, String>()? {
                    relocations.push(Relocation {
                        from: decode_namespace(&from),
                        to: decode_namespace(&to),
                    });
                }
                Ok(RelocationMap(relocations))
            }
        }

        deserializer.deserialize_map(RelocationVisitor)
    }
}

impl BootstrapManifest {
    /// An empty manifest at the current format version.
    pub fn empty() -> Self {
        Self {
            version: MANIFEST_FORMAT_VERSION,
            libraries: Vec::new(),
            repositories: Vec::new(),
            relocations: None,
        }
    }

    /// Render the compact wire form. Identical manifests render to identical bytes.
    pub fn to_json(&self) -> Result<String, ManifestError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ManifestError> {
        Ok(serde_json::to_vec(self)?)
    }
}

#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

/// Parse a manifest, rejecting any format version this crate does not write.
pub fn parse_manifest_str(input: &str) -> Result<BootstrapManifest, ManifestError> {
    let probe: VersionProbe = serde_json::from_str(input)?;
    if probe.version != MANIFEST_FORMAT_VERSION {
        return Err(ManifestError::UnsupportedVersion(probe.version));
    }
    Ok(serde_json::from_str(input)?)
}

pub fn read_manifest_file(path: impl AsRef<Path>) -> Result<BootstrapManifest, ManifestError> {
    let content = fs::read_to_string(path)?;
    parse_manifest_str(&content)
}
