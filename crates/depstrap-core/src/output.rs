use crate::BuildError;
use depstrap_schema::BootstrapManifest;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Directory under the build output that is packaged as a resource root.
pub const OUTPUT_DIR_NAME: &str = "depstrap";

/// File name the runtime loader looks up inside the packaged artifact.
pub const MANIFEST_FILE_NAME: &str = "depstrap.json";

/// Resource directory to register with the packaged artifact.
pub fn resource_dir(build_dir: &Path) -> PathBuf {
    build_dir.join(OUTPUT_DIR_NAME)
}

pub fn default_manifest_path(build_dir: &Path) -> PathBuf {
    resource_dir(build_dir).join(MANIFEST_FILE_NAME)
}

/// Serialize `manifest` and atomically replace `path` with it.
///
/// The document is rendered in full before anything touches the disk, then
/// written to a temporary file in the destination directory and renamed over
/// `path`. An interrupted build leaves either the previous file or none.
pub fn write_manifest(path: &Path, manifest: &BootstrapManifest) -> Result<(), BuildError> {
    let content = manifest.to_bytes()?;
    let output_err = |source| BuildError::Output {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(output_err)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(output_err)?;
    tmp.write_all(&content).map_err(output_err)?;
    tmp.as_file().sync_all().map_err(output_err)?;
    tmp.persist(path).map_err(|e| output_err(e.error))?;
    // Fsync parent directory so the rename survives power loss.
    if let Ok(f) = fs::File::open(dir) {
        let _ = f.sync_all();
    }
    debug!("wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
