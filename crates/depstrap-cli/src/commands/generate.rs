use super::{json_pretty, EXIT_SUCCESS};
use depstrap_core::Generator;
use std::path::Path;

pub fn run(description: &Path, output: Option<&Path>, json: bool) -> Result<u8, String> {
    let mut generator = Generator::from_file(description).map_err(|e| e.to_string())?;
    if let Some(path) = output {
        generator = generator.with_output(path);
    }
    let result = generator.run().map_err(|e| e.to_string())?;
    let manifest = &result.manifest;
    let relocations = manifest.relocations.as_ref().map(|r| r.len());

    if json {
        let payload = serde_json::json!({
            "manifest_path": result.manifest_path,
            "resource_dir": result.resource_dir,
            "libraries": manifest.libraries.len(),
            "checksummed": manifest.libraries.iter().filter(|l| l.checksum.is_some()).count(),
            "repositories": manifest.repositories.len(),
            "relocations": relocations,
        });
        println!("{}", json_pretty(&payload)?);
    } else {
        println!("wrote {}", result.manifest_path.display());
        println!("libraries:    {}", manifest.libraries.len());
        println!("repositories: {}", manifest.repositories.len());
        match relocations {
            Some(n) => println!("relocations:  {n}"),
            None => println!("relocations:  (no repackaging step)"),
        }
        println!("resource dir: {}", result.resource_dir.display());
    }
    Ok(EXIT_SUCCESS)
}
