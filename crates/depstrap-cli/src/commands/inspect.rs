use super::{json_pretty, EXIT_SUCCESS};
use depstrap_schema::{read_manifest_file, LibraryEntry};
use std::path::Path;

fn coordinate(lib: &LibraryEntry) -> String {
    match &lib.classifier {
        Some(c) => format!("{}:{}:{}:{c}", lib.group, lib.name, lib.version),
        None => format!("{}:{}:{}", lib.group, lib.name, lib.version),
    }
}

/// Print a written manifest with namespaces decoded back to dotted form.
pub fn run(manifest: &Path, json: bool) -> Result<u8, String> {
    let doc = read_manifest_file(manifest).map_err(|e| e.to_string())?;

    if json {
        let libraries: Vec<_> = doc
            .libraries
            .iter()
            .map(|lib| {
                serde_json::json!({
                    "coordinate": coordinate(lib),
                    "checksum": lib.checksum,
                })
            })
            .collect();
        let relocations = doc.relocations.as_ref().map(|map| {
            map.iter()
                .map(|r| serde_json::json!({"from": r.from, "to": r.to}))
                .collect::<Vec<_>>()
        });
        let payload = serde_json::json!({
            "version": doc.version,
            "libraries": libraries,
            "repositories": doc.repositories,
            "relocations": relocations,
        });
        println!("{}", json_pretty(&payload)?);
    } else {
        println!("version:      {}", doc.version);
        println!("libraries:    {}", doc.libraries.len());
        for lib in &doc.libraries {
            let checksum = lib.checksum.as_deref().unwrap_or("(no checksum)");
            println!("  {}  {checksum}", coordinate(lib));
        }
        println!("repositories: {}", doc.repositories.len());
        for repo in &doc.repositories {
            println!("  {repo}");
        }
        match &doc.relocations {
            Some(map) => {
                println!("relocations:  {}", map.len());
                for r in map.iter() {
                    println!("  {} -> {}", r.from, r.to);
                }
            }
            None => println!("relocations:  (none recorded)"),
        }
    }
    Ok(EXIT_SUCCESS)
}
