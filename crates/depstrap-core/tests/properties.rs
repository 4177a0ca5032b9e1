//! Property tests over generated dependency graphs.

use depstrap_core::{DependencyFilter, ManifestBuilder, RelocationSource};
use depstrap_schema::{parse_manifest_str, DependencyCoordinate};
use proptest::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
struct Dep {
    group: String,
    name: String,
    version: String,
    jar: bool,
    trusted: bool,
    internal: bool,
}

fn dep_strategy() -> impl Strategy<Value = Dep> {
    (
        "[a-z]{1,6}(\\.[a-z]{1,6}){0,3}",
        "[a-w][a-z0-9-]{0,8}",
        "[0-9]{1,2}\\.[0-9]{1,2}",
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(group, name, version, jar, trusted, internal)| Dep {
            group,
            name,
            version,
            jar,
            trusted,
            internal,
        })
}

/// Unique identities, so every input is either emitted or excluded.
fn deps_strategy() -> impl Strategy<Value = Vec<Dep>> {
    prop::collection::vec(dep_strategy(), 0..12).prop_map(|deps| {
        let mut seen = HashSet::new();
        deps.into_iter()
            .filter(|d| seen.insert((d.group.clone(), d.name.clone(), d.version.clone())))
            .collect()
    })
}

/// Internal deps get the `-internal` version suffix matched by the exclude
/// pattern; trusted deps get an `x-` name prefix matched by the no-checksum one.
fn materialize(dir: &Path, deps: &[Dep]) -> Vec<DependencyCoordinate> {
    deps.iter()
        .enumerate()
        .map(|(i, d)| {
            let file = dir.join(format!("{i}.bin"));
            fs::write(&file, format!("{}:{}:{}", d.group, d.name, d.version)).unwrap();
            let name = if d.trusted {
                format!("x-{}", d.name)
            } else {
                d.name.clone()
            };
            let version = if d.internal {
                format!("{}-internal", d.version)
            } else {
                d.version.clone()
            };
            let coord = DependencyCoordinate::new(&d.group, name, version, file);
            if d.jar {
                coord
            } else {
                coord.with_type("pom")
            }
        })
        .collect()
}

fn builder() -> ManifestBuilder {
    ManifestBuilder::new(DependencyFilter::new(&[".*:.*:.*-internal"], &[".*:x-.*:.*"]).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn entry_count_is_inputs_minus_excluded(deps in deps_strategy()) {
        let dir = tempfile::tempdir().unwrap();
        let coords = materialize(dir.path(), &deps);
        let manifest = builder().build(&coords, &[], RelocationSource::Absent).unwrap();
        let excluded = deps.iter().filter(|d| d.internal).count();
        prop_assert_eq!(manifest.libraries.len(), deps.len() - excluded);
    }

    #[test]
    fn checksum_present_iff_jar_and_not_skipped(deps in deps_strategy()) {
        let dir = tempfile::tempdir().unwrap();
        let coords = materialize(dir.path(), &deps);
        let manifest = builder().build(&coords, &[], RelocationSource::Absent).unwrap();
        let kept: Vec<&Dep> = deps.iter().filter(|d| !d.internal).collect();
        prop_assert_eq!(kept.len(), manifest.libraries.len());
        for (dep, entry) in kept.iter().zip(&manifest.libraries) {
            prop_assert_eq!(entry.checksum.is_some(), dep.jar && !dep.trusted);
        }
    }

    #[test]
    fn serialization_is_deterministic_and_reversible(deps in deps_strategy()) {
        let dir = tempfile::tempdir().unwrap();
        let coords = materialize(dir.path(), &deps);
        let first = builder().build(&coords, &[], RelocationSource::Absent).unwrap();
        let second = builder().build(&coords, &[], RelocationSource::Absent).unwrap();
        let bytes = first.to_json().unwrap();
        prop_assert_eq!(&bytes, &second.to_json().unwrap());

        let read = parse_manifest_str(&bytes).unwrap();
        prop_assert_eq!(read, first);
    }
}
