//! Property tests for mirror passes.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use proptest::prelude::*;
use tempfile::tempdir;

use quire::data::{mirror_tree, FileFilter};

fn tree() -> impl Strategy<Value = BTreeMap<String, Vec<u8>>> {
    let segment = "[a-z]{1,6}";
    let path = proptest::collection::vec(segment, 1..=3).prop_map(|parts| parts.join("/"));
    let body = proptest::collection::vec(any::<u8>(), 0..64);
    proptest::collection::btree_map(path, body, 0..12)
        // "a" and "a/b" cannot both be files
        .prop_filter("no file is a prefix dir of another", |files| {
            files.keys().all(|k| {
                !files
                    .keys()
                    .any(|other| other != k && other.starts_with(&format!("{k}/")))
            })
        })
}

fn write_tree(root: &Path, files: &BTreeMap<String, Vec<u8>>) {
    for (relative, body) in files {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }
}

fn read_tree(root: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut files = BTreeMap::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path);
            } else {
                let relative = path.strip_prefix(root).unwrap();
                let key = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
                    .join("/");
                files.insert(key, fs::read(&path).unwrap());
            }
        }
    }
    files
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: after a pass the destination holds exactly the source files,
    /// whatever the destination held before.
    #[test]
    fn property_mirror_matches_source(before in tree(), after in tree()) {
        let dir = tempdir().unwrap();
        let source = dir.path().join("source");
        let destination = dir.path().join("store/content");
        fs::create_dir_all(&source).unwrap();

        write_tree(&source, &before);
        mirror_tree(&source, &destination, &FileFilter::all()).unwrap();

        fs::remove_dir_all(&source).unwrap();
        fs::create_dir_all(&source).unwrap();
        write_tree(&source, &after);
        let report = mirror_tree(&source, &destination, &FileFilter::all()).unwrap();

        prop_assert_eq!(report.files, after.len());
        prop_assert_eq!(
            report.bytes,
            after.values().map(|b| b.len() as u64).sum::<u64>()
        );
        prop_assert_eq!(read_tree(&destination), after);
    }
}
