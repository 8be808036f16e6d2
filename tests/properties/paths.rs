//! Property tests for store path containment and slugs.

use std::path::{Path, PathBuf};

use proptest::prelude::*;

use quire::fs::resolve_within;
use quire::parser::derive_slug;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: any accepted path resolves under the root.
    #[test]
    fn property_resolved_paths_stay_under_root(
        parts in proptest::collection::vec("(\\.\\.|\\.|[a-z]{1,5})", 0..6),
        absolute in any::<bool>(),
    ) {
        let root = Path::new("/srv/static");
        let mut relative = PathBuf::new();
        if absolute {
            relative.push("/");
        }
        for part in &parts {
            relative.push(part);
        }

        if let Ok(resolved) = resolve_within(root, &relative) {
            prop_assert!(resolved.starts_with(root));
            prop_assert!(!parts.iter().any(|p| p == ".."));
            prop_assert!(!absolute);
        }
    }

    /// PROPERTY: index files take their folder's name, others their stem.
    #[test]
    fn property_slug_from_path(folder in "[a-z][a-z0-9-]{0,12}", stem in "[a-z][a-z0-9-]{0,12}") {
        let index = PathBuf::from(format!("content/{folder}/index.md"));
        prop_assert_eq!(derive_slug(&index), folder.clone());

        if stem != "index" {
            let page = PathBuf::from(format!("content/{folder}/{stem}.md"));
            prop_assert_eq!(derive_slug(&page), stem);
        }
    }
}
