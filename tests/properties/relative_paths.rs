//! Property tests for relative path handling and the exclude set.

use std::path::PathBuf;

use proptest::prelude::*;

use publisher::domain::value_objects::{join_remote, relative_posix, relative_remote, ExcludeSet};

fn segments() -> impl Strategy<Value = Vec<String>> {
    let segment = proptest::string::string_regex("[A-Za-z0-9._-]{1,12}")
        .unwrap()
        .prop_filter("no pseudo entries", |s| s != "." && s != "..");
    proptest::collection::vec(segment, 1..=5)
}

fn remote_root() -> impl Strategy<Value = String> {
    proptest::collection::vec("[a-z]{1,8}", 1..=3)
        .prop_map(|parts| format!("/{}", parts.join("/")))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Joining a relative path onto a root and stripping the root
    /// gives the relative path back.
    #[test]
    fn property_join_then_strip(root in remote_root(), parts in segments()) {
        let relative = parts.join("/");
        let full = join_remote(&root, &relative);
        prop_assert_eq!(relative_remote(&full, &root), Some(relative));
    }

    /// PROPERTY: Local relative paths always use `/`, whatever the platform.
    #[test]
    fn property_local_relative_is_posix(parts in segments()) {
        let root = PathBuf::from("project").join("dist");
        let mut path = root.clone();
        for part in &parts {
            path.push(part);
        }
        prop_assert_eq!(relative_posix(&path, &root), Some(parts.join("/")));
    }

    /// PROPERTY: An excluded directory covers every path below it but is
    /// only contained exactly.
    #[test]
    fn property_exclude_covers_descendants(dir in segments(), rest in segments()) {
        let excluded = dir.join("/");
        let set: ExcludeSet = [excluded.as_str()].into_iter().collect();
        let below = format!("{}/{}", excluded, rest.join("/"));

        prop_assert!(set.covers(&excluded));
        prop_assert!(set.covers(&below));
        prop_assert!(!set.contains(&below));
    }

    /// PROPERTY: A sibling that merely shares a prefix is not covered.
    #[test]
    fn property_prefix_sibling_not_covered(dir in segments(), suffix in "[a-z0-9]{1,4}") {
        let excluded = dir.join("/");
        let set: ExcludeSet = [excluded.as_str()].into_iter().collect();
        let sibling = format!("{}{}", excluded, suffix);

        prop_assert!(!set.covers(&sibling));
    }
}
