//! Property tests for the filesystem facade.

use burrow_kernel::FileSystem;
use proptest::prelude::*;

/// Plain path component: no separators, never `.` or `..`.
fn component() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,7}"
}

fn components() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(component(), 1..6)
}

/// A path mixing real names with `.`, `..`, and empty components.
fn noisy_path() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            3 => component(),
            1 => Just("..".to_string()),
            1 => Just(".".to_string()),
            1 => Just(String::new()),
        ],
        0..12,
    )
    .prop_map(|parts| parts.join("/"))
}

proptest! {
    #[test]
    fn mkdir_parents_is_idempotent(parts in components(), absolute in any::<bool>()) {
        let mut fs = FileSystem::new();
        let path = if absolute { format!("/{}", parts.join("/")) } else { parts.join("/") };

        let first = fs.create_directory_path(&path).unwrap();
        let count = fs.tree().live_count();
        let second = fs.create_directory_path(&path).unwrap();

        prop_assert_eq!(first, second);
        prop_assert_eq!(fs.tree().live_count(), count);
        prop_assert!(fs.is_directory(&path));
    }

    #[test]
    fn write_then_read_returns_content(
        name in component(),
        first in prop::collection::vec(any::<u8>(), 0..256),
        second in prop::collection::vec(any::<u8>(), 0..256),
    ) {
        let mut fs = FileSystem::new();
        fs.write_file(&name, &first).unwrap();
        prop_assert_eq!(fs.read_file(&name).unwrap(), first.as_slice());

        fs.write_file(&name, &second).unwrap();
        prop_assert_eq!(fs.read_file(&name).unwrap(), second.as_slice());
        prop_assert_eq!(fs.stat(&name).unwrap().size, second.len() as u64);
    }

    #[test]
    fn append_concatenates(
        name in component(),
        chunks in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..32), 0..8),
    ) {
        let mut fs = FileSystem::new();
        fs.create_file(&name, b"").unwrap();
        for chunk in &chunks {
            fs.append_file(&name, chunk).unwrap();
        }
        let expected: Vec<u8> = chunks.concat();
        prop_assert_eq!(fs.read_file(&name).unwrap(), expected.as_slice());
    }

    #[test]
    fn dotdot_never_escapes_root(path in noisy_path()) {
        let mut fs = FileSystem::new();
        fs.create_directory_path("/a/b/c").unwrap();
        // Create every named component so resolution succeeds.
        let _ = fs.create_directory_path(&format!("/{path}"));

        let absolute = format!("/{path}");
        if let Ok(()) = fs.change_directory(&absolute) {
            let cwd = fs.current_path();
            prop_assert!(cwd.starts_with('/'));
            prop_assert!(!cwd.contains(".."));
            prop_assert!(!cwd.contains("//"));
        }

        fs.change_directory("/").unwrap();
        for _ in 0..8 {
            fs.change_directory("..").unwrap();
        }
        prop_assert_eq!(fs.current_path(), "/");
    }

    #[test]
    fn listing_matches_creation_order(names in prop::collection::hash_set(component(), 1..12)) {
        let mut fs = FileSystem::new();
        let names: Vec<String> = names.into_iter().collect();
        for name in &names {
            fs.create_file(name, b"").unwrap();
        }
        let listed: Vec<String> = fs
            .list_directory("/")
            .unwrap()
            .into_iter()
            .map(|entry| entry.name)
            .collect();
        prop_assert_eq!(listed, names);
    }
}
