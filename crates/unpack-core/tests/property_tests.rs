//! Property-based tests for the member filter and extraction fidelity.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::Path;
use std::path::PathBuf;

use proptest::prelude::*;
use tempfile::TempDir;
use unpack_core::extract_archive;
use unpack_core::filter::MemberDecision;
use unpack_core::filter::MemberKind;
use unpack_core::filter::screen_member;
use unpack_core::report::NoopSink;
use unpack_core::test_utils;
use unpack_core::test_utils::TarTestBuilder;
use unpack_core::types::DestDir;

proptest! {
    /// Any member name with leading slashes is rewritten to a relative path.
    #[test]
    fn prop_leading_slashes_always_stripped(
        slashes in 1usize..4,
        tail in "[a-z]{1,8}(/[a-z]{1,8}){0,3}"
    ) {
        let name = format!("{}{tail}", "/".repeat(slashes));
        let decision = screen_member(MemberKind::File, Path::new(&name), None);
        match decision {
            MemberDecision::Rewrite { path, .. } => {
                prop_assert!(path.is_relative());
                prop_assert_eq!(path, PathBuf::from(tail));
            }
            other => prop_assert!(false, "expected rewrite, got {:?}", other),
        }
    }

    /// Clean relative names pass through untouched.
    #[test]
    fn prop_clean_relative_names_pass_through(
        name in "[a-z][a-z0-9_]{0,10}(/[a-z][a-z0-9_]{0,10}){0,4}"
    ) {
        let decision = screen_member(MemberKind::File, Path::new(&name), None);
        prop_assert!(matches!(decision, MemberDecision::PassThrough));
    }

    /// Names reaching above the destination are always skipped, for every
    /// non-special member kind.
    #[test]
    fn prop_traversal_names_skipped(
        depth in 1usize..5,
        tail in "[a-z]{1,8}"
    ) {
        let name = format!("{}{tail}", "../".repeat(depth));
        for kind in [MemberKind::File, MemberKind::Directory, MemberKind::Symlink] {
            let decision = screen_member(kind, Path::new(&name), Some(Path::new("t")));
            prop_assert!(
                matches!(decision, MemberDecision::Skip { .. }),
                "{:?} with name {name} must be skipped", kind
            );
        }
    }

    /// Tar extraction reproduces every stored file byte for byte.
    #[test]
    fn prop_tar_roundtrip_preserves_content(
        files in prop::collection::btree_map(
            "[a-z]{1,8}(/[a-z]{1,8}){0,2}",
            prop::collection::vec(any::<u8>(), 0..2048),
            1..6
        )
    ) {
        // A name cannot double as a directory of another name.
        for a in files.keys() {
            for b in files.keys() {
                prop_assume!(a == b || !b.starts_with(&format!("{a}/")));
            }
        }

        let mut builder = TarTestBuilder::new();
        for (name, data) in &files {
            builder = builder.add_file(name, data);
        }
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("gen.tar");
        std::fs::write(&source, builder.build()).unwrap();

        let dest = DestDir::create(temp.path().join("out")).unwrap();
        extract_archive(&source, &dest, &mut NoopSink).unwrap();

        for (name, data) in &files {
            let extracted = std::fs::read(dest.join(Path::new(name))).unwrap();
            prop_assert_eq!(&extracted, data, "mismatch for {}", name);
        }
    }

    /// Plain gzip streams decompress to the original bytes whatever they are.
    #[test]
    fn prop_plain_gzip_roundtrip(
        payload in prop::collection::vec(any::<u8>(), 0..1024)
    ) {
        // A payload that happens to look like a tar header would be routed
        // to the tar path instead, so steer clear of that corner.
        prop_assume!(payload.get(257..262) != Some(b"ustar".as_slice()));

        let temp = TempDir::new().unwrap();
        let source = temp.path().join("blob.gz");
        std::fs::write(&source, test_utils::gzip_compress(&payload)).unwrap();

        let dest = DestDir::create(temp.path().join("out")).unwrap();
        extract_archive(&source, &dest, &mut NoopSink).unwrap();

        let out = std::fs::read(dest.join(Path::new("blob"))).unwrap();
        prop_assert_eq!(out, payload);
    }
}
