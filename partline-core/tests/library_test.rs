//! Resolution against a part library laid out on disk.

use std::fs;
use std::path::Path;

use nalgebra::Point3;
use partline_core::{PartError, PartLibrary, ResolveWarning};
use tempfile::TempDir;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// A brick built from a sub-part and a primitive, one of them missing.
fn brick_library() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(
        root,
        "parts/3001.dat",
        "0 Brick  2 x  4\n\
         0 Name: 3001.dat\n\
         0 Author: Test\n\
         \n\
         1 16 0 0 0 1 0 0 0 1 0 0 0 1 s\\3001s01.dat\n\
         1 16 0 24 0 1 0 0 0 1 0 0 0 1 missing-primitive.dat\n\
         2 24 -40 0 -20 40 0 -20\n\
         3 16 0 0 0 1 0 0 0 0 1\n",
    );
    write(
        root,
        "parts/s/3001s01.dat",
        "0 ~Brick  2 x  4 without Front Face\n\
         1 16 10 0 0 2 0 0 0 1 0 0 0 1 box.dat\n",
    );
    write(root, "p/box.dat", "0 Box\n2 24 0 0 0 1 0 0\n2 24 0 0 0 0 1 0\n");

    dir
}

#[test]
fn resolves_nested_library_from_disk() {
    let dir = brick_library();
    let library = PartLibrary::new(dir.path());

    let resolved = library.resolve("3001");
    assert_eq!(resolved.name, "Brick  2 x  4");
    assert_eq!(resolved.edges.len(), 3);

    // own edge first, untransformed
    assert_eq!(resolved.edges[0].start, Point3::new(-40.0, 0.0, -20.0));

    // box.dat scaled by 2 along x and moved by 10
    assert_eq!(resolved.edges[1].start, Point3::new(10.0, 0.0, 0.0));
    assert_eq!(resolved.edges[1].end, Point3::new(12.0, 0.0, 0.0));
    assert_eq!(resolved.edges[2].end, Point3::new(10.0, 1.0, 0.0));

    assert!(matches!(
        &resolved.warnings[..],
        [ResolveWarning::Unresolved { name, .. }] if name == "missing-primitive.dat"
    ));
}

#[test]
fn item_lookup_is_case_insensitive() {
    let dir = brick_library();
    let library = PartLibrary::new(dir.path());

    let upper = library.resolve("3001.DAT");
    let lower = library.resolve("3001.dat");
    assert_eq!(upper, lower);
}

#[test]
fn missing_root_degrades_or_errors() {
    let dir = brick_library();
    let library = PartLibrary::new(dir.path());

    let resolved = library.resolve("99999");
    assert!(resolved.edges.is_empty());

    match library.try_resolve("99999") {
        Err(PartError::NotFound { path, .. }) => {
            assert_eq!(path, dir.path().join("parts").join("99999.dat"));
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn depth_bound_applies_to_deep_chains() {
    let dir = TempDir::new().unwrap();
    for level in 0..10 {
        write(
            dir.path(),
            &format!("parts/level{level}.dat"),
            &format!("1 16 0 0 0 1 0 0 0 1 0 0 0 1 level{}.dat\n2 24 0 0 0 1 1 1\n", level + 1),
        );
    }

    let library = PartLibrary::new(dir.path()).with_max_depth(3);
    let resolved = library.resolve("level0");
    assert_eq!(resolved.edges.len(), 4);
    assert_eq!(
        resolved.warnings,
        vec![ResolveWarning::DepthExceeded {
            name: "level4.dat".to_string(),
            depth: 4,
        }]
    );
}

#[test]
fn invalid_utf8_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("parts/bad.dat");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, [0x32, 0x20, 0xff, 0xfe]).unwrap();

    let library = PartLibrary::new(dir.path());
    assert!(matches!(
        library.parse_file("bad.dat"),
        Err(PartError::Read { .. })
    ));
}
