use funcgraph::core::ignore::IgnoreList;
use funcgraph::core::scanner::FileScanner;
use std::fs;
use std::path::Path;

fn touch<P: AsRef<Path>>(p: P) {
    fs::write(p, "// test").unwrap();
}

#[test]
fn scanner_keeps_c_and_cpp_translation_units() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("a")).unwrap();
    fs::create_dir_all(root.join("b")).unwrap();

    touch(root.join("a/main.cpp"));
    touch(root.join("a/legacy.c"));
    touch(root.join("b/engine.cc"));
    touch(root.join("b/render.cxx"));
    touch(root.join("b/engine.h")); // headers come in through includes
    touch(root.join("b/readme.txt"));

    let files = FileScanner::new().scan_directory(root).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();

    assert_eq!(names, vec!["a/legacy.c", "a/main.cpp", "b/engine.cc", "b/render.cxx"]);
}

#[test]
fn scanner_skips_ignored_paths() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::create_dir_all(root.join("third_party/zlib")).unwrap();

    touch(root.join("src/app.cpp"));
    touch(root.join("src/app_test.cpp"));
    touch(root.join("third_party/zlib/inflate.c"));

    let patterns = ["third_party".to_string(), "**/*_test.cpp".to_string()];
    let ignore = IgnoreList::new(&patterns).unwrap();
    let files = FileScanner::with_ignore_list(ignore)
        .scan_directory(root)
        .unwrap();

    assert_eq!(files, vec![root.join("src/app.cpp")]);
}

#[test]
fn scanner_rejects_missing_roots() {
    let dir = tempfile::TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    assert!(FileScanner::new().scan_directory(&missing).is_err());
}
