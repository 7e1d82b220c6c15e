use funcgraph::config::load_ignore_patterns;
use std::fs;

#[test]
fn comments_and_blank_lines_are_dropped() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("FuncIgnore.db");
    fs::write(&path, "# generated code\n\n  pattern  \n").unwrap();

    let patterns = load_ignore_patterns(&path).unwrap();
    assert_eq!(patterns, vec!["pattern".to_string()]);
}

#[test]
fn missing_ignore_file_is_an_empty_list() {
    let dir = tempfile::TempDir::new().unwrap();
    let patterns = load_ignore_patterns(&dir.path().join("FuncIgnore.db")).unwrap();
    assert!(patterns.is_empty());
}

#[test]
fn patterns_keep_their_order() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("ignore.db");
    fs::write(&path, "vendor/\r\n**/*_test.cpp\r\n#tests/\r\nbuild").unwrap();

    let patterns = load_ignore_patterns(&path).unwrap();
    assert_eq!(patterns, vec!["vendor/", "**/*_test.cpp", "build"]);
}
