//! Network interface discovery tests

use std::collections::HashSet;
use std::fs;

use container_exporter::metrics::enumerate_interfaces;
use tempfile::TempDir;

#[test]
fn test_lists_every_interface() {
    let dir = TempDir::new().unwrap();
    for name in ["eth0", "lo", "veth1a2b"] {
        fs::create_dir(dir.path().join(name)).unwrap();
    }

    let found: HashSet<String> = enumerate_interfaces(dir.path()).into_iter().collect();
    let expected: HashSet<String> = ["eth0", "lo", "veth1a2b"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(found, expected);
}

#[test]
fn test_empty_directory_yields_no_interfaces() {
    let dir = TempDir::new().unwrap();
    assert!(enumerate_interfaces(dir.path()).is_empty());
}

#[test]
fn test_missing_directory_yields_no_interfaces() {
    let dir = TempDir::new().unwrap();
    assert!(enumerate_interfaces(&dir.path().join("net")).is_empty());
}

#[test]
fn test_file_instead_of_directory_yields_no_interfaces() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("net");
    fs::write(&file, "not a directory").unwrap();
    assert!(enumerate_interfaces(&file).is_empty());
}
