//! Tool location tests

use super::*;
use std::fs;
use tempfile::TempDir;

fn install(dir: &Path, name: &str) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(format!("{}{}", name, std::env::consts::EXE_SUFFIX));
    fs::write(&path, "#!/bin/sh\n").unwrap();
    path
}

#[test]
fn test_falls_back_to_bare_name() {
    let locator = ToolLocator::new("gofmt");
    let tool = locator.locate();

    assert_eq!(tool.source, ToolSource::SearchPath);
    assert_eq!(tool.path, PathBuf::from(locator.executable_name()));
}

#[test]
fn test_prefers_local_bin_dir() {
    let temp = TempDir::new().unwrap();
    let local = temp.path().join("gobin");
    let root = temp.path().join("goroot");
    let expected = install(&local, "gofmt");
    install(&root.join("bin"), "gofmt");

    let tool = ToolLocator::new("gofmt")
        .with_local_bin_dir(Some(local))
        .with_root_dir(Some(root))
        .locate();

    assert_eq!(tool.source, ToolSource::LocalBin);
    assert_eq!(tool.path, expected);
}

#[test]
fn test_uses_root_bin_when_local_missing() {
    let temp = TempDir::new().unwrap();
    let local = temp.path().join("gobin");
    fs::create_dir_all(&local).unwrap();
    let root = temp.path().join("goroot");
    let expected = install(&root.join("bin"), "gofmt");

    let tool = ToolLocator::new("gofmt")
        .with_local_bin_dir(Some(local))
        .with_root_dir(Some(root))
        .locate();

    assert_eq!(tool.source, ToolSource::RootBin);
    assert_eq!(tool.path, expected);
}

#[test]
fn test_missing_everywhere_uses_search_path() {
    let temp = TempDir::new().unwrap();

    let tool = ToolLocator::new("gofmt")
        .with_local_bin_dir(Some(temp.path().join("gobin")))
        .with_root_dir(Some(temp.path().join("goroot")))
        .locate();

    assert_eq!(tool.source, ToolSource::SearchPath);
}

#[test]
fn test_directory_with_tool_name_is_ignored() {
    let temp = TempDir::new().unwrap();
    let local = temp.path().to_path_buf();
    fs::create_dir_all(local.join(format!("gofmt{}", std::env::consts::EXE_SUFFIX))).unwrap();

    let tool = ToolLocator::new("gofmt").with_local_bin_dir(Some(local)).locate();

    assert_eq!(tool.source, ToolSource::SearchPath);
}

#[test]
fn test_empty_directories_are_unset() {
    let tool = ToolLocator::new("gofmt")
        .with_local_bin_dir(Some(PathBuf::new()))
        .with_root_dir(Some(PathBuf::new()))
        .locate();

    assert_eq!(tool.source, ToolSource::SearchPath);
}

#[test]
fn test_from_config() {
    let temp = TempDir::new().unwrap();
    let expected = install(&temp.path().join("bin"), "myfmt");
    let config = ToolConfig {
        name: "myfmt".to_string(),
        local_bin_dir: None,
        root_dir: Some(temp.path().to_path_buf()),
    };

    let tool = ToolLocator::from_config(&config).locate();

    assert_eq!(tool.source, ToolSource::RootBin);
    assert_eq!(tool.path, expected);
}

#[test]
fn test_executable_name_has_platform_suffix() {
    let name = ToolLocator::new("gofmt").executable_name();
    if cfg!(windows) {
        assert_eq!(name, "gofmt.exe");
    } else {
        assert_eq!(name, "gofmt");
    }
}
