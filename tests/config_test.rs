//! Config discovery from relative paths
//!
//! Kept in its own test binary, with a single test, because it changes the
//! working directory and HOME.

use std::fs;
use std::path::Path;

use fcst::{Config, DumpFormat};

#[test]
fn test_discovery_from_relative_path() {
    let dir = tempfile::tempdir().unwrap();
    let top = dir.path().canonicalize().unwrap();
    let src = top.join("src");
    fs::create_dir(&src).unwrap();
    fs::write(top.join("fcst.toml"), "format = \"tree\"\n").unwrap();
    fs::write(src.join("fcst.toml"), "exclude = [\"build\"]\n").unwrap();
    fs::write(src.join("a.f90"), "x = 1\n").unwrap();

    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(&src).unwrap();
    // HOME is the working directory, so src/fcst.toml is both the home
    // config and the nearest ancestor
    std::env::set_var("HOME", &src);

    let relative = Config::discover_config_files(Path::new("a.f90"));
    let absolute = Config::discover_config_files(&src.join("a.f90"));
    let config = Config::from_discovered_files(Path::new("a.f90"));

    std::env::set_current_dir(previous).unwrap();

    assert_eq!(relative, absolute);
    assert!(relative.contains(&top.join("fcst.toml")));
    assert_eq!(
        relative.iter().filter(|p| **p == src.join("fcst.toml")).count(),
        1
    );
    assert_eq!(config.format, DumpFormat::Tree);
    assert_eq!(config.exclude, vec!["build".to_string()]);
}
