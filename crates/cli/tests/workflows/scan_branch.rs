//! Branch scanning through the CLI

use crate::common::{Fixture, BASIC_CONFIG};
use crate::p4sync;
use anyhow::Result;

const MANIFEST: &str = "\
# depot files known to exist
//depot/proj/build.xml
//depot/proj/branch1/build.xml
//depot/proj/branch1/src/file.c
";

#[test]
fn test_deepest_marker_wins() -> Result<()> {
    let fx = Fixture::new();
    let manifest = fx.write("manifest.txt", MANIFEST);

    let result = p4sync!(
        fx.path(), "scan", "//depot/proj/branch1/src/file.c",
        "--manifest", &manifest, "--marker", "build.xml"
    )
    .assert_success()?;

    assert!(result.stdout.contains("branch1"));
    assert!(result.stdout.contains("//depot/proj"));
    Ok(())
}

#[test]
fn test_marker_from_config() -> Result<()> {
    let fx = Fixture::new();
    let config = fx.write("config.toml", BASIC_CONFIG);
    let manifest = fx.write("manifest.txt", "//depot/game/rel-2/build.xml\n");

    let result = p4sync!(
        fx.path(), "--config", &config, "scan", "//depot/game/rel-2/engine/render.cpp",
        "--manifest", &manifest
    )
    .assert_success()?;

    assert!(result.stdout.contains("rel-2"));
    assert!(result.stdout.contains("//depot/game"));
    Ok(())
}

#[test]
fn test_no_marker_is_not_an_error() -> Result<()> {
    let fx = Fixture::new();
    let manifest = fx.write("manifest.txt", MANIFEST);

    let result = p4sync!(
        fx.path(), "scan", "//depot/other/x/y.c",
        "--manifest", &manifest, "--marker", "pom.xml"
    )
    .assert_success()?;

    assert!(result.stdout.contains("no pom.xml found"));
    Ok(())
}

#[test]
fn test_invalid_depot_path_fails() -> Result<()> {
    let fx = Fixture::new();
    let manifest = fx.write("manifest.txt", MANIFEST);

    let result = p4sync!(
        fx.path(), "scan", "depot/proj/a.c",
        "--manifest", &manifest, "--marker", "build.xml"
    )
    .assert_failure()?;

    assert!(result.stderr.contains("Invalid depot path"));
    Ok(())
}
