//! Revision selection through the CLI

use crate::common::{Fixture, BASIC_CONFIG, CHANGES};
use crate::p4sync;
use anyhow::Result;

fn setup(config: &str) -> (Fixture, String, String) {
    let fx = Fixture::new();
    let config = fx.write("config.toml", config);
    let changes = fx.write("changes.json", CHANGES);
    (fx, config, changes)
}

#[test]
fn test_newest_surviving_change() -> Result<()> {
    let (fx, config, changes) = setup(BASIC_CONFIG);
    let result = p4sync!(fx.path(), "--config", &config, "select", "--changes", &changes)
        .assert_success()?;

    // 105 touches docs, 104 is by buildbot
    assert_eq!(result.lines(), vec!["@103"]);
    Ok(())
}

#[test]
fn test_per_change_polling_is_oldest_first() -> Result<()> {
    let config = BASIC_CONFIG.replacen(
        "[[filters.rules]]",
        "[filters]\nper_change_only = true\n\n[[filters.rules]]",
        1,
    );
    let (fx, config, changes) = setup(&config);

    let result = p4sync!(fx.path(), "--config", &config, "select", "--changes", &changes)
        .assert_success()?;
    assert_eq!(result.lines(), vec!["@102", "@103"]);

    let result = p4sync!(fx.path(), "--config", &config, "select", "--changes", &changes, "--mode", "build")
        .assert_success()?;
    assert_eq!(result.lines(), vec!["@103"]);
    Ok(())
}

#[test]
fn test_explicit_pins() -> Result<()> {
    let (fx, config, changes) = setup(BASIC_CONFIG);

    let result = p4sync!(fx.path(), "--config", &config, "select", "--changes", &changes, "--label", "rel-1")
        .assert_success()?;
    assert_eq!(result.lines(), vec!["@rel-1"]);

    let result = p4sync!(
        fx.path(), "--config", &config, "select", "--changes", &changes,
        "--review", "200", "--base", "103"
    )
    .assert_success()?;
    assert_eq!(result.lines(), vec!["@=200"]);

    let result = p4sync!(fx.path(), "--config", &config, "select", "--changes", &changes, "--change", "102")
        .assert_success()?;
    assert_eq!(result.lines(), vec!["@102"]);
    Ok(())
}

#[test]
fn test_conflicting_pins_rejected() -> Result<()> {
    let (fx, config, changes) = setup(BASIC_CONFIG);
    p4sync!(
        fx.path(), "--config", &config, "select", "--changes", &changes,
        "--label", "rel-1", "--change", "5"
    )
    .assert_failure()?;

    p4sync!(fx.path(), "--config", &config, "select", "--changes", &changes, "--review", "7")
        .assert_failure()?;
    Ok(())
}

#[test]
fn test_no_eligible_change() -> Result<()> {
    let (fx, config, _) = setup(BASIC_CONFIG);
    let changes = fx.write("empty.json", "[]");

    let result = p4sync!(fx.path(), "--config", &config, "select", "--changes", &changes)
        .assert_success()?;
    assert!(result.stdout.contains("no change"));
    Ok(())
}

#[test]
fn test_unreadable_feed_is_an_error() -> Result<()> {
    let (fx, config, _) = setup(BASIC_CONFIG);
    let missing = fx.path().join("missing.json").to_string_lossy().to_string();

    let result = p4sync!(fx.path(), "--config", &config, "select", "--changes", &missing)
        .assert_failure()?;
    assert!(!result.stdout.contains("no change"));
    assert!(result.stderr.contains("change source failed"));
    Ok(())
}

#[test]
fn test_bad_pattern_is_skipped() -> Result<()> {
    let config = BASIC_CONFIG.replacen(
        "[populate]",
        "[[filters.rules]]\ntype = \"pattern\"\npatterns = [\"(\", '//depot/proj/main/src/.*\\.c']\n\n[populate]",
        1,
    );
    let (fx, config, changes) = setup(&config);

    let result = p4sync!(fx.path(), "--config", &config, "select", "--changes", &changes)
        .assert_success()?;
    assert_eq!(result.lines(), vec!["@103"]);
    assert!(result.stderr.contains("skipping filter pattern"));
    Ok(())
}

#[test]
fn test_selected_changes_annotated_with_branch() -> Result<()> {
    let config = BASIC_CONFIG.replacen(
        "[[filters.rules]]",
        "[filters]\nper_change_only = true\n\n[[filters.rules]]",
        1,
    );
    let (fx, config, changes) = setup(&config);
    let manifest = fx.write("manifest.txt", "//depot/proj/main/build.xml\n");

    let result = p4sync!(
        fx.path(), "--config", &config, "select", "--changes", &changes,
        "--manifest", &manifest
    )
    .assert_success()?;

    let lines = result.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("@102 ") && lines[0].contains("main"));
    assert!(lines[1].starts_with("@103 ") && lines[1].contains("main"));

    // Label pins have no changelist to scan
    let result = p4sync!(
        fx.path(), "--config", &config, "select", "--changes", &changes,
        "--manifest", &manifest, "--label", "rel-1"
    )
    .assert_success()?;
    assert_eq!(result.lines(), vec!["@rel-1"]);
    Ok(())
}
