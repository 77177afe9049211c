//! Client view generation through the CLI

use crate::common::{Fixture, BASIC_CONFIG};
use crate::p4sync;
use anyhow::Result;

#[test]
fn test_single_line_view() -> Result<()> {
    let fx = Fixture::new();
    let result = p4sync!(fx.path(), "view", "--depot", "//depot/proj/src/...", "--client", "ws1")
        .assert_success()?;

    assert_eq!(result.stdout, "//depot/proj/src/... //ws1/...\n");
    Ok(())
}

#[test]
fn test_multi_line_view_from_flags() -> Result<()> {
    let fx = Fixture::new();
    let result = p4sync!(fx.path(), "view", "--depot", "//depot/a/...\\n//depot/b/...", "--client", "ws1")
        .assert_success()?;

    assert_eq!(
        result.lines(),
        vec!["//depot/a/... //ws1/depot/a/...", "//depot/b/... //ws1/depot/b/..."]
    );
    Ok(())
}

#[test]
fn test_view_quotes_paths_with_spaces() -> Result<()> {
    let fx = Fixture::new();
    let result = p4sync!(fx.path(), "view", "--depot", "//depot/sub sub/...", "--client", "ws1")
        .assert_success()?;

    assert_eq!(result.stdout.trim_end(), "\"//depot/sub sub/...\" \"//ws1/...\"");
    Ok(())
}

#[test]
fn test_view_from_config() -> Result<()> {
    let fx = Fixture::new();
    let config = fx.write("config.toml", BASIC_CONFIG);
    let result = p4sync!(fx.path(), "--config", &config, "view").assert_success()?;

    assert_eq!(
        result.lines(),
        vec![
            "//depot/proj/main/... //ci-ws/depot/proj/main/...",
            "//depot/libs/... //ci-ws/depot/libs/...",
        ]
    );
    Ok(())
}

#[test]
fn test_empty_spec_prints_nothing() -> Result<()> {
    let fx = Fixture::new();
    let result = p4sync!(fx.path(), "view", "--depot", "", "--client", "ws1").assert_success()?;

    assert!(result.stdout.is_empty());
    assert!(result.stderr.contains("No depot spec"));
    Ok(())
}

#[test]
fn test_malformed_line_fails() -> Result<()> {
    let fx = Fixture::new();
    let result = p4sync!(fx.path(), "view", "--depot", "//depot/a/...\\ndepot/b/...", "--client", "ws1")
        .assert_failure()?;

    assert!(result.stdout.is_empty());
    assert!(result.stderr.contains("must start with //"));
    Ok(())
}
