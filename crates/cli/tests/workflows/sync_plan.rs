//! Sync plans through the CLI

use crate::common::{Fixture, BASIC_CONFIG, CHANGES};
use crate::p4sync;
use anyhow::Result;

#[test]
fn test_plan_for_latest_change() -> Result<()> {
    let fx = Fixture::new();
    let config = fx.write("config.toml", BASIC_CONFIG);
    let changes = fx.write("changes.json", CHANGES);

    let result = p4sync!(fx.path(), "--config", &config, "plan", "--changes", &changes)
        .assert_success()?;

    assert!(result.stdout.contains("//depot/proj/main/... //ci-ws/depot/proj/main/..."));
    assert!(result.stdout.contains("p4 revert -k //ci-ws/..."));
    assert!(result.stdout.contains("p4 sync -f -q //ci-ws/...@103"));
    assert!(!result.stdout.contains("unshelve"));
    Ok(())
}

#[test]
fn test_plan_for_review() -> Result<()> {
    let fx = Fixture::new();
    let config = BASIC_CONFIG.to_string()
        + "\n[publish]\ntype = \"shelve\"\ndescription = \"CI review\"\nrevert = true\n";
    let config = fx.write("config.toml", &config);
    let changes = fx.write("changes.json", CHANGES);

    let result = p4sync!(
        fx.path(), "--config", &config, "plan", "--changes", &changes,
        "--review", "200", "--base", "102"
    )
    .assert_success()?;

    assert!(result.stdout.contains("p4 sync -f -q //ci-ws/...@102"));
    assert!(result.stdout.contains("p4 unshelve -f -s 200"));
    assert!(result.stdout.contains("p4 shelve -d \"CI review\""));
    assert!(result.stdout.contains("p4 revert -k //ci-ws/..."));
    Ok(())
}

#[test]
fn test_plan_without_view_fails() -> Result<()> {
    let fx = Fixture::new();
    let config = fx.write("config.toml", "[workspace]\nclient_root = \"ws\"\n");
    let changes = fx.write("changes.json", CHANGES);

    let result = p4sync!(fx.path(), "--config", &config, "plan", "--changes", &changes)
        .assert_failure()?;
    assert!(result.stderr.contains("No depot spec"));
    Ok(())
}

#[test]
fn test_plan_submit_with_purge() -> Result<()> {
    let fx = Fixture::new();
    let config = BASIC_CONFIG.to_string()
        + "\n[publish]\ntype = \"submit\"\ndescription = \"nightly\"\npurge = 3\n";
    let config = fx.write("config.toml", &config);
    let changes = fx.write("changes.json", CHANGES);

    let result = p4sync!(fx.path(), "--config", &config, "plan", "--changes", &changes)
        .assert_success()?;

    let lines = result.lines();
    let reopen = lines
        .iter()
        .position(|l| l.contains("p4 reopen -t +S3 //ci-ws/..."))
        .expect("reopen line");
    let submit = lines
        .iter()
        .position(|l| l.contains("p4 submit -d nightly"))
        .expect("submit line");
    assert!(reopen < submit);
    Ok(())
}
