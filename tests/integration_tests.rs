use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

fn cmd() -> Command {
    let mut cmd = cargo_bin_cmd!("pixstyle");
    // Keep a developer's config or environment out of the results
    cmd.env_remove("PIXSTYLE_GALLERY__PAGE_SIZE")
        .env_remove("PIXSTYLE_GALLERY__CATEGORY")
        .current_dir(env!("CARGO_MANIFEST_DIR"));
    cmd
}

fn listed_values(stdout: &[u8]) -> Vec<String> {
    let text = String::from_utf8(stdout.to_vec()).unwrap();
    text.lines()
        .filter_map(|line| line.trim().strip_prefix("value: "))
        .map(str::to_string)
        .collect()
}

#[test]
fn test_list_shows_first_page() {
    let output = cmd().arg("--list").assert().success().get_output().stdout.clone();

    let values = listed_values(&output);
    assert_eq!(values.len(), 16);
    assert_eq!(values[0], "studio-portrait");
}

#[test]
fn test_list_second_page_saturates() {
    let output = cmd()
        .args(["--list", "--pages", "2"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(listed_values(&output).len(), 20);

    let output = cmd()
        .args(["--list", "--pages", "9"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(listed_values(&output).len(), 20);
}

#[test]
fn test_list_category_and_page_size() {
    let output = cmd()
        .args(["--list", "--category", "artistic", "--page-size", "4"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(
        listed_values(&output),
        ["watercolor", "oil-impasto", "charcoal-sketch", "ink-wash"]
    );
}

#[test]
fn test_list_json() {
    cmd()
        .args(["--list", "--category", "fun", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("["))
        .stdout(predicate::str::contains("\"value\": \"neon-glow\""));
}

#[test]
fn test_list_unknown_category_is_empty() {
    cmd()
        .args(["--list", "--category", "seasonal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"))
        .stderr(predicate::str::contains(
            "Unknown category 'seasonal' (available: artistic, fun, professional)",
        ));
}

#[test]
fn test_list_known_category_has_no_note() {
    cmd()
        .args(["--list", "--category", "fun"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Unknown category").not());
}

#[test]
fn test_zero_page_size_is_rejected() {
    cmd()
        .args(["--list", "--page-size", "0"])
        .assert()
        .failure();
}

#[test]
fn test_pages_requires_list() {
    cmd()
        .args(["--pages", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--list"));
}

#[test]
fn test_missing_config_file_fails() {
    cmd()
        .args(["--list", "--config", "does-not-exist.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn test_custom_catalog_file() {
    let dir = std::env::temp_dir().join(format!("pixstyle-catalog-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("styles.json");
    std::fs::write(
        &path,
        r#"{"seasonal": [{"uri": "snow.jpg", "value": "first-snow"}]}"#,
    )
    .unwrap();

    cmd()
        .args(["--list", "--category", "seasonal", "--catalog"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("value: first-snow"));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_completions() {
    cmd()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pixstyle"));
}

#[test]
fn test_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--register"))
        .stdout(predicate::str::contains("--list"));
}
