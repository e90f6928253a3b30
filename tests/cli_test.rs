use assert_cmd::cargo;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const INDEX: &str = "weekly-config.json";

fn read_index(dir: &Path) -> Value {
    let content = fs::read_to_string(dir.join(INDEX)).unwrap();
    serde_json::from_str(&content).unwrap()
}

fn write_issue(dir: &Path, name: &str, html: &str) {
    let weeklies = dir.join("weeklies");
    fs::create_dir_all(&weeklies).unwrap();
    fs::write(weeklies.join(name), html).unwrap();
}

#[test]
fn test_no_arguments_prints_help() {
    let temp_dir = TempDir::new().unwrap();

    cargo::cargo_bin_cmd!("weekly-index")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("publish"));

    assert!(!temp_dir.path().join(INDEX).exists());
}

#[test]
fn test_unknown_command_prints_help() {
    let temp_dir = TempDir::new().unwrap();

    cargo::cargo_bin_cmd!("weekly-index")
        .current_dir(temp_dir.path())
        .arg("frobnicate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_add_creates_record() {
    let temp_dir = TempDir::new().unwrap();

    cargo::cargo_bin_cmd!("weekly-index")
        .current_dir(temp_dir.path())
        .args(["add", "2025-10-01", "2025-10-07", "第8期", "desc", "15", "8", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Added/updated issue: weeklies/20251001-20251007issue-report.html",
        ));

    let index = read_index(temp_dir.path());
    let weeklies = index["weeklies"].as_array().unwrap();
    assert_eq!(weeklies.len(), 1);
    let record = &weeklies[0];
    assert_eq!(record["date"], "2025-10-01");
    assert_eq!(record["endDate"], "2025-10-07");
    assert_eq!(
        record["filename"],
        "weeklies/20251001-20251007issue-report.html"
    );
    assert_eq!(record["title"], "第8期");
    assert_eq!(record["newsCount"], 15);
    assert_eq!(record["toolCount"], 8);
    assert_eq!(record["techCount"], 4);
    assert_eq!(record["published"], false);
    assert!(index["settings"].as_object().unwrap().is_empty());
}

#[test]
fn test_add_prefixes_product_name() {
    let temp_dir = TempDir::new().unwrap();

    cargo::cargo_bin_cmd!("weekly-index")
        .current_dir(temp_dir.path())
        .args(["add", "2025-10-01", "2025-10-07", "Oct wk1", "desc"])
        .assert()
        .success();

    let index = read_index(temp_dir.path());
    assert_eq!(index["weeklies"][0]["title"], "AI圈热点周报 Oct wk1");
    assert_eq!(index["weeklies"][0]["newsCount"], 0);
}

#[test]
fn test_add_twice_keeps_one_record() {
    let temp_dir = TempDir::new().unwrap();
    let args = ["add", "2025-10-01", "2025-10-07", "第8期", "desc", "15", "8", "4"];

    cargo::cargo_bin_cmd!("weekly-index")
        .current_dir(temp_dir.path())
        .args(args)
        .assert()
        .success();
    let first = fs::read_to_string(temp_dir.path().join(INDEX)).unwrap();

    cargo::cargo_bin_cmd!("weekly-index")
        .current_dir(temp_dir.path())
        .args(args)
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
    let second = fs::read_to_string(temp_dir.path().join(INDEX)).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_add_with_missing_arguments_does_nothing() {
    let temp_dir = TempDir::new().unwrap();

    cargo::cargo_bin_cmd!("weekly-index")
        .current_dir(temp_dir.path())
        .args(["add", "2025-10-01", "2025-10-07", "第8期"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));

    assert!(!temp_dir.path().join(INDEX).exists());
}

#[test]
fn test_add_with_invalid_date_does_nothing() {
    let temp_dir = TempDir::new().unwrap();

    cargo::cargo_bin_cmd!("weekly-index")
        .current_dir(temp_dir.path())
        .args(["add", "2025/10/01", "2025-10-07", "第8期", "desc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date '2025/10/01'"));

    assert!(!temp_dir.path().join(INDEX).exists());
}

#[test]
fn test_scan_discovers_issue() {
    let temp_dir = TempDir::new().unwrap();
    write_issue(
        temp_dir.path(),
        "20251001-20251007issue-report.html",
        r#"<div class="news-item">AI 新工具发布</div><div class="news-item"></div>"#,
    );
    write_issue(temp_dir.path(), "draft.html", "ignored");

    cargo::cargo_bin_cmd!("weekly-index")
        .current_dir(temp_dir.path())
        .arg("scan")
        .assert()
        .success()
        .stdout(predicate::str::contains("Scan complete: 1 new, 0 updated"));

    let index = read_index(temp_dir.path());
    let weeklies = index["weeklies"].as_array().unwrap();
    assert_eq!(weeklies.len(), 1);
    assert_eq!(weeklies[0]["title"], "AI圈热点周报 第1期");
    assert_eq!(weeklies[0]["published"], true);
    assert_eq!(weeklies[0]["newsCount"], 2);
}

#[test]
fn test_scan_without_changes_does_not_write() {
    let temp_dir = TempDir::new().unwrap();

    cargo::cargo_bin_cmd!("weekly-index")
        .current_dir(temp_dir.path())
        .arg("scan")
        .assert()
        .success()
        .stdout(predicate::str::contains("no new files found"));

    assert!(temp_dir.path().join("weeklies").is_dir());
    assert!(!temp_dir.path().join(INDEX).exists());
}

#[test]
fn test_scan_renumbers_added_titles() {
    let temp_dir = TempDir::new().unwrap();

    cargo::cargo_bin_cmd!("weekly-index")
        .current_dir(temp_dir.path())
        .args(["add", "2025-10-08", "2025-10-14", "Special", "desc"])
        .assert()
        .success();
    write_issue(temp_dir.path(), "20251001-20251007issue-report.html", "");

    cargo::cargo_bin_cmd!("weekly-index")
        .current_dir(temp_dir.path())
        .arg("scan")
        .assert()
        .success();

    let index = read_index(temp_dir.path());
    assert_eq!(index["weeklies"][0]["date"], "2025-10-01");
    assert_eq!(index["weeklies"][0]["title"], "AI圈热点周报 第1期");
    assert_eq!(index["weeklies"][1]["title"], "AI圈热点周报 第2期");
}

#[test]
fn test_publish_marks_record() {
    let temp_dir = TempDir::new().unwrap();

    cargo::cargo_bin_cmd!("weekly-index")
        .current_dir(temp_dir.path())
        .args(["add", "2025-10-01", "2025-10-07", "第1期", "desc"])
        .assert()
        .success();

    cargo::cargo_bin_cmd!("weekly-index")
        .current_dir(temp_dir.path())
        .args(["publish", "weeklies/20251001-20251007issue-report.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked as published"));

    let index = read_index(temp_dir.path());
    assert_eq!(index["weeklies"][0]["published"], true);
}

#[test]
fn test_publish_unknown_file_leaves_index_untouched() {
    let temp_dir = TempDir::new().unwrap();

    cargo::cargo_bin_cmd!("weekly-index")
        .current_dir(temp_dir.path())
        .args(["add", "2025-10-01", "2025-10-07", "第1期", "desc"])
        .assert()
        .success();
    let before = fs::read_to_string(temp_dir.path().join(INDEX)).unwrap();

    cargo::cargo_bin_cmd!("weekly-index")
        .current_dir(temp_dir.path())
        .args(["publish", "weeklies/19990101-19990107issue-report.html"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Error: Issue not found: weeklies/19990101-19990107issue-report.html",
        ));

    let after = fs::read_to_string(temp_dir.path().join(INDEX)).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_publish_requires_filename() {
    let temp_dir = TempDir::new().unwrap();

    cargo::cargo_bin_cmd!("weekly-index")
        .current_dir(temp_dir.path())
        .arg("publish")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_mutation_sorts_existing_records() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(INDEX),
        r#"{
  "weeklies": [
    {"date": "2025-10-08", "endDate": "2025-10-14", "filename": "weeklies/20251008-20251014issue-report.html",
     "title": "第2期", "summary": "b", "newsCount": 1, "toolCount": 0, "techCount": 0, "published": false},
    {"date": "2025-10-01", "endDate": "2025-10-07", "filename": "weeklies/20251001-20251007issue-report.html",
     "title": "第1期", "summary": "a", "newsCount": 1, "toolCount": 0, "techCount": 0, "published": false}
  ],
  "settings": {"siteTitle": "AI Weekly"}
}"#,
    )
    .unwrap();

    cargo::cargo_bin_cmd!("weekly-index")
        .current_dir(temp_dir.path())
        .args(["publish", "weeklies/20251008-20251014issue-report.html"])
        .assert()
        .success();

    let index = read_index(temp_dir.path());
    assert_eq!(index["weeklies"][0]["date"], "2025-10-01");
    assert_eq!(index["weeklies"][1]["date"], "2025-10-08");
    assert_eq!(index["weeklies"][1]["published"], true);
    assert_eq!(index["settings"]["siteTitle"], "AI Weekly");
}

#[test]
fn test_config_init_and_custom_product_name() {
    let temp_dir = TempDir::new().unwrap();

    cargo::cargo_bin_cmd!("weekly-index")
        .current_dir(temp_dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings file created"));

    let settings_path = temp_dir.path().join("weekly.toml");
    let content = fs::read_to_string(&settings_path).unwrap();
    assert!(content.contains("index_file = \"weekly-config.json\""));
    assert!(content.contains("[analyzer]"));
    fs::write(&settings_path, "product_name = \"Rust Weekly\"\n").unwrap();

    cargo::cargo_bin_cmd!("weekly-index")
        .current_dir(temp_dir.path())
        .args(["add", "2025-10-01", "2025-10-07", "Oct wk1", "desc"])
        .assert()
        .success();

    let index = read_index(temp_dir.path());
    assert_eq!(index["weeklies"][0]["title"], "Rust Weekly Oct wk1");
}

#[test]
fn test_malformed_settings_abort_without_writing() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("weekly.toml"), "product_name = [").unwrap();

    cargo::cargo_bin_cmd!("weekly-index")
        .current_dir(temp_dir.path())
        .args(["add", "2025-10-01", "2025-10-07", "第1期", "desc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TOML parsing error"));

    assert!(!temp_dir.path().join(INDEX).exists());
}

#[test]
fn test_add_keeps_loosely_typed_records() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(INDEX),
        r#"{
  "weeklies": [
    {"date": "2025-09-24", "endDate": "2025-09-30", "filename": "weeklies/20250924-20250930issue-report.html",
     "title": "第1期", "summary": "keep me", "newsCount": null, "toolCount": 2, "techCount": 1, "published": true}
  ],
  "settings": {"siteTitle": "AI Weekly"}
}"#,
    )
    .unwrap();

    cargo::cargo_bin_cmd!("weekly-index")
        .current_dir(temp_dir.path())
        .args(["add", "2025-10-01", "2025-10-07", "第2期", "desc"])
        .assert()
        .success();

    let index = read_index(temp_dir.path());
    let weeklies = index["weeklies"].as_array().unwrap();
    assert_eq!(weeklies.len(), 2);
    assert_eq!(weeklies[0]["summary"], "keep me");
    assert_eq!(weeklies[0]["newsCount"], 0);
    assert_eq!(weeklies[0]["toolCount"], 2);
    assert_eq!(weeklies[1]["title"], "第2期");
    assert_eq!(index["settings"]["siteTitle"], "AI Weekly");
}

#[test]
fn test_unexpected_index_layout_is_not_overwritten() {
    let temp_dir = TempDir::new().unwrap();
    let original = r#"{"weeklies": "see archive.json", "settings": {"siteTitle": "AI Weekly"}}"#;
    fs::write(temp_dir.path().join(INDEX), original).unwrap();

    cargo::cargo_bin_cmd!("weekly-index")
        .current_dir(temp_dir.path())
        .args(["add", "2025-10-01", "2025-10-07", "第2期", "desc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to overwrite"));

    let after = fs::read_to_string(temp_dir.path().join(INDEX)).unwrap();
    assert_eq!(after, original);
}
