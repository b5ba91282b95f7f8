use predicates::prelude::*;
use serde_json::Value;
use test_support::{fixtures_dir, only_file_with_ext, pages_env, pull_item, read_fixture_text, scan_cmd, tempdir};

fn pointer(stdout: &[u8]) -> Value {
  serde_json::from_slice(stdout).expect("stdout is one JSON pointer")
}

#[test]
fn scan_json_scores_fixture_pages() {
  let td = tempdir();
  let out = scan_cmd(td.path())
    .env("PDS_TEST_PULLS_JSON", read_fixture_text("pulls_two_pages.json"))
    .args(["--owner", "acme", "--repo", "Widgets", "--format", "json"])
    .output()
    .unwrap();
  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

  let p = pointer(&out.stdout);
  assert_eq!(p["project"], "widgets");
  assert_eq!(p["merged"], 3);
  assert_eq!(p["candidates"], 2);

  let file = std::path::PathBuf::from(p["file"].as_str().unwrap());
  assert_eq!(file.extension().unwrap(), "json");
  assert!(file.file_name().unwrap().to_string_lossy().starts_with("widgets_defects_"));

  let doc: Value = serde_json::from_slice(&std::fs::read(&file).unwrap()).unwrap();
  assert_eq!(doc["meta"]["repository"], "acme/Widgets");
  assert_eq!(doc["meta"]["pages"], 2);
  assert_eq!(doc["summary"]["complete"], true);
  assert_eq!(doc["candidates"][0]["number"], 41);
  assert_eq!(doc["candidates"][0]["confidence"], "High");
  // Tier-2 "gas" alone meets the default threshold of 5.
  assert_eq!(doc["candidates"][1]["number"], 37);
  assert_eq!(doc["candidates"][1]["score"], 5);
  // Unmerged PRs never reach the report.
  let numbers: Vec<i64> = doc["merged_prs"].as_array().unwrap().iter().map(|m| m["number"].as_i64().unwrap()).collect();
  assert_eq!(numbers, vec![41, 40, 37]);
}

#[test]
fn scan_writes_snapshot_unless_disabled() {
  let td = tempdir();
  scan_cmd(td.path())
    .env("PDS_TEST_PULLS_JSON", read_fixture_text("pulls_two_pages.json"))
    .args(["--owner", "acme", "--repo", "widgets", "--format", "json"])
    .assert()
    .success();
  let snap = only_file_with_ext(&td.path().join("cache"), "json");
  let prs: Value = serde_json::from_slice(&std::fs::read(snap).unwrap()).unwrap();
  assert_eq!(prs.as_array().unwrap().len(), 3);

  let td = tempdir();
  scan_cmd(td.path())
    .env("PDS_TEST_PULLS_JSON", read_fixture_text("pulls_two_pages.json"))
    .args(["--owner", "acme", "--repo", "widgets", "--format", "json", "--no-snapshot"])
    .assert()
    .success();
  assert_eq!(std::fs::read_dir(td.path().join("cache")).unwrap().count(), 0);
}

#[test]
fn scan_xlsx_is_the_default_format() {
  let td = tempdir();
  let out = scan_cmd(td.path())
    .env("PDS_TEST_PULLS_JSON", read_fixture_text("pulls_two_pages.json"))
    .args(["-p", "makerdao"])
    .output()
    .unwrap();
  assert!(out.status.success());

  let p = pointer(&out.stdout);
  assert_eq!(p["project"], "makerdao");
  let file = only_file_with_ext(&td.path().join("out"), "xlsx");
  assert!(std::fs::read(file).unwrap().starts_with(b"PK"));
}

#[test]
fn failed_page_yields_partial_report() {
  let td = tempdir();
  let pages = pages_env(&[
    Value::Array(vec![pull_item(7, "Fix overflow in fee math", &["bug"], Some("2024-03-01T00:00:00Z"))]),
    serde_json::json!({ "status": 502 }),
  ]);
  let out = scan_cmd(td.path())
    .env("PDS_TEST_PULLS_JSON", pages)
    .args(["--owner", "acme", "--repo", "widgets", "--format", "json"])
    .output()
    .unwrap();
  assert!(out.status.success());

  let p = pointer(&out.stdout);
  assert_eq!(p["merged"], 1);
  let doc: Value = serde_json::from_slice(&std::fs::read(p["file"].as_str().unwrap()).unwrap()).unwrap();
  assert_eq!(doc["summary"]["complete"], false);
  assert!(doc["summary"]["incomplete_reason"].as_str().unwrap().contains("502"));
}

#[test]
fn rate_limit_without_wait_stops_fetching() {
  let td = tempdir();
  let pages = pages_env(&[serde_json::json!({ "status": 403 })]);
  let out = scan_cmd(td.path())
    .env("PDS_TEST_PULLS_JSON", pages)
    .args(["--owner", "acme", "--repo", "widgets", "--format", "json"])
    .output()
    .unwrap();
  assert!(out.status.success());
  let p = pointer(&out.stdout);
  assert_eq!(p["merged"], 0);
  assert_eq!(p["candidates"], 0);
}

#[test]
fn ruleset_file_replaces_preset_rules() {
  let td = tempdir();
  let out = scan_cmd(td.path())
    .env("PDS_TEST_PULLS_JSON", read_fixture_text("pulls_two_pages.json"))
    .args(["--owner", "acme", "--repo", "widgets", "--format", "json", "--ruleset"])
    .arg(fixtures_dir().join("ruleset_strict.json"))
    .output()
    .unwrap();
  assert!(out.status.success());

  let p = pointer(&out.stdout);
  let doc: Value = serde_json::from_slice(&std::fs::read(p["file"].as_str().unwrap()).unwrap()).unwrap();
  assert_eq!(doc["candidates"].as_array().unwrap().len(), 1);
  assert_eq!(doc["candidates"][0]["number"], 37);
  assert_eq!(doc["merged_prs"][0]["vetoed"], true);
}

#[test]
fn min_score_override_raises_the_bar() {
  let td = tempdir();
  let out = scan_cmd(td.path())
    .env("PDS_TEST_PULLS_JSON", read_fixture_text("pulls_two_pages.json"))
    .args(["--owner", "acme", "--repo", "widgets", "--format", "json", "--min-score", "100"])
    .output()
    .unwrap();
  assert!(out.status.success());
  assert_eq!(pointer(&out.stdout)["candidates"], 0);
}

#[test]
fn since_drops_older_merges() {
  let td = tempdir();
  let out = scan_cmd(td.path())
    .env("PDS_TEST_PULLS_JSON", read_fixture_text("pulls_two_pages.json"))
    .args(["--owner", "acme", "--repo", "widgets", "--format", "json", "--since", "2024-03-01"])
    .output()
    .unwrap();
  assert!(out.status.success());
  assert_eq!(pointer(&out.stdout)["merged"], 2);
}

#[test]
fn unknown_project_is_a_configuration_error() {
  let td = tempdir();
  scan_cmd(td.path())
    .args(["-p", "nope"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("nope"));
  // Nothing was created before the error.
  assert!(!td.path().join("out").exists());
}

#[test]
fn owner_without_repo_is_rejected() {
  let td = tempdir();
  scan_cmd(td.path())
    .args(["--owner", "acme"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("--owner and --repo must be given together"));
}

#[test]
fn invalid_timezone_is_rejected() {
  let td = tempdir();
  scan_cmd(td.path())
    .args(["--owner", "acme", "--repo", "widgets", "--tz", "Mars/Olympus"])
    .assert()
    .failure();
}
