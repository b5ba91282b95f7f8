use serde_json::Value;
use test_support::{cmd_bin, read_fixture_text, tempdir};

fn discover_cmd() -> assert_cmd::Command {
  let mut cmd = cmd_bin();
  cmd
    .env("PDS_TEST_SEARCH_JSON", read_fixture_text("search_solidity.json"))
    .env("PDS_TEST_LANGUAGES_JSON", read_fixture_text("languages.json"))
    .args(["discover", "--page-delay-ms", "0", "--no-gh-cli", "--token-file", "/nonexistent/token"]);
  cmd
}

#[test]
fn discover_filters_by_share_and_exclusions() {
  let out = discover_cmd().output().unwrap();
  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

  let found: Value = serde_json::from_slice(&out.stdout).unwrap();
  let found = found.as_array().unwrap();
  assert_eq!(found.len(), 1);
  assert_eq!(found[0]["repo"], "acme/vaults");
  assert_eq!(found[0]["stars"], 4200);
  assert_eq!(found[0]["solidity_pct"], 90.0);
  assert_eq!(found[0]["url"], "https://github.com/acme/vaults");
}

#[test]
fn discover_threshold_and_default_excludes_are_configurable() {
  let out = discover_cmd()
    .args(["--min-solidity-pct", "0.5", "--no-default-excludes", "--exclude", "VAULTS"])
    .output()
    .unwrap();
  assert!(out.status.success());

  let found: Value = serde_json::from_slice(&out.stdout).unwrap();
  let repos: Vec<&str> = found.as_array().unwrap().iter().map(|r| r["repo"].as_str().unwrap()).collect();
  assert_eq!(repos, vec!["acme/frontend", "OpenZeppelin/openzeppelin-contracts"]);
}

#[test]
fn discover_out_writes_file_and_keeps_stdout_clean() {
  let td = tempdir();
  let path = td.path().join("candidates.json");
  let out = discover_cmd().arg("--out").arg(&path).output().unwrap();
  assert!(out.status.success());
  assert!(out.stdout.is_empty());

  let found: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
  assert_eq!(found.as_array().unwrap().len(), 1);
}

#[test]
fn search_failure_returns_what_was_found() {
  let out = cmd_bin()
    .env("PDS_TEST_SEARCH_JSON", r#"[{"status": 500}]"#)
    .args(["discover", "--page-delay-ms", "0", "--no-gh-cli"])
    .output()
    .unwrap();
  assert!(out.status.success());
  assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "[]");
}
