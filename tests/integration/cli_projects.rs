use predicates::prelude::*;
use test_support::cmd_bin;

#[test]
fn projects_lists_every_preset_with_threshold() {
  cmd_bin()
    .arg("projects")
    .assert()
    .success()
    .stdout(predicate::str::contains("makerdao"))
    .stdout(predicate::str::contains("ProjectOpenSea/seaport"))
    .stdout(predicate::str::contains("min_score=5"));
}

#[test]
fn projects_json_is_an_array_of_configs() {
  let out = cmd_bin().args(["projects", "--json"]).output().unwrap();
  assert!(out.status.success());

  let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
  let all = v.as_array().unwrap();
  assert!(all.len() >= 10);
  let maker = all.iter().find(|p| p["key"] == "makerdao").unwrap();
  assert_eq!(maker["owner"], "makerdao");
  assert!(maker.get("ruleset").is_none());
}
