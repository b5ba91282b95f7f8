use jsonschema::validator_for;
use test_support::{read_fixture_text, scan_cmd, tempdir};

fn read_schema(name: &str) -> serde_json::Value {
  let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
  let path = manifest_dir.join("tests").join("schemas").join(name);
  let data = std::fs::read(&path).expect("schema file");
  serde_json::from_slice(&data).expect("valid schema JSON")
}

fn compile_schema(name: &str) -> jsonschema::Validator {
  let schema = read_schema(name);
  validator_for(&schema).expect("compile schema")
}

fn scan_report(pages: String) -> serde_json::Value {
  let td = tempdir();
  let out = scan_cmd(td.path())
    .env("PDS_TEST_PULLS_JSON", pages)
    .args(["--owner", "acme", "--repo", "widgets", "--format", "json", "--tz", "America/New_York"])
    .output()
    .unwrap();
  assert!(out.status.success());

  let pointer: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
  let file = pointer["file"].as_str().expect("report path");
  serde_json::from_slice(&std::fs::read(file).unwrap()).unwrap()
}

#[test]
fn json_report_conforms_to_schema() {
  let doc = scan_report(read_fixture_text("pulls_two_pages.json"));
  let compiled = compile_schema("report.schema.json");
  compiled.validate(&doc).expect("schema validation failed for JSON report");

  // Day buckets follow the requested timezone.
  let trend = doc["summary"]["trend"].as_array().unwrap();
  assert!(trend.iter().any(|r| r["key"] == "2024-03-02"));
}

#[test]
fn partial_and_empty_reports_conform_to_schema() {
  let compiled = compile_schema("report.schema.json");

  let partial = scan_report(r#"[{"status": 0}]"#.to_string());
  compiled.validate(&partial).expect("schema validation failed for partial report");
  assert_eq!(partial["summary"]["complete"], false);

  let empty = scan_report("[]".to_string());
  compiled.validate(&empty).expect("schema validation failed for empty report");
  assert_eq!(empty["summary"]["totals"]["merged"], 0);
}
