use test_support::cmd_bin;

#[test]
fn cli_generates_man_page() {
  let out = cmd_bin().args(["--gen-man"]).output().unwrap();
  assert!(out.status.success());
  let s = String::from_utf8_lossy(&out.stdout);
  // clap_mangen emits a roff manpage starting with .TH and mentions the binary name
  assert!(s.contains(".TH") || s.contains(".Nm"));
  assert!(s.contains("pr-defect-scan"));
}

#[test]
fn missing_subcommand_prints_help_and_fails() {
  let out = cmd_bin().output().unwrap();
  assert!(!out.status.success());
  assert!(String::from_utf8_lossy(&out.stdout).contains("scan"));
}
