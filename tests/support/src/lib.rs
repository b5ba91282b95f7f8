//! test-support: helpers for robust, nextest-friendly tests of `pr-defect-scan`.
//!
//! Add as a dev-dependency in your top-level `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test_support = { path = "tests/support", features = ["serde"] }
//! ```
//!
//! Then in tests:
//! ```rust,ignore
//! use test_support::{scan_cmd, pull_item, pages_env};
//!
//! #[test]
//! fn example() {
//!     let td = test_support::tempdir();
//!     let pages = pages_env(&[vec![pull_item(1, "Fix overflow", &["bug"], Some("2024-03-01T00:00:00Z"))]]);
//!     scan_cmd(td.path()).env("PDS_TEST_PULLS_JSON", pages).args(["--owner", "a", "--repo", "b"]);
//! }
//! ```

use once_cell::sync::Lazy;
use tracing_subscriber::{fmt, EnvFilter};

use std::path::{Path, PathBuf};

pub const BIN: &str = "pr-defect-scan";

/// Initialize `tracing` once, honoring `RUST_LOG` and writing via the test writer.
///
/// Safe to call from multiple tests; only the first call configures the global subscriber.
pub fn init_tracing() {
    static INIT: Lazy<()> = Lazy::new(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("warn,test=info"))
            .unwrap();
        // with_test_writer() causes logs to appear alongside failing tests only (cargo/nextest)
        let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
    });
    Lazy::force(&INIT);
}

/// Return the path to the repository's `tests/fixtures` directory.
///
/// Uses the package directory (where `Cargo.toml` lives), so it's stable regardless
/// of the runner's working directory (cargo vs nextest).
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("fixtures")
}

/// Read a UTF-8 text fixture into a string.
pub fn read_fixture_text<P: AsRef<Path>>(rel_path: P) -> String {
    let path = fixtures_dir().join(rel_path);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
}

/// Create a temp directory that deletes on drop.
pub fn tempdir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create tempdir")
}

/// Run the binary with `assert_cmd`, returning the ready-to-run `Command`.
pub fn cmd_bin() -> assert_cmd::Command {
    init_tracing();
    let mut cmd = assert_cmd::Command::cargo_bin(BIN).expect("binary target not found");
    // Keep the developer's real credentials and fixtures out of test runs.
    for var in ["GITHUB_TOKEN", "GH_TOKEN", "PDS_TEST_PULLS_JSON", "PDS_TEST_SEARCH_JSON", "PDS_TEST_LANGUAGES_JSON"] {
        cmd.env_remove(var);
    }
    cmd
}

/// A `scan` command writing into `root/out` and `root/cache`, offline-safe credentials.
pub fn scan_cmd(root: &Path) -> assert_cmd::Command {
    let mut cmd = cmd_bin();
    cmd.arg("scan")
        .arg("--out-dir")
        .arg(root.join("out"))
        .arg("--cache-dir")
        .arg(root.join("cache"))
        .arg("--token-file")
        .arg(root.join("no-token"))
        .arg("--no-gh-cli");
    cmd
}

/// The single file with extension `ext` in `dir`.
pub fn only_file_with_ext(dir: &Path, ext: &str) -> PathBuf {
    let mut found: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("read_dir {}: {e}", dir.display()))
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().map(|x| x == ext).unwrap_or(false))
        .collect();
    assert_eq!(found.len(), 1, "expected one .{ext} file in {}, got {:?}", dir.display(), found);
    found.remove(0)
}

/// Deserialize a JSON fixture into `T` (enable `serde` feature).
#[cfg(feature = "serde")]
pub fn read_fixture_json<T, P>(rel_path: P) -> T
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = fixtures_dir().join(rel_path);
    let file = std::fs::File::open(&path)
        .unwrap_or_else(|e| panic!("failed to open fixture {}: {e}", path.display()));
    serde_json::from_reader::<_, T>(file)
        .unwrap_or_else(|e| panic!("failed to parse JSON fixture {}: {e}", path.display()))
}

/// One item of the GitHub pulls listing, shaped like the REST payload.
#[cfg(feature = "serde")]
pub fn pull_item(number: i64, title: &str, labels: &[&str], merged_at: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "number": number,
        "title": title,
        "body": null,
        "state": "closed",
        "user": { "login": "fixture-dev" },
        "html_url": format!("https://github.com/acme/widgets/pull/{number}"),
        "labels": labels.iter().map(|l| serde_json::json!({ "name": l })).collect::<Vec<_>>(),
        "merged_at": merged_at,
        "created_at": "2024-02-01T00:00:00Z",
        "updated_at": merged_at.unwrap_or("2024-02-01T00:00:00Z"),
    })
}

/// Serialize a list of pages for `PDS_TEST_PULLS_JSON` / `PDS_TEST_SEARCH_JSON`.
#[cfg(feature = "serde")]
pub fn pages_env(pages: &[serde_json::Value]) -> String {
    serde_json::Value::Array(pages.to_vec()).to_string()
}
