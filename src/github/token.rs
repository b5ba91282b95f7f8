//! Credential discovery: env vars, then a local token file, then `gh auth token`.

use std::path::Path;

/// Where a token came from, for the startup log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
  Env(&'static str),
  File(String),
  GhCli,
}

fn non_empty(s: &str) -> Option<String> {
  let t = s.trim();
  if t.is_empty() {
    None
  } else {
    Some(t.to_string())
  }
}

/// Read the first non-empty, non-comment line of a token file.
fn read_token_file(path: &Path) -> Option<String> {
  let data = std::fs::read_to_string(path).ok()?;

  data
    .lines()
    .map(str::trim)
    .find(|l| !l.is_empty() && !l.starts_with('#'))
    .map(|l| l.trim_start_matches("GITHUB_TOKEN=").trim_matches('"').to_string())
    .and_then(|t| non_empty(&t))
}

/// Discover a GitHub token. `GITHUB_TOKEN`, then `GH_TOKEN`, then `token_file`, then `gh auth token`.
pub fn discover_token(token_file: Option<&Path>, allow_gh_cli: bool) -> Option<(String, TokenSource)> {
  for var in ["GITHUB_TOKEN", "GH_TOKEN"] {
    if let Some(t) = std::env::var(var).ok().as_deref().and_then(non_empty) {
      return Some((t, TokenSource::Env(var)));
    }
  }

  if let Some(path) = token_file {
    if let Some(t) = read_token_file(path) {
      return Some((t, TokenSource::File(path.display().to_string())));
    }
  }

  if !allow_gh_cli {
    return None;
  }

  let output = std::process::Command::new("gh").args(["auth", "token"]).output().ok()?;

  if output.status.success() {
    let t = String::from_utf8_lossy(&output.stdout).to_string();
    return non_empty(&t).map(|t| (t, TokenSource::GhCli));
  }

  None
}
