// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define the data model (merged PRs, assessments, confidence tiers) shared by fetching, scoring and export
// role: model/types
// outputs: Serializable structs with stable field names; confidence tier enum
// invariants: PullRequest.merged_at is always present for fetched PRs; Assessment references exactly one PR by number
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::{Deserialize, Serialize};

/// A merged pull request, normalized from one item of the pulls listing.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PullRequest {
  pub number: i64,
  pub title: String,
  pub body: String,
  pub state: String,
  pub author: String,
  pub url: String,
  pub labels: Vec<String>,
  pub merged_at: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub created_at: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub updated_at: Option<String>,
  pub additions: i64,
  pub deletions: i64,
  pub changed_files: i64,
  pub commits: i64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub base_ref: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub head_ref: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub milestone: Option<String>,
  #[serde(skip_serializing_if = "Vec::is_empty", default)]
  pub assignees: Vec<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
  Low,
  Medium,
  High,
}

impl Confidence {
  /// Display label used in spreadsheet cells.
  pub fn label(&self) -> &'static str {
    match self {
      Confidence::Low => "Low",
      Confidence::Medium => "Medium",
      Confidence::High => "High",
    }
  }
}

/// Result of scoring one PR against a ruleset.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Assessment {
  pub number: i64,
  pub score: u32,
  pub confidence: Confidence,
  pub signals: Vec<String>,
  pub vetoed: bool,
  #[serde(skip_serializing_if = "Vec::is_empty", default)]
  pub tags: Vec<String>,
}

impl Assessment {
  pub fn signals_joined(&self) -> String {
    self.signals.join(" | ")
  }
}

/// A non-vetoed PR paired with its assessment, as listed in the candidates sheet.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
  pub pr: &'a PullRequest,
  pub assessment: &'a Assessment,
}

impl<'a> Candidate<'a> {
  /// First `max_chars` characters of the body with line breaks flattened to spaces.
  pub fn body_snippet(&self, max_chars: usize) -> String {
    self.pr.body.chars().take(max_chars).collect::<String>().replace(['\r', '\n'], " ")
  }
}

#[cfg(test)]
pub(crate) fn pr_fixture(number: i64, title: &str, body: &str, labels: &[&str]) -> PullRequest {
  PullRequest {
    number,
    title: title.into(),
    body: body.into(),
    state: "closed".into(),
    author: "octo".into(),
    url: format!("https://github.com/acme/widgets/pull/{}", number),
    labels: labels.iter().map(|l| l.to_string()).collect(),
    merged_at: "2024-03-01T10:00:00Z".into(),
    created_at: Some("2024-02-28T09:00:00Z".into()),
    updated_at: Some("2024-03-01T10:00:00Z".into()),
    additions: 0,
    deletions: 0,
    changed_files: 0,
    commits: 0,
    base_ref: None,
    head_ref: None,
    milestone: None,
    assignees: vec![],
  }
}
