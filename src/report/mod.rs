// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Export scan results (candidates, all merged PRs, statistics) as an xlsx workbook or JSON document
// role: report/export
// inputs: ReportInput (PRs, assessments, candidates, summary, run metadata), target directory, format
// outputs: Path of the written file, or None when export failed
// side_effects: Writes one file into the output directory
// invariants:
// - File name follows <key>_defects_<YYYYmmdd_HHMMSS>.<ext>
// - Candidate rows keep the order given (score desc, merged_at desc)
// - Export failures are logged and never abort the run
// errors: Swallowed into None after a tracing::error! line
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

pub mod json;
pub mod summary;
pub mod xlsx;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::model::{Assessment, Candidate, PullRequest};
use crate::report::summary::Summary;
use crate::scoring::tags::classification_label;
use crate::util::report_file_name;

pub const BODY_SNIPPET_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
  Xlsx,
  Json,
}

impl ReportFormat {
  pub fn extension(&self) -> &'static str {
    match self {
      ReportFormat::Xlsx => "xlsx",
      ReportFormat::Json => "json",
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunMeta {
  pub project_key: String,
  pub display_name: String,
  pub repository: String,
  pub generated_at: String,
  pub tz: String,
  pub pages: u32,
}

pub struct ReportInput<'a> {
  pub meta: &'a RunMeta,
  pub prs: &'a [PullRequest],
  pub assessments: &'a [Assessment],
  pub candidates: &'a [Candidate<'a>],
  pub summary: &'a Summary,
}

/// One row of the candidates sheet.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateRow {
  pub number: i64,
  pub score: u32,
  pub confidence: String,
  pub title: String,
  pub signals: String,
  pub merged_at: String,
  pub url: String,
  pub author: String,
  pub body_snippet: String,
  pub classification: String,
}

impl<'a> From<&Candidate<'a>> for CandidateRow {
  fn from(c: &Candidate<'a>) -> Self {
    Self {
      number: c.pr.number,
      score: c.assessment.score,
      confidence: c.assessment.confidence.label().to_string(),
      title: c.pr.title.clone(),
      signals: c.assessment.signals_joined(),
      merged_at: c.pr.merged_at.clone(),
      url: c.pr.url.clone(),
      author: c.pr.author.clone(),
      body_snippet: c.body_snippet(BODY_SNIPPET_CHARS),
      classification: classification_label(&c.assessment.tags),
    }
  }
}

/// One row of the all-merged-PRs sheet.
#[derive(Debug, Clone, Serialize)]
pub struct MergedRow {
  pub number: i64,
  pub title: String,
  pub author: String,
  pub merged_at: String,
  pub labels: String,
  pub score: u32,
  pub confidence: String,
  pub vetoed: bool,
  pub signals: String,
  pub additions: i64,
  pub deletions: i64,
  pub changed_files: i64,
  pub url: String,
}

impl MergedRow {
  fn new(pr: &PullRequest, a: &Assessment) -> Self {
    Self {
      number: pr.number,
      title: pr.title.clone(),
      author: pr.author.clone(),
      merged_at: pr.merged_at.clone(),
      labels: pr.labels.join(", "),
      score: a.score,
      confidence: a.confidence.label().to_string(),
      vetoed: a.vetoed,
      signals: a.signals_joined(),
      additions: pr.additions,
      deletions: pr.deletions,
      changed_files: pr.changed_files,
      url: pr.url.clone(),
    }
  }
}

impl<'a> ReportInput<'a> {
  pub fn candidate_rows(&self) -> Vec<CandidateRow> {
    self.candidates.iter().map(CandidateRow::from).collect()
  }

  pub fn merged_rows(&self) -> Vec<MergedRow> {
    self.prs.iter().zip(self.assessments.iter()).map(|(pr, a)| MergedRow::new(pr, a)).collect()
  }
}

/// Write the report into `dir`. Returns the file path, or None after logging the failure.
pub fn export(input: &ReportInput<'_>, dir: &Path, format: ReportFormat, now: &DateTime<Local>) -> Option<PathBuf> {
  let path = dir.join(report_file_name(&input.meta.project_key, now, format.extension()));

  let result = match format {
    ReportFormat::Xlsx => xlsx::write_workbook(input, &path),
    ReportFormat::Json => json::write_report(input, &path),
  };

  match result {
    Ok(()) => {
      tracing::info!(path = %path.display(), candidates = input.candidates.len(), "report written");
      Some(path)
    }
    Err(e) => {
      tracing::error!(path = %path.display(), error = %format!("{:#}", e), "report export failed");
      None
    }
  }
}
