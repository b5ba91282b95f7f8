//! JSON report document and the raw merged-PR snapshot.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::model::PullRequest;
use crate::report::summary::Summary;
use crate::report::{CandidateRow, MergedRow, ReportInput, RunMeta};

#[derive(Serialize)]
pub struct ReportDocument<'a> {
  pub meta: &'a RunMeta,
  pub summary: &'a Summary,
  pub candidates: Vec<CandidateRow>,
  pub merged_prs: Vec<MergedRow>,
}

impl<'a> ReportDocument<'a> {
  pub fn new(input: &ReportInput<'a>) -> Self {
    Self { meta: input.meta, summary: input.summary, candidates: input.candidate_rows(), merged_prs: input.merged_rows() }
  }
}

pub fn write_report(input: &ReportInput<'_>, path: &Path) -> Result<()> {
  let doc = ReportDocument::new(input);
  let data = serde_json::to_vec_pretty(&doc)?;

  std::fs::write(path, data).with_context(|| format!("writing {}", path.display()))
}

/// Dump every fetched merged PR, unscored, for later re-analysis.
pub fn write_snapshot(prs: &[PullRequest], path: &Path) -> Result<()> {
  let data = serde_json::to_vec_pretty(prs)?;

  std::fs::write(path, data).with_context(|| format!("writing snapshot {}", path.display()))
}
