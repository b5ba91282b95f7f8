//! Aggregate statistics shared by every export format.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{Assessment, Candidate, Confidence, PullRequest};
use crate::scoring::tags::GENERAL_TAG;
use crate::util::day_bucket;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CountRow {
  pub key: String,
  pub count: usize,
}

#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct Totals {
  pub merged: usize,
  pub vetoed: usize,
  pub below_threshold: usize,
  pub candidates: usize,
}

#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct CodeStats {
  pub additions: i64,
  pub deletions: i64,
  pub changed_files: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
  pub totals: Totals,
  pub threshold: u32,
  /// Candidates per tier, high first.
  pub confidence: Vec<CountRow>,
  pub tags_all: Vec<CountRow>,
  pub tags_candidates: Vec<CountRow>,
  /// Merged PRs per day, oldest first.
  pub trend: Vec<CountRow>,
  pub top_contributor: Option<CountRow>,
  pub code: CodeStats,
  pub earliest_merge: Option<String>,
  pub latest_merge: Option<String>,
  pub complete: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub incomplete_reason: Option<String>,
}

fn tag_counts<'a>(tag_lists: impl Iterator<Item = &'a [String]>) -> Vec<CountRow> {
  let mut counts: BTreeMap<String, usize> = BTreeMap::new();

  for tags in tag_lists {
    if tags.is_empty() {
      *counts.entry(GENERAL_TAG.to_string()).or_default() += 1;
    }
    for t in tags {
      *counts.entry(t.clone()).or_default() += 1;
    }
  }

  sorted_desc(counts)
}

/// Count desc, then key asc.
fn sorted_desc(counts: BTreeMap<String, usize>) -> Vec<CountRow> {
  let mut rows: Vec<CountRow> = counts.into_iter().map(|(key, count)| CountRow { key, count }).collect();
  rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
  rows
}

pub fn build_summary(
  prs: &[PullRequest],
  assessments: &[Assessment],
  candidates: &[Candidate<'_>],
  threshold: u32,
  tz: &str,
  incomplete: Option<&str>,
) -> Summary {
  let vetoed = assessments.iter().filter(|a| a.vetoed).count();

  let totals = Totals {
    merged: prs.len(),
    vetoed,
    below_threshold: assessments.len().saturating_sub(vetoed).saturating_sub(candidates.len()),
    candidates: candidates.len(),
  };

  let confidence = [Confidence::High, Confidence::Medium, Confidence::Low]
    .iter()
    .map(|tier| CountRow {
      key: tier.label().to_string(),
      count: candidates.iter().filter(|c| c.assessment.confidence == *tier).count(),
    })
    .collect();

  let mut days: BTreeMap<String, usize> = BTreeMap::new();
  let mut authors: BTreeMap<String, usize> = BTreeMap::new();
  let mut code = CodeStats::default();

  for pr in prs {
    *days.entry(day_bucket(&pr.merged_at, tz)).or_default() += 1;
    if !pr.author.is_empty() {
      *authors.entry(pr.author.clone()).or_default() += 1;
    }
    code.additions += pr.additions;
    code.deletions += pr.deletions;
    code.changed_files += pr.changed_files;
  }

  Summary {
    totals,
    threshold,
    confidence,
    tags_all: tag_counts(assessments.iter().map(|a| a.tags.as_slice())),
    tags_candidates: tag_counts(candidates.iter().map(|c| c.assessment.tags.as_slice())),
    trend: days.into_iter().map(|(key, count)| CountRow { key, count }).collect(),
    top_contributor: sorted_desc(authors).into_iter().next(),
    code,
    earliest_merge: prs.iter().map(|p| p.merged_at.clone()).min(),
    latest_merge: prs.iter().map(|p| p.merged_at.clone()).max(),
    complete: incomplete.is_none(),
    incomplete_reason: incomplete.map(str::to_string),
  }
}
