//! Multi-sheet workbook export.

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::report::summary::CountRow;
use crate::report::ReportInput;
use crate::util::char_prefix;

pub const SHEET_CANDIDATES: &str = "Defect_Candidates";
pub const SHEET_ALL: &str = "All_Merged_PRs";
pub const SHEET_STATS: &str = "Statistics";
pub const SHEET_TRENDS: &str = "Time_Trends";
pub const SHEET_CONFIDENCE: &str = "Confidence_Distribution";
pub const SHEET_FUNCTIONS: &str = "Function_Classification";

const CANDIDATE_HEADERS: &[&str] = &[
  "PR Number",
  "Score",
  "Confidence",
  "Title",
  "Signals",
  "Merged At",
  "URL",
  "Author",
  "Body Snippet",
  "Classification",
];

const MERGED_HEADERS: &[&str] = &[
  "PR Number",
  "Title",
  "Author",
  "Merged At",
  "Labels",
  "Score",
  "Confidence",
  "Vetoed",
  "Signals",
  "Additions",
  "Deletions",
  "Changed Files",
  "URL",
];

/// Excel rejects longer string cells.
pub const MAX_CELL_CHARS: usize = 32_767;

fn text(s: &str) -> &str {
  char_prefix(s, MAX_CELL_CHARS)
}

fn header_row(ws: &mut Worksheet, headers: &[&str], bold: &Format) -> Result<(), XlsxError> {
  for (col, h) in headers.iter().enumerate() {
    ws.write_string_with_format(0, col as u16, *h, bold)?;
  }
  ws.set_freeze_panes(1, 0)?;
  Ok(())
}

fn count_sheet(ws: &mut Worksheet, headers: &[&str], rows: &[CountRow], bold: &Format) -> Result<(), XlsxError> {
  header_row(ws, headers, bold)?;
  for (i, row) in rows.iter().enumerate() {
    let r = i as u32 + 1;
    ws.write_string(r, 0, text(&row.key))?;
    ws.write_number(r, 1, row.count as f64)?;
  }
  Ok(())
}

fn build(input: &ReportInput<'_>, workbook: &mut Workbook) -> Result<(), XlsxError> {
  let bold = Format::new().set_bold();
  let summary = input.summary;

  let ws = workbook.add_worksheet();
  ws.set_name(SHEET_CANDIDATES)?;
  header_row(ws, CANDIDATE_HEADERS, &bold)?;
  for (i, c) in input.candidate_rows().iter().enumerate() {
    let r = i as u32 + 1;
    ws.write_number(r, 0, c.number as f64)?;
    ws.write_number(r, 1, c.score)?;
    ws.write_string(r, 2, text(&c.confidence))?;
    ws.write_string(r, 3, text(&c.title))?;
    ws.write_string(r, 4, text(&c.signals))?;
    ws.write_string(r, 5, text(&c.merged_at))?;
    ws.write_string(r, 6, text(&c.url))?;
    ws.write_string(r, 7, text(&c.author))?;
    ws.write_string(r, 8, text(&c.body_snippet))?;
    ws.write_string(r, 9, text(&c.classification))?;
  }
  ws.set_column_width(3, 60)?;
  ws.set_column_width(4, 50)?;

  let ws = workbook.add_worksheet();
  ws.set_name(SHEET_ALL)?;
  header_row(ws, MERGED_HEADERS, &bold)?;
  for (i, m) in input.merged_rows().iter().enumerate() {
    let r = i as u32 + 1;
    ws.write_number(r, 0, m.number as f64)?;
    ws.write_string(r, 1, text(&m.title))?;
    ws.write_string(r, 2, text(&m.author))?;
    ws.write_string(r, 3, text(&m.merged_at))?;
    ws.write_string(r, 4, text(&m.labels))?;
    ws.write_number(r, 5, m.score)?;
    ws.write_string(r, 6, text(&m.confidence))?;
    ws.write_boolean(r, 7, m.vetoed)?;
    ws.write_string(r, 8, text(&m.signals))?;
    ws.write_number(r, 9, m.additions as f64)?;
    ws.write_number(r, 10, m.deletions as f64)?;
    ws.write_number(r, 11, m.changed_files as f64)?;
    ws.write_string(r, 12, text(&m.url))?;
  }
  ws.set_column_width(1, 60)?;

  let ws = workbook.add_worksheet();
  ws.set_name(SHEET_STATS)?;
  header_row(ws, &["Metric", "Value"], &bold)?;
  let top = summary
    .top_contributor
    .as_ref()
    .map(|t| format!("{} ({})", t.key, t.count))
    .unwrap_or_default();
  let stats: Vec<(&str, String)> = vec![
    ("Project", input.meta.display_name.clone()),
    ("Repository", input.meta.repository.clone()),
    ("Generated At", input.meta.generated_at.clone()),
    ("Timezone", input.meta.tz.clone()),
    ("Pages Fetched", input.meta.pages.to_string()),
    ("Total Merged PRs", summary.totals.merged.to_string()),
    ("Vetoed", summary.totals.vetoed.to_string()),
    ("Below Threshold", summary.totals.below_threshold.to_string()),
    ("Defect Candidates", summary.totals.candidates.to_string()),
    ("Min Score Threshold", summary.threshold.to_string()),
    ("Top Contributor", top),
    ("Total Additions", summary.code.additions.to_string()),
    ("Total Deletions", summary.code.deletions.to_string()),
    ("Total Changed Files", summary.code.changed_files.to_string()),
    ("Earliest Merge", summary.earliest_merge.clone().unwrap_or_default()),
    ("Latest Merge", summary.latest_merge.clone().unwrap_or_default()),
    ("Fetch Complete", if summary.complete { "yes".into() } else { "no".into() }),
    ("Incomplete Reason", summary.incomplete_reason.clone().unwrap_or_default()),
  ];
  for (i, (k, v)) in stats.iter().enumerate() {
    let r = i as u32 + 1;
    ws.write_string(r, 0, *k)?;
    ws.write_string(r, 1, text(&v))?;
  }
  ws.set_column_width(0, 24)?;

  let ws = workbook.add_worksheet();
  ws.set_name(SHEET_TRENDS)?;
  count_sheet(ws, &["Date", "Merged PRs"], &summary.trend, &bold)?;

  let ws = workbook.add_worksheet();
  ws.set_name(SHEET_CONFIDENCE)?;
  count_sheet(ws, &["Confidence", "Candidates"], &summary.confidence, &bold)?;

  let ws = workbook.add_worksheet();
  ws.set_name(SHEET_FUNCTIONS)?;
  header_row(ws, &["Function", "All PRs", "Candidates"], &bold)?;
  for (i, row) in summary.tags_all.iter().enumerate() {
    let r = i as u32 + 1;
    let in_candidates = summary.tags_candidates.iter().find(|c| c.key == row.key).map(|c| c.count).unwrap_or(0);
    ws.write_string(r, 0, text(&row.key))?;
    ws.write_number(r, 1, row.count as f64)?;
    ws.write_number(r, 2, in_candidates as f64)?;
  }

  Ok(())
}

pub fn write_workbook(input: &ReportInput<'_>, path: &Path) -> Result<()> {
  let mut workbook = Workbook::new();

  build(input, &mut workbook).context("building workbook")?;
  workbook.save(path).with_context(|| format!("saving {}", path.display()))
}
