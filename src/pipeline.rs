// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Orchestrate one scan (compile rules, fetch, snapshot, score, select, summarize, export) and the discovery run
// role: orchestration
// inputs: ScanConfig, a GithubApi backend, the run instant
// outputs: ScanPointer { project, file, merged, candidates } for stdout
// side_effects: Creates output/cache directories; writes snapshot and report files; network via the api seam
// invariants:
// - Ruleset compilation happens before any network call
// - Fetch and export failures degrade to partial results; only configuration errors return Err
// - Data flows one way: fetcher -> scorer -> exporter
// errors: anyhow with context for configuration and workspace errors
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::Serialize;

use crate::cli::ScanConfig;
use crate::github::api::{make_default_api, GithubApi};
use crate::github::discovery::{discover, DiscoveredRepo, DiscoveryOptions};
use crate::github::pull_requests::fetch_merged_pulls;
use crate::github::token::discover_token;
use crate::report::json::write_snapshot;
use crate::report::summary::build_summary;
use crate::report::{export, ReportInput, RunMeta};
use crate::scoring::ruleset::CompiledRuleset;
use crate::scoring::scorer::{assess_all, select_candidates};
use crate::util;

/// The one-line result printed to stdout after a scan.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScanPointer {
  pub project: String,
  pub file: Option<String>,
  pub merged: usize,
  pub candidates: usize,
}

/// Build a GitHub backend from the configured credential chain. A missing token is a warning only.
pub fn build_api(token_file: &Path, use_gh_cli: bool, api_base: &str) -> Box<dyn GithubApi> {
  let token = match discover_token(Some(token_file), use_gh_cli) {
    Some((token, source)) => {
      tracing::debug!(?source, "using GitHub token");
      Some(token)
    }
    None => {
      tracing::warn!("no GitHub token found; continuing unauthenticated (60 requests/hour)");
      None
    }
  };

  make_default_api(token, api_base)
}

fn snapshot_path(cache_dir: &Path, key: &str, now: &DateTime<Local>) -> PathBuf {
  cache_dir.join(format!("{}_merged_prs_{}.json", key, now.format("%Y%m%d_%H%M%S")))
}

pub fn run_scan(cfg: &ScanConfig, now: DateTime<Utc>) -> Result<ScanPointer> {
  let rules = cfg
    .project
    .ruleset
    .compile()
    .with_context(|| format!("compiling ruleset for {}", cfg.project.key))?;
  tracing::debug!(config = %cfg.to_json()?, "effective configuration");
  let api = build_api(Path::new(&cfg.token_file), cfg.use_gh_cli, &cfg.api_base);

  scan_with_api(cfg, &rules, api.as_ref(), now)
}

pub fn scan_with_api(cfg: &ScanConfig, rules: &CompiledRuleset, api: &dyn GithubApi, now: DateTime<Utc>) -> Result<ScanPointer> {
  let project = &cfg.project;
  let local_now = now.with_timezone(&Local);

  util::init_workspace(&[&project.output_dir, &project.cache_dir])?;

  tracing::info!(project = %project.key, repo = %project.full_name(), "scanning merged pull requests");
  if let Some(path) = &cfg.ruleset_path {
    tracing::info!(ruleset = %path, "using ruleset file");
  }

  // Phase 1: fetch
  let fetched = fetch_merged_pulls(api, &project.owner, &project.repo, &cfg.fetch_options());

  if let Some(reason) = &fetched.incomplete {
    tracing::warn!(reason = %reason, merged = fetched.prs.len(), "fetch incomplete; reporting partial results");
  }

  if cfg.snapshot {
    let path = snapshot_path(&project.cache_dir, &project.key, &local_now);
    match write_snapshot(&fetched.prs, &path) {
      Ok(()) => tracing::debug!(path = %path.display(), "snapshot written"),
      Err(e) => tracing::warn!(error = %format!("{:#}", e), "snapshot not written"),
    }
  }

  // Phase 2: score and select
  let assessments = assess_all(&fetched.prs, rules);
  let candidates = select_candidates(&fetched.prs, &assessments, project.min_score_threshold);
  let summary = build_summary(
    &fetched.prs,
    &assessments,
    &candidates,
    project.min_score_threshold,
    &cfg.tz,
    fetched.incomplete.as_deref(),
  );

  tracing::info!(
    merged = summary.totals.merged,
    vetoed = summary.totals.vetoed,
    candidates = summary.totals.candidates,
    threshold = project.min_score_threshold,
    "scoring complete"
  );

  // Phase 3: export
  let meta = RunMeta {
    project_key: project.key.clone(),
    display_name: project.display_name.clone(),
    repository: project.full_name(),
    generated_at: now.to_rfc3339_opts(SecondsFormat::Secs, true),
    tz: cfg.tz.clone(),
    pages: fetched.pages,
  };
  let input = ReportInput {
    meta: &meta,
    prs: &fetched.prs,
    assessments: &assessments,
    candidates: &candidates,
    summary: &summary,
  };
  let file = export(&input, &project.output_dir, cfg.format, &local_now);

  Ok(ScanPointer {
    project: project.key.clone(),
    file: file.map(util::canonicalize_lossy),
    merged: fetched.prs.len(),
    candidates: candidates.len(),
  })
}

/// Run discovery and write the JSON array to `out`, or return it for stdout.
pub fn run_discover(api: &dyn GithubApi, opts: &DiscoveryOptions, out: Option<&Path>) -> Result<Option<String>> {
  let found: Vec<DiscoveredRepo> = discover(api, opts);
  let json = serde_json::to_string_pretty(&found)?;

  match out {
    Some(path) => {
      std::fs::write(path, &json).with_context(|| format!("writing {}", path.display()))?;
      tracing::info!(path = %path.display(), found = found.len(), "discovery results written");
      Ok(None)
    }
    None => Ok(Some(json)),
  }
}
