// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Page through closed pull requests and keep the merged ones as typed PullRequest values
// role: github/fetcher
// inputs: &dyn GithubApi, owner/name, FetchOptions (page cap, since bound, rate-limit retry)
// outputs: FetchOutcome { prs in API order, pages fetched, incomplete reason }
// side_effects: Network calls through the api seam; optional sleep between rate-limit retries
// invariants:
// - A PR is kept iff merged_at is non-null
// - Pagination stops at the first empty page, the page cap, or the since bound
// - Any FetchError ends pagination; PRs collected so far are returned with incomplete set
// errors: None propagated; failures are logged and surfaced through FetchOutcome.incomplete
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::FetchError;
use crate::ext::serde_json::JsonFetch;
use crate::github::api::GithubApi;
use crate::model::PullRequest;

pub const DEFAULT_MAX_RETRIES: u32 = 5;

#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
  pub max_pages: Option<u32>,
  pub since: Option<DateTime<Utc>>,
  /// Sleep this long and retry the same page on HTTP 403. `None` stops at the first 403.
  pub rate_limit_wait: Option<Duration>,
  pub max_retries: u32,
}

#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
  pub prs: Vec<PullRequest>,
  pub pages: u32,
  /// Why pagination ended early, if it did.
  pub incomplete: Option<String>,
}

/// Build a PullRequest from one pulls-listing item. `None` for unmerged PRs.
pub fn normalize_pull(item: &Value) -> Option<PullRequest> {
  let merged_at = item.fetch("merged_at").to::<String>()?;

  Some(PullRequest {
    number: item.fetch("number").to::<i64>().unwrap_or(0),
    title: item.fetch("title").to_or_default::<String>(),
    body: item.fetch("body").to_or_default::<String>(),
    state: item.fetch("state").to_or_default::<String>(),
    author: item.fetch("user.login").to_or_default::<String>(),
    url: item.fetch("html_url").to_or_default::<String>(),
    labels: item.fetch_names("labels", "name"),
    merged_at,
    created_at: item.fetch("created_at").to::<String>(),
    updated_at: item.fetch("updated_at").to::<String>(),
    additions: item.fetch("additions").to_or_default::<i64>(),
    deletions: item.fetch("deletions").to_or_default::<i64>(),
    changed_files: item.fetch("changed_files").to_or_default::<i64>(),
    commits: item.fetch("commits").to_or_default::<i64>(),
    base_ref: item.fetch("base.ref").to::<String>(),
    head_ref: item.fetch("head.ref").to::<String>(),
    milestone: item.fetch("milestone.title").to::<String>(),
    assignees: item.fetch_names("assignees", "login"),
  })
}

pub(crate) fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s).ok().map(|d| d.with_timezone(&Utc))
}

fn merged_on_or_after(pr: &PullRequest, since: &DateTime<Utc>) -> bool {
  // Unparseable timestamps are kept.
  parse_timestamp(&pr.merged_at).map(|t| t >= *since).unwrap_or(true)
}

fn page_ends_before(items: &[Value], since: &DateTime<Utc>) -> bool {
  items
    .last()
    .and_then(|last| last.fetch("updated_at").to::<String>())
    .and_then(|s| parse_timestamp(&s))
    .map(|t| t < *since)
    .unwrap_or(false)
}

fn fetch_page_with_retry(api: &dyn GithubApi, owner: &str, name: &str, page: u32, opts: &FetchOptions) -> Result<Vec<Value>, FetchError> {
  let mut attempt = 0;

  loop {
    match api.list_closed_pulls(owner, name, page) {
      Err(e) if e.is_rate_limited() && attempt < opts.max_retries => {
        let Some(wait) = opts.rate_limit_wait else {
          return Err(e);
        };
        attempt += 1;
        tracing::warn!(page, attempt, wait_secs = wait.as_secs(), "rate limited; sleeping before retry");
        std::thread::sleep(wait);
      }
      other => return other,
    }
  }
}

/// Fetch every merged PR reachable under `opts`.
pub fn fetch_merged_pulls(api: &dyn GithubApi, owner: &str, name: &str, opts: &FetchOptions) -> FetchOutcome {
  let mut out = FetchOutcome::default();
  let mut page = 1u32;

  loop {
    if let Some(max) = opts.max_pages {
      if page > max {
        tracing::info!(max_pages = max, "page cap reached");
        break;
      }
    }

    let items = match fetch_page_with_retry(api, owner, name, page, opts) {
      Ok(items) => items,
      Err(e) => {
        tracing::error!(page, error = %e, "fetch failed; keeping partial results");
        out.incomplete = Some(e.to_string());
        break;
      }
    };

    if items.is_empty() {
      break;
    }

    out.pages = page;
    let before = out.prs.len();

    for item in &items {
      let Some(pr) = normalize_pull(item) else {
        continue;
      };
      if let Some(since) = &opts.since {
        if !merged_on_or_after(&pr, since) {
          continue;
        }
      }
      out.prs.push(pr);
    }

    tracing::debug!(page, items = items.len(), merged = out.prs.len() - before, "fetched page");

    if let Some(since) = &opts.since {
      if page_ends_before(&items, since) {
        tracing::debug!(page, "page crosses the since bound; stopping");
        break;
      }
    }

    page += 1;
  }

  tracing::info!(owner, name, pages = out.pages, merged = out.prs.len(), "fetched merged pull requests");
  out
}
