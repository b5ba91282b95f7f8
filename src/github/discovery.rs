// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Find mature, popular Solidity repositories worth scanning (search + language share filter)
// role: github/discovery
// inputs: &dyn GithubApi, DiscoveryOptions (stars, age, Solidity share, exclusions, paging)
// outputs: Vec<DiscoveredRepo> in search order (stars desc)
// side_effects: Network calls through the api seam; sleeps between pages and on 403
// invariants:
// - Excluded repos are skipped before their languages are requested
// - At most max_pages search pages are requested
// - A languages failure counts as 0% Solidity, never aborts the search
// errors: None propagated; search errors end the crawl and are logged
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::ext::serde_json::JsonFetch;
use crate::github::api::GithubApi;
use crate::github::pull_requests::parse_timestamp;

/// Projects already analysed, matched as lower-cased substrings of `owner/name`.
pub const DEFAULT_EXCLUDED: &[&str] = &[
  "openzeppelin",
  "synthetix",
  "aave",
  "uniswap",
  "compound",
  "graphprotocol",
  "graph-node",
  "makerdao",
  "dss",
  "rocket-pool",
  "rocketpool",
  "zksync",
  "era-contracts",
  "matter-labs",
];

/// GitHub search only serves the first 1000 results.
pub const SEARCH_PAGE_CAP: u32 = 34;
const DAYS_PER_YEAR: f64 = 365.25;

#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
  pub min_stars: u32,
  pub min_age_years: f64,
  pub min_solidity_pct: f64,
  pub per_page: u32,
  pub max_pages: u32,
  pub excluded: Vec<String>,
  pub page_delay: Duration,
  pub rate_limit_wait: Duration,
  pub max_retries: u32,
  pub now: DateTime<Utc>,
}

impl Default for DiscoveryOptions {
  fn default() -> Self {
    Self {
      min_stars: 1000,
      min_age_years: 2.0,
      min_solidity_pct: 40.0,
      per_page: 30,
      max_pages: SEARCH_PAGE_CAP,
      excluded: DEFAULT_EXCLUDED.iter().map(|s| s.to_string()).collect(),
      page_delay: Duration::from_secs(1),
      rate_limit_wait: Duration::from_secs(30),
      max_retries: 5,
      now: Utc::now(),
    }
  }
}

impl DiscoveryOptions {
  pub fn cutoff_date(&self) -> String {
    let hours = (DAYS_PER_YEAR * 24.0 * self.min_age_years).round() as i64;
    (self.now - chrono::Duration::hours(hours)).format("%Y-%m-%d").to_string()
  }

  pub fn query(&self) -> String {
    format!("language:Solidity stars:>={} created:<={}", self.min_stars, self.cutoff_date())
  }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DiscoveredRepo {
  pub repo: String,
  pub stars: u64,
  pub age_years: f64,
  pub solidity_pct: f64,
  pub url: String,
  pub description: Option<String>,
}

pub fn is_excluded(full_name: &str, excluded: &[String]) -> bool {
  let lowered = full_name.to_lowercase();
  excluded.iter().any(|k| lowered.contains(&k.to_lowercase()))
}

/// Solidity bytes as a percentage of all language bytes; 0 when the map is empty.
pub fn solidity_percentage(languages: &Value) -> f64 {
  let Some(map) = languages.as_object() else {
    return 0.0;
  };
  let total: f64 = map.values().filter_map(Value::as_f64).sum();
  if total <= 0.0 {
    return 0.0;
  }
  let solidity = map.get("Solidity").and_then(Value::as_f64).unwrap_or(0.0);

  solidity * 100.0 / total
}

fn age_years(created_at: &str, now: &DateTime<Utc>) -> f64 {
  parse_timestamp(created_at)
    .map(|c| (*now - c).num_days() as f64 / DAYS_PER_YEAR)
    .unwrap_or(0.0)
}

fn search_page(api: &dyn GithubApi, query: &str, page: u32, opts: &DiscoveryOptions) -> Option<Vec<Value>> {
  let mut attempt = 0;

  loop {
    match api.search_repositories(query, page, opts.per_page) {
      Ok(v) => return Some(v.fetch("items").to_or_default::<Vec<Value>>()),
      Err(e) if e.is_rate_limited() && attempt < opts.max_retries => {
        attempt += 1;
        tracing::warn!(page, attempt, wait_secs = opts.rate_limit_wait.as_secs(), "search rate limited; waiting");
        std::thread::sleep(opts.rate_limit_wait);
      }
      Err(e) => {
        tracing::error!(page, error = %e, "search failed; stopping");
        return None;
      }
    }
  }
}

pub fn discover(api: &dyn GithubApi, opts: &DiscoveryOptions) -> Vec<DiscoveredRepo> {
  let query = opts.query();
  let mut found = Vec::new();

  tracing::info!(query = %query, min_solidity_pct = opts.min_solidity_pct, "searching repositories");

  for page in 1..=opts.max_pages {
    let Some(items) = search_page(api, &query, page, opts) else {
      break;
    };
    if items.is_empty() {
      break;
    }

    for item in &items {
      let owner = item.fetch("owner.login").to_or_default::<String>();
      let name = item.fetch("name").to_or_default::<String>();
      let full_name = format!("{}/{}", owner, name);

      if is_excluded(&full_name, &opts.excluded) {
        tracing::debug!(repo = %full_name, "excluded");
        continue;
      }

      let pct = match api.repo_languages(&owner, &name) {
        Ok(langs) => solidity_percentage(&langs),
        Err(e) => {
          tracing::warn!(repo = %full_name, error = %e, "languages lookup failed");
          0.0
        }
      };
      let stars = item.fetch("stargazers_count").to_or_default::<u64>();
      let age = age_years(&item.fetch("created_at").to_or_default::<String>(), &opts.now);

      if pct < opts.min_solidity_pct {
        tracing::info!(repo = %full_name, stars, solidity_pct = %format!("{:.1}", pct), "skip: low Solidity share");
        continue;
      }

      tracing::info!(rank = found.len() + 1, repo = %full_name, stars, solidity_pct = %format!("{:.1}", pct), "accepted");
      found.push(DiscoveredRepo {
        repo: full_name,
        stars,
        age_years: age,
        solidity_pct: pct,
        url: item.fetch("html_url").to_or_default::<String>(),
        description: item.fetch("description").to::<String>(),
      });
    }

    if page < opts.max_pages && !opts.page_delay.is_zero() {
      std::thread::sleep(opts.page_delay);
    }
  }

  tracing::info!(found = found.len(), "discovery complete");
  found
}
