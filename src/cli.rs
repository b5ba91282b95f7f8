use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::github::api::DEFAULT_API_BASE;
use crate::github::discovery::{DiscoveryOptions, DEFAULT_EXCLUDED, SEARCH_PAGE_CAP};
use crate::github::pull_requests::{FetchOptions, DEFAULT_MAX_RETRIES};
use crate::projects::{self, ProjectConfig};
use crate::report::ReportFormat;
use crate::scoring::ruleset::KeywordRuleset;
use crate::util;

pub const DEFAULT_TOKEN_FILE: &str = "config/github_token";

#[derive(Parser, Debug)]
#[command(
    name = "pr-defect-scan",
    version,
    about = "Score merged GitHub pull requests for bug-fix likelihood and export a report",
    long_about = None
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Option<Command>,

  /// More log output on stderr (-v debug, -vv trace)
  #[arg(short, long, global = true, action = ArgAction::Count)]
  pub verbose: u8,

  /// Only warnings and errors on stderr
  #[arg(short, long, global = true)]
  pub quiet: bool,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Fetch, score and export one project
  Scan(ScanArgs),
  /// List the built-in project presets
  Projects(ProjectsArgs),
  /// Search GitHub for Solidity repositories worth scanning
  Discover(DiscoverArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
  /// Built-in project key (see `projects`)
  #[arg(long, short = 'p')]
  pub project: Option<String>,

  /// Repository owner for an ad-hoc project; requires --repo
  #[arg(long)]
  pub owner: Option<String>,

  /// Repository name for an ad-hoc project; requires --owner
  #[arg(long)]
  pub repo: Option<String>,

  /// JSON ruleset replacing the preset's keyword rules
  #[arg(long)]
  pub ruleset: Option<PathBuf>,

  /// Report directory (default: output/<key>)
  #[arg(long)]
  pub out_dir: Option<PathBuf>,

  /// Snapshot directory (default: data/cache/<key>)
  #[arg(long)]
  pub cache_dir: Option<PathBuf>,

  /// Minimum score for the candidates sheet
  #[arg(long)]
  pub min_score: Option<u32>,

  #[arg(long, value_enum, default_value_t = ReportFormat::Xlsx)]
  pub format: ReportFormat,

  /// Timezone for the daily trend: utc, local, or an IANA name
  #[arg(long, default_value = "utc")]
  pub tz: String,

  /// Ignore PRs merged before this point (RFC3339, YYYY-MM-DD, or "3 months ago")
  #[arg(long)]
  pub since: Option<String>,

  /// Stop after this many pages of 100
  #[arg(long)]
  pub max_pages: Option<u32>,

  /// On HTTP 403, sleep this many seconds and retry the page
  #[arg(long)]
  pub rate_limit_wait: Option<u64>,

  #[arg(long, default_value_t = DEFAULT_MAX_RETRIES)]
  pub max_retries: u32,

  /// Skip writing the raw merged-PR snapshot
  #[arg(long)]
  pub no_snapshot: bool,

  #[command(flatten)]
  pub auth: AuthArgs,

  /// Override the "now" instant (hidden; tests only)
  #[arg(long = "now-override", hide = true)]
  pub now_override: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct AuthArgs {
  /// File holding a GitHub token, used when GITHUB_TOKEN and GH_TOKEN are unset
  #[arg(long, default_value = DEFAULT_TOKEN_FILE)]
  pub token_file: PathBuf,

  /// Do not fall back to `gh auth token`
  #[arg(long)]
  pub no_gh_cli: bool,

  #[arg(long, hide = true, default_value = DEFAULT_API_BASE)]
  pub api_base: String,
}

#[derive(Args, Debug, Clone)]
pub struct ProjectsArgs {
  /// Print the presets as a JSON array
  #[arg(long)]
  pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct DiscoverArgs {
  #[arg(long, default_value_t = 1000)]
  pub min_stars: u32,

  /// Minimum repository age in years
  #[arg(long, default_value_t = 2.0)]
  pub min_age_years: f64,

  #[arg(long, default_value_t = 40.0)]
  pub min_solidity_pct: f64,

  #[arg(long, default_value_t = SEARCH_PAGE_CAP)]
  pub max_pages: u32,

  /// Extra owner/name substrings to skip (repeatable)
  #[arg(long = "exclude")]
  pub exclude: Vec<String>,

  /// Drop the built-in exclusion list
  #[arg(long)]
  pub no_default_excludes: bool,

  /// Write the JSON array here instead of stdout
  #[arg(long)]
  pub out: Option<PathBuf>,

  #[arg(long, default_value_t = 1000)]
  pub page_delay_ms: u64,

  #[arg(long, default_value_t = 30)]
  pub rate_limit_wait: u64,

  #[arg(long, default_value_t = DEFAULT_MAX_RETRIES)]
  pub max_retries: u32,

  #[command(flatten)]
  pub auth: AuthArgs,
}

#[derive(Debug, Serialize)]
pub struct ScanConfig {
  pub project: ProjectConfig,
  #[serde(skip)]
  pub ruleset_path: Option<String>,
  pub format: ReportFormat,
  pub tz: String,
  pub since: Option<String>,
  pub max_pages: Option<u32>,
  pub rate_limit_wait_secs: Option<u64>,
  pub max_retries: u32,
  pub snapshot: bool,
  pub token_file: String,
  pub use_gh_cli: bool,
  pub api_base: String,
  #[serde(skip)]
  pub since_at: Option<DateTime<Utc>>,
}

impl ScanConfig {
  /// Compact JSON of the effective settings, for debug logging.
  pub fn to_json(&self) -> Result<String> {
    Ok(serde_json::to_string(self)?)
  }

  pub fn fetch_options(&self) -> FetchOptions {
    FetchOptions {
      max_pages: self.max_pages,
      since: self.since_at,
      rate_limit_wait: self.rate_limit_wait_secs.map(Duration::from_secs),
      max_retries: self.max_retries,
    }
  }
}

fn validate_tz(tz: &str) -> Result<()> {
  if tz.eq_ignore_ascii_case("utc") || tz.eq_ignore_ascii_case("local") || tz.parse::<chrono_tz::Tz>().is_ok() {
    return Ok(());
  }
  bail!("unknown timezone {:?}: use utc, local, or an IANA name such as Asia/Shanghai", tz)
}

fn select_project(args: &ScanArgs) -> Result<ProjectConfig> {
  match (&args.project, &args.owner, &args.repo) {
    (Some(key), None, None) => projects::find_project(key).with_context(|| {
      let keys: Vec<String> = projects::all_projects().into_iter().map(|p| p.key).collect();
      format!("unknown project {:?}; known: {}", key, keys.join(", "))
    }),
    (None, Some(owner), Some(repo)) => Ok(projects::ad_hoc_project(owner, repo)),
    (None, None, None) => bail!("Provide --project <key> or --owner <owner> --repo <repo>"),
    (Some(_), _, _) => bail!("Ambiguous project selection: choose --project or --owner/--repo, not both"),
    _ => bail!("--owner and --repo must be given together"),
  }
}

pub fn normalize_scan(args: ScanArgs, now: DateTime<Utc>) -> Result<ScanConfig> {
  let mut project = select_project(&args)?;

  if let Some(path) = &args.ruleset {
    project.ruleset = KeywordRuleset::from_json_file(path)?;
  }
  if let Some(dir) = &args.out_dir {
    project.output_dir = dir.clone();
  }
  if let Some(dir) = &args.cache_dir {
    project.cache_dir = dir.clone();
  }
  if let Some(min) = args.min_score {
    project.min_score_threshold = min;
  }

  validate_tz(&args.tz)?;

  let since_at = args.since.as_deref().map(|s| util::parse_since(s, now)).transpose()?;

  Ok(ScanConfig {
    project,
    ruleset_path: args.ruleset.as_deref().map(util::canonicalize_lossy),
    format: args.format,
    tz: args.tz,
    since: since_at.map(|d| d.to_rfc3339()),
    max_pages: args.max_pages,
    rate_limit_wait_secs: args.rate_limit_wait,
    max_retries: args.max_retries,
    snapshot: !args.no_snapshot,
    token_file: args.auth.token_file.to_string_lossy().to_string(),
    use_gh_cli: !args.auth.no_gh_cli,
    api_base: args.auth.api_base,
    since_at,
  })
}

pub fn discovery_options(args: &DiscoverArgs, now: DateTime<Utc>) -> DiscoveryOptions {
  let mut excluded: Vec<String> = if args.no_default_excludes {
    Vec::new()
  } else {
    DEFAULT_EXCLUDED.iter().map(|s| s.to_string()).collect()
  };
  excluded.extend(args.exclude.iter().map(|s| s.to_lowercase()));

  DiscoveryOptions {
    min_stars: args.min_stars,
    min_age_years: args.min_age_years,
    min_solidity_pct: args.min_solidity_pct,
    per_page: 30,
    max_pages: args.max_pages.min(SEARCH_PAGE_CAP),
    excluded,
    page_delay: Duration::from_millis(args.page_delay_ms),
    rate_limit_wait: Duration::from_secs(args.rate_limit_wait),
    max_retries: args.max_retries,
    now,
  }
}

/// Resolve the hidden `--now-override` used by tests.
pub fn parse_now(raw: Option<&str>) -> Result<DateTime<Utc>> {
  match raw {
    Some(s) => Ok(
      DateTime::parse_from_rfc3339(s)
        .with_context(|| format!("invalid --now-override {:?}", s))?
        .with_timezone(&Utc),
    ),
    None => Ok(Utc::now()),
  }
}
