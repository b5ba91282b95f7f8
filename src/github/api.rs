// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: GitHub REST seam (pull listing, repository search, languages) with HTTP and env-fixture backends
// role: github/api
// inputs: owner/name coordinates, page numbers, optional bearer token; PDS_TEST_* env fixtures for tests
// outputs: Raw serde_json values per page; FetchError on any non-2xx, transport or decode failure
// side_effects: Blocking network calls to api.github.com (30s timeout per request)
// invariants:
// - HTTP 403 maps to FetchError::RateLimited; other non-2xx map to FetchError::Status
// - The env-fixture backend never touches the network
// - One request per call; retries are the caller's decision
// errors: Typed FetchError; never panics
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::time::Duration;

use serde_json::Value;

use crate::error::FetchError;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const PULLS_PER_PAGE: u32 = 100;
const USER_AGENT: &str = "pr-defect-scan";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment fixtures for the offline backend.
pub const ENV_TEST_PULLS: &str = "PDS_TEST_PULLS_JSON";
pub const ENV_TEST_SEARCH: &str = "PDS_TEST_SEARCH_JSON";
pub const ENV_TEST_LANGUAGES: &str = "PDS_TEST_LANGUAGES_JSON";

// --- Trait seam for GitHub API ---
pub trait GithubApi {
  /// One page of `GET /repos/{owner}/{name}/pulls?state=closed&sort=updated&direction=desc`.
  fn list_closed_pulls(&self, owner: &str, name: &str, page: u32) -> Result<Vec<Value>, FetchError>;

  /// One page of `GET /search/repositories`; returns the whole response object.
  fn search_repositories(&self, query: &str, page: u32, per_page: u32) -> Result<Value, FetchError>;

  /// `GET /repos/{owner}/{name}/languages` (language → bytes).
  fn repo_languages(&self, owner: &str, name: &str) -> Result<Value, FetchError>;
}

struct GithubHttpApi {
  agent: ureq::Agent,
  base: String,
  token: Option<String>,
}

impl GithubHttpApi {
  fn new(token: Option<String>, base: String) -> Self {
    let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
    Self { agent, base, token }
  }

  fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, FetchError> {
    let url = format!("{}{}", self.base.trim_end_matches('/'), path);

    let mut req = self
      .agent
      .get(&url)
      .set("Accept", "application/vnd.github+json")
      .set("User-Agent", USER_AGENT);

    if let Some(token) = &self.token {
      req = req.set("Authorization", &format!("Bearer {}", token));
    }

    for (k, v) in query {
      req = req.query(k, v);
    }

    match req.call() {
      Ok(resp) => resp
        .into_json::<Value>()
        .map_err(|e| FetchError::Decode { url, reason: e.to_string() }),
      Err(ureq::Error::Status(403, _)) => Err(FetchError::RateLimited { url }),
      Err(ureq::Error::Status(status, _)) => Err(FetchError::Status { status, url }),
      Err(ureq::Error::Transport(t)) => Err(FetchError::Network { url, reason: t.to_string() }),
    }
  }
}

fn expect_array(v: Value, url: String) -> Result<Vec<Value>, FetchError> {
  match v {
    Value::Array(items) => Ok(items),
    other => Err(FetchError::Decode { url, reason: format!("expected array, got {}", kind(&other)) }),
  }
}

fn kind(v: &Value) -> &'static str {
  match v {
    Value::Null => "null",
    Value::Bool(_) => "bool",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

impl GithubApi for GithubHttpApi {
  fn list_closed_pulls(&self, owner: &str, name: &str, page: u32) -> Result<Vec<Value>, FetchError> {
    let path = format!("/repos/{}/{}/pulls", owner, name);
    let query = [
      ("state", "closed".to_string()),
      ("per_page", PULLS_PER_PAGE.to_string()),
      ("page", page.to_string()),
      ("sort", "updated".to_string()),
      ("direction", "desc".to_string()),
    ];
    let v = self.get_json(&path, &query)?;

    expect_array(v, path)
  }

  fn search_repositories(&self, query: &str, page: u32, per_page: u32) -> Result<Value, FetchError> {
    let params = [
      ("q", query.to_string()),
      ("sort", "stars".to_string()),
      ("order", "desc".to_string()),
      ("per_page", per_page.to_string()),
      ("page", page.to_string()),
    ];
    self.get_json("/search/repositories", &params)
  }

  fn repo_languages(&self, owner: &str, name: &str) -> Result<Value, FetchError> {
    self.get_json(&format!("/repos/{}/{}/languages", owner, name), &[])
  }
}

/// Offline backend fed from `PDS_TEST_*` variables.
///
/// `PDS_TEST_PULLS_JSON` and `PDS_TEST_SEARCH_JSON` hold an array of pages; page N is element N-1
/// and pages past the end are empty. A page of the form `{"status": 403}` simulates an HTTP error.
struct GithubEnvApi;

fn env_page(var: &str, page: u32) -> Result<Option<Value>, FetchError> {
  let url = format!("env:{}#{}", var, page);

  let Ok(raw) = std::env::var(var) else {
    return Ok(None);
  };
  let pages: Value = serde_json::from_str(&raw).map_err(|e| FetchError::Decode { url: url.clone(), reason: e.to_string() })?;
  let Some(entry) = pages.as_array().and_then(|a| a.get(page.saturating_sub(1) as usize)).cloned() else {
    return Ok(None);
  };

  if let Some(status) = entry.get("status").and_then(Value::as_u64) {
    return Err(match status {
      403 => FetchError::RateLimited { url },
      0 => FetchError::Network { url, reason: "simulated transport failure".into() },
      s => FetchError::Status { status: s as u16, url },
    });
  }

  Ok(Some(entry))
}

impl GithubApi for GithubEnvApi {
  fn list_closed_pulls(&self, _owner: &str, _name: &str, page: u32) -> Result<Vec<Value>, FetchError> {
    match env_page(ENV_TEST_PULLS, page)? {
      Some(v) => expect_array(v, format!("env:{}#{}", ENV_TEST_PULLS, page)),
      None => Ok(Vec::new()),
    }
  }

  fn search_repositories(&self, _query: &str, page: u32, _per_page: u32) -> Result<Value, FetchError> {
    Ok(env_page(ENV_TEST_SEARCH, page)?.unwrap_or_else(|| serde_json::json!({ "items": [] })))
  }

  fn repo_languages(&self, owner: &str, name: &str) -> Result<Value, FetchError> {
    let key = format!("{}/{}", owner, name);
    let all = std::env::var(ENV_TEST_LANGUAGES)
      .ok()
      .and_then(|s| serde_json::from_str::<Value>(&s).ok())
      .unwrap_or(Value::Null);

    Ok(all.get(&key).cloned().unwrap_or_else(|| serde_json::json!({})))
  }
}

fn env_wants_mock() -> bool {
  [ENV_TEST_PULLS, ENV_TEST_SEARCH, ENV_TEST_LANGUAGES]
    .iter()
    .any(|k| std::env::var(k).is_ok())
}

pub fn make_http_api(token: Option<String>, base: &str) -> Box<dyn GithubApi> {
  Box::new(GithubHttpApi::new(token, base.to_string()))
}

pub fn make_env_api() -> Box<dyn GithubApi> {
  Box::new(GithubEnvApi)
}

/// Env fixtures win when present so CLI tests run offline; otherwise HTTP.
pub fn make_default_api(token: Option<String>, base: &str) -> Box<dyn GithubApi> {
  if env_wants_mock() {
    tracing::debug!("using env-backed GitHub fixtures");
    make_env_api()
  } else {
    make_http_api(token, base)
  }
}
