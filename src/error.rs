//! Typed errors for the GitHub client and ruleset loading.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
  #[error("rate limited (HTTP 403) at {url}")]
  RateLimited { url: String },

  #[error("HTTP {status} at {url}")]
  Status { status: u16, url: String },

  #[error("network error at {url}: {reason}")]
  Network { url: String, reason: String },

  #[error("unexpected response body at {url}: {reason}")]
  Decode { url: String, reason: String },
}

impl FetchError {
  pub fn is_rate_limited(&self) -> bool {
    matches!(self, FetchError::RateLimited { .. })
  }
}

#[derive(Debug, Error)]
pub enum RulesetError {
  #[error("invalid {field} pattern {pattern:?}: {source}")]
  InvalidPattern {
    field: &'static str,
    pattern: String,
    #[source]
    source: regex::Error,
  },

  #[error("reading ruleset {path}: {source}")]
  Io {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("parsing ruleset {path}: {source}")]
  Parse {
    path: String,
    #[source]
    source: serde_json::Error,
  },
}
