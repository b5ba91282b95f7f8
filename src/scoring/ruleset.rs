// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Keyword ruleset value object (serde-loadable) and its compiled regex form
// role: scoring/configuration
// inputs: KeywordRuleset literals from the project registry or a JSON file
// outputs: CompiledRuleset with one regex per keyword/pattern, compiled once per run
// invariants:
// - Keyword order is preserved; first-match semantics depend on it
// - Every keyword is matched as a whole word on lower-cased text
// - Compilation fails fast on the first invalid pattern, naming the field
// errors: RulesetError::{InvalidPattern, Io, Parse}
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::RulesetError;

pub const DEFAULT_ISSUE_REF_PATTERN: &str = r"(fix|close|resolve)(e?s)?\s+#\d+";

/// Additive weights and the body-fallback gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
  pub tier1: u32,
  pub tier2: u32,
  pub issue_ref: u32,
  pub body_intro: u32,
  pub label: u32,
  pub context: u32,
  /// Per match. Zero keeps domain patterns in the audit trail only.
  pub domain_pattern: u32,
  pub body_fallback_below: u32,
  pub body_intro_chars: usize,
}

impl Default for Weights {
  fn default() -> Self {
    Self {
      tier1: 10,
      tier2: 5,
      issue_ref: 5,
      body_intro: 2,
      label: 10,
      context: 2,
      domain_pattern: 0,
      body_fallback_below: 10,
      body_intro_chars: 500,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceThresholds {
  pub high: u32,
  pub medium: u32,
}

impl Default for ConfidenceThresholds {
  fn default() -> Self {
    Self { high: 15, medium: 10 }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionalTag {
  pub tag: String,
  pub keywords: Vec<String>,
}

impl FunctionalTag {
  pub fn new(tag: &str, keywords: &[&str]) -> Self {
    Self { tag: tag.to_string(), keywords: to_strings(keywords) }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordRuleset {
  pub veto_patterns: Vec<String>,
  pub veto_labels: Vec<String>,
  pub tier1_keywords: Vec<String>,
  pub tier2_keywords: Vec<String>,
  pub bug_labels: Vec<String>,
  pub issue_ref_pattern: String,
  pub context_keywords: Vec<String>,
  pub domain_patterns: Vec<String>,
  pub functional_tags: Vec<FunctionalTag>,
  pub weights: Weights,
  pub confidence: ConfidenceThresholds,
}

impl Default for KeywordRuleset {
  fn default() -> Self {
    Self {
      veto_patterns: Vec::new(),
      veto_labels: Vec::new(),
      tier1_keywords: Vec::new(),
      tier2_keywords: Vec::new(),
      bug_labels: Vec::new(),
      issue_ref_pattern: DEFAULT_ISSUE_REF_PATTERN.to_string(),
      context_keywords: Vec::new(),
      domain_patterns: Vec::new(),
      functional_tags: Vec::new(),
      weights: Weights::default(),
      confidence: ConfidenceThresholds::default(),
    }
  }
}

impl KeywordRuleset {
  /// Load a ruleset from a JSON file. Missing fields take their defaults.
  pub fn from_json_file(path: &Path) -> Result<Self, RulesetError> {
    let display = path.display().to_string();
    let data = std::fs::read(path).map_err(|source| RulesetError::Io { path: display.clone(), source })?;

    serde_json::from_slice(&data).map_err(|source| RulesetError::Parse { path: display, source })
  }

  pub fn compile(&self) -> Result<CompiledRuleset, RulesetError> {
    CompiledRuleset::new(self.clone())
  }
}

pub fn to_strings(items: &[&str]) -> Vec<String> {
  items.iter().map(|s| s.to_string()).collect()
}

/// A keyword paired with its whole-word matcher.
#[derive(Debug, Clone)]
pub struct WordMatcher {
  pub keyword: String,
  re: Regex,
}

impl WordMatcher {
  fn new(field: &'static str, keyword: &str) -> Result<Self, RulesetError> {
    let lowered = keyword.to_lowercase();
    let pattern = format!(r"\b{}\b", regex::escape(&lowered));
    let re = compile_pattern(field, &pattern)?;

    Ok(Self { keyword: lowered, re })
  }

  pub fn is_match(&self, text: &str) -> bool {
    self.re.is_match(text)
  }
}

/// A raw pattern kept next to its source text for audit messages.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
  pub pattern: String,
  pub re: Regex,
}

impl PatternMatcher {
  fn new(field: &'static str, pattern: &str) -> Result<Self, RulesetError> {
    Ok(Self { pattern: pattern.to_string(), re: compile_pattern(field, pattern)? })
  }
}

fn compile_pattern(field: &'static str, pattern: &str) -> Result<Regex, RulesetError> {
  Regex::new(pattern).map_err(|source| RulesetError::InvalidPattern { field, pattern: pattern.to_string(), source })
}

#[derive(Debug, Clone)]
pub struct CompiledRuleset {
  pub source: KeywordRuleset,
  pub veto: Vec<PatternMatcher>,
  pub veto_labels: Vec<String>,
  pub tier1: Vec<WordMatcher>,
  pub tier2: Vec<WordMatcher>,
  pub bug_labels: Vec<String>,
  pub issue_ref: Regex,
  pub context: Vec<String>,
  pub domain: Vec<PatternMatcher>,
}

impl CompiledRuleset {
  pub fn new(source: KeywordRuleset) -> Result<Self, RulesetError> {
    let veto = source
      .veto_patterns
      .iter()
      .map(|p| PatternMatcher::new("veto_patterns", p))
      .collect::<Result<Vec<_>, _>>()?;
    let tier1 = source
      .tier1_keywords
      .iter()
      .map(|k| WordMatcher::new("tier1_keywords", k))
      .collect::<Result<Vec<_>, _>>()?;
    let tier2 = source
      .tier2_keywords
      .iter()
      .map(|k| WordMatcher::new("tier2_keywords", k))
      .collect::<Result<Vec<_>, _>>()?;
    let domain = source
      .domain_patterns
      .iter()
      .map(|p| PatternMatcher::new("domain_patterns", p))
      .collect::<Result<Vec<_>, _>>()?;
    let issue_ref = compile_pattern("issue_ref_pattern", &source.issue_ref_pattern)?;

    Ok(Self {
      veto_labels: lowered(&source.veto_labels),
      bug_labels: lowered(&source.bug_labels),
      context: lowered(&source.context_keywords),
      veto,
      tier1,
      tier2,
      issue_ref,
      domain,
      source,
    })
  }

  pub fn weights(&self) -> &Weights {
    &self.source.weights
  }

  pub fn thresholds(&self) -> &ConfidenceThresholds {
    &self.source.confidence
  }

  pub fn functional_tags(&self) -> &[FunctionalTag] {
    &self.source.functional_tags
  }
}

fn lowered(items: &[String]) -> Vec<String> {
  items.iter().map(|s| s.to_lowercase()).collect()
}
