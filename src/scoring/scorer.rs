// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Weighted-tier bug-fix scoring of one merged PR against a compiled ruleset
// role: scoring/engine
// inputs: &PullRequest, &CompiledRuleset
// outputs: Assessment { score, confidence, signals, vetoed, tags }
// invariants:
// - Veto short-circuits to score 0 before any other rule runs
// - Tier-1 and tier-2 title scans contribute at most once each (first match in list order)
// - Body fallback runs only while the title score is below the fallback gate
// - Context bonus never applies to a zero score
// - Score only grows; confidence is a pure function of the final score
// errors: None (pure, infallible)
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use crate::model::{Assessment, Candidate, Confidence, PullRequest};
use crate::scoring::ruleset::{CompiledRuleset, ConfidenceThresholds, WordMatcher};
use crate::scoring::tags::tags_for;
use crate::util::char_prefix;

/// Longest domain match text kept in a signal.
pub const DOMAIN_MATCH_CHARS: usize = 80;

/// Map a final score onto a confidence tier.
pub fn confidence_for(score: u32, thresholds: &ConfidenceThresholds) -> Confidence {
  if score >= thresholds.high {
    Confidence::High
  } else if score >= thresholds.medium {
    Confidence::Medium
  } else {
    Confidence::Low
  }
}

fn first_word_match<'a>(matchers: &'a [WordMatcher], text: &str) -> Option<&'a str> {
  matchers.iter().find(|m| m.is_match(text)).map(|m| m.keyword.as_str())
}

struct Tally {
  score: u32,
  signals: Vec<String>,
}

impl Tally {
  fn add(&mut self, weight: u32, signal: String) {
    self.score = self.score.saturating_add(weight);
    self.signals.push(signal);
  }
}

/// Score one PR.
pub fn assess(pr: &PullRequest, rules: &CompiledRuleset) -> Assessment {
  let title = pr.title.to_lowercase();
  let body = pr.body.to_lowercase();
  let labels: Vec<String> = pr.labels.iter().map(|l| l.to_lowercase()).collect();
  let weights = rules.weights();
  let combined = format!("{} {}", title, body);
  let tags = tags_for(&combined, rules.functional_tags());

  let vetoed = |signal: String| Assessment {
    number: pr.number,
    score: 0,
    confidence: confidence_for(0, rules.thresholds()),
    signals: vec![signal],
    vetoed: true,
    tags: tags.clone(),
  };

  // Phase 1: veto (title patterns, then exact noise labels)
  if let Some(p) = rules.veto.iter().find(|p| p.re.is_match(&title)) {
    return vetoed(format!("VETO: title matches {}", p.pattern));
  }

  if let Some(label) = labels.iter().find(|l| rules.veto_labels.contains(l)) {
    return vetoed(format!("VETO: label {}", label));
  }

  let mut tally = Tally { score: 0, signals: Vec::new() };

  // Phase 2: title tiers
  if let Some(kw) = first_word_match(&rules.tier1, &title) {
    tally.add(weights.tier1, format!("Title(Tier1): {}", kw));
  }

  if let Some(kw) = first_word_match(&rules.tier2, &title) {
    tally.add(weights.tier2, format!("Title(Tier2): {}", kw));
  }

  // Phase 3: bounded body fallback
  if tally.score < weights.body_fallback_below {
    if rules.issue_ref.is_match(&body) {
      tally.add(weights.issue_ref, "Body: references issue".to_string());
    }

    let intro = char_prefix(&body, weights.body_intro_chars);

    if let Some(kw) = first_word_match(&rules.tier1, intro) {
      tally.add(weights.body_intro, format!("Body(Intro): {}", kw));
    }
  }

  // Phase 4: curated labels, one contribution per qualifying label
  for label in &labels {
    if rules.bug_labels.iter().any(|bl| label.contains(bl.as_str())) {
      tally.add(weights.label, format!("Label: {}", label));
    }
  }

  // Phase 5: domain patterns over title + body
  for p in &rules.domain {
    for m in p.re.find_iter(&combined) {
      tally.add(weights.domain_pattern, format!("Domain: {}", char_prefix(m.as_str(), DOMAIN_MATCH_CHARS)));
    }
  }

  // Phase 6: context bonus, only to refine an already plausible candidate
  if tally.score > 0 {
    if let Some(kw) = rules.context.iter().find(|k| title.contains(k.as_str())) {
      tally.add(weights.context, format!("Context: {}", kw));
    }
  }

  Assessment {
    number: pr.number,
    score: tally.score,
    confidence: confidence_for(tally.score, rules.thresholds()),
    signals: tally.signals,
    vetoed: false,
    tags,
  }
}

/// Score every PR, preserving input order.
pub fn assess_all(prs: &[PullRequest], rules: &CompiledRuleset) -> Vec<Assessment> {
  prs.iter().map(|pr| assess(pr, rules)).collect()
}

/// Non-vetoed PRs at or above `min_score`, highest score first, then most recently merged.
pub fn select_candidates<'a>(
  prs: &'a [PullRequest],
  assessments: &'a [Assessment],
  min_score: u32,
) -> Vec<Candidate<'a>> {
  let mut out: Vec<Candidate<'a>> = prs
    .iter()
    .zip(assessments.iter())
    .filter(|(_, a)| !a.vetoed && a.score >= min_score)
    .map(|(pr, assessment)| Candidate { pr, assessment })
    .collect();

  out.sort_by(|a, b| {
    b.assessment
      .score
      .cmp(&a.assessment.score)
      .then_with(|| b.pr.merged_at.cmp(&a.pr.merged_at))
  });

  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::pr_fixture;
  use crate::scoring::ruleset::{FunctionalTag, KeywordRuleset, Weights};
  use proptest::prelude::*;

  fn strs(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
  }

  fn rules() -> KeywordRuleset {
    KeywordRuleset {
      veto_patterns: strs(&[r"\btypo\b", r"\bdoc(s)?\b", r"\bbump\b"]),
      tier1_keywords: strs(&["fix", "patch", "vulnerability", "bug"]),
      tier2_keywords: strs(&["incorrect", "overflow", "gas", "optimization", "reentrancy"]),
      bug_labels: strs(&["bug", "security", "critical"]),
      context_keywords: strs(&["transfer", "withdraw", "vault"]),
      domain_patterns: strs(&[r"vault.*(?:fail|error|bug)"]),
      functional_tags: vec![FunctionalTag::new("Vault", &["vault", "withdraw"])],
      ..Default::default()
    }
  }

  fn compiled() -> CompiledRuleset {
    rules().compile().unwrap()
  }

  #[test]
  fn reentrancy_fix_with_bug_label_scores_high() {
    let pr = pr_fixture(1, "Fix reentrancy vulnerability in withdraw", "", &["bug"]);
    let a = assess(&pr, &compiled());

    assert!(!a.vetoed);
    // tier1 "fix" (+10), tier2 "reentrancy" (+5), label "bug" (+10), context "withdraw" (+2)
    assert_eq!(a.score, 27);
    assert_eq!(a.confidence, Confidence::High);
    assert_eq!(a.signals[0], "Title(Tier1): fix");
    assert!(!a.signals.iter().any(|s| s.contains("vulnerability")));
    assert!(a.signals.contains(&"Label: bug".to_string()));
  }

  #[test]
  fn tier1_and_label_only_scenario_is_twenty() {
    let rs = KeywordRuleset {
      tier2_keywords: vec![],
      context_keywords: vec![],
      ..rules()
    };
    let pr = pr_fixture(2, "Fix reentrancy vulnerability in withdraw", "", &["bug"]);
    let a = assess(&pr, &rs.compile().unwrap());
    assert_eq!(a.score, 20);
    assert_eq!(a.confidence, Confidence::High);
    assert_eq!(a.signals, vec!["Title(Tier1): fix".to_string(), "Label: bug".to_string()]);
  }

  #[test]
  fn docs_typo_title_is_vetoed_despite_fix() {
    let pr = pr_fixture(3, "docs: fix typo in README", "", &["bug"]);
    let a = assess(&pr, &compiled());
    assert!(a.vetoed);
    assert_eq!(a.score, 0);
    assert_eq!(a.signals.len(), 1);
    assert!(a.signals[0].starts_with("VETO: title matches"));
  }

  #[test]
  fn veto_label_rejects_before_scoring() {
    let rs = KeywordRuleset { veto_labels: strs(&["Dependencies"]), ..rules() };
    let pr = pr_fixture(4, "Fix overflow in vault", "", &["dependencies"]);
    let a = assess(&pr, &rs.compile().unwrap());
    assert!(a.vetoed);
    assert_eq!(a.signals, vec!["VETO: label dependencies".to_string()]);
  }

  #[test]
  fn plain_update_scores_zero_and_gets_no_context() {
    let pr = pr_fixture(5, "Update dependency version for transfer", "", &[]);
    let a = assess(&pr, &compiled());
    assert!(!a.vetoed);
    assert_eq!(a.score, 0);
    assert!(a.signals.is_empty());
    assert!(select_candidates(std::slice::from_ref(&pr), std::slice::from_ref(&a), 5).is_empty());
  }

  #[test]
  fn gas_optimization_with_context_scores_seven_across_thresholds() {
    let pr = pr_fixture(6, "Improve gas optimization for transfer loop", "", &[]);
    let a = assess(&pr, &compiled());
    assert_eq!(a.score, 7);
    assert_eq!(a.signals, vec!["Title(Tier2): gas".to_string(), "Context: transfer".to_string()]);

    let prs = vec![pr];
    let all = vec![a];
    for (threshold, included) in [(1, true), (5, true), (7, true), (8, false), (10, false)] {
      let picked = select_candidates(&prs, &all, threshold);
      assert_eq!(!picked.is_empty(), included, "threshold {}", threshold);
    }
  }

  #[test]
  fn body_fallback_adds_issue_ref_and_intro_keyword() {
    let pr = pr_fixture(7, "Adjust rounding", "This is a patch.\n\nFixes #42", &[]);
    let a = assess(&pr, &compiled());
    assert_eq!(a.score, 7);
    assert_eq!(a.signals, vec!["Body: references issue".to_string(), "Body(Intro): patch".to_string()]);
  }

  #[test]
  fn body_fallback_skipped_when_title_reaches_gate() {
    let pr = pr_fixture(8, "Patch handler", "Closes #9 and fixes the bug", &[]);
    let a = assess(&pr, &compiled());
    assert_eq!(a.score, 10);
    assert!(!a.signals.iter().any(|s| s.starts_with("Body")));
  }

  #[test]
  fn body_intro_scan_is_limited_to_prefix() {
    let body = format!("{} bug", "x".repeat(600));
    let pr = pr_fixture(9, "Adjust rounding", &body, &[]);
    let a = assess(&pr, &compiled());
    assert_eq!(a.score, 0);
  }

  #[test]
  fn every_matching_label_adds_weight() {
    let pr = pr_fixture(10, "Refactor module", "", &["Bug", "security-high", "enhancement"]);
    let a = assess(&pr, &compiled());
    assert_eq!(a.score, 20);
    assert_eq!(a.confidence, Confidence::High);
  }

  #[test]
  fn domain_patterns_are_audit_only_by_default() {
    let pr = pr_fixture(11, "Adjust vault", "the vault would error on close", &[]);
    let a = assess(&pr, &compiled());
    assert_eq!(a.score, 0);
    assert!(a.signals.iter().any(|s| s.starts_with("Domain: vault")));
    assert!(!a.signals.iter().any(|s| s.starts_with("Context")), "zero score must not receive context");
  }

  #[test]
  fn domain_patterns_add_to_score_when_weighted() {
    let rs = KeywordRuleset { weights: Weights { domain_pattern: 3, ..Weights::default() }, ..rules() };
    let pr = pr_fixture(12, "Adjust vault", "the vault would error on close", &[]);
    let a = assess(&pr, &rs.compile().unwrap());
    // domain +3, then context "vault" +2 because the score is now nonzero
    assert_eq!(a.score, 5);
    assert_eq!(a.signals.last().map(String::as_str), Some("Context: vault"));
  }

  #[test]
  fn long_domain_matches_are_truncated_in_signals() {
    let rules = crate::projects::find_project("makerdao").unwrap().ruleset.compile().unwrap();
    let body = format!("vault {} error", "x".repeat(40_000));
    let a = assess(&pr_fixture(9, "Handle edge case", &body, &[]), &rules);

    let domain: Vec<&String> = a.signals.iter().filter(|s| s.starts_with("Domain: ")).collect();
    assert!(!domain.is_empty());
    assert!(domain.iter().all(|s| s.chars().count() <= "Domain: ".len() + DOMAIN_MATCH_CHARS));
    assert!(domain[0].starts_with("Domain: vault x"));
  }

  #[test]
  fn tags_are_attached_from_combined_text() {
    let pr = pr_fixture(13, "Fix overflow", "touches withdraw path", &[]);
    let a = assess(&pr, &compiled());
    assert_eq!(a.tags, vec!["Vault".to_string()]);
  }

  #[test]
  fn confidence_thresholds_are_configuration() {
    let default = ConfidenceThresholds::default();
    let simple = ConfidenceThresholds { high: 3, medium: 1 };
    let table = [
      (0, Confidence::Low, Confidence::Low),
      (2, Confidence::Low, Confidence::Medium),
      (9, Confidence::Low, Confidence::High),
      (10, Confidence::Medium, Confidence::High),
      (14, Confidence::Medium, Confidence::High),
      (15, Confidence::High, Confidence::High),
    ];
    for (score, with_default, with_simple) in table {
      assert_eq!(confidence_for(score, &default), with_default, "score {}", score);
      assert_eq!(confidence_for(score, &simple), with_simple, "score {}", score);
    }
  }

  #[test]
  fn candidates_sort_by_score_then_merge_time() {
    let mut a = pr_fixture(20, "Fix overflow", "", &[]);
    a.merged_at = "2024-01-01T00:00:00Z".into();
    let mut b = pr_fixture(21, "Fix overflow", "", &[]);
    b.merged_at = "2024-06-01T00:00:00Z".into();
    let c = pr_fixture(22, "Fix overflow", "", &["bug"]);
    let d = pr_fixture(23, "docs: fix", "", &["bug"]);

    let prs = vec![a, b, c, d];
    let all = assess_all(&prs, &compiled());
    let picked: Vec<i64> = select_candidates(&prs, &all, 0).iter().map(|c| c.pr.number).collect();
    assert_eq!(picked, vec![22, 21, 20]);
  }

  proptest! {
    #[test]
    fn veto_always_zero_and_never_candidate(noise in "[a-z ]{0,40}", labels in proptest::collection::vec("(bug|security|critical|misc)", 0..4)) {
      let title = format!("fix bug vulnerability typo {}", noise);
      let label_refs: Vec<&str> = labels.iter().map(String::as_str).collect();
      let pr = pr_fixture(30, &title, "fixes #1 patch bug", &label_refs);
      let a = assess(&pr, &compiled());
      prop_assert!(a.vetoed);
      prop_assert_eq!(a.score, 0);
      prop_assert!(select_candidates(std::slice::from_ref(&pr), std::slice::from_ref(&a), 0).is_empty());
    }

    #[test]
    fn context_never_lifts_zero(word in "[a-z]{1,12}") {
      let title = format!("rework {} transfer withdraw vault", word);
      let rs = KeywordRuleset { bug_labels: vec![], domain_patterns: vec![], ..rules() };
      let compiled = rs.compile().unwrap();
      let pr = pr_fixture(31, &title, "", &[]);
      let a = assess(&pr, &compiled);
      if !a.signals.iter().any(|s| s.starts_with("Title") || s.starts_with("Body")) {
        prop_assert_eq!(a.score, 0);
        prop_assert!(!a.signals.iter().any(|s| s.starts_with("Context")));
      }
    }

    #[test]
    fn confidence_is_monotone_in_score(x in 0u32..100, y in 0u32..100) {
      let t = ConfidenceThresholds::default();
      let (lo, hi) = if x <= y { (x, y) } else { (y, x) };
      prop_assert!(confidence_for(lo, &t) <= confidence_for(hi, &t));
    }

    #[test]
    fn title_tiers_contribute_at_most_once(repeats in 1usize..6) {
      let title = std::iter::repeat("fix patch overflow gas").take(repeats).collect::<Vec<_>>().join(" ");
      let pr = pr_fixture(32, &title, "", &[]);
      let a = assess(&pr, &compiled());
      prop_assert_eq!(a.score, 15);
      prop_assert_eq!(a.signals.iter().filter(|s| s.starts_with("Title(Tier1)")).count(), 1);
      prop_assert_eq!(a.signals.iter().filter(|s| s.starts_with("Title(Tier2)")).count(), 1);
    }
  }
}
