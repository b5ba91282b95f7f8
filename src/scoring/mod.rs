// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Namespace for the defect-scoring engine (rulesets, scorer, functional tags)
// role: scoring/namespace
// outputs: Public submodules; no IO
// invariants: Scoring is stateless per PR and deterministic for a fixed ruleset
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

pub mod ruleset;
pub mod scorer;
pub mod tags;
