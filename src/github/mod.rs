// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: GitHub access: API seam, credential discovery, PR fetching and repository discovery
// role: github/namespace
// outputs: Public submodules
// invariants: All network access goes through api::GithubApi
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

pub mod api;
pub mod discovery;
pub mod pull_requests;
pub mod token;
