// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Built-in project presets (repository coordinates, output locations, keyword rulesets)
// role: configuration/registry
// outputs: ProjectConfig values by key; the full preset list for `projects`
// invariants:
// - Keys are unique and lower-case
// - Every preset ruleset compiles (checked in tests)
// - Construction has no side effects; directories are created by util::init_workspace
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::PathBuf;

use serde::Serialize;

use crate::scoring::ruleset::{to_strings, FunctionalTag, KeywordRuleset};

pub const DEFAULT_MIN_SCORE: u32 = 5;

#[derive(Debug, Clone, Serialize)]
pub struct ProjectConfig {
  pub key: String,
  pub display_name: String,
  pub owner: String,
  pub repo: String,
  pub output_dir: PathBuf,
  pub cache_dir: PathBuf,
  pub min_score_threshold: u32,
  #[serde(skip)]
  pub ruleset: KeywordRuleset,
}

impl ProjectConfig {
  /// A preset with the conventional `output/<key>` and `data/cache/<key>` locations.
  pub fn new(key: &str, display_name: &str, owner: &str, repo: &str, ruleset: KeywordRuleset) -> Self {
    Self {
      key: key.to_string(),
      display_name: display_name.to_string(),
      owner: owner.to_string(),
      repo: repo.to_string(),
      output_dir: PathBuf::from("output").join(key),
      cache_dir: PathBuf::from("data").join("cache").join(key),
      min_score_threshold: DEFAULT_MIN_SCORE,
      ruleset,
    }
  }

  pub fn full_name(&self) -> String {
    format!("{}/{}", self.owner, self.repo)
  }
}

const VETO_COMMON: &[&str] = &[
  r"\btypo\b",
  r"\bcomment\b",
  r"\bdoc(s)?\b",
  r"\bdocumentation\b",
  r"\bfuzz\b",
  r"\btest(s)?\b",
  r"\btesting\b",
  r"\bbenchmark\b",
  r"\bchore\b",
  r"\blint\b",
  r"\bstyle\b",
  r"\bformat\b",
  r"\bci\b",
  r"\bworkflow\b",
  r"\bbump\b",
  r"\bversion\b",
  r"\brelease\b",
  r"\bmerge\b",
];

const TIER1: &[&str] = &[
  "fix",
  "fixed",
  "fixes",
  "fixing",
  "patch",
  "patched",
  "resolve",
  "resolved",
  "bug",
  "bugs",
  "vulnerability",
  "exploit",
  "hack",
  "prevent",
  "prevention",
  "hotfix",
  "critical",
  "restore",
  "revert",
];

const TIER2: &[&str] = &[
  "incorrect",
  "correct",
  "correction",
  "wrong",
  "fail",
  "failure",
  "failed",
  "error",
  "crash",
  "panic",
  "stuck",
  "broken",
  "validate",
  "validation",
  "check",
  "require",
  "assert",
  "gas",
  "optimize",
  "optimization",
  "leak",
  "overflow",
  "underflow",
  "permission",
  "access",
  "auth",
  "role",
  "modifier",
  "event",
  "emit",
  "unsafe",
  "unchecked",
  "reentrancy",
];

const BUG_LABELS: &[&str] = &["bug", "defect", "security", "high", "critical", "invalid"];

fn base_ruleset(extra_veto: &[&str]) -> KeywordRuleset {
  let mut veto = to_strings(VETO_COMMON);
  veto.extend(to_strings(extra_veto));

  KeywordRuleset {
    veto_patterns: veto,
    tier1_keywords: to_strings(TIER1),
    tier2_keywords: to_strings(TIER2),
    bug_labels: to_strings(BUG_LABELS),
    ..Default::default()
  }
}

fn with_domain(mut rules: KeywordRuleset, context: &[&str], domain: &[&str], tags: Vec<FunctionalTag>) -> KeywordRuleset {
  rules.context_keywords = to_strings(context);
  rules.domain_patterns = to_strings(domain);
  rules.functional_tags = tags;
  rules
}

fn thirdweb() -> ProjectConfig {
  let rules = with_domain(
    base_ruleset(&[r"\bexample\b", r"\bsample\b", r"\blicense\b", r"\breadme\b", r"\bmakefile\b", r"\bscript\b"]),
    &[
      "factory", "registry", "router", "platform", "extension", "plugin", "proxy", "implementation", "upgrade", "clone",
      "drop", "marketplace", "edition", "pack", "split", "vote", "multiwrap", "token", "nft", "erc721", "erc1155",
      "erc20", "claim", "mint", "signature", "sig", "lazy", "reveal", "metadata", "royalty", "royalties", "primary",
      "secondary", "sale", "merkle", "proof", "allowlist", "snapshot",
    ],
    &[],
    vec![
      FunctionalTag::new("Drops", &["drop", "claim", "allowlist", "lazy", "reveal"]),
      FunctionalTag::new("Marketplace", &["marketplace", "listing", "offer", "auction", "sale"]),
      FunctionalTag::new("Extensions", &["extension", "plugin", "router", "proxy", "upgrade"]),
      FunctionalTag::new("Royalty", &["royalty", "royalties", "split"]),
    ],
  );
  ProjectConfig::new("thirdweb", "Thirdweb", "thirdweb-dev", "contracts", rules)
}

fn layerzero() -> ProjectConfig {
  let rules = with_domain(
    base_ruleset(&[r"\bignore\b", r"\bexample\b", r"\blicense\b", r"\breadme\b", r"\bmakefile\b"]),
    &[
      "endpoint", "uln", "ultra light node", "relayer", "oracle", "lzapp", "payload", "adapter", "library", "chainid",
      "nonce", "trusted", "remote", "path", "fee", "estimate", "contract", "token", "erc20", "erc721", "mint", "burn",
      "transfer", "msg.value", "payable",
    ],
    &[],
    vec![
      FunctionalTag::new("Messaging", &["endpoint", "payload", "nonce", "relayer", "uln"]),
      FunctionalTag::new("Oracle", &["oracle", "proof", "block header"]),
      FunctionalTag::new("Fees", &["fee", "estimate", "msg.value"]),
    ],
  );
  ProjectConfig::new("layerzero", "LayerZero v1", "LayerZero-Labs", "LayerZero-v1", rules)
}

fn sidra() -> ProjectConfig {
  let rules = with_domain(
    base_ruleset(&[r"\bignore\b", r"\bexample\b"]),
    &["contract", "token", "erc20", "erc721", "mint", "burn", "transfer", "wallet", "sidra", "chain", "validator"],
    &[],
    vec![
      FunctionalTag::new("Token", &["token", "erc20", "erc721", "mint", "burn", "transfer"]),
      FunctionalTag::new("Wallet", &["wallet", "multisig", "signer"]),
      FunctionalTag::new("Validator", &["validator", "staking", "consensus"]),
    ],
  );
  ProjectConfig::new("sidra", "Sidra Chain", "SidraChain", "sidra-contracts", rules)
}

fn nibbstack() -> ProjectConfig {
  let mut rules = base_ruleset(&[]);
  rules.veto_patterns = to_strings(&[
    r"\btypo\b", r"\bcomment\b", r"\bdoc(s)?\b", r"\bdocumentation\b", r"\btest(s)?\b", r"\btesting\b",
    r"\bcoverage\b", r"\bchore\b", r"\blint\b", r"\bprettier\b", r"\beslint\b", r"\bci\b", r"\bgithub\b",
    r"\bworkflow\b", r"\bbump\b", r"\bversion\b", r"\bdependency\b", r"\breadme\b", r"\blicense\b", r"\bignore\b",
    r"\bconfig\b",
  ]);
  rules.bug_labels = to_strings(&["bug", "defect", "security", "invalid"]);
  let rules = with_domain(
    rules,
    &[
      "transfer", "transferfrom", "safetransfer", "approve", "approval", "setapprovalforall", "getapproved",
      "operator", "owner", "ownable", "ownership", "mint", "burn", "balance", "balanceof", "uri", "tokenuri",
      "baseuri", "metadata", "receiver", "onerc721received", "enumerable", "supply", "index",
    ],
    &[],
    vec![
      FunctionalTag::new("Transfer", &["transfer", "safetransfer", "receiver", "onerc721received"]),
      FunctionalTag::new("Approval", &["approve", "approval", "operator", "setapprovalforall"]),
      FunctionalTag::new("Metadata", &["uri", "tokenuri", "metadata"]),
      FunctionalTag::new("Enumerable", &["enumerable", "index", "supply"]),
    ],
  );
  ProjectConfig::new("nibbstack", "nibbstack ERC-721", "nibbstack", "erc721", rules)
}

fn solmate() -> ProjectConfig {
  let rules = with_domain(
    base_ruleset(&[]),
    &[
      "math", "fixedpoint", "wad", "ray", "mulwad", "divwad", "rounding", "precision", "sqrt", "rpow", "erc20",
      "erc721", "erc1155", "erc4626", "vault", "permit", "assembly", "auth", "owned",
    ],
    &[
      r"overflow.*(?:check|fix|bug|math|calc)",
      r"underflow.*(?:check|fix|bug|math)",
      r"rounding.*(?:error|bug|fix|direction|precision)",
      r"unsafe.*(?:math|cast|conversion)",
      r"assembly.*(?:bug|fix|memory|storage|stack)",
      r"memory.*(?:corruption|leak|bug|fix|overlap)",
      r"erc4626.*(?:rounding|preview|convert|bug|fix)",
      r"permit.*(?:signature|replay|bug|fix|deadline)",
      r"safe.*transfer.*(?:fail|revert|bug|fix|return)",
      r"auth.*(?:bypass|bug|fix|check|owner)",
    ],
    vec![
      FunctionalTag::new("Math", &["math", "fixedpoint", "wad", "ray", "overflow", "rounding"]),
      FunctionalTag::new("Token", &["erc20", "erc721", "erc1155", "erc4626", "transfer", "approval"]),
      FunctionalTag::new("Auth", &["auth", "owned", "authority", "permission"]),
      FunctionalTag::new("Gas/Assembly", &["gas", "assembly", "yul", "optimize", "unchecked", "inline"]),
      FunctionalTag::new("Utils", &["utils", "libstring", "merkle", "signature", "create3"]),
    ],
  );
  ProjectConfig::new("solmate", "Solmate", "transmissions11", "solmate", rules)
}

fn solady() -> ProjectConfig {
  let rules = with_domain(
    base_ruleset(&[]),
    &[
      "assembly", "yul", "mstore", "calldata", "memory", "erc4337", "userop", "paymaster", "ecdsa", "signature",
      "merkle", "libzip", "libclone", "libsort", "libstring", "erc20", "erc721", "erc1155", "permit",
    ],
    &[
      r"assembly.*(?:bug|fix|stack|memory|slot)",
      r"mstore.*(?:overwrite|bug|fix|offset|collision)",
      r"calldata.*(?:load|copy|bug|fix|offset)",
      r"memory.*(?:corruption|leak|bug|fix|expansion)",
      r"userop.*(?:hash|bug|fix|gas|limit)",
      r"signature.*(?:invalid|replay|bug|fix|check)",
      r"merkle.*(?:proof|verify|bug|fix|root)",
      r"clone.*(?:predict|create|bug|fix|address)",
      r"bit.*(?:shift|mask|op|bug|fix)",
      r"rounding.*(?:error|bug|fix|muldiv)",
    ],
    vec![
      FunctionalTag::new("Assembly", &["assembly", "yul", "gas", "optimize", "inline"]),
      FunctionalTag::new("Account Abstraction", &["erc4337", "userop", "paymaster", "bundler", "account"]),
      FunctionalTag::new("Crypto", &["ecdsa", "signature", "merkle", "hash", "ecrecover"]),
      FunctionalTag::new("Utils", &["libzip", "libclone", "libsort", "libstring", "utils"]),
      FunctionalTag::new("Token", &["erc20", "erc721", "erc1155", "permit"]),
    ],
  );
  ProjectConfig::new("solady", "Solady", "Vectorized", "solady", rules)
}

fn makerdao() -> ProjectConfig {
  let rules = with_domain(
    base_ruleset(&[]),
    &[
      "dai", "cdp", "vault", "collateral", "stability", "governance", "liquidation", "auction", "flapper", "flopper",
      "vow", "jug", "spot", "pause", "spell", "chief", "debt", "surplus", "vat", "cat", "dog", "clip", "pot", "ilk",
      "urn",
    ],
    &[
      r"vault.*(?:fail|error|bug|incorrect|liquidat)",
      r"auction.*(?:fail|error|bug|wrong|invalid)",
      r"governance.*(?:fail|error|bug|vote|spell)",
      r"dai.*(?:fail|error|bug|peg|stability|rate)",
      r"collateral.*(?:fail|error|bug|lock|unlock)",
      r"liquidation.*(?:fail|error|bug|penalty|auction)",
      r"oracle.*(?:fail|error|bug|price|feed)",
      r"flash.*(?:fail|error|bug|loan|attack)",
      r"spell.*(?:fail|error|bug|cast|schedule)",
      r"vat.*(?:fail|error|bug|frob|grab)",
      r"dog.*(?:fail|error|bug|bark|clip)",
      r"jug.*(?:fail|error|bug|drip|base)",
    ],
    vec![
      FunctionalTag::new("Vault", &["vault", "cdp", "collateral", "liquidation", "auction"]),
      FunctionalTag::new("Governance", &["governance", "vote", "spell", "chief", "hat", "mkr"]),
      FunctionalTag::new("Stability", &["dai", "stability", "rate", "fee", "dsr", "surplus"]),
    ],
  );
  ProjectConfig::new("makerdao", "MakerDAO DSS", "makerdao", "dss", rules)
}

fn rocketpool() -> ProjectConfig {
  let rules = with_domain(
    base_ruleset(&[]),
    &[
      "minipool", "validator", "staking", "deposit", "withdrawal", "node", "reth", "rpl", "reward", "commission",
      "smoothing", "oracle", "guardian", "dao", "beacon", "slashing",
    ],
    &[
      r"staking.*(?:fail|error|bug|incorrect|revert)",
      r"validator.*(?:fail|error|bug|wrong|invalid|exit)",
      r"minipool.*(?:fail|error|bug|stuck|dissolve|finalis)",
      r"deposit.*(?:fail|error|bug|insufficient|excess|lost)",
      r"withdrawal.*(?:fail|error|bug|delay|stuck|timeout)",
      r"reth.*(?:fail|error|bug|mint|burn|ratio|exchange)",
      r"reward.*(?:fail|error|bug|claim|distribute|calculate)",
      r"oracle.*(?:fail|error|bug|price|ratio|feed|update)",
      r"access.*(?:fail|error|bug|control|permission|unauthorized)",
      r"balance.*(?:fail|error|bug|mismatch|inconsistent)",
    ],
    vec![
      FunctionalTag::new("Staking", &["staking", "validator", "minipool", "deposit", "withdrawal", "node"]),
      FunctionalTag::new("Rewards", &["reward", "reth", "rpl", "commission", "smoothing", "claim", "merkle"]),
      FunctionalTag::new("Governance", &["dao", "governance", "oracle", "guardian", "proposal", "vote"]),
      FunctionalTag::new("Security", &["slashing", "penalty", "guardian", "upgrade", "proxy", "access"]),
    ],
  );
  ProjectConfig::new("rocketpool", "Rocket Pool", "rocket-pool", "rocketpool", rules)
}

fn thegraph() -> ProjectConfig {
  let rules = with_domain(
    base_ruleset(&[]),
    &[
      "staking", "delegation", "curation", "indexer", "subgraph", "allocation", "reward", "grt", "epoch", "channel",
      "attestation", "dispute",
    ],
    &[
      r"staking.*(?:fail|error|bug|incorrect|slash)",
      r"delegation.*(?:fail|error|bug|wrong|invalid)",
      r"curation.*(?:fail|error|bug|signal|manipulation)",
      r"indexer.*(?:fail|error|bug|slash|penalty)",
      r"subgraph.*(?:fail|error|bug|invalid|malformed)",
      r"allocation.*(?:fail|error|bug|overflow|underflow)",
      r"reward.*(?:fail|error|bug|calculation|distribution)",
      r"grt.*(?:fail|error|bug|transfer|burn|mint)",
      r"epoch.*(?:fail|error|bug|settlement|update)",
      r"attestation.*(?:fail|error|bug|invalid|verification)",
    ],
    vec![
      FunctionalTag::new("Staking", &["stake", "staking", "delegate", "delegation", "slash", "slashing"]),
      FunctionalTag::new("Curation", &["curator", "curation", "signal", "grt", "token"]),
      FunctionalTag::new("Indexing", &["indexer", "indexing", "subgraph", "query", "allocation"]),
    ],
  );
  ProjectConfig::new("thegraph", "The Graph", "graphprotocol", "contracts", rules)
}

fn lens() -> ProjectConfig {
  let rules = with_domain(
    base_ruleset(&[]),
    &[
      "lenshub", "profile", "publication", "dispatcher", "module", "collect", "follow", "reference", "tokenuri",
      "svg", "eip712", "signature", "nonce",
    ],
    &[
      r"profile.*(?:id|owner|bug|fix|check)",
      r"publication.*(?:type|pointer|bug|fix)",
      r"dispatcher.*(?:auth|permission|bug|fix)",
      r"module.*(?:return|data|decode|bug|fix)",
      r"collect.*(?:limit|fee|bug|fix|revert)",
      r"follow.*(?:nft|approve|bug|fix)",
      r"signature.*(?:replay|invalid|domain|bug|fix)",
      r"nonce.*(?:increment|check|bug|fix)",
      r"proxy.*(?:slot|collision|init|bug|fix)",
    ],
    vec![
      FunctionalTag::new("Core", &["lenshub", "profile", "publication", "dispatcher"]),
      FunctionalTag::new("Modules", &["module", "collect", "follow", "reference"]),
      FunctionalTag::new("NFT", &["nft", "erc721", "tokenuri", "svg", "metadata"]),
      FunctionalTag::new("Governance", &["governance", "admin", "upgrade", "proxy"]),
      FunctionalTag::new("Signatures", &["eip712", "signature", "meta-tx", "nonce"]),
    ],
  );
  ProjectConfig::new("lens", "Lens Protocol", "lens-protocol", "core", rules)
}

fn aircash() -> ProjectConfig {
  let rules = with_domain(
    base_ruleset(&[]),
    &["order", "trade", "cancel", "escrow", "witness", "appeal", "dispute", "fee", "tax", "withdraw"],
    &[
      r"order.*(?:status|state|stuck|bug|fix)",
      r"cancel.*(?:fail|permission|time|bug|fix)",
      r"release.*(?:fail|double|check|bug|fix)",
      r"escrow.*(?:lock|balance|bug|fix)",
      r"witness.*(?:vote|count|list|bug|fix)",
      r"appeal.*(?:judge|result|time|bug|fix)",
      r"fee.*(?:calc|deduct|amount|bug|fix)",
      r"decimal.*(?:precision|bug|fix)",
      r"msg\.sender.*(?:check|bug|fix)",
    ],
    vec![
      FunctionalTag::new("Trading", &["order", "trade", "create", "cancel", "release", "escrow"]),
      FunctionalTag::new("Witness/Appeal", &["witness", "appeal", "judge", "vote", "dispute"]),
      FunctionalTag::new("Finance", &["fee", "tax", "withdraw", "transfer", "token"]),
      FunctionalTag::new("UI", &["ui", "frontend", "css", "html", "style", "display", "mobile"]),
    ],
  );
  ProjectConfig::new("aircash", "AirCash", "Aircoin-official", "AirCash", rules)
}

fn seaport() -> ProjectConfig {
  let mut rules = base_ruleset(&[
    r"\bcoverage\b",
    r"\brefactor\b",
    r"\brename\b",
    r"\bclean\b",
    r"\bnit\b",
    r"\bignore\b",
    r"\blicense\b",
    r"\bcd\b",
    r"\bmove\b",
    r"^(chore|docs|test|ci|build|style|refactor)(\(.*\))?:",
  ]);
  rules.veto_labels = to_strings(&["documentation", "dependencies", "wontfix", "invalid", "question", "duplicate"]);
  rules.bug_labels = to_strings(&["bug", "security", "exploit", "vulnerability", "high risk", "critical"]);
  let rules = with_domain(
    rules,
    &[
      "order", "offer", "consideration", "fulfillment", "match", "validate", "validation", "status", "hash", "eip712",
      "signature", "digest", "nonce", "counter", "zone", "conduit", "transfer", "spend", "amount", "recipient",
      "criteria", "root", "proof", "merkle", "assembly", "yul", "mstore", "mload", "calldata", "memory", "offset",
      "pointer", "encode", "decode",
    ],
    &[],
    vec![
      FunctionalTag::new("Orders", &["order", "offer", "consideration", "fulfillment", "match"]),
      FunctionalTag::new("Zones/Conduits", &["zone", "conduit"]),
      FunctionalTag::new("Signatures", &["signature", "eip712", "digest", "nonce", "counter"]),
      FunctionalTag::new("Assembly", &["assembly", "yul", "mstore", "mload", "calldata", "memory"]),
    ],
  );
  ProjectConfig::new("seaport", "Seaport", "ProjectOpenSea", "seaport", rules)
}

fn zksync() -> ProjectConfig {
  let rules = with_domain(
    base_ruleset(&[]),
    &[
      "proof", "prover", "verifier", "circuit", "bridge", "deposit", "withdrawal", "mailbox", "paymaster", "bootloader",
      "batch", "sequencer", "diamond", "facet", "governance", "timelock", "l1", "l2", "pubdata",
    ],
    &[
      r"proof.*(?:fail|error|bug|invalid|generation|verification)",
      r"verifier.*(?:fail|error|bug|invalid|reject|accept|wrong)",
      r"bridge.*(?:fail|error|bug|deposit|withdrawal|transfer)",
      r"deposit.*(?:fail|error|bug|amount|token|l1|l2|stuck)",
      r"withdrawal.*(?:fail|error|bug|proof|finalization|delay)",
      r"mailbox.*(?:fail|error|bug|queue|priority|execution)",
      r"paymaster.*(?:fail|error|bug|sponsor|fee|validation|flow)",
      r"batch.*(?:fail|error|bug|commit|prove|execute|priority)",
      r"bootloader.*(?:fail|error|bug|execution|gas|memory)",
      r"diamond.*(?:fail|error|bug|facet|cut|selector|storage)",
      r"upgrade.*(?:fail|error|bug|proxy|implementation|diamond)",
    ],
    vec![
      FunctionalTag::new("ZK Proof", &["proof", "prover", "verifier", "circuit", "plonk", "recursion", "aggregation"]),
      FunctionalTag::new("Bridge", &["bridge", "deposit", "withdrawal", "l1tol2", "l2tol1", "cross", "chain"]),
      FunctionalTag::new("Account Abstraction", &["account", "abstraction", "paymaster", "factory", "userops", "sponsor"]),
      FunctionalTag::new("Gas", &["gas", "fee", "ergs", "estimation", "pricing", "computation", "overhead"]),
      FunctionalTag::new("Batch", &["batch", "commit", "prove", "execute", "sequencer", "priority", "bootloader"]),
      FunctionalTag::new("Upgrade", &["upgrade", "governance", "diamond", "facet", "proxy", "timelock"]),
    ],
  );
  ProjectConfig::new("zksync", "zkSync Era", "matter-labs", "era-contracts", rules)
}

fn openzeppelin() -> ProjectConfig {
  let rules = with_domain(
    base_ruleset(&[
      r"^update\s+dependency",
      r"^\[deps\]",
      r"^chore\(deps\)",
      r"dependabot",
      r"renovate",
      r"^docs?[:(]",
      r"natspec",
      r"^prettier",
      r"^cleanup",
      r"^changelog",
      r"^prepare.*release",
    ]),
    &[
      "erc20", "erc721", "erc777", "erc1155", "erc1967", "erc2612", "erc2771", "erc3156", "erc4626", "token", "nft",
      "ownable", "accesscontrol", "role", "permission", "reentrancyguard", "pausable", "nonreentrant", "proxy",
      "upgradeable", "uups", "transparent", "beacon", "initializable", "safemath", "safecast", "math", "ecdsa",
      "signature", "merkle", "eip712", "governor", "timelock", "votes", "voting",
    ],
    &[],
    vec![
      FunctionalTag::new("Token", &["erc20", "erc721", "erc777", "erc1155", "erc4626", "token"]),
      FunctionalTag::new("Access", &["ownable", "accesscontrol", "role", "permission"]),
      FunctionalTag::new("Proxy/Upgrade", &["proxy", "upgradeable", "uups", "beacon", "initializable"]),
      FunctionalTag::new("Crypto", &["ecdsa", "signature", "merkle", "eip712"]),
      FunctionalTag::new("Governance", &["governor", "timelock", "votes", "voting"]),
    ],
  );
  ProjectConfig::new("openzeppelin", "OpenZeppelin Contracts", "OpenZeppelin", "openzeppelin-contracts", rules)
}

pub fn all_projects() -> Vec<ProjectConfig> {
  vec![
    thirdweb(),
    layerzero(),
    sidra(),
    nibbstack(),
    solmate(),
    solady(),
    makerdao(),
    rocketpool(),
    thegraph(),
    lens(),
    aircash(),
    seaport(),
    zksync(),
    openzeppelin(),
  ]
}

pub fn find_project(key: &str) -> Option<ProjectConfig> {
  let key = key.to_lowercase();
  all_projects().into_iter().find(|p| p.key == key)
}

/// An unnamed project for `--owner/--repo` runs, keyed by the lower-cased repo name.
pub fn ad_hoc_project(owner: &str, repo: &str) -> ProjectConfig {
  let key = repo.to_lowercase();
  ProjectConfig::new(&key, &format!("{}/{}", owner, repo), owner, repo, base_ruleset(&[]))
}
