//! Functional classification: which keyword groups a PR's text touches.

use crate::scoring::ruleset::FunctionalTag;

pub const GENERAL_TAG: &str = "General";

/// Tags whose keywords occur (substring, lower-cased) in `text`, in ruleset order.
pub fn tags_for(text: &str, groups: &[FunctionalTag]) -> Vec<String> {
  let lowered = text.to_lowercase();

  groups
    .iter()
    .filter(|g| g.keywords.iter().any(|k| lowered.contains(&k.to_lowercase())))
    .map(|g| g.tag.clone())
    .collect()
}

/// Comma-joined tags, or "General" when none matched.
pub fn classification_label(tags: &[String]) -> String {
  if tags.is_empty() {
    GENERAL_TAG.to_string()
  } else {
    tags.join(", ")
  }
}
