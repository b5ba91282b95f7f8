// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Dotted-path lookups and typed extraction over serde_json::Value for GitHub payloads
// role: extension/serde_json
// outputs: JsonFetch trait (fetch, fetch_names) and JsonFetched wrapper with typed/default extraction
// invariants: No panics; missing paths and JSON nulls yield None; to_or_default returns T::default on failure
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::de::DeserializeOwned;

/// A located JSON value awaiting typed extraction.
pub struct JsonFetched<'a> {
  inner: Option<&'a serde_json::Value>,
}

impl<'a> JsonFetched<'a> {
  /// Deserialize as `T`; `None` when missing, null, or of another shape.
  pub fn to<T>(&self) -> Option<T>
  where
    T: DeserializeOwned,
  {
    self
      .inner
      .filter(|v| !v.is_null())
      .and_then(|v| T::deserialize(v).ok())
  }

  pub fn to_or_default<T>(&self) -> T
  where
    T: DeserializeOwned + Default,
  {
    self.to::<T>().unwrap_or_default()
  }
}

pub trait JsonFetch {
  /// Walk a dotted path such as "user.login" or "milestone.title".
  fn fetch(&self, path: &str) -> JsonFetched<'_>;

  /// Collect `field` from every object in the array at `path`, e.g. label names.
  fn fetch_names(&self, path: &str, field: &str) -> Vec<String>;
}

impl JsonFetch for serde_json::Value {
  fn fetch(&self, path: &str) -> JsonFetched<'_> {
    if path.is_empty() {
      return JsonFetched { inner: Some(self) };
    }

    let mut cur = self;

    for key in path.split('.') {
      match cur.get(key) {
        Some(next) => cur = next,
        None => return JsonFetched { inner: None },
      }
    }

    JsonFetched { inner: Some(cur) }
  }

  fn fetch_names(&self, path: &str, field: &str) -> Vec<String> {
    let Some(items) = self.fetch(path).inner.and_then(|v| v.as_array()) else {
      return Vec::new();
    };

    items
      .iter()
      .filter_map(|item| item.fetch(field).to::<String>())
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fetch_top_level_nested_and_null() {
    let v: serde_json::Value = serde_json::json!({
      "title": "Hello",
      "body": null,
      "user": { "login": "octocat" },
      "milestone": null
    });

    assert_eq!(v.fetch("title").to::<String>().as_deref(), Some("Hello"));
    assert_eq!(v.fetch("user.login").to::<String>().as_deref(), Some("octocat"));
    assert_eq!(v.fetch("body").to::<String>(), None);
    assert_eq!(v.fetch("body").to_or_default::<String>(), "");
    assert_eq!(v.fetch("milestone.title").to::<String>(), None);
    assert_eq!(v.fetch("").to::<serde_json::Value>(), Some(v.clone()));
  }

  #[test]
  fn fetch_names_collects_strings_and_skips_malformed_items() {
    let v: serde_json::Value = serde_json::json!({
      "labels": [{ "name": "bug" }, { "id": 3 }, { "name": "security" }],
      "assignees": "not-an-array"
    });

    assert_eq!(v.fetch_names("labels", "name"), vec!["bug".to_string(), "security".to_string()]);
    assert!(v.fetch_names("assignees", "login").is_empty());
    assert!(v.fetch_names("missing", "login").is_empty());
  }
}
