// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Utilities for paths, workspace setup, time parsing/bucketing, report naming, and man page rendering
// role: utilities/helpers
// inputs: Various primitives; DateTime; paths; clap CommandFactory
// outputs: Canonicalized paths, parsed bounds, day buckets, timestamped file names, man page text
// side_effects: init_workspace creates directories
// invariants:
// - char_prefix never splits UTF-8
// - report_file_name pattern is stable and locale-independent
// - day_bucket falls back to the raw date prefix when a timestamp does not parse
// errors: IO errors bubble with context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local, Months, NaiveDate, TimeZone, Utc};
use chrono_english::{parse_date_string, parse_duration, Dialect, Interval};
use chrono_tz::Tz;
use clap::CommandFactory;

pub fn canonicalize_lossy<P: AsRef<Path>>(p: P) -> String {
  let p = p.as_ref();
  let pb: PathBuf = match std::fs::canonicalize(p) {
    Ok(x) => x,
    Err(_) => match std::env::current_dir() {
      Ok(cwd) => cwd.join(p),
      Err(_) => PathBuf::from(p),
    },
  };
  pb.to_string_lossy().to_string()
}

/// The first `max_chars` characters of `s`, borrowed.
pub fn char_prefix(s: &str, max_chars: usize) -> &str {
  match s.char_indices().nth(max_chars) {
    Some((idx, _)) => &s[..idx],
    None => s,
  }
}

/// Create the output and cache directories a scan writes into.
pub fn init_workspace(dirs: &[&Path]) -> Result<()> {
  for dir in dirs {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
  }

  Ok(())
}

/// `<key>_defects_<YYYYmmdd_HHMMSS>.<ext>`
pub fn report_file_name(key: &str, now: &DateTime<Local>, ext: &str) -> String {
  format!("{}_defects_{}.{}", key, now.format("%Y%m%d_%H%M%S"), ext)
}

/// Parse a `--since` bound: RFC3339, a bare `YYYY-MM-DD` (UTC midnight), or an English phrase.
pub fn parse_since(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
  let s = input.trim();

  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Ok(dt.with_timezone(&Utc));
  }

  if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
    if let Some(naive) = d.and_hms_opt(0, 0, 0) {
      return Ok(Utc.from_utc_datetime(&naive));
    }
  }

  // "2 weeks ago" style offsets first; the date parser reads them differently.
  if let Ok(interval) = parse_duration(s) {
    let shifted = match interval {
      Interval::Seconds(secs) => Some(now + chrono::Duration::seconds(secs.into())),
      Interval::Days(days) => Some(now + chrono::Duration::days(days.into())),
      Interval::Months(months) if months < 0 => now.checked_sub_months(Months::new(months.unsigned_abs())),
      Interval::Months(months) => now.checked_add_months(Months::new(months as u32)),
    };
    if let Some(dt) = shifted {
      return Ok(dt);
    }
  }

  parse_date_string(s, now, Dialect::Uk).map_err(|e| anyhow::anyhow!("unrecognized --since value {:?}: {}", input, e))
}

/// Calendar day (`YYYY-MM-DD`) of an RFC3339 timestamp in `tz` ("utc", "local", or an IANA name).
pub fn day_bucket(iso: &str, tz: &str) -> String {
  let Ok(parsed) = DateTime::parse_from_rfc3339(iso) else {
    return char_prefix(iso, 10).to_string();
  };
  let utc = parsed.with_timezone(&Utc);

  if tz.eq_ignore_ascii_case("local") {
    return utc.with_timezone(&Local).format("%Y-%m-%d").to_string();
  }

  match tz.parse::<Tz>() {
    Ok(zone) if !tz.eq_ignore_ascii_case("utc") => utc.with_timezone(&zone).format("%Y-%m-%d").to_string(),
    _ => utc.format("%Y-%m-%d").to_string(),
  }
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
/// Returns the troff content as a UTF-8 string.
pub fn render_man_page<T: CommandFactory>() -> anyhow::Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
