//! Registry of imported mods and their versions.

use std::cmp::Ordering;
use std::collections::HashMap;

/// Compares dot-separated version strings segment by segment.
///
/// Missing segments count as 0, so `"1.2"` equals `"1.2.0"`. Each segment is
/// read as an optionally signed integer from its leading characters; a segment
/// without digits reads as 0 and values beyond `i64` saturate.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let left: Vec<i64> = a.split('.').map(segment_value).collect();
    let right: Vec<i64> = b.split('.').map(segment_value).collect();

    let len = left.len().max(right.len());
    (0..len)
        .map(|i| {
            let l = left.get(i).copied().unwrap_or(0);
            let r = right.get(i).copied().unwrap_or(0);
            l.cmp(&r)
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn segment_value(segment: &str) -> i64 {
    let trimmed = segment.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    digits
        .chars()
        .map_while(|c| c.to_digit(10))
        .map(i64::from)
        .fold(0i64, |value, digit| {
            let shifted = value.saturating_mul(10);
            if negative {
                shifted.saturating_sub(digit)
            } else {
                shifted.saturating_add(digit)
            }
        })
}

/// Names and versions of the mods loaded into a game.
#[derive(Clone, Debug, Default)]
pub struct ImportRegistry {
    imported: HashMap<String, String>,
}

impl ImportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `name` at `version`, replacing an earlier registration.
    pub fn register(&mut self, name: impl Into<String>, version: impl Into<String>) {
        self.imported.insert(name.into(), version.into());
    }

    pub fn is_imported(&self, name: &str) -> bool {
        self.imported.contains_key(name)
    }

    pub fn version(&self, name: &str) -> Option<&str> {
        self.imported.get(name).map(String::as_str)
    }

    /// `None` when `name` is not imported.
    pub fn at_least(&self, name: &str, version: &str) -> Option<bool> {
        self.version(name)
            .map(|current| compare_versions(current, version).is_ge())
    }

    /// `None` when `name` is not imported.
    pub fn less_than(&self, name: &str, version: &str) -> Option<bool> {
        self.version(name)
            .map(|current| compare_versions(current, version).is_lt())
    }
}
