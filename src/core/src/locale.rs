/* src/core/src/locale.rs */

use crate::config::Config;

/// A configured locale viewed through the URL: its code, the segment it
/// occupies in paths (alias if configured, else the code) and whether it is
/// the configured default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale<'a> {
  pub code: &'a str,
  pub segment: &'a str,
  pub is_default: bool,
}

impl Config {
  /// URL segment for a locale code: its alias if configured, else the code.
  pub fn segment_for<'a>(&'a self, code: &'a str) -> &'a str {
    self.path_aliases().get(code).map_or(code, String::as_str)
  }

  /// Detect an existing locale prefix in a path: the first non-empty segment
  /// is compared against every configured locale's segment in configuration
  /// order. Exact match only, no prefix matching.
  pub fn detect_locale(&self, path: &str) -> Option<&str> {
    let first = path.split('/').find(|segment| !segment.is_empty())?;
    self
      .locales()
      .iter()
      .find(|code| self.segment_for(code) == first)
      .map(String::as_str)
  }

  /// Configured locales in configuration order, with segments resolved.
  pub fn locale_views(&self) -> impl Iterator<Item = Locale<'_>> {
    self.locales().iter().map(|code| Locale {
      code,
      segment: self.segment_for(code),
      is_default: self.is_default(code),
    })
  }
}
