/* src/nav/src/translate.rs */

use byway_core::{Config, merge_path_parts};

/// Compute the correctly prefixed path for a navigation target. Pure given
/// (path, active locale, configuration) and never fails: with no resolvable
/// target locale the path passes through untouched, since translation may
/// run before any locale has been chosen.
///
/// A path that already carries a locale prefix is returned as-is unless
/// `force_change` is set, in which case the existing prefix is stripped and
/// the target locale's segment applied — so forced translation relocates a
/// path between locales without ever stacking prefixes.
pub fn translate_path(
  config: &Config,
  active_locale: Option<&str>,
  path: &str,
  target_locale: Option<&str>,
  force_change: bool,
) -> String {
  let Some(target) = target_locale.or(active_locale) else {
    return path.to_string();
  };

  let default_unprefixed = config.is_default(target) && !config.rewrite_default_language();
  if default_unprefixed && !force_change {
    return path.to_string();
  }

  let normalized = if path.starts_with('/') { path.to_string() } else { format!("/{path}") };

  let mut remainder = normalized.clone();
  if config.detect_locale(&normalized).is_some() {
    if !force_change {
      return normalized;
    }
    let rest: Vec<&str> = normalized.split('/').filter(|segment| !segment.is_empty()).collect();
    remainder =
      if rest.len() <= 1 { "/".to_string() } else { format!("/{}", rest[1..].join("/")) };
  }

  if default_unprefixed {
    return remainder;
  }
  merge_path_parts(&[config.segment_for(target), &remainder])
}
