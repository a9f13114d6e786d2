/* src/core/src/config.rs */

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::Value;

use crate::page::ContextMap;

/// Raw plugin options as authored in `byway.toml` or handed over by the
/// embedding pipeline. Serde-friendly and mutable; routing components never
/// touch it directly — build a [`Config`] first so every default is computed
/// exactly once.
#[derive(Debug, Clone, Deserialize)]
pub struct RawOptions {
  #[serde(default)]
  pub locales: Vec<String>,
  #[serde(default)]
  pub default_locale: Option<String>,
  /// Locale code -> URL segment. Unlisted locales use their code.
  #[serde(default)]
  pub path_aliases: BTreeMap<String, String>,
  /// Client-side: rewrite navigation targets to carry a locale prefix.
  #[serde(default = "default_enabled")]
  pub enable_path_rewrite: bool,
  /// Build-side: derive one localized page per configured locale.
  #[serde(default = "default_enabled")]
  pub enable_path_generation: bool,
  /// When false, default-locale URLs carry no prefix.
  #[serde(default = "default_enabled")]
  pub rewrite_default_language: bool,
  /// Locale code -> hand-authored routes that bypass cloning.
  #[serde(default)]
  pub routes: BTreeMap<String, Vec<RouteOverride>>,
  /// Accepted for compatibility with the original option set; message lookup
  /// lives outside this crate.
  #[serde(default)]
  pub messages: BTreeMap<String, Value>,
  #[serde(default)]
  pub fallback_locale: Option<String>,
}

impl Default for RawOptions {
  fn default() -> Self {
    Self {
      locales: Vec::new(),
      default_locale: None,
      path_aliases: BTreeMap::new(),
      enable_path_rewrite: true,
      enable_path_generation: true,
      rewrite_default_language: true,
      routes: BTreeMap::new(),
      messages: BTreeMap::new(),
      fallback_locale: None,
    }
  }
}

fn default_enabled() -> bool {
  true
}

/// Hand-authored localized route, created as-is at the managed-pages flush
/// with its locale stamped into context and route meta.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteOverride {
  pub path: String,
  pub component: String,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub context: ContextMap,
  #[serde(default)]
  pub meta: ContextMap,
}

/// Immutable configuration built once before any routing component runs.
/// Locale order is configuration order and drives detection precedence.
#[derive(Debug, Clone)]
pub struct Config {
  locales: Vec<String>,
  default_locale: Option<String>,
  path_aliases: BTreeMap<String, String>,
  enable_path_rewrite: bool,
  enable_path_generation: bool,
  rewrite_default_language: bool,
  routes: BTreeMap<String, Vec<RouteOverride>>,
}

impl Config {
  /// Freeze raw options into a configuration value. The default locale is
  /// `default_locale` when given, else the first configured locale; with no
  /// locales at all it stays unset and translation degrades to a no-op.
  pub fn build(options: RawOptions) -> Result<Self> {
    if let Some(ref default) = options.default_locale {
      if !options.locales.contains(default) {
        bail!("default_locale \"{default}\" is not in locales {:?}", options.locales);
      }
    }
    let default_locale =
      options.default_locale.or_else(|| options.locales.first().cloned());
    Ok(Self {
      locales: options.locales,
      default_locale,
      path_aliases: options.path_aliases,
      enable_path_rewrite: options.enable_path_rewrite,
      enable_path_generation: options.enable_path_generation,
      rewrite_default_language: options.rewrite_default_language,
      routes: options.routes,
    })
  }

  pub fn locales(&self) -> &[String] {
    &self.locales
  }

  pub fn default_locale(&self) -> Option<&str> {
    self.default_locale.as_deref()
  }

  pub fn is_default(&self, code: &str) -> bool {
    self.default_locale.as_deref() == Some(code)
  }

  pub(crate) fn path_aliases(&self) -> &BTreeMap<String, String> {
    &self.path_aliases
  }

  pub fn enable_path_rewrite(&self) -> bool {
    self.enable_path_rewrite
  }

  pub fn enable_path_generation(&self) -> bool {
    self.enable_path_generation
  }

  pub fn rewrite_default_language(&self) -> bool {
    self.rewrite_default_language
  }

  pub fn route_overrides(&self) -> &BTreeMap<String, Vec<RouteOverride>> {
    &self.routes
  }
}

/// Walk upward from `start` to find `byway.toml`, like Cargo.toml discovery
pub fn find_byway_config(start: &Path) -> Result<PathBuf> {
  let mut dir =
    start.canonicalize().with_context(|| format!("failed to canonicalize {}", start.display()))?;
  loop {
    let candidate = dir.join("byway.toml");
    if candidate.is_file() {
      return Ok(candidate);
    }
    if !dir.pop() {
      bail!("byway.toml not found (searched upward from {})", start.display());
    }
  }
}

pub fn load_byway_config(path: &Path) -> Result<Config> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let options: RawOptions =
    toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
  Config::build(options)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults() {
    let options = RawOptions::default();
    assert!(options.locales.is_empty());
    assert!(options.enable_path_rewrite);
    assert!(options.enable_path_generation);
    assert!(options.rewrite_default_language);
  }

  #[test]
  fn parse_minimal_options() {
    let toml_str = r#"
locales = ["en", "fr"]
"#;
    let options: RawOptions = toml::from_str(toml_str).unwrap();
    assert_eq!(options.locales, vec!["en", "fr"]);
    assert!(options.default_locale.is_none());
    assert!(options.path_aliases.is_empty());
  }

  #[test]
  fn parse_full_options() {
    let toml_str = r#"
locales = ["en", "de"]
default_locale = "en"
enable_path_rewrite = false
rewrite_default_language = false

[path_aliases]
de = "de-DE"

[[routes.de]]
path = "/de-DE/impressum/"
component = "src/pages/Imprint.vue"
name = "imprint"
"#;
    let options: RawOptions = toml::from_str(toml_str).unwrap();
    assert_eq!(options.default_locale.as_deref(), Some("en"));
    assert_eq!(options.path_aliases["de"], "de-DE");
    assert!(!options.enable_path_rewrite);
    assert!(!options.rewrite_default_language);
    assert_eq!(options.routes["de"][0].name.as_deref(), Some("imprint"));
  }

  #[test]
  fn build_defaults_to_first_locale() {
    let options = RawOptions { locales: vec!["en".into(), "fr".into()], ..Default::default() };
    let config = Config::build(options).unwrap();
    assert_eq!(config.default_locale(), Some("en"));
    assert!(config.is_default("en"));
    assert!(!config.is_default("fr"));
  }

  #[test]
  fn build_honors_explicit_default() {
    let options = RawOptions {
      locales: vec!["en".into(), "fr".into()],
      default_locale: Some("fr".into()),
      ..Default::default()
    };
    let config = Config::build(options).unwrap();
    assert_eq!(config.default_locale(), Some("fr"));
  }

  #[test]
  fn build_empty_locales_leaves_default_unset() {
    let config = Config::build(RawOptions::default()).unwrap();
    assert!(config.default_locale().is_none());
    assert!(config.locales().is_empty());
  }

  #[test]
  fn build_rejects_unknown_default() {
    let options = RawOptions {
      locales: vec!["en".into()],
      default_locale: Some("ja".into()),
      ..Default::default()
    };
    let err = Config::build(options).unwrap_err();
    assert!(err.to_string().contains("\"ja\""));
    assert!(err.to_string().contains("not in"));
  }

  #[test]
  fn load_from_file() {
    use std::io::Write;

    let tmp = std::env::temp_dir().join("byway-test-load-config");
    let _ = std::fs::remove_dir_all(&tmp);
    std::fs::create_dir_all(&tmp).unwrap();

    let mut f = std::fs::File::create(tmp.join("byway.toml")).unwrap();
    writeln!(
      f,
      r#"locales = ["en", "de"]

[path_aliases]
de = "de-DE"
"#
    )
    .unwrap();

    let found = find_byway_config(&tmp).unwrap();
    let config = load_byway_config(&found).unwrap();
    assert_eq!(config.default_locale(), Some("en"));
    assert_eq!(config.segment_for("de"), "de-DE");

    let _ = std::fs::remove_dir_all(&tmp);
  }

  #[test]
  fn find_config_walks_upward() {
    use std::io::Write;

    let tmp = std::env::temp_dir().join("byway-test-find-config");
    let _ = std::fs::remove_dir_all(&tmp);
    std::fs::create_dir_all(tmp.join("nested/deeper")).unwrap();

    let mut f = std::fs::File::create(tmp.join("byway.toml")).unwrap();
    writeln!(f, r#"locales = ["en"]"#).unwrap();

    let found = find_byway_config(&tmp.join("nested/deeper")).unwrap();
    assert!(found.ends_with("byway.toml"));

    let _ = std::fs::remove_dir_all(&tmp);
  }
}
