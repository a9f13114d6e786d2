/* src/nav/src/session.rs */

use std::sync::{Arc, Mutex, PoisonError};

use byway_core::Config;

use crate::translate::translate_path;

/// Receives the document language whenever it may have changed, e.g. to set
/// the `lang` attribute on the html element.
pub type LangSinkFn = Arc<dyn Fn(&str) + Send + Sync>;

/// Application-wide path translation, callable as `(path, locale?, force?)`.
pub type TranslateFn = Arc<dyn Fn(&str, Option<&str>, bool) -> String + Send + Sync>;

/// Per-application navigation state. The active locale is an explicit field
/// on this owned value, mutated only at guard resolution, so independent
/// application instances never cross-talk.
///
/// Locale states are Unset plus one per configured locale; there is no
/// transition back to Unset and no terminal state.
pub struct NavSession {
  config: Arc<Config>,
  active_locale: Option<String>,
  interactive: bool,
  lang_sink: Option<LangSinkFn>,
}

impl NavSession {
  pub fn new(config: Arc<Config>) -> Self {
    Self { config, active_locale: None, interactive: true, lang_sink: None }
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  /// Document-less render passes must not rewrite paths, or server and
  /// client output diverge.
  pub fn set_interactive(&mut self, interactive: bool) {
    self.interactive = interactive;
  }

  pub fn is_interactive(&self) -> bool {
    self.interactive
  }

  pub fn active_locale(&self) -> Option<&str> {
    self.active_locale.as_deref()
  }

  /// Assign the active locale. Codes outside the configured set are ignored;
  /// there is no way back to the unset state.
  pub fn set_active_locale(&mut self, code: &str) {
    if self.config.locales().iter().any(|configured| configured == code) {
      self.active_locale = Some(code.to_string());
    }
  }

  /// Language for the document attribute: the active locale, else the
  /// configured default.
  pub fn document_lang(&self) -> Option<&str> {
    self.active_locale.as_deref().or_else(|| self.config.default_locale())
  }

  pub fn set_lang_sink(&mut self, sink: LangSinkFn) {
    self.lang_sink = Some(sink);
  }

  pub(crate) fn update_lang_attr(&self) {
    if let (Some(sink), Some(lang)) = (&self.lang_sink, self.document_lang()) {
      sink(lang);
    }
  }

  pub fn translate(&self, path: &str, target_locale: Option<&str>, force_change: bool) -> String {
    translate_path(&self.config, self.active_locale(), path, target_locale, force_change)
  }
}

/// Path-translation helper exposed to collaborators (template helpers,
/// language switchers); reads the active locale at call time.
pub fn translate_fn(session: Arc<Mutex<NavSession>>) -> TranslateFn {
  Arc::new(move |path, locale, force| {
    session.lock().unwrap_or_else(PoisonError::into_inner).translate(path, locale, force)
  })
}
