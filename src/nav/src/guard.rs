/* src/nav/src/guard.rs */

use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;

use byway_core::{ContextMap, LOCALE_KEY};

use crate::session::NavSession;

/// Navigation target as seen by guards: the requested path plus the resolved
/// route's metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLocation {
  pub path: String,
  pub meta: ContextMap,
}

impl RouteLocation {
  pub fn new(path: impl Into<String>) -> Self {
    Self { path: path.into(), meta: ContextMap::new() }
  }

  pub fn with_locale(path: impl Into<String>, code: &str) -> Self {
    let mut location = Self::new(path);
    location.meta.insert(LOCALE_KEY.to_string(), Value::String(code.to_string()));
    location
  }

  pub fn meta_locale(&self) -> Option<&str> {
    self.meta.get(LOCALE_KEY).and_then(Value::as_str)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NextAction {
  Continue,
  Redirect { path: String },
}

pub type GuardFn = Arc<dyn Fn(&RouteLocation, Option<&RouteLocation>) -> NextAction + Send + Sync>;
pub type AfterEachFn = Arc<dyn Fn(&RouteLocation, Option<&RouteLocation>) + Send + Sync>;
/// Resolves a path to its route metadata; owned by the router collaborator.
pub type ResolveFn = Arc<dyn Fn(&str) -> ContextMap + Send + Sync>;

/// Named guard registry in pipeline order: every `before_each` guard, then
/// every `before_resolve` guard; `after_each` callbacks run once the
/// navigation has fully resolved.
#[derive(Default)]
pub struct Guards {
  before_each: Vec<(String, GuardFn)>,
  before_resolve: Vec<(String, GuardFn)>,
  after_each: Vec<(String, AfterEachFn)>,
  resolver: Option<ResolveFn>,
}

impl Guards {
  pub fn new() -> Self {
    Self::default()
  }

  /// A redirect replaces the pending navigation with an unresolved path;
  /// the resolver supplies the new target's route metadata.
  pub fn set_resolver(&mut self, resolver: ResolveFn) {
    self.resolver = Some(resolver);
  }

  pub fn before_each(&mut self, name: impl Into<String>, guard: GuardFn) {
    self.before_each.push((name.into(), guard));
  }

  pub fn before_resolve(&mut self, name: impl Into<String>, guard: GuardFn) {
    self.before_resolve.push((name.into(), guard));
  }

  pub fn after_each(&mut self, name: impl Into<String>, callback: AfterEachFn) {
    self.after_each.push((name.into(), callback));
  }

  /// Resolve one navigation. A redirect replaces the pending navigation
  /// wholesale and restarts the guard chain, so no partially-applied
  /// redirect state is ever observable; `after_each` runs exactly once, for
  /// the location the navigation actually settled on. Translation
  /// idempotence settles the chain after one redirect, the budget only
  /// bounds misbehaving foreign guards.
  pub fn navigate(&self, to: RouteLocation, from: Option<&RouteLocation>) -> RouteLocation {
    const REDIRECT_BUDGET: usize = 8;

    let mut current = to;
    'attempt: for _ in 0..REDIRECT_BUDGET {
      for (_, guard) in self.before_each.iter().chain(self.before_resolve.iter()) {
        match guard(&current, from) {
          NextAction::Continue => {}
          NextAction::Redirect { path } => {
            let meta = self.resolver.as_ref().map_or_else(ContextMap::new, |resolve| resolve(&path));
            current = RouteLocation { path, meta };
            continue 'attempt;
          }
        }
      }
      break;
    }

    for (_, callback) in &self.after_each {
      callback(&current, from);
    }
    current
  }
}

/// Install the byway guards on a router's guard registry:
/// - `before_resolve` rewrites the pending path to carry the correct locale
///   prefix (interactive sessions with rewriting enabled only);
/// - `after_each` commits the locale transition from the resolved route's
///   metadata and refreshes the document language attribute. Committing
///   after resolution means a superseded navigation leaves no residual
///   locale mutation.
pub fn install_guards(session: Arc<Mutex<NavSession>>, guards: &mut Guards) {
  let rewrite = Arc::clone(&session);
  guards.before_resolve(
    "byway:rewrite",
    Arc::new(move |to, _from| {
      let session = rewrite.lock().unwrap_or_else(PoisonError::into_inner);
      if !session.is_interactive() || !session.config().enable_path_rewrite() {
        return NextAction::Continue;
      }
      let translated = session.translate(&to.path, to.meta_locale(), false);
      if translated == to.path {
        NextAction::Continue
      } else {
        NextAction::Redirect { path: translated }
      }
    }),
  );

  guards.after_each(
    "byway:locale",
    Arc::new(move |to, _from| {
      let mut session = session.lock().unwrap_or_else(PoisonError::into_inner);
      if let Some(locale) = to.meta_locale().map(ToOwned::to_owned) {
        if session.active_locale() != Some(locale.as_str()) {
          session.set_active_locale(&locale);
        }
      }
      session.update_lang_attr();
    }),
  );
}

#[cfg(test)]
mod tests {
  use super::*;
  use byway_core::{Config, RawOptions};
  use crate::session::LangSinkFn;

  fn shared_session(locales: &[&str]) -> Arc<Mutex<NavSession>> {
    Arc::new(Mutex::new(NavSession::new(Arc::new(
      Config::build(RawOptions {
        locales: locales.iter().map(|s| (*s).to_string()).collect(),
        ..Default::default()
      })
      .unwrap(),
    ))))
  }

  fn router(session: &Arc<Mutex<NavSession>>) -> Guards {
    let mut guards = Guards::new();
    install_guards(Arc::clone(session), &mut guards);
    guards
  }

  #[test]
  fn rewrites_unprefixed_navigation() {
    let session = shared_session(&["en", "fr"]);
    let guards = router(&session);

    let resolved = guards.navigate(RouteLocation::with_locale("/about", "fr"), None);
    assert_eq!(resolved.path, "/fr/about/");
  }

  #[test]
  fn prefixed_navigation_passes_untouched() {
    let session = shared_session(&["en", "fr"]);
    let guards = router(&session);

    let resolved = guards.navigate(RouteLocation::with_locale("/fr/about/", "fr"), None);
    assert_eq!(resolved.path, "/fr/about/");
  }

  #[test]
  fn commits_locale_at_resolution() {
    let session = shared_session(&["en", "fr"]);
    let guards = router(&session);

    guards.navigate(RouteLocation::with_locale("/fr/about/", "fr"), None);
    assert_eq!(session.lock().unwrap().active_locale(), Some("fr"));
  }

  #[test]
  fn superseded_navigation_leaves_no_residual_locale() {
    let session = shared_session(&["en", "fr"]);
    let mut guards = Guards::new();

    // A foreign guard that replaces any French navigation with an English
    // one, as an auth redirect would.
    guards.before_each(
      "auth",
      Arc::new(|to, _from| {
        if to.path.starts_with("/fr/") {
          NextAction::Redirect { path: "/en/login/".to_string() }
        } else {
          NextAction::Continue
        }
      }),
    );
    install_guards(Arc::clone(&session), &mut guards);

    let resolved = guards.navigate(RouteLocation::with_locale("/fr/about/", "fr"), None);
    assert_eq!(resolved.path, "/en/login/");
    // The abandoned attempt never resolved, so "fr" was never committed.
    assert_ne!(session.lock().unwrap().active_locale(), Some("fr"));
  }

  #[test]
  fn non_interactive_pass_skips_rewrite() {
    let session = shared_session(&["en", "fr"]);
    session.lock().unwrap().set_interactive(false);
    let guards = router(&session);

    let resolved = guards.navigate(RouteLocation::with_locale("/about", "fr"), None);
    assert_eq!(resolved.path, "/about");
  }

  #[test]
  fn rewrite_disabled_by_configuration() {
    let session = Arc::new(Mutex::new(NavSession::new(Arc::new(
      Config::build(RawOptions {
        locales: vec!["en".into(), "fr".into()],
        enable_path_rewrite: false,
        ..Default::default()
      })
      .unwrap(),
    ))));
    let guards = router(&session);

    let resolved = guards.navigate(RouteLocation::with_locale("/about", "fr"), None);
    assert_eq!(resolved.path, "/about");
    // locale still commits; only the URL rewrite is disabled
    assert_eq!(session.lock().unwrap().active_locale(), Some("fr"));
  }

  #[test]
  fn lang_sink_updated_after_each_navigation() {
    let session = shared_session(&["en", "fr"]);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink: LangSinkFn = {
      let seen = Arc::clone(&seen);
      Arc::new(move |lang: &str| seen.lock().unwrap().push(lang.to_string()))
    };
    session.lock().unwrap().set_lang_sink(sink);
    let guards = router(&session);

    guards.navigate(RouteLocation::new("/about"), None);
    guards.navigate(RouteLocation::with_locale("/fr/about/", "fr"), None);

    // first navigation resolves with the default, the second commits fr
    assert_eq!(*seen.lock().unwrap(), vec!["en".to_string(), "fr".to_string()]);
  }

  #[test]
  fn rewritten_navigation_commits_locale_via_resolver() {
    let session = shared_session(&["en", "fr"]);
    let mut guards = Guards::new();
    guards.set_resolver(Arc::new(|path: &str| {
      let mut meta = ContextMap::new();
      let locale = if path.starts_with("/fr/") { "fr" } else { "en" };
      meta.insert(LOCALE_KEY.to_string(), Value::String(locale.to_string()));
      meta
    }));
    install_guards(Arc::clone(&session), &mut guards);

    let resolved = guards.navigate(RouteLocation::with_locale("/about", "fr"), None);
    assert_eq!(resolved.path, "/fr/about/");
    assert_eq!(resolved.meta_locale(), Some("fr"));
    assert_eq!(session.lock().unwrap().active_locale(), Some("fr"));
  }

  #[test]
  fn redirect_settles_after_one_pass() {
    let session = shared_session(&["en", "fr"]);
    let mut guards = Guards::new();

    let attempts = Arc::new(Mutex::new(Vec::new()));
    let trace = Arc::clone(&attempts);
    guards.before_each(
      "trace",
      Arc::new(move |to, _from| {
        trace.lock().unwrap().push(to.path.clone());
        NextAction::Continue
      }),
    );
    install_guards(Arc::clone(&session), &mut guards);

    let resolved = guards.navigate(RouteLocation::with_locale("/team", "fr"), None);
    assert_eq!(resolved.path, "/fr/team/");
    // one redirect, then the chain settles: the trace sees the raw attempt
    // and the translated one, nothing further
    assert_eq!(*attempts.lock().unwrap(), vec!["/team".to_string(), "/fr/team/".to_string()]);
  }
}
