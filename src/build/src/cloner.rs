/* src/build/src/cloner.rs */

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use regex::Regex;
use serde_json::Value;

use byway_core::{
  Config, ContextMap, LOCALE_KEY, NOT_FOUND_PATH, PageDescriptor, RouteDescriptor, RouteMetadata,
  merge_path_parts,
};

use crate::ui::{self, RESET, YELLOW};

/// Managed-pages surface handed to the flush. Page creation must flow back
/// through the pipeline's own hook dispatch, so the callbacks are supplied
/// by the caller instead of a registry handle.
pub struct ManagedPages<'a> {
  pub create_page: &'a mut dyn FnMut(PageDescriptor),
  pub remove_page: &'a mut dyn FnMut(&str),
  pub find_page: &'a dyn Fn(&str) -> Option<PageDescriptor>,
  pub get_route: &'a dyn Fn(&PageDescriptor) -> RouteDescriptor,
}

/// Build-time page cloning: observes each page creation once, queues one
/// localized clone per configured locale, and flushes the whole batch at the
/// pipeline's bulk-creation point. Creating pages mid-traversal would
/// corrupt the pipeline's own indexing, hence the queue.
pub struct RouteCloner {
  config: Arc<Config>,
  pages_to_generate: Vec<PageDescriptor>,
  pages_to_replace: BTreeMap<String, PageDescriptor>,
}

/// Parameter name of a `:token` (or `:token+` catch-all) path segment.
fn param_token(segment: &str) -> Option<&str> {
  static TOKEN: OnceLock<Regex> = OnceLock::new();
  let re = TOKEN.get_or_init(|| Regex::new(r"^:([A-Za-z0-9_]+)\+?$").expect("token pattern"));
  re.captures(segment).and_then(|caps| caps.get(1)).map(|m| m.as_str())
}

/// Substitute every `:token` segment from the given bindings. `None` when
/// any token has no value, so the caller can skip that locale.
fn substitute_params(path: &str, bindings: Option<&BTreeMap<String, String>>) -> Option<String> {
  if !path.split('/').any(|segment| segment.starts_with(':')) {
    return Some(path.to_string());
  }
  let mut segments = Vec::new();
  for segment in path.split('/') {
    match param_token(segment) {
      Some(name) => segments.push(bindings?.get(name)?.as_str()),
      None => segments.push(segment),
    }
  }
  Some(segments.join("/"))
}

impl RouteCloner {
  pub fn new(config: Arc<Config>) -> Self {
    Self { config, pages_to_generate: Vec::new(), pages_to_replace: BTreeMap::new() }
  }

  /// Page-creation hook. A page whose context already carries `locale` was
  /// derived by an earlier pass and re-entered through the pipeline's own
  /// creation path; it is returned untouched and enqueues nothing.
  pub fn on_create_page(&mut self, mut page: PageDescriptor) -> PageDescriptor {
    if page.context_locale().is_some() {
      return page;
    }
    let Some(default) = self.config.default_locale().map(ToOwned::to_owned) else {
      return page;
    };
    page.set_context_locale(&default);

    for locale in self.config.locale_views() {
      let bindings = page.query_variables.get(locale.code);
      let Some(resolved) = substitute_params(&page.path, bindings) else {
        ui::detail(&format!(
          "{YELLOW}warning{RESET}: page \"{}\" has no parameter values for locale \"{}\", skipping",
          page.path, locale.code
        ));
        continue;
      };

      let mut context = page.context.clone();
      context.insert(LOCALE_KEY.to_string(), Value::String(locale.code.to_string()));
      let mut meta = page.route.meta.clone();
      meta.insert(LOCALE_KEY.to_string(), Value::String(locale.code.to_string()));

      self.pages_to_generate.push(PageDescriptor {
        id: format!("{}__{}", page.id, locale.code),
        path: merge_path_parts(&[locale.segment, &resolved]),
        component: page.component.clone(),
        context,
        route: RouteMetadata {
          name: page.route.name.as_ref().map(|name| format!("{name}__{}", locale.code)),
          meta,
        },
        query_variables: page.query_variables.clone(),
        is_managed: true,
      });
    }

    // Static pages outside the managed set get removed and recreated with an
    // explicit default-locale context, so even unprefixed paths carry one.
    if page.path != NOT_FOUND_PATH && !page.is_dynamic() && !page.is_managed {
      let mut context = page.context.clone();
      context.insert(LOCALE_KEY.to_string(), Value::String(default.clone()));
      let mut meta = page.route.meta.clone();
      meta.insert(LOCALE_KEY.to_string(), Value::String(default.clone()));
      self.pages_to_replace.insert(
        page.id.clone(),
        PageDescriptor {
          id: page.id.clone(),
          path: page.path.clone(),
          component: page.component.clone(),
          context,
          route: RouteMetadata { name: page.route.name.clone(), meta },
          query_variables: page.query_variables.clone(),
          is_managed: true,
        },
      );
    }

    page
  }

  /// Page-context hook: stamp a missing `locale` with the default.
  pub fn on_page_context(&self, mut context: ContextMap) -> ContextMap {
    if context.get(LOCALE_KEY).and_then(Value::as_str).is_none() {
      if let Some(default) = self.config.default_locale() {
        context.insert(LOCALE_KEY.to_string(), Value::String(default.to_string()));
      }
    }
    context
  }

  /// Flush everything queued during discovery, exactly once, in discovery
  /// order: hand-authored per-locale routes first, then the derived clones,
  /// then replacements, then the not-found catch-all clones.
  pub fn flush(&mut self, api: &mut ManagedPages<'_>) {
    for locale in self.config.locale_views() {
      let Some(overrides) = self.config.route_overrides().get(locale.code) else {
        continue;
      };
      for route in overrides {
        let mut context = route.context.clone();
        context.insert(LOCALE_KEY.to_string(), Value::String(locale.code.to_string()));
        let mut meta = route.meta.clone();
        meta.insert(LOCALE_KEY.to_string(), Value::String(locale.code.to_string()));
        (api.create_page)(PageDescriptor {
          id: format!("byway:{}:{}", locale.code, route.path),
          path: route.path.clone(),
          component: route.component.clone(),
          context,
          route: RouteMetadata { name: route.name.clone(), meta },
          query_variables: byway_core::QueryBindings::new(),
          is_managed: true,
        });
      }
    }

    if !self.config.enable_path_generation() {
      self.pages_to_generate.clear();
      self.pages_to_replace.clear();
      return;
    }

    for page in self.pages_to_generate.drain(..) {
      (api.create_page)(page);
    }
    for (id, page) in std::mem::take(&mut self.pages_to_replace) {
      (api.remove_page)(&id);
      (api.create_page)(page);
    }

    // Locale-prefixed unknown paths must still resolve to the not-found
    // component, so it gets one catch-all clone per locale.
    if let Some(not_found) = (api.find_page)(NOT_FOUND_PATH) {
      let route = (api.get_route)(&not_found);
      for locale in self.config.locale_views() {
        let mut page = PageDescriptor::new(
          format!("{}__{}", not_found.id, locale.code),
          format!("/{}/:slug+", locale.segment),
          route.component.clone(),
        );
        page.set_context_locale(locale.code);
        page.route.meta.insert(LOCALE_KEY.to_string(), Value::String(locale.code.to_string()));
        page.is_managed = true;
        (api.create_page)(page);
      }
    }
  }
}
