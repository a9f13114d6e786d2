/* src/core/src/page.rs */

use std::collections::BTreeMap;

use serde_json::Value;

/// Context/meta key every emitted page and route must end up carrying.
pub const LOCALE_KEY: &str = "locale";

/// Reserved route name of the not-found page.
pub const NOT_FOUND_NAME: &str = "404";
/// Page path of the not-found page as the pipeline discovers it.
pub const NOT_FOUND_PATH: &str = "/404";
/// Canonical (composed) route path of the not-found page.
pub const NOT_FOUND_ROUTE_PATH: &str = "/404/";

pub type ContextMap = BTreeMap<String, Value>;

/// Locale code -> (parameter name -> resolved value). Dynamic path tokens
/// are substituted per locale from these bindings; a locale with no value
/// for a token simply gets no derived page.
pub type QueryBindings = BTreeMap<String, BTreeMap<String, String>>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteMetadata {
  pub name: Option<String>,
  /// Must eventually contain `locale`; the build hooks stamp it.
  pub meta: ContextMap,
}

/// Build-time page descriptor as observed from the generation pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PageDescriptor {
  pub id: String,
  /// Path pattern; segments starting with `:` are dynamic parameter tokens.
  pub path: String,
  pub component: String,
  pub context: ContextMap,
  pub route: RouteMetadata,
  pub query_variables: QueryBindings,
  /// Created through the managed-pages API rather than discovery.
  pub is_managed: bool,
}

impl PageDescriptor {
  pub fn new(
    id: impl Into<String>,
    path: impl Into<String>,
    component: impl Into<String>,
  ) -> Self {
    Self {
      id: id.into(),
      path: path.into(),
      component: component.into(),
      context: ContextMap::new(),
      route: RouteMetadata::default(),
      query_variables: QueryBindings::new(),
      is_managed: false,
    }
  }

  /// A page is dynamic when any path segment is a parameter token.
  pub fn is_dynamic(&self) -> bool {
    self.path.split('/').any(|segment| segment.starts_with(':'))
  }

  pub fn context_locale(&self) -> Option<&str> {
    self.context.get(LOCALE_KEY).and_then(Value::as_str)
  }

  pub fn set_context_locale(&mut self, code: &str) {
    self.context.insert(LOCALE_KEY.to_string(), Value::String(code.to_string()));
  }
}

/// Resolved, navigable form of a page: unique name plus route metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDescriptor {
  pub name: Option<String>,
  pub path: String,
  pub component: String,
  pub meta: ContextMap,
}

impl RouteDescriptor {
  pub fn meta_locale(&self) -> Option<&str> {
    self.meta.get(LOCALE_KEY).and_then(Value::as_str)
  }

  pub fn set_meta_locale(&mut self, code: &str) {
    self.meta.insert(LOCALE_KEY.to_string(), Value::String(code.to_string()));
  }
}
