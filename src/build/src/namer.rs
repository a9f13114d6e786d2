/* src/build/src/namer.rs */

use std::sync::Arc;

use byway_core::{Config, NOT_FOUND_NAME, NOT_FOUND_ROUTE_PATH, RouteDescriptor};

/// Route-creation hook: a route index cannot hold duplicate names, so cloned
/// not-found routes get a locale suffix; routes without locale metadata get
/// the default stamped.
pub struct RouteNamer {
  config: Arc<Config>,
}

impl RouteNamer {
  pub fn new(config: Arc<Config>) -> Self {
    Self { config }
  }

  pub fn on_create_route(&self, mut route: RouteDescriptor) -> RouteDescriptor {
    match route.meta_locale().map(ToOwned::to_owned) {
      Some(locale) => {
        if route.name.as_deref() == Some(NOT_FOUND_NAME) && route.path != NOT_FOUND_ROUTE_PATH {
          route.name = Some(format!("{NOT_FOUND_NAME}__{locale}"));
        }
      }
      None => {
        if let Some(default) = self.config.default_locale() {
          route.set_meta_locale(default);
        }
      }
    }
    route
  }
}
