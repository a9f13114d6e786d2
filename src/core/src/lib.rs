/* src/core/src/lib.rs */

pub mod compose;
pub mod config;
pub mod locale;
pub mod page;

// Re-exports for ergonomic use
pub use compose::merge_path_parts;
pub use config::{Config, RawOptions, RouteOverride, find_byway_config, load_byway_config};
pub use locale::Locale;
pub use page::{
  ContextMap, LOCALE_KEY, NOT_FOUND_NAME, NOT_FOUND_PATH, NOT_FOUND_ROUTE_PATH, PageDescriptor,
  QueryBindings, RouteDescriptor, RouteMetadata,
};
