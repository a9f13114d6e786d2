/* src/build/src/hooks.rs */

use std::sync::Arc;

use byway_core::{ContextMap, PageDescriptor, RouteDescriptor};

pub type TransformFn<T> = Arc<dyn Fn(T) -> T + Send + Sync>;

/// Ordered registry of named transforms for one pipeline event. Taps run in
/// registration order; each receives the previous tap's output and must pass
/// the (possibly mutated) value through.
pub struct Hook<T> {
  taps: Vec<(String, TransformFn<T>)>,
}

impl<T> Hook<T> {
  pub fn new() -> Self {
    Self { taps: Vec::new() }
  }

  pub fn tap(&mut self, name: impl Into<String>, transform: TransformFn<T>) {
    self.taps.push((name.into(), transform));
  }

  pub fn call(&self, value: T) -> T {
    self.taps.iter().fold(value, |value, (_, transform)| transform(value))
  }

  pub fn tap_names(&self) -> impl Iterator<Item = &str> {
    self.taps.iter().map(|(name, _)| name.as_str())
  }
}

impl<T> Default for Hook<T> {
  fn default() -> Self {
    Self::new()
  }
}

/// The three hook points the pipeline dispatches during one build pass.
/// Dispatch order within a pass is create_page, create_route, page_context;
/// later hooks rely on the stamping done by earlier ones.
#[derive(Default)]
pub struct PipelineHooks {
  pub create_page: Hook<PageDescriptor>,
  pub create_route: Hook<RouteDescriptor>,
  pub page_context: Hook<ContextMap>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn taps_run_in_registration_order() {
    let mut hook: Hook<ContextMap> = Hook::new();
    hook.tap(
      "first",
      Arc::new(|mut ctx| {
        ctx.insert("order".to_string(), serde_json::json!(["first"]));
        ctx
      }),
    );
    hook.tap(
      "second",
      Arc::new(|mut ctx| {
        if let Some(list) = ctx.get_mut("order").and_then(|v| v.as_array_mut()) {
          list.push(serde_json::json!("second"));
        }
        ctx
      }),
    );
    let out = hook.call(ContextMap::new());
    assert_eq!(out["order"], serde_json::json!(["first", "second"]));
  }

  #[test]
  fn empty_hook_passes_value_through() {
    let hook: Hook<ContextMap> = Hook::new();
    let mut ctx = ContextMap::new();
    ctx.insert("kept".to_string(), serde_json::json!(1));
    assert_eq!(hook.call(ctx.clone()), ctx);
  }

  #[test]
  fn tap_names_preserved() {
    let mut hook: Hook<ContextMap> = Hook::new();
    hook.tap("byway", Arc::new(|ctx| ctx));
    hook.tap("theme", Arc::new(|ctx| ctx));
    let names: Vec<&str> = hook.tap_names().collect();
    assert_eq!(names, vec!["byway", "theme"]);
  }
}
