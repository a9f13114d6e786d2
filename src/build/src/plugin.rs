/* src/build/src/plugin.rs */

use std::sync::{Arc, Mutex, PoisonError};

use byway_core::Config;

use crate::cloner::{ManagedPages, RouteCloner};
use crate::hooks::PipelineHooks;
use crate::namer::RouteNamer;

/// Tap name the build-side hooks register under.
pub const TAP_NAME: &str = "byway";

/// Build-side entry point: installs the cloner and namer on the pipeline's
/// hooks once at initialization and exposes the bulk-creation flush.
pub struct BywayPlugin {
  cloner: Arc<Mutex<RouteCloner>>,
}

impl BywayPlugin {
  pub fn install(config: Arc<Config>, hooks: &mut PipelineHooks) -> Self {
    let cloner = Arc::new(Mutex::new(RouteCloner::new(Arc::clone(&config))));
    let namer = RouteNamer::new(config);

    let page_tap = Arc::clone(&cloner);
    hooks.create_page.tap(
      TAP_NAME,
      Arc::new(move |page| {
        page_tap.lock().unwrap_or_else(PoisonError::into_inner).on_create_page(page)
      }),
    );

    hooks.create_route.tap(TAP_NAME, Arc::new(move |route| namer.on_create_route(route)));

    let context_tap = Arc::clone(&cloner);
    hooks.page_context.tap(
      TAP_NAME,
      Arc::new(move |context| {
        context_tap.lock().unwrap_or_else(PoisonError::into_inner).on_page_context(context)
      }),
    );

    Self { cloner }
  }

  /// The pipeline's bulk-creation callback: drain everything queued during
  /// discovery through the supplied managed-pages surface, exactly once.
  pub fn create_managed_pages(&self, api: &mut ManagedPages<'_>) {
    self.cloner.lock().unwrap_or_else(PoisonError::into_inner).flush(api);
  }
}
