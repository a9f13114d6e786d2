/* src/nav/src/lib.rs */

pub mod guard;
pub mod session;
pub mod translate;

// Re-exports for ergonomic use
pub use guard::{
  AfterEachFn, GuardFn, Guards, NextAction, ResolveFn, RouteLocation, install_guards,
};
pub use session::{LangSinkFn, NavSession, TranslateFn, translate_fn};
pub use translate::translate_path;
