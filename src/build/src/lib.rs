/* src/build/src/lib.rs */

pub mod cloner;
pub mod hooks;
pub mod namer;
pub mod plugin;
pub mod registry;
pub mod ui;

// Re-exports for ergonomic use
pub use cloner::{ManagedPages, RouteCloner};
pub use hooks::{Hook, PipelineHooks, TransformFn};
pub use namer::RouteNamer;
pub use plugin::{BywayPlugin, TAP_NAME};
pub use registry::{MemoryRegistry, PageRegistry};
