/* src/build/src/registry.rs */

use byway_core::{PageDescriptor, RouteDescriptor, merge_path_parts};

/// Collaborator contract of the pipeline's page store. The pipeline owns the
/// pages; this crate only observes creations and schedules batch edits.
pub trait PageRegistry {
  fn find_page(&self, path: &str) -> Option<PageDescriptor>;
  fn create_page(&mut self, page: PageDescriptor);
  fn remove_page(&mut self, id: &str);

  /// Resolved route for a page. The default synthesis composes the route
  /// path from the page path; real pipelines resolve from their route index.
  fn get_route(&self, page: &PageDescriptor) -> RouteDescriptor {
    RouteDescriptor {
      name: page.route.name.clone(),
      path: merge_path_parts(&[&page.path]),
      component: page.component.clone(),
      meta: page.route.meta.clone(),
    }
  }
}

/// In-memory registry preserving creation order. Backs the tests and serves
/// as a reference for embedding pipelines.
#[derive(Default)]
pub struct MemoryRegistry {
  pages: Vec<PageDescriptor>,
}

impl MemoryRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn pages(&self) -> &[PageDescriptor] {
    &self.pages
  }

  pub fn page_by_path(&self, path: &str) -> Option<&PageDescriptor> {
    self.pages.iter().find(|page| page.path == path)
  }

  pub fn page_by_name(&self, name: &str) -> Option<&PageDescriptor> {
    self.pages.iter().find(|page| page.route.name.as_deref() == Some(name))
  }
}

impl PageRegistry for MemoryRegistry {
  fn find_page(&self, path: &str) -> Option<PageDescriptor> {
    self.page_by_path(path).cloned()
  }

  fn create_page(&mut self, page: PageDescriptor) {
    self.pages.push(page);
  }

  fn remove_page(&mut self, id: &str) {
    self.pages.retain(|page| page.id != id);
  }
}
