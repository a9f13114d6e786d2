/* src/core/src/compose.rs */

/// Canonicalize an ordered sequence of path parts into one absolute path.
///
/// Parts equal to `/` are dropped. Each remaining part loses at most one
/// leading and one trailing slash; parts that strip to nothing are dropped
/// too, so the result never contains doubled slashes. An empty sequence
/// yields `/`, everything else is joined with `/` and wrapped in exactly one
/// leading and one trailing slash.
///
/// Re-splitting the output and merging again yields the same path, which is
/// what lets build-time route generation and run-time path translation agree
/// on every emitted URL.
pub fn merge_path_parts(parts: &[&str]) -> String {
  let mut kept = Vec::new();
  for part in parts {
    if *part == "/" {
      continue;
    }
    let part = part.strip_suffix('/').unwrap_or(part);
    let part = part.strip_prefix('/').unwrap_or(part);
    if part.is_empty() {
      continue;
    }
    kept.push(part);
  }
  if kept.is_empty() {
    return "/".to_string();
  }
  format!("/{}/", kept.join("/"))
}
