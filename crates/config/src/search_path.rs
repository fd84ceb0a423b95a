//! Ordered search path list with write-time normalization.
//!
//! Responsibilities:
//! - Keep directories in priority order for file resolution.
//! - Apply the supplied normalization transform to every path as it is
//!   written, so reads always observe normalized values.
//!
//! Does NOT handle:
//! - Choosing the transform (see `bootstrap::Bootstrap`, which supplies
//!   home expansion + root-relative resolution).
//! - Filesystem access; normalization here is purely lexical.
//!
//! Invariants:
//! - Every stored element has passed through the transform exactly once.
//! - Reads never re-apply the transform.
//! - `contains` transforms the probe, so raw and pre-normalized probes are
//!   equivalent.

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Normalization applied to every path written into a [`SearchPathList`].
pub type PathTransform = Arc<dyn Fn(&Path) -> PathBuf + Send + Sync>;

/// Ordered, mutable sequence of directories consulted during file
/// resolution, highest priority first.
#[derive(Clone)]
pub struct SearchPathList {
    entries: Vec<PathBuf>,
    transform: PathTransform,
}

impl SearchPathList {
    /// Create an empty list whose writes pass through `transform`.
    pub fn new(transform: PathTransform) -> Self {
        Self { entries: Vec::new(), transform }
    }

    /// Create an empty list that stores paths exactly as given.
    pub fn untransformed() -> Self {
        Self::new(Arc::new(Path::to_path_buf))
    }

    /// Append a directory at the lowest priority position.
    pub fn append(&mut self, path: impl AsRef<Path>) {
        let normalized = (self.transform)(path.as_ref());
        self.entries.push(normalized);
    }

    /// Insert a directory at the highest priority position.
    pub fn prepend(&mut self, path: impl AsRef<Path>) {
        self.insert(0, path);
    }

    /// Insert a directory at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`, like `Vec::insert`.
    pub fn insert(&mut self, index: usize, path: impl AsRef<Path>) {
        let normalized = (self.transform)(path.as_ref());
        self.entries.insert(index, normalized);
    }

    /// Replace the directory at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`, like slice indexing.
    pub fn set(&mut self, index: usize, path: impl AsRef<Path>) {
        let normalized = (self.transform)(path.as_ref());
        self.entries[index] = normalized;
    }

    /// Append every directory from `paths`, in order.
    pub fn extend<I, P>(&mut self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for path in paths {
            self.append(path);
        }
    }

    /// Replace the entire list with `paths`, in order.
    pub fn replace<I, P>(&mut self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.entries.clear();
        self.extend(paths);
    }

    /// Remove and return the directory at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`, like `Vec::remove`.
    pub fn remove(&mut self, index: usize) -> PathBuf {
        self.entries.remove(index)
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.entries.get(index).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the list contains `probe`, compared after normalization.
    pub fn contains(&self, probe: impl AsRef<Path>) -> bool {
        let normalized = (self.transform)(probe.as_ref());
        self.entries.contains(&normalized)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.entries
    }
}

impl std::fmt::Debug for SearchPathList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(&self.entries).finish()
    }
}

impl<'a> IntoIterator for &'a SearchPathList {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefixed() -> SearchPathList {
        SearchPathList::new(Arc::new(|path: &Path| Path::new("/base").join(path)))
    }

    #[test]
    fn test_writes_apply_transform() {
        let mut paths = prefixed();
        paths.append("a");
        paths.prepend("b");
        paths.insert(1, "c");
        paths.extend(["d", "e"]);

        let got: Vec<_> = paths.iter().map(|p| p.to_string_lossy().into_owned()).collect();
        assert_eq!(got, ["/base/b", "/base/c", "/base/a", "/base/d", "/base/e"]);
    }

    #[test]
    fn test_set_applies_transform() {
        let mut paths = prefixed();
        paths.append("a");
        paths.set(0, "z");
        assert_eq!(paths.get(0), Some(Path::new("/base/z")));
    }

    #[test]
    fn test_replace_applies_transform_to_every_element() {
        let mut paths = prefixed();
        paths.append("old");
        paths.replace(["x", "y"]);
        assert_eq!(paths.len(), 2);
        assert_eq!(paths.get(0), Some(Path::new("/base/x")));
        assert_eq!(paths.get(1), Some(Path::new("/base/y")));
    }

    #[test]
    fn test_contains_transforms_probe() {
        let mut paths = prefixed();
        paths.append("a");
        // Raw and pre-normalized probes are both accepted.
        assert!(paths.contains("a"));
        assert!(paths.contains("/base/a"));
        assert!(!paths.contains("b"));
    }

    #[test]
    fn test_remove_by_index() {
        let mut paths = prefixed();
        paths.extend(["a", "b"]);
        let removed = paths.remove(0);
        assert_eq!(removed, Path::new("/base/a"));
        assert_eq!(paths.len(), 1);
    }

    #[test]
    fn test_untransformed_stores_verbatim() {
        let mut paths = SearchPathList::untransformed();
        paths.append("relative/dir");
        assert_eq!(paths.get(0), Some(Path::new("relative/dir")));
    }
}
