//! Duplicate tracking for imported files and region labels.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// Identity domain tracked by a [`DuplicateValidator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    /// Imported document paths, compared after path normalization.
    File,
    /// Region labels, compared verbatim.
    Label,
}

/// Set-membership tracker for two independent identity domains.
///
/// One instance lives alongside each owner (a region store, an import list);
/// there is no shared global state.
#[derive(Debug, Clone, Default)]
pub struct DuplicateValidator {
    files: HashSet<String>,
    labels: HashSet<String>,
}

impl DuplicateValidator {
    /// Create an empty validator.
    pub fn new() -> Self {
        Self::default()
    }

    fn set(&self, domain: Domain) -> &HashSet<String> {
        match domain {
            Domain::File => &self.files,
            Domain::Label => &self.labels,
        }
    }

    fn set_mut(&mut self, domain: Domain) -> &mut HashSet<String> {
        match domain {
            Domain::File => &mut self.files,
            Domain::Label => &mut self.labels,
        }
    }

    fn canonical(domain: Domain, key: &str) -> String {
        match domain {
            Domain::File => normalize_path(Path::new(key)).to_string_lossy().into_owned(),
            Domain::Label => key.to_string(),
        }
    }

    /// Check whether `key` is already tracked in `domain`.
    pub fn is_duplicate(&self, domain: Domain, key: &str) -> bool {
        self.set(domain).contains(&Self::canonical(domain, key))
    }

    /// Track `key`. Returns false if it was already present.
    pub fn add(&mut self, domain: Domain, key: &str) -> bool {
        let key = Self::canonical(domain, key);
        self.set_mut(domain).insert(key)
    }

    /// Stop tracking `key`. Returns false if it was not present.
    pub fn remove(&mut self, domain: Domain, key: &str) -> bool {
        let key = Self::canonical(domain, key);
        self.set_mut(domain).remove(&key)
    }

    /// Replace `old` with `new`.
    ///
    /// Fails without mutating when `new` differs from `old` and is already
    /// tracked. Renaming a key to itself always succeeds.
    pub fn rename(&mut self, domain: Domain, old: &str, new: &str) -> bool {
        let old = Self::canonical(domain, old);
        let new = Self::canonical(domain, new);
        let set = self.set_mut(domain);
        if new != old && set.contains(&new) {
            return false;
        }
        set.remove(&old);
        set.insert(new);
        true
    }

    /// Forget every key in `domain`.
    pub fn clear(&mut self, domain: Domain) {
        self.set_mut(domain).clear();
    }

    /// Number of keys tracked in `domain`.
    pub fn len(&self, domain: Domain) -> usize {
        self.set(domain).len()
    }

    /// Whether `domain` tracks no keys.
    pub fn is_empty(&self, domain: Domain) -> bool {
        self.set(domain).is_empty()
    }
}

/// Make `path` absolute and resolve `.` and `..` lexically.
///
/// Symlinks are not followed, so a path that does not exist yet still
/// normalizes.
pub fn normalize_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
