//! Selector resolution against the store.
//!
//! Matching runs in two phases: a cheap `starts_with` test on the selector's
//! static prefix bounds the scan to one ordered range of the mapping, and only
//! paths inside that range are checked against the full predicate. Selectors
//! without wildcards skip both and become a single key lookup.

use pathrepo_glob::{ROOT, Selector};
use pathrepo_types::Resource;

use crate::store::PathStore;

impl PathStore {
    /// Entries whose path starts with `prefix`, in path order.
    fn scan_prefix<'s, 'p>(
        &'s self,
        prefix: &'p str,
    ) -> impl Iterator<Item = (&'s str, &'s dyn Resource)> + use<'s, 'p> {
        self.range_from(prefix)
            .take_while(move |(path, _)| path.starts_with(prefix))
    }

    /// Resources matching `selector`, in path order.
    pub(crate) fn find(&self, selector: &Selector) -> Vec<(&str, &dyn Resource)> {
        if selector.is_exact() {
            return self.get_entry(selector.as_str()).into_iter().collect();
        }

        let mut scanned = 0usize;
        let found: Vec<_> = self
            .scan_prefix(selector.static_prefix())
            .inspect(|_| scanned += 1)
            .filter(|(path, _)| selector.matches(path))
            .collect();
        tracing::trace!(
            selector = selector.as_str(),
            prefix = selector.static_prefix(),
            scanned,
            matched = found.len(),
            "resolved selector"
        );
        found
    }

    /// Paths matching `selector`, in path order.
    pub(crate) fn matching_paths(&self, selector: &Selector) -> Vec<String> {
        self.find(selector)
            .into_iter()
            .map(|(path, _)| path.to_string())
            .collect()
    }

    /// True if any stored path matches `selector`.
    pub(crate) fn matches_any(&self, selector: &Selector) -> bool {
        if selector.is_exact() {
            return self.get(selector.as_str()).is_some();
        }
        self.scan_prefix(selector.static_prefix())
            .any(|(path, _)| selector.matches(path))
    }

    /// Immediate children of the directory at `path`, in path order.
    pub(crate) fn children(&self, path: &str) -> Vec<(&str, &dyn Resource)> {
        let prefix = child_prefix(path);
        self.scan_prefix(&prefix)
            .filter(|(child, _)| is_immediate(&child[prefix.len()..]))
            .collect()
    }

    /// Everything stored below `path`, in path order.
    pub(crate) fn descendants(&self, path: &str) -> Vec<(&str, &dyn Resource)> {
        let prefix = child_prefix(path);
        self.scan_prefix(&prefix)
            .filter(|(descendant, _)| descendant.len() > prefix.len())
            .collect()
    }

    pub(crate) fn has_children(&self, path: &str) -> bool {
        let prefix = child_prefix(path);
        self.scan_prefix(&prefix)
            .any(|(child, _)| child.len() > prefix.len())
    }
}

fn child_prefix(path: &str) -> String {
    if path == ROOT {
        ROOT.to_string()
    } else {
        format!("{path}/")
    }
}

/// True if the remainder after a directory prefix names a direct child.
fn is_immediate(rest: &str) -> bool {
    !rest.is_empty() && !rest.contains('/')
}
