//! Compiled path selectors.
//!
//! A selector is an absolute path pattern. Segments are matched one by one
//! with the rules of [`crate::glob`], so `*` never crosses a `/`. A segment
//! made only of `**` matches zero or more whole segments:
//!
//! - `/app/*.twig` matches `/app/index.twig`, not `/app/views/index.twig`
//! - `/app/**/*.twig` matches both
//! - `/app/**` matches `/app` and everything under it
//!
//! Brace groups are expanded before the split, so `/{css,js/vendor}/*`
//! is two alternatives with different depths. One `matches` call draws every
//! step, across all alternatives and globstar retries, from a single
//! `match_work_limit` budget.

use crate::glob::{Budget, GlobOptions, expand_braces, match_segment};
use crate::path::{PathError, canonicalize, segments};

/// One segment of a compiled selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Matched by string equality.
    Literal(String),
    /// Matched with glob syntax.
    Pattern(String),
    /// Matches zero or more segments.
    Globstar,
}

/// A canonical selector plus its static prefix and compiled predicate.
///
/// # Examples
/// ```
/// use pathrepo_glob::{GlobOptions, Selector};
///
/// let sel = Selector::new("/app/views/*.twig", GlobOptions::default()).unwrap();
/// assert_eq!(sel.static_prefix(), "/app/views/");
/// assert!(sel.matches("/app/views/index.twig"));
/// assert!(!sel.matches("/app/views/admin/index.twig"));
/// ```
#[derive(Debug, Clone)]
pub struct Selector {
    pattern: String,
    prefix_len: usize,
    alternatives: Vec<Vec<PathSegment>>,
    options: GlobOptions,
}

impl Selector {
    /// Canonicalize and compile a selector.
    ///
    /// Fails with [`PathError::TooManyAlternatives`] when brace expansion
    /// would produce more than `options.max_alternatives` patterns.
    pub fn new(pattern: &str, options: GlobOptions) -> Result<Self, PathError> {
        let pattern = canonicalize(pattern)?;
        let prefix_len = options.static_prefix(&pattern).len();

        let expanded = if options.brace_expansion && prefix_len < pattern.len() {
            expand_braces(&pattern, options.max_alternatives).ok_or_else(|| {
                PathError::TooManyAlternatives {
                    pattern: pattern.clone(),
                    limit: options.max_alternatives,
                }
            })?
        } else {
            vec![pattern.clone()]
        };
        let alternatives = expanded
            .iter()
            .map(|alt| Self::compile(alt, &options))
            .collect();

        Ok(Self {
            pattern,
            prefix_len,
            alternatives,
            options,
        })
    }

    fn compile(pattern: &str, options: &GlobOptions) -> Vec<PathSegment> {
        let mut compiled = Vec::new();
        for part in segments(pattern) {
            if part == "**" {
                // Consecutive globstars collapse to one
                if compiled.last() != Some(&PathSegment::Globstar) {
                    compiled.push(PathSegment::Globstar);
                }
            } else if part.contains('\\') || options.is_selector(part) {
                compiled.push(PathSegment::Pattern(part.to_string()));
            } else {
                compiled.push(PathSegment::Literal(part.to_string()));
            }
        }
        compiled
    }

    /// The canonical selector text.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Literal text every matching path starts with.
    pub fn static_prefix(&self) -> &str {
        &self.pattern[..self.prefix_len]
    }

    /// True if the selector has no wildcard and names exactly one path.
    pub fn is_exact(&self) -> bool {
        !self.options.is_selector(&self.pattern)
    }

    /// True if `self` is the root path.
    pub fn is_root(&self) -> bool {
        self.pattern == crate::path::ROOT
    }

    /// Compiled segments, one list per brace alternative.
    pub fn alternatives(&self) -> &[Vec<PathSegment>] {
        &self.alternatives
    }

    /// Anchored full-path match against a canonical path.
    ///
    /// An exhausted work budget counts as a non-match.
    pub fn matches(&self, path: &str) -> bool {
        if self.is_exact() {
            return path == self.pattern;
        }
        let components: Vec<&str> = segments(path).collect();
        let mut budget = Budget::new(self.options.match_work_limit);
        self.alternatives
            .iter()
            .any(|segs| match_segments(segs, &components, &mut budget))
    }
}

/// Segment matching with backtracking for globstar.
///
/// Pattern segments are already brace-expanded, so they are matched without
/// another expansion pass.
fn match_segments(segs: &[PathSegment], components: &[&str], budget: &mut Budget) -> bool {
    if !budget.spend() {
        return false;
    }
    let Some((first, rest)) = segs.split_first() else {
        return components.is_empty();
    };

    match first {
        PathSegment::Globstar => (0..=components.len())
            .any(|skip| match_segments(rest, &components[skip..], budget)),
        PathSegment::Literal(lit) => match components.split_first() {
            Some((head, tail)) if *head == lit.as_str() => match_segments(rest, tail, budget),
            _ => false,
        },
        PathSegment::Pattern(pat) => match components.split_first() {
            Some((head, tail)) if match_segment(pat, head, budget) => {
                match_segments(rest, tail, budget)
            }
            _ => false,
        },
    }
}
