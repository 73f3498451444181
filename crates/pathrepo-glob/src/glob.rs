//! Segment-level glob matching.
//!
//! Patterns handled here never see a `/`; `Selector` splits paths into
//! segments first and only hands single segments to [`glob_match_with`].
//!
//! - `*` matches zero or more characters
//! - `?` matches exactly one character
//! - `[abc]`, `[a-z]` match one character from the set or range
//! - `[!abc]` / `[^abc]` match one character NOT in the set
//! - `\x` matches `x` literally
//! - `{a,b}` matches either alternative (when brace expansion is enabled)

/// Default bound on recursive match calls per selector match.
///
/// `*a*a*a*...` style patterns and stacked globstars backtrack in O(n^k); the
/// bound caps the total work rather than the stack depth.
pub const DEFAULT_MATCH_WORK_LIMIT: usize = 100_000;

/// Default cap on the number of patterns one brace expansion may produce.
///
/// Each `{a,b}` group doubles the count, so twenty groups already mean a
/// million alternatives.
pub const DEFAULT_MAX_ALTERNATIVES: usize = 1_024;

/// Knobs for selector syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobOptions {
    /// Treat `{a,b}` as alternatives. When false, braces are literal.
    pub brace_expansion: bool,
    /// Maximum recursive match calls before a match gives up (non-match).
    pub match_work_limit: usize,
    /// Maximum number of patterns a brace expansion may produce.
    pub max_alternatives: usize,
}

impl Default for GlobOptions {
    fn default() -> Self {
        Self {
            brace_expansion: true,
            match_work_limit: DEFAULT_MATCH_WORK_LIMIT,
            max_alternatives: DEFAULT_MAX_ALTERNATIVES,
        }
    }
}

impl GlobOptions {
    /// True if `c` opens a wildcard construct under these options.
    pub fn is_wildcard(&self, c: char) -> bool {
        matches!(c, '*' | '?' | '[') || (self.brace_expansion && c == '{')
    }

    /// True if `s` must be matched as a pattern rather than looked up exactly.
    ///
    /// ```
    /// use pathrepo_glob::GlobOptions;
    ///
    /// let opts = GlobOptions::default();
    /// assert!(opts.is_selector("/app/views/*.twig"));
    /// assert!(opts.is_selector("/app/{css,js}"));
    /// assert!(!opts.is_selector("/app/views/index.twig"));
    /// ```
    pub fn is_selector(&self, s: &str) -> bool {
        s.chars().any(|c| self.is_wildcard(c))
    }

    /// Longest leading substring of `s` free of wildcard and escape characters.
    ///
    /// Every path matched by the pattern `s` starts with this prefix.
    ///
    /// ```
    /// use pathrepo_glob::GlobOptions;
    ///
    /// let opts = GlobOptions::default();
    /// assert_eq!(opts.static_prefix("/app/views/*.twig"), "/app/views/");
    /// assert_eq!(opts.static_prefix("/app/vi?ws"), "/app/vi");
    /// assert_eq!(opts.static_prefix("/plain"), "/plain");
    /// ```
    pub fn static_prefix<'a>(&self, s: &'a str) -> &'a str {
        let end = s
            .char_indices()
            .find(|&(_, c)| c == '\\' || self.is_wildcard(c))
            .map_or(s.len(), |(i, _)| i);
        &s[..end]
    }
}

/// Match one segment against a pattern using default options.
///
/// ```
/// use pathrepo_glob::glob_match;
///
/// assert!(glob_match("*.twig", "index.twig"));
/// assert!(glob_match("v?", "v1"));
/// assert!(glob_match("*.{css,js}", "app.js"));
/// assert!(!glob_match("*.twig", "index.html"));
/// ```
pub fn glob_match(pattern: &str, input: &str) -> bool {
    glob_match_with(pattern, input, &GlobOptions::default())
}

/// Match one segment against a pattern.
///
/// Returns true if the whole input matches. Brace alternatives share one
/// work budget; a pattern expanding past `max_alternatives` never matches.
pub fn glob_match_with(pattern: &str, input: &str, options: &GlobOptions) -> bool {
    let alternatives = if options.brace_expansion {
        match expand_braces(pattern, options.max_alternatives) {
            Some(alternatives) => alternatives,
            None => return false,
        }
    } else {
        vec![pattern.to_string()]
    };
    let mut budget = Budget::new(options.match_work_limit);
    alternatives
        .iter()
        .any(|alt| match_segment(alt, input, &mut budget))
}

/// Match one already-expanded segment pattern, spending from `budget`.
///
/// Braces are plain characters here.
pub(crate) fn match_segment(pattern: &str, input: &str, budget: &mut Budget) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let input: Vec<char> = input.chars().collect();
    Matcher {
        input: &input,
        budget,
    }
    .run(&pattern, 0, 0)
}

/// Expand `{a,b}` groups into every alternative pattern.
///
/// Nested groups expand too. Unbalanced braces stay literal, and `\{`,
/// `\}`, `\,` are never treated as group syntax. Returns `None` once more
/// than `limit` patterns would be produced.
///
/// ```
/// use pathrepo_glob::expand_braces;
///
/// assert_eq!(expand_braces("/app", 8).unwrap(), vec!["/app"]);
/// assert_eq!(expand_braces("/app/{css,js}", 8).unwrap(), vec!["/app/css", "/app/js"]);
/// assert_eq!(expand_braces("{a,b}{c,d}", 3), None);
/// ```
pub fn expand_braces(pattern: &str, limit: usize) -> Option<Vec<String>> {
    let mut expanded = Vec::new();
    // Depth-first, so alternatives come out in pattern order
    let mut pending = vec![pattern.to_string()];
    while let Some(current) = pending.pop() {
        let Some((start, end)) = first_brace_group(&current) else {
            if expanded.len() == limit {
                return None;
            }
            expanded.push(current);
            continue;
        };

        let prefix = &current[..start];
        let suffix = &current[end + 1..];
        for alt in split_alternatives(&current[start + 1..end]).into_iter().rev() {
            pending.push(format!("{prefix}{alt}{suffix}"));
        }
    }
    Some(expanded)
}

/// Byte offsets of the first balanced top-level `{...}` group.
fn first_brace_group(pattern: &str) -> Option<(usize, usize)> {
    let mut depth = 0usize;
    let mut start = None;
    let mut chars = pattern.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '{' => {
                if depth == 0 {
                    start = Some(i);
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    return start.map(|s| (s, i));
                }
            }
            _ => {}
        }
    }
    None
}

/// Split group content on top-level commas.
fn split_alternatives(content: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut last = 0;
    let mut chars = content.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&content[last..i]);
                last = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&content[last..]);
    parts
}

/// Call budget shared by every step of one match.
#[derive(Debug)]
pub(crate) struct Budget {
    remaining: usize,
}

impl Budget {
    pub(crate) fn new(limit: usize) -> Self {
        Self { remaining: limit }
    }

    /// Take one unit of work; false once the budget is spent.
    pub(crate) fn spend(&mut self) -> bool {
        match self.remaining.checked_sub(1) {
            Some(left) => {
                self.remaining = left;
                true
            }
            None => false,
        }
    }
}

/// Backtracking matcher drawing from a shared call budget.
struct Matcher<'a> {
    input: &'a [char],
    budget: &'a mut Budget,
}

impl Matcher<'_> {
    fn run(&mut self, pattern: &[char], pi: usize, ii: usize) -> bool {
        if !self.budget.spend() {
            return false;
        }

        let Some(&p) = pattern.get(pi) else {
            return ii == self.input.len();
        };

        match p {
            '*' => {
                let mut next = pi;
                while pattern.get(next) == Some(&'*') {
                    next += 1;
                }
                if next == pattern.len() {
                    return true;
                }
                (ii..=self.input.len()).any(|skip| self.run(pattern, next, skip))
            }
            '?' => ii < self.input.len() && self.run(pattern, pi + 1, ii + 1),
            '[' => {
                let Some(&c) = self.input.get(ii) else {
                    return false;
                };
                match char_class(&pattern[pi..], c) {
                    Some((true, consumed)) => self.run(pattern, pi + consumed, ii + 1),
                    Some((false, _)) => false,
                    // Unclosed bracket is a literal '['.
                    None => c == '[' && self.run(pattern, pi + 1, ii + 1),
                }
            }
            '\\' if pi + 1 < pattern.len() => {
                self.input.get(ii) == Some(&pattern[pi + 1]) && self.run(pattern, pi + 2, ii + 1)
            }
            literal => self.input.get(ii) == Some(&literal) && self.run(pattern, pi + 1, ii + 1),
        }
    }
}

/// Evaluate a `[...]` class starting at `pattern[0]` against `ch`.
///
/// Returns `(matched, consumed)`, or `None` when the class never closes.
fn char_class(pattern: &[char], ch: char) -> Option<(bool, usize)> {
    let mut idx = 1;
    let negate = matches!(pattern.get(idx), Some('!' | '^'));
    if negate {
        idx += 1;
    }

    // A ']' right after the opening (or negation) is literal.
    let first = idx;
    let mut matched = false;
    loop {
        let &c = pattern.get(idx)?;
        if c == ']' && idx > first {
            return Some((matched != negate, idx + 1));
        }
        match (pattern.get(idx + 1), pattern.get(idx + 2)) {
            (Some('-'), Some(&end)) if end != ']' => {
                matched |= (c..=end).contains(&ch);
                idx += 3;
            }
            _ => {
                matched |= c == ch;
                idx += 1;
            }
        }
    }
}
