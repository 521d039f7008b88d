//! Route allow-pattern matching.
//!
//! Allow-patterns are glob strings where `*` matches any run of characters
//! (path separators included) and every other character is literal. A path is
//! authorized only by a full anchored match: `/admin/users` does not
//! authorize `/admin/users/extra`. The literal pattern `*` is the full-access
//! sentinel reserved for experiences that may reach every route.
//!
//! Conversion from glob to matcher lives here and nowhere else; pattern sets
//! are compiled once when the registry is built, never at query time.

use regex::Regex;

/// The pattern that authorizes every path.
pub(crate) const MATCH_ALL: &str = "*";

/// A compiled, ordered set of allow-patterns for one experience.
#[derive(Debug, Clone)]
pub struct PatternSet {
    /// The set contains the `*` sentinel; every path is allowed.
    match_all: bool,
    matchers: Vec<Regex>,
}

impl PatternSet {
    /// Compile a pattern list.
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Self {
        let match_all = patterns.iter().any(|p| p.as_ref() == MATCH_ALL);
        let matchers = if match_all {
            // Sentinel short-circuits; no point compiling the rest.
            Vec::new()
        } else {
            patterns
                .iter()
                .map(|p| anchored_matcher(p.as_ref()))
                .collect()
        };
        Self {
            match_all,
            matchers,
        }
    }

    /// Whether `path` fully matches at least one pattern.
    ///
    /// Matching is a logical OR across the set; order carries no precedence
    /// because any match authorizes.
    pub fn allows(&self, path: &str) -> bool {
        if self.match_all {
            return true;
        }
        self.matchers.iter().any(|m| m.is_match(path))
    }

    /// Whether this set carries the full-access sentinel.
    pub fn is_match_all(&self) -> bool {
        self.match_all
    }
}

/// Convert a glob pattern into an anchored matcher.
///
/// `*` becomes "zero or more of any character"; everything else, including
/// `/` and regex metacharacters, is escaped literally. The expression is
/// anchored on both ends so a pattern can never authorize a longer path by
/// prefix.
fn anchored_matcher(pattern: &str) -> Regex {
    let literal_parts: Vec<String> = pattern.split('*').map(|p| regex::escape(p)).collect();
    let expr = format!("(?s)^{}$", literal_parts.join(".*"));
    // Escaped literals joined by `.*` always form a valid expression.
    Regex::new(&expr).expect("anchored glob expression is always valid")
}
