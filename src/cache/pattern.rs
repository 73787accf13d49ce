//! Glob Pattern Module
//!
//! Compiles `*` / `?` globs into fully anchored regular expressions for key
//! enumeration.

use regex::Regex;

use crate::cache::MAX_KEY_LENGTH;

// == Glob Pattern ==
/// A compiled glob.
///
/// `*` matches any run of characters (including none), `?` matches exactly
/// one character. Everything else, regex metacharacters included, matches
/// literally. The whole key must match.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    glob: String,
    /// None when the glob needs more characters than any valid key has
    regex: Option<Regex>,
}

impl GlobPattern {
    // == Constructor ==
    /// Compiles a glob.
    pub fn new(glob: &str) -> Self {
        let fixed_chars = glob.chars().filter(|c| *c != '*').count();
        let regex = if fixed_chars > MAX_KEY_LENGTH {
            None
        } else {
            // At most MAX_KEY_LENGTH escaped literals or dots, well inside regex size limits.
            Some(Regex::new(&translate(glob)).expect("escaped glob is a valid regex"))
        };

        Self {
            glob: glob.to_string(),
            regex,
        }
    }

    // == Matches ==
    /// Checks whether the entire key matches the glob.
    pub fn matches(&self, key: &str) -> bool {
        self.regex.as_ref().is_some_and(|regex| regex.is_match(key))
    }

    /// The glob this pattern was compiled from.
    pub fn as_str(&self) -> &str {
        &self.glob
    }
}

fn translate(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len() + 8);
    let mut literal = String::new();
    out.push_str("^(?s:");

    let mut prev = None;
    for c in glob.chars() {
        match c {
            // Runs of stars collapse into one.
            '*' if prev == Some('*') => {}
            '*' | '?' => {
                out.push_str(&regex::escape(&literal));
                literal.clear();
                out.push_str(if c == '*' { ".*" } else { "." });
            }
            _ => literal.push(c),
        }
        prev = Some(c);
    }

    out.push_str(&regex::escape(&literal));
    out.push_str(")$");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_star() {
        let pattern = GlobPattern::new("user:*");

        assert!(pattern.matches("user:1"));
        assert!(pattern.matches("user:"));
        assert!(!pattern.matches("post:1"));
        assert!(!pattern.matches("xuser:1"));
    }

    #[test]
    fn test_question_mark_is_single_char() {
        let pattern = GlobPattern::new("user:?");

        assert!(pattern.matches("user:1"));
        assert!(!pattern.matches("user:"));
        assert!(!pattern.matches("user:12"));
    }

    #[test]
    fn test_anchored_at_both_ends() {
        let pattern = GlobPattern::new("abc");

        assert!(pattern.matches("abc"));
        assert!(!pattern.matches("xabc"));
        assert!(!pattern.matches("abcx"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let pattern = GlobPattern::new("v1.0:*");

        assert!(pattern.matches("v1.0:beta"));
        assert!(!pattern.matches("v1x0:beta"));

        let pattern = GlobPattern::new("a+b(c)[d]{2}|$^\\");
        assert!(pattern.matches("a+b(c)[d]{2}|$^\\"));
        assert!(!pattern.matches("aab(c)[d]{2}|$^\\"));
    }

    #[test]
    fn test_infix_and_multiple_wildcards() {
        let pattern = GlobPattern::new("*:session:??");

        assert!(pattern.matches("tenant-a:session:42"));
        assert!(pattern.matches(":session:ab"));
        assert!(!pattern.matches("tenant-a:session:421"));
    }

    #[test]
    fn test_star_runs_collapse() {
        let pattern = GlobPattern::new(&"*".repeat(10_000));
        assert!(pattern.matches("anything"));
    }

    #[test]
    fn test_overlong_glob_matches_nothing() {
        let pattern = GlobPattern::new(&"?".repeat(MAX_KEY_LENGTH + 1));
        assert!(!pattern.matches(&"a".repeat(MAX_KEY_LENGTH + 1)));
        assert!(!pattern.matches("a"));
    }

    #[test]
    fn test_lone_star_matches_everything() {
        let pattern = GlobPattern::new("*");

        assert!(pattern.matches(""));
        assert!(pattern.matches("anything:at.all"));
        assert_eq!(pattern.as_str(), "*");
    }
}
