//! Compiled regular expressions used by the snippet scanners.
//!
//! A thin layer over the [`regex`] crate.  The scanners never touch
//! `regex::Captures` directly; they work with the owned-offset [`Captures`]
//! below, which exposes the whole match, its byte span, and 1-based groups.
//!
//! All patterns are compiled with `^`/`$` matching at line boundaries, since
//! snippets are multi-line and several declaration rules are line-anchored.

use std::sync::Arc;

use regex::Regex;

// ── Public types ─────────────────────────────────────────────────────────────

/// Error returned when a pattern cannot be compiled.
#[derive(Debug, Clone)]
pub struct PatternError {
    pub src: String,
    pub cause: regex::Error,
}

impl std::fmt::Display for PatternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid pattern `{}`: {}", self.src, self.cause)
    }
}

impl std::error::Error for PatternError {}

/// A compiled pattern ready for matching.
#[derive(Clone)]
pub struct Pattern {
    src: String,
    re: Arc<Regex>,
}

impl std::fmt::Debug for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pattern").field("src", &self.src).finish()
    }
}

impl Pattern {
    /// Compile `src`.
    pub fn new(src: &str) -> Result<Self, PatternError> {
        let re = regex::RegexBuilder::new(src)
            .multi_line(true)
            .build()
            .map_err(|cause| PatternError {
                src: src.to_owned(),
                cause,
            })?;
        Ok(Self {
            src: src.to_owned(),
            re: Arc::new(re),
        })
    }

    /// Returns `true` if this pattern matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.re.is_match(text)
    }

    /// All non-overlapping matches, left to right.
    pub fn captures_iter<'p, 't>(&'p self, text: &'t str) -> impl Iterator<Item = Captures<'t>> + 'p
    where
        't: 'p,
    {
        self.re.captures_iter(text).map(move |caps| Captures::from_regex(text, &caps))
    }

    /// Replace every match with the string produced by `replace`.
    pub fn replace_all<F>(&self, text: &str, mut replace: F) -> String
    where
        F: FnMut(&Captures<'_>) -> String,
    {
        self.re
            .replace_all(text, |caps: &regex::Captures<'_>| {
                replace(&Captures::from_regex(text, caps))
            })
            .into_owned()
    }
}

/// One successful match with access to capture groups.
#[derive(Debug, Clone)]
pub struct Captures<'t> {
    text: &'t str,
    start: usize,
    end: usize,
    /// (start, end) byte offsets per capture group; `None` = group didn't participate.
    groups: Vec<Option<(usize, usize)>>,
}

impl<'t> Captures<'t> {
    fn from_regex(text: &'t str, caps: &regex::Captures<'_>) -> Self {
        let (start, end) = caps.get(0).map_or((0, 0), |m| (m.start(), m.end()));
        let groups = (1..caps.len())
            .map(|i| caps.get(i).map(|m| (m.start(), m.end())))
            .collect();
        Captures {
            text,
            start,
            end,
            groups,
        }
    }

    /// The entire matched substring.
    pub fn whole(&self) -> &'t str {
        &self.text[self.start..self.end]
    }

    /// Byte offset where the match starts.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Byte offset just past the match.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Text after the match.
    pub fn right(&self) -> &'t str {
        &self.text[self.end..]
    }

    /// The nth capture group, 1-based.
    pub fn group(&self, n: usize) -> Option<&'t str> {
        self.groups
            .get(n.checked_sub(1)?)?
            .as_ref()
            .map(|&(s, e)| &self.text[s..e])
    }

    /// Byte span of the nth capture group, 1-based.
    pub fn group_span(&self, n: usize) -> Option<(usize, usize)> {
        *self.groups.get(n.checked_sub(1)?)?
    }

    /// The first of `groups` that participated in the match.
    ///
    /// Used by alternations such as `"([^"]*)"|'([^']*)'`.
    pub fn first_group(&self, groups: &[usize]) -> Option<&'t str> {
        groups.iter().find_map(|&n| self.group(n))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
