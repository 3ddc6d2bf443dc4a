//! Quote-aware text helpers shared by the scanners.
//!
//! None of these understand a real grammar.  They track just enough state
//! (inside a string or not, bracket depth) to avoid splitting or stripping
//! inside string literals and nested calls.

use crate::lang::Language;

// ── Comment stripping ─────────────────────────────────────────────────────────

/// Remove comments from `src`, keeping every newline so that statement order
/// and line structure survive.
///
/// | Language                       | Line comment | Block comment |
/// |--------------------------------|--------------|---------------|
/// | Kotlin, Java, JavaScript, Swift | `//`        | `/* … */`     |
/// | Python                         | `#`          | none          |
pub fn strip_comments(src: &str, lang: Language) -> String {
    let hash_comments = lang == Language::Python;
    let mut out = String::with_capacity(src.len());
    let mut chars = src.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(ch) = chars.next() {
        if let Some(q) = quote {
            out.push(ch);
            match ch {
                '\\' => {
                    if let Some(next) = chars.next() {
                        out.push(next);
                    }
                }
                '\n' if q != '`' => quote = None,
                c if c == q => quote = None,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' | '\'' | '`' => {
                quote = Some(ch);
                out.push(ch);
            }
            '#' if hash_comments => skip_line(&mut chars, &mut out),
            '/' if !hash_comments && chars.peek() == Some(&'/') => {
                skip_line(&mut chars, &mut out);
            }
            '/' if !hash_comments && chars.peek() == Some(&'*') => {
                chars.next(); // consume '*'
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if c == '\n' {
                        out.push('\n');
                    }
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
            }
            other => out.push(other),
        }
    }

    out
}

fn skip_line(chars: &mut std::iter::Peekable<std::str::Chars>, out: &mut String) {
    for c in chars.by_ref() {
        if c == '\n' {
            out.push('\n');
            break;
        }
    }
}

// ── Bracketed argument lists ──────────────────────────────────────────────────

/// Scan a call's argument list.
///
/// `start` is the byte offset just past the opening `(`.  Returns the text
/// between the parentheses and the offset just past the matching `)`, or
/// `None` if the list is never closed.
pub fn call_args(text: &str, start: usize) -> Option<(&str, usize)> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, ch) in text.get(start..)?.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' | '`' => quote = Some(ch),
            '(' | '[' | '{' => depth += 1,
            ')' if depth == 0 => {
                let end = start + i;
                return Some((&text[start..end], end + 1));
            }
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    None
}

/// Split `s` on commas that sit outside quotes and brackets.
///
/// With `angle_brackets`, `<…>` also nests (for generic parameter types such
/// as `Map<String, Int>`); leave it off for call arguments, where `<` is
/// usually a comparison.  Parts are trimmed; an all-blank input yields no parts.
pub fn split_top_level(s: &str, angle_brackets: bool) -> Vec<&str> {
    if s.trim().is_empty() {
        return Vec::new();
    }

    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut begin = 0;

    for (i, ch) in s.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' | '`' => quote = Some(ch),
            '(' | '[' | '{' => depth += 1,
            '<' if angle_brackets => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            '>' if angle_brackets => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(s[begin..i].trim());
                begin = i + 1;
            }
            _ => {}
        }
    }
    parts.push(s[begin..].trim());
    parts
}

// ── String literals ───────────────────────────────────────────────────────────

/// A single string literal, e.g. `f"Hi {name}"` or `` `x=${x}` ``.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrLit<'a> {
    /// Letters before the opening quote (`f`, `r`, `rb`, …), possibly empty.
    pub prefix: &'a str,
    pub quote: char,
    /// Text between the quotes, escapes left as written.
    pub body: &'a str,
}

/// Recognise `s` (trimmed) as exactly one string literal.
///
/// Returns `None` for anything else, including concatenations like
/// `"a" + "b"` whose first and last characters happen to be quotes.
pub fn string_literal(s: &str) -> Option<StrLit<'_>> {
    let s = s.trim();
    let quote_at = s.find(&['"', '\'', '`'][..])?;
    let prefix = &s[..quote_at];
    if prefix.len() > 2 || !prefix.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    let quote = s[quote_at..].chars().next()?;
    let rest = &s[quote_at + 1..];

    let mut escaped = false;
    for (i, ch) in rest.char_indices() {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == quote {
            return (i + 1 == rest.len()).then_some(StrLit {
                prefix,
                quote,
                body: &rest[..i],
            });
        }
    }
    None
}

/// Resolve the common backslash escapes of a string-literal body.
///
/// `\n`, `\t`, `\\`, escaped quotes and `\$` are replaced; any other
/// backslash sequence (including Swift's `\(`) is kept as written.
pub fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(c @ ('\\' | '"' | '\'' | '`' | '$')) => out.push(c),
            Some(c) => {
                out.push('\\');
                out.push(c);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Returns `true` if `s` is a plain identifier (`\w+`).
pub fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_')
}

// ── Tests ─────────────────────────────────────────────────────────────────────
