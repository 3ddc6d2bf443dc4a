//! Literal-declaration scanning.
//!
//! Three passes run over the whole snippet, in this order:
//!
//! 1. string literals: plain overwrite, so the last declaration of a name wins;
//! 2. numeric literals: guarded insert, skipped when the number is the first
//!    operand of an arithmetic expression (`val x = 1 + 2` binds nothing);
//! 3. boolean literals: guarded insert (Python `True`/`False` are lower-cased).
//!
//! Declarations that match none of the patterns are simply not bound.

use tracing::trace;

use crate::bindings::Bindings;
use crate::lang::Language;

use super::dialect::{dialect, Dialect};

/// Scan `source` for literal declarations in `lang`.
///
/// Returns an empty map if the language's patterns are unavailable.
pub fn extract(source: &str, lang: Language) -> Bindings {
    let mut bindings = Bindings::new();
    if let Ok(d) = dialect(lang) {
        extract_into(source, d, &mut bindings);
    }
    bindings
}

/// Scan `text` with `dialect`'s rules, adding to `bindings`.
pub fn extract_into(text: &str, dialect: &Dialect, bindings: &mut Bindings) {
    let rules = &dialect.decls;

    for caps in rules.strings.captures_iter(text) {
        if let (Some(name), Some(value)) = (caps.group(1), caps.first_group(&[2, 3])) {
            trace!(name, value, "string declaration");
            bindings.set(name, value);
        }
    }

    for caps in rules.numbers.captures_iter(text) {
        let (Some(name), Some(value)) = (caps.group(1), caps.group(2)) else { continue };
        if starts_with_operator(caps.right()) {
            continue;
        }
        if bindings.set_if_absent(name, value) {
            trace!(name, value, "numeric declaration");
        }
    }

    for caps in rules.booleans.captures_iter(text) {
        if let (Some(name), Some(value)) = (caps.group(1), caps.group(2)) {
            bindings.set_if_absent(name, value.to_ascii_lowercase());
        }
    }
}

/// Whether `rest` begins (after spaces/tabs) with `+ - * /`.
fn starts_with_operator(rest: &str) -> bool {
    matches!(
        rest.trim_start_matches(|c: char| c == ' ' || c == '\t').chars().next(),
        Some('+' | '-' | '*' | '/')
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────
