//! String-template interpolation.
//!
//! Each language embeds expressions in string literals with its own marker:
//!
//! | Language   | Marker(s)                      | Applies to            |
//! |------------|--------------------------------|-----------------------|
//! | Kotlin     | `${expr}`, then `$identifier`  | `"…"`                 |
//! | JavaScript | `${expr}`                      | `` `…` `` templates   |
//! | Python     | `{expr}`                       | `f"…"` / `f'…'`       |
//! | Swift      | `\(expr)`                      | `"…"`                 |
//!
//! Java has no template syntax and therefore no interpolator.
//!
//! A marker whose inner text is a bare identifier is replaced by that
//! identifier's binding; any other inner text goes through the expression
//! evaluator.  A marker that does not resolve is left exactly as written, so
//! interpolation never fails and re-running it on its own output is harmless.
//!
//! Kotlin's two forms are matched by one alternation in a single
//! left-to-right pass, braced form first.  Substituted text is never scanned
//! again, so a value that itself contains `$name` prints verbatim.
//!
//! Backslash escapes are skipped as a unit before markers are looked for:
//! `\$name` and `\${x}` stay literal (the caller's unescape turns `\$` into
//! `$`), while `\\$name` is an escaped backslash followed by a live marker.
//! Swift treats `\\(` the same way.

use crate::bindings::Bindings;
use crate::lang::Language;
use crate::pattern::{Captures, Pattern, PatternError};

use super::dialect::dialect;
use super::expr::try_evaluate;
use super::source::is_identifier;

/// Rewrites a template by resolving its embedded markers.
pub trait Interpolate: Send + Sync {
    fn interpolate(&self, template: &str, bindings: &Bindings) -> String;
}

/// A marker syntax described by one regex.
///
/// Group 1 holds the inner text of a bracketed marker (`${…}`, `{…}`,
/// `\(…)`); group 2, when the syntax has one, holds the identifier of a bare
/// `$name` marker.  The bracketed alternative is listed first, so at any `$`
/// it wins over the bare form and a resolved value is never rescanned.
/// A match in which no group participated is an escape and is kept as is.
#[derive(Debug, Clone)]
pub struct MarkerSyntax {
    marker: Pattern,
}

impl MarkerSyntax {
    pub fn kotlin() -> Result<Self, PatternError> {
        Self::new(r"\\.|\$\{([^}]*)\}|\$([A-Za-z_]\w*)")
    }

    pub fn javascript() -> Result<Self, PatternError> {
        Self::new(r"\\.|\$\{([^}]*)\}")
    }

    pub fn python() -> Result<Self, PatternError> {
        Self::new(r"\{([^{}]*)\}")
    }

    pub fn swift() -> Result<Self, PatternError> {
        Self::new(r"\\\\|\\\(([^)]*)\)")
    }

    /// The marker syntax for `lang`, or `None` for Java.
    pub fn for_language(lang: Language) -> Result<Option<Self>, PatternError> {
        match lang {
            Language::Kotlin => Self::kotlin().map(Some),
            Language::JavaScript => Self::javascript().map(Some),
            Language::Python => Self::python().map(Some),
            Language::Swift => Self::swift().map(Some),
            Language::Java => Ok(None),
        }
    }

    fn new(src: &str) -> Result<Self, PatternError> {
        Ok(Self {
            marker: Pattern::new(src)?,
        })
    }
}

impl Interpolate for MarkerSyntax {
    fn interpolate(&self, template: &str, bindings: &Bindings) -> String {
        self.marker.replace_all(template, |caps: &Captures<'_>| {
            caps.first_group(&[1, 2])
                .and_then(|inner| resolve_marker(inner, bindings))
                .unwrap_or_else(|| caps.whole().to_owned())
        })
    }
}

fn resolve_marker(inner: &str, bindings: &Bindings) -> Option<String> {
    let inner = inner.trim();
    if is_identifier(inner) {
        bindings.get(inner).map(str::to_owned)
    } else {
        try_evaluate(inner, bindings)
    }
}

/// Interpolate `template` with `lang`'s marker syntax.
///
/// Returns the template unchanged for Java, and also if the language's
/// marker pattern could not be built.
pub fn interpolate(template: &str, bindings: &Bindings, lang: Language) -> String {
    match dialect(lang) {
        Ok(d) => match d.interpolator() {
            Some(interp) => interp.interpolate(template, bindings),
            None => template.to_owned(),
        },
        Err(_) => template.to_owned(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Bindings {
        pairs.iter().copied().collect()
    }

    #[test]
    fn kotlin_bare_identifier() {
        let b = vars(&[("name", "John")]);
        assert_eq!(interpolate("Hello $name", &b, Language::Kotlin), "Hello John");
    }

    #[test]
    fn kotlin_missing_identifier_is_kept() {
        assert_eq!(interpolate("Hello $x", &Bindings::new(), Language::Kotlin), "Hello $x");
    }

    #[test]
    fn kotlin_braced_expression() {
        let b = vars(&[("a", "2"), ("b", "3"), ("name", "World")]);
        assert_eq!(
            interpolate("Hello, ${name}! ${a + b}", &b, Language::Kotlin),
            "Hello, World! 5"
        );
    }

    #[test]
    fn kotlin_resolved_value_is_not_rescanned() {
        let b = vars(&[("price", "$amount"), ("amount", "12")]);
        assert_eq!(interpolate("Cost: ${price}", &b, Language::Kotlin), "Cost: $amount");
    }

    #[test]
    fn kotlin_dollar_amount_is_literal() {
        assert_eq!(interpolate("Pay $5 now", &Bindings::new(), Language::Kotlin), "Pay $5 now");
    }

    #[test]
    fn unresolved_expression_keeps_marker() {
        let tpl = "Len: ${name.length}";
        assert_eq!(interpolate(tpl, &vars(&[("name", "x")]), Language::Kotlin), tpl);
    }

    #[test]
    fn escaped_dollar_is_not_a_marker() {
        let b = vars(&[("price", "12"), ("x", "1")]);
        assert_eq!(interpolate(r"Price: \$price", &b, Language::Kotlin), r"Price: \$price");
        assert_eq!(interpolate(r"a \${x}", &b, Language::Kotlin), r"a \${x}");
        assert_eq!(interpolate(r"a \${x}", &b, Language::JavaScript), r"a \${x}");
    }

    #[test]
    fn escaped_backslash_before_marker() {
        let b = vars(&[("price", "12"), ("x", "1")]);
        assert_eq!(interpolate(r"\\$price", &b, Language::Kotlin), r"\\12");
        assert_eq!(interpolate(r"\\${x}", &b, Language::JavaScript), r"\\1");
        assert_eq!(interpolate(r"\\(x) \(x)", &b, Language::Swift), r"\\(x) 1");
    }

    #[test]
    fn python_braces() {
        let b = vars(&[("greeting", "Hi"), ("name", "Sam")]);
        assert_eq!(interpolate("{greeting}, {name}!", &b, Language::Python), "Hi, Sam!");
    }

    #[test]
    fn python_expression_and_miss() {
        let b = vars(&[("x", "4")]);
        assert_eq!(interpolate("{x * 2} {y} {}", &b, Language::Python), "8 {y} {}");
    }

    #[test]
    fn javascript_template() {
        let b = vars(&[("user", "ada"), ("n", "3")]);
        assert_eq!(
            interpolate("${user} has ${n - 1} items, $user", &b, Language::JavaScript),
            "ada has 2 items, $user"
        );
    }

    #[test]
    fn swift_parens() {
        let b = vars(&[("city", "Oslo"), ("t", "21.5")]);
        assert_eq!(
            interpolate(r"\(city): \(t + 0.5) degrees", &b, Language::Swift),
            "Oslo: 22 degrees"
        );
    }

    #[test]
    fn java_is_identity() {
        let b = vars(&[("name", "x")]);
        assert_eq!(interpolate("Hi $name ${name}", &b, Language::Java), "Hi $name ${name}");
    }

    #[test]
    fn no_markers_is_identity() {
        let b = vars(&[("a", "1")]);
        for lang in Language::ALL {
            assert_eq!(interpolate("plain text.", &b, lang), "plain text.");
        }
    }

    #[test]
    fn interpolation_is_idempotent_on_misses() {
        let tpl = "{missing} and {other}";
        let once = interpolate(tpl, &Bindings::new(), Language::Python);
        let twice = interpolate(&once, &Bindings::new(), Language::Python);
        assert_eq!(once, tpl);
        assert_eq!(twice, tpl);
    }

    #[test]
    fn variants_are_usable_through_the_trait() {
        let syntax: Box<dyn Interpolate> = Box::new(MarkerSyntax::swift().unwrap());
        assert_eq!(syntax.interpolate(r"\(a)", &vars(&[("a", "ok")])), "ok");
    }
}
