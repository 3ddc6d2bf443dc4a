//! Per-language syntax tables.
//!
//! Everything language-specific the scanners need lives in one [`Dialect`]
//! value per [`Language`]: declaration patterns, function-signature patterns,
//! the output-call pattern, and the interpolation marker syntax.  The tables
//! are compiled on first use and looked up by tag through [`dialect`]; the
//! scanners themselves are written once against this table.
//!
//! | Language   | Declarations                                   | Output calls                        |
//! |------------|------------------------------------------------|-------------------------------------|
//! | Kotlin     | `val`/`var` (optional `: Type`)                | `println(…)`, `print(…)`            |
//! | Java       | `String`/`int`/`long`/`double`/`float`/`boolean`/`var` | `System.out.println(…)`, `System.out.print(…)` |
//! | Python     | bare `name = literal` at line start            | `print(…)`                          |
//! | JavaScript | `const`/`let`/`var`                            | `console.log(…)` and friends        |
//! | Swift      | `let`/`var` (optional `: Type`)                | `print(…)`, `debugPrint(…)`         |

use std::sync::OnceLock;

use crate::lang::Language;
use crate::pattern::{Pattern, PatternError};

use super::interpolate::{Interpolate, MarkerSyntax};
use super::source::StrLit;

// ── Table types ───────────────────────────────────────────────────────────────

/// Literal-declaration patterns.  Group 1 is always the identifier.
#[derive(Debug)]
pub struct DeclRules {
    /// Value in group 2 (double quotes) or group 3 (single quotes).
    pub strings: Pattern,
    /// Value in group 2.  Callers must reject matches followed by an
    /// arithmetic operator.
    pub numbers: Pattern,
    /// Value in group 2.
    pub booleans: Pattern,
}

/// How a language writes console output.
#[derive(Debug)]
pub struct OutputSyntax {
    /// Matches up to and including the opening `(`; group 1 is the call name.
    pub call: Pattern,
    /// Call names that do not end the line (`print` in Kotlin and Java).
    pub inline: &'static [&'static str],
    /// Whether several comma-separated arguments are printed space-joined.
    pub multi_arg: bool,
    /// Keyword argument overriding the argument separator.
    pub separator_key: Option<&'static str>,
    /// Keyword argument overriding the line terminator.
    pub terminator_key: Option<&'static str>,
}

/// All syntax knowledge for one language.
#[derive(Debug)]
pub struct Dialect {
    pub language: Language,
    pub decls: DeclRules,
    /// Function definitions: group 1 is the name, group 2 the parameter list.
    pub functions: Vec<Pattern>,
    /// Any `name(` call; group 1 is the callee.
    pub call_site: Pattern,
    pub output: OutputSyntax,
    /// Delimiter of named / labelled call arguments (`p = v`, `label: v`).
    pub named_arg: Option<char>,
    interpolator: Option<MarkerSyntax>,
}

impl Dialect {
    /// The language's interpolator, `None` for Java.
    pub fn interpolator(&self) -> Option<&dyn Interpolate> {
        self.interpolator.as_ref().map(|m| m as &dyn Interpolate)
    }

    /// Whether a string literal of this shape is an interpolation template.
    pub fn interpolates(&self, lit: &StrLit<'_>) -> bool {
        match self.language {
            Language::Kotlin | Language::Swift => lit.quote == '"' && lit.prefix.is_empty(),
            Language::JavaScript => lit.quote == '`',
            Language::Python => lit.prefix.chars().any(|c| c.eq_ignore_ascii_case(&'f')),
            Language::Java => false,
        }
    }

    /// Whether backslash escapes in a literal of this shape are left as written.
    pub fn is_raw(&self, lit: &StrLit<'_>) -> bool {
        self.language == Language::Python && lit.prefix.chars().any(|c| c.eq_ignore_ascii_case(&'r'))
    }

    fn build(lang: Language) -> Result<Self, PatternError> {
        let call_site = Pattern::new(r"\b([A-Za-z_]\w*)\s*\(")?;
        let interpolator = MarkerSyntax::for_language(lang)?;

        let dialect = match lang {
            Language::Kotlin => {
                let lead = annotated_lead("val|var");
                Dialect {
                    language: lang,
                    decls: decl_rules(&lead, &lead, &lead, false, "true|false")?,
                    functions: vec![Pattern::new(
                        r"\bfun\s+(?:<[^>]*>\s*)?(?:[\w.]+\.)?(\w+)\s*\(([^)]*)\)",
                    )?],
                    call_site,
                    output: OutputSyntax {
                        call: Pattern::new(r"\b(println|print)\s*\(")?,
                        inline: &["print"],
                        multi_arg: false,
                        separator_key: None,
                        terminator_key: None,
                    },
                    named_arg: Some('='),
                    interpolator,
                }
            }
            Language::Java => Dialect {
                language: lang,
                decls: decl_rules(
                    &keyword_lead("String|var"),
                    &keyword_lead("int|long|short|byte|double|float|var"),
                    &keyword_lead("boolean|var"),
                    false,
                    "true|false",
                )?,
                functions: vec![Pattern::new(
                    r"\b[\w<>\[\]]+\s+(\w+)\s*\(([^)]*)\)\s*(?:throws\s+[\w.,\s]+?)?\s*\{",
                )?],
                call_site,
                output: OutputSyntax {
                    call: Pattern::new(r"\bSystem\s*\.\s*(?:out|err)\s*\.\s*(println|print)\s*\(")?,
                    inline: &["print"],
                    multi_arg: false,
                    separator_key: None,
                    terminator_key: None,
                },
                named_arg: None,
                interpolator,
            },
            Language::Python => {
                let lead = r"^[ \t]*(\w+)[ \t]*=[ \t]*";
                Dialect {
                    language: lang,
                    decls: decl_rules(lead, lead, lead, true, "True|False")?,
                    functions: vec![Pattern::new(r"\bdef\s+(\w+)\s*\(([^)]*)\)")?],
                    call_site,
                    output: OutputSyntax {
                        call: Pattern::new(r"\b(print)\s*\(")?,
                        inline: &[],
                        multi_arg: true,
                        separator_key: Some("sep"),
                        terminator_key: Some("end"),
                    },
                    named_arg: Some('='),
                    interpolator,
                }
            }
            Language::JavaScript => {
                let lead = keyword_lead("const|let|var");
                Dialect {
                    language: lang,
                    decls: decl_rules(&lead, &lead, &lead, true, "true|false")?,
                    functions: vec![
                        Pattern::new(r"\bfunction\*?\s+(\w+)\s*\(([^)]*)\)")?,
                        Pattern::new(
                            r"\b(?:const|let|var)\s+(\w+)\s*=\s*(?:async\s+)?(?:function\s*)?\(([^)]*)\)",
                        )?,
                        Pattern::new(r"\b(?:const|let|var)\s+(\w+)\s*=\s*(?:async\s+)?(\w+)\s*=>")?,
                    ],
                    call_site,
                    output: OutputSyntax {
                        call: Pattern::new(r"\bconsole\s*\.\s*(log|info|warn|error|debug)\s*\(")?,
                        inline: &[],
                        multi_arg: true,
                        separator_key: None,
                        terminator_key: None,
                    },
                    named_arg: None,
                    interpolator,
                }
            }
            Language::Swift => {
                let lead = annotated_lead("let|var");
                Dialect {
                    language: lang,
                    decls: decl_rules(&lead, &lead, &lead, false, "true|false")?,
                    functions: vec![Pattern::new(r"\bfunc\s+(\w+)\s*(?:<[^>]*>)?\s*\(([^)]*)\)")?],
                    call_site,
                    output: OutputSyntax {
                        call: Pattern::new(r"\b(print|debugPrint)\s*\(")?,
                        inline: &[],
                        multi_arg: true,
                        separator_key: Some("separator"),
                        terminator_key: Some("terminator"),
                    },
                    named_arg: Some(':'),
                    interpolator,
                }
            }
        };
        Ok(dialect)
    }
}

// ── Pattern builders ──────────────────────────────────────────────────────────

/// `<keyword> name =`
fn keyword_lead(keywords: &str) -> String {
    format!(r"\b(?:{keywords})\s+(\w+)\s*=\s*")
}

/// `<keyword> name[: Type] =`
fn annotated_lead(keywords: &str) -> String {
    format!(r"\b(?:{keywords})\s+(\w+)(?:\s*:\s*[\w.<>?]+)?\s*=\s*")
}

fn decl_rules(
    string_lead: &str,
    number_lead: &str,
    bool_lead: &str,
    single_quotes: bool,
    bool_words: &str,
) -> Result<DeclRules, PatternError> {
    let string_value = if single_quotes {
        r#"(?:"([^"\n]*)"|'([^'\n]*)')"#
    } else {
        r#""([^"\n]*)""#
    };
    Ok(DeclRules {
        strings: Pattern::new(&format!("{string_lead}{string_value}"))?,
        numbers: Pattern::new(&format!(r"{number_lead}(-?\d+(?:\.\d+)?)"))?,
        booleans: Pattern::new(&format!(r"{bool_lead}({bool_words})\b"))?,
    })
}

// ── Lookup table ──────────────────────────────────────────────────────────────

static DIALECTS: [OnceLock<Result<Dialect, PatternError>>; 5] = [
    OnceLock::new(),
    OnceLock::new(),
    OnceLock::new(),
    OnceLock::new(),
    OnceLock::new(),
];

/// The compiled syntax table for `lang`.
pub fn dialect(lang: Language) -> Result<&'static Dialect, PatternError> {
    DIALECTS[lang.index()]
        .get_or_init(|| Dialect::build(lang))
        .as_ref()
        .map_err(Clone::clone)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
