//! Call statements: user-function invocations and console-output calls.
//!
//! A user-function call binds each literal argument to the matching
//! parameter of that function's signature, so that references to the
//! parameter inside the function body resolve when the body's output calls
//! are rendered.  Calls are bound in source order; a later call to the same
//! function overwrites the parameters an earlier one bound.
//!
//! Output calls are located separately and rendered in source order, one
//! [`OutputCall`] per statement.

use tracing::trace;

use crate::bindings::Bindings;
use crate::lang::Language;

use super::dialect::Dialect;
use super::expr::evaluate;
use super::source::{call_args, is_identifier, split_top_level, string_literal, unescape};
use super::value::is_numeric_literal;

/// Control-flow keywords that look like `name(` but never name a function.
const NOT_FUNCTIONS: &[&str] = &[
    "if", "else", "for", "while", "do", "switch", "when", "catch", "try", "return", "new",
    "synchronized", "guard",
];

// ── Function signatures ───────────────────────────────────────────────────────

/// A user-defined function found in the snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSig<'t> {
    pub name: &'t str,
    pub params: Vec<Param<'t>>,
    /// Byte span of the name in the definition header.
    name_span: (usize, usize),
}

/// One declared parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param<'t> {
    /// Name used by named / labelled arguments at the call site; `None` for
    /// Swift's `_` (unlabelled) parameters.
    pub label: Option<&'t str>,
    pub name: &'t str,
}

/// Collect the function definitions in `text`, in source order.
pub fn function_signatures<'t>(text: &'t str, dialect: &Dialect) -> Vec<FunctionSig<'t>> {
    let mut sigs = Vec::new();
    for pattern in &dialect.functions {
        for caps in pattern.captures_iter(text) {
            let (Some(name), Some(name_span)) = (caps.group(1), caps.group_span(1)) else {
                continue;
            };
            if NOT_FUNCTIONS.contains(&name) {
                continue;
            }
            let params = split_top_level(caps.group(2).unwrap_or_default(), true)
                .into_iter()
                .filter_map(|raw| parse_param(raw, dialect.language))
                .collect();
            sigs.push(FunctionSig {
                name,
                params,
                name_span,
            });
        }
    }
    sigs.sort_by_key(|s| s.name_span.0);
    sigs
}

/// Parse one parameter declaration.
///
/// Handles `name: Type = default` (Kotlin, Python, Swift, JavaScript),
/// `final Type name` (Java), varargs (`*args`, `String... xs`, `vararg x`),
/// and Swift argument labels (`label name: Type`, `_ name: Type`).
fn parse_param(raw: &str, lang: Language) -> Option<Param<'_>> {
    let decl = raw.split('=').next().unwrap_or(raw);
    let head = decl.split(':').next().unwrap_or(decl);
    let words: Vec<&str> = head.split_whitespace().collect();
    let name = words
        .last()?
        .trim_start_matches(['*', '.'].as_slice())
        .trim_end_matches('.');
    if !is_identifier(name) {
        return None;
    }
    if lang == Language::Python && matches!(name, "self" | "cls") {
        return None;
    }

    let label = if lang == Language::Swift && words.len() >= 2 {
        Some(words[words.len() - 2]).filter(|&l| l != "_")
    } else {
        Some(name)
    };
    Some(Param { label, name })
}

// ── Call-site binding ─────────────────────────────────────────────────────────

/// Bind call-site arguments of every user-function invocation in `text`.
pub fn bind_call_arguments(text: &str, dialect: &Dialect, bindings: &mut Bindings) {
    let sigs = function_signatures(text, dialect);
    if sigs.is_empty() {
        return;
    }

    for caps in dialect.call_site.captures_iter(text) {
        let (Some(callee), Some(span)) = (caps.group(1), caps.group_span(1)) else {
            continue;
        };
        if sigs.iter().any(|s| s.name_span == span) {
            continue; // the definition header itself
        }
        if text[..caps.start()].trim_end().ends_with('.') {
            continue; // method call: `console.log(`, `obj.greet(`
        }
        let Some(sig) = sigs.iter().find(|s| s.name == callee) else {
            continue;
        };
        if let Some((args, _)) = call_args(text, caps.end()) {
            bind_arguments(sig, args, dialect, bindings);
        }
    }
}

fn bind_arguments(sig: &FunctionSig<'_>, args: &str, dialect: &Dialect, bindings: &mut Bindings) {
    for (position, arg) in split_top_level(args, false).into_iter().enumerate() {
        let named = named_argument(arg, dialect.named_arg);
        let by_label = named.and_then(|(label, value)| {
            sig.params
                .iter()
                .find(|p| p.label == Some(label))
                .map(|p| (p, value))
        });
        let by_position = || {
            let value = named.map_or(arg, |(_, v)| v);
            sig.params.get(position).map(|p| (p, value))
        };
        let Some((param, value_src)) = by_label.or_else(by_position) else {
            continue;
        };
        if let Some(value) = argument_value(value_src, bindings) {
            trace!(function = sig.name, param = param.name, value = %value, "call-site binding");
            bindings.set(param.name, value);
        }
    }
}

/// The literal value of a call argument: a plain string literal, a number,
/// or a variable that is already bound.
fn argument_value(src: &str, bindings: &Bindings) -> Option<String> {
    if let Some(lit) = string_literal(src) {
        return (lit.prefix.is_empty() && lit.quote != '`').then(|| lit.body.to_owned());
    }
    if is_numeric_literal(src) {
        return Some(src.to_owned());
    }
    bindings.get(src).map(str::to_owned)
}

/// Split `label = value` / `label: value` when `label` is an identifier.
fn named_argument(arg: &str, delim: Option<char>) -> Option<(&str, &str)> {
    let (label, value) = arg.split_once(delim?)?;
    let label = label.trim();
    if !is_identifier(label) || value.starts_with('=') {
        return None;
    }
    Some((label, value.trim()))
}

// ── Output calls ──────────────────────────────────────────────────────────────

/// One console-output statement, e.g. `println("Hi $name")`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputCall<'t> {
    /// The call name (`println`, `print`, `log`, …).
    pub name: &'t str,
    /// Raw text between the parentheses.
    pub args: &'t str,
}

/// Find every output call in `text`, in source order.
///
/// A call whose argument list is never closed is skipped.
pub fn output_calls<'t>(text: &'t str, dialect: &Dialect) -> Vec<OutputCall<'t>> {
    dialect
        .output
        .call
        .captures_iter(text)
        .filter_map(|caps| {
            let name = caps.group(1)?;
            let (args, _) = call_args(text, caps.end())?;
            Some(OutputCall { name, args })
        })
        .collect()
}

impl OutputCall<'_> {
    /// Render the call's console text, including its line terminator.
    pub fn render(&self, dialect: &Dialect, bindings: &Bindings) -> String {
        let syntax = &dialect.output;
        let mut separator = " ".to_owned();
        let mut terminator = if syntax.inline.contains(&self.name) { "" } else { "\n" }.to_owned();

        let pieces: Vec<String> = if syntax.multi_arg {
            let mut pieces = Vec::new();
            for arg in split_top_level(self.args, false) {
                match named_argument(arg, dialect.named_arg) {
                    Some((key, value)) if Some(key) == syntax.separator_key => {
                        separator = render_argument(value, dialect, bindings);
                    }
                    Some((key, value)) if Some(key) == syntax.terminator_key => {
                        terminator = render_argument(value, dialect, bindings);
                    }
                    Some(_) => {} // file=, flush=, …
                    None => pieces.push(render_argument(arg, dialect, bindings)),
                }
            }
            pieces
        } else if self.args.trim().is_empty() {
            Vec::new()
        } else {
            vec![render_argument(self.args, dialect, bindings)]
        };

        let mut out = pieces.join(&separator);
        out.push_str(&terminator);
        out
    }
}

/// Render one output argument.
///
/// A single string literal prints its body, interpolated when the language
/// treats that literal form as a template.  A bound identifier prints its
/// value.  Anything else goes through the expression evaluator.
pub fn render_argument(arg: &str, dialect: &Dialect, bindings: &Bindings) -> String {
    let arg = arg.trim();
    if let Some(lit) = string_literal(arg) {
        let body = match dialect.interpolator() {
            Some(interp) if dialect.interpolates(&lit) => interp.interpolate(lit.body, bindings),
            _ => lit.body.to_owned(),
        };
        return if dialect.is_raw(&lit) { body } else { unescape(&body) };
    }
    if is_identifier(arg) {
        if let Some(value) = bindings.get(arg) {
            return value.to_owned();
        }
    }
    evaluate(arg, bindings)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snippet::dialect::dialect;

    fn sigs(src: &str, lang: Language) -> Vec<(String, Vec<String>)> {
        function_signatures(src, dialect(lang).unwrap())
            .into_iter()
            .map(|s| {
                (
                    s.name.to_owned(),
                    s.params.iter().map(|p| p.name.to_owned()).collect(),
                )
            })
            .collect()
    }

    fn bound(src: &str, lang: Language) -> Bindings {
        let mut b = Bindings::new();
        bind_call_arguments(src, dialect(lang).unwrap(), &mut b);
        b
    }

    fn render_all(src: &str, lang: Language, bindings: &Bindings) -> String {
        let d = dialect(lang).unwrap();
        output_calls(src, d).iter().map(|c| c.render(d, bindings)).collect()
    }

    #[test]
    fn kotlin_signatures() {
        let got = sigs(
            "fun query(sql: String) {}\nfun <T> pick(a: T, b: Map<String, T> = mapOf()): T = a",
            Language::Kotlin,
        );
        assert_eq!(
            got,
            vec![
                ("query".into(), vec!["sql".into()]),
                ("pick".into(), vec!["a".into(), "b".into()]),
            ]
        );
    }

    #[test]
    fn java_signatures_skip_control_flow() {
        let got = sigs(
            "public static void greet(final String name, int... counts) {\n if (x) {\n }\n}",
            Language::Java,
        );
        assert_eq!(got, vec![("greet".into(), vec!["name".into(), "counts".into()])]);
    }

    #[test]
    fn python_signatures_skip_self() {
        let got = sigs("def greet(self, name: str, *args, times=1):", Language::Python);
        assert_eq!(
            got,
            vec![("greet".into(), vec!["name".into(), "args".into(), "times".into()])]
        );
    }

    #[test]
    fn javascript_function_forms() {
        let got = sigs(
            "function add(a, b = 2) {}\nconst mul = (x, y) => x * y;\nconst sq = n => n * n;",
            Language::JavaScript,
        );
        let names: Vec<_> = got.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["add", "mul", "sq"]);
        assert_eq!(got[2].1, vec!["n".to_owned()]);
    }

    #[test]
    fn swift_labels() {
        let d = dialect(Language::Swift).unwrap();
        let s = function_signatures("func greet(person name: String, _ title: String) {}", d);
        assert_eq!(s[0].params[0], Param { label: Some("person"), name: "name" });
        assert_eq!(s[0].params[1], Param { label: None, name: "title" });
    }

    #[test]
    fn kotlin_call_binds_parameter() {
        let b = bound(
            "fun query(sql: String) { println(\"Executing query: $sql\") }\nquery(\"SELECT * FROM users\")",
            Language::Kotlin,
        );
        assert_eq!(b.get("sql"), Some("SELECT * FROM users"));
    }

    #[test]
    fn last_call_wins() {
        let b = bound(
            "def hi(who):\n    print(who)\nhi('a')\nhi('b')",
            Language::Python,
        );
        assert_eq!(b.get("who"), Some("b"));
    }

    #[test]
    fn named_and_bound_arguments() {
        let mut b = Bindings::new();
        b.set("n", "3");
        bind_call_arguments(
            "def f(a, b, c):\n    pass\nf(n, c=\"z\", b=2)",
            dialect(Language::Python).unwrap(),
            &mut b,
        );
        assert_eq!(b.get("a"), Some("3"));
        assert_eq!(b.get("b"), Some("2"));
        assert_eq!(b.get("c"), Some("z"));
    }

    #[test]
    fn swift_labelled_call() {
        let b = bound(
            "func greet(person name: String, _ title: String) {}\ngreet(person: \"Ann\", \"Dr.\")",
            Language::Swift,
        );
        assert_eq!(b.get("name"), Some("Ann"));
        assert_eq!(b.get("title"), Some("Dr."));
    }

    #[test]
    fn qualified_call_does_not_rebind_user_function() {
        let b = bound(
            "function log(msg) { console.log(msg); }\nlog(\"hi\");\nconsole.log(\"other\");",
            Language::JavaScript,
        );
        assert_eq!(b.get("msg"), Some("hi"));

        let b = bound("def show(x):\n    print(x)\nshow(1)\nself . show(2)", Language::Python);
        assert_eq!(b.get("x"), Some("1"));
    }

    #[test]
    fn non_literal_argument_is_not_bound() {
        let b = bound("function f(x) {}\nf(compute(1));", Language::JavaScript);
        assert_eq!(b.get("x"), None);
    }

    #[test]
    fn kotlin_print_does_not_end_line() {
        let b: Bindings = [("name", "Kim")].into_iter().collect();
        let out = render_all("print(\"Hi \")\nprintln(\"$name\")\nprintln()", Language::Kotlin, &b);
        assert_eq!(out, "Hi Kim\n\n");
    }

    #[test]
    fn java_concatenation_argument() {
        let b: Bindings = [("name", "Ada")].into_iter().collect();
        let out = render_all(
            "System.out.println(\"Hello, \" + name + \"!\");\nSystem.out.println(\"${name}\");",
            Language::Java,
            &b,
        );
        assert_eq!(out, "Hello, Ada!\n${name}\n");
    }

    #[test]
    fn python_multiple_args_and_keywords() {
        let b: Bindings = [("x", "1"), ("y", "2")].into_iter().collect();
        let out = render_all(
            "print(x, y)\nprint(x, y, sep='-', end='')\nprint(f\"{x} + {y}\", \"{x}\")",
            Language::Python,
            &b,
        );
        assert_eq!(out, "1 2\n1-21 + 2 {x}\n");
    }

    #[test]
    fn javascript_template_vs_plain_string() {
        let b: Bindings = [("n", "4")].into_iter().collect();
        let out = render_all(
            "console.log(`n=${n}`);\nconsole.log('n=${n}', n);",
            Language::JavaScript,
            &b,
        );
        assert_eq!(out, "n=4\nn=${n} 4\n");
    }

    #[test]
    fn swift_separator_and_terminator() {
        let b: Bindings = [("a", "x")].into_iter().collect();
        let out = render_all(
            "print(\"\\(a)\", \"y\", separator: \", \", terminator: \"!\")",
            Language::Swift,
            &b,
        );
        assert_eq!(out, "x, y!");
    }

    #[test]
    fn escapes_are_resolved_outside_raw_strings() {
        let out = render_all(
            "print(\"a\\tb\")\nprint(r\"a\\tb\")",
            Language::Python,
            &Bindings::new(),
        );
        assert_eq!(out, "a\tb\na\\tb\n");
    }

    #[test]
    fn escaped_markers_print_literally() {
        let b: Bindings = [("price", "12"), ("x", "1")].into_iter().collect();
        let out = render_all(r#"println("Price: \$price")"#, Language::Kotlin, &b);
        assert_eq!(out, "Price: $price\n");
        let out = render_all(r"console.log(`a \${x}`);", Language::JavaScript, &b);
        assert_eq!(out, "a ${x}\n");
    }

    #[test]
    fn unresolvable_argument_is_echoed() {
        let out = render_all("println(items.size)", Language::Kotlin, &Bindings::new());
        assert_eq!(out, "items.size\n");
    }

    #[test]
    fn unclosed_call_is_skipped() {
        let d = dialect(Language::Kotlin).unwrap();
        assert!(output_calls("println(\"oops\"", d).is_empty());
    }
}
