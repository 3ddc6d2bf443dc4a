//! Command-line argument parsing.
//!
//! Usage:
//!   snipsim [-l<lang>] [-c<code>] [-f[<file>]] [-jtnd] [<file>]

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::lang::Language;

pub const USAGE: &str = "Usage: snipsim [-l<lang>] [-c<code>] [-f[<file>]] [-jtnd] [<file>]";

// ── Public types ──────────────────────────────────────────────────────────────

/// Parsed command-line arguments.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Snippet language (`-l<lang>`).
    pub language: Option<Language>,
    /// Inline snippet (`-c<code>`).
    pub code: Option<String>,
    /// Snippet file; `None` (and no `-c`) means stdin.
    pub file: Option<PathBuf>,
    /// Which config file to load (`-f`).
    pub config: ConfigFile,
    /// Print the result as JSON (`-j`).
    pub json: bool,
    /// Print the elapsed time (`-t`).
    pub timing: bool,
    /// Disable colour (`-n`).
    pub no_color: bool,
    /// Debug tracing (`-d`).
    pub debug: bool,
}

/// How to choose the user config file.
#[derive(Debug, Default)]
pub enum ConfigFile {
    /// Search the standard locations (default; see [`find_user_config`]).
    #[default]
    Search,
    /// `-f` with no file argument: skip user config.
    Skip,
    /// `-f<file>`: load this specific file.
    Explicit(PathBuf),
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse `std::env::args()` and return [`CliArgs`] or an error message.
pub fn parse_args() -> Result<CliArgs, String> {
    let raw: Vec<String> = std::env::args().collect();
    parse_argv(raw.get(1..).unwrap_or_default())
}

/// Parse a slice of argument strings (exposed for testing).
pub fn parse_argv(argv: &[String]) -> Result<CliArgs, String> {
    let mut args = CliArgs::default();
    let mut positional: Vec<String> = Vec::new();
    let mut i = 0;

    while i < argv.len() {
        let arg = argv[i].as_str();

        if arg == "--" {
            i += 1;
            positional.extend(argv[i..].iter().cloned());
            break;
        }

        // `-` alone names stdin.
        if !arg.starts_with('-') || arg == "-" {
            positional.push(arg.to_owned());
            i += 1;
            continue;
        }

        let chars: Vec<char> = arg[1..].chars().collect();
        let mut j = 0;
        while j < chars.len() {
            match chars[j] {
                'd' => args.debug = true,
                'j' => args.json = true,
                'n' => args.no_color = true,
                't' => args.timing = true,

                // -f[<file>]
                'f' => {
                    if j + 1 < chars.len() {
                        let file: String = chars[j + 1..].iter().collect();
                        args.config = ConfigFile::Explicit(PathBuf::from(file));
                        j = chars.len();
                    } else {
                        args.config = ConfigFile::Skip;
                    }
                }

                // -c<code>
                'c' => {
                    let code = if j + 1 < chars.len() {
                        let s: String = chars[j + 1..].iter().collect();
                        j = chars.len();
                        s
                    } else if i + 1 < argv.len() {
                        i += 1;
                        argv[i].clone()
                    } else {
                        return Err("-c requires a code argument".to_owned());
                    };
                    args.code = Some(code);
                }

                // -l<lang>
                'l' => {
                    let name = if j + 1 < chars.len() {
                        let s: String = chars[j + 1..].iter().collect();
                        j = chars.len();
                        s
                    } else if i + 1 < argv.len() {
                        i += 1;
                        argv[i].clone()
                    } else {
                        return Err("-l requires a language argument".to_owned());
                    };
                    args.language = Some(name.parse().map_err(|e| format!("{e}"))?);
                }

                c => return Err(format!("unknown option: -{c}")),
            }
            j += 1;
        }
        i += 1;
    }

    match positional.len() {
        0 => {}
        1 => {
            let path = positional.remove(0);
            if path != "-" {
                args.file = Some(PathBuf::from(path));
            }
        }
        n => return Err(format!("too many arguments ({n})")),
    }
    if args.code.is_some() && args.file.is_some() {
        return Err("-c and a snippet file are mutually exclusive".to_owned());
    }

    Ok(args)
}

// ── Path helpers ──────────────────────────────────────────────────────────────

/// Candidate config paths, in search order.
pub fn user_config_candidates() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(home) = std::env::var_os("HOME").filter(|h| !h.is_empty()) {
        paths.push(PathBuf::from(home).join(".snipsimrc"));
    }
    if let Some(dirs) = ProjectDirs::from("", "", "snipsim") {
        paths.push(dirs.config_dir().join("snipsimrc"));
    }
    paths.push(PathBuf::from("./.snipsimrc"));
    paths
}

/// Search for the user config file in the standard locations.
/// Returns the first path that exists, or `None`.
pub fn find_user_config() -> Option<PathBuf> {
    user_config_candidates().into_iter().find(|p| p.exists())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|&s| s.to_owned()).collect()
    }

    #[test]
    fn empty_args() {
        let a = parse_argv(&argv(&[])).unwrap();
        assert!(a.language.is_none() && a.code.is_none() && a.file.is_none());
        assert!(matches!(a.config, ConfigFile::Search));
    }

    #[test]
    fn file_positional() {
        let a = parse_argv(&argv(&["Main.kt"])).unwrap();
        assert_eq!(a.file, Some(PathBuf::from("Main.kt")));
    }

    #[test]
    fn dash_means_stdin() {
        let a = parse_argv(&argv(&["-"])).unwrap();
        assert_eq!(a.file, None);
    }

    #[test]
    fn bool_flags() {
        let a = parse_argv(&argv(&["-j", "-t", "-n", "-d"])).unwrap();
        assert!(a.json && a.timing && a.no_color && a.debug);
    }

    #[test]
    fn combined_bool_flags() {
        let a = parse_argv(&argv(&["-jtnd"])).unwrap();
        assert!(a.json && a.timing && a.no_color && a.debug);
    }

    #[test]
    fn language_embedded_and_separate() {
        let a = parse_argv(&argv(&["-lpy"])).unwrap();
        assert_eq!(a.language, Some(Language::Python));
        let a = parse_argv(&argv(&["-l", "Swift"])).unwrap();
        assert_eq!(a.language, Some(Language::Swift));
    }

    #[test]
    fn language_after_flags_in_one_arg() {
        let a = parse_argv(&argv(&["-jlkotlin"])).unwrap();
        assert!(a.json);
        assert_eq!(a.language, Some(Language::Kotlin));
    }

    #[test]
    fn unknown_language() {
        let err = parse_argv(&argv(&["-lcobol"])).unwrap_err();
        assert_eq!(err, "Language 'cobol' is not supported");
    }

    #[test]
    fn code_embedded_and_separate() {
        let a = parse_argv(&argv(&["-cprint(1)"])).unwrap();
        assert_eq!(a.code.as_deref(), Some("print(1)"));
        let a = parse_argv(&argv(&["-c", "-x"])).unwrap();
        assert_eq!(a.code.as_deref(), Some("-x"));
    }

    #[test]
    fn code_missing_argument() {
        assert!(parse_argv(&argv(&["-c"])).is_err());
    }

    #[test]
    fn config_skip() {
        let a = parse_argv(&argv(&["-f"])).unwrap();
        assert!(matches!(a.config, ConfigFile::Skip));
    }

    #[test]
    fn config_explicit() {
        let a = parse_argv(&argv(&["-fmy.rc", "snippet.py"])).unwrap();
        assert!(matches!(&a.config, ConfigFile::Explicit(p) if p == &PathBuf::from("my.rc")));
        assert_eq!(a.file, Some(PathBuf::from("snippet.py")));
    }

    #[test]
    fn code_and_file_conflict() {
        assert!(parse_argv(&argv(&["-cprint(1)", "a.py"])).is_err());
    }

    #[test]
    fn too_many_positional() {
        assert!(parse_argv(&argv(&["a", "b"])).is_err());
    }

    #[test]
    fn unknown_flag() {
        assert!(parse_argv(&argv(&["-z"])).is_err());
    }

    #[test]
    fn config_candidates_end_with_cwd() {
        let c = user_config_candidates();
        assert_eq!(c.last(), Some(&PathBuf::from("./.snipsimrc")));
    }
}
