use std::io::{self, Read};
use std::process::ExitCode;

use snipsim::cli::{self, CliArgs, ConfigFile};
use snipsim::config::{Config, OutputFormat};
use snipsim::render::{self, RenderOptions};
use snipsim::{simulate, Language};

fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("snipsim: {e}");
            eprintln!("{}", cli::USAGE);
            return ExitCode::from(2);
        }
    };

    init_tracing(args.debug);

    // ── Load user config ──────────────────────────────────────────────────────
    let config = match &args.config {
        ConfigFile::Skip => Config::default(),
        ConfigFile::Explicit(path) => match Config::load_file(path) {
            Ok((cfg, errors)) => {
                warn_config(&path.display().to_string(), &errors);
                cfg
            }
            Err(e) => {
                eprintln!("snipsim: {}: {e}", path.display());
                return ExitCode::from(2);
            }
        },
        ConfigFile::Search => match cli::find_user_config() {
            Some(path) => match Config::load_file(&path) {
                Ok((cfg, errors)) => {
                    warn_config(&path.display().to_string(), &errors);
                    cfg
                }
                Err(e) => {
                    eprintln!("snipsim: warning: {}: {e}", path.display());
                    Config::default()
                }
            },
            None => Config::default(),
        },
    };

    let Some(language) = resolve_language(&args, &config) else {
        eprintln!("snipsim: no language given (use -l<lang> or a file extension)");
        eprintln!("{}", cli::USAGE);
        return ExitCode::from(2);
    };

    // ── Read the snippet ──────────────────────────────────────────────────────
    let source = match read_source(&args) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("snipsim: {e}");
            return ExitCode::from(2);
        }
    };

    let result = simulate(&source, language);

    let opts = RenderOptions {
        format: if args.json { OutputFormat::Json } else { config.format },
        styled: !args.no_color
            && RenderOptions::styled_for(config.color, render::is_tty(libc::STDERR_FILENO)),
        timing: args.timing || config.timing,
    };
    if let Err(e) = render::render(&result, opts, &mut io::stdout(), &mut io::stderr()) {
        eprintln!("snipsim: {e}");
        return ExitCode::FAILURE;
    }

    if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Install a stderr `fmt` subscriber when `RUST_LOG` is set or `-d` was given.
fn init_tracing(debug: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if debug {
        EnvFilter::new("snipsim=debug")
    } else {
        return;
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(true).with_level(true))
        .with(filter)
        .init();
}

fn warn_config(path: &str, errors: &[snipsim::config::ConfigError]) {
    for e in errors {
        eprintln!("snipsim: warning: {path}: {e}");
    }
}

fn read_source(args: &CliArgs) -> io::Result<String> {
    if let Some(code) = &args.code {
        return Ok(code.clone());
    }
    match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| io::Error::new(e.kind(), format!("{}: {e}", path.display()))),
        None => {
            let mut s = String::new();
            io::stdin().read_to_string(&mut s)?;
            Ok(s)
        }
    }
}

/// `-l` first, then the snippet file's extension, then the config default.
fn resolve_language(args: &CliArgs, config: &Config) -> Option<Language> {
    args.language
        .or_else(|| args.file.as_deref().and_then(Language::from_path))
        .or(config.language)
}
