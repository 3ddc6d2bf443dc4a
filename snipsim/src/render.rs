//! Printing an [`ExecutionResult`].
//!
//! Text mode writes the transcript to the output stream and the failure
//! message (red, when styling is on) to the error stream.  JSON mode writes
//! the whole result as one object to the output stream.

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Color, ContentStyle, Print, ResetColor, SetStyle},
};

use crate::config::{ColorMode, OutputFormat};
use crate::snippet::ExecutionResult;

/// Rendering options resolved from config and flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Style error text with ANSI colour.
    pub styled: bool,
    /// Append the elapsed time to text output.
    pub timing: bool,
}

impl RenderOptions {
    /// Whether `mode` means styled output on a terminal that is / is not a TTY.
    pub fn styled_for(mode: ColorMode, is_tty: bool) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => is_tty,
        }
    }
}

/// Whether file descriptor `fd` refers to a terminal.
pub fn is_tty(fd: libc::c_int) -> bool {
    // SAFETY: isatty only inspects the descriptor.
    unsafe { libc::isatty(fd) != 0 }
}

/// Write `result` according to `opts`.
pub fn render(
    result: &ExecutionResult,
    opts: RenderOptions,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<()> {
    match opts.format {
        OutputFormat::Json => render_json(result, out),
        OutputFormat::Text => render_text(result, opts, out, err),
    }
}

fn render_json(result: &ExecutionResult, out: &mut impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, result)?;
    writeln!(out)
}

fn render_text(
    result: &ExecutionResult,
    opts: RenderOptions,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<()> {
    if result.success {
        writeln!(out, "{}", result.output)?;
    } else {
        let message = result.error_message.as_deref().unwrap_or("simulation failed");
        if opts.styled {
            let style = ContentStyle {
                foreground_color: Some(Color::Red),
                ..ContentStyle::new()
            };
            queue!(err, SetStyle(style), Print(message), ResetColor, Print('\n'))?;
        } else {
            writeln!(err, "{message}")?;
        }
    }
    if opts.timing {
        writeln!(err, "({} ms)", result.execution_time_ms)?;
    }
    out.flush()?;
    err.flush()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(output: &str) -> ExecutionResult {
        ExecutionResult {
            success: true,
            output: output.to_owned(),
            error_message: None,
            execution_time_ms: 2,
        }
    }

    fn failed(msg: &str) -> ExecutionResult {
        ExecutionResult {
            success: false,
            output: String::new(),
            error_message: Some(msg.to_owned()),
            execution_time_ms: 0,
        }
    }

    fn run(result: &ExecutionResult, opts: RenderOptions) -> (String, String) {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        render(result, opts, &mut out, &mut err).unwrap();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn text_success() {
        let (out, err) = run(&ok("a\nb"), RenderOptions::default());
        assert_eq!(out, "a\nb\n");
        assert_eq!(err, "");
    }

    #[test]
    fn text_failure_plain() {
        let (out, err) = run(&failed("nope"), RenderOptions::default());
        assert_eq!(out, "");
        assert_eq!(err, "nope\n");
    }

    #[test]
    fn text_failure_styled() {
        let opts = RenderOptions {
            styled: true,
            ..RenderOptions::default()
        };
        let (_, err) = run(&failed("nope"), opts);
        assert!(err.contains("nope"));
        assert!(err.contains('\x1b'), "expected ANSI escapes in {err:?}");
    }

    #[test]
    fn timing_goes_to_stderr() {
        let opts = RenderOptions {
            timing: true,
            ..RenderOptions::default()
        };
        let (out, err) = run(&ok("x"), opts);
        assert_eq!(out, "x\n");
        assert_eq!(err, "(2 ms)\n");
    }

    #[test]
    fn json_fields() {
        let opts = RenderOptions {
            format: OutputFormat::Json,
            ..RenderOptions::default()
        };
        let (out, _) = run(&failed("bad"), opts);
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["success"], false);
        assert_eq!(v["errorMessage"], "bad");
        assert_eq!(v["executionTimeMs"], 0);
    }

    #[test]
    fn color_mode_resolution() {
        assert!(RenderOptions::styled_for(ColorMode::Always, false));
        assert!(!RenderOptions::styled_for(ColorMode::Never, true));
        assert!(RenderOptions::styled_for(ColorMode::Auto, true));
        assert!(!RenderOptions::styled_for(ColorMode::Auto, false));
    }
}
