//! Snippet simulation pipeline.
//!
//! Turns a short source snippet into the console transcript it would most
//! plausibly print, using pattern matching rather than compilation:
//!
//! - [`extract`]: literal declarations (`val name = "World"`)
//! - [`calls`]: user-function call sites and console-output calls
//! - [`expr`]: the three expression shapes (arithmetic, equality, `+` concatenation)
//! - [`interpolate`]: template markers (`$name`, `${…}`, `{…}`, `\(…)`)
//! - [`simulate`]: the entry point tying the above together
//!
//! # Quick start
//!
//! ```rust
//! use snipsim::{simulate, Language};
//!
//! let r = simulate("val name = \"World\"\nprintln(\"Hello, ${name}!\")", Language::Kotlin);
//! assert!(r.success);
//! assert_eq!(r.output, "Hello, World!");
//! ```

pub mod calls;
pub mod dialect;
pub mod expr;
pub mod extract;
pub mod interpolate;
pub mod simulate;
pub mod source;
pub mod value;

// Re-exports for convenience.
pub use expr::evaluate;
pub use extract::extract;
pub use interpolate::{interpolate, Interpolate};
pub use simulate::{resolve_bindings, simulate, simulate_named, ExecutionResult, SimulateError};
