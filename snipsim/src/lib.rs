pub mod bindings;
pub mod cli;
pub mod config;
pub mod lang;
pub mod pattern;
pub mod render;
pub mod snippet;

pub use bindings::Bindings;
pub use lang::Language;
pub use snippet::{simulate, simulate_named, ExecutionResult};
