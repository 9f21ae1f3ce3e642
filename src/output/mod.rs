//! Tree output sinks
//!
//! - `streaming` - styled console output via `termcolor`
//! - `json` - rendered lines as JSON
//! - `style` - category to colour mapping

mod config;
mod json;
mod streaming;
mod style;

pub use config::OutputConfig;
pub use json::{JsonFormatter, JsonFragment, print_json};
pub use streaming::StreamingFormatter;
pub use style::style_for;
