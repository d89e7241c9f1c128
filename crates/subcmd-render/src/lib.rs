//! # Subcmd Render - Output for command results
//!
//! `subcmd-render` turns what a command returned into terminal text. It is
//! the output collaborator of the `subcmd` framework but has no dependency
//! on it: results come in as `serde_json::Value`s.
//!
//! ## Core Concepts
//!
//! - [`Output`]: renders values line by line, and domain errors as one
//!   highlighted line
//! - [`Theme`]: named `console` styles for keys, errors and namespace headers
//! - [`ColorChoice`]: whether to emit ANSI styling
//! - [`min_width`]: column padding by display width
//!
//! ## Quick Start
//!
//! ```rust
//! use subcmd_render::{Output, Theme};
//! use serde_json::json;
//!
//! let output = Output::new(Theme::default(), false);
//! assert_eq!(output.render(&json!(["a", "b"])), "a\nb\n");
//! assert_eq!(output.render(&json!(null)), "");
//! assert_eq!(output.render_error("bad input"), "bad input\n");
//! ```

mod output;
mod theme;
mod util;

pub use output::{scalar_text, Output, KEY_WIDTH};
pub use theme::{ColorChoice, Theme, ERROR, KEY, NAMESPACE};
pub use util::{display_width, min_width};
