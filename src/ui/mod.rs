//! Terminal User Interface module.
//!
//! - `loop_runner` - Main event loop, background fetches, terminal management
//! - `input` - Keyboard input handling
//! - `render` - Layout
//! - `articles` - Article list widget
//! - `status` - Status bar widget

mod articles;
mod input;
mod loop_runner;
mod render;
mod status;

pub use articles::plain_line;
pub use loop_runner::{run, Action};
