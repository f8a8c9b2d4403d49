//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source code with keyword highlighting, the selected token and the error column
//! - [`tokens`]: Scrollable token list with the current selection
//! - [`tree`]: Syntax tree outline, or the diagnostic of a rejected program
//! - [`status`]: Status bar with the verdict and keybindings
//!
//! Each module exports a primary `render_*` function plus the small state
//! types it needs to keep scrolling stable between frames.

pub mod source;
pub mod status;
pub mod tokens;
pub mod tree;

pub use source::{render_source_pane, SourceMarks, SourceScrollState};
pub use status::render_status_bar;
pub use tokens::render_token_pane;
pub use tree::{render_tree_pane, TreeView};
