//! Markdown parsing and rendering for model prose.

pub mod ir;
pub mod renderer;

pub use ir::{flatten_text, parse, MarkdownNode};
pub use renderer::Renderer;
