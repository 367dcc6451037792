//! Markdown-backed prose engines.
//!
//! A prose segment is usually a fragment of a larger field, not a standalone
//! document. A fragment that parses to a single paragraph is rendered inline
//! with its surrounding whitespace preserved, so the flow around neighboring
//! math segments survives. Multi-block fragments get full block layout.

use tutorforge_markdown::{parse, MarkdownNode, Renderer};

use crate::engine::ProseEngine;

/// Prose with ANSI styling for markdown emphasis, code, and structure.
pub struct AnsiProse;

impl ProseEngine for AnsiProse {
    fn render(&self, prose: &str) -> String {
        render_fragment(prose, Renderer::to_ansi)
    }
}

/// Prose with markdown marks resolved but no styling.
pub struct PlainProse;

impl ProseEngine for PlainProse {
    fn render(&self, prose: &str) -> String {
        render_fragment(prose, Renderer::to_plain_text)
    }
}

fn render_fragment(prose: &str, render: fn(&[MarkdownNode]) -> String) -> String {
    let body = prose.trim_start();
    let prefix = &prose[..prose.len() - body.len()];
    let trimmed = body.trim_end();
    let suffix = &body[trimmed.len()..];
    if trimmed.is_empty() {
        return prose.to_string();
    }
    let nodes = parse(trimmed);
    format!("{}{}{}", prefix, render(&nodes), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_resolves_emphasis_marks() {
        assert_eq!(PlainProse.render("The **area** is"), "The area is");
    }

    #[test]
    fn test_surrounding_whitespace_preserved() {
        assert_eq!(PlainProse.render(" now"), " now");
        assert_eq!(PlainProse.render("Solve "), "Solve ");
    }

    #[test]
    fn test_whitespace_only_fragment_unchanged() {
        assert_eq!(PlainProse.render(" "), " ");
        assert_eq!(PlainProse.render("\n"), "\n");
    }

    #[test]
    fn test_ansi_styles_bold() {
        let rendered = AnsiProse.render("a **key** step");
        assert!(rendered.contains("\x1b[1mkey\x1b[0m"));
    }

    #[test]
    fn test_multi_paragraph_fragment_keeps_break() {
        assert_eq!(PlainProse.render("One.\n\nTwo."), "One.\n\nTwo.");
    }

    #[test]
    fn test_literal_dollar_fragment_untouched() {
        assert_eq!(PlainProse.render("$"), "$");
    }
}
