//! Render the markdown tree for a target surface.

use crate::ir::{flatten_text, MarkdownNode};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const ITALIC: &str = "\x1b[3m";
const UNDERLINE: &str = "\x1b[4m";
const CYAN: &str = "\x1b[36m";

pub struct Renderer;

impl Renderer {
    /// Flat text with minimal structure. Used for speech scripts and for
    /// terminals without color support.
    pub fn to_plain_text(nodes: &[MarkdownNode]) -> String {
        let mut out = String::new();
        for node in nodes {
            Self::plain_block(node, 0, &mut out);
        }
        out.trim_end().to_string()
    }

    /// Terminal output with ANSI styling.
    pub fn to_ansi(nodes: &[MarkdownNode]) -> String {
        let mut out = String::new();
        for node in nodes {
            Self::ansi_block(node, 0, &mut out);
        }
        out.trim_end().to_string()
    }

    fn plain_block(node: &MarkdownNode, indent: usize, out: &mut String) {
        let pad = "  ".repeat(indent);
        match node {
            MarkdownNode::Heading(_, children) => {
                out.push_str(&pad);
                out.push_str(&flatten_text(children));
                out.push_str("\n\n");
            }
            MarkdownNode::Paragraph(children) => {
                out.push_str(&pad);
                Self::plain_inline(children, out);
                out.push_str("\n\n");
            }
            MarkdownNode::CodeBlock(_, content) => {
                for line in content.lines() {
                    out.push_str(&pad);
                    out.push_str(line);
                    out.push('\n');
                }
                out.push('\n');
            }
            MarkdownNode::List(items) => {
                for item in items {
                    Self::plain_block(item, indent, out);
                }
                out.push('\n');
            }
            MarkdownNode::ListItem(children) => {
                out.push_str(&pad);
                out.push_str("- ");
                Self::plain_inline(children, out);
                out.push('\n');
            }
            MarkdownNode::Blockquote(children) => {
                for child in children {
                    Self::plain_block(child, indent + 1, out);
                }
            }
            MarkdownNode::Rule => {
                out.push_str(&pad);
                out.push_str("---\n\n");
            }
            // Bare inline content at the top level.
            other => {
                Self::plain_inline(std::slice::from_ref(other), out);
                out.push('\n');
            }
        }
    }

    fn plain_inline(nodes: &[MarkdownNode], out: &mut String) {
        for node in nodes {
            match node {
                MarkdownNode::Text(text) => out.push_str(text),
                MarkdownNode::InlineCode(code) => out.push_str(code),
                MarkdownNode::Emphasis(children) | MarkdownNode::Strong(children) => {
                    Self::plain_inline(children, out)
                }
                MarkdownNode::Link(_, children) => Self::plain_inline(children, out),
                MarkdownNode::ListItem(children) => Self::plain_inline(children, out),
                other => out.push_str(&flatten_text(std::slice::from_ref(other))),
            }
        }
    }

    fn ansi_block(node: &MarkdownNode, indent: usize, out: &mut String) {
        let pad = "  ".repeat(indent);
        match node {
            MarkdownNode::Heading(level, children) => {
                let style = if *level <= 2 {
                    format!("{}{}", BOLD, UNDERLINE)
                } else {
                    BOLD.to_string()
                };
                out.push_str(&pad);
                out.push_str(&style);
                out.push_str(&flatten_text(children));
                out.push_str(RESET);
                out.push_str("\n\n");
            }
            MarkdownNode::Paragraph(children) => {
                out.push_str(&pad);
                Self::ansi_inline(children, out);
                out.push_str("\n\n");
            }
            MarkdownNode::CodeBlock(_, content) => {
                for line in content.lines() {
                    out.push_str(&pad);
                    out.push_str("    ");
                    out.push_str(DIM);
                    out.push_str(line);
                    out.push_str(RESET);
                    out.push('\n');
                }
                out.push('\n');
            }
            MarkdownNode::List(items) => {
                for item in items {
                    Self::ansi_block(item, indent, out);
                }
                out.push('\n');
            }
            MarkdownNode::ListItem(children) => {
                out.push_str(&pad);
                out.push_str(&format!("{}-{} ", DIM, RESET));
                Self::ansi_inline(children, out);
                out.push('\n');
            }
            MarkdownNode::Blockquote(children) => {
                let mut inner = String::new();
                for child in children {
                    Self::ansi_block(child, 0, &mut inner);
                }
                for line in inner.trim_end().lines() {
                    out.push_str(&pad);
                    out.push_str(DIM);
                    out.push_str("| ");
                    out.push_str(RESET);
                    out.push_str(line);
                    out.push('\n');
                }
                out.push('\n');
            }
            MarkdownNode::Rule => {
                out.push_str(&pad);
                out.push_str(DIM);
                out.push_str("----------------------------------------");
                out.push_str(RESET);
                out.push_str("\n\n");
            }
            other => {
                Self::ansi_inline(std::slice::from_ref(other), out);
                out.push('\n');
            }
        }
    }

    fn ansi_inline(nodes: &[MarkdownNode], out: &mut String) {
        for node in nodes {
            match node {
                MarkdownNode::Text(text) => out.push_str(text),
                MarkdownNode::InlineCode(code) => {
                    out.push_str(CYAN);
                    out.push_str(code);
                    out.push_str(RESET);
                }
                MarkdownNode::Emphasis(children) => {
                    out.push_str(ITALIC);
                    Self::ansi_inline(children, out);
                    out.push_str(RESET);
                }
                MarkdownNode::Strong(children) => {
                    out.push_str(BOLD);
                    Self::ansi_inline(children, out);
                    out.push_str(RESET);
                }
                MarkdownNode::Link(url, children) => {
                    Self::ansi_inline(children, out);
                    out.push_str(&format!(" {}({}){}", DIM, url, RESET));
                }
                MarkdownNode::ListItem(children) => Self::ansi_inline(children, out),
                other => out.push_str(&flatten_text(std::slice::from_ref(other))),
            }
        }
    }
}
