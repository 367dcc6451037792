//! Intermediate representation for model-authored markdown.
//!
//! Prose coming back from the model is CommonMark with light formatting
//! (headings, emphasis, lists, the occasional code block). We parse it once
//! into a small node tree and let the renderers decide how each node looks
//! on a given surface.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Parser, Tag};
use serde::{Deserialize, Serialize};

/// A node in the markdown tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarkdownNode {
    /// Heading with level (1-6) and inline content.
    Heading(u32, Vec<MarkdownNode>),
    /// Paragraph of inline content.
    Paragraph(Vec<MarkdownNode>),
    /// Plain text run.
    Text(String),
    /// Emphasized (italic) span.
    Emphasis(Vec<MarkdownNode>),
    /// Strong (bold) span.
    Strong(Vec<MarkdownNode>),
    /// Inline code span.
    InlineCode(String),
    /// Fenced or indented code block: language tag and content.
    CodeBlock(String, String),
    /// List of items.
    List(Vec<MarkdownNode>),
    /// Single list item.
    ListItem(Vec<MarkdownNode>),
    /// Block quote.
    Blockquote(Vec<MarkdownNode>),
    /// Link with destination URL and label content.
    Link(String, Vec<MarkdownNode>),
    /// Thematic break.
    Rule,
}

/// Open container on the parse stack. Each `Start` event pushes one of
/// these; the matching `End` pops it and wraps the collected children.
enum Container {
    Heading(u32),
    Paragraph,
    Emphasis,
    Strong,
    CodeBlock(String),
    List,
    ListItem,
    Blockquote,
    Link(String),
    Image,
    /// Tag we do not model. Children are spliced into the parent so the
    /// stack stays balanced.
    Transparent,
}

/// Parse markdown text into a node tree.
pub fn parse(markdown: &str) -> Vec<MarkdownNode> {
    let mut root: Vec<MarkdownNode> = Vec::new();
    let mut stack: Vec<(Container, Vec<MarkdownNode>)> = Vec::new();

    let push = |stack: &mut Vec<(Container, Vec<MarkdownNode>)>,
                root: &mut Vec<MarkdownNode>,
                node: MarkdownNode| {
        match stack.last_mut() {
            Some((_, children)) => children.push(node),
            None => root.push(node),
        }
    };

    for event in Parser::new(markdown) {
        match event {
            Event::Start(tag) => stack.push((open_container(tag), Vec::new())),
            Event::End(_) => {
                let Some((container, children)) = stack.pop() else {
                    continue;
                };
                let node = match container {
                    Container::Heading(level) => MarkdownNode::Heading(level, children),
                    Container::Paragraph => MarkdownNode::Paragraph(children),
                    Container::Emphasis => MarkdownNode::Emphasis(children),
                    Container::Strong => MarkdownNode::Strong(children),
                    Container::CodeBlock(lang) => {
                        MarkdownNode::CodeBlock(lang, flatten_text(&children))
                    }
                    Container::List => MarkdownNode::List(children),
                    Container::ListItem => MarkdownNode::ListItem(children),
                    Container::Blockquote => MarkdownNode::Blockquote(children),
                    Container::Link(url) => MarkdownNode::Link(url, children),
                    // Images degrade to their alt text.
                    Container::Image => MarkdownNode::Text(flatten_text(&children)),
                    Container::Transparent => {
                        for child in children {
                            push(&mut stack, &mut root, child);
                        }
                        continue;
                    }
                };
                push(&mut stack, &mut root, node);
            }
            Event::Text(text) => {
                push(&mut stack, &mut root, MarkdownNode::Text(text.to_string()))
            }
            Event::Code(code) => push(
                &mut stack,
                &mut root,
                MarkdownNode::InlineCode(code.to_string()),
            ),
            Event::SoftBreak => {
                push(&mut stack, &mut root, MarkdownNode::Text(" ".to_string()))
            }
            Event::HardBreak => {
                push(&mut stack, &mut root, MarkdownNode::Text("\n".to_string()))
            }
            Event::Rule => push(&mut stack, &mut root, MarkdownNode::Rule),
            Event::Html(html) => {
                push(&mut stack, &mut root, MarkdownNode::Text(html.to_string()))
            }
            Event::FootnoteReference(_) | Event::TaskListMarker(_) => {}
        }
    }

    // Unterminated containers at EOF still carry content worth keeping.
    while let Some((container, children)) = stack.pop() {
        let node = match container {
            Container::Heading(level) => MarkdownNode::Heading(level, children),
            Container::Paragraph => MarkdownNode::Paragraph(children),
            Container::CodeBlock(lang) => MarkdownNode::CodeBlock(lang, flatten_text(&children)),
            _ => MarkdownNode::Paragraph(children),
        };
        push(&mut stack, &mut root, node);
    }

    root
}

fn open_container(tag: Tag<'_>) -> Container {
    match tag {
        Tag::Heading(level, _, _) => Container::Heading(heading_level(level)),
        Tag::Paragraph => Container::Paragraph,
        Tag::Emphasis => Container::Emphasis,
        Tag::Strong => Container::Strong,
        Tag::CodeBlock(CodeBlockKind::Fenced(lang)) => Container::CodeBlock(lang.to_string()),
        Tag::CodeBlock(CodeBlockKind::Indented) => Container::CodeBlock(String::new()),
        Tag::List(_) => Container::List,
        Tag::Item => Container::ListItem,
        Tag::BlockQuote => Container::Blockquote,
        Tag::Link(_, url, _) => Container::Link(url.to_string()),
        Tag::Image(_, _, _) => Container::Image,
        _ => Container::Transparent,
    }
}

fn heading_level(level: HeadingLevel) -> u32 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Concatenate the raw text of a subtree, ignoring structure.
pub fn flatten_text(nodes: &[MarkdownNode]) -> String {
    let mut out = String::new();
    collect_text(nodes, &mut out);
    out
}

fn collect_text(nodes: &[MarkdownNode], out: &mut String) {
    for node in nodes {
        match node {
            MarkdownNode::Text(text) | MarkdownNode::InlineCode(text) => out.push_str(text),
            MarkdownNode::CodeBlock(_, content) => out.push_str(content),
            MarkdownNode::Heading(_, children)
            | MarkdownNode::Paragraph(children)
            | MarkdownNode::Emphasis(children)
            | MarkdownNode::Strong(children)
            | MarkdownNode::List(children)
            | MarkdownNode::ListItem(children)
            | MarkdownNode::Blockquote(children)
            | MarkdownNode::Link(_, children) => collect_text(children, out),
            MarkdownNode::Rule => {}
        }
    }
}
