//! `segment` command: show how text splits into prose and math runs.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tutorforge_mathtext::{normalize, segment, Segment};

use crate::terminal::{render_table, Column, CYAN, RESET};

pub async fn run(
    text: Option<String>,
    file: Option<PathBuf>,
    json: bool,
    color: bool,
) -> Result<()> {
    let input = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, None) => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        }
    };

    let normalized = normalize(&input);
    let segments: Vec<Segment> = segment(&normalized).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&segments)?);
        return Ok(());
    }

    let rows: Vec<Vec<String>> = segments
        .iter()
        .map(|seg| {
            let kind = match seg {
                Segment::Prose { .. } => "prose",
                Segment::InlineMath { .. } => "inline_math",
                Segment::BlockMath { .. } => "block_math",
            };
            let kind = if color && seg.is_math() {
                format!("{}{}{}", CYAN, kind, RESET)
            } else {
                kind.to_string()
            };
            let shown = match seg {
                Segment::Prose { text } => text.clone(),
                other => other.formula().unwrap_or_default().to_string(),
            };
            vec![kind, format!("{:?}", shown)]
        })
        .collect();

    print!(
        "{}",
        render_table(&[Column::left("Kind"), Column::left("Text")], &rows)
    );
    Ok(())
}
