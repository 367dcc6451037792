//! `decode` command: run the resilient decoder over a saved model response.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tutorforge_solution::decode;

pub async fn run(file: Option<PathBuf>, pretty: bool) -> Result<()> {
    let raw = match file {
        Some(path) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        }
    };

    let document = decode(&raw)?;
    let json = if pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    println!("{}", json);
    Ok(())
}
