//! `config` command: inspect and edit the stored configuration.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;
use tutorforge_config::{apply_merge_patch, load_config_raw, write_config};
use tutorforge_logging::redact_sensitive;

use crate::terminal;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the stored config with secrets redacted
    Show,
    /// Merge a JSON patch into the config; null values delete keys
    Set {
        /// e.g. '{"api":{"model":"gemini-2.5-pro"}}'
        patch: String,
    },
}

pub async fn run(cmd: ConfigCommands, path: &Path) -> Result<()> {
    match cmd {
        ConfigCommands::Show => {
            let config = load_config_raw(path).await?;
            let json = serde_json::to_string_pretty(&config)?;
            println!("{}", redact_sensitive(&json));
        }
        ConfigCommands::Set { patch } => {
            let patch: serde_json::Value =
                serde_json::from_str(&patch).context("Patch must be valid JSON")?;
            let config = load_config_raw(path).await?;
            let updated = apply_merge_patch(&config, &patch)?;
            write_config(&updated, path).await?;
            terminal::note_success("Config updated");
        }
    }
    Ok(())
}
