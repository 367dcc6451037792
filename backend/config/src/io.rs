//! Config file read/write with atomic backup.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::env::resolve_references;
use crate::schema::TutorConfig;

const CONFIG_FILE_NAME: &str = "config.json";

/// Resolve the TutorForge config directory.
/// Priority: `TUTORFORGE_CONFIG_DIR` env > `~/.tutorforge/`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("TUTORFORGE_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".tutorforge");
    }
    PathBuf::from(".tutorforge")
}

/// Resolve the full path to the main config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Load the config with `${VAR}` references resolved.
///
/// Returns `Ok(Default::default())` if the file doesn't exist (first run).
pub async fn load_config(path: &Path) -> Result<TutorConfig> {
    let Some(value) = read_value(path).await? else {
        return Ok(TutorConfig::default());
    };

    let resolved = resolve_references(&value)?;
    let config: TutorConfig = serde_json::from_value(resolved)
        .with_context(|| format!("Config did not match schema at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Load without resolving references. Editing flows go through this so
/// `${VAR}` placeholders survive a save instead of being baked in.
pub async fn load_config_raw(path: &Path) -> Result<TutorConfig> {
    let Some(value) = read_value(path).await? else {
        return Ok(TutorConfig::default());
    };

    serde_json::from_value(value)
        .with_context(|| format!("Config did not match schema at: {}", path.display()))
}

async fn read_value(path: &Path) -> Result<Option<Value>> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(None);
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let value = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse config JSON at: {}", path.display()))?;
    Ok(Some(value))
}

/// Write config to disk atomically (write to temp file, rename).
///
/// The previous file is kept as a `.bak` sibling.
pub async fn write_config(config: &TutorConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.with_context(|| {
            format!("Failed to create config directory: {}", parent.display())
        })?;
    }

    if path.exists() {
        let bak = path.with_extension("json.bak");
        if let Err(e) = fs::copy(path, &bak).await {
            warn!("Failed to back up config {}: {}", bak.display(), e);
        }
    }

    let json = serde_json::to_string_pretty(config)
        .context("Failed to serialize config to JSON")?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json.as_bytes())
        .await
        .with_context(|| format!("Failed to write temp config: {}", tmp_path.display()))?;

    fs::rename(&tmp_path, path).await.with_context(|| {
        format!("Failed to rename temp config to: {}", path.display())
    })?;

    info!(path = %path.display(), "Wrote config");
    Ok(())
}

/// Patch config with a JSON Merge Patch (RFC 7396).
///
/// The patch is applied to the serialized JSON of the config, then
/// deserialized back. `null` values delete the key they target.
pub fn apply_merge_patch(config: &TutorConfig, patch: &Value) -> Result<TutorConfig> {
    let mut value = serde_json::to_value(config)
        .context("Failed to serialize config for merge patch")?;
    json_merge_patch(&mut value, patch);
    let updated: TutorConfig = serde_json::from_value(value)
        .context("Failed to deserialize config after merge patch")?;
    Ok(updated)
}

fn json_merge_patch(target: &mut Value, patch: &Value) {
    match patch {
        Value::Object(patch_map) => {
            if !target.is_object() {
                *target = Value::Object(serde_json::Map::new());
            }
            if let Value::Object(target_map) = target {
                for (key, patch_value) in patch_map {
                    if patch_value.is_null() {
                        target_map.remove(key);
                    } else {
                        let slot = target_map.entry(key.clone()).or_insert(Value::Null);
                        json_merge_patch(slot, patch_value);
                    }
                }
            }
        }
        replacement => *target = replacement.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ApiConfig, RenderConfig};

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "tutorforge-config-{}-{}.json",
            name,
            std::process::id()
        ))
    }

    #[tokio::test]
    async fn test_missing_file_loads_defaults() {
        let config = load_config(&scratch_file("missing")).await.unwrap();
        assert!(config.api.is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_roundtrip() {
        let path = scratch_file("roundtrip");
        let mut config = TutorConfig::default();
        config.render = Some(RenderConfig { color: Some(true) });
        write_config(&config, &path).await.unwrap();

        let reloaded = load_config(&path).await.unwrap();
        assert_eq!(reloaded.render.unwrap().color, Some(true));

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_unset_reference_fails_load_but_not_raw_load() {
        let path = scratch_file("reference");
        let mut config = TutorConfig::default();
        config.api = Some(ApiConfig {
            gemini_api_key: Some("${TUTORFORGE_UNSET_TEST_VAR}".to_string()),
            ..Default::default()
        });
        write_config(&config, &path).await.unwrap();

        assert!(load_config(&path).await.is_err());
        let raw = load_config_raw(&path).await.unwrap();
        assert_eq!(
            raw.api.unwrap().gemini_api_key.as_deref(),
            Some("${TUTORFORGE_UNSET_TEST_VAR}")
        );

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_merge_patch_adds_key() {
        let base: TutorConfig = Default::default();
        let patch = serde_json::json!({ "logging": { "level": "debug" } });
        let result = apply_merge_patch(&base, &patch).unwrap();
        assert_eq!(result.logging.unwrap().level.unwrap(), "debug");
    }

    #[test]
    fn test_merge_patch_removes_key() {
        let mut base: TutorConfig = Default::default();
        base.defaults = Some(crate::schema::DefaultsConfig {
            mode: Some("exam".to_string()),
            ..Default::default()
        });
        let patch = serde_json::json!({ "defaults": null });
        let result = apply_merge_patch(&base, &patch).unwrap();
        assert!(result.defaults.is_none());
    }

    #[test]
    fn test_merge_patch_keeps_siblings() {
        let mut base: TutorConfig = Default::default();
        base.api = Some(ApiConfig {
            gemini_api_key: Some("abc".to_string()),
            model: Some("gemini-2.5-flash".to_string()),
            ..Default::default()
        });
        let patch = serde_json::json!({ "api": { "model": "gemini-2.5-pro" } });
        let result = apply_merge_patch(&base, &patch).unwrap();
        let api = result.api.unwrap();
        assert_eq!(api.gemini_api_key.as_deref(), Some("abc"));
        assert_eq!(api.model.as_deref(), Some("gemini-2.5-pro"));
    }
}
