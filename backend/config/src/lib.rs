//! `tutorforge-config` — TutorForge runtime configuration management.
//!
//! Provides:
//! - Typed config schema (API access, solve defaults, rendering, logging)
//! - JSON read/write with atomic backup
//! - `${ENV_VAR}` substitution
//! - RFC 7396 merge patching for partial edits

pub mod env;
pub mod io;
pub mod schema;

// Re-export most-used types at crate root.
pub use env::{resolve_references, resolve_references_with, MissingEnvVarError};
pub use io::{
    apply_merge_patch, config_dir, config_file_path, load_config, load_config_raw, write_config,
};
pub use schema::{ApiConfig, DefaultsConfig, LoggingConfig, RenderConfig, TutorConfig};
