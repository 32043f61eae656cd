//! Site configuration flags that gate generation.
//!
//! Values are layered with `figment`: built-in defaults, then the bench's
//! `common_site_config.json`, then `FRAPPE_TYPES_`-prefixed environment
//! variables. `FRAPPE_TYPES_DEVELOPER_MODE` and
//! `FRAPPE_TYPES_PAUSE_GENERATION` override the two keys this crate reads.

use camino::Utf8Path;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized};
use figment::value::{Uncased, UncasedStr};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::error::TypegenError;
use crate::flag::deserialize_flag;
use crate::fs_helpers::{ensure_dir, read_optional};
use crate::output::write_if_changed;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "FRAPPE_TYPES_";

/// Site config key holding the pause flag.
pub const PAUSE_KEY: &str = "frappe_types_pause_generation";

/// Flags read from the site configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Whether the site runs in developer mode.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub developer_mode: bool,
    /// Whether generation is paused, typically during a migration.
    #[serde(
        rename = "frappe_types_pause_generation",
        default,
        deserialize_with = "deserialize_flag"
    )]
    pub pause_generation: bool,
}

impl SiteConfig {
    /// Loads the layered configuration, reading `path` when it exists.
    ///
    /// # Errors
    ///
    /// Returns [`TypegenError::Config`] when a layer cannot be parsed.
    pub fn load(path: &Utf8Path) -> Result<Self, TypegenError> {
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Json::file(path.as_std_path()))
            .merge(Env::prefixed(ENV_PREFIX).map(env_key))
            .extract()?;
        Ok(config)
    }
}

fn env_key(key: &UncasedStr) -> Uncased<'_> {
    if key.as_str() == "pause_generation" {
        Uncased::from(PAUSE_KEY)
    } else {
        key.into()
    }
}

/// Sets or clears the pause flag in the JSON site config at `path`,
/// preserving every other key. The file is created when missing.
///
/// # Errors
///
/// Fails when the existing file is not a JSON object or cannot be written.
pub fn set_pause_generation(path: &Utf8Path, paused: bool) -> Result<(), TypegenError> {
    let dir_path = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| TypegenError::io(path, std::io::ErrorKind::InvalidInput.into()))?;
    let dir = ensure_dir(dir_path)?;

    let mut document = match read_optional(&dir, Utf8Path::new(file_name), path)? {
        Some(text) => serde_json::from_str::<Map<String, Value>>(&text).map_err(|source| {
            TypegenError::Json {
                path: path.to_path_buf(),
                source,
            }
        })?,
        None => Map::new(),
    };
    document.insert(PAUSE_KEY.to_owned(), Value::from(u8::from(paused)));

    let mut content = serde_json::to_string_pretty(&document)?;
    content.push('\n');
    let status = write_if_changed(&dir, dir_path, file_name, &content)?;
    info!(path = %path, paused, %status, "updated generation pause flag");
    Ok(())
}

/// Pauses generation ahead of a schema migration.
///
/// # Errors
///
/// See [`set_pause_generation`].
pub fn before_migrate(path: &Utf8Path) -> Result<(), TypegenError> {
    set_pause_generation(path, true)
}

/// Resumes generation once a schema migration has finished.
///
/// # Errors
///
/// See [`set_pause_generation`].
pub fn after_migrate(path: &Utf8Path) -> Result<(), TypegenError> {
    set_pause_generation(path, false)
}
