//! Generator settings.
//!
//! Values are layered: built-in defaults, then `datacompat.toml` in the
//! working directory (or an explicitly given file), then `DATACOMPAT_*`
//! environment variables, e.g. `DATACOMPAT_SUFFIX=Spec`.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;

pub const DEFAULT_CONFIG_NAME: &str = "datacompat";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Directory generated files are written to.
    pub output_dir: PathBuf,
    /// Suffix a declaration name must carry; it is dropped to name the entity.
    pub suffix: String,
    /// Emit the closure-style initializer function.
    pub initializer: bool,
    /// Emit a `Display` implementation for the entity.
    pub display: bool,
    /// Extra derives added to every entity.
    pub derives: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("generated"),
            suffix: "Data".to_string(),
            initializer: true,
            display: true,
            derives: Vec::new(),
        }
    }
}

impl Settings {
    /// Loads settings, reading `path` when given (it must then exist) or an
    /// optional `datacompat.toml` otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };
        let settings = Config::builder()
            .set_default("output_dir", defaults.output_dir.to_string_lossy().to_string())?
            .set_default("suffix", defaults.suffix)?
            .set_default("initializer", defaults.initializer)?
            .set_default("display", defaults.display)?
            .set_default("derives", Vec::<String>::new())?
            .add_source(file)
            .add_source(
                Environment::with_prefix("DATACOMPAT")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("derives"),
            )
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
