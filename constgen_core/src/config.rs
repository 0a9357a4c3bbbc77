use crate::error::{ConstgenError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, error, info, trace};

/// Name of the configuration file searched for in the working directory and
/// its ancestors.
pub const CONFIG_FILE_NAME: &str = "constgen.toml";

static C_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Invalid C identifier regex"));

/// Settings for the text that surrounds the scanned constants.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Tool name written in the "Generated by" notice.
    pub generated_by: String,
    /// Header pulled in by the generated file.
    pub include: String,
    /// Prefix of the `<prefix>_<Class>_DOC` doc string symbols.
    pub doc_prefix: String,
    /// Name of the routine that installs every class.
    pub dispatcher: String,
    /// Python module providing the `Enum` and `Flag` constructors.
    pub enum_module: String,
    /// Fail when a class matches nothing in the header.
    pub strict: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            generated_by: String::from("constgen"),
            include: String::from("drgnpy.h"),
            doc_prefix: String::from("drgn"),
            dispatcher: String::from("add_module_constants"),
            enum_module: String::from("enum"),
            strict: false,
        }
    }
}

impl GeneratorConfig {
    /// Resolves the configuration for a run.
    ///
    /// An explicit path must exist. Without one, the nearest `constgen.toml`
    /// in the current directory or its ancestors is used, falling back to the
    /// defaults when there is none.
    pub fn load(explicit: Option<&Path>) -> Result<GeneratorConfig> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    error!("Configuration file not found: {:?}", path);
                    return Err(ConstgenError::ConfigNotFound {
                        path: path.to_path_buf(),
                    });
                }
                Self::from_file(path)
            }
            None => match Self::find_config_file(&env::current_dir()?) {
                Some(path) => Self::from_file(&path),
                None => {
                    debug!("No {} found, using defaults", CONFIG_FILE_NAME);
                    Ok(GeneratorConfig::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<GeneratorConfig> {
        info!("Loading configuration from {:?}", path);
        let contents = fs::read_to_string(path).map_err(|e| {
            error!("Failed to read configuration file: {}", e);
            ConstgenError::from(e)
        })?;
        debug!("Configuration file size: {} bytes", contents.len());
        Self::parse_toml(&contents)
    }

    pub fn parse_toml(contents: &str) -> Result<GeneratorConfig> {
        let config: GeneratorConfig = toml::from_str(contents).map_err(|e| {
            error!("Failed to parse TOML configuration: {}", e);
            ConstgenError::from(e)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Walks from `start` up to the filesystem root looking for
    /// `constgen.toml`.
    pub fn find_config_file(start: &Path) -> Option<PathBuf> {
        debug!("Starting config file search from: {:?}", start);
        for path in start.ancestors() {
            let config_path = path.join(CONFIG_FILE_NAME);
            trace!("Checking for config at: {:?}", config_path);
            if config_path.is_file() {
                return Some(config_path);
            }
        }
        None
    }

    /// Checks that every value lands in the generated C as valid syntax.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("doc_prefix", &self.doc_prefix),
            ("dispatcher", &self.dispatcher),
        ] {
            if !C_IDENTIFIER.is_match(value) {
                return Err(ConstgenError::config(format!(
                    "{key} must be a C identifier, got {value:?}"
                )));
            }
        }
        for (key, value) in [
            ("include", &self.include),
            ("enum_module", &self.enum_module),
        ] {
            if value.is_empty() || value.contains(['"', '\\', '\n']) {
                return Err(ConstgenError::config(format!(
                    "{key} cannot be embedded in a C string literal: {value:?}"
                )));
            }
        }
        if self.generated_by.contains("*/") || self.generated_by.contains('\n') {
            return Err(ConstgenError::config(
                "generated_by cannot contain a newline or close the comment",
            ));
        }
        Ok(())
    }
}
