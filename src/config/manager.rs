use crate::config::models::LintConfig;
use crate::constants;
use crate::error::Error;
use crate::fs::{FileSystem, OsFileSystem};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Finds and reads the lint configuration.
pub struct ConfigManager<F: FileSystem> {
    fs: F,
    base_dir: PathBuf,
}

impl ConfigManager<OsFileSystem> {
    /// Creates a `ConfigManager` that looks for the default config file in `base_dir`.
    #[must_use]
    pub const fn new(base_dir: PathBuf) -> Self {
        Self {
            fs: OsFileSystem,
            base_dir,
        }
    }
}

impl<F: FileSystem> ConfigManager<F> {
    pub const fn with_fs(fs: F, base_dir: PathBuf) -> Self {
        Self { fs, base_dir }
    }

    /// Path of the config file picked up when none is given explicitly.
    #[must_use]
    pub fn default_config_path(&self) -> PathBuf {
        self.base_dir.join(constants::DEFAULT_CONFIG_FILE)
    }

    /// Loads the configuration.
    ///
    /// An explicit path must exist. Without one, the default file in the base
    /// directory is used if present, and built-in defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML for
    /// [`LintConfig`].
    pub fn load(&self, explicit: Option<&Path>) -> Result<LintConfig, Error> {
        if let Some(path) = explicit {
            return self.load_file(path);
        }
        let default_path = self.default_config_path();
        if self.fs.is_file(&default_path) {
            self.load_file(&default_path)
        } else {
            debug!(target: "oaslint::config", "no config file, using defaults");
            Ok(LintConfig::default())
        }
    }

    fn load_file(&self, path: &Path) -> Result<LintConfig, Error> {
        debug!(target: "oaslint::config", path = %path.display(), "loading config");
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|e| Error::Io(e).with_context(&format!("Failed to read {}", path.display())))?;
        Ok(toml::from_str(&content)?)
    }
}
