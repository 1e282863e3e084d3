//! `rollcall.toml`: engine config plus export theme in one file.

use std::path::{Path, PathBuf};

use rollcall_io::ExportTheme;
use rollcall_recon::ReconConfig;
use serde::Deserialize;

use crate::CliError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(flatten)]
    pub recon: ReconConfig,
    #[serde(default)]
    pub theme: ExportTheme,
}

/// Where settings were loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Defaults,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Defaults => write!(f, "built-in defaults"),
        }
    }
}

impl Settings {
    /// `<config dir>/rollcall/rollcall.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rollcall")
            .join("rollcall.toml")
    }

    /// Load from an explicit path, or from the default path when it exists,
    /// or fall back to built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<(Self, Source), CliError> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Source::File(path.to_path_buf())));
        }

        let path = Self::default_path();
        if path.is_file() {
            log::debug!("using config {}", path.display());
            return Ok((Self::load(&path)?, Source::File(path)));
        }
        Ok((Self::default(), Source::Defaults))
    }

    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CliError::config(format!("cannot read config {}: {e}", path.display()))
        })?;
        Self::from_toml(&text).map_err(|e| e.with_hint(format!("check {}", path.display())))
    }

    pub fn from_toml(text: &str) -> Result<Self, CliError> {
        let settings: Settings = toml::from_str(text)
            .map_err(|e| CliError::config(format!("config parse error: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), CliError> {
        self.recon.validate().map_err(|e| CliError::config(e.to_string()))?;
        self.theme.validate().map_err(|e| CliError::config(e.to_string()))
    }
}
