use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::log::{log, LogLevel};
use crate::error::ConfigError;

/// Name of the per-project config file looked up in the root path
pub const PROJECT_CONFIG: &str = "deps_builder.toml";

/// External tools and build settings used by the recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolsConfig {
    pub cmake: String,
    pub msbuild: String,
    pub make: String,
    /// Falls back to the prebuilt binary shipped in `vendor/bx/tools/bin`
    pub genie: Option<PathBuf>,
    pub configuration: String,
    pub arch: String,
    pub vs_version: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            cmake: "cmake".to_string(),
            msbuild: "msbuild".to_string(),
            make: "make".to_string(),
            genie: None,
            configuration: "Release".to_string(),
            arch: "x64".to_string(),
            vs_version: "vs2019".to_string(),
        }
    }
}

impl ToolsConfig {
    /// Applies every key set in `overrides` on top of `self`
    pub fn merge(mut self, overrides: &ToolsOverrides) -> Self {
        if let Some(cmake) = &overrides.cmake {
            self.cmake = cmake.clone();
        }
        if let Some(msbuild) = &overrides.msbuild {
            self.msbuild = msbuild.clone();
        }
        if let Some(make) = &overrides.make {
            self.make = make.clone();
        }
        if let Some(genie) = &overrides.genie {
            self.genie = Some(genie.clone());
        }
        if let Some(configuration) = &overrides.configuration {
            self.configuration = configuration.clone();
        }
        if let Some(arch) = &overrides.arch {
            self.arch = arch.clone();
        }
        if let Some(vs_version) = &overrides.vs_version {
            self.vs_version = vs_version.clone();
        }
        self
    }
}

/// The `[tools]` table as written in a config file; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolsOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmake: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msbuild: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genie: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vs_version: Option<String>,
}

/// Layout shared by the global and the per-project config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub tools: ToolsOverrides,
}

impl ConfigFile {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like `from_file`, but a missing file is an empty config
    pub fn from_optional_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(path)
    }
}

/// This function resolves the tool configuration for a run
/// # Arguments
/// * `root_path` - The project root, searched for `deps_builder.toml`
/// * `explicit` - A config file given on the command line, must exist if set
/// * `global` - The global config file, skipped if absent
pub fn load_tools_config(
    root_path: &Path,
    explicit: Option<&Path>,
    global: Option<&Path>,
) -> Result<ToolsConfig, ConfigError> {
    let mut tools = ToolsConfig::default();

    if let Some(global) = global {
        let global_conf = ConfigFile::from_optional_file(global)?;
        tools = tools.merge(&global_conf.tools);
    }

    let project_conf = match explicit {
        Some(path) => {
            log(LogLevel::Info, &format!("Using config file: {}", path.display()));
            ConfigFile::from_file(path)?
        }
        None => ConfigFile::from_optional_file(&root_path.join(PROJECT_CONFIG))?,
    };
    tools = tools.merge(&project_conf.tools);

    log(LogLevel::Debug, &format!("Tools: {:#?}", tools));
    Ok(tools)
}
