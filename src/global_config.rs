use crate::error::ConfigError;
use crate::utils::configs::ConfigFile;
use crate::utils::log::{log, LogLevel};

use directories::ProjectDirs;
use std::path::{Path, PathBuf};

const CONFIGURATIONS: [&str; 4] = ["Release", "Debug", "RelWithDebInfo", "MinSizeRel"];
const ARCHS: [&str; 3] = ["x64", "Win32", "ARM64"];
const VS_VERSIONS: [&str; 3] = ["vs2017", "vs2019", "vs2022"];

/// Parameters accepted by `deps_builder config`
pub const PARAMETERS: [&str; 7] = [
    "cmake",
    "msbuild",
    "make",
    "genie",
    "configuration",
    "arch",
    "vs_version",
];

/// Overrides the location of the per-user config file
pub const CONFIG_ENV: &str = "DEPS_BUILDER_CONFIG";

/// Location of the per-user config file, if the platform has a config dir
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    ProjectDirs::from("", "", "deps_builder").map(|dirs| dirs.config_dir().join("config.toml"))
}

fn check_one_of(parameter: &str, value: &str, allowed: &[&str]) -> Result<(), ConfigError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            parameter: parameter.to_string(),
            value: value.to_string(),
            reason: format!("expected one of {}", allowed.join(", ")),
        })
    }
}

fn check_not_empty(parameter: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            parameter: parameter.to_string(),
            value: value.to_string(),
            reason: "value must not be empty".to_string(),
        });
    }
    Ok(())
}

/// Validates and stores one parameter in the config file at `config`
pub fn set_defaults(config: &Path, parameter: &str, value: &str) -> Result<(), ConfigError> {
    let mut conf = ConfigFile::from_optional_file(config)?;
    let tools = &mut conf.tools;
    match parameter {
        "cmake" => {
            check_not_empty(parameter, value)?;
            tools.cmake = Some(value.to_string());
        }
        "msbuild" => {
            check_not_empty(parameter, value)?;
            tools.msbuild = Some(value.to_string());
        }
        "make" => {
            check_not_empty(parameter, value)?;
            tools.make = Some(value.to_string());
        }
        "genie" => {
            check_not_empty(parameter, value)?;
            tools.genie = Some(PathBuf::from(value));
        }
        "configuration" => {
            check_one_of(parameter, value, &CONFIGURATIONS)?;
            tools.configuration = Some(value.to_string());
        }
        "arch" => {
            check_one_of(parameter, value, &ARCHS)?;
            tools.arch = Some(value.to_string());
        }
        "vs_version" => {
            check_one_of(parameter, value, &VS_VERSIONS)?;
            tools.vs_version = Some(value.to_string());
        }
        _ => return Err(ConfigError::UnknownParameter(parameter.to_string())),
    }

    if let Some(parent) = config.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let contents = toml::to_string(&conf)?;
    std::fs::write(config, contents).map_err(|source| ConfigError::Write {
        path: config.to_path_buf(),
        source,
    })?;
    log(
        LogLevel::Log,
        &format!("Set {} = {} in {}", parameter, value, config.display()),
    );
    Ok(())
}
