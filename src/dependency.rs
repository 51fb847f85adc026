//! Dependency descriptors and resolution of requested libraries.

use clap::ValueEnum;
use itertools::Itertools;
use std::fmt;
use std::path::{Path, PathBuf};

/// Sub-libraries the graphics library is built together with
pub const BGFX_LINKED: [&str; 2] = ["bimg", "bx"];

/// Libraries that can be requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Library {
    #[value(name = "bgfx")]
    Bgfx,
    #[value(name = "fmt")]
    Fmt,
    #[value(name = "glfw3")]
    Glfw3,
    #[value(name = "sfml")]
    Sfml,
    #[value(name = "spdlog")]
    Spdlog,
}

impl Library {
    pub const ALL: [Library; 5] = [
        Library::Bgfx,
        Library::Fmt,
        Library::Glfw3,
        Library::Sfml,
        Library::Spdlog,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Library::Bgfx => "bgfx",
            Library::Fmt => "fmt",
            Library::Glfw3 => "glfw3",
            Library::Sfml => "sfml",
            Library::Spdlog => "spdlog",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Library::Bgfx => "graphics library (built together with bimg and bx)",
            Library::Fmt => "formatting library",
            Library::Glfw3 => "windowing library",
            Library::Sfml => "multimedia library",
            Library::Spdlog => "logging library (header only)",
        }
    }

    /// Descriptor names this library expands to, in resolution order
    fn expand(&self) -> Vec<&'static str> {
        match self {
            Library::Bgfx => {
                let mut names = BGFX_LINKED.to_vec();
                names.push(self.name());
                names
            }
            _ => vec![self.name()],
        }
    }
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Filesystem layout of one vendored library inside a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    pub root_path: PathBuf,

    pub build_dir: PathBuf,
    pub include_dir: PathBuf,

    pub target_build_dir: PathBuf,
    pub target_include_dir: PathBuf,

    /// Always false. Nothing sets it yet, so every run rebuilds.
    pub built: bool,
}

impl Dependency {
    pub fn new(name: &str, root_path: &Path) -> Self {
        let vendor = root_path.join("vendor").join(name);
        let staged = root_path.join("deps").join(name);
        Self {
            name: name.to_string(),
            root_path: root_path.to_path_buf(),
            build_dir: vendor.join("bin"),
            include_dir: vendor.join("include"),
            target_build_dir: staged.join("bin"),
            target_include_dir: staged.join("include"),
            built: false,
        }
    }

    /// True when the vendored source tree is present
    pub fn exists(&self) -> bool {
        self.build_dir.parent().map_or(false, Path::is_dir)
    }

    pub fn is_built(&self) -> bool {
        self.built && self.target_build_dir.exists() && self.target_include_dir.exists()
    }
}

/// Resolved descriptors, kept in resolution order
#[derive(Debug, Clone, Default)]
pub struct Dependencies {
    entries: Vec<Dependency>,
}

impl Dependencies {
    pub fn get(&self, name: &str) -> Option<&Dependency> {
        self.entries.iter().find(|dep| dep.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|dep| dep.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dependency> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Maps requested libraries to descriptors.
/// `bgfx` expands to `bimg`, `bx`, `bgfx`. A name keeps the position of its
/// first occurrence and is never listed twice.
pub fn resolve(root_path: &Path, libraries: &[Library]) -> Dependencies {
    let entries = libraries
        .iter()
        .flat_map(Library::expand)
        .unique()
        .map(|name| Dependency::new(name, root_path))
        .collect();
    Dependencies { entries }
}
