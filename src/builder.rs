use crate::dependency::{Dependencies, Library};
use crate::error::{BuildError, BuildResult, ErrorKind};
use crate::utils::configs::ToolsConfig;
use crate::utils::log::{log, LogLevel};
use std::fmt;
use std::path::{Path, PathBuf};

pub mod bgfx;
pub mod fmt_lib;
pub mod glfw3;
pub mod process;
pub mod sfml;
pub mod spdlog;
pub mod stage;

/// Operations every library builder exposes.
/// The defaults succeed without touching anything, which is all a
/// header-only library needs for `build` and `clean`.
pub trait Builder {
    fn name(&self) -> &str;

    fn prepare(&self) -> BuildResult {
        Ok(())
    }

    fn build(&self) -> BuildResult {
        Ok(())
    }

    fn clean(&self) -> BuildResult {
        Ok(())
    }
}

/// Platform the recipes generate commands and artifact names for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
    MacOs,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }
}

/// Working paths of one builder, derived from the root and the library name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderPaths {
    pub root_path: PathBuf,
    /// `vendor/<name>`, the vendored source tree
    pub vendor_dir: PathBuf,
    pub include_dir: PathBuf,
    /// `deps/<name>`, everything staged for this library
    pub staged_dir: PathBuf,
    pub target_build_dir: PathBuf,
    pub target_include_dir: PathBuf,
}

impl BuilderPaths {
    pub fn new(root_path: &Path, name: &str) -> Self {
        let vendor_dir = root_path.join("vendor").join(name);
        let staged_dir = root_path.join("deps").join(name);
        Self {
            root_path: root_path.to_path_buf(),
            include_dir: vendor_dir.join("include"),
            target_build_dir: staged_dir.join("build"),
            target_include_dir: staged_dir.join("include"),
            vendor_dir,
            staged_dir,
        }
    }
}

/// Directory an external tool runs in, or artifacts are found under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkDir {
    VendorRoot,
    TargetBuild,
}

/// One external tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolStep {
    /// Short name used in messages, e.g. `cmake`
    pub tool: String,
    pub program: PathBuf,
    pub args: Vec<String>,
    pub cwd: WorkDir,
}

impl ToolStep {
    pub fn new(tool: &str, program: impl Into<PathBuf>, cwd: WorkDir) -> Self {
        Self {
            tool: tool.to_string(),
            program: program.into(),
            args: Vec::new(),
            cwd,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for ToolStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Declarative description of how one library is staged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub name: String,
    /// Descriptors that must exist before `build` runs anything
    pub linked: Vec<String>,
    /// False for header-only libraries
    pub stage_build_dir: bool,
    pub generate: Option<ToolStep>,
    pub compile: Option<ToolStep>,
    pub artifact_base: WorkDir,
    pub artifact_dir: PathBuf,
    pub artifacts: Vec<String>,
    /// Delete everything but the artifacts from the target build dir
    pub prune_intermediates: bool,
}

impl Recipe {
    pub fn header_only(name: &str) -> Self {
        Self {
            name: name.to_string(),
            linked: Vec::new(),
            stage_build_dir: false,
            generate: None,
            compile: None,
            artifact_base: WorkDir::TargetBuild,
            artifact_dir: PathBuf::new(),
            artifacts: Vec::new(),
            prune_intermediates: false,
        }
    }
}

/// `cmake <vendor source> -DCMAKE_BUILD_TYPE=<cfg> ...` run in the target build dir
pub(crate) fn cmake_configure(
    tools: &ToolsConfig,
    paths: &BuilderPaths,
    extra: &[&str],
) -> ToolStep {
    ToolStep::new("cmake", &tools.cmake, WorkDir::TargetBuild)
        .arg(paths.vendor_dir.display().to_string())
        .arg(format!("-DCMAKE_BUILD_TYPE={}", tools.configuration))
        .args(extra.iter().copied())
}

/// `msbuild <solution> [/t:<target>] /clp:ErrorsOnly /p:Configuration=.. /p:Platform=..`
pub(crate) fn msbuild(
    tools: &ToolsConfig,
    solution: &str,
    target: Option<&str>,
    cwd: WorkDir,
) -> ToolStep {
    let mut step = ToolStep::new("msbuild", &tools.msbuild, cwd).arg(solution);
    if let Some(target) = target {
        step = step.arg(format!("/t:{}", target));
    }
    step.args([
        "/clp:ErrorsOnly".to_string(),
        format!("/p:Configuration={}", tools.configuration),
        format!("/p:Platform={}", tools.arch),
    ])
}

/// `cmake --build . --config <cfg> [--target <target>]`
pub(crate) fn cmake_build(tools: &ToolsConfig, target: Option<&str>) -> ToolStep {
    let mut step = ToolStep::new("cmake", &tools.cmake, WorkDir::TargetBuild)
        .args(["--build", "."])
        .args(["--config".to_string(), tools.configuration.clone()]);
    if let Some(target) = target {
        step = step.args(["--target", target]);
    }
    step
}

/// Builder that interprets a `Recipe`
pub struct RecipeBuilder<'a> {
    deps: &'a Dependencies,
    recipe: Recipe,
    paths: BuilderPaths,
}

impl<'a> RecipeBuilder<'a> {
    pub fn new(root_path: &Path, deps: &'a Dependencies, recipe: Recipe) -> Self {
        let paths = BuilderPaths::new(root_path, &recipe.name);
        Self { deps, recipe, paths }
    }

    fn work_dir(&self, dir: WorkDir) -> &Path {
        match dir {
            WorkDir::VendorRoot => &self.paths.vendor_dir,
            WorkDir::TargetBuild => &self.paths.target_build_dir,
        }
    }

    fn error(&self, kind: ErrorKind, message: impl Into<String>) -> BuildError {
        BuildError::new(kind, &self.recipe.name, message)
    }

    fn check_linked(&self) -> BuildResult {
        let missing: Vec<&str> = self
            .recipe
            .linked
            .iter()
            .filter(|name| !self.deps.get(name).map_or(false, |dep| dep.exists()))
            .map(String::as_str)
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        Err(self.error(
            ErrorKind::LinkedDepNotFound,
            format!(
                "{} must be present for build (missing: {})",
                self.recipe.linked.join(" and "),
                missing.join(", ")
            ),
        ))
    }
}

impl Builder for RecipeBuilder<'_> {
    fn name(&self) -> &str {
        &self.recipe.name
    }

    fn prepare(&self) -> BuildResult {
        let name = &self.recipe.name;
        let paths = &self.paths;
        if !paths.include_dir.is_dir() {
            return Err(self.error(
                ErrorKind::HeaderNotFound,
                format!("header directory not found: '{}'", paths.include_dir.display()),
            ));
        }

        let copied = stage::copy_tree(&paths.include_dir, &paths.target_include_dir).map_err(|e| {
            self.error(
                ErrorKind::FileCopyFailed,
                format!(
                    "failed to transact copy to '{}': {}",
                    paths.target_include_dir.display(),
                    e
                ),
            )
        })?;
        if !paths.target_include_dir.is_dir() {
            return Err(self.error(
                ErrorKind::FileCopyFailed,
                format!("failed to transact copy to '{}'", paths.target_include_dir.display()),
            ));
        }
        log(
            LogLevel::Info,
            &format!("[{}] staged {} header file(s)", name, copied),
        );

        if self.recipe.stage_build_dir {
            if let Err(e) = std::fs::create_dir_all(&paths.target_build_dir) {
                return Err(self.error(
                    ErrorKind::FileMissing,
                    format!(
                        "failed to create directory '{}': {}",
                        paths.target_build_dir.display(),
                        e
                    ),
                ));
            }
        }
        Ok(())
    }

    fn build(&self) -> BuildResult {
        self.check_linked()?;

        let name = &self.recipe.name;
        for step in [&self.recipe.generate, &self.recipe.compile].into_iter().flatten() {
            process::run_step(name, step, self.work_dir(step.cwd))?;
        }

        if self.recipe.artifacts.is_empty() {
            return Ok(());
        }
        let lib_dir = self
            .work_dir(self.recipe.artifact_base)
            .join(&self.recipe.artifact_dir);
        if !lib_dir.is_dir() {
            return Err(self.error(
                ErrorKind::FileMissing,
                format!(
                    "path to compiled library directory not found: '{}'",
                    lib_dir.display()
                ),
            ));
        }
        let target_dir = &self.paths.target_build_dir;
        let staged = stage::copy_artifacts(name, &lib_dir, &self.recipe.artifacts, target_dir)?;
        if self.recipe.prune_intermediates {
            stage::prune_except(name, target_dir, &staged)?;
        }
        log(
            LogLevel::Log,
            &format!(
                "[{}] staged {} artifact(s) in {}",
                name,
                staged.len(),
                target_dir.display()
            ),
        );
        Ok(())
    }

    fn clean(&self) -> BuildResult {
        stage::remove_staged(&self.recipe.name, &self.paths.staged_dir)
    }
}

/// Static mapping from a requested library to its recipe
pub fn recipe_for(
    library: Library,
    paths: &BuilderPaths,
    tools: &ToolsConfig,
    platform: Platform,
) -> Recipe {
    match library {
        Library::Bgfx => bgfx::recipe(paths, tools, platform),
        Library::Fmt => fmt_lib::recipe(paths, tools, platform),
        Library::Glfw3 => glfw3::recipe(paths, tools, platform),
        Library::Sfml => sfml::recipe(paths, tools, platform),
        Library::Spdlog => spdlog::recipe(paths, tools, platform),
    }
}

pub fn builder_for<'a>(
    library: Library,
    root_path: &Path,
    deps: &'a Dependencies,
    tools: &ToolsConfig,
    platform: Platform,
) -> RecipeBuilder<'a> {
    let paths = BuilderPaths::new(root_path, library.name());
    RecipeBuilder::new(root_path, deps, recipe_for(library, &paths, tools, platform))
}

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::dependency::resolve;

    fn linux_builder<'a>(
        library: Library,
        root: &Path,
        deps: &'a Dependencies,
        tools: &ToolsConfig,
    ) -> RecipeBuilder<'a> {
        builder_for(library, root, deps, tools, Platform::Linux)
    }

    #[test]
    fn builder_paths_use_build_layout() {
        let paths = BuilderPaths::new(Path::new("/p"), "glfw3");
        assert_eq!(paths.include_dir, PathBuf::from("/p/vendor/glfw3/include"));
        assert_eq!(paths.vendor_dir, PathBuf::from("/p/vendor/glfw3"));
        assert_eq!(paths.target_include_dir, PathBuf::from("/p/deps/glfw3/include"));
        assert_eq!(paths.target_build_dir, PathBuf::from("/p/deps/glfw3/build"));
    }

    #[test]
    fn default_operations_succeed() {
        struct Noop;
        impl Builder for Noop {
            fn name(&self) -> &str {
                "noop"
            }
        }
        assert!(Noop.prepare().is_ok());
        assert!(Noop.build().is_ok());
        assert!(Noop.clean().is_ok());
    }

    #[test]
    fn prepare_is_idempotent() {
        let project = Project::new();
        project.vendor_header("fmt", "fmt/core.h", "// core");
        project.vendor_header("fmt", "fmt/format.h", "// format");
        let deps = resolve(project.root(), &[Library::Fmt]);
        let builder = linux_builder(Library::Fmt, project.root(), &deps, &ToolsConfig::default());

        builder.prepare().unwrap();
        builder.prepare().unwrap();

        let staged = project.root().join("deps/fmt/include/fmt");
        assert_eq!(std::fs::read_to_string(staged.join("core.h")).unwrap(), "// core");
        assert_eq!(std::fs::read_to_string(staged.join("format.h")).unwrap(), "// format");
        assert_eq!(std::fs::read_dir(&staged).unwrap().count(), 2);
        assert!(project.root().join("deps/fmt/build").is_dir());
    }

    #[test]
    fn prepare_without_headers_fails() {
        let project = Project::new();
        let deps = resolve(project.root(), &[Library::Glfw3]);
        let builder = linux_builder(Library::Glfw3, project.root(), &deps, &ToolsConfig::default());
        let err = builder.prepare().unwrap_err();
        assert_eq!(err.kind, ErrorKind::HeaderNotFound);
        assert!(!project.root().join("deps/glfw3").exists());
    }

    #[test]
    fn prepare_reports_copy_failure() {
        let project = Project::new();
        project.vendor_header("spdlog", "spdlog/spdlog.h", "#pragma once");
        let blocker = project.root().join("deps/spdlog/include");
        std::fs::create_dir_all(blocker.parent().unwrap()).unwrap();
        std::fs::write(&blocker, "not a directory").unwrap();

        let deps = resolve(project.root(), &[Library::Spdlog]);
        let tools = ToolsConfig::default();
        let builder = linux_builder(Library::Spdlog, project.root(), &deps, &tools);
        let err = builder.prepare().unwrap_err();
        assert_eq!(err.kind, ErrorKind::FileCopyFailed);
        assert!(err.message.contains("deps/spdlog/include"));
        assert!(blocker.is_file());
    }

    #[cfg(unix)]
    #[test]
    fn prepare_reports_build_dir_failure() {
        let project = Project::new();
        project.vendor_header("fmt", "fmt/core.h", "");
        let blocker = project.root().join("deps/fmt/build");
        std::fs::create_dir_all(blocker.parent().unwrap()).unwrap();
        std::fs::write(&blocker, "").unwrap();

        let deps = resolve(project.root(), &[Library::Fmt]);
        let builder = linux_builder(Library::Fmt, project.root(), &deps, &ToolsConfig::default());
        let err = builder.prepare().unwrap_err();
        assert_eq!(err.kind, ErrorKind::FileMissing);
        assert!(err.message.contains("failed to create directory"));
        assert!(err.message.contains("File exists"));
    }

    #[test]
    fn header_only_prepare_skips_build_dir() {
        let project = Project::new();
        project.vendor_header("spdlog", "spdlog/spdlog.h", "#pragma once");
        let deps = resolve(project.root(), &[Library::Spdlog]);
        let tools = ToolsConfig::default();
        let builder = linux_builder(Library::Spdlog, project.root(), &deps, &tools);
        builder.prepare().unwrap();
        builder.build().unwrap();
        assert!(project.root().join("deps/spdlog/include/spdlog/spdlog.h").is_file());
        assert!(!project.root().join("deps/spdlog/build").exists());
    }

    #[test]
    fn linked_dep_missing_spawns_nothing() {
        let project = Project::new();
        project.vendor_header("bgfx", "bgfx/bgfx.h", "");
        project.vendor_header("bimg", "bimg/bimg.h", "");
        let marker = project.root().join("spawned");
        let tools = project.fake_tools(&marker, ToolBehaviour::Succeed);

        let deps = resolve(project.root(), &[Library::Bgfx]);
        let builder = linux_builder(Library::Bgfx, project.root(), &deps, &tools);
        builder.prepare().unwrap();

        let cwd_before = std::env::current_dir().unwrap();
        let err = builder.build().unwrap_err();
        assert_eq!(err.kind, ErrorKind::LinkedDepNotFound);
        assert!(err.message.contains("bx"));
        assert!(!marker.exists());
        assert_eq!(std::env::current_dir().unwrap(), cwd_before);
    }

    #[test]
    fn clean_removes_staged_tree_only() {
        let project = Project::new();
        project.vendor_header("sfml", "SFML/Audio.hpp", "");
        let deps = resolve(project.root(), &[Library::Sfml]);
        let builder = linux_builder(Library::Sfml, project.root(), &deps, &ToolsConfig::default());
        builder.prepare().unwrap();
        assert!(project.root().join("deps/sfml/include").is_dir());

        builder.clean().unwrap();
        assert!(!project.root().join("deps/sfml").exists());
        assert!(project.root().join("vendor/sfml/include/SFML/Audio.hpp").is_file());

        // Cleaning twice is fine
        builder.clean().unwrap();
    }

    #[cfg(unix)]
    mod with_fake_tools {
        use super::*;

        #[test]
        fn generator_failure_skips_build_driver() {
            let project = Project::new();
            project.vendor_header("glfw3", "GLFW/glfw3.h", "");
            let marker = project.root().join("spawned");
            let tools = project.fake_tools(&marker, ToolBehaviour::FailGenerate);

            let deps = resolve(project.root(), &[Library::Glfw3]);
            let builder = linux_builder(Library::Glfw3, project.root(), &deps, &tools);
            builder.prepare().unwrap();
            let err = builder.build().unwrap_err();

            assert_eq!(err.kind, ErrorKind::BuildToolError);
            assert!(err.message.contains("cmake return code: 3"));
            assert!(err.message.contains("generator exploded"));
            let calls = std::fs::read_to_string(&marker).unwrap();
            assert_eq!(calls.lines().count(), 1);
            assert!(!calls.contains("--build"));
        }

        #[test]
        fn missing_artifact_is_reported() {
            let project = Project::new();
            project.vendor_header("fmt", "fmt/core.h", "");
            let marker = project.root().join("spawned");
            let tools = project.fake_tools(&marker, ToolBehaviour::Succeed);

            let deps = resolve(project.root(), &[Library::Fmt]);
            let builder = linux_builder(Library::Fmt, project.root(), &deps, &tools);
            builder.prepare().unwrap();

            let cwd_before = std::env::current_dir().unwrap();
            let err = builder.build().unwrap_err();
            assert_eq!(err.kind, ErrorKind::FileMissing);
            assert!(err.message.contains("libfmt.a"));
            assert_eq!(std::env::current_dir().unwrap(), cwd_before);
            assert_eq!(std::fs::read_to_string(&marker).unwrap().lines().count(), 2);
        }

        #[test]
        fn successful_build_stages_and_prunes() {
            let project = Project::new();
            project.vendor_header("glfw3", "GLFW/glfw3.h", "");
            let marker = project.root().join("spawned");
            let tools = project.fake_tools(
                &marker,
                ToolBehaviour::Produce(vec!["src/libglfw3.a".into(), "CMakeCache.txt".into()]),
            );

            let deps = resolve(project.root(), &[Library::Glfw3]);
            let builder = linux_builder(Library::Glfw3, project.root(), &deps, &tools);
            builder.prepare().unwrap();
            builder.build().unwrap();

            let build_dir = project.root().join("deps/glfw3/build");
            let mut left: Vec<String> = std::fs::read_dir(&build_dir)
                .unwrap()
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect();
            left.sort();
            assert_eq!(left, ["libglfw3.a"]);
        }
    }
}
