//! Drives the requested action over the requested libraries.

use crate::builder::{builder_for, Builder, Platform};
use crate::dependency::{resolve, Library};
use crate::error::{BuildError, Phase, RunError};
use crate::utils::configs::ToolsConfig;
use crate::utils::log::{log, LogLevel};
use clap::ValueEnum;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Action {
    /// Stage headers and build libraries
    Build,
    /// Remove staged headers and libraries
    Clean,
}

fn drive<B: Builder + ?Sized>(action: Action, builder: &B) -> Result<(), RunError> {
    let fail = |phase: Phase, source: BuildError| RunError {
        library: builder.name().to_string(),
        phase,
        source,
    };
    match action {
        Action::Build => {
            log(LogLevel::Log, &format!("Preparing: {}", builder.name()));
            builder.prepare().map_err(|e| fail(Phase::Prepare, e))?;
            log(LogLevel::Log, &format!("Building: {}", builder.name()));
            builder.build().map_err(|e| fail(Phase::Build, e))?;
        }
        Action::Clean => {
            log(LogLevel::Log, &format!("Cleaning: {}", builder.name()));
            builder.clean().map_err(|e| fail(Phase::Clean, e))?;
        }
    }
    Ok(())
}

/// Runs `action` on each builder in order and stops at the first failure.
/// Work done by earlier builders is kept.
pub fn run_builders<I, B>(action: Action, builders: I) -> Result<(), RunError>
where
    I: IntoIterator<Item = B>,
    B: Builder,
{
    for builder in builders {
        drive(action, &builder)?;
    }
    Ok(())
}

///Runs the requested action for every requested library
/// # Arguments
/// * `action` - Build or clean
/// * `root_path` - The consuming project's root
/// * `libraries` - Libraries in the order the caller gave them
/// * `tools` - External tool configuration
pub fn run(
    action: Action,
    root_path: &Path,
    libraries: &[Library],
    tools: &ToolsConfig,
) -> Result<(), RunError> {
    let deps = resolve(root_path, libraries);
    log(
        LogLevel::Debug,
        &format!("Resolved: {}", deps.names().collect::<Vec<_>>().join(", ")),
    );

    let platform = Platform::current();
    let builders = deps
        .names()
        .filter_map(|name| libraries.iter().copied().find(|lib| lib.name() == name))
        .map(|lib| builder_for(lib, root_path, &deps, tools, platform));
    run_builders(action, builders)?;

    let verb = match action {
        Action::Build => "Build",
        Action::Clean => "Clean",
    };
    log(LogLevel::Log, &format!("{} complete", verb));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BuildResult, ErrorKind};
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    struct Recording {
        name: &'static str,
        fail_on: Option<&'static str>,
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl Recording {
        fn step(&self, op: &'static str) -> BuildResult {
            self.calls.borrow_mut().push(format!("{}:{}", self.name, op));
            if self.fail_on == Some(op) {
                return Err(BuildError::new(ErrorKind::FileMissing, self.name, "boom"));
            }
            Ok(())
        }
    }

    impl Builder for Recording {
        fn name(&self) -> &str {
            self.name
        }
        fn prepare(&self) -> BuildResult {
            self.step("prepare")
        }
        fn build(&self) -> BuildResult {
            self.step("build")
        }
        fn clean(&self) -> BuildResult {
            self.step("clean")
        }
    }

    fn recorders(
        plan: &[(&'static str, Option<&'static str>)],
    ) -> (Vec<Recording>, Rc<RefCell<Vec<String>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let builders = plan
            .iter()
            .map(|&(name, fail_on)| Recording {
                name,
                fail_on,
                calls: Rc::clone(&calls),
            })
            .collect();
        (builders, calls)
    }

    #[test]
    fn build_prepares_then_builds_in_order() {
        let (builders, calls) = recorders(&[("fmt", None), ("glfw3", None)]);
        run_builders(Action::Build, builders).unwrap();
        assert_eq!(
            *calls.borrow(),
            ["fmt:prepare", "fmt:build", "glfw3:prepare", "glfw3:build"]
        );
    }

    #[test]
    fn failed_prepare_aborts_everything() {
        let (builders, calls) = recorders(&[("fmt", Some("prepare")), ("glfw3", None)]);
        let err = run_builders(Action::Build, builders).unwrap_err();
        assert_eq!(err.library, "fmt");
        assert_eq!(err.phase, Phase::Prepare);
        assert_eq!(*calls.borrow(), ["fmt:prepare"]);
    }

    #[test]
    fn failed_build_keeps_earlier_work_and_stops() {
        let (builders, calls) =
            recorders(&[("spdlog", None), ("sfml", Some("build")), ("fmt", None)]);
        let err = run_builders(Action::Build, builders).unwrap_err();
        assert_eq!(err.library, "sfml");
        assert_eq!(err.phase, Phase::Build);
        assert_eq!(err.source.kind, ErrorKind::FileMissing);
        assert_eq!(
            *calls.borrow(),
            ["spdlog:prepare", "spdlog:build", "sfml:prepare", "sfml:build"]
        );
    }

    #[test]
    fn clean_only_cleans() {
        let (builders, calls) =
            recorders(&[("fmt", None), ("bgfx", Some("clean")), ("sfml", None)]);
        let err = run_builders(Action::Clean, builders).unwrap_err();
        assert_eq!(err.phase, Phase::Clean);
        assert_eq!(*calls.borrow(), ["fmt:clean", "bgfx:clean"]);
    }

    #[test]
    fn header_only_library_end_to_end() {
        let tmp = TempDir::new().unwrap();
        let header = tmp.path().join("vendor/spdlog/include/spdlog/spdlog.hpp");
        std::fs::create_dir_all(header.parent().unwrap()).unwrap();
        std::fs::write(&header, "#pragma once\nnamespace spdlog {}\n").unwrap();

        run(Action::Build, tmp.path(), &[Library::Spdlog], &ToolsConfig::default()).unwrap();

        let staged = tmp.path().join("deps/spdlog/include/spdlog/spdlog.hpp");
        assert_eq!(
            std::fs::read(&staged).unwrap(),
            std::fs::read(&header).unwrap()
        );

        run(Action::Clean, tmp.path(), &[Library::Spdlog], &ToolsConfig::default()).unwrap();
        assert!(!tmp.path().join("deps/spdlog").exists());
    }

    #[test]
    fn bgfx_without_bx_fails_before_spawning() {
        let tmp = TempDir::new().unwrap();
        for lib in ["bgfx", "bimg"] {
            std::fs::create_dir_all(tmp.path().join("vendor").join(lib).join("include")).unwrap();
        }
        // Any spawn attempt would fail with a tool error instead
        let tools = ToolsConfig {
            genie: Some(tmp.path().join("no-such-genie")),
            make: "no-such-make".to_string(),
            msbuild: "no-such-msbuild".to_string(),
            ..ToolsConfig::default()
        };

        let err = run(Action::Build, tmp.path(), &[Library::Bgfx], &tools).unwrap_err();
        assert_eq!(err.library, "bgfx");
        assert_eq!(err.phase, Phase::Build);
        assert_eq!(err.source.kind, ErrorKind::LinkedDepNotFound);
    }

    #[test]
    fn sub_libraries_are_only_checked() {
        let tmp = TempDir::new().unwrap();
        for lib in ["bgfx", "bimg", "bx"] {
            std::fs::create_dir_all(tmp.path().join("vendor").join(lib).join("include")).unwrap();
        }
        let tools = ToolsConfig {
            genie: Some(tmp.path().join("no-such-genie")),
            ..ToolsConfig::default()
        };

        let err = run(Action::Build, tmp.path(), &[Library::Bgfx], &tools).unwrap_err();
        assert_eq!(err.source.kind, ErrorKind::BuildToolError);
        assert!(tmp.path().join("deps/bgfx/include").is_dir());
        assert!(!tmp.path().join("deps/bimg").exists());
        assert!(!tmp.path().join("deps/bx").exists());
    }
}
