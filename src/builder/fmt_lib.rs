//! fmt could be consumed header-only, but the compiled library is smaller
//! and faster to build against.

use super::{cmake_build, cmake_configure, msbuild, BuilderPaths, Platform, Recipe, WorkDir};
use crate::utils::configs::ToolsConfig;
use std::path::PathBuf;

pub fn recipe(paths: &BuilderPaths, tools: &ToolsConfig, platform: Platform) -> Recipe {
    let generate = cmake_configure(tools, paths, &[]);
    let (compile, artifact_dir, artifact) = match platform {
        Platform::Windows => (
            msbuild(tools, "FMT.sln", Some("fmt"), WorkDir::TargetBuild),
            PathBuf::from(&tools.configuration),
            "fmt.lib",
        ),
        Platform::Linux | Platform::MacOs => (
            cmake_build(tools, Some("fmt")),
            PathBuf::new(),
            "libfmt.a",
        ),
    };

    Recipe {
        name: "fmt".to_string(),
        linked: Vec::new(),
        stage_build_dir: true,
        generate: Some(generate),
        compile: Some(compile),
        artifact_base: WorkDir::TargetBuild,
        artifact_dir,
        artifacts: vec![artifact.to_string()],
        prune_intermediates: true,
    }
}
