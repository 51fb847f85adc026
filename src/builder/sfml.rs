use super::{
    cmake_build, cmake_configure, msbuild, BuilderPaths, Platform, Recipe, ToolStep, WorkDir,
};
use crate::utils::configs::ToolsConfig;
use std::path::PathBuf;

const MODULES: [&str; 5] = ["audio", "graphics", "network", "system", "window"];

pub fn recipe(paths: &BuilderPaths, tools: &ToolsConfig, platform: Platform) -> Recipe {
    let (generate, compile, artifact_dir, artifacts): (ToolStep, ToolStep, PathBuf, Vec<String>) =
        match platform {
            Platform::Windows => {
                // sfml-main only exists on Windows
                let mut libs: Vec<String> =
                    MODULES.iter().map(|m| format!("sfml-{}.lib", m)).collect();
                libs.push("sfml-main.lib".to_string());
                libs.sort();
                (
                    cmake_configure(tools, paths, &[]),
                    msbuild(tools, "SFML.sln", Some("CMake\\ALL_BUILD"), WorkDir::TargetBuild),
                    PathBuf::from("lib").join(&tools.configuration),
                    libs,
                )
            }
            Platform::Linux | Platform::MacOs => (
                cmake_configure(tools, paths, &["-DBUILD_SHARED_LIBS=OFF"]),
                cmake_build(tools, None),
                PathBuf::from("lib"),
                MODULES.iter().map(|m| format!("libsfml-{}-s.a", m)).collect(),
            ),
        };

    Recipe {
        name: "sfml".to_string(),
        linked: Vec::new(),
        stage_build_dir: true,
        generate: Some(generate),
        compile: Some(compile),
        artifact_base: WorkDir::TargetBuild,
        artifact_dir,
        artifacts,
        prune_intermediates: true,
    }
}
