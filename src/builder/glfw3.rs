use super::{cmake_build, cmake_configure, msbuild, BuilderPaths, Platform, Recipe, WorkDir};
use crate::utils::configs::ToolsConfig;
use std::path::PathBuf;

pub fn recipe(paths: &BuilderPaths, tools: &ToolsConfig, platform: Platform) -> Recipe {
    let generate = cmake_configure(
        tools,
        paths,
        &["-DGLFW_BUILD_EXAMPLES=OFF", "-DGLFW_BUILD_TESTS=OFF"],
    );
    let (compile, artifact_dir, artifact) = match platform {
        Platform::Windows => (
            msbuild(tools, "GLFW.sln", Some("GLFW3\\glfw"), WorkDir::TargetBuild),
            PathBuf::from("src").join(&tools.configuration),
            "glfw3.lib",
        ),
        Platform::Linux | Platform::MacOs => (
            cmake_build(tools, Some("glfw")),
            PathBuf::from("src"),
            "libglfw3.a",
        ),
    };

    Recipe {
        name: "glfw3".to_string(),
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
