//! bgfx, bimg and bx share one GENie project and are built together inside
//! the vendored bgfx tree. Nothing is built in `deps/bgfx/build`, so there
//! are no intermediates to prune.

use super::{msbuild, BuilderPaths, Platform, Recipe, ToolStep, WorkDir};
use crate::dependency::BGFX_LINKED;
use crate::utils::configs::ToolsConfig;
use std::path::PathBuf;

const LIBS: [&str; 3] = ["bgfx", "bimg", "bx"];

/// Prebuilt GENie binary shipped with bx
fn default_genie(paths: &BuilderPaths, platform: Platform) -> PathBuf {
    let tools = paths.root_path.join("vendor").join("bx").join("tools").join("bin");
    match platform {
        Platform::Windows => tools.join("windows").join("genie.exe"),
        Platform::Linux => tools.join("linux").join("genie"),
        Platform::MacOs => tools.join("darwin").join("genie"),
    }
}

pub fn recipe(paths: &BuilderPaths, tools: &ToolsConfig, platform: Platform) -> Recipe {
    let genie = tools
        .genie
        .clone()
        .unwrap_or_else(|| default_genie(paths, platform));
    let generate = ToolStep::new("genie", genie, WorkDir::VendorRoot);

    let (generate, compile, artifact_dir, artifacts): (ToolStep, ToolStep, PathBuf, Vec<String>) =
        match platform {
            Platform::Windows => (
                generate.arg(tools.vs_version.as_str()),
                msbuild(
                    tools,
                    &format!(".build/projects/{}/bgfx.sln", tools.vs_version),
                    None,
                    WorkDir::VendorRoot,
                ),
                PathBuf::from(".build")
                    .join(format!("win64_{}", tools.vs_version))
                    .join("bin"),
                LIBS.iter().map(|lib| format!("{}Release.lib", lib)).collect(),
            ),
            Platform::Linux => (
                generate.args(["--gcc=linux-gcc", "gmake"]),
                ToolStep::new("make", &tools.make, WorkDir::VendorRoot)
                    .args(["-C", ".build/projects/gmake-linux", "config=release64"]),
                PathBuf::from(".build/linux64_gcc/bin"),
                LIBS.iter().map(|lib| format!("lib{}Release.a", lib)).collect(),
            ),
            Platform::MacOs => (
                generate.args(["--gcc=osx-x64", "gmake"]),
                ToolStep::new("make", &tools.make, WorkDir::VendorRoot)
                    .args(["-C", ".build/projects/gmake-osx-x64", "config=release"]),
                PathBuf::from(".build/osx-x64/bin"),
                LIBS.iter().map(|lib| format!("lib{}Release.a", lib)).collect(),
            ),
        };

    Recipe {
        name: "bgfx".to_string(),
        linked: BGFX_LINKED.iter().map(|s| s.to_string()).collect(),
        stage_build_dir: true,
        generate: Some(generate),
        compile: Some(compile),
        artifact_base: WorkDir::VendorRoot,
        artifact_dir,
        artifacts,
        prune_intermediates: false,
    }
}
