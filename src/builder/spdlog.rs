//! spdlog is used header-only: staging the headers is the whole job.

use super::{BuilderPaths, Platform, Recipe};
use crate::utils::configs::ToolsConfig;

pub fn recipe(_paths: &BuilderPaths, _tools: &ToolsConfig, _platform: Platform) -> Recipe {
    Recipe::header_only("spdlog")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn has_no_build_steps() {
        let paths = BuilderPaths::new(Path::new("/p"), "spdlog");
        let recipe = recipe(&paths, &ToolsConfig::default(), Platform::Windows);
        assert!(recipe.generate.is_none());
        assert!(recipe.compile.is_none());
        assert!(recipe.artifacts.is_empty());
        assert!(!recipe.stage_build_dir);
    }
}
