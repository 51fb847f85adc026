//! Fixtures for builder tests: a throwaway project root and fake external tools.

use crate::utils::configs::ToolsConfig;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub enum ToolBehaviour {
    /// Every invocation exits zero and produces nothing
    Succeed,
    /// The generator step exits 3, anything else succeeds
    FailGenerate,
    /// The build step creates these files relative to its working directory
    Produce(Vec<String>),
}

pub struct Project {
    tmp: TempDir,
}

impl Project {
    pub fn new() -> Self {
        Self {
            tmp: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    pub fn vendor_header(&self, lib: &str, rel: &str, contents: &str) -> PathBuf {
        let path = self.root().join("vendor").join(lib).join("include").join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// Writes one shell script standing in for cmake, make, msbuild and genie.
    /// Each call appends its arguments to `marker`.
    pub fn fake_tools(&self, marker: &Path, behaviour: ToolBehaviour) -> ToolsConfig {
        let bin = self.root().join("fake-bin");
        std::fs::create_dir_all(&bin).unwrap();
        let script = bin.join("fake-tool");

        let on_generate = match &behaviour {
            ToolBehaviour::FailGenerate => "echo 'generator exploded' >&2\n  exit 3".to_string(),
            _ => "exit 0".to_string(),
        };
        let on_build = match &behaviour {
            ToolBehaviour::Produce(files) => files
                .iter()
                .map(|f| format!("mkdir -p \"$(dirname '{f}')\" && echo built > '{f}'"))
                .collect::<Vec<_>>()
                .join("\n  "),
            _ => "true".to_string(),
        };
        let contents = format!(
            "#!/bin/sh\n\
             echo \"$*\" >> '{marker}'\n\
             if [ \"$1\" = \"--build\" ] || [ \"$1\" = \"-C\" ]; then\n  {on_build}\n  exit 0\nfi\n\
             {on_generate}\n",
            marker = marker.display(),
        );
        std::fs::write(&script, contents).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        }

        let program = script.display().to_string();
        ToolsConfig {
            cmake: program.clone(),
            msbuild: program.clone(),
            make: program.clone(),
            genie: Some(script),
            ..ToolsConfig::default()
        }
    }
}
