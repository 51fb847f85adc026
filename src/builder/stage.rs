//! Filesystem staging: copying headers and libraries into `deps/`.

use crate::error::{BuildError, BuildResult, ErrorKind};
use crate::hasher;
use crate::utils::log::{log, LogLevel};
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Mirrors `src` into `dst`, creating directories as needed.
/// Files whose contents already match are left alone and entries of `dst`
/// with no counterpart in `src` are removed.
/// Returns the number of files written.
pub fn copy_tree(src: &Path, dst: &Path) -> io::Result<usize> {
    fs::create_dir_all(dst)?;
    let mut copied = 0;
    let mut seen = HashSet::new();
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        seen.insert(entry.file_name());
        if from.is_dir() {
            if to.is_file() {
                fs::remove_file(&to)?;
            }
            copied += copy_tree(&from, &to)?;
        } else {
            if to.is_dir() {
                fs::remove_dir_all(&to)?;
            }
            if hasher::is_file_changed(&from, &to)? {
                log(
                    LogLevel::Debug,
                    &format!("Copying: {} -> {}", from.display(), to.display()),
                );
                fs::copy(&from, &to)?;
                copied += 1;
            }
        }
    }
    remove_stale(dst, &seen)?;
    Ok(copied)
}

fn remove_stale(dst: &Path, seen: &HashSet<OsString>) -> io::Result<()> {
    for entry in fs::read_dir(dst)? {
        let entry = entry?;
        if seen.contains(&entry.file_name()) {
            continue;
        }
        let path = entry.path();
        log(LogLevel::Debug, &format!("Removing stale: {}", path.display()));
        if path.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

/// Copies each named artifact from `lib_dir` into `target_dir`.
/// Every artifact is checked before anything is copied.
/// Returns the staged paths.
pub fn copy_artifacts(
    name: &str,
    lib_dir: &Path,
    artifacts: &[String],
    target_dir: &Path,
) -> BuildResult<Vec<PathBuf>> {
    let missing: Vec<&str> = artifacts
        .iter()
        .filter(|artifact| !lib_dir.join(artifact).is_file())
        .map(String::as_str)
        .collect();
    if !missing.is_empty() {
        return Err(BuildError::new(
            ErrorKind::FileMissing,
            name,
            format!(
                "compiled libraries not found in '{}': {}",
                lib_dir.display(),
                missing.join(", ")
            ),
        ));
    }

    let mut staged = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let from = lib_dir.join(artifact);
        let to = target_dir.join(artifact);
        if from != to {
            fs::copy(&from, &to).map_err(|e| {
                BuildError::new(
                    ErrorKind::FileCopyFailed,
                    name,
                    format!("failed to copy '{}' to '{}': {}", from.display(), to.display(), e),
                )
            })?;
        }
        log(LogLevel::Info, &format!("Staged: {}", to.display()));
        staged.push(to);
    }
    Ok(staged)
}

/// Deletes every entry of `dir` that is not in `keep`.
pub fn prune_except(name: &str, dir: &Path, keep: &[PathBuf]) -> BuildResult {
    let io_error = |path: &Path, e: io::Error| {
        BuildError::new(
            ErrorKind::IoError,
            name,
            format!("failed to remove build intermediate '{}': {}", path.display(), e),
        )
    };
    let entries = fs::read_dir(dir).map_err(|e| io_error(dir, e))?;
    for entry in entries {
        let path = entry.map_err(|e| io_error(dir, e))?.path();
        if keep.contains(&path) {
            continue;
        }
        log(LogLevel::Debug, &format!("Removing intermediate: {}", path.display()));
        let removed = if path.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        removed.map_err(|e| io_error(&path, e))?;
    }
    Ok(())
}

/// Removes the staged `deps/<name>` tree. Absent trees are not an error.
pub fn remove_staged(name: &str, staged_dir: &Path) -> BuildResult {
    if !staged_dir.exists() {
        log(
            LogLevel::Info,
            &format!("Nothing to clean: {}", staged_dir.display()),
        );
        return Ok(());
    }
    fs::remove_dir_all(staged_dir).map_err(|e| {
        BuildError::new(
            ErrorKind::IoError,
            name,
            format!("could not remove '{}': {}", staged_dir.display(), e),
        )
    })?;
    log(LogLevel::Log, &format!("Cleaning: {}", staged_dir.display()));
    Ok(())
}
