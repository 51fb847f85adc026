//! Running external build tools.

use super::ToolStep;
use crate::error::{BuildError, BuildResult, ErrorKind};
use crate::utils::log::{log, LogLevel};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::process::{Command, Output};
use std::time::Duration;

fn spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed}]")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    bar.set_style(style);
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

fn describe_status(output: &Output) -> String {
    match output.status.code() {
        Some(code) => code.to_string(),
        None => "terminated by signal".to_string(),
    }
}

/// Runs `step` with `cwd` as its working directory and waits for it.
/// A tool that cannot be found or exits non-zero is a `BuildToolError`
/// whose message carries the captured stdout and stderr.
pub fn run_step(name: &str, step: &ToolStep, cwd: &Path) -> BuildResult {
    let tool_error = |message: String| BuildError::new(ErrorKind::BuildToolError, name, message);

    let program = which::which_in(&step.program, std::env::var_os("PATH"), cwd).map_err(|e| {
        tool_error(format!("{} not found ({}): {}", step.tool, step.program.display(), e))
    })?;

    log(LogLevel::Info, &format!("[{}] Running: {}", name, step));
    log(LogLevel::Info, &format!("  Working directory: {}", cwd.display()));

    let bar = spinner(format!("[{}] {}", name.to_uppercase(), step.tool));
    let output = Command::new(&program)
        .args(&step.args)
        .current_dir(cwd)
        .output();
    bar.finish_and_clear();

    let output = output.map_err(|e| tool_error(format!("failed to run {}: {}", step.tool, e)))?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    if !output.status.success() {
        let mut msg = format!("{} return code: {}", step.tool, describe_status(&output));
        msg.push_str(&format!("\nstdout: {}", stdout));
        msg.push_str(&format!("\nstderr: {}", stderr));
        return Err(tool_error(msg));
    }

    log(LogLevel::Info, &format!("  Success: {}", step.tool));
    if !stdout.is_empty() {
        log(LogLevel::Debug, &format!("  Stdout: {}", stdout));
    }
    if !stderr.is_empty() {
        log(LogLevel::Debug, &format!("  Stderr: {}", stderr));
    }
    Ok(())
}
