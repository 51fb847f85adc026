use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use deps_builder::dependency::Library;
use deps_builder::error::ConfigError;
use deps_builder::global_config;
use deps_builder::orchestrator::{self, Action};
use deps_builder::utils::{self, log, LogLevel};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "deps_builder",
    version,
    about = "Builds vendored C++ libraries and stages them into <root>/deps",
    args_conflicts_with_subcommands = true,
    subcommand_negates_reqs = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Action to perform
    #[arg(long, value_enum, required = true)]
    action: Option<Action>,

    /// Path to the project root
    #[arg(long = "root_path", visible_alias = "root-path", value_name = "PATH", required = true)]
    root_path: Option<PathBuf>,

    /// Libraries to act on, in order
    #[arg(long, value_enum, num_args = 1.., required = true)]
    deps: Vec<Library>,

    /// Config file to use instead of <root>/deps_builder.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Set a default in the per-user config file
    Config {
        #[arg(value_parser = PossibleValuesParser::new(global_config::PARAMETERS))]
        parameter: String,
        value: String,
    },
    /// List the libraries that can be requested
    List,
}

fn set_config(parameter: &str, value: &str) -> Result<(), ConfigError> {
    let path = global_config::config_path().ok_or(ConfigError::NoConfigDir)?;
    global_config::set_defaults(&path, parameter, value)
}

fn list() {
    for library in Library::ALL {
        log(
            LogLevel::Log,
            &format!("{:<8} {}", library.name(), library.description()),
        );
    }
}

fn build_or_clean(cli: Cli) -> ExitCode {
    let (Some(action), Some(root_path)) = (cli.action, cli.root_path) else {
        log(LogLevel::Error, "--action and --root_path are required");
        return ExitCode::FAILURE;
    };

    let root_path = match root_path.canonicalize() {
        Ok(path) => path,
        Err(e) => {
            log(
                LogLevel::Error,
                &format!("Could not open root path {}: {}", root_path.display(), e),
            );
            return ExitCode::FAILURE;
        }
    };

    let global = global_config::config_path();
    let explicit = cli.config.as_deref();
    let tools = match utils::load_tools_config(&root_path, explicit, global.as_deref()) {
        Ok(tools) => tools,
        Err(e) => {
            log(LogLevel::Error, &e.to_string());
            return ExitCode::FAILURE;
        }
    };

    match orchestrator::run(action, &root_path, &cli.deps, &tools) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log(LogLevel::Error, &e.source.message);
            log(LogLevel::Error, &format!("{} ({})", e, e.source.kind));
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Some(Command::Config { parameter, value }) => match set_config(&parameter, &value) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                log(LogLevel::Error, &e.to_string());
                ExitCode::FAILURE
            }
        },
        Some(Command::List) => {
            list();
            ExitCode::SUCCESS
        }
        None => build_or_clean(cli),
    }
}
