/// Contains the config file parser
pub mod configs;
/// Contains the console logger
pub mod log;

pub use self::configs::{load_tools_config, ToolsConfig};
pub use self::log::{log, LogLevel};
