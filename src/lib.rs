//! A library for staging vendored C++ libraries into a project.
//!
//! Every library lives in `<root>/vendor/<name>`. Staging copies its headers
//! to `<root>/deps/<name>/include` and, for compiled libraries, runs the
//! project generator and the native build driver and copies the resulting
//! static libraries to `<root>/deps/<name>/build`.
//!
//! Supported libraries are `bgfx` (built together with `bimg` and `bx`),
//! `fmt`, `glfw3`, `sfml` and the header-only `spdlog`.
//!
//! # Installation
//! ```sh
//! cargo install deps_builder
//! ```
//!
//! # Examples
//! Build the formatting and logging libraries of the project in the current directory
//! ```sh
//! deps_builder --action build --root_path . --deps fmt spdlog
//! ```
//! Remove everything staged for bgfx
//! ```sh
//! deps_builder --action clean --root_path . --deps bgfx
//! ```
//!
//! # Sample toml file
//! Every key is optional. The file is looked up as `deps_builder.toml` in the
//! root path; a per-user file with the same layout is read first.
//! ```toml
//! # deps_builder.toml
//![tools]
//!cmake = "C:/Program Files/CMake/bin/cmake.exe"
//!msbuild = "msbuild"
//!configuration = "Release"
//!arch = "x64"
//!vs_version = "vs2019"
//!```

/// Contains the builder contract and per-library recipes
pub mod builder;
/// Contains dependency descriptors and resolution
pub mod dependency;
/// Contains error types
pub mod error;
/// Handles global config
pub mod global_config;
/// Contains hashing related functions
pub mod hasher;
/// Drives builders through an action
pub mod orchestrator;
/// Contains logger and config parser
pub mod utils;
