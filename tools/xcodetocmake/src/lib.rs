pub mod config;
pub mod logging;

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;
use xcodetocmake_cmake::CMakeLists;
use xcodetocmake_pbxproj::Manifest;

pub use config::{ConfigError, ConversionConfig, FileConfig, RunParameters};

/// Extract the project's file lists and write the CMake file. Returns the
/// path that was written.
pub fn convert(config: &ConversionConfig) -> Result<PathBuf> {
    let manifest = Manifest::open(&config.project)?;
    let files = manifest.extract(&config.rules)?;
    info!(project = %manifest.name, files = files.len(), "converting");

    let lists = CMakeLists {
        project_name: &manifest.name,
        files: &files,
        dependencies: &config.dependencies,
        include: config.include,
    };
    lists
        .write(&config.output)
        .with_context(|| format!("couldn't generate build file for {}", manifest.name))?;

    Ok(config.output.clone())
}
