use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use xcodetocmake_cmake::{IncludeOptions, CMAKE_LISTS};
use xcodetocmake_pbxproj::{ClassificationRules, RulesError};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid classification rules: {0}")]
    Rules(#[from] RulesError),
}

/// Contents of a TOML run file. Every key is optional; command-line values
/// take precedence.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub project: Option<PathBuf>,
    pub dependencies: Option<Vec<String>>,
    pub output: Option<PathBuf>,
    pub include_headers: Option<bool>,
    pub include_frameworks: Option<bool>,
    pub include_resources: Option<bool>,
    pub rules: Option<ClassificationRules>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        FileConfig::parse(&contents).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(contents: &str) -> Result<FileConfig, toml::de::Error> {
        toml::from_str(contents)
    }
}

/// Values given on the command line.
#[derive(Debug, Default, Clone)]
pub struct RunParameters {
    pub project: Option<PathBuf>,
    pub dependencies: Vec<String>,
    pub output: Option<PathBuf>,
    pub include_headers: bool,
    pub include_frameworks: bool,
    pub include_resources: bool,
}

/// A validated run configuration.
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    pub project: PathBuf,
    pub dependencies: Vec<String>,
    pub output: PathBuf,
    pub include: IncludeOptions,
    pub rules: ClassificationRules,
}

impl ConversionConfig {
    /// Merge file and command-line values, then validate the result.
    pub fn resolve(
        file: FileConfig,
        params: RunParameters,
    ) -> Result<ConversionConfig, ConfigError> {
        let project = params
            .project
            .or(file.project)
            .ok_or_else(|| ConfigError::InvalidInput("no project directory given".to_string()))?;

        let dependencies = if params.dependencies.is_empty() {
            file.dependencies.unwrap_or_default()
        } else {
            params.dependencies
        };

        let config = ConversionConfig {
            project,
            dependencies,
            output: params
                .output
                .or(file.output)
                .unwrap_or_else(|| PathBuf::from(CMAKE_LISTS)),
            include: IncludeOptions {
                headers: params.include_headers || file.include_headers.unwrap_or(false),
                frameworks: params.include_frameworks || file.include_frameworks.unwrap_or(false),
                resources: params.include_resources || file.include_resources.unwrap_or(false),
            },
            rules: file.rules.unwrap_or_default().normalized(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that need no manifest I/O.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.project.is_dir() {
            return Err(ConfigError::InvalidInput(format!(
                "{} is not an existing directory",
                self.project.display()
            )));
        }

        for dep in &self.dependencies {
            if dep.is_empty() || dep.chars().any(char::is_whitespace) {
                return Err(ConfigError::InvalidInput(format!(
                    "invalid dependency name '{dep}'"
                )));
            }
        }

        self.rules.validate()?;
        Ok(())
    }
}
