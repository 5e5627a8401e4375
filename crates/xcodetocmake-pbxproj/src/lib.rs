pub mod rules;

pub use rules::{Category, ClassificationRules, RulesError};

use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use xcodetocmake_plist::{PlistError, PlistFormat};

/// File name of the manifest inside a `.xcodeproj` directory.
pub const MANIFEST_NAME: &str = "project.pbxproj";

/// Directory suffix stripped to get the project name.
pub const PROJECT_SUFFIX: &str = ".xcodeproj";

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("project manifest not found at {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// A single path found in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    pub path: String,
    pub category: Category,
}

/// Manifest paths grouped by category, each list in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorizedFileSet {
    pub sources: Vec<String>,
    pub headers: Vec<String>,
    pub frameworks: Vec<String>,
    pub resources: Vec<String>,
}

impl CategorizedFileSet {
    pub fn files(&self, category: Category) -> &[String] {
        match category {
            Category::Source => &self.sources,
            Category::Header => &self.headers,
            Category::Framework => &self.frameworks,
            Category::Resource => &self.resources,
        }
    }

    pub fn push(&mut self, reference: FileReference) {
        let list = match reference.category {
            Category::Source => &mut self.sources,
            Category::Header => &mut self.headers,
            Category::Framework => &mut self.frameworks,
            Category::Resource => &mut self.resources,
        };
        list.push(reference.path);
    }

    pub fn len(&self) -> usize {
        Category::ALL.iter().map(|c| self.files(*c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One compiled `path = ...;` search per category.
pub struct PathScanner {
    patterns: Vec<(Category, Regex)>,
}

impl PathScanner {
    pub fn new(rules: &ClassificationRules) -> Result<PathScanner, regex::Error> {
        let mut patterns = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let regex = Regex::new(&path_pattern(rules.extensions(category)))?;
            patterns.push((category, regex));
        }
        Ok(PathScanner { patterns })
    }

    /// Run every category's search over `text`. Paths come back unresolved,
    /// grouped by category and in text order within a category.
    pub fn scan(&self, text: &str) -> Vec<FileReference> {
        let mut found = Vec::new();
        for (category, regex) in &self.patterns {
            for caps in regex.captures_iter(text) {
                let path = match (caps.get(1), caps.get(2)) {
                    (Some(quoted), _) => unescape(quoted.as_str()),
                    (None, Some(bare)) => bare.as_str().to_string(),
                    (None, None) => continue,
                };
                found.push(FileReference {
                    path,
                    category: *category,
                });
            }
        }
        found
    }
}

/// Matches `path = "<value>";` or the bare OpenStep form `path = <value>;`
/// where the value ends in one of `exts`.
fn path_pattern(exts: &[String]) -> String {
    let alternation = exts
        .iter()
        .map(|e| regex::escape(e))
        .collect::<Vec<_>>()
        .join("|");
    format!(
        r#"\bpath\s*=\s*(?:"((?:[^"\\\n]|\\.)*\.(?:{alternation}))"|([A-Za-z0-9_$/:.+\-]*\.(?:{alternation})))\s*;"#
    )
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Join a manifest path onto the project directory unless it is already absolute.
pub fn resolve_path(project_dir: &Path, path: &str) -> String {
    if Path::new(path).is_absolute() {
        path.to_string()
    } else {
        project_dir.join(path).to_string_lossy().to_string()
    }
}

/// The project directory's base name without its `.xcodeproj` suffix.
pub fn project_name(project_dir: &Path) -> String {
    let base = project_dir
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    match base.strip_suffix(PROJECT_SUFFIX) {
        Some(stem) => stem.to_string(),
        None => base,
    }
}

/// A located `project.pbxproj`, normalized to OpenStep text.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub project_dir: PathBuf,
    pub path: PathBuf,
    pub name: String,
    pub format: PlistFormat,
    pub text: String,
}

impl Manifest {
    /// Open a `.xcodeproj` directory and load its `project.pbxproj`.
    pub fn open(project_dir: &Path) -> Result<Manifest, ExtractError> {
        let path = project_dir.join(MANIFEST_NAME);
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ExtractError::NotFound(path))
            }
            Err(source) => return Err(ExtractError::Read { path, source }),
        };

        let (text, format) = match xcodetocmake_plist::to_openstep_text(&data) {
            Ok(converted) => converted,
            Err(PlistError::Encoding(e)) => {
                return Err(ExtractError::Read {
                    path,
                    source: io::Error::new(io::ErrorKind::InvalidData, e),
                })
            }
            Err(e) => {
                return Err(ExtractError::Parse {
                    path,
                    source: Box::new(e),
                })
            }
        };
        debug!(path = %path.display(), format = format.name(), "loaded manifest");

        // `.` and friends have no base name of their own
        let mut name = project_name(project_dir);
        if name.is_empty() {
            if let Ok(canonical) = fs::canonicalize(project_dir) {
                name = project_name(&canonical);
            }
        }

        Ok(Manifest {
            project_dir: project_dir.to_path_buf(),
            path,
            name,
            format,
            text,
        })
    }

    /// Scan the manifest and sort every matching path into its category.
    pub fn extract(&self, rules: &ClassificationRules) -> Result<CategorizedFileSet, ExtractError> {
        let scanner = PathScanner::new(rules).map_err(|e| ExtractError::Parse {
            path: self.path.clone(),
            source: Box::new(e),
        })?;

        let mut files = CategorizedFileSet::default();
        for reference in scanner.scan(&self.text) {
            let path = resolve_path(&self.project_dir, &reference.path);
            debug!(category = %reference.category, path = %path, "file reference");
            files.push(FileReference {
                path,
                category: reference.category,
            });
        }

        info!(
            sources = files.sources.len(),
            headers = files.headers.len(),
            frameworks = files.frameworks.len(),
            resources = files.resources.len(),
            "extracted file references"
        );
        Ok(files)
    }
}
