//! Renders a `CMakeLists.txt` from the file lists pulled out of an Xcode
//! project.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;
use xcodetocmake_pbxproj::CategorizedFileSet;

/// Default output file name, relative to the working directory.
pub const CMAKE_LISTS: &str = "CMakeLists.txt";

pub const MINIMUM_CMAKE_VERSION: &str = "3.10";

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Which optional regions end up in the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IncludeOptions {
    pub headers: bool,
    pub frameworks: bool,
    pub resources: bool,
}

/// Everything that determines the generated file.
#[derive(Debug, Clone)]
pub struct CMakeLists<'a> {
    pub project_name: &'a str,
    pub files: &'a CategorizedFileSet,
    pub dependencies: &'a [String],
    pub include: IncludeOptions,
}

/// `Foo.framework` (or a path ending in it) links as `Foo`.
pub fn framework_link_name(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

impl CMakeLists<'_> {
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "cmake_minimum_required(VERSION {MINIMUM_CMAKE_VERSION})\n"
        ));
        out.push_str(&format!("project({})\n\n", self.project_name));

        out.push_str("add_executable(${PROJECT_NAME}\n");
        for source in &self.files.sources {
            out.push_str(&format!("    {source}\n"));
        }
        out.push_str(")\n");

        // Headers are listed for reference only, CMake never compiles them.
        if self.include.headers && !self.files.headers.is_empty() {
            out.push_str("\n# Header files\n");
            for header in &self.files.headers {
                out.push_str(&format!("#    {header}\n"));
            }
        }

        let mut libraries: Vec<String> = Vec::new();
        if self.include.frameworks {
            libraries.extend(self.files.frameworks.iter().map(|f| framework_link_name(f)));
        }
        libraries.extend(self.dependencies.iter().cloned());
        if !libraries.is_empty() {
            out.push('\n');
            for library in &libraries {
                out.push_str(&format!(
                    "target_link_libraries(${{PROJECT_NAME}} {library})\n"
                ));
            }
        }

        if self.include.resources && !self.files.resources.is_empty() {
            out.push_str("\n# Resources\n");
            out.push_str("set(RESOURCE_DIR ${CMAKE_BINARY_DIR}/Resources)\n");
            out.push_str("file(MAKE_DIRECTORY ${RESOURCE_DIR})\n");
            for resource in &self.files.resources {
                out.push_str(&format!(
                    "file(COPY {resource} DESTINATION ${{RESOURCE_DIR}})\n"
                ));
            }
        }

        out
    }

    /// Render and write to `path`, replacing whatever was there.
    ///
    /// A failure part way through can leave a truncated file behind.
    pub fn write(&self, path: &Path) -> Result<(), GenerateError> {
        let contents = self.render();
        fs::write(path, contents.as_bytes()).map_err(|source| GenerateError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), bytes = contents.len(), "wrote build descriptor");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn demo_files() -> CategorizedFileSet {
        let in_demo = |name: &str| format!("/p/Demo.xcodeproj/{name}");
        CategorizedFileSet {
            sources: vec![in_demo("main.m"), in_demo("App.swift")],
            headers: vec![in_demo("App.h")],
            frameworks: vec![in_demo("System/Library/Frameworks/UIKit.framework")],
            resources: vec![in_demo("Main.storyboard")],
        }
    }

    fn all_on() -> IncludeOptions {
        IncludeOptions {
            headers: true,
            frameworks: true,
            resources: true,
        }
    }

    #[test]
    fn test_render_everything() {
        let files = demo_files();
        let deps = vec!["pthread".to_string()];
        let lists = CMakeLists {
            project_name: "Demo",
            files: &files,
            dependencies: &deps,
            include: all_on(),
        };
        let expected = "\
cmake_minimum_required(VERSION 3.10)
project(Demo)

add_executable(${PROJECT_NAME}
    /p/Demo.xcodeproj/main.m
    /p/Demo.xcodeproj/App.swift
)

# Header files
#    /p/Demo.xcodeproj/App.h

target_link_libraries(${PROJECT_NAME} UIKit)
target_link_libraries(${PROJECT_NAME} pthread)

# Resources
set(RESOURCE_DIR ${CMAKE_BINARY_DIR}/Resources)
file(MAKE_DIRECTORY ${RESOURCE_DIR})
file(COPY /p/Demo.xcodeproj/Main.storyboard DESTINATION ${RESOURCE_DIR})
";
        assert_eq!(lists.render(), expected);
    }

    #[test]
    fn test_render_minimal() {
        let files = CategorizedFileSet {
            sources: vec!["/p/main.m".to_string()],
            ..Default::default()
        };
        let lists = CMakeLists {
            project_name: "Tiny",
            files: &files,
            dependencies: &[],
            include: IncludeOptions::default(),
        };
        assert_eq!(
            lists.render(),
            "cmake_minimum_required(VERSION 3.10)\nproject(Tiny)\n\n\
             add_executable(${PROJECT_NAME}\n    /p/main.m\n)\n"
        );
    }

    #[test]
    fn test_flags_gate_optional_regions() {
        let files = demo_files();
        let lists = CMakeLists {
            project_name: "Demo",
            files: &files,
            dependencies: &[],
            include: IncludeOptions::default(),
        };
        let text = lists.render();
        assert!(!text.contains("App.h"));
        assert!(!text.contains("UIKit"));
        assert!(!text.contains("RESOURCE_DIR"));
        assert!(!text.contains("Main.storyboard"));
        assert!(!text.contains("target_link_libraries"));
    }

    #[test]
    fn test_dependencies_ignore_flags() {
        let files = CategorizedFileSet::default();
        let deps = vec!["pthread".to_string(), "OpenGL".to_string()];
        for include in [IncludeOptions::default(), all_on()] {
            let text = CMakeLists {
                project_name: "Demo",
                files: &files,
                dependencies: &deps,
                include,
            }
            .render();
            let links: Vec<&str> = text
                .lines()
                .filter(|l| l.starts_with("target_link_libraries"))
                .collect();
            assert_eq!(
                links,
                vec![
                    "target_link_libraries(${PROJECT_NAME} pthread)",
                    "target_link_libraries(${PROJECT_NAME} OpenGL)",
                ]
            );
        }
    }

    #[test]
    fn test_resources_without_files_emit_nothing() {
        let files = CategorizedFileSet::default();
        let text = CMakeLists {
            project_name: "Demo",
            files: &files,
            dependencies: &[],
            include: all_on(),
        }
        .render();
        assert!(!text.contains("# Resources"));
        assert!(!text.contains("# Header files"));
    }

    #[test]
    fn test_framework_link_name() {
        assert_eq!(framework_link_name("/S/L/F/OpenGL.framework"), "OpenGL");
        assert_eq!(framework_link_name("Metal.framework"), "Metal");
    }

    #[test]
    fn test_write_overwrites() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join(CMAKE_LISTS);
        let stale = "stale contents that are much longer than the new file\n".repeat(50);
        fs::write(&out, stale).unwrap();

        let files = demo_files();
        let lists = CMakeLists {
            project_name: "Demo",
            files: &files,
            dependencies: &[],
            include: IncludeOptions::default(),
        };
        lists.write(&out).unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), lists.render());
    }

    #[test]
    fn test_write_to_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("missing").join(CMAKE_LISTS);
        let files = CategorizedFileSet::default();
        let lists = CMakeLists {
            project_name: "Demo",
            files: &files,
            dependencies: &[],
            include: IncludeOptions::default(),
        };
        assert!(matches!(lists.write(&out), Err(GenerateError::Write { .. })));
        assert!(!out.exists());
    }
}
