use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// The buckets a manifest path can be sorted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Source,
    Header,
    Framework,
    Resource,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Source,
        Category::Header,
        Category::Framework,
        Category::Resource,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Source => "source",
            Category::Header => "header",
            Category::Framework => "framework",
            Category::Resource => "resource",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RulesError {
    #[error("no extensions given for {0} files")]
    Empty(Category),
    #[error("empty extension in the {0} list")]
    EmptyExtension(Category),
    #[error("extension '.{extension}' is listed for both {first} and {second} files")]
    Overlap {
        extension: String,
        first: Category,
        second: Category,
    },
}

/// File extensions (without the leading dot) that decide each category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassificationRules {
    pub source: Vec<String>,
    pub header: Vec<String>,
    pub framework: Vec<String>,
    pub resource: Vec<String>,
}

fn owned(exts: &[&str]) -> Vec<String> {
    exts.iter().map(|e| e.to_string()).collect()
}

impl Default for ClassificationRules {
    fn default() -> Self {
        ClassificationRules {
            source: owned(&["m", "mm", "c", "cpp", "swift"]),
            header: owned(&["h", "hpp"]),
            framework: owned(&["framework"]),
            resource: owned(&["plist", "xib", "storyboard"]),
        }
    }
}

impl ClassificationRules {
    pub fn extensions(&self, category: Category) -> &[String] {
        match category {
            Category::Source => &self.source,
            Category::Header => &self.header,
            Category::Framework => &self.framework,
            Category::Resource => &self.resource,
        }
    }

    fn extensions_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Source => &mut self.source,
            Category::Header => &mut self.header,
            Category::Framework => &mut self.framework,
            Category::Resource => &mut self.resource,
        }
    }

    /// Strip leading dots and surrounding whitespace, so `".m"` and `"m"` are the same rule.
    pub fn normalized(mut self) -> Self {
        for category in Category::ALL {
            for ext in self.extensions_mut(category).iter_mut() {
                *ext = ext.trim().trim_start_matches('.').to_string();
            }
        }
        self
    }

    /// Every category needs at least one extension and no extension may
    /// belong to two categories, otherwise one path would be emitted twice.
    pub fn validate(&self) -> Result<(), RulesError> {
        for category in Category::ALL {
            let exts = self.extensions(category);
            if exts.is_empty() {
                return Err(RulesError::Empty(category));
            }
            if exts.iter().any(|e| e.is_empty()) {
                return Err(RulesError::EmptyExtension(category));
            }
        }

        for (i, first) in Category::ALL.iter().enumerate() {
            for second in &Category::ALL[i + 1..] {
                let shared = self
                    .extensions(*first)
                    .iter()
                    .find(|e| self.extensions(*second).contains(*e));
                if let Some(extension) = shared {
                    return Err(RulesError::Overlap {
                        extension: extension.clone(),
                        first: *first,
                        second: *second,
                    });
                }
            }
        }

        Ok(())
    }
}
