use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Industry assigned when no keyword set matches
pub const DEFAULT_INDUSTRY: &str = "infrastructure";

/// One named keyword set
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct IndustryRule {
    pub name: String,
    pub keywords: Vec<String>,
}

impl IndustryRule {
    fn matches(&self, url_lower: &str) -> bool {
        self.keywords
            .iter()
            .any(|k| url_lower.contains(k.to_lowercase().as_str()))
    }
}

#[derive(Deserialize)]
struct IndustryFile {
    industry: Vec<IndustryRule>,
}

/// Ordered keyword-set classifier for repository URLs
///
/// Rules are tried in file order and the first match wins, so a URL such as
/// `acme/data-db` resolves to `database` even though `data` also matches the
/// analytics set further down.
///
/// # Example
/// ```
/// use debtlens::sample::IndustryClassifier;
///
/// let classifier = IndustryClassifier::default_rules()?;
/// assert_eq!(classifier.classify("https://github.com/acme/postgres-proxy"), "database");
/// assert_eq!(classifier.classify("https://github.com/acme/kernel"), "infrastructure");
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct IndustryClassifier {
    rules: Vec<IndustryRule>,
}

impl IndustryClassifier {
    /// Embedded keyword sets (industries-default.toml)
    pub fn default_rules() -> Result<Self> {
        const DEFAULT_TOML: &str = include_str!("../../industries-default.toml");
        Self::from_toml_str(DEFAULT_TOML).context("Failed to parse embedded industries-default.toml")
    }

    /// Load keyword sets from a TOML file with `[[industry]]` tables
    ///
    /// # Errors
    /// Returns error if the file is unreadable, malformed, has an empty rule
    /// name or defines the same industry twice.
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read industry rules: {}", path.as_ref().display())
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: IndustryFile =
            toml::from_str(content).context("Failed to parse TOML industry rules")?;
        Self::from_rules(file.industry)
    }

    pub fn from_rules(rules: Vec<IndustryRule>) -> Result<Self> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if rule.name.trim().is_empty() {
                anyhow::bail!("Industry rule with empty name");
            }
            if !seen.insert(rule.name.as_str()) {
                anyhow::bail!("Duplicate industry rule '{}'", rule.name);
            }
        }
        Ok(Self { rules })
    }

    /// Industry for a repository URL (first matching rule, else the default)
    pub fn classify(&self, repository_url: &str) -> &str {
        let url = repository_url.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&url))
            .map_or(DEFAULT_INDUSTRY, |rule| rule.name.as_str())
    }

    pub fn rules(&self) -> &[IndustryRule] {
        &self.rules
    }
}
