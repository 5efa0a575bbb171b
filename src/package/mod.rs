//! Package metadata
//!
//! Only the fields devlint reports on are read; everything else in the file
//! is ignored.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;

/// The package being linted, as described by its `package.json`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PackageDescriptor {
    pub name: String,

    #[serde(default)]
    pub version: Option<String>,
}

impl PackageDescriptor {
    /// Read the descriptor at `root/file`
    pub fn load(root: &Path, file: &str) -> Result<Self> {
        let path = root.join(file);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read package metadata {}", path.display()))?;
        let descriptor: PackageDescriptor = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse package metadata {}", path.display()))?;
        if descriptor.name.trim().is_empty() {
            bail!("Package metadata {} has an empty name", path.display());
        }
        Ok(descriptor)
    }

    /// `name@version`, or just the name when no version is declared
    pub fn display_name(&self) -> String {
        match self.version.as_deref() {
            Some(version) => format!("{}@{version}", self.name),
            None => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_name_and_version() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{"name": "@blockly/plugin-workspace-search", "version": "4.0.1", "scripts": {"lint": "devlint"}}"#,
        )
        .unwrap();

        let package = PackageDescriptor::load(temp.path(), "package.json").unwrap();
        assert_eq!(package.name, "@blockly/plugin-workspace-search");
        assert_eq!(package.version.as_deref(), Some("4.0.1"));
        assert_eq!(package.display_name(), "@blockly/plugin-workspace-search@4.0.1");
    }

    #[test]
    fn test_display_name_without_version() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package.json"), r#"{"name": "block-test"}"#).unwrap();

        let package = PackageDescriptor::load(temp.path(), "package.json").unwrap();
        assert_eq!(package.version, None);
        assert_eq!(package.display_name(), "block-test");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = PackageDescriptor::load(temp.path(), "package.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read package metadata"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package.json"), "{ not json").unwrap();
        assert!(PackageDescriptor::load(temp.path(), "package.json").is_err());

        fs::write(temp.path().join("package.json"), r#"{"version": "1.0.0"}"#).unwrap();
        assert!(PackageDescriptor::load(temp.path(), "package.json").is_err());

        fs::write(temp.path().join("package.json"), r#"{"name": ""}"#).unwrap();
        let err = PackageDescriptor::load(temp.path(), "package.json").unwrap_err();
        assert!(err.to_string().contains("empty name"));
    }
}
