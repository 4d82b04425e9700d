// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pattern library files.
//!
//! Extra scale patterns can be kept in YAML or TOML files and merged into a
//! [`PatternRegistry`]:
//!
//! ```yaml
//! patterns:
//!   - name: hirajoshi
//!     intervals: [0, 2, 3, 7, 8]
//!     aliases: [japanese]
//! ```

pub mod watcher;

pub use watcher::{validate_patterns, PatternEvent, PatternWatcher};

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::music::PatternRegistry;

/// Root of a pattern library file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PatternFile {
    #[serde(default)]
    pub patterns: Vec<PatternDefinition>,
}

/// A named scale pattern as written in a library file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatternDefinition {
    /// Name of the pattern (matched case-insensitively)
    pub name: String,
    /// Half steps from the root, starting at 0
    pub intervals: Vec<i32>,
    /// Other names the same pattern is registered under
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl PatternFile {
    /// Load a pattern library, picking the format from the file extension.
    ///
    /// `.toml` files are read as TOML; anything else as YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read pattern file: {:?}", path))?;
        let file = if is_toml(path) {
            Self::from_toml(&contents)
        } else {
            Self::from_yaml(&contents)
        }
        .with_context(|| format!("Invalid pattern file: {:?}", path))?;
        debug!(?path, count = file.patterns.len(), "loaded pattern file");
        Ok(file)
    }

    /// Parse a pattern library from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML pattern library")
    }

    /// Parse a pattern library from a TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML pattern library")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize pattern library to YAML")
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize pattern library to TOML")
    }

    /// Save the library, in TOML or YAML depending on the extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = if is_toml(path) {
            self.to_toml()?
        } else {
            self.to_yaml()?
        };
        fs::write(path, text).with_context(|| format!("Failed to write pattern file: {:?}", path))
    }

    /// Register every pattern (and alias) in `registry`.
    ///
    /// Stops at the first pattern the registry refuses.
    pub fn apply(&self, registry: &mut PatternRegistry) -> Result<()> {
        for def in &self.patterns {
            for name in std::iter::once(&def.name).chain(&def.aliases) {
                registry
                    .register(name, def.intervals.clone())
                    .with_context(|| format!("Cannot register pattern {:?}", def.name))?;
            }
        }
        Ok(())
    }

    /// The built-in patterns plus everything in this file
    pub fn into_registry(self) -> Result<PatternRegistry> {
        let mut registry = PatternRegistry::builtin();
        self.apply(&mut registry)?;
        Ok(registry)
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "toml")
}

/// Load a pattern file straight into a registry seeded with the built-ins
pub fn load_registry<P: AsRef<Path>>(path: P) -> Result<PatternRegistry> {
    PatternFile::load(path)?.into_registry()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::{Pitch, Scale};
    use tempfile::tempdir;

    const LIBRARY_YAML: &str = r#"
patterns:
  - name: Hirajoshi
    intervals: [0, 2, 3, 7, 8]
    aliases: [japanese]
  - name: bebop_dominant
    intervals: [0, 2, 4, 5, 7, 9, 10, 11]
"#;

    #[test]
    fn test_parse_yaml() {
        let file = PatternFile::from_yaml(LIBRARY_YAML).unwrap();
        assert_eq!(file.patterns.len(), 2);
        assert_eq!(file.patterns[0].name, "Hirajoshi");
        assert_eq!(file.patterns[0].aliases, vec!["japanese".to_string()]);
        assert!(file.patterns[1].aliases.is_empty());
    }

    #[test]
    fn test_parse_toml() {
        let toml_text = r#"
[[patterns]]
name = "pelog"
intervals = [0, 1, 3, 7, 8]
"#;
        let file = PatternFile::from_toml(toml_text).unwrap();
        assert_eq!(file.patterns.len(), 1);
        assert_eq!(file.patterns[0].intervals, vec![0, 1, 3, 7, 8]);
    }

    #[test]
    fn test_empty_library() {
        let file = PatternFile::from_yaml("patterns: []").unwrap();
        assert_eq!(file, PatternFile::default());
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(PatternFile::from_yaml("patterns: [").is_err());
        assert!(PatternFile::from_yaml("patterns:\n  - name: x\n").is_err());
    }

    #[test]
    fn test_apply_registers_aliases() {
        let file = PatternFile::from_yaml(LIBRARY_YAML).unwrap();
        let registry = file.into_registry().unwrap();

        assert!(registry.contains("major"));
        assert_eq!(registry.get("hirajoshi"), registry.get("japanese"));

        let scale = registry.scale(Pitch::from_code(60), "Bebop_Dominant");
        assert_eq!(scale.len(), 8);

        // The global registry is untouched
        assert!(!Scale::from_root_and_pattern(Pitch::from_code(60), "hirajoshi").is_registered());
    }

    #[test]
    fn test_apply_rejects_bad_pattern() {
        let file = PatternFile::from_yaml(
            r#"
patterns:
  - name: broken
    intervals: [2, 4]
"#,
        )
        .unwrap();
        let mut registry = PatternRegistry::new();
        assert!(file.apply(&mut registry).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_round_trip_files() {
        let dir = tempdir().unwrap();
        let file = PatternFile::from_yaml(LIBRARY_YAML).unwrap();

        for name in ["library.yaml", "library.toml"] {
            let path = dir.path().join(name);
            file.save(&path).unwrap();
            assert_eq!(PatternFile::load(&path).unwrap(), file);
        }
    }

    #[test]
    fn test_load_registry() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("patterns.yml");
        fs::write(&path, LIBRARY_YAML).unwrap();

        let registry = load_registry(&path).unwrap();
        assert!(registry.contains("hirajoshi"));
        assert!(load_registry(dir.path().join("missing.yaml")).is_err());
    }
}
