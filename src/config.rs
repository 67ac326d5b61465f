use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".sincerc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Literal placeholder text to search for.
    #[serde(default = "default_marker")]
    pub marker: String,
    /// Prefix of the marker that is kept in the rewritten line.
    #[serde(default = "default_since_prefix")]
    pub since_prefix: String,
    /// Glob passed to `git tag` to select release tags.
    #[serde(default = "default_tag_pattern")]
    pub tag_pattern: String,
    /// Prefix stripped from a release tag to obtain the version string.
    #[serde(default = "default_tag_strip_prefix")]
    pub tag_strip_prefix: String,
    /// Pathspec filters restricting which tracked files are scanned.
    #[serde(default = "default_pathspecs")]
    pub pathspecs: Vec<String>,
    /// Base URL used to construct release and commit links in the report.
    #[serde(default = "default_repo_url")]
    pub repo_url: String,
}

fn default_marker() -> String {
    "@since TODO".to_string()
}

fn default_since_prefix() -> String {
    "@since ".to_string()
}

fn default_tag_pattern() -> String {
    "jenkins-*".to_string()
}

fn default_tag_strip_prefix() -> String {
    "jenkins-".to_string()
}

fn default_pathspecs() -> Vec<String> {
    ["*.java", "*.jelly", "*.js"].map(String::from).to_vec()
}

fn default_repo_url() -> String {
    "https://github.com/jenkinsci/jenkins".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            marker: default_marker(),
            since_prefix: default_since_prefix(),
            tag_pattern: default_tag_pattern(),
            tag_strip_prefix: default_tag_strip_prefix(),
            pathspecs: default_pathspecs(),
            repo_url: default_repo_url(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.marker.trim().is_empty() {
            anyhow::bail!("'marker' must not be empty");
        }
        if self.tag_pattern.trim().is_empty() {
            anyhow::bail!("'tagPattern' must not be empty");
        }
        if self.pathspecs.is_empty() {
            anyhow::bail!("'pathspecs' must contain at least one pattern");
        }

        Ok(())
    }

    /// The substring written over the marker once a tag has been resolved,
    /// e.g. `jenkins-2.400` becomes `@since 2.400`.
    pub fn replacement_for(&self, tag: &str) -> String {
        let version = tag.strip_prefix(&self.tag_strip_prefix).unwrap_or(tag);
        format!("{}{}", self.since_prefix, version)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let config_path = start_dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(repo_root: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(repo_root) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use tempfile::tempdir;

    use crate::config::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.marker, "@since TODO");
        assert_eq!(config.tag_pattern, "jenkins-*");
        assert_eq!(config.pathspecs, vec!["*.java", "*.jelly", "*.js"]);
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
              "marker": "@since FIXME",
              "tagPattern": "v*",
              "tagStripPrefix": "v",
              "pathspecs": ["*.rs"]
          }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.marker, "@since FIXME");
        assert_eq!(config.tag_pattern, "v*");
        assert_eq!(config.pathspecs, vec!["*.rs"]);
        // Unspecified fields keep their defaults.
        assert_eq!(config.since_prefix, "@since ");
        assert_eq!(config.repo_url, "https://github.com/jenkinsci/jenkins");
    }

    #[test]
    fn test_replacement_strips_tag_prefix() {
        let config = Config::default();
        assert_eq!(config.replacement_for("jenkins-2.400"), "@since 2.400");
    }

    #[test]
    fn test_replacement_keeps_foreign_tag() {
        let config = Config::default();
        assert_eq!(config.replacement_for("2.400"), "@since 2.400");
    }

    #[test]
    fn test_validate_rejects_empty_marker() {
        let config = Config {
            marker: "  ".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        assert!(find_config_file(dir.path()).is_none());

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).unwrap();
        assert_eq!(find_config_file(dir.path()), Some(config_path));
    }

    #[test]
    fn test_load_config_defaults_without_file() {
        let dir = tempdir().unwrap();
        let loaded = load_config(dir.path()).unwrap();
        assert!(!loaded.from_file);
        assert_eq!(loaded.config.marker, "@since TODO");
    }
}
