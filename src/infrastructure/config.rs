//! Build configuration: the base path artifacts are served under and the
//! ordered list of export plugins.

use crate::domain::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Export integrations that can be listed under `plugins`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginKind {
    Html,
    Csv,
}

/// Build configuration with exactly two recognized options.
///
/// ```toml
/// base = "simplitrac/frontend_changed/"
/// plugins = ["html", "csv"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Deployment base path, always ending in `/`
    #[serde(default = "default_base")]
    pub base: String,

    /// Plugins in the order they run
    #[serde(default = "default_plugins")]
    pub plugins: Vec<PluginKind>,
}

fn default_base() -> String {
    "/".to_string()
}

fn default_plugins() -> Vec<PluginKind> {
    vec![PluginKind::Html]
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            base: default_base(),
            plugins: default_plugins(),
        }
    }
}

impl BuildConfig {
    /// Default location: `<config_dir>/simplitrac/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("simplitrac").join("config.toml"))
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(content: &str) -> DomainResult<Self> {
        let config: BuildConfig =
            toml::from_str(content).map_err(|e| DomainError::InvalidConfig(e.to_string()))?;
        config.validated()
    }

    /// Loads an explicit config file. A missing file is an error.
    pub fn load(path: &Path) -> DomainResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DomainError::Io(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_toml(&content)?;
        tracing::info!(path = %path.display(), base = %config.base, "loaded build config");
        Ok(config)
    }

    /// Loads the default config file, falling back to defaults when it
    /// does not exist.
    pub fn load_or_default() -> DomainResult<Self> {
        Self::load_or_default_from(Self::default_path())
    }

    /// Loads `path` when it exists. A missing file or an unknown config
    /// directory yields the defaults.
    pub fn load_or_default_from(path: Option<PathBuf>) -> DomainResult<Self> {
        match path {
            Some(path) if path.exists() => Self::load(&path),
            Some(path) => {
                tracing::warn!(path = %path.display(), "no build config found, using defaults");
                Ok(Self::default())
            }
            None => {
                tracing::warn!("could not find config directory, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Normalizes the base path and rejects duplicate plugins.
    pub fn validated(mut self) -> DomainResult<Self> {
        self.base = normalize_base(&self.base)?;

        let mut seen = HashSet::new();
        for plugin in &self.plugins {
            if !seen.insert(*plugin) {
                return Err(DomainError::InvalidConfig(format!(
                    "plugin {:?} listed more than once",
                    plugin
                )));
            }
        }
        Ok(self)
    }

    /// Joins the base path and an asset file name.
    ///
    /// ```
    /// use simplitrac::infrastructure::BuildConfig;
    ///
    /// let config = BuildConfig::default();
    /// assert_eq!(config.asset_path("index.html"), "/index.html");
    /// ```
    pub fn asset_path(&self, file: &str) -> String {
        format!("{}{}", self.base, file.trim_start_matches('/'))
    }

    /// Base path as a directory relative to an output root.
    pub fn output_dir(&self, root: &Path) -> PathBuf {
        let relative = self.base.trim_start_matches("./").trim_matches('/');
        if relative.is_empty() || relative == "." {
            root.to_path_buf()
        } else {
            root.join(relative)
        }
    }
}

fn normalize_base(base: &str) -> DomainResult<String> {
    let trimmed = base.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidConfig("base must not be empty".to_string()));
    }
    if trimmed.split('/').any(|segment| segment == "..") {
        return Err(DomainError::InvalidConfig(format!(
            "base must not leave the output directory: {}",
            trimmed
        )));
    }
    if trimmed.ends_with('/') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{}/", trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BuildConfig::default();
        assert_eq!(config.base, "/");
        assert_eq!(config.plugins, vec![PluginKind::Html]);
    }

    #[test]
    fn test_parse_full_config() {
        let config = BuildConfig::from_toml(
            r#"
            base = "simplitrac/frontend_changed/"
            plugins = ["csv", "html"]
            "#,
        )
        .unwrap();
        assert_eq!(config.base, "simplitrac/frontend_changed/");
        assert_eq!(config.plugins, vec![PluginKind::Csv, PluginKind::Html]);
    }

    #[test]
    fn test_missing_options_use_defaults() {
        let config = BuildConfig::from_toml("").unwrap();
        assert_eq!(config, BuildConfig::default());
    }

    #[test]
    fn test_base_gets_trailing_slash() {
        let config = BuildConfig::from_toml(r#"base = "/app""#).unwrap();
        assert_eq!(config.base, "/app/");
    }

    #[test]
    fn test_relative_base_accepted() {
        let config = BuildConfig::from_toml(r#"base = "./""#).unwrap();
        assert_eq!(config.base, "./");
    }

    #[test]
    fn test_empty_base_rejected() {
        let result = BuildConfig::from_toml(r#"base = "  ""#);
        assert!(matches!(result, Err(DomainError::InvalidConfig(_))));
    }

    #[test]
    fn test_parent_dir_base_rejected() {
        let result = BuildConfig::from_toml(r#"base = "../outside/""#);
        assert!(matches!(result, Err(DomainError::InvalidConfig(_))));
    }

    #[test]
    fn test_unknown_plugin_rejected() {
        let result = BuildConfig::from_toml(r#"plugins = ["react"]"#);
        assert!(matches!(result, Err(DomainError::InvalidConfig(_))));
    }

    #[test]
    fn test_duplicate_plugin_rejected() {
        let result = BuildConfig::from_toml(r#"plugins = ["html", "html"]"#);
        assert!(matches!(result, Err(DomainError::InvalidConfig(_))));
    }

    #[test]
    fn test_unknown_option_rejected() {
        let result = BuildConfig::from_toml(r#"server = { port = 3000 }"#);
        assert!(matches!(result, Err(DomainError::InvalidConfig(_))));
    }

    #[test]
    fn test_empty_plugin_list_allowed() {
        let config = BuildConfig::from_toml("plugins = []").unwrap();
        assert!(config.plugins.is_empty());
    }

    #[test]
    fn test_asset_path() {
        let config = BuildConfig::from_toml(r#"base = "simplitrac/frontend_changed""#).unwrap();
        assert_eq!(
            config.asset_path("/index.html"),
            "simplitrac/frontend_changed/index.html"
        );
    }

    #[test]
    fn test_output_dir() {
        let root = Path::new("dist");
        assert_eq!(BuildConfig::default().output_dir(root), PathBuf::from("dist"));

        let nested = BuildConfig::from_toml(r#"base = "/simplitrac/frontend_changed/""#).unwrap();
        assert_eq!(
            nested.output_dir(root),
            PathBuf::from("dist/simplitrac/frontend_changed")
        );

        let relative = BuildConfig::from_toml(r#"base = "./""#).unwrap();
        assert_eq!(relative.output_dir(root), PathBuf::from("dist"));
    }

    #[test]
    fn test_load_or_default_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = BuildConfig::load_or_default_from(Some(path)).unwrap();
        assert_eq!(config, BuildConfig::default());
    }

    #[test]
    fn test_load_or_default_from_without_config_dir() {
        let config = BuildConfig::load_or_default_from(None).unwrap();
        assert_eq!(config, BuildConfig::default());
    }

    #[test]
    fn test_load_or_default_from_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "base = \"/app\"\nplugins = [\"csv\"]\n").unwrap();

        let config = BuildConfig::load_or_default_from(Some(path)).unwrap();
        assert_eq!(config.base, "/app/");
        assert_eq!(config.plugins, vec![PluginKind::Csv]);
    }

    #[test]
    fn test_load_or_default_from_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "plugins = [\"react\"]\n").unwrap();

        let result = BuildConfig::load_or_default_from(Some(path));
        assert!(matches!(result, Err(DomainError::InvalidConfig(_))));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = BuildConfig::load(Path::new("/definitely/not/here/config.toml"));
        assert!(matches!(result, Err(DomainError::Io(_))));
    }
}
