//! Configuration module
//!
//! JSON file at `~/.jinfo/config.json`, created with defaults on first load.
//! Loaded once per invocation and passed to each command handler.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::core::entry::MemoType;
use crate::core::error::{MemoError, Result};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default = "default_project_name")]
    pub default_project: String,

    #[serde(default)]
    pub projects: BTreeMap<String, ProjectConfig>,

    #[serde(default)]
    pub preferences: Preferences,

    /// Empty means "use the built-in types"
    #[serde(default)]
    pub memo_types: Vec<MemoType>,
}

impl Default for Config {
    fn default() -> Self {
        let mut projects = BTreeMap::new();
        projects.insert(
            default_project_name(),
            ProjectConfig {
                path: default_project_dir(),
                description: "Default project".to_string(),
            },
        );

        Self {
            version: default_version(),
            default_project: default_project_name(),
            projects,
            preferences: Preferences::default(),
            memo_types: MemoType::defaults(),
        }
    }
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_project_name() -> String {
    "default".to_string()
}

fn default_project_dir() -> PathBuf {
    let documents = directories::UserDirs::new()
        .map(|u| {
            u.document_dir()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| u.home_dir().join("Documents"))
        })
        .unwrap_or_else(|| PathBuf::from("Documents"));
    documents.join("jinfo").join("default")
}

/// A named directory of day-files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub path: PathBuf,

    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Display-only; day-file stems are always `YYYY-MM-DD`
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Display-only; stored timestamps are always `HH:mm:ss`
    #[serde(default = "default_time_format")]
    pub time_format: String,

    /// Appended to memos added from the command line when missing from the content
    #[serde(default)]
    pub default_tags: Vec<String>,

    #[serde(default)]
    pub color_scheme: ColorScheme,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            time_format: default_time_format(),
            default_tags: Vec::new(),
            color_scheme: ColorScheme::default(),
        }
    }
}

fn default_date_format() -> String {
    "YYYY-MM-DD".to_string()
}

fn default_time_format() -> String {
    "HH:mm:ss".to_string()
}

/// Colour names for terminal status lines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorScheme {
    #[serde(default = "default_success_color")]
    pub success: String,

    #[serde(default = "default_error_color")]
    pub error: String,

    #[serde(default = "default_info_color")]
    pub info: String,

    #[serde(default = "default_warning_color")]
    pub warning: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            success: default_success_color(),
            error: default_error_color(),
            info: default_info_color(),
            warning: default_warning_color(),
        }
    }
}

fn default_success_color() -> String {
    "green".to_string()
}

fn default_error_color() -> String {
    "red".to_string()
}

fn default_info_color() -> String {
    "blue".to_string()
}

fn default_warning_color() -> String {
    "yellow".to_string()
}

impl Config {
    /// Get global config path (~/.jinfo/config.json)
    pub fn global_config_path() -> Option<PathBuf> {
        directories::UserDirs::new().map(|u| u.home_dir().join(".jinfo").join("config.json"))
    }

    /// Load config, writing defaults (and default project dirs) if the file is absent
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Self::bootstrap(path, Config::default());
        }
        Self::load_from(path)
    }

    /// Write `config` as the initial file and create its project directories
    pub fn bootstrap(path: &Path, config: Config) -> Result<Self> {
        config.save_to(path)?;
        for project in config.projects.values() {
            fs::create_dir_all(&project.path)?;
        }
        info!(path = %path.display(), "created default config");
        Ok(config)
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        let written = match path.parent() {
            Some(parent) => fs::create_dir_all(parent).and_then(|_| fs::write(path, &content)),
            None => fs::write(path, &content),
        };
        if let Err(e) = written {
            error!(path = %path.display(), error = %e, "failed to save config");
            return Err(e.into());
        }
        Ok(())
    }

    /// Register a project and create its directory
    pub fn add_project(
        &mut self,
        name: &str,
        path: impl Into<PathBuf>,
        description: Option<&str>,
    ) -> Result<()> {
        if self.projects.contains_key(name) {
            return Err(MemoError::validation(format!(
                "project '{}' already exists",
                name
            )));
        }

        let path = path.into();
        fs::create_dir_all(&path)?;

        self.projects.insert(
            name.to_string(),
            ProjectConfig {
                path,
                description: description
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("{} project", name)),
            },
        );
        Ok(())
    }

    pub fn set_default_project(&mut self, name: &str) -> Result<()> {
        if !self.projects.contains_key(name) {
            return Err(MemoError::not_found(format!("project '{}'", name)));
        }
        self.default_project = name.to_string();
        Ok(())
    }

    /// Look up a project, falling back to the default project
    pub fn project(&self, name: Option<&str>) -> Result<&ProjectConfig> {
        let name = name.unwrap_or(&self.default_project);
        self.projects
            .get(name)
            .ok_or_else(|| MemoError::not_found(format!("project '{}'", name)))
    }

    pub fn memo_types(&self) -> Vec<MemoType> {
        if self.memo_types.is_empty() {
            MemoType::defaults()
        } else {
            self.memo_types.clone()
        }
    }

    pub fn memo_type(&self, key: &str) -> Option<MemoType> {
        self.memo_types().into_iter().find(|t| t.key == key)
    }

    /// Key-value memo file stored next to the config file
    pub fn inbox_path(config_path: &Path) -> PathBuf {
        config_path.with_file_name("inbox.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &Path) -> Config {
        let mut config = Config::default();
        config.projects.clear();
        config
            .add_project("default", dir.join("default"), None)
            .unwrap();
        config
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.version, "1.0.0");
        assert_eq!(config.default_project, "default");
        assert!(config.projects.contains_key("default"));
        assert_eq!(config.memo_types.len(), 10);
        assert_eq!(config.preferences.color_scheme.success, "green");
    }

    #[test]
    fn test_json_is_camel_case() {
        let json = serde_json::to_value(Config::default()).unwrap();
        assert!(json.get("defaultProject").is_some());
        assert!(json.get("memoTypes").is_some());
        assert!(json["preferences"].get("colorScheme").is_some());
        assert!(json["preferences"].get("defaultTags").is_some());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = serde_json::from_str(
            r#"{"defaultProject":"work","projects":{"work":{"path":"/tmp/w"}}}"#,
        )
        .unwrap();
        assert_eq!(config.default_project, "work");
        assert_eq!(config.version, "1.0.0");
        assert!(config.memo_types.is_empty());
        assert_eq!(config.memo_types().len(), 10);
        assert_eq!(config.preferences.time_format, "HH:mm:ss");
    }

    #[test]
    fn test_add_project_duplicate_is_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());

        config.add_project("work", dir.path().join("work"), Some("Work notes")).unwrap();
        assert!(dir.path().join("work").is_dir());
        assert_eq!(config.projects["work"].description, "Work notes");

        let err = config.add_project("work", dir.path().join("other"), None);
        assert!(matches!(err, Err(MemoError::Validation(_))));
    }

    #[test]
    fn test_add_project_default_description() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.add_project("side", dir.path().join("side"), None).unwrap();
        assert_eq!(config.projects["side"].description, "side project");
    }

    #[test]
    fn test_default_project_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.add_project("work", dir.path().join("work"), None).unwrap();

        assert_eq!(config.project(None).unwrap().path, dir.path().join("default"));
        config.set_default_project("work").unwrap();
        assert_eq!(config.project(None).unwrap().path, dir.path().join("work"));
        assert!(matches!(
            config.set_default_project("nope"),
            Err(MemoError::NotFound(_))
        ));
        assert!(matches!(config.project(Some("nope")), Err(MemoError::NotFound(_))));
    }

    #[test]
    fn test_bootstrap_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".jinfo").join("config.json");

        let mut initial = Config::default();
        initial.projects.clear();
        initial.projects.insert(
            "default".to_string(),
            ProjectConfig {
                path: dir.path().join("p"),
                description: "mine".to_string(),
            },
        );

        Config::bootstrap(&path, initial).unwrap();
        assert!(path.exists());
        assert!(dir.path().join("p").is_dir());

        let loaded = Config::load_or_init(&path).unwrap();
        assert_eq!(loaded.projects["default"].description, "mine");
        assert_eq!(loaded.memo_types, MemoType::defaults());
    }

    #[test]
    fn test_memo_type_lookup() {
        let config = Config::default();
        assert_eq!(config.memo_type("task").unwrap().label, "Task");
        assert!(config.memo_type("unknown").is_none());
    }

    #[test]
    fn test_inbox_path() {
        let path = PathBuf::from("/home/u/.jinfo/config.json");
        assert_eq!(
            Config::inbox_path(&path),
            PathBuf::from("/home/u/.jinfo/inbox.json")
        );
    }
}
