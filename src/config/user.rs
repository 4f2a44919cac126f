use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ForgeError, Result};

/// Environment variable that pins the forge home directory.
pub const FORGE_HOME_ENV: &str = "FORGE_HOME";

const FALLBACK_TEMPLATE: &str = "go-service";

/// User-level configuration loaded from `~/.config/forge/config.toml`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UserConfig {
    /// Forge home; templates live in `<home>/templates`.
    #[serde(default)]
    pub home: Option<PathBuf>,

    /// Overrides `<home>/templates`.
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,

    /// Template used by `forge new` when `--template` is omitted.
    #[serde(default)]
    pub default_template: Option<String>,
}

/// Get the path to the user config file.
fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("forge").join("config.toml"))
}

/// Load user configuration from the XDG config directory.
///
/// Returns `Ok(None)` if the config file does not exist.
pub fn load_user_config() -> Result<Option<UserConfig>> {
    match config_path() {
        Some(path) => load_user_config_from(&path),
        None => Ok(None),
    }
}

pub fn load_user_config_from(path: &Path) -> Result<Option<UserConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|e| ForgeError::Io {
        context: format!("reading user config {}", path.display()),
        source: e,
    })?;

    let config: UserConfig = toml::from_str(&content).map_err(|e| ForgeError::UserConfigParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(Some(config))
}

/// Process-wide settings, resolved once in `main` and passed down explicitly.
#[derive(Debug, Clone)]
pub struct ForgeConfig {
    pub home: PathBuf,
    pub templates_dir: PathBuf,
    pub default_template: String,
    pub quiet: bool,
    pub no_color: bool,
}

impl ForgeConfig {
    /// Resolve from `FORGE_HOME`, the user config file, then the executable's location.
    pub fn resolve(user: Option<UserConfig>) -> Self {
        let user = user.unwrap_or_default();
        let env_home = std::env::var_os(FORGE_HOME_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let home = env_home
            .or(user.home)
            .unwrap_or_else(home_from_executable);
        let templates_dir = user
            .templates_dir
            .unwrap_or_else(|| home.join("templates"));

        debug!(home = %home.display(), templates = %templates_dir.display(), "resolved forge home");

        Self {
            home,
            templates_dir,
            default_template: user
                .default_template
                .unwrap_or_else(|| FALLBACK_TEMPLATE.to_string()),
            quiet: false,
            no_color: false,
        }
    }

    /// Configuration rooted at an explicit templates directory.
    pub fn with_templates_dir(templates_dir: impl Into<PathBuf>) -> Self {
        let templates_dir = templates_dir.into();
        let home = templates_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            home,
            templates_dir,
            default_template: FALLBACK_TEMPLATE.to_string(),
            quiet: false,
            no_color: false,
        }
    }
}

fn home_from_executable() -> PathBuf {
    let Ok(exe) = std::env::current_exe() else {
        return PathBuf::from(".");
    };
    let exe = exe.canonicalize().unwrap_or(exe);
    match exe.parent() {
        Some(dir) => home_from_exe_dir(dir),
        None => PathBuf::from("."),
    }
}

/// `cmd/<tool>/` → project root; else the first of `dir` or its parent holding `templates/`.
fn home_from_exe_dir(dir: &Path) -> PathBuf {
    if let Some(grandparent) = dir.parent() {
        if grandparent.file_name().is_some_and(|n| n == "cmd") {
            if let Some(root) = grandparent.parent() {
                return root.to_path_buf();
            }
        }
    }

    if dir.join("templates").is_dir() {
        return dir.to_path_buf();
    }

    if let Some(parent) = dir.parent() {
        if parent.join("templates").is_dir() {
            return parent.to_path_buf();
        }
    }

    dir.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_user_config() {
        let toml_str = r#"
home = "/opt/forge"
default_template = "java-ddd"
"#;
        let config: UserConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.home.as_deref(), Some(Path::new("/opt/forge")));
        assert_eq!(config.default_template.as_deref(), Some("java-ddd"));
        assert!(config.templates_dir.is_none());
    }

    #[test]
    fn parse_empty_config() {
        let config: UserConfig = toml::from_str("").unwrap();
        assert!(config.home.is_none());
    }

    #[test]
    fn malformed_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not valid [[ toml").unwrap();

        let result = load_user_config_from(&path);
        assert!(matches!(result, Err(ForgeError::UserConfigParse { .. })));
    }

    #[test]
    fn missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_user_config_from(&dir.path().join("absent.toml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn templates_dir_override_wins() {
        let user = UserConfig {
            home: Some(PathBuf::from("/opt/forge")),
            templates_dir: Some(PathBuf::from("/srv/templates")),
            default_template: None,
        };
        let config = ForgeConfig::resolve(Some(user));
        assert_eq!(config.templates_dir, PathBuf::from("/srv/templates"));
        assert_eq!(config.default_template, "go-service");
    }

    #[test]
    fn exe_dir_under_cmd_maps_to_project_root() {
        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("cmd").join("forge");
        std::fs::create_dir_all(&bin).unwrap();
        assert_eq!(home_from_exe_dir(&bin), dir.path());
    }

    #[test]
    fn exe_dir_prefers_sibling_templates() {
        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        std::fs::create_dir_all(dir.path().join("templates")).unwrap();
        assert_eq!(home_from_exe_dir(&bin), dir.path());

        std::fs::create_dir_all(bin.join("templates")).unwrap();
        assert_eq!(home_from_exe_dir(&bin), bin);
    }
}
