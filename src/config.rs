use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::loader::ColumnTypes;
use crate::profile::Profile;

/// Environment variable naming the config file when no CLI argument is given.
pub const CONFIG_ENV: &str = "RESEARCH_DASHBOARD_CONFIG";

// ---------------------------------------------------------------------------
// Dashboard configuration (JSON)
// ---------------------------------------------------------------------------

/// Everything is optional in the file; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub profile: Profile,
    pub window: WindowConfig,
    /// Projects/publications file opened at startup.
    pub projects_file: Option<PathBuf>,
    /// Column types enforced on every projects file, e.g. `{"Year": "integer"}`.
    pub column_types: ColumnTypes,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

impl DashboardConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Config path from the first CLI argument, else from [`CONFIG_ENV`].
    pub fn locate(mut args: impl Iterator<Item = String>) -> Option<PathBuf> {
        args.nth(1)
            .or_else(|| std::env::var(CONFIG_ENV).ok())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }

    /// Load the located config, or defaults when none is given.
    pub fn from_args(args: impl Iterator<Item = String>) -> Result<Self> {
        match Self::locate(args) {
            Some(path) => {
                log::info!("Loading config from {}", path.display());
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::ColumnType;

    #[test]
    fn test_load_partial_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "profile": {{ "institution": "University of Cape Town" }},
                "window": {{ "width": 900 }},
                "projects_file": "projects.csv",
                "column_types": {{ "Year": "integer", "DOI": "text" }}
            }}"#
        )
        .unwrap();

        let config = DashboardConfig::load(file.path()).unwrap();
        assert_eq!(config.profile.institution, "University of Cape Town");
        assert_eq!(config.profile.name, "Xadilam Mbambisa");
        assert_eq!(config.window.width, 900.0);
        assert_eq!(config.window.height, 800.0);
        assert_eq!(config.projects_file, Some(PathBuf::from("projects.csv")));
        assert_eq!(config.column_types.get("Year"), Some(&ColumnType::Integer));
    }

    #[test]
    fn test_bad_column_type_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "column_types": {{ "Year": "decade" }} }}"#).unwrap();
        let err = DashboardConfig::load(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("parsing config"));
    }

    #[test]
    fn test_locate_prefers_cli_argument() {
        let args = ["research-dashboard", "custom.json"].map(String::from);
        assert_eq!(
            DashboardConfig::locate(args.into_iter()),
            Some(PathBuf::from("custom.json"))
        );
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = DashboardConfig::load(Path::new("/nonexistent/dashboard.json")).unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }
}
