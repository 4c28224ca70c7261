use anyhow::{Context, Result};
use pagecraft_editor::{EditorConfig, ProjectType};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "pagecraft.config.json";

/// Pagecraft configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Plugin preset
    #[serde(default)]
    pub project_type: ProjectType,

    /// Export output directory
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// Embed styles in every page instead of writing `css/style.css`
    #[serde(default)]
    pub inline_css: bool,

    /// Markup of the seed page, used when no pages are listed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_html: Option<String>,

    #[serde(default)]
    pub pages: Vec<PageSource>,
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_pretty() -> bool {
    true
}

/// One page of the project, in export order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSource {
    pub id: String,
    pub name: String,

    /// HTML file holding the page body, relative to the config file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid {}", DEFAULT_CONFIG_NAME))?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to the output directory
    pub fn get_out_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.out_dir)
    }

    pub fn editor_config(&self) -> EditorConfig {
        EditorConfig {
            project_type: self.project_type,
            initial_html: self.initial_html.clone(),
            ..Default::default()
        }
    }
}

impl PageSource {
    /// Page markup; pages without a source start empty
    pub fn read_html(&self, cwd: &Path) -> Result<String> {
        match &self.source {
            Some(source) => {
                let path = cwd.join(source);
                std::fs::read_to_string(&path).with_context(|| {
                    format!("Cannot read page `{}` from {}", self.name, path.display())
                })
            }
            None => Ok(String::new()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_type: ProjectType::default(),
            out_dir: default_out_dir(),
            pretty: default_pretty(),
            inline_css: false,
            initial_html: None,
            pages: vec![],
        }
    }
}
