use crate::plugins::ProjectType;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Seed used when no initial markup is provided
pub const DEFAULT_INITIAL_HTML: &str = "<h1>Page builder</h1>";

/// Name of the page created from the seed
pub const DEFAULT_PAGE_NAME: &str = "Home page";

fn default_commit_settle_ms() -> u64 {
    500
}

/// Editor bootstrap options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    #[serde(default)]
    pub project_type: ProjectType,

    /// Markup of the first page
    #[serde(default)]
    pub initial_html: Option<String>,

    /// Settle window of debounced trait commits
    #[serde(default = "default_commit_settle_ms")]
    pub commit_settle_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            project_type: ProjectType::default(),
            initial_html: None,
            commit_settle_ms: default_commit_settle_ms(),
        }
    }
}

impl EditorConfig {
    pub fn with_initial_html(mut self, html: impl Into<String>) -> Self {
        self.initial_html = Some(html.into());
        self
    }

    pub fn commit_settle(&self) -> Duration {
        Duration::from_millis(self.commit_settle_ms)
    }

    /// Seed markup, falling back to [`DEFAULT_INITIAL_HTML`] when unset or blank
    pub fn seed_html(&self) -> &str {
        match self.initial_html.as_deref() {
            Some(html) if !html.trim().is_empty() => html,
            _ => DEFAULT_INITIAL_HTML,
        }
    }
}
