//! # Plugins
//!
//! A plugin registers component types and blocks during editor bootstrap.
//! Plugins run in order against the same builders, so later plugins can
//! override what earlier ones declared.

mod basic;
mod forms;
pub mod web;

pub use basic::BasicPlugin;
pub use forms::FormsPlugin;
pub use web::WebPlugin;

use crate::blocks::{BlockCatalog, BlockProps};
use crate::registry::{RegistryBuilder, RegistryError, TypeDefinition};
use crate::traits::DEFAULT_COMMIT_SETTLE;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Plugin `{plugin}` failed: {source}")]
pub struct PluginError {
    pub plugin: &'static str,
    #[source]
    pub source: RegistryError,
}

pub type PluginResult<T> = Result<T, PluginError>;

/// Options shared by every plugin of a preset
#[derive(Debug, Clone, PartialEq)]
pub struct PluginOptions {
    /// Applied to each block a plugin adds
    pub block: BlockProps,
    /// Settle window of debounced trait commits
    pub commit_settle: Duration,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            block: BlockProps::default(),
            commit_settle: DEFAULT_COMMIT_SETTLE,
        }
    }
}

/// Builder access handed to a plugin while it registers
pub struct PluginContext<'a> {
    pub types: &'a mut RegistryBuilder,
    pub blocks: &'a mut BlockCatalog,
    pub options: &'a PluginOptions,
    plugin: &'static str,
}

impl<'a> PluginContext<'a> {
    pub fn new(
        types: &'a mut RegistryBuilder,
        blocks: &'a mut BlockCatalog,
        options: &'a PluginOptions,
    ) -> Self {
        Self {
            types,
            blocks,
            options,
            plugin: "",
        }
    }

    pub fn register(&mut self, definition: TypeDefinition) -> PluginResult<()> {
        let plugin = self.plugin;
        self.types
            .register(definition)
            .map_err(|source| PluginError { plugin, source })
    }

    /// Re-register an existing type after editing a copy of its definition.
    ///
    /// The type must already exist; its absence fails the plugin.
    pub fn override_type(
        &mut self,
        id: &str,
        edit: impl FnOnce(&mut TypeDefinition),
    ) -> PluginResult<()> {
        let plugin = self.plugin;
        let mut definition = self
            .types
            .get_type(id)
            .map_err(|source| PluginError { plugin, source })?
            .clone();
        edit(&mut definition);
        self.register(definition)
    }
}

pub trait Plugin {
    fn name(&self) -> &'static str;

    fn register(&self, ctx: &mut PluginContext<'_>) -> PluginResult<()>;
}

/// Run plugins in order
pub fn load_plugins(plugins: &[Box<dyn Plugin>], ctx: &mut PluginContext<'_>) -> PluginResult<()> {
    for plugin in plugins {
        tracing::debug!(plugin = plugin.name(), "Loading plugin");
        ctx.plugin = plugin.name();
        plugin.register(ctx)?;
    }
    Ok(())
}

/// Preset selecting the plugins an editor loads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    #[default]
    Web,
}

impl ProjectType {
    pub fn plugins(&self) -> Vec<Box<dyn Plugin>> {
        match self {
            ProjectType::Web => vec![
                Box::new(BasicPlugin),
                Box::new(FormsPlugin),
                Box::new(WebPlugin),
            ],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Web => "web",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "web" => Ok(ProjectType::Web),
            other => Err(format!("unknown project type `{}`", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_requires_existing_type() {
        let mut types = RegistryBuilder::new();
        let mut blocks = BlockCatalog::new();
        let options = PluginOptions::default();
        let mut ctx = PluginContext::new(&mut types, &mut blocks, &options);

        let err = ctx.override_type("link", |_| {}).unwrap_err();
        assert!(err.source.is_not_found());
    }

    #[test]
    fn test_project_type_parse() {
        assert_eq!("web".parse::<ProjectType>(), Ok(ProjectType::Web));
        assert!("mobile".parse::<ProjectType>().is_err());
        assert_eq!(ProjectType::Web.plugins().len(), 3);
    }
}
