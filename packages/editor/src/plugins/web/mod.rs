//! # Web Plugin
//!
//! Custom block catalog for web projects: overrides of the foundational
//! types, plus heading, section/container and icon blocks.
//!
//! Blocks are placed relative to the basic ones:
//!
//! ```text
//! column1 column2 column3 column3-7 [section] [heading] text link image ... [icon]
//! ```

mod heading;
mod icon;
mod overrides;
mod section;

pub use icon::SvgContentBinding;

use super::{Plugin, PluginContext, PluginResult};

pub const LINK_CLASS: &str = "gjs-link";
pub const HEADING_CLASS: &str = "gjs-heading";
pub const SECTION_CLASS: &str = "gjs-section";
pub const CONTAINER_CLASS: &str = "gjs-container";
pub const ICON_CLASS: &str = "gjs-icon";
pub const ICON_ATTRIBUTE: &str = "data-type-icon";

#[derive(Debug, Default, Clone, Copy)]
pub struct WebPlugin;

impl Plugin for WebPlugin {
    fn name(&self) -> &'static str {
        "web"
    }

    fn register(&self, ctx: &mut PluginContext<'_>) -> PluginResult<()> {
        overrides::register(ctx)?;
        heading::register(ctx)?;
        section::register(ctx)?;
        icon::register(ctx)?;
        Ok(())
    }
}
