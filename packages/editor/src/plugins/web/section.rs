use super::{CONTAINER_CLASS, SECTION_CLASS};
use crate::blocks::{Block, Position};
use crate::component::{DEFAULT_TYPE, WRAPPER_TYPE};
use crate::plugins::{PluginContext, PluginResult};
use crate::registry::{Blueprint, EmptyState, NestingRule, Recognizer, TypeDefinition};

const SECTION_TYPE: &str = "section";
const CONTAINER_TYPE: &str = "container";

const SECTION_CSS: &str = ".gjs-section {
  display: flex;
  padding: 50px 0;
}";

const CONTAINER_CSS: &str = ".gjs-container {
  width: 90%;
  margin: 0 auto;
  max-width: 1200px;
}";

const SECTION_MEDIA: &str = r#"<svg viewBox="0 0 24 24">
  <path fill="currentColor" d="M21 18H2V20H21V18M19 10V14H4V10H19M20 8H3C2.45 8 2 8.45 2 9V15C2 15.55 2.45 16 3 16H20C20.55 16 21 15.55 21 15V9C21 8.45 20.55 8 20 8M21 4H2V6H21V4Z" />
</svg>"#;

pub(super) fn register(ctx: &mut PluginContext<'_>) -> PluginResult<()> {
    let block = Block::new(SECTION_TYPE, Blueprint::new(SECTION_TYPE))
        .media(SECTION_MEDIA)
        .with_props(&ctx.options.block);
    ctx.blocks.add(block, Position::After("column3-7".to_string()));

    ctx.register(
        TypeDefinition::new(SECTION_TYPE)
            .extends(DEFAULT_TYPE)
            .recognize(Recognizer::class(SECTION_CLASS))
            .tag_name("section")
            .empty_state(EmptyState::Enabled)
            .draggable(NestingRule::types([WRAPPER_TYPE]))
            .droppable(NestingRule::types([CONTAINER_TYPE]))
            .attribute("class", SECTION_CLASS)
            .child(Blueprint::new(CONTAINER_TYPE))
            .styles(SECTION_CSS),
    )?;

    ctx.register(
        TypeDefinition::new(CONTAINER_TYPE)
            .extends(DEFAULT_TYPE)
            .recognize(Recognizer::class(CONTAINER_CLASS))
            .empty_state(EmptyState::Enabled)
            .copyable(false)
            .removable(false)
            .draggable(NestingRule::Never)
            .attribute("class", CONTAINER_CLASS)
            .styles(CONTAINER_CSS),
    )
}
