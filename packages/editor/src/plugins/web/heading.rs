use super::HEADING_CLASS;
use crate::blocks::{Block, Position};
use crate::plugins::{PluginContext, PluginResult};
use crate::registry::{Blueprint, EmptyState, Recognizer, TypeDefinition};
use crate::traits::{SelectOption, TraitDef};

const HEADING_TYPE: &str = "heading";

const HEADING_CSS: &str = ".gjs-heading {
  margin: 0;
}";

const HEADING_MEDIA: &str = r#"<svg viewBox="0 0 24 24">
  <path d="M8.3 11.5h7.4V6.9l-.2-1.6a1 1 0 00-.5-.5c-.3-.2-.7-.3-1-.3h-.6v-.4h6.8v.4h-.6c-.4 0-.7.1-1 .3a1 1 0 00-.6.6L18 6.9v10.3c0 .8 0 1.3.2 1.6 0 .2.2.3.4.5.4.2.7.3 1.1.3h.6v.4h-6.8v-.4h.5c.7 0 1.2-.2 1.5-.6.2-.3.3-.9.3-1.8v-4.9H8.3v4.9l.1 1.6.5.5c.3.2.7.3 1 .3h.7v.4H3.7v-.4h.6c.7 0 1.1-.2 1.4-.6.2-.3.3-.9.3-1.8V6.9L6 5.3a1 1 0 00-.5-.5l-1-.3h-.7v-.4h6.9v.4H10c-.4 0-.8.1-1 .3a1 1 0 00-.6.6l-.1 1.5v4.6z"></path>
</svg>"#;

pub(super) fn register(ctx: &mut PluginContext<'_>) -> PluginResult<()> {
    let block = Block::new(
        HEADING_TYPE,
        Blueprint::new(HEADING_TYPE).text("Insert your text here"),
    )
    .media(HEADING_MEDIA)
    .with_props(&ctx.options.block);
    ctx.blocks.add(block, Position::Before("text".to_string()));

    let sizes = [
        ("h1", "One (largest)"),
        ("h2", "Two"),
        ("h3", "Three"),
        ("h4", "Four"),
        ("h5", "Five"),
        ("h6", "Six (smallest)"),
    ]
    .into_iter()
    .map(|(value, name)| SelectOption::new(value, name))
    .collect();

    ctx.register(
        TypeDefinition::new(HEADING_TYPE)
            .extends("text")
            .recognize(Recognizer::tag_names(["h1", "h2", "h3", "h4", "h5", "h6"]))
            .empty_state(EmptyState::Enabled)
            .tag_name("h1")
            .attribute("class", HEADING_CLASS)
            .styles(HEADING_CSS)
            .traits([TraitDef::select("tagName", sizes)
                .label("Size")
                .change_prop()]),
    )
}
