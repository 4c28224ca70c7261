use super::LINK_CLASS;
use crate::blocks::{Block, Position};
use crate::component::WRAPPER_TYPE;
use crate::plugins::{PluginContext, PluginResult};
use crate::registry::{Blueprint, EmptyState, FieldList};
use crate::traits::{ChildListBinding, TraitDef};

const LINK_CSS: &str = ".gjs-link {
  vertical-align: top;
  max-width: 100%;
  display: inline-block;
  text-decoration: none;
  color: inherit;
}";

pub(super) fn register(ctx: &mut PluginContext<'_>) -> PluginResult<()> {
    ctx.override_type(WRAPPER_TYPE, |def| {
        def.defaults.empty_state = Some(EmptyState::Styled {
            style_in: Some("height: 100vh".to_string()),
            style_out: Some("padding: 0;".to_string()),
        });
        def.defaults.stylable.items.push("font-family".to_string());
    })?;

    ctx.override_type("text", |def| {
        def.defaults.highlightable = Some(false);
        def.defaults.empty_state = Some(EmptyState::Styled {
            style_in: Some("min-height: auto; font-size: inherit;".to_string()),
            style_out: None,
        });
    })?;

    ctx.override_type("image", |def| {
        def.defaults.traits = FieldList::replace(vec![
            TraitDef::text("alt"),
            TraitDef::checkbox("loading").value_true("lazy"),
        ]);
    })?;

    ctx.override_type("link", |def| {
        def.defaults.empty_state = Some(EmptyState::Enabled);
        def.defaults
            .attributes
            .insert("class".to_string(), LINK_CLASS.to_string());
        def.defaults.traits = FieldList::replace(vec![
            TraitDef::text("title"),
            TraitDef::checkbox("target").value_true("_blank"),
            TraitDef::href("href"),
        ]);
        def.defaults.styles = Some(LINK_CSS.to_string());
    })?;

    let content = Blueprint::new("link")
        .text("Link")
        .style("color", "#d983a6")
        .style("padding", "10px");
    let link_block = match ctx.blocks.get("link") {
        Some(existing) => Block {
            content,
            ..existing.clone()
        },
        None => Block::new("link", content).label("Link"),
    };
    ctx.blocks.add(link_block, Position::End);

    ctx.override_type("select", |def| {
        def.defaults
            .attributes
            .insert("class".to_string(), LINK_CLASS.to_string());
        def.defaults.styles = Some(LINK_CSS.to_string());
    })?;

    ctx.override_type("select", |def| {
        def.defaults.traits = FieldList::replace(vec![
            TraitDef::text("name"),
            TraitDef::checkbox("required"),
            TraitDef::stack("options", ["id", "label"])
                .binding(ChildListBinding::new("option", "value")),
        ]);
    })?;

    Ok(())
}
