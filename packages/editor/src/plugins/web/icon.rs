use super::{ICON_ATTRIBUTE, ICON_CLASS};
use crate::blocks::{Block, Position};
use crate::component::{Component, DEFAULT_TYPE};
use crate::plugins::{PluginContext, PluginResult};
use crate::registry::{Blueprint, Content, NestingRule, Recognizer, Resizable, TypeDefinition};
use crate::traits::{
    CommitPolicy, TraitBinding, TraitContext, TraitDef, TraitResult, TraitValue,
};
use pagecraft_markup::{parse_html, Node};
use serde_json::Value;

const ICON_TYPE: &str = "icon";

pub const ICON_SVG: &str = r#"<svg viewBox="0 0 24 24">
  <path d="M16 9h3l-5 7m-4-7h4l-2 8M5 9h3l2 7m5-12h2l2 3h-3m-5-3h2l1 3h-4M7 4h2L8 7H5m1-5L2 8l10 14L22 8l-4-6H6z"></path>
</svg>"#;

const ICON_CSS: &str = ".gjs-icon {
  display: inline-block;
  text-decoration: none;
  color: inherit;
  vertical-align: middle;
  fill: currentColor;
  width: 50px;
  height: 50px;
}";

/// Code trait that swaps the icon's markup for a pasted `<svg>`
#[derive(Debug, Default, Clone, Copy)]
pub struct SvgContentBinding;

impl TraitBinding for SvgContentBinding {
    fn get_value(&self, _trait_def: &TraitDef, component: &Component) -> TraitValue {
        TraitValue::Text(component.inner_html())
    }

    fn set_value(&self, ctx: &mut TraitContext<'_>, value: TraitValue) -> TraitResult<()> {
        let markup = match value {
            TraitValue::Text(markup) => markup,
            _ => return Err(ctx.malformed("expected svg markup")),
        };

        let nodes = parse_html(&markup).map_err(|err| ctx.malformed(err.to_string()))?;
        let first = nodes
            .into_iter()
            .find(|node| !node.is_blank_text())
            .ok_or_else(|| ctx.malformed("no content"))?;

        match &first {
            Node::Element(element) if element.tag.eq_ignore_ascii_case("svg") => {}
            _ => return Err(ctx.malformed("content is not an <svg> element")),
        }

        let children = ctx.registry.import_nodes(&[first])?;
        ctx.component.replace_children(children);
        ctx.registry.adopt_children(ctx.component);
        ctx.emit_update();
        Ok(())
    }
}

pub(super) fn register(ctx: &mut PluginContext<'_>) -> PluginResult<()> {
    let block = Block::new(ICON_TYPE, Blueprint::new(ICON_TYPE))
        .media(ICON_SVG)
        .with_props(&ctx.options.block);
    ctx.blocks.add(block, Position::End);

    let content_trait = TraitDef::code("content", "html")
        .label("Content")
        .binding(SvgContentBinding)
        .commit(CommitPolicy::Debounced {
            wait: ctx.options.commit_settle,
            leading: false,
        });

    ctx.register(
        TypeDefinition::new(ICON_TYPE)
            .extends(DEFAULT_TYPE)
            .recognize(Recognizer::class(ICON_CLASS).or(Recognizer::attribute(ICON_ATTRIBUTE)))
            .droppable(NestingRule::Never)
            .attribute("class", ICON_CLASS)
            .attribute(ICON_ATTRIBUTE, "true")
            .resizable(Resizable::corners())
            .components(Content::Markup(ICON_SVG.to_string()))
            .only_traits([TraitDef::text("id"), TraitDef::text("title"), content_trait])
            .child_prop("layerable", Value::Bool(false))
            .styles(ICON_CSS),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Registry, RegistryBuilder};
    use crate::traits::{TraitError, UpdateLog};

    fn registry() -> Registry {
        let mut builder = RegistryBuilder::new();
        builder.register(TypeDefinition::new(DEFAULT_TYPE)).unwrap();
        builder
            .register(
                TypeDefinition::new("svg")
                    .tag_name("svg")
                    .recognize(Recognizer::tag_names(["svg"])),
            )
            .unwrap();
        builder
            .register(TypeDefinition::new(ICON_TYPE).child_prop("layerable", Value::Bool(false)))
            .unwrap();
        builder.build().unwrap()
    }

    fn set(
        markup: &str,
        icon: &mut Component,
        registry: &Registry,
        log: &mut UpdateLog,
    ) -> TraitResult<()> {
        let def = TraitDef::code("content", "html");
        let mut ctx = TraitContext::new(icon, registry, &def, log);
        SvgContentBinding.set_value(&mut ctx, TraitValue::text(markup))
    }

    #[test]
    fn test_svg_replaces_children() {
        let registry = registry();
        let mut icon = Component::new(ICON_TYPE, "div");
        let mut log = UpdateLog::new();

        let markup = "\n  <svg viewBox=\"0 0 1 1\"><path d=\"M0\"></path></svg>";
        set(markup, &mut icon, &registry, &mut log).unwrap();
        assert_eq!(icon.children.len(), 1);
        assert_eq!(icon.children[0].type_id, "svg");
        assert!(!icon.children[0].flag("layerable", true));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_non_svg_and_half_typed_markup_rejected() {
        let registry = registry();
        let mut icon = Component::new(ICON_TYPE, "div");
        let mut log = UpdateLog::new();

        let err = set("<div>nope</div>", &mut icon, &registry, &mut log).unwrap_err();
        assert!(matches!(err, TraitError::Malformed { .. }));
        assert!(set("<svg><path", &mut icon, &registry, &mut log).is_err());
        assert!(set("", &mut icon, &registry, &mut log).is_err());
        assert!(icon.children.is_empty());
        assert!(log.is_empty());
    }
}
