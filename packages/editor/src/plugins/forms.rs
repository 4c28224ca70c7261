use super::{Plugin, PluginContext, PluginResult};
use crate::blocks::{Block, Position};
use crate::component::DEFAULT_TYPE;
use crate::registry::{Blueprint, NestingRule, Recognizer, TypeDefinition};
use crate::traits::{SelectOption, TraitDef};

/// Form control types and blocks
#[derive(Debug, Default, Clone, Copy)]
pub struct FormsPlugin;

impl Plugin for FormsPlugin {
    fn name(&self) -> &'static str {
        "forms"
    }

    fn register(&self, ctx: &mut PluginContext<'_>) -> PluginResult<()> {
        let input_types = ["text", "email", "password", "number"]
            .iter()
            .map(|t| SelectOption::new(*t, *t))
            .collect();

        ctx.register(
            TypeDefinition::new("input")
                .extends(DEFAULT_TYPE)
                .recognize(Recognizer::tag_names(["input"]))
                .tag_name("input")
                .droppable(NestingRule::Never)
                .only_traits([
                    TraitDef::text("name"),
                    TraitDef::text("placeholder"),
                    TraitDef::select("type", input_types),
                    TraitDef::checkbox("required"),
                ]),
        )?;

        ctx.register(
            TypeDefinition::new("label")
                .extends("text")
                .recognize(Recognizer::tag_names(["label"]))
                .tag_name("label")
                .only_traits(["for"]),
        )?;

        ctx.register(
            TypeDefinition::new("button")
                .extends("text")
                .recognize(Recognizer::tag_names(["button"]))
                .tag_name("button")
                .only_traits([TraitDef::select(
                    "type",
                    vec![
                        SelectOption::new("submit", "Submit"),
                        SelectOption::new("reset", "Reset"),
                        SelectOption::new("button", "Button"),
                    ],
                )]),
        )?;

        let category = "Forms";
        ctx.blocks.add(
            Block::new("input", Blueprint::new("input").attribute("type", "text"))
                .label("Input")
                .category(category),
            Position::End,
        );
        ctx.blocks.add(
            Block::new("label", Blueprint::new("label").text("Label"))
                .label("Label")
                .category(category),
            Position::End,
        );
        ctx.blocks.add(
            Block::new(
                "button",
                Blueprint::new("button").attribute("type", "submit").text("Send"),
            )
            .label("Button")
            .category(category),
            Position::End,
        );
        ctx.blocks.add(
            Block::new(
                "select",
                Blueprint::new("select").components(vec![
                    Blueprint::new("option").attribute("value", "opt1").text("Option 1"),
                    Blueprint::new("option").attribute("value", "opt2").text("Option 2"),
                ]),
            )
            .label("Select")
            .category(category),
            Position::End,
        );
        Ok(())
    }
}
