use super::{Plugin, PluginContext, PluginResult};
use crate::blocks::{Block, Position};
use crate::component::{COMMENT_TYPE, DEFAULT_TYPE, TEXTNODE_TYPE, WRAPPER_TYPE};
use crate::registry::{Blueprint, NestingRule, Recognizer, Resizable, TypeDefinition};
use crate::traits::{SelectOption, TraitDef};

const ROW_CLASS: &str = "gjs-row";
const CELL_CLASS: &str = "gjs-cell";

const ROW_CSS: &str = ".gjs-row {
  display: table;
  padding: 10px;
  width: 100%;
}";

const CELL_CSS: &str = ".gjs-cell {
  width: 8%;
  display: table-cell;
  height: 75px;
}";

/// Foundational types and the basic layout blocks
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicPlugin;

impl Plugin for BasicPlugin {
    fn name(&self) -> &'static str {
        "basic"
    }

    fn register(&self, ctx: &mut PluginContext<'_>) -> PluginResult<()> {
        register_types(ctx)?;
        register_blocks(ctx);
        Ok(())
    }
}

fn register_types(ctx: &mut PluginContext<'_>) -> PluginResult<()> {
    ctx.register(TypeDefinition::new(DEFAULT_TYPE).traits(["id", "title"]))?;

    ctx.register(
        TypeDefinition::new(WRAPPER_TYPE)
            .extends(DEFAULT_TYPE)
            .tag_name("body")
            .draggable(NestingRule::Never)
            .copyable(false)
            .removable(false)
            .only_traits(Vec::<TraitDef>::new())
            .stylable([
                "background",
                "background-color",
                "background-image",
                "background-repeat",
                "background-attachment",
                "background-position",
                "background-size",
            ]),
    )?;

    ctx.register(
        TypeDefinition::new(TEXTNODE_TYPE)
            .tag_name("")
            .droppable(NestingRule::Never)
            .layerable(false),
    )?;
    ctx.register(
        TypeDefinition::new(COMMENT_TYPE)
            .tag_name("")
            .droppable(NestingRule::Never)
            .layerable(false),
    )?;

    ctx.register(
        TypeDefinition::new("text")
            .extends(DEFAULT_TYPE)
            .droppable(NestingRule::Never),
    )?;

    ctx.register(
        TypeDefinition::new("image")
            .extends(DEFAULT_TYPE)
            .recognize(Recognizer::tag_names(["img"]))
            .tag_name("img")
            .droppable(NestingRule::Never)
            .resizable(Resizable::default())
            .only_traits(["alt"]),
    )?;

    ctx.register(
        TypeDefinition::new("link")
            .extends("text")
            .recognize(Recognizer::tag_names(["a"]))
            .tag_name("a")
            .only_traits([
                TraitDef::text("title"),
                TraitDef::href("href"),
                TraitDef::select(
                    "target",
                    vec![
                        SelectOption::new("", "This window"),
                        SelectOption::new("_blank", "New window"),
                    ],
                ),
            ]),
    )?;

    ctx.register(
        TypeDefinition::new("svg")
            .extends(DEFAULT_TYPE)
            .recognize(Recognizer::tag_names(["svg"]))
            .tag_name("svg")
            .only_traits(Vec::<TraitDef>::new()),
    )?;

    ctx.register(
        TypeDefinition::new("option")
            .extends(DEFAULT_TYPE)
            .recognize(Recognizer::tag_names(["option"]))
            .tag_name("option")
            .draggable(NestingRule::types(["select"]))
            .droppable(NestingRule::Never)
            .only_traits(["value"]),
    )?;

    ctx.register(
        TypeDefinition::new("select")
            .extends(DEFAULT_TYPE)
            .recognize(Recognizer::tag_names(["select"]))
            .tag_name("select")
            .droppable(NestingRule::types(["option"]))
            .only_traits(["name"]),
    )?;

    ctx.register(
        TypeDefinition::new("row")
            .extends(DEFAULT_TYPE)
            .recognize(Recognizer::class(ROW_CLASS))
            .attribute("class", ROW_CLASS)
            .droppable(NestingRule::types(["cell"]))
            .styles(ROW_CSS),
    )?;

    ctx.register(
        TypeDefinition::new("cell")
            .extends(DEFAULT_TYPE)
            .recognize(Recognizer::class(CELL_CLASS))
            .attribute("class", CELL_CLASS)
            .draggable(NestingRule::types(["row"]))
            .styles(CELL_CSS),
    )?;

    Ok(())
}

fn row(widths: &[Option<&str>]) -> Blueprint {
    let cells = widths
        .iter()
        .map(|width| match width {
            Some(width) => Blueprint::new("cell").style("width", *width),
            None => Blueprint::new("cell"),
        })
        .collect();
    Blueprint::new("row").components(cells)
}

fn register_blocks(ctx: &mut PluginContext<'_>) {
    let columns: [(&str, &str, &[Option<&str>]); 4] = [
        ("column1", "1 Column", &[None]),
        ("column2", "2 Columns", &[None, None]),
        ("column3", "3 Columns", &[None, None, None]),
        ("column3-7", "2 Columns 3/7", &[Some("30%"), Some("70%")]),
    ];
    for (id, label, widths) in columns {
        ctx.blocks.add(
            Block::new(id, row(widths)).label(label).category("Basic"),
            Position::End,
        );
    }

    ctx.blocks.add(
        Block::new(
            "text",
            Blueprint::new("text")
                .text("Insert your text here")
                .style("padding", "10px"),
        )
        .label("Text")
        .category("Basic"),
        Position::End,
    );

    ctx.blocks.add(
        Block::new(
            "link",
            Blueprint::new("link")
                .text("Link")
                .style("display", "inline-block")
                .style("padding", "5px")
                .style("min-height", "50px")
                .style("min-width", "50px"),
        )
        .label("Link")
        .category("Basic"),
        Position::End,
    );

    let mut image = Block::new("image", Blueprint::new("image").style("color", "black"))
        .label("Image")
        .category("Basic");
    image.activate = true;
    ctx.blocks.add(image, Position::End);
}
