use super::load_editor;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;

#[derive(Debug, Args)]
pub struct BlocksArgs {
    /// Print the catalog as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn blocks(args: BlocksArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let editor = load_editor(&config, cwd)?;
    let catalog = editor.blocks();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&catalog.summaries())?);
        return Ok(());
    }

    for (category, blocks) in catalog.by_category() {
        let category = if category.is_empty() { "Uncategorized" } else { category };
        println!("{}", category.bright_blue().bold());
        for block in blocks {
            println!(
                "  {:<12} {} {}",
                block.id.bright_white(),
                block.label,
                format!("({})", block.content.type_id).bright_black()
            );
        }
    }
    println!();
    println!("{} blocks ({})", catalog.len(), config.project_type);
    Ok(())
}
