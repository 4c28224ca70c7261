use super::load_editor;
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_editor::ResolvedType;

#[derive(Debug, Args)]
pub struct TypesArgs {
    /// Show details of a single type
    pub type_id: Option<String>,
}

pub fn types(args: TypesArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let editor = load_editor(&config, cwd)?;
    let registry = editor.registry();

    if let Some(id) = &args.type_id {
        let resolved = registry
            .find_type(id)
            .ok_or_else(|| anyhow!("Unknown component type: {}", id))?;
        print_details(resolved);
        return Ok(());
    }

    for id in registry.type_ids() {
        let Some(resolved) = registry.find_type(id) else {
            continue;
        };
        println!(
            "  {:<10} {}",
            id.bright_white(),
            resolved.lineage.join(" > ").bright_black()
        );
    }
    println!();
    println!("{} types ({})", registry.len(), config.project_type);
    Ok(())
}

fn print_details(resolved: &ResolvedType) {
    println!("{}", resolved.id.bright_blue().bold());
    println!("  extends:   {}", resolved.lineage.join(" > "));
    println!("  tag:       {}", resolved.tag_name);
    if !resolved.attributes.is_empty() {
        let attributes: Vec<String> = resolved
            .attributes
            .iter()
            .map(|(name, value)| format!("{}=\"{}\"", name, value))
            .collect();
        println!("  attrs:     {}", attributes.join(" "));
    }
    println!("  draggable: {:?}", resolved.draggable);
    println!("  droppable: {:?}", resolved.droppable);

    if resolved.traits.is_empty() {
        println!("  traits:    -");
    } else {
        println!("  traits:");
        for def in &resolved.traits {
            println!(
                "    {:<10} {} {}",
                def.name,
                def.display_label(),
                format!("[{}]", def.kind.name()).bright_black()
            );
        }
    }
}
