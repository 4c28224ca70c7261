use super::load_editor;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_export::{export_project, ExportOptions};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Embed styles in every page
    #[arg(long)]
    pub inline_css: bool,

    /// Disable pretty printing
    #[arg(long)]
    pub compact: bool,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,
}

pub fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let editor = load_editor(&config, cwd)?;

    let options = ExportOptions {
        pretty: config.pretty && !args.compact,
        inline_css: config.inline_css || args.inline_css,
        ..Default::default()
    };
    let bundle = export_project(editor.project(), editor.registry(), &options)?;

    if args.stdout {
        for file in &bundle.files {
            println!("{}", format!("// {}", file.path).bright_black());
            println!("{}", file.contents);
        }
        return Ok(());
    }

    let out_dir = match &args.out_dir {
        Some(dir) => PathBuf::from(cwd).join(dir),
        None => config.get_out_dir(cwd),
    };

    println!("{}", "Exporting pages...".bright_blue().bold());
    for file in &bundle.files {
        println!("  {} {}", "✓".green(), file.path);
    }
    bundle.write_to(&out_dir)?;

    for collision in &bundle.collisions {
        println!(
            "{} `{}` skipped: {} already belongs to `{}`",
            "!".yellow(),
            collision.skipped,
            collision.filename,
            collision.kept
        );
    }
    if bundle.unresolved_links > 0 {
        println!(
            "{} {} link(s) point at missing pages",
            "!".yellow(),
            bundle.unresolved_links
        );
    }

    println!();
    println!(
        "{} Exported {} files to {}",
        "✓".green(),
        bundle.files.len(),
        out_dir.display()
    );
    Ok(())
}
