use crate::config::{Config, PageSource, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

const HOME_PAGE_HTML: &str = r#"<h1>Page builder</h1>
<a href="page://about">About</a>
"#;

const ABOUT_PAGE_HTML: &str = r#"<h1>About Us</h1>
<a href="page://home">Back home</a>
"#;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory holding page sources
    #[arg(short, long, default_value = "pages")]
    pub pages_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "!".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "Initializing pagecraft project...".bright_blue().bold());

    let pages_dir = PathBuf::from(cwd).join(&args.pages_dir);
    if !pages_dir.exists() {
        fs::create_dir_all(&pages_dir)?;
        println!("  {} Created {}/", "✓".green(), args.pages_dir);
    }

    let mut pages = Vec::new();
    for (id, name, html) in [
        ("home", "Home page", HOME_PAGE_HTML),
        ("about", "About Us", ABOUT_PAGE_HTML),
    ] {
        let file = pages_dir.join(format!("{}.html", id));
        if !file.exists() {
            fs::write(&file, html)?;
            println!("  {} Created {}/{}.html", "✓".green(), args.pages_dir, id);
        }
        pages.push(PageSource {
            id: id.to_string(),
            name: name.to_string(),
            source: Some(format!("{}/{}.html", args.pages_dir, id)),
        });
    }

    let config = Config {
        pages,
        ..Default::default()
    };
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    println!();
    println!("Next: run {} to build the site", "pagecraft export".bright_white());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = TempDir::new().unwrap();
        let cwd = dir.path().to_str().unwrap();

        init(
            InitArgs {
                pages_dir: "pages".to_string(),
                force: false,
            },
            cwd,
        )
        .unwrap();

        let config = Config::load(cwd).unwrap();
        assert_eq!(config.pages.len(), 2);
        assert!(dir.path().join("pages/home.html").is_file());
        assert_eq!(
            config.pages[1].read_html(dir.path()).unwrap(),
            ABOUT_PAGE_HTML
        );
    }

    #[test]
    fn test_init_keeps_existing_config() {
        let dir = TempDir::new().unwrap();
        let cwd = dir.path().to_str().unwrap();
        fs::write(dir.path().join(DEFAULT_CONFIG_NAME), r#"{ "outDir": "site" }"#).unwrap();

        init(
            InitArgs {
                pages_dir: "pages".to_string(),
                force: false,
            },
            cwd,
        )
        .unwrap();

        assert_eq!(Config::load(cwd).unwrap().out_dir, "site");
        assert!(!dir.path().join("pages").exists());
    }
}
