use crate::cli::ConfigCommands;
use crate::config::Config;
use crate::error::Result;

pub fn execute(command: &ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Validate => validate(),
        ConfigCommands::Show => show(),
    }
}

fn validate() -> Result<()> {
    println!("Validating configuration...\n");

    match Config::global_config_path() {
        Some(path) if path.exists() => {
            println!("  Global config: {}", path.display());
        }
        Some(path) => {
            println!("  Global config: {} - not found (optional)", path.display());
        }
        None => {
            println!("  Global config: HOME not set, skipped");
        }
    }

    println!("\nLoading and validating configuration...");
    match Config::load() {
        Ok(_) => {
            println!("✓ Configuration is valid!");
            Ok(())
        }
        Err(e) => {
            println!("✗ Configuration is invalid!");
            println!("  Error: {}", e);
            Err(e)
        }
    }
}

fn show() -> Result<()> {
    let config = Config::load()?;

    println!("Effective Configuration:");
    println!("(CLI > Environment > Global config > Defaults)\n");

    println!("Defaults:");
    if config.defaults.author.is_empty() {
        println!("  author: (unset, falls back to $USER)");
    } else {
        println!("  author: {}", config.defaults.author);
    }

    println!("\nTemplates:");
    println!("  dir: {}", config.templates.dir);
    match config.templates_dir() {
        Some(path) => println!("  resolved: {}", path.display()),
        None => println!("  resolved: (unavailable)"),
    }

    println!("\nUpdate Check:");
    println!("  enabled: {}", config.update_check.enabled);
    println!("  interval: {} hours", config.update_check.interval_hours);

    Ok(())
}
