use crate::cli::NewCmd;
use crate::config::Config;
use crate::error::{InitAgentError, Result};
use crate::template::renderer::{render, RenderOptions};
use crate::template::scanner;
use crate::template::tokens::Substitutions;
use crate::template::Registry;
use chrono::Local;
use indicatif::ProgressBar;
use std::path::PathBuf;
use std::time::Duration;

pub fn execute(config: &Config, cmd: &NewCmd) -> Result<()> {
    validate_project_name(&cmd.name)?;

    let registry = Registry::new(config);
    let template = registry.resolve(&cmd.template)?;

    let subs = build_substitutions(config, cmd);
    let dest = cmd
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&cmd.name));
    let options = RenderOptions { force: cmd.force };

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Rendering '{}' template...", template.name));
    spinner.enable_steady_tick(Duration::from_millis(80));
    let result = render(&template, &subs, &dest, &options);
    spinner.finish_and_clear();
    let report = result?;

    println!(
        "Created {} ({} files) from the '{}' template",
        report.dest.display(),
        report.files.len(),
        template.name
    );
    if config.verbose {
        for file in &report.files {
            println!("  {}", file.rel_path.display());
        }
    }

    if !template.next_steps.is_empty() {
        println!();
        println!("Next steps:");
        for step in &template.next_steps {
            // Next steps carry the same tokens as file contents
            let line = scanner::substitute(step, &subs).unwrap_or_else(|_| step.clone());
            println!("  {}", line);
        }
    }

    Ok(())
}

fn build_substitutions(config: &Config, cmd: &NewCmd) -> Substitutions {
    let date = Local::now().format("%Y-%m-%d").to_string();
    let author = resolve_author(config, cmd.author.as_deref());
    Substitutions::standard(&cmd.name, &date, &author)
}

/// AUTHOR precedence: --author flag > config default > $USER > "unknown"
fn resolve_author(config: &Config, flag: Option<&str>) -> String {
    if let Some(author) = flag {
        if !author.is_empty() {
            return author.to_string();
        }
    }
    if !config.defaults.author.is_empty() {
        return config.defaults.author.clone();
    }
    std::env::var("USER").unwrap_or_else(|_| "unknown".to_string())
}

/// The project name doubles as the default output directory and as a
/// path segment inside templates, so it must be a single sane component.
/// Spaces are fine (they are sanitized when used in paths).
pub fn validate_project_name(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.starts_with('.')
        || name.starts_with('-')
        || name.contains('/')
        || name.contains('\\')
        || name.chars().any(|c| c.is_control());

    if invalid {
        return Err(InitAgentError::InvalidProjectName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_project_name_accepts_sane_names() {
        for name in ["demo", "my-app", "my_app", "Demo App", "app2", "v1.2"] {
            assert!(validate_project_name(name).is_ok(), "{:?}", name);
        }
    }

    #[test]
    fn test_validate_project_name_rejects_path_like_names() {
        for name in ["", ".", "..", ".hidden", "-flag", "a/b", "a\\b", "a\nb"] {
            assert!(validate_project_name(name).is_err(), "{:?}", name);
        }
    }

    #[test]
    fn test_resolve_author_prefers_flag() {
        let mut config = Config::default();
        config.defaults.author = "Config Author".to_string();
        assert_eq!(resolve_author(&config, Some("Flag Author")), "Flag Author");
    }

    #[test]
    fn test_resolve_author_falls_back_to_config() {
        let mut config = Config::default();
        config.defaults.author = "Config Author".to_string();
        assert_eq!(resolve_author(&config, None), "Config Author");
        // An empty flag value does not shadow the config
        assert_eq!(resolve_author(&config, Some("")), "Config Author");
    }

    #[test]
    #[serial_test::serial]
    fn test_resolve_author_falls_back_to_user_env() {
        let original = std::env::var("USER").ok();
        std::env::set_var("USER", "envuser");

        let config = Config::default();
        assert_eq!(resolve_author(&config, None), "envuser");

        std::env::remove_var("USER");
        assert_eq!(resolve_author(&config, None), "unknown");

        if let Some(user) = original {
            std::env::set_var("USER", user);
        }
    }

    #[test]
    fn test_build_substitutions_date_format() {
        let config = Config::default();
        let cmd = NewCmd {
            template: "python".to_string(),
            name: "demo".to_string(),
            author: Some("Jane".to_string()),
            output: None,
            force: false,
        };

        let subs = build_substitutions(&config, &cmd);
        assert_eq!(subs.get("PROJECT_NAME"), Some("demo"));
        assert_eq!(subs.get("AUTHOR"), Some("Jane"));

        let date = subs.get("DATE").unwrap();
        let re = regex::Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
        assert!(re.is_match(date), "DATE should be YYYY-MM-DD, got {date}");
    }
}
