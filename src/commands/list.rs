use crate::config::Config;
use crate::error::Result;
use crate::template::Registry;

pub fn execute(config: &Config) -> Result<()> {
    let registry = Registry::new(config);
    let templates = registry.available();

    if templates.is_empty() {
        println!("No templates found.");
        return Ok(());
    }

    println!("{:<20} {:<8} {}", "TEMPLATE", "SOURCE", "DESCRIPTION");
    println!("{}", "-".repeat(64));
    for template in templates {
        println!(
            "{:<20} {:<8} {}",
            template.name,
            template.origin.to_string(),
            template.description
        );
    }

    Ok(())
}
