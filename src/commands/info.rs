use crate::config::Config;
use crate::error::Result;
use crate::template::Registry;

pub fn execute(config: &Config, name: &str) -> Result<()> {
    let registry = Registry::new(config);
    let template = registry.resolve(name)?;

    println!("Template: {}", template.name);
    if !template.description.is_empty() {
        println!("  {}", template.description);
    }

    let tokens = template.required_tokens();
    println!();
    if tokens.is_empty() {
        println!("Tokens: none");
    } else {
        println!("Tokens:");
        for (token, first_file) in &tokens {
            println!("  {{{{{}}}}}  (first used in {})", token, first_file.display());
        }
    }

    println!();
    println!("Files ({}):", template.file_count());
    for file in template.files() {
        let marker = if file.is_static() { "  [static]" } else { "" };
        println!("  {}{}", file.rel_path.display(), marker);
    }

    Ok(())
}
