use crate::commands::update::get_latest_version;
use crate::error::Result;
use crate::version;

pub fn execute(check_updates: bool) -> Result<()> {
    let current = version::VERSION;
    println!("{} {}", version::PKG_NAME, current);

    if check_updates {
        println!("\nChecking for updates...");
        match get_latest_version()? {
            Some(latest) if latest != current => {
                println!("New version available: {}", latest);
                println!("Run 'init-agent update' to upgrade");
            }
            Some(_) => println!("You're on the latest version"),
            None => println!("Unable to check for updates"),
        }
    }

    Ok(())
}
