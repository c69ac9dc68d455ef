#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;

use init_agent::cli::{router, Cli, Commands};
use init_agent::commands;
use init_agent::config::Config;
use init_agent::update_check;

fn main() -> Result<()> {
    // Route arguments so a bare template name defaults to the new command
    let args = std::env::args_os();
    let routed_args = router::route_args(args);
    let cli = Cli::parse_from(routed_args);

    // Handle commands that don't need config
    match &cli.command {
        Some(Commands::Version { check }) => {
            commands::version::execute(*check)?;
            return Ok(());
        }
        Some(Commands::Update {
            check,
            version,
            yes,
        }) => {
            commands::update::execute(*check, version.clone(), *yes)?;
            return Ok(());
        }
        _ => {}
    }

    let mut config = Config::load()?;
    config.verbose = cli.verbose;

    match &cli.command {
        Some(Commands::New(cmd)) => {
            commands::new::execute(&config, cmd)?;

            // Quiet, cached check; never fails the scaffold
            let update_config = update_check::UpdateCheckConfig {
                enabled: config.update_check.enabled,
                check_interval_hours: config.update_check.interval_hours,
            };
            update_check::check_and_notify(&update_config);
        }
        Some(Commands::List) => {
            commands::list::execute(&config)?;
        }
        Some(Commands::Info { template }) => {
            commands::info::execute(&config, template)?;
        }
        Some(Commands::Config { command }) => {
            commands::config::execute(command)?;
        }
        None => {
            // The router leaves bare invocations alone; point at --help
            eprintln!("Usage: init-agent <template> <name>");
            eprintln!("Run 'init-agent --help' for all commands.");
            std::process::exit(1);
        }
        _ => unreachable!(),
    }

    Ok(())
}
