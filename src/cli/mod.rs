use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod router;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Validate the configuration file
    Validate,

    /// Show effective configuration after merging all sources
    Show,
}

#[derive(Parser, Debug)]
#[command(name = "init-agent")]
#[command(about = "CLI tool for scaffolding AI-agent projects", long_about = None)]
#[command(version = env!("INIT_AGENT_VERSION"))]
#[command(after_help = "\
INVOCATION PATTERNS:
  The 'new' command is the default. These are equivalent:

  init-agent <template> <name>       Shorthand for 'init-agent new'
  init-agent new <template> <name>   Explicit new command

EXAMPLES:
  init-agent web-app my-app          Scaffold a web app in ./my-app
  init-agent python my-tool          Scaffold a python package in ./my-tool
  init-agent new python my-tool --author \"Jane\"
  init-agent list                    Show available templates

For details about a specific command, use:
  init-agent <command> --help")]
pub struct Cli {
    /// Show verbose output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scaffold a new project from a template
    #[command(long_about = "Scaffold a new project from a template.\n\n\
        Renders the template tree into a fresh directory, replacing\n\
        {{PROJECT_NAME}}, {{DATE}} and {{AUTHOR}} tokens. This is the\n\
        default command - you can omit 'new' and use\n\
        'init-agent <template> <name>' as a shorthand.")]
    New(NewCmd),

    /// List available templates
    List,

    /// Show the files and tokens of a template
    Info {
        /// Template name
        template: String,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Check init-agent version and updates
    Version {
        /// Check for available updates
        #[arg(long)]
        check: bool,
    },

    /// Update init-agent to the latest version
    Update {
        /// Check for updates without installing
        #[arg(long)]
        check: bool,

        /// Update to specific version
        #[arg(long)]
        version: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Parser, Debug)]
pub struct NewCmd {
    /// Template to scaffold from (builtin or from the templates directory)
    pub template: String,

    /// Project name; becomes the {{PROJECT_NAME}} substitution and the
    /// output directory name
    pub name: String,

    /// Author name for the {{AUTHOR}} substitution
    /// (default: config, then $USER)
    #[arg(long, env = "INIT_AGENT_AUTHOR")]
    pub author: Option<String>,

    /// Destination directory (default: ./<name>)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Render into an existing directory, overwriting files
    #[arg(long)]
    pub force: bool,
}
