use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InitAgentError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Template tree unreadable: {path}: {source}")]
    TemplateUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unknown token {{{{{token}}}}} in {file}")]
    UnknownToken { token: String, file: PathBuf },

    #[error("Destination already exists: {0} (pass --force to render into it)")]
    DestinationConflict(PathBuf),

    #[error("Rendered path escapes the destination directory: {0}")]
    PathEscape(PathBuf),

    #[error("Invalid project name: {0}")]
    InvalidProjectName(String),

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Update error: {0}")]
    UpdateError(String),

    #[error("Permission denied: {0}. Try running with sudo.")]
    PermissionDenied(String),
}

impl From<self_update::errors::Error> for InitAgentError {
    fn from(err: self_update::errors::Error) -> Self {
        InitAgentError::UpdateError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, InitAgentError>;
