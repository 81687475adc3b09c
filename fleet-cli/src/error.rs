use thiserror::Error;

/// Broad category of a command failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Raised locally, before or instead of a remote call
    Validation,
    /// Surfaced by the platform or the transport to it
    Remote,
    /// The user declined a confirmation prompt
    Aborted,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    MissingOption(&'static str),

    #[error("Missing note content")]
    MissingNoteContent,

    #[error("You already have an application with that name!")]
    DuplicateApplication,

    #[error("You have to log in to continue (set FLEET_TOKEN or api_token in the config file)")]
    NotLoggedIn,

    #[error("Cannot prompt: stdin is not a terminal. {0}")]
    NotInteractive(&'static str),

    #[error("Application not found: {0}")]
    ApplicationNotFound(String),

    #[error("Request failed ({status}): {message}")]
    Remote { status: u16, message: String },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("Aborted")]
    Aborted,
}

impl CliError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CliError::MissingOption(_)
            | CliError::MissingNoteContent
            | CliError::DuplicateApplication
            | CliError::NotLoggedIn
            | CliError::NotInteractive(_) => ErrorKind::Validation,
            CliError::ApplicationNotFound(_)
            | CliError::Remote { .. }
            | CliError::Transport(_) => ErrorKind::Remote,
            CliError::Aborted => ErrorKind::Aborted,
        }
    }
}

/// Kind of a `CliError` carried inside an `anyhow::Error`, if any.
pub fn kind_of(err: &anyhow::Error) -> Option<ErrorKind> {
    err.downcast_ref::<CliError>().map(CliError::kind)
}
