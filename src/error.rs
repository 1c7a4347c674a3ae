use thiserror::Error;

use crate::runtime::RuntimeError;

pub type Result<T> = std::result::Result<T, Error>;

/// Fatal conditions of a run. Each one ends the process with a non-zero
/// exit status; the message is what gets printed.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Error loading configuration: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("Error: {0}")]
    Runtime(#[from] RuntimeError),

    #[error("Error copying custom.list from Pi-hole container: {0}")]
    Stage(#[source] RuntimeError),

    #[error("Error writing to custom.list: {0}")]
    Append(#[source] std::io::Error),

    #[error("Error copying custom.list to Pi-hole container: {0}")]
    Publish(#[source] RuntimeError),

    #[error("Error writing report: {0}")]
    Report(#[source] std::io::Error),
}

impl From<figment::Error> for Error {
    fn from(e: figment::Error) -> Self {
        Self::Config(Box::new(e))
    }
}
