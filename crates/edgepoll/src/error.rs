use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced to the user by the binary. Poll failures never land
/// here -- those are logged inside the entities and polling continues.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(
        "no config file found at {} and no --host/--username/--password flags given",
        path.display()
    )]
    NoConfig { path: PathBuf },

    #[error(transparent)]
    Config(#[from] edgepoll_config::ConfigError),

    #[error(transparent)]
    Api(#[from] edgepoll_api::Error),
}

impl CliError {
    /// Process exit code: 2 for configuration problems, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoConfig { .. } | Self::Config(_) => 2,
            Self::Api(_) => 1,
        }
    }
}
