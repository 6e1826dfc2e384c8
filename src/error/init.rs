use super::config::ConfigError;
use super::log_init::LogInitError;
use super::transport::TransportError;
use settings_path::FindPathError;
use std::fmt::{Display, Formatter};
use winit::error::OsError;

/// Anything that prevents the uploader from starting.
#[derive(Debug)]
pub enum InitError {
    Path(FindPathError),
    Log(LogInitError),
    Config(ConfigError),
    Transport(TransportError),
    Os(OsError),
}

impl std::error::Error for InitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InitError::Path(e) => Some(e),
            InitError::Log(e) => Some(e),
            InitError::Config(e) => Some(e),
            InitError::Transport(e) => Some(e),
            InitError::Os(e) => Some(e),
        }
    }
}

impl Display for InitError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            InitError::Path(e) => write!(f, "Can't find settings directory: {}", e),
            InitError::Log(e) => write!(f, "Can't start logging: {}", e),
            InitError::Config(e) => Display::fmt(e, f),
            InitError::Transport(e) => write!(f, "Can't create HTTP client: {}", e),
            InitError::Os(e) => write!(f, "Can't open window: {}", e),
        }
    }
}

impl From<FindPathError> for InitError {
    fn from(e: FindPathError) -> Self {
        Self::Path(e)
    }
}

impl From<LogInitError> for InitError {
    fn from(e: LogInitError) -> Self {
        Self::Log(e)
    }
}

impl From<ConfigError> for InitError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<TransportError> for InitError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

impl From<OsError> for InitError {
    fn from(e: OsError) -> Self {
        Self::Os(e)
    }
}
