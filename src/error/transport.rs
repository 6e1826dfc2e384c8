use std::fmt::{Display, Formatter};

/// Failure to complete the exchange with the evaluation service.
#[derive(Debug)]
pub enum TransportError {
    Payload(std::io::Error),
    Request(reqwest::Error),
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransportError::Payload(e) => Some(e),
            TransportError::Request(e) => Some(e),
        }
    }
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            TransportError::Payload(e) => write!(f, "Can't read file: {}", e),
            TransportError::Request(e) => write!(f, "Request failed: {}", e),
        }
    }
}

impl From<std::io::Error> for TransportError {
    fn from(e: std::io::Error) -> Self {
        Self::Payload(e)
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        Self::Request(e)
    }
}
