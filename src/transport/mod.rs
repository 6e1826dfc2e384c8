pub mod http;

use crate::error::transport::TransportError;
use crate::model::Outcome;
use crate::validator::CandidateInput;
use serde::Deserialize;

pub const CONNECTION_FAILURE: &str =
    "Could not send the file. Check the connection to the server.";
pub const PAYLOAD_FAILURE: &str =
    "The selected file could not be read or changed after selection. Select it again.";
pub const MALFORMED_RESPONSE: &str = "The server sent a response that could not be read.";

/// Raw answer of the evaluation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub success: bool,
    pub body: String,
}

#[derive(Debug, Default, Deserialize)]
struct ReplyBody {
    message: Option<String>,
    error: Option<String>,
}

/// Remote service judging a submitted document.
pub trait EvaluationService: Send + Sync {
    fn upload(&self, candidate: &CandidateInput) -> Result<Reply, TransportError>;
}

/// Folds every way an exchange can end into an outcome.
pub fn fold(result: Result<Reply, TransportError>) -> Outcome {
    let reply = match result {
        Ok(reply) => reply,
        Err(TransportError::Payload(_)) => {
            return Outcome::rejected(Some(PAYLOAD_FAILURE.to_string()))
        }
        Err(TransportError::Request(_)) => {
            return Outcome::rejected(Some(CONNECTION_FAILURE.to_string()))
        }
    };
    let body: ReplyBody = match serde_json::from_str(&reply.body) {
        Ok(body) => body,
        Err(_) => return Outcome::rejected(Some(MALFORMED_RESPONSE.to_string())),
    };
    if reply.success {
        Outcome::accepted(body.message)
    } else {
        Outcome::rejected(body.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn reply(success: bool, body: &str) -> Result<Reply, TransportError> {
        Ok(Reply {
            success,
            body: body.to_string(),
        })
    }

    #[test]
    fn success_status_carries_message() {
        let outcome = fold(reply(true, r#"{"message":"Not a fit, sorry."}"#));
        assert!(outcome.is_accepted());
        assert_eq!(outcome.detail(), Some("Not a fit, sorry."));
    }

    #[test]
    fn failure_status_carries_error() {
        let outcome = fold(reply(false, r#"{"error":"Only PDF files are accepted"}"#));
        assert!(!outcome.is_accepted());
        assert_eq!(outcome.detail(), Some("Only PDF files are accepted"));
    }

    #[test]
    fn status_decides_branch_not_body_shape() {
        let outcome = fold(reply(false, r#"{"message":"ignored"}"#));
        assert!(!outcome.is_accepted());
        assert_eq!(outcome.detail(), None);
        assert_eq!(outcome.message(), crate::model::DEFAULT_FAILURE);
    }

    #[test]
    fn malformed_body_is_a_failure() {
        let outcome = fold(reply(true, "<html>502 Bad Gateway</html>"));
        assert!(!outcome.is_accepted());
        assert_eq!(outcome.detail(), Some(MALFORMED_RESPONSE));
    }

    #[test]
    fn unreadable_payload_has_its_own_text() {
        let error = io::Error::new(io::ErrorKind::NotFound, "gone");
        let outcome = fold(Err(error.into()));
        assert!(!outcome.is_accepted());
        assert_eq!(outcome.detail(), Some(PAYLOAD_FAILURE));
    }

    #[test]
    fn request_error_asks_to_check_connection() {
        let error = reqwest::blocking::Client::new()
            .get("http://")
            .send()
            .unwrap_err();
        let outcome = fold(Err(error.into()));
        assert!(!outcome.is_accepted());
        assert_eq!(outcome.detail(), Some(CONNECTION_FAILURE));
    }
}
