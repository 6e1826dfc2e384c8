use super::{EvaluationService, Reply};
use crate::error::transport::TransportError;
use crate::validator::CandidateInput;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use slog::{debug, Logger};
use std::time::Duration;

pub const UPLOAD_PATH: &str = "/api/upload";
const FIELD_NAME: &str = "file";
const PDF_MIME: &str = "application/pdf";

/// Evaluation service reached over HTTP with a multipart POST.
#[derive(Debug)]
pub struct HttpService {
    client: Client,
    upload_url: String,
    logger: Logger,
}

impl HttpService {
    pub fn new(base_url: &str, timeout: Duration, logger: Logger) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(timeout).build()?;
        let upload_url = format!("{}{}", base_url.trim_end_matches('/'), UPLOAD_PATH);
        debug!(logger, "Evaluation service at {}", upload_url);
        Ok(Self {
            client,
            upload_url,
            logger,
        })
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }
}

impl EvaluationService for HttpService {
    fn upload(&self, candidate: &CandidateInput) -> Result<Reply, TransportError> {
        let bytes = candidate.read_payload()?;
        debug!(
            self.logger,
            "POST {} with {} ({} bytes)",
            self.upload_url,
            candidate.name(),
            bytes.len()
        );
        let part = Part::bytes(bytes)
            .file_name(candidate.name().to_string())
            .mime_str(PDF_MIME)?;
        let form = Form::new().part(FIELD_NAME, part);

        let response = self.client.post(&self.upload_url).multipart(form).send()?;
        let status = response.status();
        let body = response.text()?;
        debug!(self.logger, "Service answered {}", status);
        Ok(Reply {
            success: status.is_success(),
            body,
        })
    }
}
