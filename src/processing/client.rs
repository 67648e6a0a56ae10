use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{info, warn};
use url::Url;

use crate::error::ProcessingError;

use super::job::AlignmentJob;

/// Success response from the processing endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessingReceipt {
    /// Human-readable status line
    pub message: String,

    /// Where the backend wrote the composited output
    #[serde(rename = "outputFilePath")]
    pub output_file_path: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Submits finalized alignments to the offline compositing backend
///
/// The wire contract: `POST` multipart with fields `video` (binary),
/// `timestamp` (decimal string) and `job` (submission id); `200` with
/// `{message, outputFilePath}` on success, an `{error}` body
/// otherwise. Failures pass through to the caller untouched; the
/// synchronization state is never affected by a submission result.
pub struct ProcessingClient {
    endpoint: Url,
    http: reqwest::Client,
}

impl ProcessingClient {
    /// Create a client for a processing endpoint URL
    pub fn new(endpoint: &str) -> Result<Self, ProcessingError> {
        let endpoint = Url::parse(endpoint).map_err(|_| ProcessingError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
        })?;

        Ok(Self {
            endpoint,
            http: reqwest::Client::new(),
        })
    }

    /// The configured endpoint
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Submit a job and wait for the backend's receipt
    pub async fn submit(&self, job: &AlignmentJob) -> Result<ProcessingReceipt, ProcessingError> {
        let bytes = tokio::fs::read(&job.video_path)
            .await
            .map_err(|_| ProcessingError::PayloadRead {
                path: job.video_path.display().to_string(),
            })?;

        info!(
            "📤 Submitting job {} ({} bytes, contact at {}s)",
            job.id,
            bytes.len(),
            job.timestamp_field()
        );

        let form = Form::new()
            .text("timestamp", job.timestamp_field())
            .text("job", job.id.to_string())
            .part("video", Part::bytes(bytes).file_name(job.file_name()));

        let response = self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|err| ProcessingError::RequestFailed {
                reason: err.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            let receipt: ProcessingReceipt =
                response
                    .json()
                    .await
                    .map_err(|err| ProcessingError::RequestFailed {
                        reason: format!("unreadable receipt: {}", err),
                    })?;

            info!("✅ Job {} accepted: {}", job.id, receipt.output_file_path);
            Ok(receipt)
        } else {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| "unrecognized error body".to_owned());

            warn!("Job {} rejected ({}): {}", job.id, status, message);
            Err(ProcessingError::Rejected {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_endpoint() {
        assert!(ProcessingClient::new("not a url").is_err());
        assert!(ProcessingClient::new("http://localhost:3000/api/process").is_ok());
    }

    #[test]
    fn test_receipt_deserializes_backend_shape() {
        let receipt: ProcessingReceipt = serde_json::from_str(
            r#"{"message": "ffmpeg command executed successfully",
                "outputFilePath": "/jobs/3f2a/output.mp4"}"#,
        )
        .unwrap();

        assert_eq!(receipt.output_file_path, "/jobs/3f2a/output.mp4");
        assert!(receipt.message.contains("successfully"));
    }
}
