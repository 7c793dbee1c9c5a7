use reqwest::StatusCode;

pub const LANGUAGE_TOOL_URL: &str = "https://api.languagetool.org/v2/check";
pub const LANGUAGE: &str = "en-US";

#[derive(Debug, thiserror::Error)]
pub enum CheckerError {
    #[error("Error: {status} - {body}")]
    Upstream { status: StatusCode, body: String },

    #[error("HTTP Error: {0}")]
    Transport(reqwest::Error),

    #[error("Decode Error: {0}")]
    Decode(reqwest::Error),
}

/// Client for a LanguageTool compatible `/v2/check` endpoint.
#[derive(Debug, Clone)]
pub struct GrammarChecker {
    client: reqwest::Client,
    endpoint: String,
}

impl GrammarChecker {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Submits `text` as is and returns the raw response body.
    pub async fn check(&self, text: &str) -> Result<String, CheckerError> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("text", text), ("language", LANGUAGE)])
            .send()
            .await
            .map_err(CheckerError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(CheckerError::Decode)?;

        if !status.is_success() {
            return Err(CheckerError::Upstream { status, body });
        }

        Ok(body)
    }
}
