//! HTTP client for the question bank service.
//!
//! Thin reqwest wrapper over the bank's read endpoints:
//!
//! ```text
//! GET {base}/manuals                    published manuals
//! GET {base}/manuals/{id}               single manual (404 -> None)
//! GET {base}/manuals/{id}/questions     all questions for a manual
//! GET {base}/questions/{id}             single question (404 -> None)
//! ```
//!
//! Every request carries the configured timeout. Connect and timeout
//! failures are retried once before surfacing as [`BankError`]; anything
//! else fails immediately.

use super::{BankError, Manual, Question, QuestionBank};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub struct HttpQuestionBank {
    client: reqwest::Client,
    base_url: String,
}

impl HttpQuestionBank {
    /// Creates a client against `base_url` with a per-request `timeout`.
    ///
    /// A trailing slash on `base_url` is tolerated.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BankError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_with_retry(&self, path: &str) -> Result<reqwest::Response, BankError> {
        let url = self.url(path);
        match self.client.get(&url).send().await {
            Ok(resp) => Ok(resp),
            Err(err) if err.is_timeout() || err.is_connect() => {
                tracing::warn!("question bank request to {path} failed, retrying once: {err}");
                Ok(self.client.get(&url).send().await?)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BankError> {
        let resp = self.get_with_retry(path).await?;
        if !resp.status().is_success() {
            return Err(BankError::UnexpectedStatus {
                status: resp.status().as_u16(),
                path: path.to_string(),
            });
        }
        Ok(resp.json().await?)
    }

    /// Like `get_json`, but maps a 404 to `Ok(None)`.
    async fn get_json_opt<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, BankError> {
        let resp = self.get_with_retry(path).await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(BankError::UnexpectedStatus {
                status: resp.status().as_u16(),
                path: path.to_string(),
            });
        }
        Ok(Some(resp.json().await?))
    }
}

#[async_trait::async_trait]
impl QuestionBank for HttpQuestionBank {
    async fn list_manuals(&self) -> Result<Vec<Manual>, BankError> {
        self.get_json("/manuals").await
    }

    async fn fetch_manual(&self, manual_id: &str) -> Result<Option<Manual>, BankError> {
        self.get_json_opt(&format!("/manuals/{manual_id}")).await
    }

    async fn fetch_questions(&self, manual_id: &str) -> Result<Vec<Question>, BankError> {
        self.get_json(&format!("/manuals/{manual_id}/questions"))
            .await
    }

    async fn fetch_question(&self, question_id: &str) -> Result<Option<Question>, BankError> {
        self.get_json_opt(&format!("/questions/{question_id}")).await
    }
}
