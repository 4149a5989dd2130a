//! Scripted provider that replays canned replies.
//!
//! Used by tests to drive the analysis pipeline through each collaborator
//! outcome without a network, and to assert how many requests were made.

use crate::client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use pricelens_core::{AppError, AppResult};
use std::collections::VecDeque;
use std::sync::Mutex;

/// One queued outcome.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Successful completion with this content
    Text(String),
    /// Credential rejected
    Auth(String),
    /// Quota exhausted or rate limited
    Quota(String),
    /// Any other failure
    Failure(String),
}

/// Provider that answers from a queue and records every request it receives.
#[derive(Debug, Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<ScriptedReply>>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl ScriptedClient {
    /// Create a client with an ordered list of replies.
    pub fn new(replies: impl IntoIterator<Item = ScriptedReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Client that answers a single request with `content`.
    pub fn text(content: impl Into<String>) -> Self {
        Self::new([ScriptedReply::Text(content.into())])
    }

    /// Client that fails a single request with a quota error.
    pub fn quota_exhausted() -> Self {
        Self::new([ScriptedReply::Quota(
            "You exceeded your current quota".to_string(),
        )])
    }

    /// Number of requests received so far.
    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// Copies of every request received so far.
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl LlmClient for ScriptedClient {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        self.requests
            .lock()
            .map_err(|_| AppError::Other("scripted client lock poisoned".to_string()))?
            .push(request.clone());

        let reply = self
            .replies
            .lock()
            .map_err(|_| AppError::Other("scripted client lock poisoned".to_string()))?
            .pop_front()
            .ok_or_else(|| AppError::Llm("scripted client has no reply queued".to_string()))?;

        match reply {
            ScriptedReply::Text(content) => Ok(LlmResponse {
                content,
                model: request.model.clone(),
                usage: LlmUsage::default(),
            }),
            ScriptedReply::Auth(msg) => Err(AppError::LlmAuth(msg)),
            ScriptedReply::Quota(msg) => Err(AppError::LlmQuota(msg)),
            ScriptedReply::Failure(msg) => Err(AppError::Llm(msg)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replays_in_order() {
        let client = ScriptedClient::new([
            ScriptedReply::Text("first".to_string()),
            ScriptedReply::Quota("slow down".to_string()),
        ]);
        let request = LlmRequest::new("q", "m");

        let first = client.complete(&request).await.unwrap();
        assert_eq!(first.content, "first");

        let second = client.complete(&request).await.unwrap_err();
        assert!(second.is_quota());

        assert!(client.complete(&request).await.is_err());
        assert_eq!(client.call_count(), 3);
    }

    #[tokio::test]
    async fn test_records_requests() {
        let client = ScriptedClient::text("ok");
        let request = LlmRequest::new("hello", "gpt-3.5-turbo").with_max_tokens(10);
        client.complete(&request).await.unwrap();

        let seen = client.requests();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].prompt, "hello");
        assert_eq!(seen[0].max_tokens, Some(10));
    }
}
