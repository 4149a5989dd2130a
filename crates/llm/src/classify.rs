//! Failure classification for provider responses.
//!
//! OpenAI-compatible services report errors as
//! `{"error": {"message": ..., "type": ..., "code": ...}}`. Status code and
//! error code are both consulted because quota exhaustion arrives as a 429
//! with `code: "insufficient_quota"`, while some proxies drop the status and
//! keep the body.

use pricelens_core::AppError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

/// Map a non-success provider response onto the pipeline's failure classes.
///
/// * 401 or `invalid_api_key` → `AppError::LlmAuth`
/// * 429 or `insufficient_quota` → `AppError::LlmQuota`
/// * anything else → `AppError::Llm`
pub fn classify_failure(provider: &str, status: u16, body: &str) -> AppError {
    let envelope = serde_json::from_str::<ErrorEnvelope>(body).ok();
    let code = envelope.as_ref().and_then(|e| e.error.code.as_deref());
    let kind = envelope.as_ref().and_then(|e| e.error.kind.as_deref());
    let message = envelope
        .as_ref()
        .and_then(|e| e.error.message.clone())
        .unwrap_or_else(|| body.trim().to_string());

    let detail = format!("{} API error ({}): {}", provider, status, message);

    if status == 401 || code == Some("invalid_api_key") {
        AppError::LlmAuth(detail)
    } else if status == 429 || code == Some("insufficient_quota") || kind == Some("insufficient_quota")
    {
        AppError::LlmQuota(detail)
    } else {
        AppError::Llm(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_is_auth() {
        let err = classify_failure("openai", 401, "");
        assert!(err.is_auth());
    }

    #[test]
    fn test_invalid_key_code_is_auth() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error","code":"invalid_api_key"}}"#;
        let err = classify_failure("openai", 400, body);
        assert!(err.is_auth());
        assert!(err.to_string().contains("Incorrect API key provided"));
    }

    #[test]
    fn test_rate_limit_is_quota() {
        let err = classify_failure("openai", 429, "Too Many Requests");
        assert!(err.is_quota());
    }

    #[test]
    fn test_insufficient_quota_code_is_quota() {
        let body = r#"{"error":{"message":"You exceeded your current quota","type":"insufficient_quota","code":"insufficient_quota"}}"#;
        let err = classify_failure("openai", 403, body);
        assert!(err.is_quota());
    }

    #[test]
    fn test_server_error_is_other() {
        let err = classify_failure("ollama", 500, "model not loaded");
        assert!(matches!(err, AppError::Llm(_)));
        assert!(err.to_string().contains("model not loaded"));
    }
}
