use serde::Deserialize;

/// Pull a readable message out of an error response body
///
/// Understands the `{"error": {"message", "type", "code"}}` envelope used by
/// OpenAI-compatible providers and falls back to the raw body otherwise.
pub(crate) fn extract_api_error(body: &str) -> String {
    #[derive(Debug, Deserialize)]
    struct ErrorEnvelope {
        error: Option<ApiError>,
    }

    #[derive(Debug, Deserialize)]
    struct ApiError {
        message: Option<String>,
        #[serde(rename = "type")]
        kind: Option<String>,
        code: Option<serde_json::Value>,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorEnvelope>(body)
        && let Some(err) = parsed.error
    {
        let message = err.message.unwrap_or_else(|| "unknown error".to_string());
        return match (err.kind, err.code) {
            (Some(kind), _) => format!("{message} (type={kind})"),
            (None, Some(code)) => format!("{message} (code={code})"),
            (None, None) => message,
        };
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "empty response body".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openai_envelope() {
        let body = r#"{"error":{"message":"Invalid API key","type":"invalid_request_error"}}"#;
        assert_eq!(
            extract_api_error(body),
            "Invalid API key (type=invalid_request_error)"
        );
    }

    #[test]
    fn openrouter_envelope_with_numeric_code() {
        let body = r#"{"error":{"message":"No auth credentials found","code":401}}"#;
        assert_eq!(
            extract_api_error(body),
            "No auth credentials found (code=401)"
        );
    }

    #[test]
    fn plain_text_body() {
        assert_eq!(extract_api_error("  Bad Gateway \n"), "Bad Gateway");
        assert_eq!(extract_api_error(""), "empty response body");
    }
}
