//! Backend reply classification.
//!
//! Every backend response is a JSON object. A truthy `error` field marks an
//! application-level failure regardless of the HTTP status; anything else
//! is a success payload whose shape depends on the endpoint.

use serde_json::Value;

use crate::token::Token;

/// Message used when a code exchange reply has neither a token nor an error.
pub const MISSING_TOKEN_MESSAGE: &str = "authorization response did not contain a token";

/// Outcome of classifying a reply: the success payload or the error message.
pub type Reply<T> = Result<T, String>;

/// Returns the application error carried by `body`, if any.
///
/// `null`, `false`, `0` and the empty string count as "no error". String
/// values are returned verbatim, other values in their JSON form.
#[must_use]
pub fn application_error(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64().is_some_and(|f| f.abs() < f64::EPSILON) => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Classifies a code exchange reply (`{token}` or `{error}`).
#[must_use]
pub fn token_grant(body: &Value) -> Reply<Token> {
    if let Some(message) = application_error(body) {
        return Err(message);
    }
    body.get("token")
        .and_then(Value::as_str)
        .and_then(|raw| Token::new(raw).ok())
        .ok_or_else(|| MISSING_TOKEN_MESSAGE.to_string())
}

/// Classifies a clone reply (`{message, ..}` or `{error}`).
///
/// A success reply without a string `message` yields the compact JSON text
/// of the whole body.
#[must_use]
pub fn clone_message(body: &Value) -> Reply<String> {
    if let Some(message) = application_error(body) {
        return Err(message);
    }
    Ok(body
        .get("message")
        .and_then(Value::as_str)
        .map_or_else(|| body.to_string(), str::to_string))
}

/// Classifies an issue listing reply (any JSON or `{error}`).
#[must_use]
pub fn issue_listing(body: Value) -> Reply<Value> {
    match application_error(&body) {
        Some(message) => Err(message),
        None => Ok(body),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_application_error_truthiness() {
        assert_eq!(application_error(&json!({"error": "bad code"})).as_deref(), Some("bad code"));
        assert_eq!(application_error(&json!({"error": ""})), None);
        assert_eq!(application_error(&json!({"error": null})), None);
        assert_eq!(application_error(&json!({"error": false})), None);
        assert_eq!(application_error(&json!({"error": 0})), None);
        assert_eq!(application_error(&json!({"message": "ok"})), None);
        assert_eq!(
            application_error(&json!({"error": {"code": 401}})).as_deref(),
            Some(r#"{"code":401}"#)
        );
    }

    #[test]
    fn test_token_grant() {
        let token = token_grant(&json!({"token": "X"})).unwrap();
        assert_eq!(token.as_str(), "X");

        assert_eq!(
            token_grant(&json!({"error": "bad code"})).unwrap_err(),
            "bad code"
        );
        assert_eq!(
            token_grant(&json!({"token": ""})).unwrap_err(),
            MISSING_TOKEN_MESSAGE
        );
        assert_eq!(token_grant(&json!({})).unwrap_err(), MISSING_TOKEN_MESSAGE);
    }

    #[test]
    fn test_error_wins_over_token() {
        assert_eq!(
            token_grant(&json!({"token": "X", "error": "revoked"})).unwrap_err(),
            "revoked"
        );
    }

    #[test]
    fn test_clone_message() {
        assert_eq!(clone_message(&json!({"message": "ok", "count": 3})).unwrap(), "ok");
        assert_eq!(clone_message(&json!({})).unwrap(), "{}");
        assert_eq!(
            clone_message(&json!({"error": "API error message"})).unwrap_err(),
            "API error message"
        );
    }

    #[test]
    fn test_issue_listing_passes_payload_through() {
        let payload = json!({"issues": [{"number": 1}]});
        assert_eq!(issue_listing(payload.clone()).unwrap(), payload);
        assert_eq!(
            issue_listing(json!({"error": "nope"})).unwrap_err(),
            "nope"
        );
    }
}
