use crate::ports::outbound::{ResponseBody, ResponseEnvelope};
use crate::shared::error::PlatformError;
use crate::shared::PlatformResult;
use serde_json::Value;

/// Turns a completed exchange into the platform's effective answer.
///
/// Shared by every transport so callers see the same outcome whichever
/// one is active:
/// - non-2xx: HTTP-status error carrying the full body
/// - 204 or an empty 2xx body: success marker, no JSON parsing
/// - 2xx with a non-empty `Errors` list: platform-logical error
/// - 2xx that is not JSON: body-parse error
/// - otherwise the `Content` field, or the whole document when unwrapped
pub fn interpret(status: u16, reason: &str, body: &str) -> PlatformResult<ResponseEnvelope> {
    if !(200..300).contains(&status) {
        return Err(PlatformError::HttpStatus {
            status,
            reason: reason.to_string(),
            body: body.to_string(),
        });
    }

    let envelope = |body| ResponseEnvelope {
        status,
        reason: reason.to_string(),
        body,
    };

    if status == 204 || body.trim().is_empty() {
        return Ok(envelope(ResponseBody::Empty));
    }

    let document: Value = serde_json::from_str(body).map_err(|_| PlatformError::BodyParse {
        status,
        body: body.to_string(),
    })?;

    let messages = logical_errors(&document);
    if !messages.is_empty() {
        return Err(PlatformError::PlatformLogical { messages });
    }

    let content = match document {
        Value::Object(mut map) if map.contains_key("Content") => {
            map.remove("Content").unwrap_or(Value::Null)
        }
        other => other,
    };
    Ok(envelope(ResponseBody::Json(content)))
}

fn logical_errors(document: &Value) -> Vec<String> {
    let Some(errors) = document.get("Errors").and_then(Value::as_array) else {
        return Vec::new();
    };

    errors
        .iter()
        .map(|error| {
            ["Description", "Code"]
                .iter()
                .filter_map(|field| error.get(*field))
                .find_map(|value| match value {
                    Value::String(text) if !text.is_empty() => Some(text.clone()),
                    Value::Number(number) => Some(number.to_string()),
                    _ => None,
                })
                .unwrap_or_else(|| error.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_2xx_is_success_marker() {
        for (status, body) in [(200, ""), (201, "  \r\n"), (204, "ignored")] {
            let envelope = interpret(status, "OK", body).unwrap();
            assert_eq!(envelope.body, ResponseBody::Empty);
        }
    }

    #[test]
    fn test_content_is_unwrapped() {
        let envelope = interpret(200, "OK", r#"{"Content":{"Bvin":"p-1"},"Errors":[]}"#).unwrap();
        assert_eq!(envelope.into_content(), json!({"Bvin": "p-1"}));
    }

    #[test]
    fn test_document_without_content_wrapper() {
        let envelope = interpret(200, "OK", r#"[{"Bvin":"c-1"}]"#).unwrap();
        assert_eq!(envelope.into_content(), json!([{"Bvin": "c-1"}]));
    }

    #[test]
    fn test_null_content_is_kept() {
        let envelope = interpret(200, "OK", r#"{"Content":null,"Errors":[]}"#).unwrap();
        assert_eq!(envelope.into_content(), Value::Null);
    }

    #[test]
    fn test_logical_errors_under_2xx() {
        let body = r#"{"Content":null,"Errors":[{"Code":"E1","Description":"Sku exists"},{"Code":"E2"}]}"#;
        match interpret(200, "OK", body) {
            Err(PlatformError::PlatformLogical { messages }) => {
                assert_eq!(messages, vec!["Sku exists".to_string(), "E2".to_string()]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_unparsable_body() {
        let result = interpret(200, "OK", "<html>oops</html>");
        assert!(matches!(
            result,
            Err(PlatformError::BodyParse { status: 200, .. })
        ));
    }

    #[test]
    fn test_non_2xx_keeps_full_body() {
        let body = format!("{}UpdateJournalItem", "x".repeat(600));
        let error = interpret(500, "Internal Server Error", &body).unwrap_err();
        assert_eq!(error.status(), Some(500));
        assert!(error.mentions("UpdateJournalItem"));
    }
}
