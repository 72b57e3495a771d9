/// Chat webhook delivery (Slack incoming-webhook compatible).
///
/// The body is always `{"text": "<message>"}` sent as `application/json`.

use crate::model::DeliveryError;
use serde::Serialize;

#[derive(Serialize)]
struct WebhookPayload<'a> {
    text: &'a str,
}

/// Serializes the message into the webhook JSON envelope.
pub fn build_payload(message: &str) -> Result<Vec<u8>, DeliveryError> {
    Ok(serde_json::to_vec(&WebhookPayload { text: message })?)
}

/// POSTs a pre-built JSON body to the webhook.
fn post_payload(
    client: &reqwest::blocking::Client,
    body: Vec<u8>,
    webhook_url: &str,
) -> Result<u16, DeliveryError> {
    let response = client
        .post(webhook_url)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(body)
        .send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(DeliveryError::Rejected { status: status.as_u16() });
    }
    Ok(status.as_u16())
}

/// Builds the envelope for `message` and POSTs it.
///
/// Returns the HTTP status on a 2xx answer. Callers that treat delivery
/// as fire-and-forget are free to ignore the result.
pub fn deliver(
    client: &reqwest::blocking::Client,
    message: &str,
    webhook_url: &str,
) -> Result<u16, DeliveryError> {
    let body = build_payload(message)?;
    post_payload(client, body, webhook_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_has_single_text_field() {
        let body = build_payload("12:30〜の京都の一時間降水量は55.0mmです\n非常に激しい雨が降ります").unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let object = value.as_object().expect("payload should be a JSON object");
        assert_eq!(object.len(), 1);
        assert_eq!(
            object["text"],
            "12:30〜の京都の一時間降水量は55.0mmです\n非常に激しい雨が降ります"
        );
    }

    #[test]
    fn test_payload_escapes_newline_and_quotes() {
        let body = String::from_utf8(build_payload("a\n\"b\"").unwrap()).unwrap();
        assert_eq!(body, r#"{"text":"a\n\"b\""}"#);
    }

    #[test]
    fn test_empty_url_is_transport_error() {
        let client = reqwest::blocking::Client::new();
        let result = deliver(&client, "hello", "");
        assert!(
            matches!(result, Err(DeliveryError::Transport(_))),
            "empty webhook URL should fail without panicking, got {:?}",
            result
        );
    }
}
