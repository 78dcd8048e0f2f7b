use crate::config::RuntimeConfig;
use crate::error::{BridgeError, BridgeResult};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Encode,
    Decode,
}

impl Operation {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "encode" => Some(Self::Encode),
            "decode" => Some(Self::Decode),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Encode => "encode",
            Self::Decode => "decode",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Encode => "/encode",
            Self::Decode => "/decode",
        }
    }
}

/// Wire payload for both endpoints. The codec method travels under the
/// `type` key; its valid values are owned by the server.
#[derive(Debug, Clone, Serialize)]
pub struct CodecRequest {
    pub text: String,
    #[serde(rename = "type")]
    pub method: String,
}

/// Parsed interpretation of a reply body. A body carrying neither `result`
/// nor `error` is a distinct branch instead of falling through to a
/// placeholder string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerReply {
    Result(String),
    Error(String),
    Malformed,
}

impl ServerReply {
    /// `result` wins when the server sends both fields.
    pub fn from_value(value: &Value) -> Self {
        let result = value.get("result").and_then(|v| v.as_str());
        let error = value.get("error").and_then(|v| v.as_str());
        match (result, error) {
            (Some(s), _) => Self::Result(s.to_string()),
            (None, Some(s)) => Self::Error(s.to_string()),
            (None, None) => Self::Malformed,
        }
    }

    pub fn display_text(&self) -> String {
        match self {
            Self::Result(s) | Self::Error(s) => s.clone(),
            Self::Malformed => "malformed response: missing result and error".to_string(),
        }
    }
}

/// Destination for the single string each submission produces. Stands in
/// for the page's display area; implementations use interior mutability so
/// concurrent submissions can share one sink.
pub trait RenderSink: Send + Sync {
    fn render(&self, text: &str);
}

pub struct FormBridge {
    http: reqwest::Client,
    base_url: String,
}

impl FormBridge {
    pub fn new(runtime: &RuntimeConfig) -> BridgeResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent("codebridge/0.1")
            .build()
            .map_err(|err| BridgeError::Network(err.to_string()))?;
        Ok(Self {
            http,
            base_url: runtime.base_url.clone(),
        })
    }

    pub async fn submit_encode(&self, text: &str, method: &str, sink: &dyn RenderSink) {
        self.submit(Operation::Encode, text, method, sink).await;
    }

    pub async fn submit_decode(&self, text: &str, method: &str, sink: &dyn RenderSink) {
        self.submit(Operation::Decode, text, method, sink).await;
    }

    async fn submit(&self, op: Operation, text: &str, method: &str, sink: &dyn RenderSink) {
        match self.send(op, text, method).await {
            Ok(reply) => sink.render(&reply.display_text()),
            Err(err) => {
                tracing::warn!(op = op.as_str(), %err, "codec request failed");
                sink.render(&format!("request failed: {err}"));
            }
        }
    }

    /// Issues one POST and parses the reply body as JSON regardless of HTTP
    /// status; the original client never inspected the status either.
    pub async fn send(
        &self,
        op: Operation,
        text: &str,
        method: &str,
    ) -> BridgeResult<ServerReply> {
        let url = join_url(&self.base_url, op.path());
        let body = CodecRequest {
            text: text.to_string(),
            method: method.to_string(),
        };
        tracing::debug!(op = op.as_str(), method, "submitting codec request");
        let resp = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|err| BridgeError::Network(err.to_string()))?;
        let status = resp.status();
        let raw = resp
            .text()
            .await
            .map_err(|err| BridgeError::Network(err.to_string()))?;
        let value: Value = serde_json::from_str(&raw)
            .map_err(|err| BridgeError::Body(format!("status {status}: {err}")))?;
        Ok(ServerReply::from_value(&value))
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reply_with_result_field() {
        let reply = ServerReply::from_value(&json!({ "result": "abc" }));
        assert_eq!(reply, ServerReply::Result("abc".to_string()));
        assert_eq!(reply.display_text(), "abc");
    }

    #[test]
    fn reply_with_error_field() {
        let reply = ServerReply::from_value(&json!({ "error": "bad input" }));
        assert_eq!(reply, ServerReply::Error("bad input".to_string()));
        assert_eq!(reply.display_text(), "bad input");
    }

    #[test]
    fn result_wins_when_both_fields_present() {
        let reply = ServerReply::from_value(&json!({ "result": "r", "error": "e" }));
        assert_eq!(reply, ServerReply::Result("r".to_string()));
    }

    #[test]
    fn empty_object_is_malformed() {
        let reply = ServerReply::from_value(&json!({}));
        assert_eq!(reply, ServerReply::Malformed);
        assert_eq!(
            reply.display_text(),
            "malformed response: missing result and error"
        );
    }

    #[test]
    fn non_object_body_is_malformed() {
        assert_eq!(ServerReply::from_value(&json!("ok")), ServerReply::Malformed);
        assert_eq!(ServerReply::from_value(&json!([1, 2])), ServerReply::Malformed);
    }

    #[test]
    fn non_string_fields_are_malformed() {
        let reply = ServerReply::from_value(&json!({ "result": 5 }));
        assert_eq!(reply, ServerReply::Malformed);
    }

    #[test]
    fn request_serializes_method_under_type_key() {
        let body = CodecRequest {
            text: "hi".to_string(),
            method: "base64".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "text": "hi", "type": "base64" })
        );
    }

    #[test]
    fn operation_paths() {
        assert_eq!(Operation::Encode.path(), "/encode");
        assert_eq!(Operation::Decode.path(), "/decode");
        assert_eq!(Operation::from_str("encode"), Some(Operation::Encode));
        assert_eq!(Operation::from_str("decode"), Some(Operation::Decode));
        assert_eq!(Operation::from_str("rot13"), None);
    }

    #[test]
    fn join_url_normalizes_slashes() {
        assert_eq!(join_url("http://h:1/", "/encode"), "http://h:1/encode");
        assert_eq!(join_url("http://h:1", "encode"), "http://h:1/encode");
    }
}
