//! Inference backend trait and the multimodal content-part model.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use dashlight_core::Result;

/// One ordered element of a multimodal prompt, in Gemini wire form.
///
/// `InlineData` carries base64-encoded binary plus its sniffed media type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

/// Base64-encoded binary payload with its media type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineData {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub data: String,
}

impl ContentPart {
    /// A plain text part.
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    /// An inline-data part from raw bytes, base64-encoding the payload.
    pub fn inline_data(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        use base64::Engine;
        ContentPart::InlineData {
            inline_data: InlineData {
                mime_type: mime_type.into(),
                data: base64::engine::general_purpose::STANDARD.encode(bytes),
            },
        }
    }
}

/// Backend that accepts an ordered list of content parts under a single user
/// turn and returns the generated text.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Submit one multimodal prompt and return the model's textual answer.
    async fn generate(&self, parts: &[ContentPart]) -> Result<String>;

    /// Check if the backend is reachable.
    async fn health_check(&self) -> Result<bool>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_part_serialization() {
        let part = ContentPart::text("hello");
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json, serde_json::json!({"text": "hello"}));
    }

    #[test]
    fn test_inline_data_part_serialization() {
        let part = ContentPart::inline_data("image/png", b"abc");
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "inlineData": {"mimeType": "image/png", "data": "YWJj"}
            })
        );
    }

    #[test]
    fn test_inline_data_base64_is_standard_padding() {
        // 4 bytes -> 8 base64 chars with padding
        let part = ContentPart::inline_data("image/jpeg", &[0xFF, 0xD8, 0xFF, 0xE0]);
        match part {
            ContentPart::InlineData { inline_data } => {
                assert_eq!(inline_data.data, "/9j/4A==");
            }
            _ => panic!("expected inline data part"),
        }
    }
}
