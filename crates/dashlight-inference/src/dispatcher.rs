//! Prompt dispatcher: composes the multimodal prompt and manages the single
//! backend call per request.

use std::sync::Arc;

use dashlight_core::{Error, Result, ValidatedImage};

use crate::backend::{ContentPart, InferenceBackend};

/// Stateless per-request prompt pipeline.
///
/// The instruction template and backend are injected at construction rather
/// than read from ambient globals, so tests can swap both. Safe to share
/// across concurrent requests behind an `Arc`.
pub struct PromptDispatcher {
    backend: Arc<dyn InferenceBackend>,
    instruction: String,
}

impl PromptDispatcher {
    pub fn new(backend: Arc<dyn InferenceBackend>, instruction: impl Into<String>) -> Self {
        Self {
            backend,
            instruction: instruction.into(),
        }
    }

    /// Name of the model the underlying backend targets.
    pub fn model_name(&self) -> &str {
        self.backend.model_name()
    }

    /// Probe the underlying backend.
    pub async fn health_check(&self) -> Result<bool> {
        self.backend.health_check().await
    }

    /// Compose the ordered content-part sequence for one request.
    ///
    /// Image-first, then exactly one text part carrying the instruction
    /// (plus the trimmed user text after a line break, when present). The
    /// order is not semantically load-bearing but is fixed so identical
    /// inputs always produce identical payloads.
    ///
    /// Missing or whitespace-only user text is treated as absent; image-only
    /// requests go out with the instruction alone, no fallback question is
    /// substituted.
    fn compose(&self, user_text: Option<&str>, image: Option<&ValidatedImage>) -> Vec<ContentPart> {
        let mut parts = Vec::with_capacity(2);
        if let Some(img) = image {
            parts.push(ContentPart::inline_data(img.mime_type.clone(), &img.bytes));
        }
        let prompt = match user_text {
            Some(text) => format!("{}\n{}", self.instruction, text),
            None => self.instruction.clone(),
        };
        parts.push(ContentPart::text(prompt));
        parts
    }

    /// Run the full pipeline: normalize inputs, enforce the presence
    /// invariant, compose the prompt, and call the backend exactly once.
    ///
    /// # Errors
    /// - [`Error::NoInput`] when neither image nor non-empty text is present
    ///   (checked before any backend call).
    /// - Whatever classified error the backend returns.
    pub async fn dispatch(
        &self,
        user_text: Option<&str>,
        image: Option<ValidatedImage>,
    ) -> Result<String> {
        let user_text = user_text.map(str::trim).filter(|t| !t.is_empty());

        if user_text.is_none() && image.is_none() {
            return Err(Error::NoInput);
        }

        let parts = self.compose(user_text, image.as_ref());
        tracing::debug!(
            subsystem = "inference",
            op = "dispatch",
            model = %self.backend.model_name(),
            has_text = user_text.is_some(),
            image_bytes = image.as_ref().map(|i| i.len()).unwrap_or(0),
            "Dispatching prompt"
        );
        self.backend.generate(&parts).await
    }
}
