//! # dashlight-inference
//!
//! Gemini inference backend abstraction for dashlight.
//!
//! This crate provides:
//! - Pluggable inference backend trait over ordered multimodal content parts
//! - Gemini `generateContent` implementation
//! - Prompt dispatcher that composes the fixed instruction, optional user
//!   text, and optional validated image into a single backend call
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use dashlight_inference::{GeminiBackend, PromptDispatcher};
//! use dashlight_core::defaults::DASHBOARD_INSTRUCTION;
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = GeminiBackend::from_env().unwrap();
//!     let dispatcher = PromptDispatcher::new(Arc::new(backend), DASHBOARD_INSTRUCTION);
//!     let answer = dispatcher
//!         .dispatch(Some("What does the yellow triangle mean?"), None)
//!         .await
//!         .unwrap();
//!     println!("{answer}");
//! }
//! ```

pub mod backend;
pub mod dispatcher;
pub mod gemini;

// Mock inference backend for testing
#[cfg(test)]
pub mod mock;

// Re-export core types
pub use dashlight_core::{Error, Result};

pub use backend::{ContentPart, InferenceBackend};
pub use dispatcher::PromptDispatcher;
pub use gemini::{GeminiBackend, GeminiConfig};
