//! # dashlight-core
//!
//! Core types and abstractions for the dashlight service.
//!
//! This crate provides:
//! - The shared [`Error`] type and [`Result`] alias
//! - Centralized default constants ([`defaults`])
//! - Structured logging field constants ([`logging`])
//! - Upload validation by magic-byte sniffing ([`media`])

pub mod defaults;
pub mod error;
pub mod logging;
pub mod media;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use media::{sniff_media_type, ValidatedImage};
