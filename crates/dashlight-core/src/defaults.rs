//! Centralized default constants for the dashlight service.
//!
//! **This module is the single source of truth** for shared default values.
//! All crates reference these constants instead of defining their own magic
//! numbers.

// =============================================================================
// UPLOADS
// =============================================================================

/// Maximum accepted upload size in bytes (10 MiB), enforced at the transport
/// boundary before bytes reach the validator.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// MIME prefix an upload's declared content type must carry to pass the
/// coarse pre-filter. True classification is done by byte sniffing.
pub const IMAGE_MIME_PREFIX: &str = "image/";

// =============================================================================
// INFERENCE BACKEND
// =============================================================================

/// Default Gemini model used for dashboard analysis.
pub const GEMINI_MODEL: &str = "gemini-1.5-pro-002";

/// Default Gemini API base URL.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default timeout for a single generate call, in seconds.
pub const BACKEND_TIMEOUT_SECS: u64 = 120;

/// Environment variable holding the Gemini API key (required).
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";

/// Environment variable overriding the Gemini model.
pub const ENV_GEMINI_MODEL: &str = "GEMINI_MODEL";

/// Environment variable overriding the Gemini base URL.
pub const ENV_GEMINI_BASE_URL: &str = "GEMINI_BASE_URL";

// =============================================================================
// PROMPTING
// =============================================================================

/// Fixed system instruction prepended to every request. User text, when
/// present, is appended after a line break; it never replaces this template.
pub const DASHBOARD_INSTRUCTION: &str = "\
You are a highly skilled car mechanic who interprets the icons on a car's dashboard. \
Your task is to analyze the dashboard lights, identify potential problems with the car, \
and explain what each illuminated icon means. Provide a short diagnosis at first. \
Write short answers that can be easily understood by a non-expert. Don't go off-topic. \
Check out the image too if there is one provided.";

// =============================================================================
// SERVER
// =============================================================================

/// Default bind address.
pub const HOST: &str = "0.0.0.0";

/// Default listen port.
pub const PORT: u16 = 3000;
