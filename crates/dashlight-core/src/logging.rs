//! Structured logging field name constants for dashlight.
//!
//! All crates use these constants for consistent structured logging fields so
//! log aggregation tools can query by standardized names across subsystems.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, request rejected with a classified error |
//! | INFO  | Lifecycle events (startup, shutdown), request completions |
//! | DEBUG | Decision points, intermediate values, config choices |

/// Subsystem originating the log event.
/// Values: "api", "inference", "media"
pub const SUBSYSTEM: &str = "subsystem";

/// Logical operation name.
/// Examples: "analyze", "sniff", "generate"
pub const OPERATION: &str = "op";

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Byte length of the composed prompt text.
pub const PROMPT_LEN: &str = "prompt_len";

/// Byte length of a model response.
pub const RESPONSE_LEN: &str = "response_len";

/// Size of an uploaded image in bytes.
pub const IMAGE_BYTES: &str = "image_bytes";

/// MIME type determined by sniffing (never the client-declared one).
pub const MIME_TYPE: &str = "mime_type";

/// Model identifier used for a generate call.
pub const MODEL: &str = "model";
