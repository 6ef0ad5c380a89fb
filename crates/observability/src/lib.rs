//! Tracing/logging setup shared by stockledger binaries.

pub mod subscriber;

pub use subscriber::LogFormat;

/// Initialize process-wide logging with human-readable output.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    subscriber::init(LogFormat::Text, subscriber::DEFAULT_DIRECTIVE);
}

/// Initialize process-wide logging with one JSON object per line.
pub fn init_json() {
    subscriber::init(LogFormat::Json, subscriber::DEFAULT_DIRECTIVE);
}
