//! Tracing/logging setup shared by the phonebook binaries.

use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Initialize process-wide logging to stdout.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::from_env(), BoxMakeWriter::new(std::io::stdout));
}

/// Same as [`init`], but logs go to stderr so stdout stays clean for command output.
pub fn init_stderr() {
    tracing::init(tracing::LogFormat::from_env(), BoxMakeWriter::new(std::io::stderr));
}

/// Tracing configuration (filters, output format).
pub mod tracing;
