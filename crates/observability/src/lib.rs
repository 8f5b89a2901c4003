//! Tracing/logging (shared setup).

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use self::tracing::LogFormat;

/// Initialize process-wide logging with the format named by
/// `STOREFRONT_LOG_FORMAT` (JSON unless it says `pretty`).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    let format = std::env::var("STOREFRONT_LOG_FORMAT")
        .map(|v| LogFormat::from_name(&v))
        .unwrap_or_default();
    self::tracing::init(format);
}
