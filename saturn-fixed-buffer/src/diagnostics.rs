//! Overflow notification channel.
//!
//! Overflow and truncation are reported as `tracing` events under the
//! [`TARGET`] target. What happens to them is up to the host: install a
//! subscriber that forwards to a logging callback, one that prints to the
//! terminal, or none at all. Building without the `tracing` feature compiles
//! the reports out entirely.

#[cfg(feature = "tracing")]
use crate::buffer::format::EscapeBytes;

/// `tracing` target used for every overflow report.
pub const TARGET: &str = "saturn_fixed_buffer";

/// A write stopped short; `contents` is what the buffer holds afterwards.
#[inline]
pub(crate) fn overrun(capacity: usize, contents: &[u8]) {
    #[cfg(feature = "tracing")]
    tracing::warn!(
        target: TARGET,
        capacity,
        len = contents.len(),
        contents = %EscapeBytes(contents),
        "fixed buffer has overrun"
    );
    #[cfg(not(feature = "tracing"))]
    let _ = (capacity, contents);
}

/// A write was refused outright; `data` is what the caller tried to add.
#[inline]
pub(crate) fn rejected(capacity: usize, data: &[u8]) {
    #[cfg(feature = "tracing")]
    tracing::warn!(
        target: TARGET,
        capacity,
        rejected_len = data.len(),
        data = %EscapeBytes(data),
        "fixed buffer too small, cannot add data"
    );
    #[cfg(not(feature = "tracing"))]
    let _ = (capacity, data);
}
