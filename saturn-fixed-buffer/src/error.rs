use thiserror::Error;

/// Error type for [`FixedBuffer`](crate::FixedBuffer) operations.
///
/// Every failure is local: the buffer keeps a valid length and terminator,
/// and where an operation allows partial copies the truncated prefix stays in
/// place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BufferError {
    /// The write needed more room than the buffer had left.
    #[error("Fixed buffer capacity exceeded")]
    Overflow,
    /// An index or length was outside the stored contents.
    #[error("Index is outside the buffer contents")]
    InvalidIndex,
    /// Empty source, NUL fill byte, zero repeat count or an unsupported integer width.
    #[error("Invalid argument for fixed buffer operation")]
    InvalidArgument,
    /// The contents could not be parsed as a number.
    #[error("Buffer contents are not a valid number")]
    NumericParse,
    /// Float rendering was asked for a precision that does not fit its width.
    #[error("Float precision must be smaller than the field width")]
    InvalidFormatRequest,
    /// A `Display` implementation failed while formatting into the buffer.
    #[error("Formatting into the buffer failed")]
    Format,
}
