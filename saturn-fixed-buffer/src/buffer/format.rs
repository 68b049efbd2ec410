//! Bounded `core::fmt` formatting and the `Display`/`Debug` impls.

use core::fmt::{self, Write as _};

use super::{FixedBuffer, MAX_STORAGE};
use crate::encode::SliceWriter;
use crate::error::BufferError;

const LOSSY_SCRATCH_LEN: usize = 3 * MAX_STORAGE;

/// Displays bytes with non-printable ones escaped, `\x7f` style.
pub(crate) struct EscapeBytes<'a>(pub(crate) &'a [u8]);

impl fmt::Display for EscapeBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in self.0 {
            write!(f, "{}", core::ascii::escape_default(b))?;
        }
        Ok(())
    }
}

/// Writer used by [`FixedBuffer::format`]; remembers whether a write was cut
/// short so overflow can be told apart from a failing `Display` impl.
struct BoundedWriter<'a, const N: usize> {
    buf: &'a mut FixedBuffer<N>,
    overflowed: bool,
}

impl<const N: usize> fmt::Write for BoundedWriter<'_, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        let len = self.buf.len();
        let n = self.buf.available().min(bytes.len());
        self.buf.storage_mut()[len..len + n].copy_from_slice(&bytes[..n]);
        let _ = self.buf.set_len(len + n);
        if n < bytes.len() {
            self.overflowed = true;
            return Err(fmt::Error);
        }
        Ok(())
    }
}

impl<const N: usize> FixedBuffer<N> {
    /// Replaces the contents with formatted text.
    ///
    /// Output is bounded by the capacity. If it does not fit, the buffer keeps
    /// the truncated prefix, the overflow is reported and
    /// [`BufferError::Overflow`] is returned. If an argument's formatting
    /// fails, the buffer is cleared and [`BufferError::Format`] is returned.
    ///
    /// Usually called through [`fixed_format!`](crate::fixed_format).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use saturn_fixed_buffer::{fixed_format, BufferError, FixedBuffer};
    ///
    /// let mut buf = FixedBuffer::<16>::new();
    /// fixed_format!(buf, "{}-{:03}", "id", 7).unwrap();
    /// assert_eq!(buf, "id-007");
    ///
    /// assert_eq!(fixed_format!(buf, "{}", "far too long for this"), Err(BufferError::Overflow));
    /// assert_eq!(buf, "far too long f");
    /// ```
    pub fn format(&mut self, args: fmt::Arguments<'_>) -> Result<(), BufferError> {
        self.clear();
        let mut writer = BoundedWriter {
            buf: self,
            overflowed: false,
        };
        let result = fmt::write(&mut writer, args);
        let overflowed = writer.overflowed;

        match result {
            Ok(()) => Ok(()),
            Err(_) if overflowed => self.notify_overrun(),
            Err(_) => {
                self.clear();
                Err(BufferError::Format)
            }
        }
    }
}

/// Appends through [`FixedBuffer::concat_str`]: overflow keeps the prefix that
/// fits, is reported, and surfaces as `fmt::Error`.
impl<const N: usize> fmt::Write for FixedBuffer<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if s.is_empty() {
            return Ok(());
        }
        self.concat_str(s).map_err(|_| fmt::Error)
    }
}

/// Lossy UTF-8: invalid sequences are shown as U+FFFD. Width and fill apply
/// in both cases.
impl<const N: usize> fmt::Display for FixedBuffer<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Ok(s) = self.as_str() {
            return f.pad(s);
        }

        // Every invalid byte widens to at most the three bytes of U+FFFD.
        let mut scratch = [0u8; LOSSY_SCRATCH_LEN];
        let mut w = SliceWriter::new(&mut scratch);
        for chunk in self.as_bytes().utf8_chunks() {
            w.write_str(chunk.valid())?;
            if !chunk.invalid().is_empty() {
                w.write_str("\u{FFFD}")?;
            }
        }
        match core::str::from_utf8(w.into_written()) {
            Ok(s) => f.pad(s),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl<const N: usize> fmt::Debug for FixedBuffer<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedBuffer(\"{}\")", EscapeBytes(self.as_bytes()))
    }
}

/// Formats into a [`FixedBuffer`](crate::FixedBuffer), replacing its contents.
///
/// Expands to [`FixedBuffer::format`](crate::FixedBuffer::format) with
/// `format_args!`, so it returns `Result<(), BufferError>`.
///
/// ```rust
/// use saturn_fixed_buffer::{fixed_format, FixedBuffer};
///
/// let mut line = FixedBuffer::<32>::new();
/// fixed_format!(line, "temp={:.1}C", 21.6f32).unwrap();
/// assert_eq!(line, "temp=21.6C");
/// ```
#[macro_export]
macro_rules! fixed_format {
    ($buf:expr, $($arg:tt)*) => {
        $buf.format(::core::format_args!($($arg)*))
    };
}
