//! Numeric-to-text backends.
//!
//! [`FixedBuffer`](crate::FixedBuffer) never renders numbers itself. It hands a
//! value to a [`DigitEncoder`] or [`FloatFormatter`], gets back the rendered
//! bytes from a fixed scratch array and inserts them through its ordinary
//! bounded insert path.
//!
//! Two backends ship with the crate:
//!
//! - [`CompactEncoder`] – a minimal `utoa`/`dtostrf` style routine with no
//!   dependency on `core::fmt`, for the smallest targets
//! - [`CoreFmtEncoder`] – renders through `core::fmt`, exact for every `f64`
//!
//! [`DefaultEncoder`] is picked at build time with the `compact-digits` feature.

use core::fmt;

pub mod compact;
pub mod core_fmt;

pub use compact::CompactEncoder;
pub use core_fmt::CoreFmtEncoder;

/// Backend used by the plain `assign_int` / `assign_float` family.
#[cfg(feature = "compact-digits")]
pub type DefaultEncoder = CompactEncoder;
/// Backend used by the plain `assign_int` / `assign_float` family.
#[cfg(not(feature = "compact-digits"))]
pub type DefaultEncoder = CoreFmtEncoder;

/// Worst case integer render: a sign and 64 base-2 digits.
pub const INT_SCRATCH_LEN: usize = 1 + 64;

/// Scratch available to a float render.
pub const FLOAT_SCRATCH_LEN: usize = 1 + 4 * core::mem::size_of::<f64>();

/// Numeric base used for integer text conversion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Radix {
    Base2 = 2,
    Base8 = 8,
    #[default]
    Base10 = 10,
    Base16 = 16,
}

impl Radix {
    /// The numeric base as an integer.
    pub const fn value(self) -> u32 {
        self as u32
    }
}

/// Renders integers into a caller-owned scratch array.
pub trait DigitEncoder {
    /// Renders `magnitude` in `radix`, preceded by `-` when `negative`.
    ///
    /// Digits above 9 are lowercase. The returned slice borrows `scratch` and
    /// may start at any offset inside it.
    fn encode_int(
        negative: bool,
        magnitude: u64,
        radix: Radix,
        scratch: &mut [u8; INT_SCRATCH_LEN],
    ) -> &[u8];
}

/// Renders floats as fixed-point text.
pub trait FloatFormatter {
    /// Renders `value` right aligned in a field of at least `width` bytes with
    /// `precision` digits after the decimal point.
    ///
    /// Returns `None` when the text does not fit in `scratch` or the backend
    /// cannot represent the value.
    fn format_float(
        value: f64,
        width: usize,
        precision: usize,
        scratch: &mut [u8; FLOAT_SCRATCH_LEN],
    ) -> Option<&[u8]>;
}

/// `fmt::Write` over a byte slice that refuses to go past its end.
pub(crate) struct SliceWriter<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> SliceWriter<'a> {
    pub(crate) fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, len: 0 }
    }

    pub(crate) fn push(&mut self, b: u8) -> fmt::Result {
        let slot = self.buf.get_mut(self.len).ok_or(fmt::Error)?;
        *slot = b;
        self.len += 1;
        Ok(())
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn into_written(self) -> &'a [u8] {
        &self.buf[..self.len]
    }
}

impl fmt::Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        let dst = self.buf.get_mut(self.len..end).ok_or(fmt::Error)?;
        dst.copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;

    #[test]
    fn test_radix_values() {
        assert_eq!(Radix::Base2.value(), 2);
        assert_eq!(Radix::Base8.value(), 8);
        assert_eq!(Radix::Base10.value(), 10);
        assert_eq!(Radix::Base16.value(), 16);
        assert_eq!(Radix::default(), Radix::Base10);
    }

    #[test]
    fn test_slice_writer_refuses_overflow() {
        let mut storage = [0u8; 4];
        let mut w = SliceWriter::new(&mut storage);
        w.write_str("abc").unwrap();
        w.write_str("de").unwrap_err();
        w.push(b'd').unwrap();
        w.push(b'e').unwrap_err();
        assert_eq!(w.len(), 4);
        assert_eq!(w.into_written(), b"abcd");
    }

    #[test]
    fn test_backends_agree_on_integers() {
        let cases: [(bool, u64, Radix); 6] = [
            (false, 0, Radix::Base10),
            (false, 255, Radix::Base16),
            (true, 42, Radix::Base10),
            (false, 8, Radix::Base8),
            (false, u64::MAX, Radix::Base2),
            (true, i64::MIN.unsigned_abs(), Radix::Base10),
        ];
        for (negative, magnitude, radix) in cases {
            let mut a = [0u8; INT_SCRATCH_LEN];
            let mut b = [0u8; INT_SCRATCH_LEN];
            assert_eq!(
                CompactEncoder::encode_int(negative, magnitude, radix, &mut a),
                CoreFmtEncoder::encode_int(negative, magnitude, radix, &mut b),
            );
        }
    }

    #[test]
    fn test_backends_agree_on_simple_floats() {
        let cases: [(f64, usize, usize); 5] = [
            (3.14159, 4, 2),
            (-2.5, 6, 1),
            (0.0, 3, 1),
            (100.0, 2, 0),
            (0.125, 7, 3),
        ];
        for (value, width, precision) in cases {
            let mut a = [0u8; FLOAT_SCRATCH_LEN];
            let mut b = [0u8; FLOAT_SCRATCH_LEN];
            assert_eq!(
                CompactEncoder::format_float(value, width, precision, &mut a),
                CoreFmtEncoder::format_float(value, width, precision, &mut b),
                "value {value} width {width} precision {precision}"
            );
        }
    }
}
