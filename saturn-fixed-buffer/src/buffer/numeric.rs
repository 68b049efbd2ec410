//! Integer and float conversion.
//!
//! Rendering is delegated to the [`encode`](crate::encode) backends; the result
//! is inserted with partial copies disallowed, so a number either appears whole
//! or not at all. Parsing is locale independent and follows the classic
//! `atol`/`atof` rules: leading whitespace is skipped and parsing stops at the
//! first byte that cannot continue the number.

use num_traits::{PrimInt, ToPrimitive};

use super::mutate::{is_space, Fit};
use super::FixedBuffer;
use crate::encode::{
    DefaultEncoder, DigitEncoder, FloatFormatter, Radix, FLOAT_SCRATCH_LEN, INT_SCRATCH_LEN,
};
use crate::error::BufferError;

/// Decimal places used by [`FixedBuffer::from`] for floats.
pub const DEFAULT_DEC_PLACES: usize = 2;

impl<const N: usize> FixedBuffer<N> {
    /// Creates a buffer holding `value` rendered in `radix`.
    ///
    /// The buffer is empty if the rendered number does not fit.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use saturn_fixed_buffer::{FixedBuffer, Radix};
    ///
    /// assert_eq!(FixedBuffer::<8>::from_int(255, Radix::Base16), "ff");
    /// assert_eq!(FixedBuffer::<8>::from_int(-42i8, Radix::Base10), "-42");
    /// assert!(FixedBuffer::<4>::from_int(1000, Radix::Base10).is_empty());
    /// ```
    pub fn from_int<T: PrimInt>(value: T, radix: Radix) -> Self {
        let mut buf = Self::new();
        let _ = buf.assign_int(value, radix);
        buf
    }

    /// Creates a buffer holding `value` with `dec_places` decimals.
    ///
    /// The buffer is empty if the rendered number does not fit.
    pub fn from_float<F: Into<f64>>(value: F, dec_places: usize) -> Self {
        let mut buf = Self::new();
        let _ = buf.assign_float(value, dec_places);
        buf
    }

    /*──────────────────── integers ───────────────────────*/

    /// Replaces the contents with `value` rendered in `radix`.
    ///
    /// Negative values are written as `-` followed by the magnitude in every
    /// radix. A number that does not fit leaves the buffer empty and returns
    /// [`BufferError::Overflow`]; integers wider than 64 bits whose value does
    /// not fit in 64 bits return [`BufferError::InvalidArgument`].
    pub fn assign_int<T: PrimInt>(&mut self, value: T, radix: Radix) -> Result<(), BufferError> {
        self.assign_int_with::<DefaultEncoder, T>(value, radix)
    }

    /// [`assign_int`](Self::assign_int) with an explicit backend.
    pub fn assign_int_with<E: DigitEncoder, T: PrimInt>(
        &mut self,
        value: T,
        radix: Radix,
    ) -> Result<(), BufferError> {
        self.clear();
        let (negative, magnitude) = split_sign(value)?;
        let mut scratch = [0u8; INT_SCRATCH_LEN];
        let digits = E::encode_int(negative, magnitude, radix, &mut scratch);
        self.handle_insert(0, digits, Fit::Exact)
    }

    /// Appends `value` rendered in `radix`.
    ///
    /// The number is rendered into a buffer of the same capacity first; if it
    /// fits there it is appended like any other text, keeping a prefix when
    /// the remaining room is short.
    pub fn concat_int<T: PrimInt>(&mut self, value: T, radix: Radix) -> Result<(), BufferError> {
        let mut rendered = Self::new();
        rendered.assign_int(value, radix)?;
        self.concat_buffer(&rendered)
    }

    /*──────────────────── floats ───────────────────────*/

    /// Replaces the contents with `value` using `dec_places` decimals in a
    /// field of `dec_places + 2` bytes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use saturn_fixed_buffer::FixedBuffer;
    ///
    /// let mut buf = FixedBuffer::<16>::new();
    /// buf.assign_float(3.14159, 2).unwrap();
    /// assert_eq!(buf, "3.14");
    /// buf.assign_float(2.5f32, 3).unwrap();
    /// assert_eq!(buf, "2.500");
    /// ```
    pub fn assign_float<F: Into<f64>>(&mut self, value: F, dec_places: usize) -> Result<(), BufferError> {
        self.assign_float_fixed(value, dec_places.saturating_add(2), dec_places)
    }

    /// Replaces the contents with `value` right aligned in a field of `width`
    /// bytes with `precision` decimals.
    ///
    /// # Errors
    ///
    /// - [`BufferError::InvalidFormatRequest`] if `precision >= width`
    /// - [`BufferError::Overflow`] if `width + 2` exceeds the capacity, or the
    ///   rendered text does not fit
    ///
    /// The buffer is left empty on every error.
    pub fn assign_float_fixed<F: Into<f64>>(
        &mut self,
        value: F,
        width: usize,
        precision: usize,
    ) -> Result<(), BufferError> {
        self.assign_float_with::<DefaultEncoder, F>(value, width, precision)
    }

    /// [`assign_float_fixed`](Self::assign_float_fixed) with an explicit backend.
    pub fn assign_float_with<E: FloatFormatter, F: Into<f64>>(
        &mut self,
        value: F,
        width: usize,
        precision: usize,
    ) -> Result<(), BufferError> {
        self.clear();
        if precision >= width {
            return Err(BufferError::InvalidFormatRequest);
        }
        if width.saturating_add(2) > Self::CAPACITY {
            return self.notify_overrun();
        }
        let mut scratch = [0u8; FLOAT_SCRATCH_LEN];
        match E::format_float(value.into(), width, precision, &mut scratch) {
            Some(text) => self.handle_insert(0, text, Fit::Exact),
            None => self.notify_overrun(),
        }
    }

    /// Appends `value` with `dec_places` decimals, rendered into a buffer of
    /// the same capacity first.
    pub fn concat_float<F: Into<f64>>(&mut self, value: F, dec_places: usize) -> Result<(), BufferError> {
        let mut rendered = Self::new();
        rendered.assign_float(value, dec_places)?;
        self.concat_buffer(&rendered)
    }

    /*──────────────────── parsing ───────────────────────*/

    /// Parses the contents as a base-10 integer.
    ///
    /// Trailing bytes after the number are ignored, text without digits parses
    /// as 0 and values beyond `i64` saturate. Only an empty buffer fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use saturn_fixed_buffer::FixedBuffer;
    ///
    /// assert_eq!(FixedBuffer::<16>::from("123abc").get_int(), Ok(123));
    /// assert_eq!(FixedBuffer::<16>::from("  -7").get_int(), Ok(-7));
    /// assert!(FixedBuffer::<16>::new().get_int().is_err());
    /// ```
    pub fn get_int(&self) -> Result<i64, BufferError> {
        if self.is_empty() {
            return Err(BufferError::NumericParse);
        }
        Ok(parse_long(self.as_bytes()))
    }

    /// [`get_int`](Self::get_int), with 0 on failure.
    pub fn to_int(&self) -> i64 {
        self.get_int().unwrap_or(0)
    }

    /// Parses the contents as a float.
    ///
    /// Accepts an optional sign, digits with an optional fraction and
    /// exponent, or `inf`/`infinity`/`nan` in any case; trailing bytes are
    /// ignored. An empty buffer or a NaN result fails.
    pub fn get_float(&self) -> Result<f64, BufferError> {
        if self.is_empty() {
            return Err(BufferError::NumericParse);
        }
        let value = parse_double(self.as_bytes());
        if value.is_nan() {
            return Err(BufferError::NumericParse);
        }
        Ok(value)
    }

    /// [`get_float`](Self::get_float), with 0.0 on failure.
    pub fn to_double(&self) -> f64 {
        self.get_float().unwrap_or(0.0)
    }

    /// [`to_double`](Self::to_double) narrowed to `f32`.
    pub fn to_float(&self) -> f32 {
        self.to_double() as f32
    }
}

fn split_sign<T: PrimInt>(value: T) -> Result<(bool, u64), BufferError> {
    if value < T::zero() {
        let wide = value.to_i64().ok_or(BufferError::InvalidArgument)?;
        Ok((true, wide.unsigned_abs()))
    } else {
        let wide = value.to_u64().ok_or(BufferError::InvalidArgument)?;
        Ok((false, wide))
    }
}

fn skip_space(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| !is_space(b)).unwrap_or(bytes.len());
    &bytes[start..]
}

fn split_sign_byte(bytes: &[u8]) -> (bool, &[u8]) {
    match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    }
}

fn digit_run(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn parse_long(bytes: &[u8]) -> i64 {
    let (negative, rest) = split_sign_byte(skip_space(bytes));
    let digits = &rest[..digit_run(rest)];

    // Accumulate towards the sign so i64::MIN is reachable.
    digits.iter().fold(0i64, |acc, &b| {
        let d = i64::from(b - b'0');
        let acc = acc.saturating_mul(10);
        if negative {
            acc.saturating_sub(d)
        } else {
            acc.saturating_add(d)
        }
    })
}

fn parse_double(bytes: &[u8]) -> f64 {
    let number = skip_space(bytes);
    let (negative, rest) = split_sign_byte(number);
    let sign = if negative { -1.0 } else { 1.0 };

    if starts_with_ignore_case(rest, b"nan") {
        return f64::NAN;
    }
    if starts_with_ignore_case(rest, b"inf") {
        return sign * f64::INFINITY;
    }

    let sign_len = number.len() - rest.len();
    let int_digits = digit_run(rest);
    let mut end = int_digits;
    let mut frac_digits = 0;
    if rest.get(end) == Some(&b'.') {
        frac_digits = digit_run(&rest[end + 1..]);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return 0.0;
    }
    if matches!(rest.get(end), Some(b'e' | b'E')) {
        let (_, exp) = split_sign_byte(&rest[end + 1..]);
        let exp_digits = digit_run(exp);
        if exp_digits > 0 {
            end = rest.len() - exp.len() + exp_digits;
        }
    }

    core::str::from_utf8(&number[..sign_len + end])
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0)
}

fn starts_with_ignore_case(bytes: &[u8], prefix: &[u8]) -> bool {
    bytes.len() >= prefix.len() && bytes[..prefix.len()].eq_ignore_ascii_case(prefix)
}
