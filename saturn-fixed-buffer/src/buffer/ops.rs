//! Operator overloads and conversions.
//!
//! The operators mirror the mutation methods but discard their result: `+=`
//! keeps whatever prefix fits, and an overflow is still reported through the
//! diagnostic channel. Use the methods directly when the error matters.

use core::ops::{Add, AddAssign, Index};
use core::str::FromStr;

use super::numeric::DEFAULT_DEC_PLACES;
use super::FixedBuffer;
use crate::encode::Radix;
use crate::error::BufferError;

/// Joins `lhs` and `rhs` into a new buffer, truncating to its capacity.
///
/// # Examples
///
/// ```rust
/// use saturn_fixed_buffer::{concat, FixedBuffer};
///
/// let tail = FixedBuffer::<8>::from("world");
/// let joined: FixedBuffer<16> = concat("hello ", &tail);
/// assert_eq!(joined, "hello world");
/// ```
pub fn concat<const N: usize>(lhs: impl AsRef<[u8]>, rhs: impl AsRef<[u8]>) -> FixedBuffer<N> {
    let mut buf = FixedBuffer::from_slice(lhs.as_ref());
    let _ = buf.concat(rhs.as_ref());
    buf
}

impl<const N: usize> AsRef<[u8]> for FixedBuffer<N> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Out of range positions yield the terminator, so indexing never panics.
impl<const N: usize> Index<usize> for FixedBuffer<N> {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        let len = self.len();
        &self.as_bytes_with_nul()[index.min(len)]
    }
}

impl<const N: usize> From<&str> for FixedBuffer<N> {
    fn from(s: &str) -> Self {
        Self::from_slice(s.as_bytes())
    }
}

impl<const N: usize> From<&[u8]> for FixedBuffer<N> {
    fn from(bytes: &[u8]) -> Self {
        Self::from_slice(bytes)
    }
}

impl<const N: usize> From<f32> for FixedBuffer<N> {
    fn from(value: f32) -> Self {
        Self::from_float(value, DEFAULT_DEC_PLACES)
    }
}

impl<const N: usize> From<f64> for FixedBuffer<N> {
    fn from(value: f64) -> Self {
        Self::from_float(value, DEFAULT_DEC_PLACES)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {$(
        impl<const N: usize> From<$t> for FixedBuffer<N> {
            fn from(value: $t) -> Self {
                Self::from_int(value, Radix::Base10)
            }
        }
    )*};
}

// `u8` is left out: a byte appends as a character, see `AddAssign<u8>`.
impl_from_int!(i16, i32, i64, isize, u16, u32, u64, usize);

/// Strict parse: text longer than the capacity is an error rather than
/// being truncated.
impl<const N: usize> FromStr for FixedBuffer<N> {
    type Err = BufferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut buf = Self::new();
        if !s.is_empty() {
            buf.concat_str(s)?;
        }
        Ok(buf)
    }
}

impl<const N: usize> AddAssign<&str> for FixedBuffer<N> {
    fn add_assign(&mut self, rhs: &str) {
        let _ = self.concat_str(rhs);
    }
}

impl<const N: usize> AddAssign<&[u8]> for FixedBuffer<N> {
    fn add_assign(&mut self, rhs: &[u8]) {
        let _ = self.concat(rhs);
    }
}

impl<const N: usize> AddAssign<u8> for FixedBuffer<N> {
    fn add_assign(&mut self, rhs: u8) {
        let _ = self.push(rhs);
    }
}

impl<const N: usize, const M: usize> AddAssign<&FixedBuffer<M>> for FixedBuffer<N> {
    fn add_assign(&mut self, rhs: &FixedBuffer<M>) {
        let _ = self.concat_buffer(rhs);
    }
}

impl<const N: usize> Add<&str> for FixedBuffer<N> {
    type Output = Self;

    fn add(mut self, rhs: &str) -> Self {
        self += rhs;
        self
    }
}

impl<const N: usize> Add<&[u8]> for FixedBuffer<N> {
    type Output = Self;

    fn add(mut self, rhs: &[u8]) -> Self {
        self += rhs;
        self
    }
}

impl<const N: usize> Add<u8> for FixedBuffer<N> {
    type Output = Self;

    fn add(mut self, rhs: u8) -> Self {
        self += rhs;
        self
    }
}

impl<const N: usize, const M: usize> Add<&FixedBuffer<M>> for FixedBuffer<N> {
    type Output = Self;

    fn add(mut self, rhs: &FixedBuffer<M>) -> Self {
        self += rhs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_truncates() {
        let buf: FixedBuffer<8> = "overlong text".into();
        assert_eq!(buf.as_bytes(), b"overlo");
        let bytes: FixedBuffer<8> = (&b"raw"[..]).into();
        assert_eq!(bytes, "raw");
    }

    #[test]
    fn test_from_numbers() {
        assert_eq!(FixedBuffer::<16>::from(-1234i32), "-1234");
        assert!(FixedBuffer::<16>::from(u64::MAX).is_empty());
        assert_eq!(FixedBuffer::<32>::from(u64::MAX), "18446744073709551615");
        assert_eq!(FixedBuffer::<16>::from(3.14159f64), "3.14");
        assert_eq!(FixedBuffer::<16>::from(0.5f32), "0.50");
    }

    #[test]
    fn test_from_str_is_strict() {
        let ok: FixedBuffer<8> = "fits".parse().unwrap();
        assert_eq!(ok, "fits");
        let empty: FixedBuffer<8> = "".parse().unwrap();
        assert!(empty.is_empty());
        assert_eq!("too long".parse::<FixedBuffer<8>>(), Err(BufferError::Overflow));
    }

    #[test]
    fn test_index_never_panics() {
        let buf = FixedBuffer::<8>::from("abc");
        assert_eq!(buf[0], b'a');
        assert_eq!(buf[2], b'c');
        assert_eq!(buf[3], 0);
        assert_eq!(buf[usize::MAX], 0);
        assert_eq!(FixedBuffer::<8>::new()[0], 0);
    }

    #[test]
    fn test_add_assign() {
        let mut buf = FixedBuffer::<8>::from("ab");
        buf += "cd";
        buf += &b"e"[..];
        buf += b'f';
        assert_eq!(buf, "abcdef");

        buf += "ignored";
        assert_eq!(buf, "abcdef");

        let mut other = FixedBuffer::<16>::from("x");
        other += &buf;
        assert_eq!(other, "xabcdef");
    }

    #[test]
    fn test_add_returns_new_buffer() {
        let base = FixedBuffer::<16>::from("key");
        let joined = base + "=" + &FixedBuffer::<8>::from("val") + b';';
        assert_eq!(joined, "key=val;");
        assert_eq!(base, "key");
    }

    #[test]
    fn test_free_concat() {
        let joined: FixedBuffer<8> = concat("abc", "defgh");
        assert_eq!(joined, "abcdef");
        let joined: FixedBuffer<16> = concat(FixedBuffer::<8>::from("ab"), b"cd");
        assert_eq!(joined.as_ref(), b"abcd");
    }
}
