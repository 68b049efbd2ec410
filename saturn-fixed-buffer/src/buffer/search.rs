//! Byte and substring search.
//!
//! Positions are byte offsets. A search that finds nothing returns `None`; a
//! returned position is always inside the stored contents.

use super::FixedBuffer;

/// "Up to the end" marker for position arguments such as the `from` of
/// [`FixedBuffer::last_index_of`] or the `right` of [`FixedBuffer::substring`].
pub const NPOS: usize = usize::MAX;

impl<const N: usize> FixedBuffer<N> {
    /// Returns `true` if the contents start with `s`. An empty `s` never matches.
    pub fn starts_with(&self, s: &[u8]) -> bool {
        self.starts_with_at(s, 0)
    }

    /// Returns `true` if `s` occurs at `offset`.
    ///
    /// `s` has to fit entirely inside the contents; an empty `s` never matches.
    pub fn starts_with_at(&self, s: &[u8], offset: usize) -> bool {
        if s.is_empty() {
            return false;
        }
        match offset.checked_add(s.len()) {
            Some(end) if end <= self.len() => &self.as_bytes()[offset..end] == s,
            _ => false,
        }
    }

    /// Returns `true` if the contents end with `s`. An empty `s` never matches.
    pub fn ends_with(&self, s: &[u8]) -> bool {
        !s.is_empty() && s.len() <= self.len() && self.as_bytes().ends_with(s)
    }

    /// First position at or after `start` holding `byte`.
    pub fn index_of_byte(&self, byte: u8, start: usize) -> Option<usize> {
        if byte == 0 || !self.valid_pos(start) {
            return None;
        }
        self.as_bytes()[start..]
            .iter()
            .position(|&b| b == byte)
            .map(|p| p + start)
    }

    /// First position at or after `start` where `s` occurs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use saturn_fixed_buffer::FixedBuffer;
    ///
    /// let buf = FixedBuffer::<16>::from("abcabc");
    /// assert_eq!(buf.index_of(b"bc", 0), Some(1));
    /// assert_eq!(buf.index_of(b"bc", 2), Some(4));
    /// assert_eq!(buf.index_of(b"zz", 0), None);
    /// ```
    pub fn index_of(&self, s: &[u8], start: usize) -> Option<usize> {
        if s.is_empty() || !self.valid_pos(start) || start + s.len() > self.len() {
            return None;
        }
        self.as_bytes()[start..]
            .windows(s.len())
            .position(|w| w == s)
            .map(|p| p + start)
    }

    /// Last position at or before `from` holding `byte`. Pass [`NPOS`] to
    /// search the whole buffer.
    pub fn last_index_of_byte(&self, byte: u8, from: usize) -> Option<usize> {
        if byte == 0 || self.is_empty() {
            return None;
        }
        let end = if from >= self.len() { self.len() } else { from + 1 };
        self.as_bytes()[..end].iter().rposition(|&b| b == byte)
    }

    /// Last position at or before `from` where an occurrence of `s` starts.
    /// The occurrence itself may extend past `from`. Pass [`NPOS`] to search
    /// the whole buffer.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use saturn_fixed_buffer::{FixedBuffer, NPOS};
    ///
    /// let buf = FixedBuffer::<16>::from("abcabc");
    /// assert_eq!(buf.last_index_of(b"abc", NPOS), Some(3));
    /// assert_eq!(buf.last_index_of(b"abc", 2), Some(0));
    /// ```
    pub fn last_index_of(&self, s: &[u8], from: usize) -> Option<usize> {
        let len = self.len();
        if s.is_empty() || s.len() > len {
            return None;
        }
        let last_start = from.min(len - 1).min(len - s.len());
        let bytes = self.as_bytes();
        (0..=last_start).rev().find(|&p| &bytes[p..p + s.len()] == s)
    }

    /// Returns `true` if `s` occurs anywhere in the contents.
    pub fn contains(&self, s: &[u8]) -> bool {
        self.index_of(s, 0).is_some()
    }

    /// Copies the half-open range `[left, right)` into a new buffer.
    ///
    /// `right == NPOS` means "to the end". Otherwise the bounds are swapped
    /// when `left > right` and `right` is clamped to the length. A `left` at or
    /// past the end yields an empty buffer.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use saturn_fixed_buffer::{FixedBuffer, NPOS};
    ///
    /// let buf = FixedBuffer::<16>::from("hello world");
    /// assert_eq!(buf.substring(6, NPOS), "world");
    /// assert_eq!(buf.substring(5, 0), "hello");
    /// assert!(buf.substring(20, NPOS).is_empty());
    /// ```
    pub fn substring(&self, left: usize, right: usize) -> Self {
        let len = self.len();
        let (left, right) = if right == NPOS {
            (left, len)
        } else if left > right {
            (right, left)
        } else {
            (left, right)
        };
        if left >= len {
            return Self::new();
        }
        Self::from_slice(&self.as_bytes()[left..right.min(len)])
    }
}
