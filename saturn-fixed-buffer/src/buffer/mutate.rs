//! In-place mutation: insert, remove, replace and their concat/assign forms.
//!
//! Every write goes through [`FixedBuffer::handle_insert`] or its repeat-fill
//! twin. The tail after the insertion point, terminator included, is shifted
//! with `copy_within`, so overlapping moves are safe.

use super::FixedBuffer;
use crate::error::BufferError;

/// How an insert that does not fully fit is treated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Fit {
    /// Keep the prefix that fits and report the overflow.
    Partial,
    /// Copy nothing unless everything fits.
    Exact,
}

/// C `isspace` in the "C" locale.
pub(crate) fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

impl<const N: usize> FixedBuffer<N> {
    pub(crate) fn handle_insert(&mut self, index: usize, data: &[u8], fit: Fit) -> Result<(), BufferError> {
        let len = self.len();
        if index > len {
            return Err(BufferError::InvalidIndex);
        }
        if data.is_empty() {
            return Err(BufferError::InvalidArgument);
        }
        if self.is_full() || (fit == Fit::Exact && data.len() > self.available()) {
            return self.notify_rejected(data);
        }

        let count = self.available().min(data.len());
        let storage = self.storage_mut();
        storage.copy_within(index..len + 1, index + count);
        storage[index..index + count].copy_from_slice(&data[..count]);
        self.commit_len(len + count, count == data.len())
    }

    fn handle_insert_repeat(&mut self, index: usize, count: usize, byte: u8) -> Result<(), BufferError> {
        let len = self.len();
        if index > len {
            return Err(BufferError::InvalidIndex);
        }
        if count == 0 || byte == 0 {
            return Err(BufferError::InvalidArgument);
        }
        if self.is_full() {
            return self.notify_overrun();
        }

        let actual = self.available().min(count);
        let storage = self.storage_mut();
        storage.copy_within(index..len + 1, index + actual);
        storage[index..index + actual].fill(byte);
        self.commit_len(len + actual, actual == count)
    }

    /*──────────────────── insert ───────────────────────*/

    /// Inserts `data` at `index`, shifting the rest of the contents up.
    ///
    /// # Errors
    ///
    /// - [`BufferError::InvalidIndex`] if `index > len()`; nothing changes
    /// - [`BufferError::InvalidArgument`] if `data` is empty
    /// - [`BufferError::Overflow`] if the buffer was already full (nothing is
    ///   copied) or only a prefix of `data` fit (the prefix is kept)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use saturn_fixed_buffer::{BufferError, FixedBuffer};
    ///
    /// let mut buf = FixedBuffer::<8>::from("ad");
    /// buf.insert(1, b"bc").unwrap();
    /// assert_eq!(buf, "abcd");
    ///
    /// assert_eq!(buf.insert(2, b"xyz"), Err(BufferError::Overflow));
    /// assert_eq!(buf, "abxycd");
    /// ```
    pub fn insert(&mut self, index: usize, data: &[u8]) -> Result<(), BufferError> {
        self.handle_insert(index, data, Fit::Partial)
    }

    /// [`insert`](Self::insert) for text.
    pub fn insert_str(&mut self, index: usize, s: &str) -> Result<(), BufferError> {
        self.insert(index, s.as_bytes())
    }

    /// Inserts `count` copies of `byte` at `index`.
    ///
    /// A zero `count` or a NUL `byte` is rejected with
    /// [`BufferError::InvalidArgument`]; overflow behaves as in
    /// [`insert`](Self::insert).
    pub fn insert_repeat(&mut self, index: usize, count: usize, byte: u8) -> Result<(), BufferError> {
        self.handle_insert_repeat(index, count, byte)
    }

    /*──────────────────── concat ───────────────────────*/

    /// Appends `data`, keeping as much as fits.
    pub fn concat(&mut self, data: &[u8]) -> Result<(), BufferError> {
        self.handle_insert(self.len(), data, Fit::Partial)
    }

    /// Appends text, keeping as much as fits.
    pub fn concat_str(&mut self, s: &str) -> Result<(), BufferError> {
        self.concat(s.as_bytes())
    }

    /// Appends a single byte.
    pub fn push(&mut self, byte: u8) -> Result<(), BufferError> {
        self.handle_insert_repeat(self.len(), 1, byte)
    }

    /// Appends `count` copies of `byte`.
    pub fn concat_repeat(&mut self, count: usize, byte: u8) -> Result<(), BufferError> {
        self.handle_insert_repeat(self.len(), count, byte)
    }

    /// Appends the contents of a buffer of any capacity.
    pub fn concat_buffer<const M: usize>(&mut self, other: &FixedBuffer<M>) -> Result<(), BufferError> {
        self.concat(other.as_bytes())
    }

    /// Appends `byte`; when the buffer is full, overwrites the last stored
    /// byte instead so the end marker of a truncated string stays visible.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use saturn_fixed_buffer::FixedBuffer;
    ///
    /// let mut buf = FixedBuffer::<8>::from("a long line");
    /// buf.force_concat(b'~').unwrap();
    /// assert_eq!(buf, "a lon~");
    /// ```
    pub fn force_concat(&mut self, byte: u8) -> Result<(), BufferError> {
        if byte == 0 {
            return Err(BufferError::InvalidArgument);
        }
        if !self.is_full() {
            return self.push(byte);
        }
        let last = self.len() - 1;
        self.storage_mut()[last] = byte;
        Ok(())
    }

    /*──────────────────── assign ───────────────────────*/

    /// Replaces the contents with `data`, keeping as much as fits.
    pub fn assign(&mut self, data: &[u8]) -> Result<(), BufferError> {
        self.clear();
        self.concat(data)
    }

    /// Replaces the contents with text, keeping as much as fits.
    pub fn assign_str(&mut self, s: &str) -> Result<(), BufferError> {
        self.assign(s.as_bytes())
    }

    /// Replaces the contents with `count` copies of `byte`.
    pub fn assign_repeat(&mut self, count: usize, byte: u8) -> Result<(), BufferError> {
        self.clear();
        self.concat_repeat(count, byte)
    }

    /// Replaces the contents with those of a buffer of any capacity.
    pub fn assign_buffer<const M: usize>(&mut self, other: &FixedBuffer<M>) -> Result<(), BufferError> {
        self.clear();
        self.concat_buffer(other)
    }

    /*──────────────────── remove ───────────────────────*/

    /// Removes up to `count` bytes starting at `index`.
    ///
    /// `count` is clamped to the bytes that exist after `index`. An `index`
    /// past the end or a zero `count` does nothing.
    pub fn remove(&mut self, index: usize, count: usize) {
        let len = self.len();
        if count == 0 || index >= len {
            return;
        }
        let count = count.min(len - index);
        self.storage_mut().copy_within(index + count..len + 1, index);
        let _ = self.set_len(len - count);
    }

    /// Shortens the buffer to `index` bytes. Does nothing if `index >= len()`.
    pub fn truncate(&mut self, index: usize) {
        if self.valid_pos(index) {
            let _ = self.set_len(index);
        }
    }

    /*──────────────────── replace ───────────────────────*/

    /// Replaces every occurrence of `target` with `replacement`.
    ///
    /// Matches are searched left to right; the search resumes after the
    /// inserted text, so a replacement containing `target` is not processed
    /// again. If a replacement only partially fits, the truncated result is
    /// kept, the overflow is reported and the loop stops once the search
    /// position runs past the end.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use saturn_fixed_buffer::FixedBuffer;
    ///
    /// let mut buf = FixedBuffer::<16>::from("aaa");
    /// buf.replace(b"a", b"bb");
    /// assert_eq!(buf, "bbbbbb");
    ///
    /// buf.replace(b"bbb", b"");
    /// assert!(buf.is_empty());
    /// ```
    pub fn replace(&mut self, target: &[u8], replacement: &[u8]) {
        if self.is_empty() || target.is_empty() || target == replacement {
            return;
        }

        let mut cursor = self.index_of(target, 0);
        while let Some(index) = cursor {
            self.remove(index, target.len());
            let next = if replacement.is_empty() {
                index
            } else {
                let _ = self.handle_insert(index, replacement, Fit::Partial);
                index + replacement.len()
            };
            if !self.valid_pos(next) {
                break;
            }
            cursor = self.index_of(target, next);
        }
    }

    /// [`replace`](Self::replace) for text.
    pub fn replace_str(&mut self, target: &str, replacement: &str) {
        self.replace(target.as_bytes(), replacement.as_bytes());
    }

    /// Replaces every `from` byte with `to`. NUL on either side is ignored.
    pub fn replace_byte(&mut self, from: u8, to: u8) {
        if from == 0 || to == 0 || from == to {
            return;
        }
        self.as_mut_bytes()
            .iter_mut()
            .filter(|b| **b == from)
            .for_each(|b| *b = to);
    }

    /*──────────────────── case & whitespace ───────────────────────*/

    /// ASCII lowercase in place.
    pub fn to_lower_case(&mut self) {
        self.as_mut_bytes().make_ascii_lowercase();
    }

    /// ASCII uppercase in place.
    pub fn to_upper_case(&mut self) {
        self.as_mut_bytes().make_ascii_uppercase();
    }

    /// Strips leading and trailing whitespace.
    pub fn trim(&mut self) {
        let bytes = self.as_bytes();
        let start = bytes.iter().position(|&b| !is_space(b)).unwrap_or(bytes.len());
        let end = bytes.iter().rposition(|&b| !is_space(b)).map_or(start, |p| p + 1);
        self.storage_mut().copy_within(start..end, 0);
        let _ = self.set_len(end - start);
    }
}
