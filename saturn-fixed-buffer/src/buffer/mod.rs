//! Fixed-capacity byte string.
//!
//! This module provides [`FixedBuffer`], a stack-resident string whose maximum
//! length is fixed by a const generic. The type owns its length bookkeeping and
//! the NUL terminator; the submodules add mutation, search, numeric conversion,
//! comparison and formatting on top of the accessors defined here.

use bytemuck::{CheckedBitPattern, NoUninit, Zeroable};

use crate::diagnostics;
use crate::error::BufferError;

pub mod compare;
pub mod format;
pub mod mutate;
pub mod numeric;
pub mod ops;
pub mod search;

pub use search::NPOS;

/// Smallest legal storage size: a length byte, two characters and the terminator.
pub const MIN_STORAGE: usize = 4;
/// Largest legal storage size; the length must fit in the leading byte.
pub const MAX_STORAGE: usize = 256;

/// A fixed-capacity, allocation-free byte string.
///
/// `N` is the total storage size in bytes. It must be between 4 and 256 and
/// divisible by 4; this is checked at compile time. The first byte caches the
/// length and the remaining `N - 1` bytes hold the text followed by a NUL, so
/// the buffer stores at most `N - 2` bytes.
///
/// Operations never allocate and never panic. Writes that do not fit keep the
/// longest prefix that does, report the overflow through
/// [`diagnostics`](crate::diagnostics) and return [`BufferError::Overflow`].
///
/// # Examples
///
/// ```rust
/// use saturn_fixed_buffer::FixedBuffer;
///
/// let mut buf: FixedBuffer<8> = FixedBuffer::from("abc");
/// assert_eq!(FixedBuffer::<8>::capacity(), 6);
///
/// buf.concat_str("def").unwrap();
/// assert!(buf.is_full());
/// assert!(buf.concat_str("g").is_err());
/// assert_eq!(buf, "abcdef");
/// ```
///
/// # Memory Layout
///
/// ```text
/// [ len | t e x t ... | 0 | stale ... ]
///   0     1 ..          1 + len        N - 1
/// ```
///
/// The struct is `repr(transparent)` over `[u8; N]` and can be viewed as bytes
/// with `bytemuck`. Casting raw bytes back goes through
/// [`CheckedBitPattern`], which rejects a length byte beyond the capacity or a
/// missing terminator.
#[repr(transparent)]
#[derive(Clone, Copy)]
pub struct FixedBuffer<const N: usize = 64> {
    raw: [u8; N],
}

// SAFETY: all-zero storage is the empty buffer: length 0, terminator at index 0.
unsafe impl<const N: usize> Zeroable for FixedBuffer<N> {}

// SAFETY: `repr(transparent)` over `[u8; N]`, so there is no padding.
unsafe impl<const N: usize> NoUninit for FixedBuffer<N> {}

// SAFETY: `Bits` is the wrapped array itself and every bit pattern accepted by
// `is_valid_bit_pattern` upholds the length and terminator invariants.
unsafe impl<const N: usize> CheckedBitPattern for FixedBuffer<N> {
    type Bits = [u8; N];

    fn is_valid_bit_pattern(bits: &[u8; N]) -> bool {
        match bits.first() {
            Some(&len) => {
                let len = len as usize;
                len <= N.saturating_sub(2) && bits.get(1 + len) == Some(&0)
            }
            None => false,
        }
    }
}

impl<const N: usize> Default for FixedBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> FixedBuffer<N> {
    const LAYOUT_OK: () = assert!(
        N >= MIN_STORAGE && N <= MAX_STORAGE && N % 4 == 0,
        "FixedBuffer storage must be between 4 and 256 bytes and divisible by 4"
    );

    /// Maximum number of stored bytes, excluding the length byte and terminator.
    pub const CAPACITY: usize = {
        let () = Self::LAYOUT_OK;
        N - 2
    };

    /// Creates an empty buffer.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use saturn_fixed_buffer::FixedBuffer;
    ///
    /// let buf = FixedBuffer::<16>::new();
    /// assert!(buf.is_empty());
    /// assert_eq!(buf.as_bytes_with_nul(), b"\0");
    /// ```
    pub const fn new() -> Self {
        let () = Self::LAYOUT_OK;
        Self { raw: [0u8; N] }
    }

    /// Creates a buffer from a byte slice, keeping as much as fits.
    ///
    /// Truncation is reported through the diagnostic channel.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use saturn_fixed_buffer::FixedBuffer;
    ///
    /// let buf = FixedBuffer::<8>::from_slice(b"truncated!");
    /// assert_eq!(buf.as_bytes(), b"trunca");
    /// ```
    pub fn from_slice(bytes: &[u8]) -> Self {
        let mut buf = Self::new();
        let _ = buf.concat(bytes);
        buf
    }

    /// Creates a buffer holding `count` copies of `byte`.
    ///
    /// A zero count or a NUL byte yields an empty buffer.
    pub fn from_repeat(count: usize, byte: u8) -> Self {
        let mut buf = Self::new();
        let _ = buf.concat_repeat(count, byte);
        buf
    }

    /// Copies another buffer of any capacity, truncating to this capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use saturn_fixed_buffer::FixedBuffer;
    ///
    /// let wide = FixedBuffer::<32>::from("a longer sentence");
    /// let narrow = FixedBuffer::<8>::from_buffer(&wide);
    /// assert_eq!(narrow, "a long");
    /// ```
    pub fn from_buffer<const M: usize>(other: &FixedBuffer<M>) -> Self {
        let mut buf = Self::new();
        let _ = buf.concat_buffer(other);
        buf
    }

    /// Validates raw storage bytes, for example ones read back from a zero-copy
    /// region, and wraps them.
    ///
    /// Returns [`BufferError::InvalidArgument`] if the length byte exceeds the
    /// capacity or the terminator is missing.
    pub fn try_from_raw(raw: [u8; N]) -> Result<Self, BufferError> {
        let () = Self::LAYOUT_OK;
        bytemuck::checked::try_cast(raw).map_err(|_| BufferError::InvalidArgument)
    }

    /// The raw storage, length byte first.
    pub fn as_raw(&self) -> &[u8; N] {
        &self.raw
    }

    /*──────────────────── invariants ───────────────────────*/

    /// Maximum number of bytes the buffer can hold.
    #[inline]
    pub const fn capacity() -> usize {
        Self::CAPACITY
    }

    /// Number of stored bytes. Cached, never recomputed by scanning.
    #[inline]
    pub fn len(&self) -> usize {
        self.raw[0] as usize
    }

    /// Returns `true` if nothing is stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of bytes that can still be appended.
    #[inline]
    pub fn available(&self) -> usize {
        Self::CAPACITY - self.len()
    }

    /// Returns `true` if no more bytes can be appended.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.available() == 0
    }

    /// Sets the length and writes the terminator after it.
    ///
    /// A length beyond the capacity leaves the buffer untouched (it is not
    /// clamped) and returns [`BufferError::InvalidIndex`]. Growing the length
    /// exposes whatever bytes were previously stored there.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use saturn_fixed_buffer::{BufferError, FixedBuffer};
    ///
    /// let mut buf = FixedBuffer::<8>::from("abcdef");
    /// buf.set_len(3).unwrap();
    /// assert_eq!(buf, "abc");
    /// assert_eq!(buf.set_len(7), Err(BufferError::InvalidIndex));
    /// assert_eq!(buf, "abc");
    /// ```
    pub fn set_len(&mut self, len: usize) -> Result<(), BufferError> {
        if len > Self::CAPACITY {
            return Err(BufferError::InvalidIndex);
        }
        // CAPACITY <= 254, so the length always fits the leading byte.
        self.raw[0] = len as u8;
        self.raw[1 + len] = 0;
        Ok(())
    }

    /// Empties the buffer.
    #[inline]
    pub fn clear(&mut self) {
        self.raw[0] = 0;
        self.raw[1] = 0;
    }

    /// Recomputes the length after the storage was edited through
    /// [`storage_mut`](Self::storage_mut): the first NUL ends the text, capped
    /// at the capacity.
    pub fn update_len(&mut self) {
        let data = &self.raw[1..];
        let len = data
            .iter()
            .take(Self::CAPACITY)
            .position(|&b| b == 0)
            .unwrap_or(Self::CAPACITY);
        let _ = self.set_len(len);
    }

    /// Commits a write of `len` bytes. `complete` is false when the write was
    /// truncated, which is reported and turned into an overflow error.
    pub(crate) fn commit_len(&mut self, len: usize, complete: bool) -> Result<(), BufferError> {
        self.set_len(len)?;
        if complete {
            Ok(())
        } else {
            self.notify_overrun()
        }
    }

    pub(crate) fn notify_overrun(&self) -> Result<(), BufferError> {
        diagnostics::overrun(Self::CAPACITY, self.as_bytes());
        Err(BufferError::Overflow)
    }

    pub(crate) fn notify_rejected(&self, data: &[u8]) -> Result<(), BufferError> {
        diagnostics::rejected(Self::CAPACITY, data);
        Err(BufferError::Overflow)
    }

    /*──────────────────── access ───────────────────────*/

    /// The stored bytes, without the terminator.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw[1..1 + self.len()]
    }

    /// The stored bytes followed by the NUL terminator.
    #[inline]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.raw[1..2 + self.len()]
    }

    /// The stored bytes as UTF-8 text.
    ///
    /// The buffer is byte oriented, so truncation may have split a multi-byte
    /// character; that surfaces here as an error.
    pub fn as_str(&self) -> Result<&str, core::str::Utf8Error> {
        core::str::from_utf8(self.as_bytes())
    }

    /// Mutable access to the stored bytes.
    ///
    /// Writing a NUL here does not shorten the buffer; use
    /// [`set_char_at`](Self::set_char_at) or call [`update_len`](Self::update_len).
    #[inline]
    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        let len = self.len();
        &mut self.raw[1..1 + len]
    }

    /// Mutable access to the whole text region, stale bytes included.
    ///
    /// Call [`update_len`](Self::update_len) afterwards.
    #[inline]
    pub fn storage_mut(&mut self) -> &mut [u8] {
        &mut self.raw[1..]
    }

    /// Iterator over the stored bytes.
    pub fn iter(&self) -> core::slice::Iter<'_, u8> {
        self.as_bytes().iter()
    }

    /// The byte at `index`, or 0 when `index` is past the end.
    #[inline]
    pub fn char_at(&self, index: usize) -> u8 {
        self.as_bytes().get(index).copied().unwrap_or(0)
    }

    /// Overwrites the byte at `index`. Out of range indices are ignored.
    /// Writing a NUL shortens the buffer to `index`.
    pub fn set_char_at(&mut self, index: usize, byte: u8) {
        if index >= self.len() {
            return;
        }
        self.raw[1 + index] = byte;
        if byte == 0 {
            let _ = self.set_len(index);
        }
    }

    pub(crate) fn valid_pos(&self, index: usize) -> bool {
        index < self.len()
    }

    /*──────────────────── export ───────────────────────*/

    /// Copies the bytes from `start` into `dest` and NUL-terminates it.
    ///
    /// At most `dest.len() - 1` bytes are copied. `dest` is always terminated,
    /// even when `start` is past the end; an empty `dest` is left alone.
    /// Returns the number of bytes copied, terminator excluded.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use saturn_fixed_buffer::FixedBuffer;
    ///
    /// let buf = FixedBuffer::<16>::from("hello world");
    /// let mut out = [0xffu8; 6];
    /// assert_eq!(buf.to_char_array(&mut out, 6), 5);
    /// assert_eq!(&out, b"world\0");
    /// ```
    pub fn to_char_array(&self, dest: &mut [u8], start: usize) -> usize {
        let Some(room) = dest.len().checked_sub(1) else {
            return 0;
        };
        let src = self.as_bytes().get(start..).unwrap_or(&[]);
        let n = room.min(src.len());
        dest[..n].copy_from_slice(&src[..n]);
        dest[n] = 0;
        n
    }

    /// Same as [`to_char_array`](Self::to_char_array).
    pub fn get_bytes(&self, dest: &mut [u8], start: usize) -> usize {
        self.to_char_array(dest, start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_invariants<const N: usize>(buf: &FixedBuffer<N>) {
        assert!(buf.len() <= FixedBuffer::<N>::capacity());
        assert_eq!(buf.as_raw()[1 + buf.len()], 0);
        assert_eq!(buf.as_bytes_with_nul().last(), Some(&0));
    }

    #[test]
    fn test_default_is_empty() {
        let buf = FixedBuffer::<8>::default();
        assert_eq!(buf.len(), 0);
        assert!(buf.is_empty());
        assert_eq!(buf.available(), 6);
        assert!(!buf.is_full());
        assert_invariants(&buf);
    }

    #[test]
    fn test_capacity_per_storage_size() {
        assert_eq!(FixedBuffer::<4>::capacity(), 2);
        assert_eq!(FixedBuffer::<64>::capacity(), 62);
        assert_eq!(FixedBuffer::<256>::capacity(), 254);
        assert_eq!(core::mem::size_of::<FixedBuffer<64>>(), 64);
    }

    #[test]
    fn test_default_storage_size() {
        let buf: FixedBuffer = FixedBuffer::new();
        assert_eq!(core::mem::size_of_val(&buf), 64);
    }

    #[test]
    fn test_from_slice_truncates() {
        let buf = FixedBuffer::<4>::from_slice(b"abc");
        assert_eq!(buf.as_bytes(), b"ab");
        assert!(buf.is_full());
        assert_invariants(&buf);
    }

    #[test]
    fn test_from_repeat() {
        let buf = FixedBuffer::<8>::from_repeat(3, b'z');
        assert_eq!(buf.as_bytes(), b"zzz");
        assert!(FixedBuffer::<8>::from_repeat(0, b'z').is_empty());
        assert!(FixedBuffer::<8>::from_repeat(3, 0).is_empty());
        assert_eq!(FixedBuffer::<8>::from_repeat(50, b'y').len(), 6);
    }

    #[test]
    fn test_from_buffer_across_capacities() {
        let small = FixedBuffer::<8>::from("abc");
        let big = FixedBuffer::<64>::from_buffer(&small);
        assert_eq!(big.as_bytes(), b"abc");

        let full = FixedBuffer::<64>::from_repeat(40, b'q');
        let cut = FixedBuffer::<12>::from_buffer(&full);
        assert_eq!(cut.len(), 10);
        assert_invariants(&cut);
    }

    #[test]
    fn test_set_len_beyond_capacity_is_ignored() {
        let mut buf = FixedBuffer::<8>::from("abcd");
        assert_eq!(buf.set_len(7), Err(BufferError::InvalidIndex));
        assert_eq!(buf.as_bytes(), b"abcd");

        buf.set_len(6).unwrap();
        assert_eq!(buf.len(), 6);
        assert_invariants(&buf);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut buf = FixedBuffer::<8>::from("abc");
        buf.clear();
        assert_eq!(buf.len(), 0);
        buf.clear();
        assert_eq!(buf.len(), 0);
        assert_invariants(&buf);
    }

    #[test]
    fn test_update_len_after_external_edit() {
        let mut buf = FixedBuffer::<8>::new();
        buf.storage_mut()[..3].copy_from_slice(b"xyz");
        buf.storage_mut()[3] = 0;
        buf.update_len();
        assert_eq!(buf.as_bytes(), b"xyz");

        buf.storage_mut().fill(b'w');
        buf.update_len();
        assert_eq!(buf.len(), 6);
        assert_invariants(&buf);
    }

    #[test]
    fn test_char_access() {
        let mut buf = FixedBuffer::<8>::from("abcd");
        assert_eq!(buf.char_at(1), b'b');
        assert_eq!(buf.char_at(4), 0);

        buf.set_char_at(0, b'A');
        buf.set_char_at(9, b'!');
        assert_eq!(buf.as_bytes(), b"Abcd");

        buf.set_char_at(2, 0);
        assert_eq!(buf.as_bytes(), b"Ab");
        assert_invariants(&buf);
    }

    #[test]
    fn test_as_str() {
        assert_eq!(FixedBuffer::<8>::from("ok").as_str(), Ok("ok"));
        assert!(FixedBuffer::<8>::from_slice(&[0xff, 0xfe]).as_str().is_err());
    }

    #[test]
    fn test_to_char_array() {
        let buf = FixedBuffer::<16>::from("abcdef");

        let mut small = [0xaau8; 3];
        assert_eq!(buf.to_char_array(&mut small, 0), 2);
        assert_eq!(&small, b"ab\0");

        let mut past_end = [0xaau8; 4];
        assert_eq!(buf.get_bytes(&mut past_end, 10), 0);
        assert_eq!(past_end[0], 0);

        let mut large = [0xaau8; 10];
        assert_eq!(buf.to_char_array(&mut large, 4), 2);
        assert_eq!(&large[..3], b"ef\0");

        let mut empty: [u8; 0] = [];
        assert_eq!(buf.to_char_array(&mut empty, 0), 0);
    }

    #[test]
    fn test_replace_matches_reference() {
        let cases: [(&[u8], &[u8], &[u8]); 5] = [
            (b"abab", b"ab", b"c"),
            (b"aaaa", b"a", b"bb"),
            (b"abcabc", b"bc", b""),
            (b"dada", b"a", b"aa"),
            (b"aab", b"ab", b"abab"),
        ];
        for (start, target, replacement) in cases {
            let mut buf = FixedBuffer::<8>::from_slice(start);
            let mut model = start.to_vec();
            buf.replace(target, replacement);
            model_replace(&mut model, target, replacement, FixedBuffer::<8>::capacity());
            assert_eq!(buf.as_bytes(), &model[..]);
            assert_invariants(&buf);
        }
    }

    #[test]
    fn test_bytemuck_views() {
        let buf = FixedBuffer::<8>::from("hi");
        assert_eq!(bytemuck::bytes_of(&buf), &[2, b'h', b'i', 0, 0, 0, 0, 0]);

        let zeroed: FixedBuffer<8> = bytemuck::Zeroable::zeroed();
        assert!(zeroed.is_empty());
    }

    #[test]
    fn test_try_from_raw_validates() {
        let ok = FixedBuffer::<8>::try_from_raw([3, b'a', b'b', b'c', 0, 9, 9, 9]).unwrap();
        assert_eq!(ok.as_bytes(), b"abc");

        assert_eq!(
            FixedBuffer::<8>::try_from_raw([7, 0, 0, 0, 0, 0, 0, 0]).unwrap_err(),
            BufferError::InvalidArgument
        );
        assert_eq!(
            FixedBuffer::<8>::try_from_raw([2, b'a', b'b', b'c', 0, 0, 0, 0]).unwrap_err(),
            BufferError::InvalidArgument
        );
    }

    #[derive(Debug, Clone)]
    enum Op {
        Concat(Vec<u8>),
        Insert(usize, Vec<u8>),
        Remove(usize, usize),
        Truncate(usize),
        Force(u8),
        Replace(Vec<u8>, Vec<u8>),
        SetLen(usize),
    }

    fn text() -> impl Strategy<Value = Vec<u8>> {
        proptest::collection::vec(b'a'..=b'd', 0..8)
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            text().prop_map(Op::Concat),
            (0..12usize, text()).prop_map(|(i, t)| Op::Insert(i, t)),
            (0..12usize, 0..6usize).prop_map(|(i, c)| Op::Remove(i, c)),
            (0..12usize).prop_map(Op::Truncate),
            any::<u8>().prop_map(Op::Force),
            (text(), text()).prop_map(|(a, b)| Op::Replace(a, b)),
            (0..12usize).prop_map(Op::SetLen),
        ]
    }

    /// Reference replace over a `Vec`: matches are taken left to right, the
    /// search resumes after the inserted text, an insert keeps only what fits
    /// and the loop stops once the cursor is past the end.
    fn model_replace(model: &mut Vec<u8>, target: &[u8], replacement: &[u8], cap: usize) {
        if model.is_empty() || target.is_empty() || target == replacement {
            return;
        }
        let find = |m: &[u8], from: usize| -> Option<usize> {
            if from >= m.len() {
                return None;
            }
            m[from..]
                .windows(target.len())
                .position(|w| w == target)
                .map(|p| p + from)
        };

        let mut cursor = find(&model[..], 0);
        while let Some(index) = cursor {
            model.drain(index..index + target.len());
            let next = if replacement.is_empty() {
                index
            } else {
                let n = replacement.len().min(cap - model.len());
                model.splice(index..index, replacement[..n].iter().copied());
                index + replacement.len()
            };
            if next >= model.len() {
                break;
            }
            cursor = find(&model[..], next);
        }
    }

    /// Applies `op` to the buffer and to a plain `Vec` model. Returns false when
    /// the model does not follow the operation and has to be resynchronised.
    fn apply(buf: &mut FixedBuffer<8>, model: &mut Vec<u8>, op: &Op) -> bool {
        let cap = FixedBuffer::<8>::capacity();
        match op {
            Op::Concat(t) => {
                let _ = buf.concat(t);
                if !t.is_empty() {
                    let n = t.len().min(cap - model.len());
                    model.extend_from_slice(&t[..n]);
                }
            }
            Op::Insert(i, t) => {
                let _ = buf.insert(*i, t);
                if *i <= model.len() && !t.is_empty() {
                    let n = t.len().min(cap - model.len());
                    let tail = model.split_off(*i);
                    model.extend_from_slice(&t[..n]);
                    model.extend_from_slice(&tail);
                }
            }
            Op::Remove(i, c) => {
                buf.remove(*i, *c);
                if *i < model.len() {
                    let end = (*i + *c).min(model.len());
                    model.drain(*i..end);
                }
            }
            Op::Truncate(i) => {
                buf.truncate(*i);
                model.truncate(*i);
            }
            Op::Force(b) => {
                let _ = buf.force_concat(*b);
                if *b != 0 {
                    if model.len() == cap {
                        model[cap - 1] = *b;
                    } else {
                        model.push(*b);
                    }
                }
            }
            Op::Replace(a, b) => {
                buf.replace(a, b);
                model_replace(model, a, b, cap);
            }
            Op::SetLen(n) => {
                let _ = buf.set_len(*n);
                return false;
            }
        }
        true
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256, ..ProptestConfig::default()
        })]
        #[test]
        fn test_invariants_hold_for_any_sequence(ops in proptest::collection::vec(op(), 0..24)) {
            let mut buf = FixedBuffer::<8>::new();
            let mut model: Vec<u8> = Vec::new();
            for op in &ops {
                let followed = apply(&mut buf, &mut model, op);
                assert_invariants(&buf);
                if followed {
                    prop_assert_eq!(buf.as_bytes(), &model[..]);
                } else {
                    model = buf.as_bytes().to_vec();
                }
            }
        }

        #[test]
        fn test_assign_round_trip(s in "[ -~]{1,14}") {
            let mut buf = FixedBuffer::<16>::new();
            buf.assign_str(&s).unwrap();
            prop_assert_eq!(buf.as_str().unwrap(), s.as_str());
        }
    }
}
