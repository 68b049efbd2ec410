//! Three-way comparison and equality.
//!
//! [`FixedBuffer::compare_to`] keeps the C `strncmp` contract: it returns the
//! difference of the first mismatching bytes, reads bytes past the shorter
//! side as NUL and stops at a NUL both sides share. The standard comparison
//! traits are built on it, with the length as a final tie-break so that `Ord`
//! agrees with `Eq` even for contents holding an embedded NUL.

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

use super::FixedBuffer;

impl<const N: usize> FixedBuffer<N> {
    /// Three-way byte comparison with `rhs`.
    ///
    /// - both empty: 0
    /// - `rhs` empty: the first byte of `self`
    /// - `self` empty: the negated first byte of `rhs`
    /// - otherwise the difference of the first mismatching bytes within
    ///   `max(len, rhs.len())` positions, where missing bytes count as NUL
    ///
    /// # Examples
    ///
    /// ```rust
    /// use saturn_fixed_buffer::FixedBuffer;
    ///
    /// assert_eq!(FixedBuffer::<8>::from("abc").compare_to(b"abc"), 0);
    /// assert_eq!(FixedBuffer::<8>::from("").compare_to(b"x"), -(b'x' as i32));
    /// assert!(FixedBuffer::<8>::from("ab").compare_to(b"abc") < 0);
    /// ```
    pub fn compare_to(&self, rhs: &[u8]) -> i32 {
        let lhs = self.as_bytes();
        match (lhs.first(), rhs.first()) {
            (None, None) => return 0,
            (Some(&first), None) => return i32::from(first),
            (None, Some(&first)) => return -i32::from(first),
            _ => {}
        }

        for i in 0..lhs.len().max(rhs.len()) {
            let a = lhs.get(i).copied().unwrap_or(0);
            let b = rhs.get(i).copied().unwrap_or(0);
            if a != b {
                return i32::from(a) - i32::from(b);
            }
            if a == 0 {
                break;
            }
        }
        0
    }

    /// [`compare_to`](Self::compare_to) for text.
    pub fn compare_to_str(&self, rhs: &str) -> i32 {
        self.compare_to(rhs.as_bytes())
    }

    /// [`compare_to`](Self::compare_to) against a buffer of any capacity.
    pub fn compare_to_buffer<const M: usize>(&self, rhs: &FixedBuffer<M>) -> i32 {
        self.compare_to(rhs.as_bytes())
    }

    /// Equality with `rhs`, optionally ignoring ASCII case.
    ///
    /// Lengths are compared first; only equal lengths look at the bytes.
    pub fn equals(&self, rhs: &[u8], case_insensitive: bool) -> bool {
        if self.len() != rhs.len() {
            return false;
        }
        if case_insensitive {
            self.as_bytes().eq_ignore_ascii_case(rhs)
        } else {
            self.compare_to(rhs) == 0
        }
    }

    /// ASCII case-insensitive equality.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use saturn_fixed_buffer::FixedBuffer;
    ///
    /// let buf = FixedBuffer::<16>::from("Content-Type");
    /// assert!(buf.equals_ignore_case(b"content-type"));
    /// assert!(!buf.equals_ignore_case(b"content"));
    /// ```
    pub fn equals_ignore_case(&self, rhs: &[u8]) -> bool {
        self.equals(rhs, true)
    }

    fn ordering(&self, rhs: &[u8]) -> Ordering {
        self.compare_to(rhs).cmp(&0).then(self.len().cmp(&rhs.len()))
    }

    fn nul_prefix(&self) -> &[u8] {
        let bytes = self.as_bytes();
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        &bytes[..end]
    }
}

impl<const N: usize, const M: usize> PartialEq<FixedBuffer<M>> for FixedBuffer<N> {
    fn eq(&self, other: &FixedBuffer<M>) -> bool {
        self.equals(other.as_bytes(), false)
    }
}

impl<const N: usize> Eq for FixedBuffer<N> {}

impl<const N: usize> PartialEq<[u8]> for FixedBuffer<N> {
    fn eq(&self, other: &[u8]) -> bool {
        self.equals(other, false)
    }
}

impl<const N: usize> PartialEq<&[u8]> for FixedBuffer<N> {
    fn eq(&self, other: &&[u8]) -> bool {
        self.equals(other, false)
    }
}

impl<const N: usize> PartialEq<str> for FixedBuffer<N> {
    fn eq(&self, other: &str) -> bool {
        self.equals(other.as_bytes(), false)
    }
}

impl<const N: usize> PartialEq<&str> for FixedBuffer<N> {
    fn eq(&self, other: &&str) -> bool {
        self.equals(other.as_bytes(), false)
    }
}

impl<const N: usize> PartialEq<FixedBuffer<N>> for str {
    fn eq(&self, other: &FixedBuffer<N>) -> bool {
        other == self
    }
}

impl<const N: usize> PartialEq<FixedBuffer<N>> for &str {
    fn eq(&self, other: &FixedBuffer<N>) -> bool {
        other == *self
    }
}

impl<const N: usize, const M: usize> PartialOrd<FixedBuffer<M>> for FixedBuffer<N> {
    fn partial_cmp(&self, other: &FixedBuffer<M>) -> Option<Ordering> {
        Some(self.ordering(other.as_bytes()))
    }
}

impl<const N: usize> Ord for FixedBuffer<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordering(other.as_bytes())
    }
}

impl<const N: usize> PartialOrd<str> for FixedBuffer<N> {
    fn partial_cmp(&self, other: &str) -> Option<Ordering> {
        Some(self.ordering(other.as_bytes()))
    }
}

impl<const N: usize> PartialOrd<&str> for FixedBuffer<N> {
    fn partial_cmp(&self, other: &&str) -> Option<Ordering> {
        Some(self.ordering(other.as_bytes()))
    }
}

impl<const N: usize> Hash for FixedBuffer<N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Equality stops at the first NUL, so the hash must too.
        self.nul_prefix().hash(state);
        self.len().hash(state);
    }
}
