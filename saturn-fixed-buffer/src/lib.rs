//! # Saturn Fixed Buffer
//!
//! A fixed-capacity, allocation-free byte string for **Arch / Saturn on-chain programs** and other
//! environments where heap allocation is unavailable or too expensive.
//!
//! [`FixedBuffer<N>`] lives entirely in an `N`-byte array: one length byte, the text and a NUL
//! terminator. Every operation is bounded by the capacity `N - 2`; writes that do not fit keep the
//! prefix that does, report the overflow and return an error instead of panicking.
//!
//! ## Features
//!
//! - **Mutation** – insert, concat, assign, remove, replace, trim and case mapping
//! - **Search** – prefix/suffix tests, forward and backward byte and substring search, substrings
//! - **Numbers** – integers in base 2/8/10/16 and fixed-point floats, plus `atol`/`atof` style parsing
//! - **Formatting** – [`fixed_format!`] and `core::fmt::Write` with output bounded by the capacity
//! - **Comparison** – `strncmp` style three-way compare, case-insensitive equality, `Ord` and `Hash`
//! - **Zero-copy** – `bytemuck` views of the raw storage, validated on the way back in
//!
//! ## Cargo Features
//!
//! | Feature flag | Purpose | Default |
//! |--------------|---------|---------|
//! | `std` | `std::error::Error` for [`BufferError`] and `std` support in dependencies | ✅ |
//! | `tracing` | Report overflow as `tracing` events under [`diagnostics::TARGET`] | ✅ |
//! | `serde` | `Serialize`/`Deserialize` for [`FixedBuffer`] | ❌ |
//! | `compact-digits` | Use [`CompactEncoder`] instead of [`CoreFmtEncoder`] for numbers | ❌ |
//!
//! ## Quick Examples
//!
//! ### Building text
//!
//! ```rust
//! use saturn_fixed_buffer::{BufferError, FixedBuffer};
//!
//! let mut buf: FixedBuffer<16> = FixedBuffer::from("hello");
//! buf.concat_str(" world").unwrap();
//! buf.replace_str("world", "there");
//! assert_eq!(buf, "hello there");
//!
//! // Too long: the prefix that fits is kept.
//! assert_eq!(buf.concat_str(" and more"), Err(BufferError::Overflow));
//! assert_eq!(buf, "hello there an");
//! ```
//!
//! ### Numbers
//!
//! ```rust
//! use saturn_fixed_buffer::{FixedBuffer, Radix};
//!
//! let mut buf = FixedBuffer::<32>::new();
//! buf.assign_int(-255, Radix::Base16).unwrap();
//! assert_eq!(buf, "-ff");
//!
//! buf.assign_float(2.5f64, 3).unwrap();
//! assert_eq!(buf, "2.500");
//!
//! let parsed = FixedBuffer::<16>::from("  42 apples");
//! assert_eq!(parsed.get_int(), Ok(42));
//! ```
//!
//! ### Formatting
//!
//! ```rust
//! use saturn_fixed_buffer::{fixed_format, FixedBuffer};
//!
//! let mut line = FixedBuffer::<32>::new();
//! fixed_format!(line, "{}:{:>4}", "slot", 7).unwrap();
//! assert_eq!(line, "slot:   7");
//! ```
//!
//! ## Why a Fixed Buffer?
//!
//! A `String` needs an allocator and may reallocate at any push. A fixed buffer instead gives:
//!
//! - **Predictable layout** – the whole value is `N` plain bytes, suitable for account storage
//! - **Bounded cost** – no allocation, and every operation is linear in the stored length
//! - **No panics** – out of range indices and oversized writes become errors
//!
//! [`FixedBuffer<N>`]: buffer::FixedBuffer

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod buffer;
pub mod diagnostics;
pub mod encode;
pub mod error;
#[cfg(feature = "serde")]
mod serde;

pub use buffer::numeric::DEFAULT_DEC_PLACES;
pub use buffer::ops::concat;
pub use buffer::{FixedBuffer, NPOS};
pub use encode::{CompactEncoder, CoreFmtEncoder, DefaultEncoder, DigitEncoder, FloatFormatter, Radix};
pub use error::BufferError;
