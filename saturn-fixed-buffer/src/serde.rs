//! `serde` support.
//!
//! Buffers serialize as a string when their contents are valid UTF-8 and as a
//! byte sequence otherwise. Deserialization accepts either form and rejects
//! input longer than the capacity instead of truncating it.

use core::fmt;

use ::serde::de::{self, SeqAccess, Visitor};
use ::serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::buffer::FixedBuffer;

impl<const N: usize> Serialize for FixedBuffer<N> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.as_str() {
            Ok(s) => serializer.serialize_str(s),
            Err(_) => serializer.serialize_bytes(self.as_bytes()),
        }
    }
}

struct BufferVisitor<const N: usize>;

impl<'de, const N: usize> Visitor<'de> for BufferVisitor<N> {
    type Value = FixedBuffer<N>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a string of at most {} bytes", FixedBuffer::<N>::capacity())
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.visit_bytes(v.as_bytes())
    }

    fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        if v.len() > FixedBuffer::<N>::capacity() {
            return Err(E::invalid_length(v.len(), &self));
        }
        Ok(FixedBuffer::from_slice(v))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut buf = FixedBuffer::<N>::new();
        while let Some(byte) = seq.next_element::<u8>()? {
            if buf.is_full() {
                return Err(de::Error::invalid_length(buf.len() + 1, &self));
            }
            let len = buf.len();
            buf.storage_mut()[len] = byte;
            let _ = buf.set_len(len + 1);
        }
        Ok(buf)
    }
}

impl<'de, const N: usize> Deserialize<'de> for FixedBuffer<N> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_bytes(BufferVisitor::<N>)
    }
}
