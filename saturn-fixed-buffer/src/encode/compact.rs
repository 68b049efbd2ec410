//! Minimal embedded-style renderer.
//!
//! Integers are produced right to left straight into the scratch array. Floats
//! are scaled to an integer number of `10^-precision` units, so values whose
//! scaled magnitude does not fit in a `u64` are refused.

use super::{DigitEncoder, FloatFormatter, Radix, SliceWriter, FLOAT_SCRATCH_LEN, INT_SCRATCH_LEN};

const DIGITS: &[u8; 16] = b"0123456789abcdef";

// Largest power of ten that fits in a u64 is 10^19.
const MAX_PRECISION: usize = 19;

/// Hand-rolled `utoa`/`dtostrf` backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct CompactEncoder;

impl DigitEncoder for CompactEncoder {
    fn encode_int(
        negative: bool,
        mut magnitude: u64,
        radix: Radix,
        scratch: &mut [u8; INT_SCRATCH_LEN],
    ) -> &[u8] {
        let base = u64::from(radix.value());
        let mut pos = scratch.len();
        loop {
            pos -= 1;
            scratch[pos] = DIGITS[(magnitude % base) as usize];
            magnitude /= base;
            if magnitude == 0 {
                break;
            }
        }
        if negative {
            pos -= 1;
            scratch[pos] = b'-';
        }
        &scratch[pos..]
    }
}

impl FloatFormatter for CompactEncoder {
    fn format_float(
        value: f64,
        width: usize,
        precision: usize,
        scratch: &mut [u8; FLOAT_SCRATCH_LEN],
    ) -> Option<&[u8]> {
        let mut body = [0u8; FLOAT_SCRATCH_LEN];
        let body_len = render_unpadded(value, precision, &mut body)?;

        let pad = width.saturating_sub(body_len);
        let total = pad + body_len;
        if total > scratch.len() {
            return None;
        }
        scratch[..pad].fill(b' ');
        scratch[pad..total].copy_from_slice(&body[..body_len]);
        Some(&scratch[..total])
    }
}

fn render_unpadded(value: f64, precision: usize, out: &mut [u8]) -> Option<usize> {
    let mut w = SliceWriter::new(out);

    if value.is_nan() {
        push_all(&mut w, b"nan")?;
        return Some(w.len());
    }
    if value < 0.0 {
        w.push(b'-').ok()?;
    }
    if value.is_infinite() {
        push_all(&mut w, b"inf")?;
        return Some(w.len());
    }
    if precision > MAX_PRECISION {
        return None;
    }

    let abs = if value < 0.0 { -value } else { value };
    let mut scale: u64 = 1;
    for _ in 0..precision {
        scale *= 10;
    }
    let scaled = abs * scale as f64 + 0.5;
    if scaled >= u64::MAX as f64 {
        return None;
    }
    let units = scaled as u64;

    let mut digits = [0u8; INT_SCRATCH_LEN];
    let int_part = CompactEncoder::encode_int(false, units / scale, Radix::Base10, &mut digits);
    push_all(&mut w, int_part)?;

    if precision > 0 {
        w.push(b'.').ok()?;
        let frac = CompactEncoder::encode_int(false, units % scale, Radix::Base10, &mut digits);
        for _ in frac.len()..precision {
            w.push(b'0').ok()?;
        }
        push_all(&mut w, frac)?;
    }
    Some(w.len())
}

fn push_all(w: &mut SliceWriter<'_>, bytes: &[u8]) -> Option<()> {
    for &b in bytes {
        w.push(b).ok()?;
    }
    Some(())
}
