use core::fmt::Write;

use super::{DigitEncoder, FloatFormatter, Radix, SliceWriter, FLOAT_SCRATCH_LEN, INT_SCRATCH_LEN};

/// Backend that renders through `core::fmt`.
///
/// Float output follows Rust's formatting rules, so `NaN` and `inf` are spelled
/// the Rust way and any finite `f64` renders exactly, scratch permitting.
#[derive(Clone, Copy, Debug, Default)]
pub struct CoreFmtEncoder;

impl DigitEncoder for CoreFmtEncoder {
    fn encode_int(
        negative: bool,
        magnitude: u64,
        radix: Radix,
        scratch: &mut [u8; INT_SCRATCH_LEN],
    ) -> &[u8] {
        let mut w = SliceWriter::new(scratch);
        // The scratch holds the worst case, so these writes cannot fail.
        let _ = if negative { w.push(b'-') } else { Ok(()) };
        let _ = match radix {
            Radix::Base2 => write!(w, "{magnitude:b}"),
            Radix::Base8 => write!(w, "{magnitude:o}"),
            Radix::Base10 => write!(w, "{magnitude}"),
            Radix::Base16 => write!(w, "{magnitude:x}"),
        };
        w.into_written()
    }
}

impl FloatFormatter for CoreFmtEncoder {
    fn format_float(
        value: f64,
        width: usize,
        precision: usize,
        scratch: &mut [u8; FLOAT_SCRATCH_LEN],
    ) -> Option<&[u8]> {
        let mut w = SliceWriter::new(scratch);
        write!(w, "{value:>width$.precision$}").ok()?;
        Some(w.into_written())
    }
}
