//! 16.16 fixed-point temperature values.

use std::fmt;

/// An unsigned 32-bit fixed-point number in 16.16 format.
///
/// The integer part occupies the high 16 bits and the fraction the low
/// 16 bits. The raw word is what travels on the wire, so the layout is
/// part of the boundary message format.
///
/// # Examples
///
/// ```
/// use heatmesh_core::Fixed;
///
/// let hot = Fixed::from_int(255);
/// assert_eq!(hot.raw(), 255 << 16);
/// assert_eq!(hot.integer_part(), 255);
///
/// let half = Fixed::from_parts(0, 0x8000);
/// assert_eq!(half.to_f64(), 0.5);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fixed(u32);

impl Fixed {
    /// Number of fractional bits.
    pub const FRAC_BITS: u32 = 16;

    /// Zero.
    pub const ZERO: Fixed = Fixed(0);

    /// Build from a raw 16.16 word.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Build from an integer temperature with zero fraction.
    pub const fn from_int(int: u16) -> Self {
        Self((int as u32) << Self::FRAC_BITS)
    }

    /// Build from explicit integer and fraction halves.
    pub const fn from_parts(int: u16, frac: u16) -> Self {
        Self(((int as u32) << Self::FRAC_BITS) | frac as u32)
    }

    /// The raw 16.16 word.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Integer part (high 16 bits).
    pub const fn integer_part(self) -> u16 {
        (self.0 >> Self::FRAC_BITS) as u16
    }

    /// Fractional part (low 16 bits).
    pub const fn fraction(self) -> u16 {
        (self.0 & 0xffff) as u16
    }

    /// Lossless conversion to `f64` for display and assertions.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / (1u64 << Self::FRAC_BITS) as f64
    }

    /// Floor average of four samples: `(a + b + c + d) >> 2`.
    ///
    /// Shifting a sum of 16.16 values keeps the 16.16 scale, so the result
    /// needs no rescaling. The sum is taken in 64 bits; the quotient always
    /// fits back into 32 bits.
    pub fn average4(a: Fixed, b: Fixed, c: Fixed, d: Fixed) -> Fixed {
        let sum = a.0 as u64 + b.0 as u64 + c.0 as u64 + d.0 as u64;
        Fixed((sum >> 2) as u32)
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.to_f64())
    }
}

impl From<u16> for Fixed {
    fn from(v: u16) -> Self {
        Self::from_int(v)
    }
}
