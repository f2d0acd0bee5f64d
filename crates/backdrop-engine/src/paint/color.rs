use core::fmt;

/// Straight-alpha RGBA color packed into a `u32` as `0xRRGGBBAA`.
///
/// Every bit pattern is a valid color, including `0` (fully transparent
/// black). "No color" is expressed with `Option<PackedColor>`, never with a
/// sentinel value.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct PackedColor(pub u32);

impl PackedColor {
    pub const TRANSPARENT: Self = Self(0x0000_0000);
    pub const BLACK: Self = Self(0x0000_00FF);
    pub const WHITE: Self = Self(0xFFFF_FFFF);
}

impl fmt::Debug for PackedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

impl From<u32> for PackedColor {
    #[inline]
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}
