//! Packing of float colors into 32-bit pixels.

use orb_math::Vec4;

/// Color type alias (RGBA values, 0-1)
pub type Color = Vec4;

/// Pack a normalized RGBA color into a `u32` pixel.
///
/// Each channel is scaled by 255 and truncated. Bytes are laid out from
/// least to most significant as `[R, G, B, A]`, so the little-endian bytes of
/// the result are RGBA8. Inputs must already be in [0, 1]; no clamping
/// happens here.
#[inline]
pub fn pack(color: Color) -> u32 {
    let r = (color.x * 255.0) as u8;
    let g = (color.y * 255.0) as u8;
    let b = (color.z * 255.0) as u8;
    let a = (color.w * 255.0) as u8;
    (a as u32) << 24 | (b as u32) << 16 | (g as u32) << 8 | r as u32
}

/// Split a packed pixel back into `[R, G, B, A]` bytes.
#[inline]
pub fn unpack(pixel: u32) -> [u8; 4] {
    pixel.to_le_bytes()
}
