//! Hex color literal accessor.
//!
//! Pure conversions between `#RGB` / `#RRGGBB` / `#RRGGBBAA` token text and
//! 8-bit channels, used by editors for inline color swatches and pickers.

use serde::{Deserialize, Serialize};

/// 8-bit RGBA channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

fn byte_at(bytes: &[u8], i: usize) -> Option<u8> {
    Some(hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?)
}

/// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA`. The `#` is optional.
///
/// The 3-digit form duplicates each nibble. Any other length, or a non-hex
/// digit, yields `None`.
pub fn parse_hex(text: &str) -> Option<Rgba> {
    let hex = text.strip_prefix('#').unwrap_or(text);
    let bytes = hex.as_bytes();

    match bytes.len() {
        3 => {
            let r = hex_val(bytes[0])?;
            let g = hex_val(bytes[1])?;
            let b = hex_val(bytes[2])?;
            Some(Rgba::rgb(r * 17, g * 17, b * 17))
        }
        6 => Some(Rgba::rgb(
            byte_at(bytes, 0)?,
            byte_at(bytes, 2)?,
            byte_at(bytes, 4)?,
        )),
        8 => Some(Rgba {
            r: byte_at(bytes, 0)?,
            g: byte_at(bytes, 2)?,
            b: byte_at(bytes, 4)?,
            a: byte_at(bytes, 6)?,
        }),
        _ => None,
    }
}

const HEX_CHARS: &[u8; 16] = b"0123456789ABCDEF";

fn push_byte(out: &mut String, v: u8) {
    out.push(HEX_CHARS[(v >> 4) as usize] as char);
    out.push(HEX_CHARS[(v & 0xF) as usize] as char);
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// `#RRGGBB`, upper-case. Alpha is dropped; pickers write the alpha
    /// channel through the separate `(alpha)` suffix.
    pub fn to_hex(&self) -> String {
        let mut out = String::with_capacity(7);
        out.push('#');
        push_byte(&mut out, self.r);
        push_byte(&mut out, self.g);
        push_byte(&mut out, self.b);
        out
    }

    /// `#RRGGBBAA`, upper-case.
    pub fn to_hex_with_alpha(&self) -> String {
        let mut out = self.to_hex();
        push_byte(&mut out, self.a);
        out
    }

    /// Channels as `[0.0, 1.0]` floats, in r, g, b, a order.
    pub fn to_unit(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a].map(|c| f32::from(c) / 255.0)
    }

    /// Inverse of [`Rgba::to_unit`]; out-of-range input is clamped.
    pub fn from_unit(r: f32, g: f32, b: f32, a: f32) -> Self {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self {
            r: q(r),
            g: q(g),
            b: q(b),
            a: q(a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_digits_roundtrip_case_insensitive() {
        let c = parse_hex("#1a2B3c").unwrap();
        assert_eq!(c, Rgba::rgb(0x1A, 0x2B, 0x3C));
        assert!(c.to_hex().eq_ignore_ascii_case("#1a2b3c"));
    }

    #[test]
    fn three_digits_duplicate_nibbles() {
        assert_eq!(parse_hex("#abc").unwrap().to_hex(), "#AABBCC");
        assert_eq!(parse_hex("fff"), Some(Rgba::rgb(255, 255, 255)));
    }

    #[test]
    fn eight_digits_carry_alpha() {
        let c = parse_hex("#33669980").unwrap();
        assert_eq!(c.a, 0x80);
        assert_eq!(c.to_hex(), "#336699");
        assert_eq!(c.to_hex_with_alpha(), "#33669980");
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_hex("#12").is_none());
        assert!(parse_hex("#12345").is_none());
        assert!(parse_hex("#gggggg").is_none());
        assert!(parse_hex("").is_none());
    }

    #[test]
    fn unit_conversion_clamps() {
        let c = Rgba::from_unit(1.5, 0.0, 0.2, 1.0);
        assert_eq!(c, Rgba::rgb(255, 0, 51));
        assert_eq!(c.to_unit()[0], 1.0);
    }
}
