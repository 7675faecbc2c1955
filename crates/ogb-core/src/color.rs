//! Display color metadata attached to simulation types.
//!
//! The engine never interprets colors; they are carried for front ends.

/// A packed 0xRRGGBB color.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color(0xFFFFFF);
    pub const BLACK: Color = Color(0x000000);

    /// Parse a hex color, with or without a `0x` prefix (`0xFF00AA`, `FF00AA`).
    pub fn from_hex(token: &str) -> Option<Color> {
        let digits = token.strip_prefix("0x").unwrap_or(token);
        if digits.is_empty() || digits.len() > 8 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Color)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}
