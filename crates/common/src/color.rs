use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// RGB color with `f32` channels.
///
/// Channels are nominally in `[0, 1]` but are not clamped: interpolating with a
/// factor outside `[0, 1]` extrapolates past both endpoints. Serialized as a
/// `#RRGGBB` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// Errors from parsing a hex color string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("expected 3 or 6 hex digits, got {0:?}")]
    BadLength(String),
    #[error("invalid hex digit in {0:?}")]
    BadDigit(String),
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from 8-bit channels.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Parse `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB`.
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let digits = s.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(s.to_string()));
        }
        let expanded: String = match digits.len() {
            6 => digits.to_string(),
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            _ => return Err(ColorParseError::BadLength(s.to_string())),
        };
        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16)
                .map_err(|_| ColorParseError::BadDigit(s.to_string()))
        };
        Ok(Self::from_rgb8(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Linear interpolation from `a` (t = 0) to `b` (t = 1).
    ///
    /// Written as `a * (1 - t) + b * t` so both endpoints are reproduced
    /// exactly. Factors outside `[0, 1]` extrapolate.
    pub fn lerp(a: Color, b: Color, t: f32) -> Color {
        let mix = |x: f32, y: f32| x * (1.0 - t) + y * t;
        Color::rgb(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
    }

    /// Multiply every channel by `k`.
    pub fn scaled(self, k: f32) -> Color {
        Color::rgb(self.r * k, self.g * k, self.b * k)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn to_rgba(self, alpha: f32) -> [f32; 4] {
        [self.r, self.g, self.b, alpha]
    }

    /// 8-bit channels, clamped to the displayable range.
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |x: f32| (x.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// `#RRGGBB` form of [`Color::to_rgb8`].
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02X}{g:02X}{b:02X}")
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_six_digit_hex() {
        let c = Color::from_hex("#00FFF0").unwrap();
        assert_eq!(c, Color::rgb(0.0, 1.0, 240.0 / 255.0));
    }

    #[test]
    fn parse_without_hash_and_short_form() {
        assert_eq!(Color::from_hex("ff0055").unwrap(), Color::from_rgb8(255, 0, 0x55));
        assert_eq!(Color::from_hex("#fff").unwrap(), Color::WHITE);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            Color::from_hex("#12345"),
            Err(ColorParseError::BadLength(_))
        ));
        assert!(matches!(
            Color::from_hex("#GG0000"),
            Err(ColorParseError::BadDigit(_))
        ));
    }

    #[test]
    fn parse_rejects_signed_channels() {
        for input in ["#+F+F+F", "+F+F+F", "#-1-1-1", "#+FF"] {
            assert!(
                matches!(Color::from_hex(input), Err(ColorParseError::BadDigit(_))),
                "{input} should not parse"
            );
        }
    }

    #[test]
    fn lerp_hits_endpoints_exactly() {
        let a = Color::from_hex("#00FFF0").unwrap();
        let b = Color::from_hex("#FF0055").unwrap();
        assert_eq!(Color::lerp(a, b, 0.0), a);
        assert_eq!(Color::lerp(a, b, 1.0), b);
    }

    #[test]
    fn lerp_midpoint_is_componentwise_mean() {
        let a = Color::from_hex("#00FFF0").unwrap();
        let b = Color::from_hex("#FF0055").unwrap();
        let mid = Color::lerp(a, b, 0.5);
        assert_eq!(mid.r, (a.r + b.r) / 2.0);
        assert_eq!(mid.g, (a.g + b.g) / 2.0);
        assert_eq!(mid.b, (a.b + b.b) / 2.0);
    }

    #[test]
    fn lerp_extrapolates_past_endpoint() {
        let c = Color::lerp(Color::BLACK, Color::rgb(0.5, 0.5, 0.5), 1.2);
        assert!((c.r - 0.6).abs() < 1e-6);
    }

    #[test]
    fn hex_round_trip_and_clamp() {
        assert_eq!(Color::from_hex("#FF0055").unwrap().to_hex(), "#FF0055");
        assert_eq!(Color::rgb(1.5, -0.2, 0.0).to_hex(), "#FF0000");
    }

    #[test]
    fn string_conversions_used_by_serde() {
        let c = Color::try_from("#111111".to_string()).unwrap();
        assert_eq!(String::from(c), "#111111");
        assert!(Color::try_from("nope".to_string()).is_err());
    }
}
