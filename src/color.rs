//! RGBA color used for the overlay's background morph.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Parse a CSS-style hex color string (`#fff` or `#0E1116`).
    ///
    /// Returns `None` for anything that is not a 3- or 6-digit hex string.
    pub fn parse_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#')?;
        match digits.len() {
            3 => {
                let mut channels = [0.0f32; 3];
                for (i, c) in digits.chars().enumerate() {
                    let v = c.to_digit(16)? as f32;
                    // Shorthand digit expands to a doubled pair: f -> ff
                    channels[i] = (v * 16.0 + v) / 255.0;
                }
                Some(Self::rgb(channels[0], channels[1], channels[2]))
            }
            6 => {
                let value = u32::from_str_radix(digits, 16).ok()?;
                Some(Self::from_hex(value))
            }
            _ => None,
        }
    }

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        let color = Color::from_hex(0xFF0000);
        assert_eq!(color.r, 1.0);
        assert_eq!(color.g, 0.0);
        assert_eq!(color.b, 0.0);
        assert_eq!(color.a, 1.0);

        let color = Color::from_hex(0x00FF00);
        assert_eq!(color.g, 1.0);

        let color = Color::from_hex(0x0000FF);
        assert_eq!(color.b, 1.0);
    }

    #[test]
    fn test_parse_hex_six_digits() {
        let color = Color::parse_hex("#0E1116").unwrap();
        assert!((color.r - 14.0 / 255.0).abs() < 1e-6);
        assert!((color.g - 17.0 / 255.0).abs() < 1e-6);
        assert!((color.b - 22.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_parse_hex_shorthand() {
        assert_eq!(Color::parse_hex("#fff").unwrap(), Color::WHITE);
        assert_eq!(Color::parse_hex("#000").unwrap(), Color::BLACK);
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert!(Color::parse_hex("fff").is_none());
        assert!(Color::parse_hex("#ffff").is_none());
        assert!(Color::parse_hex("#gggggg").is_none());
    }
}
