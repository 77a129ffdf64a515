// File: ./src/color_utils.rs
// Tag badge colors and parsing of configured chart colors.
// Kept free of UI types so the export path and tests can share it.

/// An sRGB color with byte channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Accepts `#RRGGBB` or `RRGGBB`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |at: usize| u8::from_str_radix(&digits[at..at + 2], 16).ok();
        Some(Self(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Pastel badge color for a tag. Same tag, same color, on every run.
    pub fn for_tag(tag: &str) -> Self {
        let hash = fnv1a(tag.as_bytes());
        let hue = (hash % 360) as f32;
        let saturation = 0.45 + ((hash >> 20) % 41) as f32 / 100.0;
        let lightness = 0.68 + ((hash >> 40) % 20) as f32 / 100.0;
        Self::from_hsl(hue, saturation, lightness)
    }

    fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let sector = hue / 60.0;
        let second = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
        let (r, g, b) = match sector as u32 {
            0 => (chroma, second, 0.0),
            1 => (second, chroma, 0.0),
            2 => (0.0, chroma, second),
            3 => (0.0, second, chroma),
            4 => (second, 0.0, chroma),
            _ => (chroma, 0.0, second),
        };
        let offset = lightness - chroma / 2.0;
        let byte = |v: f32| ((v + offset).clamp(0.0, 1.0) * 255.0).round() as u8;
        Self(byte(r), byte(g), byte(b))
    }

    /// True when white text reads better than black on this background.
    pub fn is_dark(self) -> bool {
        let Self(r, g, b) = self;
        let luma = 299 * r as u32 + 587 * g as u32 + 114 * b as u32;
        luma < 128 * 1000
    }
}

// std's DefaultHasher is not guaranteed stable across releases.
fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325, |acc, b| {
        (acc ^ *b as u64).wrapping_mul(0x0000_0100_0000_01b3)
    })
}
