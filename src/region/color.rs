//! Display colors for regions.

use std::fmt;

use rand::{seq::IndexedRandom, Rng};

/// Mid-tone palette, visible on both light and satellite base maps.
pub const PALETTE: [&str; 7] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8C8",
];

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl fmt::Display for Rgb {
    /// Format as CSS hex: #RRGGBB
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Pick a palette color at random.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    PALETTE.choose(rng).copied().unwrap_or(PALETTE[0]).to_string()
}

/// Random color with every channel kept in the middle of its range,
/// never close to black or white.
pub fn random_rgb<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    Rgb {
        r: rng.random_range(64..=191),
        g: rng.random_range(64..=191),
        b: rng.random_range(64..=191),
    }
}
