//! Colours and glyph sets used by the backdrops
//!
//! Colours serialize as `#rrggbb` strings so palettes can be edited in the
//! JSON config.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Rgb::from_hex(&s).ok_or_else(|| format!("invalid colour {s:?}, expected #rrggbb"))
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_hex()
    }
}

// Falling currency glyphs
pub const MONEY_GLYPHS: &[char] = &['$', '¢', '£', '€', '¥', '₹', '₿'];

pub const MONEY_GREENS: &[Rgb] = &[
    Rgb::new(0x10, 0xb9, 0x81), // #10b981
    Rgb::new(0x22, 0xc5, 0x5e), // #22c55e
    Rgb::new(0x16, 0xa3, 0x4a), // #16a34a
    Rgb::new(0x15, 0x80, 0x3d), // #15803d
    Rgb::new(0x14, 0x53, 0x2d), // #14532d
];

pub const CHART_COLORS: &[Rgb] = &[
    Rgb::new(0x10, 0xb9, 0x81), // #10b981
    Rgb::new(0x22, 0xc5, 0x5e), // #22c55e
    Rgb::new(0x93, 0x33, 0xea), // #9333ea
    Rgb::new(0xec, 0x48, 0x99), // #ec4899
    Rgb::new(0x3b, 0x82, 0xf6), // #3b82f6
];

/// Chart background grid (purple, drawn at low alpha)
pub const GRID: Rgb = Rgb::new(147, 51, 234);

pub const PRICE_TAG: Rgb = Rgb::new(0x10, 0xb9, 0x81);

pub const MATRIX_GREENS: &[Rgb] = &[
    Rgb::new(0x00, 0xff, 0x41), // #00ff41
    Rgb::new(0x39, 0xff, 0x14), // #39ff14
    Rgb::new(0x00, 0xff, 0x00), // #00ff00
    Rgb::new(0x32, 0xcd, 0x32), // #32cd32
    Rgb::new(0xad, 0xff, 0x2f), // #adff2f
];

pub const MATRIX_TERMS: &[&str] = &[
    "BTC", "ETH", "DOGE", "SHIB", "PEPE", "APE", "MOON",
    "TO THE MOON", "DIAMOND HANDS", "100X PUMP",
    "HODL", "WAGMI", "NGMI", "LFG", "PUMP", "DUMP", "RUG",
    "WHALE ALERT", "BULL RUN", "BEAR TRAP", "SHORT SQUEEZE",
    "0x1a2b3c4d5e6f...", "0xdeadbeef...", "0x420691337...",
    "PROFIT SECURED", "PAPER HANDS",
    "NOT FINANCIAL ADVICE", "DYOR", "NFA", "SAFU",
    "WHEN LAMBO?", "GM FRENS", "NUMBER GO UP", "$",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parse() {
        assert_eq!(Rgb::from_hex("#10b981"), Some(Rgb::new(0x10, 0xb9, 0x81)));
        assert_eq!(Rgb::from_hex("3b82f6"), Some(Rgb::new(0x3b, 0x82, 0xf6)));
        assert_eq!(Rgb::from_hex("#10b98"), None);
        assert_eq!(Rgb::from_hex("#zzzzzz"), None);
        assert_eq!(Rgb::from_hex("#€€"), None);
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&MONEY_GREENS[0]).unwrap();
        assert_eq!(json, "\"#10b981\"");
        let back: Rgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, MONEY_GREENS[0]);
        assert!(serde_json::from_str::<Rgb>("\"green\"").is_err());
    }
}
