use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// 8-bit RGBA color. The packed `u32` form (`0xRRGGBBAA`) only exists at the
/// pixel buffer boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid color {0:?}, expected #RRGGBB or #RRGGBBAA")]
pub struct ParseColorError(pub String);

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 0xFF);
    pub const WHITE: Rgba = Rgba::new(0xFF, 0xFF, 0xFF, 0xFF);
    pub const MARKER: Rgba = Rgba::new(0xFF, 0x00, 0xFF, 0xFF);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_packed(p: u32) -> Self {
        Self {
            r: (p >> 24) as u8,
            g: (p >> 16) as u8,
            b: (p >> 8) as u8,
            a: p as u8,
        }
    }

    pub const fn to_packed(self) -> u32 {
        ((self.r as u32) << 24) | ((self.g as u32) << 16) | ((self.b as u32) << 8) | self.a as u32
    }
}

impl std::str::FromStr for Rgba {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        let v = u32::from_str_radix(hex, 16).map_err(|_| err())?;
        match hex.len() {
            6 => Ok(Rgba::from_packed((v << 8) | 0xFF)),
            8 => Ok(Rgba::from_packed(v)),
            _ => Err(err()),
        }
    }
}

impl TryFrom<String> for Rgba {
    type Error = ParseColorError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Rgba> for String {
    fn from(c: Rgba) -> String {
        c.to_string()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.to_packed())
    }
}
