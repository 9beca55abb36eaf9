//! Hex color value type and keypad input model
//!
//! A [`HexColor`] is always a complete six-digit color; in-progress keypad
//! input lives in [`HexInput`] and never leaves it until all six digits are
//! entered.

use crate::constants::{display, hex};
use crate::{PickerError, Result};
use palette::{FromColor, Hsv, LinSrgb, Srgb};
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A complete RGB color, canonically six uppercase hexadecimal digits
/// with no leading `#`.
///
/// Immutable once constructed. Parsing rejects anything that is not
/// exactly six hex digits (an optional leading `#` is tolerated on input
/// and stripped).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HexColor {
    rgb: [u8; 3],
}

impl HexColor {
    /// Pure black, the session's resting background
    pub const BLACK: HexColor = HexColor { rgb: [0, 0, 0] };

    /// Pure white
    pub const WHITE: HexColor = HexColor {
        rgb: [0xFF, 0xFF, 0xFF],
    };

    /// Construct from RGB channel values
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { rgb: [r, g, b] }
    }

    /// Parse a hex color string
    ///
    /// Accepts exactly six hexadecimal digits, with an optional leading
    /// `#`. Anything else is rejected; in particular, partial keypad
    /// input must stay in [`HexInput`] rather than being parsed.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::InvalidHex`] on wrong length or non-hex
    /// characters.
    pub fn parse(input: &str) -> Result<Self> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        if digits.len() != hex::DIGITS {
            return Err(PickerError::invalid_hex(
                input,
                format!("expected {} digits, got {}", hex::DIGITS, digits.len()),
            ));
        }
        // All-ASCII check up front; it also makes the byte slicing below
        // safe against multi-byte input
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(PickerError::invalid_hex(
                input,
                "contains non-hexadecimal characters",
            ));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|e| PickerError::invalid_hex(input, e.to_string()))
        };

        Ok(Self {
            rgb: [channel(0..2)?, channel(2..4)?, channel(4..6)?],
        })
    }

    /// Generate a uniformly random color
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            rgb: [rng.gen(), rng.gen(), rng.gen()],
        }
    }

    /// RGB channel values in [0, 255]
    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.rgb[0], self.rgb[1], self.rgb[2])
    }

    /// Convert to a palette sRGB color with channels in [0.0, 1.0]
    pub fn to_srgb(&self) -> Srgb {
        Srgb::new(
            self.rgb[0] as f32 / 255.0,
            self.rgb[1] as f32 / 255.0,
            self.rgb[2] as f32 / 255.0,
        )
    }

    /// Relative luminance in [0.0, 1.0], computed in linear light
    pub fn luminance(&self) -> f32 {
        let linear: LinSrgb = self.to_srgb().into_linear();
        0.2126 * linear.red + 0.7152 * linear.green + 0.0722 * linear.blue
    }

    /// HSV hue angle in positive degrees, used to order saved colors
    /// for display
    pub fn hue_degrees(&self) -> f32 {
        let hsv = Hsv::from_color(self.to_srgb());
        hsv.hue.into_positive_degrees()
    }

    /// Black or white, whichever stays readable over this color
    pub fn readable_text_color(&self) -> HexColor {
        if self.luminance() > display::LUMINANCE_SPLIT {
            HexColor::BLACK
        } else {
            HexColor::WHITE
        }
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02X}{:02X}{:02X}",
            self.rgb[0], self.rgb[1], self.rgb[2]
        )
    }
}

impl FromStr for HexColor {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Transient keypad input: zero to six hex digits
///
/// Digits accumulate until the input is complete; a seventh digit is
/// ignored. The buffer is UI state only and is never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HexInput {
    digits: String,
}

impl HexInput {
    /// Create an empty input buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a hex digit, uppercased. Returns false if the buffer is
    /// already full or the character is not a hex digit.
    pub fn push_digit(&mut self, digit: char) -> bool {
        if self.digits.len() >= hex::DIGITS || !digit.is_ascii_hexdigit() {
            return false;
        }
        self.digits.push(digit.to_ascii_uppercase());
        true
    }

    /// Remove the most recent digit, if any
    pub fn backspace(&mut self) {
        self.digits.pop();
    }

    /// Discard all digits
    pub fn clear(&mut self) {
        self.digits.clear();
    }

    /// Replace the buffer with a complete color's digits
    pub fn set_color(&mut self, color: HexColor) {
        self.digits = color.to_string();
    }

    /// Current digits, possibly fewer than six
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// The entered color, only once all six digits are present
    pub fn complete(&self) -> Option<HexColor> {
        if self.digits.len() == hex::DIGITS {
            HexColor::parse(&self.digits).ok()
        } else {
            None
        }
    }
}
