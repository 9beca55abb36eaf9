//! Color value types and the interactive wheel sampler
//!
//! This module handles hex color parsing and derived values, the transient
//! keypad input model, and the gradient color wheel used for drag-to-pick.

pub mod hex;
pub mod wheel;

pub use hex::{HexColor, HexInput};
pub use wheel::{ColorWheel, WheelCache};
